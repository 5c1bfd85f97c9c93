//! Model transforms.

mod spin;

pub use spin::Spin;
