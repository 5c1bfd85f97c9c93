//! Gyro engine crate.
//!
//! Owns the window runtime, the GPU device layer and the small set of
//! rendering pieces the spinning demos are built from: shader compile/link
//! checks, flat vertex-buffer upload and the per-frame rotation transform.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod transform;
pub mod fatal;
