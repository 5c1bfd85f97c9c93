//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! `platform::winit` translates window events into `InputEvent`s.

pub mod platform;
mod types;

pub use types::{InputEvent, Key, KeyState, TextEvent};
