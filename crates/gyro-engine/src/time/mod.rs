//! Time subsystem.
//!
//! - one `FrameClock` per window
//! - call `tick()` once per frame to obtain `FrameTime`
//! - call `pace()` after presenting to apply an optional fixed per-frame sleep
//!
//! Animation in the demos is frame-count driven, not wall-clock driven;
//! `dt` is informational.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
