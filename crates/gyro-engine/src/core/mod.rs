//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the demos,
//! plus the platform-agnostic loop state that decides when the loop ends.

mod app;
mod ctx;
mod state;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
pub use state::{LoopEvent, WindowState};
