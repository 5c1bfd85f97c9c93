use crate::render::RenderCtx;

use super::ctx::FrameCtx;
use super::state::LoopEvent;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the demos.
///
/// Call order: `on_init` once, then any number of `on_event`/`on_frame`,
/// then `on_exit` once while the GPU context is still alive.
pub trait App {
    /// Called once the window and GPU exist. Create GPU resources here.
    ///
    /// An error ends the run before the first frame.
    fn on_init(&mut self, ctx: &RenderCtx<'_>) -> anyhow::Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Called for every loop event, before the runtime applies it.
    fn on_event(&mut self, event: &LoopEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once when the loop ends, before GPU objects are torn down.
    fn on_exit(&mut self) {}
}
