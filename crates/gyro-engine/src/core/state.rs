use crate::coords::Viewport;
use crate::input::InputEvent;

use super::app::AppControl;

/// Platform-agnostic events the render loop reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopEvent {
    Input(InputEvent),
    Resized(Viewport),
    /// The window system asked to close the window (e.g. title-bar button).
    CloseRequested,
}

/// Loop state for one window: its current drawable size and the close flag.
///
/// Owned by the runtime and handed to renderers explicitly; nothing about the
/// window lives in globals.
#[derive(Debug, Default)]
pub struct WindowState {
    viewport: Viewport,
    close_requested: bool,
}

impl WindowState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            close_requested: false,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Once set, the flag stays set; the loop ends after the current event.
    pub fn should_close(&self) -> bool {
        self.close_requested
    }

    pub fn control(&self) -> AppControl {
        if self.close_requested {
            AppControl::Exit
        } else {
            AppControl::Continue
        }
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    /// Applies one event and reports whether the loop may continue.
    pub fn apply(&mut self, event: &LoopEvent) -> AppControl {
        match event {
            LoopEvent::Input(InputEvent::Text(t)) => {
                log::info!("char {:?}", t.text);
            }
            LoopEvent::Input(input) if input.is_close_request() => {
                log::info!("close requested from keyboard");
                self.request_close();
            }
            LoopEvent::Input(_) => {}
            LoopEvent::Resized(viewport) => {
                log::debug!("resized to {}x{}", viewport.width, viewport.height);
                self.viewport = *viewport;
            }
            LoopEvent::CloseRequested => {
                log::info!("close requested by window system");
                self.request_close();
            }
        }

        self.control()
    }
}
