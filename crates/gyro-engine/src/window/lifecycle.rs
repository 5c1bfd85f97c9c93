use anyhow::Result;

use crate::core::{App as CoreApp, AppControl, LoopEvent, WindowState};

/// The part of the runtime that needs no display: routes loop events to the
/// app and the window state, and runs the exit sequence once.
///
/// `Runtime::run` drives one of these from winit callbacks.
pub struct Lifecycle<A> {
    app: A,
    failure: Option<anyhow::Error>,
    exited: bool,
}

impl<A: CoreApp> Lifecycle<A> {
    pub fn new(app: A) -> Self {
        Self {
            app,
            failure: None,
            exited: false,
        }
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut A {
        &mut self.app
    }

    pub fn has_exited(&self) -> bool {
        self.exited
    }

    /// Hands each event to the app, then to `state` when a window exists.
    ///
    /// Stops at the first event either side answers with `Exit`; later events
    /// are not delivered.
    pub fn dispatch(&mut self, mut state: Option<&mut WindowState>, events: &[LoopEvent]) -> AppControl {
        for ev in events {
            let from_app = self.app.on_event(ev);
            let from_state = match state.as_deref_mut() {
                Some(s) => s.apply(ev),
                None => AppControl::Continue,
            };
            if from_app == AppControl::Exit || from_state == AppControl::Exit {
                return AppControl::Exit;
            }
        }
        AppControl::Continue
    }

    /// Runs `App::on_exit`. Only the first call does anything; it returns
    /// `true` so the caller knows to tear the window down.
    pub fn exit(&mut self) -> bool {
        if self.exited {
            return false;
        }
        self.exited = true;
        self.app.on_exit();
        true
    }

    /// Records `err` unless an earlier error is already recorded.
    pub fn fail(&mut self, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.failure.is_none() {
            self.failure = Some(err);
        }
    }

    /// Outcome of the run: the first recorded error, or `Ok`.
    pub fn finish(self) -> Result<()> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Viewport;
    use crate::core::FrameCtx;
    use crate::input::{InputEvent, Key, KeyState};

    #[derive(Default)]
    struct Recorder {
        events: Vec<LoopEvent>,
        exits: u32,
        quit_on_event: bool,
    }

    impl CoreApp for Recorder {
        fn on_event(&mut self, event: &LoopEvent) -> AppControl {
            self.events.push(event.clone());
            if self.quit_on_event {
                AppControl::Exit
            } else {
                AppControl::Continue
            }
        }

        fn on_frame(&mut self, _ctx: &mut FrameCtx<'_, '_>) -> AppControl {
            AppControl::Continue
        }

        fn on_exit(&mut self) {
            self.exits += 1;
        }
    }

    fn escape() -> LoopEvent {
        LoopEvent::Input(InputEvent::Key { key: Key::Escape, state: KeyState::Pressed, repeat: false })
    }

    fn window() -> WindowState {
        WindowState::new(Viewport::new(800, 800))
    }

    #[test]
    fn escape_right_after_start_exits_cleanly() {
        let mut lc = Lifecycle::new(Recorder::default());
        let mut state = window();

        assert_eq!(lc.dispatch(Some(&mut state), &[escape()]), AppControl::Exit);
        assert!(lc.exit());
        assert_eq!(lc.app().exits, 1);
        assert!(lc.finish().is_ok());
    }

    #[test]
    fn events_after_exit_request_are_dropped() {
        let mut lc = Lifecycle::new(Recorder::default());
        let mut state = window();
        let events = [LoopEvent::Resized(Viewport::new(640, 480)), LoopEvent::CloseRequested, escape()];

        assert_eq!(lc.dispatch(Some(&mut state), &events), AppControl::Exit);
        assert_eq!(lc.app().events.len(), 2);
        assert_eq!(state.viewport(), Viewport::new(640, 480));
    }

    #[test]
    fn app_can_end_the_loop_without_a_window() {
        let mut lc = Lifecycle::new(Recorder { quit_on_event: true, ..Recorder::default() });
        let ev = LoopEvent::Resized(Viewport::new(1, 1));
        assert_eq!(lc.dispatch(None, &[ev]), AppControl::Exit);
    }

    #[test]
    fn ordinary_events_keep_running() {
        let mut lc = Lifecycle::new(Recorder::default());
        let mut state = window();
        let ev = LoopEvent::Resized(Viewport::new(100, 100));
        assert_eq!(lc.dispatch(Some(&mut state), &[ev]), AppControl::Continue);
        assert!(!lc.has_exited());
    }

    #[test]
    fn on_exit_runs_once() {
        let mut lc = Lifecycle::new(Recorder::default());
        assert!(lc.exit());
        assert!(!lc.exit());
        assert!(lc.has_exited());
        assert_eq!(lc.app().exits, 1);
    }

    #[test]
    fn first_failure_is_reported() {
        let mut lc = Lifecycle::new(Recorder::default());
        lc.fail(anyhow::anyhow!("no adapter"));
        lc.fail(anyhow::anyhow!("later"));
        lc.exit();

        let err = lc.finish().unwrap_err();
        assert_eq!(err.to_string(), "no adapter");
    }
}
