use std::time::Duration;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::core::{App as CoreApp, AppControl, FrameCtx, LoopEvent, WindowCtx, WindowState};

use super::Lifecycle;
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::render::RenderCtx;
use crate::time::{FrameClock, FrameTime};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Fixed sleep after every presented frame.
    pub frame_sleep: Option<Duration>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "gyro".to_string(),
            initial_size: LogicalSize::new(800.0, 800.0),
            frame_sleep: None,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and runs `app` until the window closes.
    ///
    /// Blocks the calling thread, which must be the main thread. Returns the
    /// first error raised by window/GPU setup or by `App::on_init`.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.finish()
    }
}

#[self_referencing]
struct WindowEntry {
    state: WindowState,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    lifecycle: Lifecycle<A>,

    window: Option<WindowEntry>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            lifecycle: Lifecycle::new(app),
            window: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let viewport = Viewport::from(window.inner_size());
        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            state: WindowState::new(viewport),
            clock: FrameClock::with_sleep(self.config.frame_sleep),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        log::info!(
            "opened window {:?} ({}x{})",
            self.config.title,
            viewport.width,
            viewport.height
        );

        let app = self.lifecycle.app_mut();
        entry
            .with_gpu(|gpu| {
                let rctx =
                    RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format());
                app.on_init(&rctx)
            })
            .context("application initialization failed")?;

        entry.with_window(|w| w.request_redraw());
        self.window = Some(entry);
        Ok(())
    }

    /// Records the first error and ends the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.lifecycle.fail(err);
        self.shutdown(event_loop);
    }

    /// Runs `App::on_exit` while the GPU is still alive, then drops the window.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if self.lifecycle.exit() {
            if let Some(entry) = self.window.take() {
                let frames = entry.borrow_clock().frames();
                log::info!("render loop ended after {frames} frames");
            }
        }
        event_loop.exit();
    }

    fn finish(self) -> Result<()> {
        self.lifecycle.finish()
    }

    fn redraw(&mut self) -> AppControl {
        let (lifecycle, window) = (&mut self.lifecycle, &mut self.window);
        let Some(entry) = window.as_mut() else {
            return AppControl::Continue;
        };

        entry.with_mut(|fields| {
            let ft: FrameTime = fields.clock.tick();
            if ft.frame_index > 0 && ft.frame_index % 600 == 0 {
                log::debug!("frame {} ({:.2} ms)", ft.frame_index, ft.dt * 1000.0);
            }

            let control = {
                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        window: fields.window,
                    },
                    gpu: fields.gpu,
                    viewport: fields.state.viewport(),
                    time: ft,
                };
                lifecycle.app_mut().on_frame(&mut ctx)
            };

            fields.clock.pace();
            control
        })
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.lifecycle.has_exited() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.lifecycle.has_exited() {
            event_loop.exit();
            return;
        }

        // Continuous redraw: the demos animate every frame.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.lifecycle.has_exited() {
            event_loop.exit();
            return;
        }

        let mut loop_events: Vec<LoopEvent> = translate_window_event(&event)
            .into_iter()
            .map(LoopEvent::Input)
            .collect();

        match &event {
            WindowEvent::CloseRequested => loop_events.push(LoopEvent::CloseRequested),

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.window.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                    entry.with_window(|w| w.request_redraw());
                }
                loop_events.push(LoopEvent::Resized(Viewport::from(*new_size)));
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.window.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    loop_events.push(LoopEvent::Resized(Viewport::from(new_size)));
                }
            }

            _ => {}
        }

        let lifecycle = &mut self.lifecycle;
        let control = match self.window.as_mut() {
            Some(entry) => entry.with_state_mut(|s| lifecycle.dispatch(Some(s), &loop_events)),
            None => lifecycle.dispatch(None, &loop_events),
        };
        if control == AppControl::Exit {
            self.shutdown(event_loop);
            return;
        }

        if let WindowEvent::RedrawRequested = event {
            if self.redraw() == AppControl::Exit {
                self.shutdown(event_loop);
            }
        }
    }
}
