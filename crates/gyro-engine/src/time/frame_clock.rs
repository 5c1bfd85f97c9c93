use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Monotonic frame counter, starting at 0 for the first frame.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    /// Fixed sleep after each presented frame, if any.
    sleep: Option<Duration>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_sleep(None)
    }

    /// Creates a clock that sleeps `sleep` in every `pace()` call.
    pub fn with_sleep(sleep: Option<Duration>) -> Self {
        Self {
            last: Instant::now(),
            frame_index: 0,
            sleep: sleep.filter(|d| !d.is_zero()),
        }
    }

    /// Number of frames ticked so far.
    pub fn frames(&self) -> u64 {
        self.frame_index
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }

    /// Blocks the render thread for the configured per-frame sleep.
    pub fn pace(&self) {
        if let Some(d) = self.sleep {
            std::thread::sleep(d);
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
