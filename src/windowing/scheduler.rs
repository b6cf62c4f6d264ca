use std::time::{Duration, Instant};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Suspended,
}

/// Explicit frame-loop state. The loop runs while `Running` and skips
/// frames entirely while `Suspended` (e.g. the window is occluded).
///
/// `start` and `stop` are idempotent. Resuming re-arms the frame clock, so
/// time spent suspended is never replayed; the simulation simply
/// continues from a fresh delta.
pub struct FrameScheduler {
    state: SchedulerState,
    last_frame_time: Instant,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        FrameScheduler::new()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        FrameScheduler {
            state: SchedulerState::Suspended,
            last_frame_time: Instant::now(),
        }
    }

    pub fn start(&mut self) {
        if self.state == SchedulerState::Running {
            return;
        }
        self.state = SchedulerState::Running;
        self.last_frame_time = Instant::now();
    }

    pub fn stop(&mut self) {
        self.state = SchedulerState::Suspended;
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Measures the delta since the previous frame and arms the clock for
    /// the next one. Returns `None` while suspended.
    pub fn begin_frame(&mut self) -> Option<Duration> {
        if self.state != SchedulerState::Running {
            return None;
        }

        let delta = self.last_frame_time.elapsed();
        self.last_frame_time = Instant::now();
        Some(delta)
    }
}
