use std::time::{Duration, Instant};

/// Frame clock: delta between ticks plus time since the clock started
#[derive(Debug)]
pub struct Clock {
    started: Instant,
    last_tick: Instant,
}

impl Clock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_tick: now,
        }
    }

    /// Seconds since the last tick, and advance the clock
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }

    /// Restart both delta and elapsed time
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.started = now;
        self.last_tick = now;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
