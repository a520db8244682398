/// Self-contained timers: each accumulates delta time and decides when to fire

/// Reference rate for motions authored as "per frame"
pub const REFERENCE_HZ: f32 = 60.0;

/// Convert a per-frame increment authored at 60 Hz into this frame's share
pub fn per_frame(amount: f32, delta: f32) -> f32 {
    amount * delta * REFERENCE_HZ
}

/// Fixed rate timer - fires at specific Hz
#[derive(Debug, Clone, Copy)]
pub struct FixedHz {
    pub interval: f32,
    pub accumulator: f32,
}

impl FixedHz {
    pub fn new(hz: f32) -> Self {
        Self {
            interval: 1.0 / hz,
            accumulator: 0.0,
        }
    }

    /// Update with delta, returns true if should fire
    pub fn tick(&mut self, delta: f32) -> bool {
        self.accumulator += delta;

        if self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            true
        } else {
            false
        }
    }
}

/// One-shot timer, e.g. for a brief highlight
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn new(seconds: f32) -> Self {
        Self { remaining: seconds }
    }

    /// Returns true exactly once, on the tick that crosses zero
    pub fn tick(&mut self, delta: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining -= delta;
        self.remaining <= 0.0
    }

    pub fn is_running(&self) -> bool {
        self.remaining > 0.0
    }
}

/// Frames-per-second counter reporting once per interval
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    timer: FixedHz,
    frames: u32,
    elapsed: f32,
    fps: f32,
}

impl FpsCounter {
    pub fn new(report_hz: f32) -> Self {
        Self {
            timer: FixedHz::new(report_hz),
            frames: 0,
            elapsed: 0.0,
            fps: 0.0,
        }
    }

    /// Count one frame; returns the new average when a report is due
    pub fn frame(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;
        if self.timer.tick(delta) && self.elapsed > 0.0 {
            self.fps = self.frames as f32 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
            Some(self.fps)
        } else {
            None
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}
