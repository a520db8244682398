use std::time::Duration;

/// Tracks background asset loads for a loading overlay.
///
/// The scene counts as loaded once every tracked item finished (success or
/// failure) and `min_display` has elapsed, or unconditionally once
/// `safety_timeout` has elapsed. Once loaded it stays loaded.
#[derive(Debug, Clone)]
pub struct LoadTracker {
    total: usize,
    finished: usize,
    failed: usize,
    min_display: Duration,
    safety_timeout: Option<Duration>,
    loaded: bool,
    timed_out: bool,
}

impl LoadTracker {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            finished: 0,
            failed: 0,
            min_display: Duration::ZERO,
            safety_timeout: None,
            loaded: false,
            timed_out: false,
        }
    }

    pub fn with_min_display(mut self, min_display: Duration) -> Self {
        self.min_display = min_display;
        self
    }

    pub fn with_safety_timeout(mut self, timeout: Duration) -> Self {
        self.safety_timeout = Some(timeout);
        self
    }

    pub fn item_loaded(&mut self) {
        self.finished = (self.finished + 1).min(self.total);
    }

    pub fn item_failed(&mut self) {
        self.failed += 1;
        self.item_loaded();
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn finished(&self) -> usize {
        self.finished
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Rounded percentage of finished items; 100 when nothing is tracked
    pub fn progress_percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.finished as f32 / self.total as f32) * 100.0).round() as u8
    }

    /// Advance to `elapsed` since mount and report whether loading is over
    pub fn poll(&mut self, elapsed: Duration) -> bool {
        if self.loaded {
            return true;
        }
        if self.finished >= self.total && elapsed >= self.min_display {
            self.loaded = true;
        } else if self.safety_timeout.is_some_and(|t| elapsed >= t) {
            self.loaded = true;
            self.timed_out = true;
        }
        self.loaded
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Loaded because the safety timeout fired, not because items finished
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn empty_tracker_is_loaded_immediately() {
        let mut t = LoadTracker::new(0);
        assert_eq!(t.progress_percent(), 100);
        assert!(t.poll(Duration::ZERO));
    }

    #[test]
    fn percent_rounds() {
        let mut t = LoadTracker::new(3);
        t.item_loaded();
        assert_eq!(t.progress_percent(), 33);
        t.item_failed();
        assert_eq!(t.progress_percent(), 67);
        assert_eq!(t.failed(), 1);
    }

    #[test]
    fn min_display_holds_overlay() {
        let mut t = LoadTracker::new(1).with_min_display(ms(1000));
        t.item_loaded();
        assert!(!t.poll(ms(500)));
        assert!(t.poll(ms(1000)));
    }

    #[test]
    fn safety_timeout_forces_loaded_and_latches() {
        let mut t = LoadTracker::new(8).with_safety_timeout(ms(6000));
        assert!(!t.poll(ms(5999)));
        assert!(t.poll(ms(6000)));
        assert!(t.timed_out());
        assert!(t.poll(ms(0)));
    }
}
