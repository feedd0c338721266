use core::time::Duration;
use web_time::Instant;

/// Source of monotonic time for a [`Timer`].
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Elapsed-time accumulator that excludes paused intervals.
///
/// The timer is running exactly when it holds an anchor instant. Pausing folds
/// the time since the anchor into the accumulated total.
#[derive(Clone, Debug)]
pub struct Timer<C = SystemClock> {
    clock: C,
    accumulated: Duration,
    anchor: Option<Instant>,
}

impl Timer {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Timer<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            accumulated: Duration::ZERO,
            anchor: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.anchor.is_some()
    }

    /// Starts counting, does nothing if already running.
    pub fn start(&mut self) {
        if self.anchor.is_none() {
            self.anchor = Some(self.clock.now());
        }
    }

    pub fn pause(&mut self) {
        if let Some(anchor) = self.anchor.take() {
            self.accumulated += self.clock.now().saturating_duration_since(anchor);
        }
    }

    /// Continues counting on top of the accumulated time.
    pub fn resume(&mut self) {
        self.start();
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        self.anchor = None;
    }

    pub fn elapsed(&self) -> Duration {
        match self.anchor {
            Some(anchor) => {
                self.accumulated + self.clock.now().saturating_duration_since(anchor)
            }
            None => self.accumulated,
        }
    }

    /// Whole seconds elapsed, fractions are dropped.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed().as_secs()
    }
}
