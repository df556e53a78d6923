//! Sample throughput counter

/// Count of decoded samples since a start time
///
/// Only used for reporting update rate. Times are microseconds from a
/// `pxflow_hal::Clock`-style monotonic source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleCounter {
    count: u64,
    start_us: u64,
}

impl SampleCounter {
    /// Start counting from `start_us`
    pub const fn new(start_us: u64) -> Self {
        Self { count: 0, start_us }
    }

    /// Record one sample
    pub fn record(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    /// Samples recorded so far
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Time counting started
    pub fn start_us(&self) -> u64 {
        self.start_us
    }

    /// Seconds elapsed between the start and `now_us`
    pub fn elapsed_s(&self, now_us: u64) -> f64 {
        now_us.saturating_sub(self.start_us) as f64 / 1e6
    }

    /// Average samples per second up to `now_us`
    ///
    /// Returns 0 when no time has elapsed.
    pub fn rate_hz(&self, now_us: u64) -> f64 {
        let elapsed = self.elapsed_s(now_us);
        if elapsed > 0.0 {
            self.count as f64 / elapsed
        } else {
            0.0
        }
    }
}
