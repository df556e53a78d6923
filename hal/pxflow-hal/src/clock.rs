//! Monotonic time source
//!
//! Used only for throughput reporting. Frame timestamps come from the
//! sensor itself and never from this clock.

/// Monotonic clock with microsecond resolution
pub trait Clock {
    /// Microseconds elapsed since an arbitrary fixed origin
    fn now_us(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}
