//! Dead-reckoned position from ground-compensated flow
//!
//! Each accepted sample contributes `velocity * dt` to the running x/y
//! displacement. Intervals at or above the gap threshold are treated as a
//! stalled link and contribute nothing.

/// Default gap threshold in seconds
///
/// The sensor reports at well over 10 Hz, so consecutive samples should
/// never be this far apart.
pub const DEFAULT_GAP_THRESHOLD_S: f64 = 0.1;

/// What a single integration call did
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntegrationStep {
    /// First sample; only the timestamp was recorded
    Primed,
    /// Displacement accumulated over `dt_s`
    Integrated { dt_s: f64 },
    /// Interval too long; nothing accumulated
    Gap { dt_s: f64 },
}

/// Accumulated x/y displacement in meters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccumulatedPosition {
    x_m: f64,
    y_m: f64,
    prev_timestamp_s: Option<f64>,
}

impl AccumulatedPosition {
    /// Start at the origin with no previous sample
    pub const fn new() -> Self {
        Self {
            x_m: 0.0,
            y_m: 0.0,
            prev_timestamp_s: None,
        }
    }

    /// Accumulated x displacement in meters
    pub fn x(&self) -> f64 {
        self.x_m
    }

    /// Accumulated y displacement in meters
    pub fn y(&self) -> f64 {
        self.y_m
    }

    /// Timestamp of the last integrated sample in seconds
    pub fn prev_timestamp_s(&self) -> Option<f64> {
        self.prev_timestamp_s
    }

    /// Fold one velocity sample into the position
    ///
    /// # Arguments
    /// - `timestamp_s`: sample time in seconds
    /// - `vx`, `vy`: velocity in m/s
    /// - `gap_threshold_s`: intervals at or above this are skipped
    ///
    /// The previous timestamp is updated in every case. A negative `dt`
    /// (sensor clock going backwards) is below the threshold and is
    /// integrated as-is.
    pub fn integrate(
        &mut self,
        timestamp_s: f64,
        vx: f32,
        vy: f32,
        gap_threshold_s: f64,
    ) -> IntegrationStep {
        let step = match self.prev_timestamp_s {
            None => IntegrationStep::Primed,
            Some(prev) => {
                let dt_s = timestamp_s - prev;
                if dt_s < gap_threshold_s {
                    self.x_m += f64::from(vx) * dt_s;
                    self.y_m += f64::from(vy) * dt_s;
                    IntegrationStep::Integrated { dt_s }
                } else {
                    IntegrationStep::Gap { dt_s }
                }
            }
        };

        self.prev_timestamp_s = Some(timestamp_s);
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_first_sample_primes() {
        let mut pos = AccumulatedPosition::new();
        let step = pos.integrate(10.0, 5.0, 5.0, DEFAULT_GAP_THRESHOLD_S);

        assert_eq!(step, IntegrationStep::Primed);
        assert_eq!(pos.x(), 0.0);
        assert_eq!(pos.y(), 0.0);
        assert_eq!(pos.prev_timestamp_s(), Some(10.0));
    }

    #[test]
    fn test_short_interval_accumulates() {
        let mut pos = AccumulatedPosition::new();
        pos.integrate(1.0, 2.0, -1.0, DEFAULT_GAP_THRESHOLD_S);
        let step = pos.integrate(1.05, 2.0, -1.0, DEFAULT_GAP_THRESHOLD_S);

        assert!(matches!(step, IntegrationStep::Integrated { dt_s } if (dt_s - 0.05).abs() < EPS));
        assert!((pos.x() - 0.1).abs() < EPS);
        assert!((pos.y() + 0.05).abs() < EPS);
    }

    #[test]
    fn test_long_interval_is_gap() {
        let mut pos = AccumulatedPosition::new();
        pos.integrate(1.0, 2.0, 2.0, DEFAULT_GAP_THRESHOLD_S);
        let step = pos.integrate(1.2, 2.0, 2.0, DEFAULT_GAP_THRESHOLD_S);

        assert!(matches!(step, IntegrationStep::Gap { .. }));
        assert_eq!(pos.x(), 0.0);
        assert_eq!(pos.y(), 0.0);
        assert_eq!(pos.prev_timestamp_s(), Some(1.2));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut pos = AccumulatedPosition::new();
        pos.integrate(0.0, 1.0, 1.0, 0.5);
        let step = pos.integrate(0.5, 1.0, 1.0, 0.5);
        assert_eq!(step, IntegrationStep::Gap { dt_s: 0.5 });
        assert_eq!(pos.x(), 0.0);
    }

    #[test]
    fn test_gap_then_resume() {
        let mut pos = AccumulatedPosition::new();
        pos.integrate(1.0, 1.0, 0.0, DEFAULT_GAP_THRESHOLD_S);
        pos.integrate(3.0, 1.0, 0.0, DEFAULT_GAP_THRESHOLD_S);
        pos.integrate(3.02, 1.0, 0.0, DEFAULT_GAP_THRESHOLD_S);

        // Only the 20 ms after the gap counts
        assert!((pos.x() - 0.02).abs() < EPS);
    }

    #[test]
    fn test_backwards_time_integrates_negative() {
        let mut pos = AccumulatedPosition::new();
        pos.integrate(2.0, 1.0, 1.0, DEFAULT_GAP_THRESHOLD_S);
        pos.integrate(1.5, 1.0, 1.0, DEFAULT_GAP_THRESHOLD_S);
        assert!((pos.x() + 0.5).abs() < EPS);
    }
}
