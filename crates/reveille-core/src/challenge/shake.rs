//! Shake detection over an external acceleration sample stream.
//!
//! The detector owns no thread and no sensor handle. The host subscribes
//! to its motion source at [`SAMPLE_INTERVAL`] and feeds samples in;
//! dropping the detector cancels the subscription from the engine's point
//! of view. Failing to stop feeding after a trigger leaks the host's
//! subscription, not anything in here.

use std::time::Duration;

/// Expected spacing of acceleration samples.
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(200);

/// Trigger threshold in g on the combined 3-axis vector.
pub const SHAKE_THRESHOLD: f64 = 4.0;

#[derive(Debug, Default)]
pub struct ShakeDetector {
    triggered: bool,
}

impl ShakeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one `[x, y, z]` acceleration sample (g per axis). Returns true
    /// once the combined magnitude has exceeded [`SHAKE_THRESHOLD`]; the
    /// trigger latches.
    pub fn feed(&mut self, sample: [f64; 3]) -> bool {
        if !self.triggered {
            let [x, y, z] = sample;
            self.triggered = (x * x + y * y + z * z).sqrt() > SHAKE_THRESHOLD;
        }
        self.triggered
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gentle_motion_does_not_trigger() {
        let mut d = ShakeDetector::new();
        assert!(!d.feed([0.1, 0.2, 0.1]));
        assert!(!d.feed([1.0, 1.0, 1.0]));
        assert!(!d.is_triggered());
    }

    #[test]
    fn magnitude_is_the_combined_vector() {
        let mut d = ShakeDetector::new();
        // 2.4^2 * 3 = 17.28, sqrt > 4.0
        assert!(d.feed([2.4, 2.4, 2.4]));
    }

    #[test]
    fn single_axis_spike_triggers() {
        let mut d = ShakeDetector::new();
        assert!(d.feed([4.1, 0.0, 0.0]));
    }

    #[test]
    fn trigger_latches() {
        let mut d = ShakeDetector::new();
        assert!(d.feed([0.0, 5.0, 0.0]));
        assert!(d.feed([0.0, 0.0, 0.0]));
        assert!(d.is_triggered());
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut d = ShakeDetector::new();
        assert!(!d.feed([4.0, 0.0, 0.0]));
    }
}
