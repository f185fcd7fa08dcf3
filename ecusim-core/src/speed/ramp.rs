//! RPM ramp controller
//!
//! Holds the current and target simulated engine speed and moves current
//! toward target without discontinuous jumps the ECU under test could
//! misread as a sync gap. Advanced once per scheduled edge so there is a
//! single time source in the system.

use crate::config::SpeedConfig;

/// Rate-limited simulated engine speed
///
/// Speed is tracked internally in milli-RPM so that the sub-millisecond
/// advance steps between edges at high RPM do not truncate to zero.
#[derive(Debug, Clone)]
pub struct RpmRamp {
    /// Current simulated speed in milli-RPM
    current_millirpm: u32,
    /// Target speed in milli-RPM
    target_millirpm: u32,
    /// Ramp rate in RPM per second
    ramp_rpm_per_s: u16,
    /// Target clamp ceiling in RPM
    max_rpm: u16,
    /// Sub-milli-RPM remainder carried between advance calls
    carry: u32,
}

impl RpmRamp {
    /// Create a stopped ramp with the given speed configuration
    pub fn new(config: SpeedConfig) -> Self {
        Self {
            current_millirpm: 0,
            target_millirpm: 0,
            ramp_rpm_per_s: config.ramp_rpm_per_s,
            max_rpm: config.max_rpm,
            carry: 0,
        }
    }

    /// Set the target speed in tenths of an RPM
    ///
    /// Clamped to `[0, max_rpm]`. Has no immediate effect on the current
    /// speed; the ramp moves there over subsequent `advance` calls.
    pub fn set_target_x10(&mut self, rpm_x10: u32) {
        let max_x10 = self.max_rpm as u32 * 10;
        self.target_millirpm = rpm_x10.min(max_x10) * 100;
    }

    /// Target speed in tenths of an RPM
    pub fn target_x10(&self) -> u32 {
        self.target_millirpm / 100
    }

    /// Current speed in tenths of an RPM
    pub fn current_x10(&self) -> u32 {
        self.current_millirpm / 100
    }

    /// Current speed in milli-RPM (full internal resolution)
    pub fn current_millirpm(&self) -> u32 {
        self.current_millirpm
    }

    /// True once the ramp has fully stopped
    pub fn is_stopped(&self) -> bool {
        self.current_millirpm == 0
    }

    /// True once current has reached target
    pub fn is_at_target(&self) -> bool {
        self.current_millirpm == self.target_millirpm
    }

    /// Move current toward target by at most `ramp_rate × elapsed`
    ///
    /// Never overshoots; once at target further calls are no-ops.
    /// Returns the current speed in milli-RPM after the step.
    pub fn advance(&mut self, elapsed_us: u32) -> u32 {
        if self.current_millirpm == self.target_millirpm {
            self.carry = 0;
            return self.current_millirpm;
        }

        // ramp [RPM/s] * elapsed [µs] / 1000 = delta [milli-RPM]
        let numer = self.ramp_rpm_per_s as u64 * elapsed_us as u64 + self.carry as u64;
        let delta = (numer / 1000) as u32;
        self.carry = (numer % 1000) as u32;

        if self.current_millirpm < self.target_millirpm {
            self.current_millirpm =
                (self.current_millirpm.saturating_add(delta)).min(self.target_millirpm);
        } else {
            self.current_millirpm =
                (self.current_millirpm.saturating_sub(delta)).max(self.target_millirpm);
        }
        self.current_millirpm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpeedConfig;

    fn ramp(rate: u16) -> RpmRamp {
        RpmRamp::new(SpeedConfig {
            max_rpm: 10_000,
            ramp_rpm_per_s: rate,
        })
    }

    #[test]
    fn test_initial_state() {
        let r = ramp(500);
        assert!(r.is_stopped());
        assert!(r.is_at_target());
        assert_eq!(r.current_x10(), 0);
    }

    #[test]
    fn test_ramp_up() {
        let mut r = ramp(1000); // 1000 RPM/s
        r.set_target_x10(60_000); // 6000.0 RPM

        // After 500 ms: 500 RPM
        r.advance(500_000);
        assert_eq!(r.current_x10(), 5000);

        // After 6 s total: at target, no overshoot
        for _ in 0..11 {
            r.advance(500_000);
        }
        assert_eq!(r.current_x10(), 60_000);
        assert!(r.is_at_target());
    }

    #[test]
    fn test_never_overshoots() {
        let mut r = ramp(1000);
        r.set_target_x10(100); // 10.0 RPM
        r.advance(1_000_000); // would be 1000 RPM unclamped
        assert_eq!(r.current_x10(), 100);

        // Idempotent once at target
        r.advance(1_000_000);
        assert_eq!(r.current_x10(), 100);
    }

    #[test]
    fn test_ramp_down_to_stop() {
        let mut r = ramp(500);
        r.set_target_x10(10_000);
        r.advance(2_000_000);
        assert_eq!(r.current_x10(), 10_000);

        r.set_target_x10(0);
        r.advance(1_000_000);
        assert_eq!(r.current_x10(), 5000);
        r.advance(1_000_000);
        assert!(r.is_stopped());

        // Does not go negative
        r.advance(1_000_000);
        assert!(r.is_stopped());
    }

    #[test]
    fn test_target_clamped_to_max() {
        let mut r = RpmRamp::new(SpeedConfig {
            max_rpm: 8000,
            ramp_rpm_per_s: 1000,
        });
        r.set_target_x10(99_999);
        assert_eq!(r.target_x10(), 80_000);
    }

    #[test]
    fn test_short_steps_accumulate() {
        // 333 µs edge intervals at 1000 RPM/s must not truncate to zero
        let mut r = ramp(1000);
        r.set_target_x10(30_000);

        // 3003 steps of 333 µs ≈ 1.0 s → ≈ 1000 RPM
        for _ in 0..3003 {
            r.advance(333);
        }
        let rpm_x10 = r.current_x10();
        assert!(rpm_x10 >= 9990 && rpm_x10 <= 10_010, "got {}", rpm_x10);
    }
}
