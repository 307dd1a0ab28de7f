//! Time-optimal speed regulation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::warn;

// Internal
use super::Params;
use crate::vehicle::VehicleLimits;
use util::maths::clamp;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Discrete acceleration-limited speed regulator.
///
/// Each cycle the regulator selects one of four regimes based on the current
/// speed and the free path length ahead: accelerate, cruise, decelerate, or
/// decelerate with a collision warning. The regimes are evaluated in that
/// fixed order; they are not proven mutually exclusive at floating point
/// boundaries.
#[derive(Debug, Clone)]
pub struct SpeedCtrl {
    limits: VehicleLimits,

    /// Duration of one control cycle.
    ///
    /// Units: seconds
    dt_s: f64,

    /// Snap tolerance around the speed ceiling.
    ///
    /// Units: meters/second
    snap_tol_ms: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SpeedCtrl {
    /// Create a new regulator from the module parameters and vehicle limits.
    pub fn new(params: &Params, limits: VehicleLimits) -> Self {
        Self {
            limits,
            dt_s: params.control_interval_s,
            snap_tol_ms: params.speed_snap_tol_ms,
        }
    }

    /// Calculate the speed to command for this cycle.
    ///
    /// The result is always within `[0, max_speed]` - the vehicle never
    /// reverses. An imminent collision is a soft failure: the regulator
    /// still returns a valid decelerating speed and only reports through a
    /// warning.
    pub fn calc_control_speed(&self, current_speed_ms: f64, free_path_length_m: f64) -> f64 {
        let max_speed_ms = self.limits.max_speed_ms;
        let accel_mss = self.limits.max_acceleration_mss;

        // Absorb floating point noise at the speed ceiling
        let current_speed_ms = if (current_speed_ms - max_speed_ms).abs() <= self.snap_tol_ms {
            max_speed_ms
        } else {
            current_speed_ms
        };

        // Speed change over one interval at the acceleration limit
        let accel_step_ms = accel_mss * self.dt_s;

        // Distance covered accelerating for one interval and then braking to
        // rest
        let accel_then_stop_m = current_speed_ms * self.dt_s
            + accel_step_ms * self.dt_s / 2.0
            + (current_speed_ms + accel_step_ms).powi(2) / (2.0 * accel_mss);

        // Distance covered cruising one interval and then braking from max
        // speed
        let cruise_then_stop_m =
            current_speed_ms * self.dt_s + max_speed_ms * max_speed_ms / (2.0 * accel_mss);

        // Distance needed to brake to rest from the current speed
        let stopping_dist_m = current_speed_ms.powi(2) / (2.0 * accel_mss);

        let control_speed_ms = if current_speed_ms < max_speed_ms
            && free_path_length_m >= accel_then_stop_m
        {
            // Accelerate
            current_speed_ms + accel_step_ms
        } else if current_speed_ms == max_speed_ms && free_path_length_m >= cruise_then_stop_m {
            // Cruise
            current_speed_ms
        } else if free_path_length_m < stopping_dist_m {
            // Decelerate
            current_speed_ms - accel_step_ms
        } else {
            // Decelerate with expected collision
            warn!(
                "Not enough room to decelerate, expecting collision (free path length {:.3} m)",
                free_path_length_m
            );
            current_speed_ms - accel_step_ms
        };

        // Prevent reversal and enforce the speed limit
        clamp(&control_speed_ms, &0.0, &max_speed_ms)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    const EPS: f64 = 1e-9;

    /// Limits and interval used by all scenarios: 2 m/s ceiling, 1 m/s^2
    /// acceleration, 0.1 s cycle.
    fn make_ctrl() -> SpeedCtrl {
        let params = Params::default();
        let limits = VehicleLimits {
            max_speed_ms: 2.0,
            max_acceleration_mss: 1.0,
            max_curvature_m: 1.0,
        };
        SpeedCtrl::new(&params, limits)
    }

    #[test]
    fn test_accelerate_from_rest() {
        let ctrl = make_ctrl();

        // Plenty of room ahead: speed rises by one acceleration step
        assert!((ctrl.calc_control_speed(0.0, 10.0) - 0.1).abs() < EPS);
    }

    #[test]
    fn test_decelerate_at_ceiling() {
        let ctrl = make_ctrl();

        // Free path well below the 2 m stopping distance from max speed
        assert!((ctrl.calc_control_speed(2.0, 0.05) - 1.9).abs() < EPS);
    }

    #[test]
    fn test_cruise_at_ceiling() {
        let ctrl = make_ctrl();

        assert!((ctrl.calc_control_speed(2.0, 10.0) - 2.0).abs() < EPS);
    }

    #[test]
    fn test_snap_to_ceiling() {
        let ctrl = make_ctrl();

        // 1.96 m/s is within the snap tolerance of the 2 m/s ceiling, so the
        // regulator treats it as exactly max speed and cruises.
        assert!((ctrl.calc_control_speed(1.96, 10.0) - 2.0).abs() < EPS);
    }

    #[test]
    fn test_never_reverses() {
        let ctrl = make_ctrl();

        // Decelerating from below one step's worth of speed clips at zero
        assert!(ctrl.calc_control_speed(0.05, 0.0).abs() < EPS);
    }

    #[test]
    fn test_output_always_within_limits() {
        let ctrl = make_ctrl();

        for i in 0..=20 {
            let speed_ms = i as f64 * 0.1;
            for &free_path_m in &[0.0, 0.01, 0.1, 1.0, 2.5, 10.0] {
                let out = ctrl.calc_control_speed(speed_ms, free_path_m);
                assert!(out >= 0.0 && out <= 2.0);
            }
        }
    }
}
