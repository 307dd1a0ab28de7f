//! Implementations for the TocCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use nalgebra::Vector2;

// Internal
use super::{Command, Params, PathEval, SpeedCtrl, TocCtrlError};
use crate::vehicle::VehicleModel;
use util::params;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Time-optimal controller: composes the path evaluator and the speed
/// regulator into one per-cycle (speed, curvature) decision.
#[derive(Debug, Clone)]
pub struct TocCtrl {
    params: Params,

    /// Scores candidate arcs against the point cloud
    path_eval: PathEval,

    /// Regulates speed along the chosen arc
    speed_ctrl: SpeedCtrl,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TocCtrl {
    /// Initialise the controller, loading parameters from the given file.
    pub fn init(params_path: &str, vehicle: VehicleModel) -> Result<Self, TocCtrlError> {
        let params: Params = params::load(params_path)?;
        Ok(Self::new(params, vehicle))
    }

    /// Build the controller from in-memory parameters.
    pub fn new(params: Params, vehicle: VehicleModel) -> Self {
        let path_eval = PathEval::new(params.clone(), vehicle);
        let speed_ctrl = SpeedCtrl::new(&params, vehicle.limits);

        Self {
            params,
            path_eval,
            speed_ctrl,
        }
    }

    /// Perform one control cycle: choose the best path through the cloud and
    /// regulate speed along it.
    ///
    /// Total over its input domain: an empty cloud yields the default free
    /// path length and an accelerating command up to the speed limit.
    pub fn generate_command(&self, cloud: &[Vector2<f64>], current_speed_ms: f64) -> Command {
        let path = self.path_eval.evaluate_paths(cloud);

        let velocity_ms = self
            .speed_ctrl
            .calc_control_speed(current_speed_ms, path.free_path_length_m);

        trace!(
            "TocCtrl: free path {:.3} m, current speed {:.3} m/s, commanded {:.3} m/s at {:.3} 1/m",
            path.free_path_length_m,
            current_speed_ms,
            velocity_ms,
            path.curvature_m
        );

        Command {
            velocity_ms,
            curvature_m: path.curvature_m,
        }
    }

    /// Duration of one control cycle.
    ///
    /// Units: seconds
    pub fn control_interval_s(&self) -> f64 {
        self.params.control_interval_s
    }

    /// The controller's parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The path evaluator, for diagnostic free path queries.
    pub fn path_eval(&self) -> &PathEval {
        &self.path_eval
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::vehicle::{VehicleDimensions, VehicleLimits};

    fn make_ctrl() -> TocCtrl {
        let vehicle = VehicleModel {
            dims: VehicleDimensions {
                length_m: 0.508,
                width_m: 0.2667,
                wheelbase_m: 0.324,
            },
            limits: VehicleLimits {
                max_speed_ms: 2.0,
                max_acceleration_mss: 1.0,
                max_curvature_m: 1.0,
            },
        };
        TocCtrl::new(Params::default(), vehicle)
    }

    #[test]
    fn test_command_within_limits() {
        let ctrl = make_ctrl();

        let cloud = vec![
            Vector2::new(1.0, 0.0),
            Vector2::new(0.8, 0.2),
            Vector2::new(1.5, -0.3),
        ];

        for i in 0..=8 {
            let speed_ms = i as f64 * 0.25;
            let cmd = ctrl.generate_command(&cloud, speed_ms);

            assert!(cmd.velocity_ms >= 0.0 && cmd.velocity_ms <= 2.0);
            assert!(cmd.curvature_m.abs() <= 1.0);
        }
    }

    #[test]
    fn test_open_space_accelerates() {
        let ctrl = make_ctrl();

        let cmd = ctrl.generate_command(&[], 0.0);
        assert!((cmd.velocity_ms - 0.1).abs() < 1e-9);
    }
}
