//! Implementations for the LatCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use nalgebra::Vector2;

// Internal
use super::{CommandHistory, CommandStamped, LatCtrlError, Params};
use crate::toc_ctrl::{Command, TocCtrl};
use crate::transforms;
use crate::vehicle::VehicleModel;
use util::params;
use util::time::Clock;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The vehicle's projected planar state.
///
/// Transient: rebuilt each cycle by replaying the command history from an
/// assumed-origin starting pose.
#[derive(Debug, Clone, Copy)]
pub struct State2D {
    /// Units: meters,
    /// Frame: vehicle frame at the time of the latest sensor reading
    pub position_m: Vector2<f64>,

    /// Units: radians
    pub heading_rad: f64,

    /// Units: meters/second
    pub speed_ms: f64,
}

/// Latency-compensating controller.
///
/// Owns the inner time-optimal controller and the command history
/// exclusively; callers must serialise invocations of `generate_command`.
pub struct LatCtrl {
    params: Params,

    /// The wrapped time-optimal controller
    toc: TocCtrl,

    /// Commands issued over the latency horizon, oldest first
    history: CommandHistory,

    /// Time source used to stamp commands and age the history
    clock: Box<dyn Clock>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LatCtrl {
    /// Initialise the controller, loading both parameter files.
    pub fn init(
        params_path: &str,
        toc_params_path: &str,
        vehicle: VehicleModel,
        clock: Box<dyn Clock>,
    ) -> Result<Self, LatCtrlError> {
        let params: Params = params::load(params_path)?;
        let toc = TocCtrl::init(toc_params_path, vehicle)?;

        Ok(Self::new(params, toc, clock))
    }

    /// Build the controller from in-memory parameters and an already
    /// constructed inner controller.
    pub fn new(params: Params, toc: TocCtrl, clock: Box<dyn Clock>) -> Self {
        Self {
            params,
            toc,
            history: CommandHistory::default(),
            clock,
        }
    }

    /// Record a command into the history, stamped with the current time.
    pub fn record_command(&mut self, command: Command) {
        let stamped = CommandStamped {
            command,
            timestamp_s: self.clock.now_s(),
        };
        self.record_command_stamped(stamped);
    }

    /// Record an already stamped command into the history.
    pub fn record_command_stamped(&mut self, stamped: CommandStamped) {
        self.history.push(stamped);
    }

    /// Perform one latency-compensated control cycle.
    ///
    /// Projects the vehicle state forward by the latency horizon,
    /// re-expresses the cloud in the projected frame, delegates planning to
    /// the inner controller with the projected speed, records the resulting
    /// command and returns it.
    pub fn generate_command(
        &mut self,
        cloud: &[Vector2<f64>],
        current_speed_ms: f64,
        last_data_timestamp_s: f64,
    ) -> Command {
        let projected = self.project_state(current_speed_ms, last_data_timestamp_s);

        let cloud = self.transform_cloud(cloud, &projected);

        let command = self.toc.generate_command(&cloud, projected.speed_ms);

        self.record_command(command);

        command
    }

    /// Forward-project the vehicle state by replaying the command history.
    ///
    /// Starts from the origin pose with the given speed. Stale history
    /// entries are evicted before the replay, so afterwards no retained
    /// entry is older than the latency horizon. The eviction threshold is
    /// the current wall-clock time, not the data timestamp.
    pub fn project_state(
        &mut self,
        current_speed_ms: f64,
        _last_data_timestamp_s: f64,
    ) -> State2D {
        let mut state = State2D {
            position_m: Vector2::new(0.0, 0.0),
            heading_rad: 0.0,
            speed_ms: current_speed_ms,
        };

        if self.history.is_empty() {
            return state;
        }

        self.history
            .evict_stale(self.clock.now_s(), self.params.latency_horizon_s);

        trace!(
            "LatCtrl: replaying {} commands over the latency horizon",
            self.history.len()
        );

        let dt_s = self.toc.control_interval_s();
        let straight_threshold_m = self.toc.params().straight_curvature_threshold_m;

        for entry in self.history.iter() {
            let distance_m = entry.command.velocity_ms * dt_s;

            if entry.command.curvature_m.abs() > straight_threshold_m {
                // Arc step. The displacement uses this step's swept angle
                // only.
                let radius_m = 1.0 / entry.command.curvature_m;
                let angle_rad = distance_m / radius_m;

                state.position_m[0] += distance_m * angle_rad.cos();
                state.position_m[1] += distance_m * angle_rad.sin();
                state.heading_rad += angle_rad;
            } else {
                // Straight step
                state.position_m[0] += distance_m;
            }

            state.speed_ms = entry.command.velocity_ms;
        }

        state
    }

    /// Map sensor points from the current frame into the frame the vehicle
    /// is predicted to occupy after the latency horizon.
    ///
    /// Pure: returns a new cloud, leaving the input untouched.
    pub fn transform_cloud(
        &self,
        cloud: &[Vector2<f64>],
        state: &State2D,
    ) -> Vec<Vector2<f64>> {
        transforms::cloud_to_frame(cloud, &state.position_m, state.heading_rad)
    }

    /// Free path length for a caller-specified curvature, in the projected
    /// frame.
    ///
    /// Diagnostic path only: nothing is recorded. The projection starts
    /// from zero speed, which the free path computation does not use.
    pub fn calc_free_path_length(
        &mut self,
        cloud: &[Vector2<f64>],
        curvature_m: f64,
        last_data_timestamp_s: f64,
    ) -> f64 {
        let projected = self.project_state(0.0, last_data_timestamp_s);

        let cloud = self.transform_cloud(cloud, &projected);

        self.toc.path_eval().calc_free_path_length(&cloud, curvature_m)
    }

    /// The retained command history.
    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Duration of one control cycle of the inner controller.
    ///
    /// Units: seconds
    pub fn control_interval_s(&self) -> f64 {
        self.toc.control_interval_s()
    }

    /// Curvatures of smaller magnitude than this are treated as exactly
    /// straight, both in planning and in the history replay.
    ///
    /// Units: 1/meters
    pub fn straight_curvature_threshold_m(&self) -> f64 {
        self.toc.params().straight_curvature_threshold_m
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
