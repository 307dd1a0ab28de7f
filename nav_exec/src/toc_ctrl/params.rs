//! Parameters structure for TocCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for time-optimal control.
///
/// Every field has a default matching the tuned values, so a partial
/// parameter file only needs to name the values it overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Duration of one control cycle.
    ///
    /// Units: seconds
    pub control_interval_s: f64,

    /// Safety margin inflating the vehicle footprint on all sides.
    ///
    /// Units: meters
    pub margin_m: f64,

    /// Obstacles laterally further than this are not considered when
    /// computing clearance, which is also capped at this value.
    ///
    /// Units: meters
    pub max_clearance_m: f64,

    /// Step between consecutive curvature samples in the path sweep.
    ///
    /// Units: 1/meters
    pub curvature_sampling_interval_m: f64,

    /// Half-width of the band around max speed within which the current
    /// speed is snapped to exactly max, absorbing floating point noise at
    /// the speed ceiling.
    ///
    /// Units: meters/second
    pub speed_snap_tol_ms: f64,

    /// Curvatures of magnitude below this are treated as exactly straight.
    /// This bounds, but does not eliminate, large-radius numerical blowup.
    ///
    /// Units: 1/meters
    pub straight_curvature_threshold_m: f64,

    /// Sensing range. With no obstacle detected the free path length
    /// defaults to this minus the margin and front extent of the vehicle.
    ///
    /// Units: meters
    pub default_range_m: f64,

    /// Weight on lateral clearance in the path score.
    pub clearance_weight: f64,

    /// Weight on goal distance in the path score. Negative, so paths ending
    /// further from the goal are penalised.
    pub goal_distance_weight: f64,

    /// Fixed forward goal point used by the goal-distance heuristic.
    ///
    /// Units: meters,
    /// Frame: vehicle (x forward, y left)
    pub goal_point_m: [f64; 2],
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            control_interval_s: 0.1,
            margin_m: 0.1,
            max_clearance_m: 0.5,
            curvature_sampling_interval_m: 0.05,
            speed_snap_tol_ms: 0.05,
            straight_curvature_threshold_m: 0.01,
            default_range_m: 10.0,
            clearance_weight: 8.0,
            goal_distance_weight: -0.5,
            goal_point_m: [10.0, 0.0],
        }
    }
}
