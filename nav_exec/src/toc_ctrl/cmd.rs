//! Command and path candidate value types

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Ordering;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The (speed, curvature) pair commanded for one control cycle.
#[derive(Clone, Copy, Serialize, Debug)]
pub struct Command {
    /// Commanded speed, always within `[0, max_speed]`.
    ///
    /// Units: meters/second
    pub velocity_ms: f64,

    /// Commanded curvature, always within `[-max_curvature, max_curvature]`.
    ///
    /// Units: 1/meters
    pub curvature_m: f64,
}

/// One sampled candidate path. Ephemeral: one per sampled curvature per
/// cycle.
#[derive(Clone, Copy, Serialize, Debug)]
pub struct PathCandidate {
    /// Curvature of this candidate arc.
    ///
    /// Units: 1/meters
    pub curvature_m: f64,

    /// Maximum travel distance along the arc before first collision.
    ///
    /// Units: meters
    pub free_path_length_m: f64,

    /// Minimum lateral clearance to obstacles along the arc.
    ///
    /// Units: meters
    pub clearance_m: f64,

    /// Distance from the projected end-of-interval position to the goal.
    ///
    /// Units: meters
    pub goal_distance_m: f64,

    /// Weighted score, higher is better.
    pub score: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

// Candidates are totally ordered by score.

impl PartialEq for PathCandidate {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.score) == OrderedFloat(other.score)
    }
}

impl Eq for PathCandidate {}

impl PartialOrd for PathCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PathCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.score).cmp(&OrderedFloat(other.score))
    }
}
