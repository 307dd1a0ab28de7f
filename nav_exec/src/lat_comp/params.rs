//! Parameters structure for LatCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for latency compensation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Params {
    /// The sensing-to-actuation latency horizon. Commands older than this
    /// are assumed to already be reflected in the latest sensor reading and
    /// are evicted from the history before projection.
    ///
    /// Units: seconds
    pub latency_horizon_s: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            latency_horizon_s: 0.15,
        }
    }
}
