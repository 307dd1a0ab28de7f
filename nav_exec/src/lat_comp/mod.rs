//! Latency compensation module
//!
//! Commands take effect some time after the sensor data they were planned
//! against was captured. This module keeps a time-ordered history of the
//! commands issued over that latency horizon, replays it to forward-project
//! the vehicle's pose and speed to the moment control will actually take
//! effect, re-expresses the incoming point cloud in the projected frame, and
//! only then plans.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod history;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use history::*;
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during LatCtrl initialisation.
#[derive(Debug, thiserror::Error)]
pub enum LatCtrlError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(#[from] util::params::LoadError),

    #[error("Could not initialise the inner controller: {0}")]
    TocCtrlInitError(#[from] crate::toc_ctrl::TocCtrlError),
}
