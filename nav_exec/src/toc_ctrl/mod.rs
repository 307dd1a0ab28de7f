//! Time-optimal control module
//!
//! Each control cycle this module samples candidate constant-curvature arcs,
//! scores each one against the obstacle point cloud (free path length,
//! lateral clearance, distance to a fixed forward goal), and regulates speed
//! along the best arc with a discrete acceleration-limited speed law.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod cmd;
mod params;
mod path_eval;
mod speed_ctrl;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use cmd::*;
pub use params::*;
pub use path_eval::*;
pub use speed_ctrl::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during TocCtrl initialisation.
///
/// Cyclic processing itself is total: degenerate inputs fall through to the
/// default branches rather than failing.
#[derive(Debug, thiserror::Error)]
pub enum TocCtrlError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(#[from] util::params::LoadError),
}
