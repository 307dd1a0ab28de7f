//! # Navigation core library.
//!
//! Local motion planning and velocity control for a ground vehicle. Once per
//! control cycle the caller provides the latest obstacle point cloud and the
//! vehicle's current speed, and the library returns a commanded
//! (speed, curvature) pair that is collision-aware, within the vehicle's
//! kinematic limits, and corrected for actuation/sensing latency.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Vehicle configuration model - static dimensions and kinematic limits
pub mod vehicle;

/// Frame transforms shared by the planner
pub mod transforms;

/// Time-optimal control module - selects a (speed, curvature) command each cycle
pub mod toc_ctrl;

/// Latency compensation module - forward-projects vehicle state from the command history
pub mod lat_comp;
