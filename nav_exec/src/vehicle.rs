//! Vehicle configuration model
//!
//! Static dimensions and kinematic limits, loaded from `params/vehicle.toml`.
//! The model is immutable; controllers hold it by value.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Physical dimensions of the vehicle body.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VehicleDimensions {
    /// Overall body length.
    ///
    /// Units: meters
    pub length_m: f64,

    /// Overall body width.
    ///
    /// Units: meters
    pub width_m: f64,

    /// Distance between front and rear axles.
    ///
    /// Units: meters
    pub wheelbase_m: f64,
}

/// Kinematic limits of the vehicle.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VehicleLimits {
    /// Maximum forward speed.
    ///
    /// Units: meters/second
    pub max_speed_ms: f64,

    /// Maximum acceleration magnitude, also used as the braking rate.
    ///
    /// Units: meters/second^2
    pub max_acceleration_mss: f64,

    /// Maximum curvature (1/turn radius) in either direction.
    ///
    /// Units: 1/meters
    pub max_curvature_m: f64,
}

/// The vehicle model consumed by the controllers.
///
/// The vehicle frame has x forward and y left, with the origin at the centre
/// of the rear axle.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VehicleModel {
    pub dims: VehicleDimensions,
    pub limits: VehicleLimits,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl VehicleModel {
    /// Distance from the frame origin to the front face of the body,
    /// `(length + wheelbase) / 2`.
    ///
    /// Units: meters
    pub fn front_extent_m(&self) -> f64 {
        (self.dims.length_m + self.dims.wheelbase_m) / 2.0
    }

    /// Distance from the frame origin to the rear face of the body,
    /// `(length - wheelbase) / 2`.
    ///
    /// Units: meters
    pub fn rear_extent_m(&self) -> f64 {
        (self.dims.length_m - self.dims.wheelbase_m) / 2.0
    }

    /// Half the body width.
    ///
    /// Units: meters
    pub fn half_width_m(&self) -> f64 {
        self.dims.width_m / 2.0
    }
}
