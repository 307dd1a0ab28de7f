//! Frame transforms used by the planner

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::{Isometry2, Point2, Vector2};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Express `point` in the vehicle frame at the end of a constant-curvature
/// arc.
///
/// The vehicle sweeps an angle of `phi_rad` about the instantaneous centre of
/// motion at `(0, radius_m)`, ending at position
/// `(radius_m * sin(phi), radius_m - radius_m * cos(phi))` with heading
/// `phi_rad`.
pub fn transform_icom(point: &Vector2<f64>, phi_rad: f64, radius_m: f64) -> Vector2<f64> {
    let pose = Isometry2::new(
        Vector2::new(radius_m * phi_rad.sin(), radius_m - radius_m * phi_rad.cos()),
        phi_rad,
    );

    pose.inverse_transform_point(&Point2::new(point[0], point[1]))
        .coords
}

/// Map sensor points from the current vehicle frame into the frame of the
/// pose given by `position_m` and `heading_rad`.
///
/// Pure: the input cloud is untouched and a new cloud is returned.
pub fn cloud_to_frame(
    cloud: &[Vector2<f64>],
    position_m: &Vector2<f64>,
    heading_rad: f64,
) -> Vec<Vector2<f64>> {
    let pose = Isometry2::new(*position_m, heading_rad);

    cloud
        .iter()
        .map(|p| pose.inverse_transform_point(&Point2::new(p[0], p[1])).coords)
        .collect()
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_cloud_to_frame_identity() {
        let cloud = vec![
            Vector2::new(1.0, 2.0),
            Vector2::new(-0.5, 0.0),
            Vector2::new(0.0, -3.25),
        ];

        let out = cloud_to_frame(&cloud, &Vector2::new(0.0, 0.0), 0.0);

        for (a, b) in cloud.iter().zip(out.iter()) {
            assert!((a - b).norm() < EPS);
        }
    }

    #[test]
    fn test_cloud_to_frame_quarter_turn() {
        // Pose at (1, 1) facing +y. The point (1, 0) sits one metre behind
        // the pose along its x axis rotated into the left-handed side.
        let cloud = vec![Vector2::new(1.0, 0.0)];

        let out = cloud_to_frame(&cloud, &Vector2::new(1.0, 1.0), FRAC_PI_2);

        assert!((out[0][0] - (-1.0)).abs() < EPS);
        assert!(out[0][1].abs() < EPS);
    }

    #[test]
    fn test_transform_icom_zero_sweep() {
        // A zero swept angle leaves the vehicle at the origin, so the
        // transform is the identity.
        let point = Vector2::new(0.7, -0.3);

        let out = transform_icom(&point, 0.0, 2.0);

        assert!((out - point).norm() < EPS);
    }

    #[test]
    fn test_transform_icom_quarter_arc() {
        // Quarter arc of radius 1 ends at (1, 1) with heading pi/2. A point
        // at the final position maps to the local origin.
        let point = Vector2::new(1.0, 1.0);

        let out = transform_icom(&point, FRAC_PI_2, 1.0);

        assert!(out.norm() < EPS);
    }
}
