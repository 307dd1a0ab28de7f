//! Geometric path evaluation
//!
//! Scores candidate constant-curvature arcs against the obstacle point
//! cloud. For each sampled curvature the evaluator computes the free path
//! length (travel distance to first collision), the minimum lateral
//! clearance along the swept footprint, and a goal-distance heuristic, then
//! combines them into a single score.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;

// Internal
use super::{Params, PathCandidate};
use crate::transforms;
use crate::vehicle::VehicleModel;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Path evaluator for a single vehicle.
#[derive(Debug, Clone)]
pub struct PathEval {
    params: Params,
    vehicle: VehicleModel,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PathEval {
    pub fn new(params: Params, vehicle: VehicleModel) -> Self {
        Self { params, vehicle }
    }

    /// Maximum forward travel distance along `curvature_m` before the first
    /// collision with any point in the cloud.
    ///
    /// With no obstacle within sensing range this is the default range minus
    /// the margin and the vehicle's front extent. Near-zero curvatures are
    /// treated as exactly straight.
    pub fn calc_free_path_length(&self, cloud: &[Vector2<f64>], curvature_m: f64) -> f64 {
        let margin_m = self.params.margin_m;
        let half_width_m = self.vehicle.half_width_m();

        // Distance from the frame origin to the inflated front face
        let front_m = margin_m + self.vehicle.front_extent_m();

        let mut free_path_length_m = self.params.default_range_m - front_m;

        if curvature_m.abs() < self.params.straight_curvature_threshold_m {
            // Straight line case: only points within the inflated width and
            // ahead of the vehicle can be struck
            for point in cloud {
                if point[1].abs() < half_width_m + margin_m && point[0] > 0.0 {
                    let candidate_m = point[0] - front_m;
                    if candidate_m < free_path_length_m {
                        free_path_length_m = candidate_m;
                    }
                }
            }
        } else {
            // Moving along an arc. Right turns are handled by mirroring each
            // point's y coordinate so only left-turn geometry is reasoned
            // about below.
            let radius_m = (1.0 / curvature_m).abs();

            // Distance from the frame origin to the inflated rear face
            let rear_m = margin_m + self.vehicle.rear_extent_m();

            // Characteristic radii of the swept footprint, measured from the
            // arc centre at (0, radius)
            let inside_rear_axle_m = radius_m - (margin_m + half_width_m);
            let inside_front_corner_m =
                (inside_rear_axle_m.powi(2) + front_m.powi(2)).sqrt();
            let outside_rear_axle_m = radius_m + margin_m + half_width_m;
            let outside_front_corner_m =
                (outside_rear_axle_m.powi(2) + front_m.powi(2)).sqrt();
            let outside_rear_corner_m =
                (outside_rear_axle_m.powi(2) + rear_m.powi(2)).sqrt();

            for point in cloud {
                let mut point = *point;
                if curvature_m < 0.0 {
                    point[1] = -point[1];
                }

                // Radial distance and angular position of the point relative
                // to the arc centre
                let point_radius_m =
                    (point[0].powi(2) + (radius_m - point[1]).powi(2)).sqrt();
                let theta_rad = point[0].atan2(radius_m - point[1]);

                // Points radially inside or outside the full swept span can
                // never be struck
                if point_radius_m < inside_rear_axle_m {
                    continue;
                }
                if point_radius_m > outside_front_corner_m.max(outside_rear_corner_m) {
                    continue;
                }

                // Condition one: the point hits the inner side of the vehicle
                if point_radius_m >= inside_rear_axle_m
                    && point_radius_m < inside_front_corner_m
                    && theta_rad > 0.0
                {
                    let psi_rad = (inside_rear_axle_m / point_radius_m).acos();
                    let travel_m = radius_m * (theta_rad - psi_rad);
                    if travel_m < free_path_length_m {
                        free_path_length_m = travel_m;
                    }
                }
                // Condition two: the point hits the front of the vehicle
                else if inside_front_corner_m <= point_radius_m
                    && point_radius_m < outside_front_corner_m
                    && theta_rad > 0.0
                {
                    let psi_rad = (front_m / point_radius_m).asin();
                    let travel_m = radius_m * (theta_rad - psi_rad);
                    if travel_m < free_path_length_m {
                        free_path_length_m = travel_m;
                    }
                }

                // Condition three: the point hits the outer rear side of the
                // vehicle. Checked independently of the front conditions.
                if outside_rear_axle_m <= point_radius_m
                    && point_radius_m < outside_rear_corner_m
                    && point[0].abs() < rear_m
                    && point[1].abs() > margin_m + half_width_m
                {
                    let psi_rad = -(outside_rear_axle_m / point_radius_m).acos();
                    let travel_m = radius_m * (theta_rad - psi_rad);
                    if travel_m < free_path_length_m {
                        free_path_length_m = travel_m;
                    }
                }
            }
        }

        free_path_length_m
    }

    /// Minimum lateral clearance between the swept footprint and nearby
    /// obstacle points over the free path, capped at `max_clearance`.
    pub fn calc_clearance(
        &self,
        cloud: &[Vector2<f64>],
        curvature_m: f64,
        free_path_length_m: f64,
    ) -> f64 {
        let margin_m = self.params.margin_m;
        let max_clearance_m = self.params.max_clearance_m;
        let half_width_m = self.vehicle.half_width_m();
        let wheelbase_m = self.vehicle.dims.wheelbase_m;

        let mut min_clearance_m = max_clearance_m;

        if curvature_m.abs() < self.params.straight_curvature_threshold_m {
            // Straight line case: points in the lateral band beside the
            // vehicle, between it and the end of the free path
            for point in cloud {
                if half_width_m + margin_m <= point[1].abs()
                    && point[1].abs() <= max_clearance_m
                    && 0.0 <= point[0]
                    && point[0] <= free_path_length_m + wheelbase_m
                {
                    let clearance_m = point[1].abs() - wheelbase_m / 2.0 - margin_m;
                    if clearance_m < min_clearance_m {
                        min_clearance_m = clearance_m;
                    }
                }
            }
        } else {
            // Moving along an arc
            let radius_m = (1.0 / curvature_m).abs();

            // Angle swept over the free path
            let phi_rad = free_path_length_m / radius_m;

            for point in cloud {
                let mut point = *point;
                if curvature_m < 0.0 {
                    point[1] = -point[1];
                }

                let point_radius_m =
                    (point[0].powi(2) + (radius_m - point[1]).powi(2)).sqrt();
                let theta_rad = point[0].atan2(radius_m - point[1]);

                // Points in the swept annulus along the free path
                if 0.0 <= theta_rad
                    && theta_rad <= phi_rad
                    && radius_m - half_width_m - margin_m - max_clearance_m <= point_radius_m
                    && point_radius_m <= radius_m + half_width_m + margin_m + max_clearance_m
                {
                    let clearance_m = (point_radius_m * theta_rad.cos() - radius_m).abs()
                        - half_width_m
                        - margin_m;
                    if clearance_m < min_clearance_m {
                        min_clearance_m = clearance_m;
                    }
                }

                // Points beside the vehicle at its final pose on the arc
                let pos_m = transforms::transform_icom(&point, phi_rad, radius_m);
                if half_width_m + margin_m <= pos_m[1].abs()
                    && pos_m[1].abs() <= max_clearance_m
                    && 0.0 <= pos_m[0]
                    && pos_m[0] <= wheelbase_m / 2.0
                {
                    let clearance_m = pos_m[1].abs() - half_width_m - margin_m;
                    if clearance_m < min_clearance_m {
                        min_clearance_m = clearance_m;
                    }
                }
            }
        }

        min_clearance_m
    }

    /// Euclidean distance from the position projected one control interval
    /// ahead at max speed along `curvature_m` to the fixed goal point.
    pub fn calc_distance_to_goal(&self, curvature_m: f64) -> f64 {
        let goal_m = Vector2::new(self.params.goal_point_m[0], self.params.goal_point_m[1]);

        // Arc length covered in one interval at max speed
        let step_m = self.vehicle.limits.max_speed_ms * self.params.control_interval_s;

        let projected_m = if curvature_m.abs() < self.params.straight_curvature_threshold_m {
            Vector2::new(step_m, 0.0)
        } else {
            let radius_m = 1.0 / curvature_m;
            let phi_rad = step_m / radius_m;
            Vector2::new(radius_m * phi_rad.sin(), radius_m - radius_m * phi_rad.cos())
        };

        (goal_m - projected_m).norm()
    }

    /// Sample curvatures uniformly over the vehicle's curvature range and
    /// return the best-scoring candidate.
    ///
    /// The sweep accumulates the sampling interval in floating point, so
    /// whether the exact upper endpoint is sampled depends on rounding.
    pub fn evaluate_paths(&self, cloud: &[Vector2<f64>]) -> PathCandidate {
        let max_curvature_m = self.vehicle.limits.max_curvature_m;

        let mut best: Option<PathCandidate> = None;

        let mut curvature_m = -max_curvature_m;
        while curvature_m <= max_curvature_m {
            let candidate = self.evaluate_candidate(cloud, curvature_m);

            // The first candidate is always accepted
            if best.map_or(true, |b| candidate > b) {
                best = Some(candidate);
            }

            curvature_m += self.params.curvature_sampling_interval_m;
        }

        // Degenerate limits produce an empty sweep; fall back to straight
        // ahead so the operation stays total
        best.unwrap_or_else(|| self.evaluate_candidate(cloud, 0.0))
    }

    /// Score a single curvature sample.
    fn evaluate_candidate(&self, cloud: &[Vector2<f64>], curvature_m: f64) -> PathCandidate {
        let free_path_length_m = self.calc_free_path_length(cloud, curvature_m);
        let clearance_m = self.calc_clearance(cloud, curvature_m, free_path_length_m);
        let goal_distance_m = self.calc_distance_to_goal(curvature_m);

        let score = free_path_length_m
            + self.params.clearance_weight * clearance_m
            + self.params.goal_distance_weight * goal_distance_m;

        PathCandidate {
            curvature_m,
            free_path_length_m,
            clearance_m,
            goal_distance_m,
            score,
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::vehicle::{VehicleDimensions, VehicleLimits};

    const EPS: f64 = 1e-9;

    fn make_vehicle() -> VehicleModel {
        VehicleModel {
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
        }
    }

    fn make_eval() -> PathEval {
        PathEval::new(Params::default(), make_vehicle())
    }

    #[test]
    fn test_free_path_default_range() {
        let eval = make_eval();
        let vehicle = make_vehicle();
        let params = Params::default();

        let expected_m =
            params.default_range_m - (params.margin_m + vehicle.front_extent_m());

        assert!((eval.calc_free_path_length(&[], 0.0) - expected_m).abs() < EPS);
    }

    #[test]
    fn test_free_path_straight_obstacle() {
        let eval = make_eval();
        let vehicle = make_vehicle();
        let params = Params::default();

        let cloud = vec![Vector2::new(5.0, 0.0)];
        let expected_m = 5.0 - (params.margin_m + vehicle.front_extent_m());

        assert!((eval.calc_free_path_length(&cloud, 0.0) - expected_m).abs() < EPS);
    }

    #[test]
    fn test_free_path_straight_ignores_lateral_points() {
        let eval = make_eval();

        // Well outside the inflated half-width, and behind the vehicle
        let cloud = vec![Vector2::new(5.0, 1.5), Vector2::new(-2.0, 0.0)];

        let empty_m = eval.calc_free_path_length(&[], 0.0);
        assert!((eval.calc_free_path_length(&cloud, 0.0) - empty_m).abs() < EPS);
    }

    #[test]
    fn test_free_path_arc_front_hit() {
        let eval = make_eval();
        let vehicle = make_vehicle();
        let params = Params::default();

        // A point on the arc of radius 2 (curvature 0.5) at one radian of
        // sweep. It lands in the front impact region.
        let radius_m = 2.0;
        let cloud = vec![Vector2::new(
            radius_m * 1.0f64.sin(),
            radius_m - radius_m * 1.0f64.cos(),
        )];

        let front_m = params.margin_m + vehicle.front_extent_m();
        let expected_m = radius_m * (1.0 - (front_m / radius_m).asin());

        assert!((eval.calc_free_path_length(&cloud, 0.5) - expected_m).abs() < 1e-6);
    }

    #[test]
    fn test_free_path_arc_mirrors_right_turns() {
        let eval = make_eval();

        // Mirror-image clouds give the same free path for mirror-image
        // curvatures
        let left_cloud = vec![Vector2::new(1.5, 0.8)];
        let right_cloud = vec![Vector2::new(1.5, -0.8)];

        let left_m = eval.calc_free_path_length(&left_cloud, 0.7);
        let right_m = eval.calc_free_path_length(&right_cloud, -0.7);

        assert!((left_m - right_m).abs() < EPS);
    }

    #[test]
    fn test_free_path_monotone_in_obstacles() {
        let eval = make_eval();

        let points = vec![
            Vector2::new(4.0, 0.05),
            Vector2::new(2.5, -0.1),
            Vector2::new(1.2, 0.3),
            Vector2::new(6.0, -0.02),
        ];

        for &curvature_m in &[0.0, 0.4, -0.4, 1.0] {
            let mut cloud: Vec<Vector2<f64>> = vec![];
            let mut prev_m = eval.calc_free_path_length(&cloud, curvature_m);

            for point in &points {
                cloud.push(*point);
                let next_m = eval.calc_free_path_length(&cloud, curvature_m);
                assert!(next_m <= prev_m + EPS);
                prev_m = next_m;
            }
        }
    }

    #[test]
    fn test_clearance_empty_cloud_is_max() {
        let eval = make_eval();
        let params = Params::default();

        let clearance_m = eval.calc_clearance(&[], 0.0, 5.0);
        assert!((clearance_m - params.max_clearance_m).abs() < EPS);
    }

    #[test]
    fn test_clearance_straight_side_point() {
        let eval = make_eval();
        let vehicle = make_vehicle();
        let params = Params::default();

        // Point beside the vehicle inside the clearance band
        let cloud = vec![Vector2::new(1.0, 0.4)];
        let expected_m = 0.4 - vehicle.dims.wheelbase_m / 2.0 - params.margin_m;

        let clearance_m = eval.calc_clearance(&cloud, 0.0, 5.0);
        assert!((clearance_m - expected_m).abs() < EPS);
        assert!(clearance_m <= params.max_clearance_m);
    }

    #[test]
    fn test_evaluate_paths_score_exceeds_sentinel() {
        let eval = make_eval();

        // Any non-empty sweep must beat the legacy sentinel
        let best = eval.evaluate_paths(&[]);
        assert!(best.score > -100.0);
        assert!(best.curvature_m.abs() <= make_vehicle().limits.max_curvature_m);
    }

    #[test]
    fn test_evaluate_paths_steers_away_from_wall() {
        let eval = make_eval();

        // A wall blocking the straight path but leaving the left side open
        let mut cloud = vec![];
        let mut y_m = -0.6;
        while y_m <= 0.2 {
            cloud.push(Vector2::new(2.0, y_m));
            y_m += 0.05;
        }

        let best = eval.evaluate_paths(&cloud);
        let straight = eval.calc_free_path_length(&cloud, 0.0);

        // The winning candidate turns hard enough to avoid the wall
        assert!(best.free_path_length_m > straight);
        assert!(best.curvature_m.abs() > 0.25);
    }

    #[test]
    fn test_goal_distance_straight() {
        let eval = make_eval();
        let params = Params::default();
        let vehicle = make_vehicle();

        let step_m = vehicle.limits.max_speed_ms * params.control_interval_s;
        let expected_m = params.goal_point_m[0] - step_m;

        assert!((eval.calc_distance_to_goal(0.0) - expected_m).abs() < EPS);
    }
}
