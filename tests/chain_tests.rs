use glam::Vec3;
use scene_kinematics::chain::{compose_chain, oscillation_angle, StackedCubes};
use scene_kinematics::math::position_of;

#[cfg(test)]
mod chain_tests {
    use super::*;

    #[test]
    fn test_adjacent_boxes_share_a_corner() {
        let cubes = StackedCubes::default();
        for t in [0.0, 0.25, 0.5, 1.3, 7.9] {
            let placements = cubes.placements(t);
            for i in 1..placements.len() {
                let bottom = placements[i].transform_point3(cubes.local_bottom_left());
                let top = placements[i - 1].transform_point3(cubes.local_top_left());
                assert!(
                    bottom.abs_diff_eq(top, 1e-4),
                    "box {} detached at t={}: {:?} vs {:?}",
                    i,
                    t,
                    bottom,
                    top
                );
            }
        }
    }

    #[test]
    fn test_angle_bounded_and_periodic() {
        let amplitude = 10.0_f32.to_radians();
        for step in 0..200 {
            let t = step as f32 * 0.037;
            let a = oscillation_angle(amplitude, 2.0, t);
            assert!(a >= 0.0 && a <= amplitude + 1e-6);
            assert!((a - oscillation_angle(amplitude, 2.0, t + 2.0)).abs() < 1e-4);
        }
    }

    #[test]
    fn test_angle_at_quarter_period() {
        let cubes = StackedCubes::default();
        assert!((cubes.angle(0.5).to_degrees() - 7.071).abs() < 1e-2);
    }

    #[test]
    fn test_relative_tilt_between_links() {
        let cubes = StackedCubes::default();
        let t = 0.5;
        let theta = cubes.angle(t);
        let placements = cubes.placements(t);
        for pair in placements.windows(2) {
            let a = pair[0].x_axis.truncate();
            let b = pair[1].x_axis.truncate();
            let relative = b.y.atan2(b.x) - a.y.atan2(a.x);
            assert!((relative - theta).abs() < 1e-4);
        }
    }

    #[test]
    fn test_rest_pose_is_straight_column() {
        let cubes = StackedCubes::default();
        for (i, m) in cubes.placements(0.0).iter().enumerate() {
            assert!(position_of(*m).abs_diff_eq(Vec3::new(0.0, 1.5 * i as f32, 0.0), 1e-5));
        }
    }

    #[test]
    fn test_count_matches_request() {
        let cubes = StackedCubes::default();
        assert_eq!(compose_chain(&cubes, 0.3, 3).len(), 3);
        assert!(compose_chain(&cubes, 0.3, 0).is_empty());
        assert_eq!(cubes.placements(0.3)[..3], compose_chain(&cubes, 0.3, 3)[..]);
    }
}
