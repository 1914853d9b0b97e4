use nalgebra::Vector3;

/// Floor on squared distance to the attractor; keeps the pull finite near the center.
pub const DIST_SQ_FLOOR: f32 = 1.0;

/// Gravitational pull on a body at one instant.
#[derive(Debug, Clone, Copy)]
pub struct Pull {
    pub accel: Vector3<f32>,
    /// Planar distance to the attractor, after the floor is applied.
    pub distance: f32,
}

/// Inverse-square acceleration toward `center`, in the x-y plane.
///
/// `gm` is the gravitational constant with the attractor mass folded in.
/// Squared distance is clamped to [`DIST_SQ_FLOOR`] before use.
pub fn gravity_accel(pos: &Vector3<f32>, center: &Vector3<f32>, gm: f32) -> Pull {
    let to_center = Vector3::new(center.x - pos.x, center.y - pos.y, 0.0);
    let dist_sq = to_center.norm_squared().max(DIST_SQ_FLOOR);
    let distance = dist_sq.sqrt();
    let g = gm / dist_sq;

    Pull {
        accel: to_center / distance * g,
        distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn points_at_center() {
        let center = Vector3::new(0.0, -100.0, 0.0);
        let pull = gravity_accel(&Vector3::new(0.0, -85.0, 0.0), &center, 2500.0);
        assert_relative_eq!(pull.distance, 15.0);
        assert_relative_eq!(pull.accel.y, -2500.0 / 225.0, max_relative = 1e-6);
        assert_eq!(pull.accel.x, 0.0);
        assert_eq!(pull.accel.z, 0.0);
    }

    #[test]
    fn inverse_square_falloff() {
        let center = Vector3::zeros();
        let near = gravity_accel(&Vector3::new(10.0, 0.0, 0.0), &center, 100.0);
        let far = gravity_accel(&Vector3::new(20.0, 0.0, 0.0), &center, 100.0);
        assert_relative_eq!(near.accel.norm() / far.accel.norm(), 4.0, max_relative = 1e-5);
    }

    #[test]
    fn ignores_depth_axis() {
        let center = Vector3::zeros();
        let flat = gravity_accel(&Vector3::new(3.0, 4.0, 0.0), &center, 50.0);
        let deep = gravity_accel(&Vector3::new(3.0, 4.0, 90.0), &center, 50.0);
        assert_relative_eq!(flat.distance, 5.0);
        assert_relative_eq!(deep.distance, 5.0);
        assert_eq!(flat.accel, deep.accel);
    }

    #[test]
    fn floor_caps_pull_at_center() {
        let center = Vector3::zeros();
        let pull = gravity_accel(&Vector3::new(0.1, 0.0, 0.0), &center, 2500.0);
        assert_relative_eq!(pull.distance, 1.0);
        assert!(pull.accel.norm().is_finite());
        assert!(pull.accel.norm() <= 2500.0);

        let at_center = gravity_accel(&center, &center, 2500.0);
        assert_eq!(at_center.accel, Vector3::zeros());
    }

    #[test]
    fn zero_gravity_has_no_pull() {
        let pull = gravity_accel(&Vector3::new(0.0, 5.0, 0.0), &Vector3::zeros(), 0.0);
        assert_eq!(pull.accel, Vector3::zeros());
    }
}
