use std::f32::consts::PI;

use nalgebra::Vector3;

use crate::dynamics::state::Body;

/// Planar two-body orbit of a body about the attractor.
/// Gravitational parameter is the world's folded constant `G`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitElements {
    pub radius: f32,  // current distance from the attractor
    pub speed: f32,
    pub energy: f32,  // specific orbital energy
    pub sma: f32,     // semi-major axis, infinite when unbound
    pub ecc: f32,     // eccentricity (0 = circular)
}

impl OrbitElements {
    /// Elements from a position/velocity relative to `center`, in the x-y plane.
    /// `None` when `mu` is not positive or the body sits on the center.
    pub fn from_state(
        pos: &Vector3<f32>,
        vel: &Vector3<f32>,
        center: &Vector3<f32>,
        mu: f32,
    ) -> Option<Self> {
        let r_vec = Vector3::new(pos.x - center.x, pos.y - center.y, 0.0);
        let v_vec = Vector3::new(vel.x, vel.y, 0.0);
        let r = r_vec.norm();
        if mu <= 0.0 || r <= f32::EPSILON {
            return None;
        }
        let v = v_vec.norm();

        let energy = 0.5 * v * v - mu / r;
        let e_vec = ((v * v - mu / r) * r_vec - r_vec.dot(&v_vec) * v_vec) / mu;
        let sma = if energy < 0.0 {
            -mu / (2.0 * energy)
        } else {
            f32::INFINITY
        };

        Some(OrbitElements {
            radius: r,
            speed: v,
            energy,
            sma,
            ecc: e_vec.norm(),
        })
    }

    pub fn from_body(body: &Body, center: &Vector3<f32>, mu: f32) -> Option<Self> {
        Self::from_state(&body.pos, &body.vel, center, mu)
    }

    pub fn is_bound(&self) -> bool {
        self.energy < 0.0 && self.ecc < 1.0
    }

    /// Orbital period, for bound orbits.
    pub fn period(&self, mu: f32) -> Option<f32> {
        self.is_bound()
            .then(|| 2.0 * PI * (self.sma.powi(3) / mu).sqrt())
    }

    pub fn periapsis(&self) -> f32 {
        self.sma * (1.0 - self.ecc)
    }

    pub fn apoapsis(&self) -> f32 {
        self.sma * (1.0 + self.ecc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const MU: f32 = 2500.0;

    #[test]
    fn circular_orbit() {
        let r = 45.0_f32;
        let center = Vector3::new(0.0, -100.0, 0.0);
        let pos = center + Vector3::new(0.0, r, 0.0);
        let vel = Vector3::new((MU / r).sqrt(), 0.0, 0.0);

        let el = OrbitElements::from_state(&pos, &vel, &center, MU).unwrap();
        assert!(el.is_bound());
        assert!(el.ecc < 1e-5, "ecc = {}", el.ecc);
        assert_relative_eq!(el.sma, r, max_relative = 1e-5);
        assert_relative_eq!(el.periapsis(), el.apoapsis(), max_relative = 1e-4);

        let period = el.period(MU).unwrap();
        assert_relative_eq!(period, 2.0 * PI * r / vel.x, max_relative = 1e-4);
    }

    #[test]
    fn slow_tangential_start_is_at_apoapsis() {
        let r = 40.0_f32;
        let pos = Vector3::new(r, 0.0, 0.0);
        let vel = Vector3::new(0.0, 0.8 * (MU / r).sqrt(), 0.0);
        let el = OrbitElements::from_state(&pos, &vel, &Vector3::zeros(), MU).unwrap();
        assert!(el.is_bound());
        assert!(el.ecc > 0.1);
        assert_relative_eq!(el.apoapsis(), r, max_relative = 1e-4);
        assert!(el.periapsis() < r);
    }

    #[test]
    fn escape_is_unbound() {
        let r = 25.0_f32;
        let pos = Vector3::new(0.0, r, 0.0);
        let vel = Vector3::new(0.0, 1.2 * (2.0 * MU / r).sqrt(), 0.0);
        let el = OrbitElements::from_state(&pos, &vel, &Vector3::zeros(), MU).unwrap();
        assert!(!el.is_bound());
        assert!(el.sma.is_infinite());
        assert_eq!(el.period(MU), None);
    }

    #[test]
    fn degenerate_inputs() {
        let zero = Vector3::zeros();
        assert!(OrbitElements::from_state(&zero, &zero, &zero, MU).is_none());
        let pos = Vector3::new(1.0, 0.0, 0.0);
        assert!(OrbitElements::from_state(&pos, &zero, &zero, 0.0).is_none());
    }
}
