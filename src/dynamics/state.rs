use nalgebra::Vector3;

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Body state
// ---------------------------------------------------------------------------

/// One simulated object: booster, upper stage or satellite.
/// Frame: y is up, the attractor sits below the launch pad.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Vector3<f32>,
    pub vel: Vector3<f32>,
    pub spin: f32,          // deg, cosmetic tumble only
    pub visible: bool,      // participates in physics and rendering
    pub thrusting: bool,
}

impl Body {
    /// Visible body at rest, engines off.
    pub fn at_rest(pos: Vector3<f32>) -> Self {
        Self {
            pos,
            vel: Vector3::zeros(),
            spin: 0.0,
            visible: true,
            thrusting: false,
        }
    }

    /// Hidden placeholder at the origin.
    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::at_rest(Vector3::zeros())
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.norm()
    }
}

// ---------------------------------------------------------------------------
// World constants
// ---------------------------------------------------------------------------

/// Immutable world configuration read by the state machine and integrator.
///
/// `gravity` folds the attractor mass into the gravitational constant,
/// so circular speed at radius r is `sqrt(gravity / r)`.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldConfig {
    pub gravity: f32,
    pub booster_thrust: f32,      // acceleration along +y
    pub upper_stage_thrust: f32,
    pub dt: f32,                  // fixed timestep, s
    pub center: Vector3<f32>,     // attractor point
    pub collision_radius: f32,    // planet surface
    pub separation_height: f32,   // booster height above center that triggers staging
    pub orbit_altitude: f32,      // upper-stage height above center for insertion
    pub stack_offset: f32,        // upper stage sits this far above the booster
    pub separation_kick: f32,     // booster lateral velocity after staging
    pub tumble_rate: f32,         // deg per tick
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: 2500.0,
            booster_thrust: 23.0,
            upper_stage_thrust: 18.0,
            dt: 0.016,            // ~60 Hz
            center: Vector3::new(0.0, -100.0, 0.0),
            collision_radius: 15.0,
            separation_height: 25.0,
            orbit_altitude: 45.0,
            stack_offset: 4.0,
            separation_kick: -1.0,
            tumble_rate: 1.0,
        }
    }
}

impl WorldConfig {
    /// Height of a point above the attractor, along +y.
    pub fn height_of(&self, pos: &Vector3<f32>) -> f32 {
        pos.y - self.center.y
    }

    /// Circular orbit speed at the target altitude: v = sqrt(G / r).
    pub fn circular_speed(&self) -> f32 {
        (self.gravity / self.orbit_altitude).sqrt()
    }

    /// Launch pad position: on the surface directly above the attractor.
    pub fn pad_position(&self) -> Vector3<f32> {
        self.center + Vector3::new(0.0, self.collision_radius, 0.0)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigError::InvalidTimestep(self.dt));
        }

        let non_negative = [
            ("gravity", self.gravity),
            ("booster_thrust", self.booster_thrust),
            ("upper_stage_thrust", self.upper_stage_thrust),
            ("collision_radius", self.collision_radius),
            ("stack_offset", self.stack_offset),
            ("tumble_rate", self.tumble_rate),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidConstant { field, value });
            }
        }
        if !self.separation_kick.is_finite() {
            return Err(ConfigError::InvalidConstant {
                field: "separation_kick",
                value: self.separation_kick,
            });
        }
        if !(self.center.iter().all(|c| c.is_finite())) {
            return Err(ConfigError::InvalidConstant {
                field: "center",
                value: f32::NAN,
            });
        }

        if !(self.orbit_altitude.is_finite() && self.orbit_altitude > 0.0) {
            return Err(ConfigError::InvalidOrbitAltitude(self.orbit_altitude));
        }
        if !(self.collision_radius < self.separation_height) {
            return Err(ConfigError::ThresholdOrder {
                lower: "collision_radius",
                lower_value: self.collision_radius,
                upper: "separation_height",
                upper_value: self.separation_height,
            });
        }
        if !(self.separation_height < self.orbit_altitude) {
            return Err(ConfigError::ThresholdOrder {
                lower: "separation_height",
                lower_value: self.separation_height,
                upper: "orbit_altitude",
                upper_value: self.orbit_altitude,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_world_is_valid() {
        assert_eq!(WorldConfig::default().validate(), Ok(()));
    }

    #[test]
    fn circular_speed_uses_orbit_altitude() {
        let w = WorldConfig::default();
        assert_relative_eq!(w.circular_speed(), (2500.0_f32 / 45.0).sqrt());
    }

    #[test]
    fn pad_sits_on_surface() {
        let w = WorldConfig::default();
        let pad = w.pad_position();
        assert_eq!(pad, Vector3::new(0.0, -85.0, 0.0));
        assert_relative_eq!(w.height_of(&pad), w.collision_radius);
    }

    #[test]
    fn zero_gravity_is_allowed() {
        let w = WorldConfig { gravity: 0.0, ..Default::default() };
        assert!(w.validate().is_ok());
    }

    #[test]
    fn rejects_bad_timestep() {
        let w = WorldConfig { dt: 0.0, ..Default::default() };
        assert_eq!(w.validate(), Err(ConfigError::InvalidTimestep(0.0)));
        let w = WorldConfig { dt: f32::INFINITY, ..Default::default() };
        assert!(matches!(w.validate(), Err(ConfigError::InvalidTimestep(_))));
    }

    #[test]
    fn rejects_negative_thrust() {
        let w = WorldConfig { booster_thrust: -1.0, ..Default::default() };
        assert_eq!(
            w.validate(),
            Err(ConfigError::InvalidConstant { field: "booster_thrust", value: -1.0 })
        );
    }

    #[test]
    fn rejects_thresholds_out_of_order() {
        let w = WorldConfig { separation_height: 10.0, ..Default::default() };
        assert!(matches!(
            w.validate(),
            Err(ConfigError::ThresholdOrder { lower: "collision_radius", .. })
        ));
        let w = WorldConfig { orbit_altitude: 20.0, ..Default::default() };
        assert!(matches!(
            w.validate(),
            Err(ConfigError::ThresholdOrder { lower: "separation_height", .. })
        ));
    }

    #[test]
    fn rejects_non_positive_orbit() {
        let w = WorldConfig { orbit_altitude: 0.0, ..Default::default() };
        assert_eq!(w.validate(), Err(ConfigError::InvalidOrbitAltitude(0.0)));
    }

    #[test]
    fn hidden_body_is_invisible_and_still() {
        let b = Body::hidden();
        assert!(!b.visible);
        assert!(!b.thrusting);
        assert_eq!(b.speed(), 0.0);
    }
}
