use std::fmt;

use crate::dynamics::state::WorldConfig;

// ---------------------------------------------------------------------------
// Body kinds
// ---------------------------------------------------------------------------

/// The three simulated objects, in stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Booster,
    UpperStage,
    Satellite,
}

impl BodyKind {
    pub const ALL: [BodyKind; 3] = [BodyKind::Booster, BodyKind::UpperStage, BodyKind::Satellite];

    /// Thrust acceleration when this body's engine is on. The satellite has none.
    pub fn thrust(self, world: &WorldConfig) -> f32 {
        match self {
            BodyKind::Booster => world.booster_thrust,
            BodyKind::UpperStage => world.upper_stage_thrust,
            BodyKind::Satellite => 0.0,
        }
    }

    /// Short column-safe identifier.
    pub fn key(self) -> &'static str {
        match self {
            BodyKind::Booster => "booster",
            BodyKind::UpperStage => "upper",
            BodyKind::Satellite => "satellite",
        }
    }
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BodyKind::Booster => "Booster",
            BodyKind::UpperStage => "Upper stage",
            BodyKind::Satellite => "Satellite",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn satellite_never_thrusts() {
        let w = WorldConfig::default();
        assert_eq!(BodyKind::Booster.thrust(&w), 23.0);
        assert_eq!(BodyKind::UpperStage.thrust(&w), 18.0);
        assert_eq!(BodyKind::Satellite.thrust(&w), 0.0);
    }
}
