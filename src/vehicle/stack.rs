use nalgebra::Vector3;

use super::stage::BodyKind;
use crate::dynamics::state::{Body, WorldConfig};

// ---------------------------------------------------------------------------
// Launch stack: booster, upper stage, satellite
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchStack {
    pub booster: Body,
    pub upper_stage: Body,
    pub satellite: Body,
}

impl LaunchStack {
    /// Initial configuration: booster on the pad, upper stage stacked on top,
    /// satellite stowed (hidden).
    pub fn on_pad(world: &WorldConfig) -> Self {
        let pad = world.pad_position();
        Self {
            booster: Body::at_rest(pad),
            upper_stage: Body::at_rest(pad + Vector3::new(0.0, world.stack_offset, 0.0)),
            satellite: Body::hidden(),
        }
    }

    pub fn body(&self, kind: BodyKind) -> &Body {
        match kind {
            BodyKind::Booster => &self.booster,
            BodyKind::UpperStage => &self.upper_stage,
            BodyKind::Satellite => &self.satellite,
        }
    }

    pub fn body_mut(&mut self, kind: BodyKind) -> &mut Body {
        match kind {
            BodyKind::Booster => &mut self.booster,
            BodyKind::UpperStage => &mut self.upper_stage,
            BodyKind::Satellite => &mut self.satellite,
        }
    }

    /// Rigid attachment: upper stage rides on the booster.
    pub fn lock_upper_stage(&mut self, world: &WorldConfig) {
        self.upper_stage.pos = self.booster.pos + Vector3::new(0.0, world.stack_offset, 0.0);
        self.upper_stage.vel = self.booster.vel;
    }

    /// Bodies currently firing, in stacking order.
    pub fn powered(&self) -> Vec<BodyKind> {
        BodyKind::ALL
            .into_iter()
            .filter(|&k| self.body(k).thrusting)
            .collect()
    }

    pub fn visible(&self) -> impl Iterator<Item = (BodyKind, &Body)> + '_ {
        BodyKind::ALL
            .into_iter()
            .map(|k| (k, self.body(k)))
            .filter(|(_, b)| b.visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_pad_layout() {
        let w = WorldConfig::default();
        let s = LaunchStack::on_pad(&w);
        assert_eq!(s.booster.pos, Vector3::new(0.0, -85.0, 0.0));
        assert_eq!(s.upper_stage.pos, Vector3::new(0.0, -81.0, 0.0));
        assert!(s.booster.visible && s.upper_stage.visible);
        assert!(!s.satellite.visible);
        assert!(s.powered().is_empty());
        assert_eq!(s.visible().count(), 2);
    }

    #[test]
    fn lock_follows_booster() {
        let w = WorldConfig::default();
        let mut s = LaunchStack::on_pad(&w);
        s.booster.pos = Vector3::new(1.0, -70.0, 0.0);
        s.booster.vel = Vector3::new(0.5, 12.0, 0.0);
        s.upper_stage.vel = Vector3::new(9.0, 9.0, 0.0);
        s.lock_upper_stage(&w);
        assert_eq!(s.upper_stage.pos, Vector3::new(1.0, -66.0, 0.0));
        assert_eq!(s.upper_stage.vel, s.booster.vel);
    }

    #[test]
    fn body_accessors_match_fields() {
        let w = WorldConfig::default();
        let mut s = LaunchStack::on_pad(&w);
        s.body_mut(BodyKind::Satellite).visible = true;
        assert!(s.satellite.visible);
        assert_eq!(s.body(BodyKind::UpperStage), &s.upper_stage);
    }
}
