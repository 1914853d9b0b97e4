use super::event::EventKind;
use super::phase::MissionPhase;
use crate::dynamics::state::WorldConfig;
use crate::vehicle::LaunchStack;

// ---------------------------------------------------------------------------
// Mission state machine
// ---------------------------------------------------------------------------

/// Result of one state-machine pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub phase: MissionPhase,
    pub events: Vec<EventKind>,
}

/// Enter `Liftoff` from `PreLaunch`: booster ignites.
/// Returns `None` (and touches nothing) in any other phase.
pub fn launch(phase: MissionPhase, stack: &mut LaunchStack) -> Option<MissionPhase> {
    if phase != MissionPhase::PreLaunch {
        return None;
    }
    stack.booster.thrusting = true;
    Some(MissionPhase::Liftoff)
}

/// Evaluate the exit condition of `phase`. When it holds, apply the
/// transition's side effects to the stack and return the next phase.
fn fire(
    phase: MissionPhase,
    stack: &mut LaunchStack,
    world: &WorldConfig,
) -> Option<(MissionPhase, Option<EventKind>)> {
    match phase {
        MissionPhase::PreLaunch | MissionPhase::MissionSuccess => None,

        MissionPhase::Liftoff => {
            let height = world.height_of(&stack.booster.pos);
            (height > world.separation_height).then_some((MissionPhase::StageSeparation, None))
        }

        MissionPhase::StageSeparation => {
            stack.booster.thrusting = false;
            stack.upper_stage.thrusting = true;
            stack.booster.vel.x = world.separation_kick;
            Some((MissionPhase::OrbitalInsertion, Some(EventKind::StageSeparation)))
        }

        MissionPhase::OrbitalInsertion => {
            if world.height_of(&stack.upper_stage.pos) < world.orbit_altitude {
                return None;
            }
            let speed = world.circular_speed();
            let upper = &mut stack.upper_stage;
            upper.thrusting = false;
            upper.vel.x = speed;
            upper.vel.y = 0.0;
            Some((
                MissionPhase::SatelliteDeployment,
                Some(EventKind::OrbitalInsertion { speed }),
            ))
        }

        MissionPhase::SatelliteDeployment => {
            stack.satellite.pos = stack.upper_stage.pos;
            stack.satellite.vel = stack.upper_stage.vel;
            stack.satellite.visible = true;
            stack.upper_stage.visible = false;
            Some((MissionPhase::MissionSuccess, Some(EventKind::SatelliteDeployment)))
        }
    }
}

/// Run the state machine for one tick.
///
/// A pass-through phase applies its effects and advances in the same
/// pass, so at most one stable transition plus the pass-through phase
/// it lands on resolve per call.
pub fn advance_phase(
    phase: MissionPhase,
    stack: &mut LaunchStack,
    world: &WorldConfig,
) -> Transition {
    let mut current = phase;
    let mut events = Vec::new();

    while let Some((next, event)) = fire(current, stack, world) {
        log::info!("phase {} -> {}", current, next);
        events.extend(event);
        current = next;
        if !current.is_pass_through() {
            break;
        }
    }

    Transition { phase: current, events }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn world() -> WorldConfig {
        WorldConfig::default()
    }

    #[test]
    fn launch_only_from_pre_launch() {
        let w = world();
        let mut s = LaunchStack::on_pad(&w);
        assert_eq!(launch(MissionPhase::PreLaunch, &mut s), Some(MissionPhase::Liftoff));
        assert!(s.booster.thrusting);

        let mut s = LaunchStack::on_pad(&w);
        assert_eq!(launch(MissionPhase::OrbitalInsertion, &mut s), None);
        assert!(!s.booster.thrusting);
    }

    #[test]
    fn pre_launch_and_success_are_stable() {
        let w = world();
        let mut s = LaunchStack::on_pad(&w);
        let before = s.clone();
        for p in [MissionPhase::PreLaunch, MissionPhase::MissionSuccess] {
            let t = advance_phase(p, &mut s, &w);
            assert_eq!(t.phase, p);
            assert!(t.events.is_empty());
        }
        assert_eq!(s, before);
    }

    #[test]
    fn liftoff_holds_below_threshold() {
        let w = world();
        let mut s = LaunchStack::on_pad(&w);
        s.booster.thrusting = true;
        s.booster.pos.y = w.center.y + w.separation_height; // not strictly above
        let t = advance_phase(MissionPhase::Liftoff, &mut s, &w);
        assert_eq!(t.phase, MissionPhase::Liftoff);
    }

    #[test]
    fn separation_passes_through_in_one_call() {
        let w = world();
        let mut s = LaunchStack::on_pad(&w);
        s.booster.thrusting = true;
        s.booster.pos.y = w.center.y + w.separation_height + 0.1;
        s.booster.vel = Vector3::new(0.0, 18.0, 0.0);

        let t = advance_phase(MissionPhase::Liftoff, &mut s, &w);
        assert_eq!(t.phase, MissionPhase::OrbitalInsertion);
        assert_eq!(t.events, vec![EventKind::StageSeparation]);
        assert!(!s.booster.thrusting);
        assert!(s.upper_stage.thrusting);
        assert_eq!(s.booster.vel, Vector3::new(-1.0, 18.0, 0.0));
        assert_eq!(s.powered().len(), 1);
    }

    #[test]
    fn insertion_waits_for_altitude() {
        let w = world();
        let mut s = LaunchStack::on_pad(&w);
        s.upper_stage.thrusting = true;
        s.upper_stage.pos.y = w.center.y + w.orbit_altitude - 0.5;
        let t = advance_phase(MissionPhase::OrbitalInsertion, &mut s, &w);
        assert_eq!(t.phase, MissionPhase::OrbitalInsertion);
        assert!(s.upper_stage.thrusting);
    }

    #[test]
    fn insertion_and_deployment_resolve_together() {
        let w = world();
        let mut s = LaunchStack::on_pad(&w);
        s.upper_stage.thrusting = true;
        s.upper_stage.pos = Vector3::new(0.2, w.center.y + w.orbit_altitude + 0.05, 0.0);
        s.upper_stage.vel = Vector3::new(0.0, 20.0, 0.0);

        let t = advance_phase(MissionPhase::OrbitalInsertion, &mut s, &w);
        assert_eq!(t.phase, MissionPhase::MissionSuccess);
        assert_eq!(t.events.len(), 2);
        assert!(matches!(t.events[0], EventKind::OrbitalInsertion { .. }));
        assert_eq!(t.events[1], EventKind::SatelliteDeployment);

        // Orbital speed, purely horizontal.
        assert!(!s.upper_stage.thrusting);
        assert_eq!(s.upper_stage.vel.y, 0.0);
        assert_relative_eq!(s.upper_stage.speed(), (2500.0_f32 / 45.0).sqrt(), max_relative = 1e-6);

        // Satellite takes over the upper stage's state exactly.
        assert!(!s.upper_stage.visible);
        assert!(s.satellite.visible);
        assert!(!s.satellite.thrusting);
        assert_eq!(s.satellite.pos, s.upper_stage.pos);
        assert_eq!(s.satellite.vel, s.upper_stage.vel);
    }

    #[test]
    fn pass_through_phase_resolves_when_resumed() {
        let w = world();
        let mut s = LaunchStack::on_pad(&w);
        let t = advance_phase(MissionPhase::SatelliteDeployment, &mut s, &w);
        assert_eq!(t.phase, MissionPhase::MissionSuccess);
        assert!(s.satellite.visible);
    }
}
