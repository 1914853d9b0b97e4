use nalgebra::Vector3;

use super::event::EventKind;
use super::phase::MissionPhase;
use crate::dynamics::state::{Body, WorldConfig};
use crate::physics::gravity::gravity_accel;
use crate::vehicle::{BodyKind, LaunchStack};

// ---------------------------------------------------------------------------
// Explicit Euler step
// ---------------------------------------------------------------------------

/// Advance one body by `dt` under gravity plus optional thrust along +y.
///
/// Velocity is updated first and the new velocity moves the position.
/// Returns the (floored) distance to the attractor sampled before the move.
pub fn euler_step(body: &mut Body, thrust: f32, world: &WorldConfig, dt: f32) -> f32 {
    let pull = gravity_accel(&body.pos, &world.center, world.gravity);

    let mut accel = pull.accel;
    if body.thrusting {
        accel += Vector3::y() * thrust;
    }

    body.vel += accel * dt;
    body.pos += body.vel * dt;
    pull.distance
}

// ---------------------------------------------------------------------------
// Per-tick body update
// ---------------------------------------------------------------------------

/// Integrate every participating body for one tick of the given phase.
///
/// While in `Liftoff` the upper stage is not integrated; it is pinned to
/// the booster after the booster moves. Returns a crash event if the
/// booster came down inside the collision radius this tick.
pub fn advance_bodies(
    stack: &mut LaunchStack,
    phase: MissionPhase,
    world: &WorldConfig,
    dt: f32,
) -> Option<EventKind> {
    if !phase.is_launched() {
        return None;
    }

    let mut crash = None;

    let booster = &mut stack.booster;
    if booster.visible {
        let distance = euler_step(booster, BodyKind::Booster.thrust(world), world, dt);
        if distance < world.collision_radius {
            booster.visible = false;
            crash = Some(EventKind::BoosterCrash);
        }
        if phase.is_separated() {
            booster.spin += world.tumble_rate;
        }
    }

    if stack.upper_stage.visible && phase.is_separated() {
        euler_step(&mut stack.upper_stage, BodyKind::UpperStage.thrust(world), world, dt);
    }

    if phase == MissionPhase::Liftoff {
        stack.lock_upper_stage(world);
    }

    if stack.satellite.visible {
        euler_step(&mut stack.satellite, BodyKind::Satellite.thrust(world), world, dt);
    }

    for (kind, body) in stack.visible() {
        log::trace!("{} pos={:?} vel={:?}", kind, body.pos, body.vel);
    }

    crash
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
