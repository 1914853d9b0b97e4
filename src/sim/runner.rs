use super::event::{EventKind, SimEvent};
use super::integrator::advance_bodies;
use super::machine::{advance_phase, launch};
use super::phase::MissionPhase;
use crate::dynamics::state::{Body, WorldConfig};
use crate::error::ConfigError;
use crate::vehicle::LaunchStack;

// ---------------------------------------------------------------------------
// Snapshots and tick reports
// ---------------------------------------------------------------------------

/// Full simulation state at a tick boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tick: u64,
    pub time: f32,      // s since the simulation was created or reset
    pub phase: MissionPhase,
    pub booster: Body,
    pub upper_stage: Body,
    pub satellite: Body,
}

/// What a single tick produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub phase: MissionPhase,
    pub status: &'static str,
    pub events: Vec<EventKind>,
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// Owned mission state: phase, the three bodies and the event log.
#[derive(Debug, Clone)]
pub struct Simulation {
    world: WorldConfig,
    phase: MissionPhase,
    stack: LaunchStack,
    tick: u64,
    time: f32,
    events: Vec<SimEvent>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::with_world(WorldConfig::default())
    }
}

impl Simulation {
    pub fn new(world: WorldConfig) -> Result<Self, ConfigError> {
        world.validate()?;
        Ok(Self::with_world(world))
    }

    fn with_world(world: WorldConfig) -> Self {
        let stack = LaunchStack::on_pad(&world);
        Self {
            world,
            phase: MissionPhase::PreLaunch,
            stack,
            tick: 0,
            time: 0.0,
            events: Vec::new(),
        }
    }

    pub fn world(&self) -> &WorldConfig {
        &self.world
    }

    pub fn phase(&self) -> MissionPhase {
        self.phase
    }

    pub fn stack(&self) -> &LaunchStack {
        &self.stack
    }

    pub fn status(&self) -> &'static str {
        self.phase.status()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn elapsed(&self) -> f32 {
        self.time
    }

    /// Events since creation or the last reset.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Start the mission. Only honored in `PreLaunch`; takes effect
    /// immediately, so the next tick already flies.
    pub fn request_launch(&mut self) -> bool {
        match launch(self.phase, &mut self.stack) {
            Some(next) => {
                log::info!("launch at tick {}", self.tick);
                self.phase = next;
                self.record(EventKind::Launch);
                true
            }
            None => {
                log::debug!("launch ignored in phase {}", self.phase);
                false
            }
        }
    }

    /// Advance the mission by one step of `dt`: state machine first,
    /// then integration of every participating body.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let transition = advance_phase(self.phase, &mut self.stack, &self.world);
        self.phase = transition.phase;

        let mut events = transition.events;
        if let Some(crash) = advance_bodies(&mut self.stack, self.phase, &self.world, dt) {
            log::info!("booster crashed at tick {}", self.tick);
            events.push(crash);
        }

        for kind in &events {
            self.record(kind.clone());
        }
        self.tick += 1;
        self.time += dt;

        TickReport {
            phase: self.phase,
            status: self.status(),
            events,
        }
    }

    /// Tick with the configured timestep.
    pub fn step(&mut self) -> TickReport {
        let dt = self.world.dt;
        self.tick(dt)
    }

    /// Reinitialize phase, bodies, clock and event log.
    pub fn reset(&mut self) {
        log::info!("reset after {} ticks in phase {}", self.tick, self.phase);
        self.phase = MissionPhase::PreLaunch;
        self.stack = LaunchStack::on_pad(&self.world);
        self.tick = 0;
        self.time = 0.0;
        self.events.clear();
        self.record(EventKind::Reset);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick,
            time: self.time,
            phase: self.phase,
            booster: self.stack.booster.clone(),
            upper_stage: self.stack.upper_stage.clone(),
            satellite: self.stack.satellite.clone(),
        }
    }

    fn record(&mut self, kind: EventKind) {
        self.events.push(SimEvent {
            tick: self.tick,
            kind,
            phase: self.phase,
        });
    }
}

// ---------------------------------------------------------------------------
// Headless run
// ---------------------------------------------------------------------------

/// Launch immediately and run `ticks` fixed steps.
/// Returns the trajectory (initial snapshot plus one per tick) and the event log.
pub fn simulate(
    world: &WorldConfig,
    ticks: u64,
) -> Result<(Vec<Snapshot>, Vec<SimEvent>), ConfigError> {
    let mut sim = Simulation::new(world.clone())?;
    sim.request_launch();

    let capacity = usize::try_from(ticks).unwrap_or(usize::MAX).saturating_add(1);
    let mut trajectory = Vec::with_capacity(capacity.min(200_000));
    trajectory.push(sim.snapshot());

    for _ in 0..ticks {
        sim.step();
        trajectory.push(sim.snapshot());
    }

    Ok((trajectory, sim.events))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
