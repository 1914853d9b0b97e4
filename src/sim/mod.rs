pub mod event;
pub mod integrator;
pub mod machine;
pub mod phase;
pub mod runner;

pub use event::{EventKind, SimEvent};
pub use integrator::{advance_bodies, euler_step};
pub use machine::advance_phase;
pub use phase::MissionPhase;
pub use runner::{simulate, Simulation, Snapshot, TickReport};
