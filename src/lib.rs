pub mod dynamics;
pub mod error;
pub mod io;
pub mod orbital;
pub mod physics;
pub mod sim;
pub mod vehicle;

pub use dynamics::state::{Body, WorldConfig};
pub use error::ConfigError;
pub use sim::{MissionPhase, Simulation, Snapshot, TickReport};
pub use vehicle::{BodyKind, LaunchStack};
