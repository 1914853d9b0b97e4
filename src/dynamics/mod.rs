pub mod state;

pub use state::{Body, WorldConfig};
