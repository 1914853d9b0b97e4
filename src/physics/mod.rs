pub mod gravity;

pub use gravity::{gravity_accel, Pull, DIST_SQ_FLOOR};
