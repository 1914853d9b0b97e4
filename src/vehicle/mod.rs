pub mod stage;
pub mod stack;

pub use stage::BodyKind;
pub use stack::LaunchStack;
