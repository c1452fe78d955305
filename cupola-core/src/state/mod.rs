//! Operation state machine for the motion engine

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{Action, Operation, Transition};
