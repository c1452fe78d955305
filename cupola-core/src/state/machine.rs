//! Operation transition table
//!
//! All lifecycle changes of the motion engine are a function of the current
//! operation and an event. Keeping the table explicit makes both stages of
//! the homing sequence independently testable.

use super::events::Event;

/// High-level operation the motion engine is executing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operation {
    /// Stationary, no steps pending
    Idle,
    /// Slewing toward a commanded target
    GoingToTarget,
    /// Sweeping one full revolution
    FullRotate,
    /// Homing, stage 1: backing off counter-clockwise past the sensor
    ResetStage1,
    /// Homing, stage 2: full clockwise sweep to cross the sensor with a
    /// known approach direction
    ResetStage2,
}

/// Side effect the motion engine must perform alongside a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// No side effect
    None,
    /// Load a full clockwise revolution (homing stage 2)
    BeginSweep,
    /// Slew to the home position (homing conclusion)
    Park,
    /// Re-issue the in-flight target from the corrected position
    Retarget,
}

/// Result of applying an event to an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub next: Operation,
    pub action: Action,
}

impl Operation {
    /// Check if this operation is part of the homing sequence
    pub fn is_resetting(&self) -> bool {
        matches!(self, Operation::ResetStage1 | Operation::ResetStage2)
    }

    /// Process an event and return the next operation plus the side effect
    /// the engine must perform.
    pub fn transition(self, event: Event) -> Transition {
        use Event::*;
        use Operation::*;

        let (next, action) = match (self, event) {
            // Command entry points override whatever was running
            (_, TargetAccepted) => (GoingToTarget, Action::None),
            (_, FullRotateStarted) => (FullRotate, Action::None),
            (_, ResetStarted) => (ResetStage1, Action::None),

            // Stage 1 back-off finished: begin the stage 2 sweep
            (ResetStage1, StepsExhausted) => (ResetStage2, Action::BeginSweep),
            // Any other motion running out of steps goes idle; a stage 2
            // sweep that exhausts its steps never crossed the sensor
            (_, StepsExhausted) => (Idle, Action::None),

            // Sensor crossing during the stage 2 sweep concludes homing
            (ResetStage2, SensorTriggered) => (GoingToTarget, Action::Park),
            // Sensor crossing anywhere else re-anchors the position and
            // continues toward the original destination
            (_, SensorTriggered) => (GoingToTarget, Action::Retarget),
        };

        Transition { next, action }
    }
}
