//! The dome motion engine
//!
//! Owns position, remaining steps, direction and the current operation.
//! The firmware control loop calls [`DomeMotor::on_sensor`] when the home
//! trigger latched and [`DomeMotor::tick`] once per iteration; command
//! handlers call the entry points from connection tasks. No suspension
//! happens inside any of these methods, so mutation is atomic with respect
//! to the cooperative scheduler.

use crate::config::DomeConfig;
use crate::ring;
use crate::state::{Action, Event, Operation};

use super::calibration::TriggerTable;
use super::Direction;

/// A batch of steps for the pin driver to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepBatch {
    /// Number of step pulses to emit
    pub count: u32,
    /// Level the direction pin must reflect while pulsing
    pub direction: Direction,
}

/// What the control loop must do after one engine tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// Pulse the step pin for this batch, then yield briefly
    Step(StepBatch),
    /// A homing stage advanced; re-enter the loop without sleeping
    Advanced,
    /// Nothing to do; sleep for the idle-poll interval
    Idle,
}

/// Motion engine state machine
pub struct DomeMotor {
    config: DomeConfig,
    trigger: TriggerTable,
    position: i32,
    steps: i32,
    direction: Direction,
    operation: Operation,
}

impl DomeMotor {
    /// Create an engine at position zero, idle.
    pub fn new(config: DomeConfig) -> Self {
        Self {
            trigger: config.trigger_table(),
            config,
            position: 0,
            steps: 0,
            direction: Direction::Clockwise,
            operation: Operation::Idle,
        }
    }

    /// Current normalized position
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Steps left in the in-flight motion
    pub fn remaining_steps(&self) -> i32 {
        self.steps
    }

    /// Direction of the in-flight motion
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Current high-level operation
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Check if steps are pending
    pub fn is_moving(&self) -> bool {
        self.steps > 0
    }

    /// Engine configuration
    pub fn config(&self) -> &DomeConfig {
        &self.config
    }

    /// Slew to `target` by the shortest path, ties broken clockwise.
    ///
    /// Out-of-range targets are silently ignored: the device command
    /// contract is permissive and reports nothing back.
    pub fn set_target(&mut self, target: i32) {
        if !self.config.accepts_target(target) {
            return;
        }

        let d = ring::distances(self.position, target, self.config.max_position);
        if d.cw <= d.ccw {
            self.steps = d.cw;
            self.direction = Direction::Clockwise;
        } else {
            self.steps = d.ccw;
            self.direction = Direction::CounterClockwise;
        }

        self.apply(Event::TargetAccepted);
    }

    /// Slew home.
    pub fn park(&mut self) {
        self.set_target(self.config.home_position);
    }

    /// Sweep one full revolution in `direction`, crossing the home sensor
    /// so the next trigger re-anchors the position.
    pub fn full_rotate(&mut self, direction: Direction) {
        self.steps = self.config.max_position;
        self.direction = direction;
        self.apply(Event::FullRotateStarted);
    }

    /// Begin the two-stage homing sequence: back off counter-clockwise by
    /// the trigger padding, then (stage 2, entered from `tick`) sweep a full
    /// clockwise revolution so the sensor is crossed with a known approach.
    pub fn reset(&mut self) {
        self.steps = self.config.trigger_padding;
        self.direction = Direction::CounterClockwise;
        self.apply(Event::ResetStarted);
    }

    /// Advance the engine by one control-loop iteration.
    ///
    /// Consumes up to `batch_size` pending steps and updates the tracked
    /// position before the pulses are emitted; the caller drives the pins
    /// from the returned batch.
    pub fn tick(&mut self) -> Tick {
        if self.steps > 0 {
            let count = self.steps.min(self.config.batch_size);
            self.steps -= count;
            self.position = ring::normalize(
                self.position + self.direction.step_delta() * count,
                self.config.max_position,
            );
            return Tick::Step(StepBatch {
                count: count as u32,
                direction: self.direction,
            });
        }

        match self.apply(Event::StepsExhausted) {
            Action::BeginSweep => {
                self.steps = self.config.max_position;
                self.direction = Direction::Clockwise;
                Tick::Advanced
            }
            _ => Tick::Idle,
        }
    }

    /// Absorb a home-sensor crossing.
    ///
    /// Re-anchors the position to the calibration table entry for the
    /// current approach direction, then either parks (stage 2 of homing) or
    /// re-issues the destination the uncorrected motion was heading to, so
    /// the request survives the correction. This bounds cumulative step
    /// drift: every crossing resets the model to ground truth.
    pub fn on_sensor(&mut self) {
        let intended = ring::normalize(
            self.position + self.direction.step_delta() * self.steps,
            self.config.max_position,
        );

        self.position = self.trigger.position(self.direction);

        match self.apply(Event::SensorTriggered) {
            Action::Park => self.park(),
            Action::Retarget => self.set_target(intended),
            _ => {}
        }
    }

    fn apply(&mut self, event: Event) -> Action {
        let t = self.operation.transition(event);
        self.operation = t.next;
        t.action
    }
}
