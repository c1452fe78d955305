//! Hardware driver implementations
//!
//! Concrete drivers for the dome's hardware, generic over the
//! `embedded-hal` 1.0 traits so the same code runs against any chip HAL
//! (and against mock pins on the host):
//!
//! - Step/direction pulse driver for the rotation stepper
//! - Home-sensor edge watcher

#![no_std]
#![deny(unsafe_code)]

pub mod sensor;
pub mod stepper;

pub use sensor::HomeSensor;
pub use stepper::{StepFault, StepPulser};
