//! Step/direction pulse driver
//!
//! Emits the electrical waveform for a [`StepBatch`]: the direction pin is
//! latched first, then the step pin is pulsed once per step with a fixed
//! half-period between edges. The delay awaits are the control loop's
//! suspension points while the dome is moving.

use cupola_core::motion::{Direction, StepBatch};
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

/// A step or direction pin refused to switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepFault;

/// Driver for a step/direction stepper interface
pub struct StepPulser<STEP, DIR, D> {
    step: STEP,
    dir: DIR,
    delay: D,
    half_period_us: u32,
}

impl<STEP, DIR, D> StepPulser<STEP, DIR, D>
where
    STEP: OutputPin,
    DIR: OutputPin,
    D: DelayNs,
{
    /// Create a pulse driver.
    ///
    /// `half_period_us` is half of one full step period: each pulse is a
    /// low phase and a high phase of this duration. The step pin should
    /// idle high.
    pub fn new(step: STEP, dir: DIR, delay: D, half_period_us: u32) -> Self {
        Self {
            step,
            dir,
            delay,
            half_period_us,
        }
    }

    /// Drive one batch of steps.
    ///
    /// Clockwise rotation drives the direction pin high, counter-clockwise
    /// low.
    pub async fn apply(&mut self, batch: &StepBatch) -> Result<(), StepFault> {
        let dir_result = match batch.direction {
            Direction::Clockwise => self.dir.set_high(),
            Direction::CounterClockwise => self.dir.set_low(),
        };
        dir_result.map_err(|_| StepFault)?;

        for _ in 0..batch.count {
            self.step.set_low().map_err(|_| StepFault)?;
            self.delay.delay_us(self.half_period_us).await;
            self.step.set_high().map_err(|_| StepFault)?;
            self.delay.delay_us(self.half_period_us).await;
        }

        Ok(())
    }
}
