//! Dome motion control loop
//!
//! The heartbeat of the controller. Each iteration absorbs a pending
//! sensor trigger, advances the motion engine by one batch (or idles), and
//! runs the broadcast countdown.

use defmt::*;
use embassy_futures::yield_now;
use embassy_rp::gpio::Output;
use embassy_time::{Delay, Timer};

use cupola_core::motion::Tick;
use cupola_core::state::Operation;
use cupola_drivers::stepper::StepPulser;
use cupola_protocol::position_line;

use crate::channels::{with_dome, with_hub, SharedDome, SharedHub, SENSOR_TRIGGER};

/// Dome motion control task
///
/// Owns the step and direction pins; every other task reaches the motor
/// state only through the shared command entry points.
#[embassy_executor::task]
pub async fn motor_task(
    dome: &'static SharedDome,
    hub: &'static SharedHub,
    step_pin: Output<'static>,
    dir_pin: Output<'static>,
) {
    info!("Motor task started");

    let (broadcast_interval, idle_poll_ms, half_period_us) = with_dome(dome, |d| {
        let c = d.config();
        (c.broadcast_interval, c.idle_poll_ms, c.pulse_half_period_us)
    });

    let mut pulser = StepPulser::new(step_pin, dir_pin, Delay, half_period_us);
    let mut countdown = broadcast_interval;

    loop {
        // Absorb a sensor crossing before moving; this may re-anchor the
        // position and re-target the in-flight motion.
        if SENSOR_TRIGGER.take() {
            debug!("Home sensor crossing");
            with_dome(dome, |d| d.on_sensor());
        }

        let (tick, sweep_missed) = with_dome(dome, |d| {
            let was_sweeping = d.operation() == Operation::ResetStage2;
            let tick = d.tick();
            (tick, was_sweeping && d.operation() == Operation::Idle)
        });
        if sweep_missed {
            warn!("Homing sweep finished without a sensor crossing");
        }

        match tick {
            Tick::Step(batch) => {
                if pulser.apply(&batch).await.is_err() {
                    warn!("Step pin fault, batch dropped");
                }
                yield_now().await;
            }
            Tick::Advanced => {
                debug!("Back-off complete, starting homing sweep");
            }
            Tick::Idle => {
                Timer::after_millis(idle_poll_ms).await;
            }
        }

        // The countdown runs once per iteration regardless of the branch
        // taken above, so broadcast cadence tracks loop iterations.
        countdown -= 1;
        if countdown == 0 {
            countdown = broadcast_interval;
            let line = with_dome(dome, |d| position_line(d.position()));
            let delivered = with_hub(hub, |h| h.publish(&line));
            trace!("Broadcast {} to {} clients", line.as_str(), delivered);
        }
    }
}
