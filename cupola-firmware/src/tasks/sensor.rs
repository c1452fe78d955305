//! Home-sensor edge watcher task

use defmt::*;
use embassy_rp::gpio::Input;

use cupola_drivers::sensor::HomeSensor;

use crate::channels::SENSOR_TRIGGER;

/// Watches the home-sensor input and latches every falling edge for the
/// control loop.
#[embassy_executor::task]
pub async fn sensor_task(pin: Input<'static>) -> ! {
    info!("Sensor task started");
    HomeSensor::new(pin).watch(&SENSOR_TRIGGER).await
}
