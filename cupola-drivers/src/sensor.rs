//! Home-sensor edge watcher
//!
//! The home sensor pulls its input low when the dome crosses it. The
//! watcher waits for falling edges and records each crossing in the shared
//! [`TriggerLatch`]; the control loop consumes the latch once per
//! iteration.

use cupola_core::trigger::TriggerLatch;
use embedded_hal_async::digital::Wait;

/// Edge watcher for the home sensor input
pub struct HomeSensor<P> {
    pin: P,
}

impl<P: Wait> HomeSensor<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Latch every falling edge, forever.
    pub async fn watch(mut self, latch: &TriggerLatch) -> ! {
        loop {
            if self.pin.wait_for_falling_edge().await.is_ok() {
                latch.set();
            }
        }
    }
}
