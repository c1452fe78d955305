//! Sensor trigger latch
//!
//! The home sensor fires from edge-interrupt context, outside the
//! cooperative scheduler. The latch is the one piece of state shared with
//! that context: a single atomic flag, stored by the interrupt side and
//! swap-cleared only by the control loop.

use portable_atomic::{AtomicBool, Ordering};

/// One-shot flag set by the sensor edge, consumed by the control loop
pub struct TriggerLatch {
    flag: AtomicBool,
}

impl TriggerLatch {
    pub const fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
        }
    }

    /// Record a sensor crossing. Safe to call from interrupt context; a
    /// single atomic store.
    pub fn set(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Consume a pending crossing, clearing the latch. Only the control
    /// loop calls this.
    pub fn take(&self) -> bool {
        self.flag.swap(false, Ordering::AcqRel)
    }

    /// Peek without clearing.
    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

impl Default for TriggerLatch {
    fn default() -> Self {
        Self::new()
    }
}
