//! Shared state and inter-task plumbing
//!
//! The dome runs on a single-threaded cooperative executor, so shared state
//! lives in blocking mutexes that are only ever held across synchronous
//! sections: command handlers and the control loop mutate the motor inside
//! a lock closure with no await point, which makes each mutation atomic
//! with respect to every other task.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::{Channel, Sender};

use cupola_core::hub::{Hub, SendError, Sink};
use cupola_core::motion::DomeMotor;
use cupola_core::trigger::TriggerLatch;
use cupola_protocol::StatusLine;

/// Maximum simultaneously connected clients (listener pool size)
pub const MAX_CLIENTS: usize = 4;

/// Outbound lines queued per client before broadcasts are dropped for it
pub const OUTBOX_DEPTH: usize = 4;

/// Motor state shared between the control loop and command handlers
pub type SharedDome = Mutex<CriticalSectionRawMutex, RefCell<DomeMotor>>;

/// Broadcast registry shared between the control loop and the acceptor
pub type SharedHub = Mutex<CriticalSectionRawMutex, RefCell<Hub<OutboxSink, MAX_CLIENTS>>>;

/// Per-connection outbound queue
pub type Outbox = Channel<CriticalSectionRawMutex, StatusLine, OUTBOX_DEPTH>;

/// Home-sensor latch: set by the sensor task, consumed by the control loop
pub static SENSOR_TRIGGER: TriggerLatch = TriggerLatch::new();

/// Broadcast hub; sinks are registered per accepted connection
pub static HUB: SharedHub = Mutex::new(RefCell::new(Hub::new()));

/// Outbound queues, one per listener slot
pub static OUTBOXES: [Outbox; MAX_CLIENTS] = [const { Channel::new() }; MAX_CLIENTS];

/// Hub sink backed by one connection's outbox.
///
/// `try_send` keeps `publish` non-blocking: when a client's queue is full
/// the broadcast is dropped for that client only.
pub struct OutboxSink(pub Sender<'static, CriticalSectionRawMutex, StatusLine, OUTBOX_DEPTH>);

impl Sink<StatusLine> for OutboxSink {
    fn send(&mut self, msg: StatusLine) -> Result<(), SendError> {
        self.0.try_send(msg).map_err(|_| SendError)
    }
}

/// Wrap a freshly built motor for sharing between tasks.
pub fn shared_dome(motor: DomeMotor) -> SharedDome {
    Mutex::new(RefCell::new(motor))
}

/// Run a closure against the motor state. No awaits happen inside.
pub fn with_dome<R>(dome: &SharedDome, f: impl FnOnce(&mut DomeMotor) -> R) -> R {
    dome.lock(|cell| f(&mut cell.borrow_mut()))
}

/// Run a closure against the broadcast hub. No awaits happen inside.
pub fn with_hub<R>(
    hub: &SharedHub,
    f: impl FnOnce(&mut Hub<OutboxSink, MAX_CLIENTS>) -> R,
) -> R {
    hub.lock(|cell| f(&mut cell.borrow_mut()))
}
