//! Broadcast hub
//!
//! Fan-out registry for connected clients. The connection acceptor
//! registers an outbound sink per accepted connection and unregisters it on
//! disconnect; the control loop publishes position updates to every
//! registered sink in registration order. Delivery is best-effort: one
//! client's failure never blocks the rest.

use heapless::Vec;

/// A sink rejected a message (queue full or peer gone)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SendError;

/// Outbound channel owned by the hub for a connected client
pub trait Sink<M> {
    fn send(&mut self, msg: M) -> Result<(), SendError>;
}

/// Identifier for a registered client.
///
/// Handles come from a monotonically increasing counter and are never
/// reused within a hub's lifetime, so a stale handle can never name a
/// newer client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClientHandle(u32);

struct Client<S> {
    handle: ClientHandle,
    sink: S,
}

/// Registry of connected clients, capacity `N`
pub struct Hub<S, const N: usize> {
    clients: Vec<Client<S>, N>,
    next_handle: u32,
}

impl<S, const N: usize> Hub<S, N> {
    pub const fn new() -> Self {
        Self {
            clients: Vec::new(),
            next_handle: 0,
        }
    }

    /// Number of currently registered clients
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Register a client sink. Returns the sink unchanged when the registry
    /// is full so the caller can dispose of it.
    pub fn register(&mut self, sink: S) -> Result<ClientHandle, S> {
        let handle = ClientHandle(self.next_handle);
        match self.clients.push(Client { handle, sink }) {
            Ok(()) => {
                self.next_handle += 1;
                Ok(handle)
            }
            Err(rejected) => Err(rejected.sink),
        }
    }

    /// Remove a client, returning its sink. Unknown handles are a no-op.
    pub fn unregister(&mut self, handle: ClientHandle) -> Option<S> {
        let index = self.clients.iter().position(|c| c.handle == handle)?;
        Some(self.clients.remove(index).sink)
    }

    /// Deliver `msg` to every registered client in registration order.
    ///
    /// A failing sink is skipped, not unregistered: its own connection task
    /// detects the disconnect and cleans up. Returns how many clients
    /// accepted the message.
    pub fn publish<M>(&mut self, msg: &M) -> usize
    where
        S: Sink<M>,
        M: Clone,
    {
        let mut delivered = 0;
        for client in self.clients.iter_mut() {
            if client.sink.send(msg.clone()).is_ok() {
                delivered += 1;
            }
        }
        delivered
    }
}

impl<S, const N: usize> Default for Hub<S, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;

    /// Sink that appends into a shared log, or rejects everything.
    struct TestSink<'a> {
        log: &'a RefCell<Vec<(&'static str, &'static str), 16>>,
        name: &'static str,
        reject: bool,
    }

    impl<'a> Sink<&'static str> for TestSink<'a> {
        fn send(&mut self, msg: &'static str) -> Result<(), SendError> {
            if self.reject {
                return Err(SendError);
            }
            self.log.borrow_mut().push((self.name, msg)).unwrap();
            Ok(())
        }
    }

    #[test]
    fn fan_out_in_registration_order() {
        let log = RefCell::new(Vec::new());
        let mut hub: Hub<TestSink, 4> = Hub::new();

        for name in ["a", "b", "c"] {
            hub.register(TestSink {
                log: &log,
                name,
                reject: false,
            })
            .ok()
            .unwrap();
        }

        assert_eq!(hub.publish(&"pos:42"), 3);
        assert_eq!(
            log.borrow().as_slice(),
            [("a", "pos:42"), ("b", "pos:42"), ("c", "pos:42")]
        );
    }

    #[test]
    fn unregistering_one_loses_nothing_for_the_rest() {
        let log = RefCell::new(Vec::new());
        let mut hub: Hub<TestSink, 4> = Hub::new();

        let _a = hub
            .register(TestSink {
                log: &log,
                name: "a",
                reject: false,
            })
            .ok()
            .unwrap();
        let b = hub
            .register(TestSink {
                log: &log,
                name: "b",
                reject: false,
            })
            .ok()
            .unwrap();
        let _c = hub
            .register(TestSink {
                log: &log,
                name: "c",
                reject: false,
            })
            .ok()
            .unwrap();

        assert!(hub.unregister(b).is_some());
        assert_eq!(hub.len(), 2);
        assert_eq!(hub.publish(&"pos:7"), 2);
        assert_eq!(log.borrow().as_slice(), [("a", "pos:7"), ("c", "pos:7")]);

        // A stale handle is a no-op
        assert!(hub.unregister(b).is_none());
    }

    #[test]
    fn one_failing_sink_does_not_block_delivery() {
        let log = RefCell::new(Vec::new());
        let mut hub: Hub<TestSink, 4> = Hub::new();

        hub.register(TestSink {
            log: &log,
            name: "a",
            reject: false,
        })
        .ok()
        .unwrap();
        hub.register(TestSink {
            log: &log,
            name: "broken",
            reject: true,
        })
        .ok()
        .unwrap();
        hub.register(TestSink {
            log: &log,
            name: "c",
            reject: false,
        })
        .ok()
        .unwrap();

        assert_eq!(hub.publish(&"pos:1"), 2);
        assert_eq!(log.borrow().as_slice(), [("a", "pos:1"), ("c", "pos:1")]);
    }

    #[test]
    fn handles_are_monotonic_and_never_reused() {
        let log = RefCell::new(Vec::new());
        let mut hub: Hub<TestSink, 2> = Hub::new();

        let sink = |name| TestSink {
            log: &log,
            name,
            reject: false,
        };

        let a = hub.register(sink("a")).ok().unwrap();
        let b = hub.register(sink("b")).ok().unwrap();
        assert_ne!(a, b);

        hub.unregister(a);
        let c = hub.register(sink("c")).ok().unwrap();
        assert_ne!(c, a);
        assert_ne!(c, b);
    }

    #[test]
    fn registry_full_returns_the_sink() {
        let log = RefCell::new(Vec::new());
        let mut hub: Hub<TestSink, 1> = Hub::new();

        let sink = |name| TestSink {
            log: &log,
            name,
            reject: false,
        };

        hub.register(sink("a")).ok().unwrap();
        let rejected = hub.register(sink("b"));
        assert!(rejected.is_err());
        assert_eq!(hub.len(), 1);
    }
}
