//! TCP connection acceptor and per-connection sessions
//!
//! A fixed pool of identical listener tasks shares the listening port;
//! each accepted connection consumes one slot until it disconnects. The
//! first line of a connection is the protocol-upgrade handshake and is
//! discarded; afterwards the session loop splits its time between inbound
//! command lines and outbound broadcasts queued by the control loop.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_net::tcp::TcpSocket;
use embassy_net::Stack;
use embedded_io_async::Write;

use cupola_core::motion::Direction;
use cupola_protocol::{Command, LineReader, Rotation};

use crate::channels::{with_dome, with_hub, Outbox, OutboxSink, SharedDome, SharedHub};

/// TCP port the dome listens on
pub const LISTEN_PORT: u16 = 8081;

/// Longest accepted inbound line; anything longer is discarded
const MAX_LINE_LEN: usize = 128;

const RX_BUFFER_SIZE: usize = 1024;
const TX_BUFFER_SIZE: usize = 1024;

/// One listener slot: accept, run the session, clean up, repeat.
#[embassy_executor::task(pool_size = crate::channels::MAX_CLIENTS)]
pub async fn server_task(
    stack: Stack<'static>,
    dome: &'static SharedDome,
    hub: &'static SharedHub,
    outbox: &'static Outbox,
) -> ! {
    let mut rx_buffer = [0u8; RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TX_BUFFER_SIZE];
    let mut read_buf = [0u8; 256];

    loop {
        let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);

        if let Err(e) = socket.accept(LISTEN_PORT).await {
            warn!("Accept failed: {:?}", e);
            continue;
        }
        info!("Client connected");

        run_session(&mut socket, dome, hub, outbox, &mut read_buf).await;

        socket.close();
        info!("Client disconnected");
    }
}

/// Session loop for one accepted connection.
///
/// Registration with the hub happens once the handshake line has been
/// consumed, so broadcasts only reach clients that completed the upgrade.
async fn run_session(
    socket: &mut TcpSocket<'_>,
    dome: &'static SharedDome,
    hub: &'static SharedHub,
    outbox: &'static Outbox,
    read_buf: &mut [u8],
) {
    let mut reader: LineReader<MAX_LINE_LEN> = LineReader::new();
    let mut handle = None;

    'session: loop {
        match select(socket.read(&mut *read_buf), outbox.receive()).await {
            // A zero-length read is the normal end of the connection
            Either::First(Ok(0)) | Either::First(Err(_)) => break 'session,

            Either::First(Ok(n)) => {
                for &byte in &read_buf[..n] {
                    let Some(line) = reader.feed(byte) else {
                        continue;
                    };

                    if handle.is_none() {
                        // Handshake line: consumed, never interpreted
                        trace!("Handshake: {}", line.as_str());
                        match with_hub(hub, |h| h.register(OutboxSink(outbox.sender()))) {
                            Ok(h) => handle = Some(h),
                            Err(_) => {
                                warn!("Client registry full, dropping connection");
                                break 'session;
                            }
                        }
                    } else {
                        apply_command(dome, &line);
                    }
                }
            }

            Either::Second(line) => {
                if socket.write_all(line.as_bytes()).await.is_err() {
                    break 'session;
                }
            }
        }
    }

    if let Some(h) = handle {
        with_hub(hub, |hub| hub.unregister(h));
    }
    // Broadcasts queued for the dead session must not leak into the next
    // connection on this slot
    while outbox.try_receive().is_ok() {}
}

/// Parse one inbound line and apply it to the motor state.
///
/// Unrecognized lines are silently ignored, matching the permissive device
/// command contract.
fn apply_command(dome: &'static SharedDome, line: &str) {
    let Some(cmd) = Command::parse(line) else {
        trace!("Ignored line: {}", line);
        return;
    };

    debug!("Command: {}", cmd);
    with_dome(dome, |d| match cmd {
        Command::Target(target) => d.set_target(target),
        Command::Home => d.park(),
        Command::Reset => d.reset(),
        Command::Rotate(rotation) => d.full_rotate(rotation_direction(rotation)),
    });
}

/// Map the wire rotation to the motor's direction type.
fn rotation_direction(rotation: Rotation) -> Direction {
    match rotation {
        Rotation::Clockwise => Direction::Clockwise,
        Rotation::CounterClockwise => Direction::CounterClockwise,
    }
}
