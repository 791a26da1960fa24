use crate::connection::Connection;
use crate::poller::{Interest, PollPrimitive, Poller, Readiness};
use crate::status::WaitStatus;

use std::time::Duration;

/// Blocks on a connection's socket until a requested condition is ready.
///
/// The waiter translates a requested [`WaitStatus`] into the platform
/// primitive's interest set, blocks the calling thread, and translates the
/// result back. It holds no state besides the primitive itself.
///
/// # Known limitation
///
/// A failure of the underlying primitive is reported as
/// [`WaitStatus::TIMEOUT`], exactly like a deadline expiry. The single
/// bitmask result the client library expects has no room for anything
/// else. The error is logged at `debug` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReadinessWaiter<P = Poller> {
    poller: P,
}

impl ReadinessWaiter {
    /// Creates a waiter backed by the current platform's primitive.
    pub fn new() -> Self {
        Self {
            poller: Poller::default(),
        }
    }
}

impl<P: PollPrimitive> ReadinessWaiter<P> {
    /// Creates a waiter backed by `poller`.
    pub fn with_poller(poller: P) -> Self {
        Self { poller }
    }

    /// Waits until `connection` satisfies a condition in `status`.
    ///
    /// If `status` contains [`WaitStatus::TIMEOUT`], the wait is bounded by
    /// the connection's [`timeout_value`](Connection::timeout_value) in
    /// seconds; otherwise it blocks indefinitely.
    ///
    /// Returns the observed conditions, or exactly `TIMEOUT` when nothing
    /// became ready in time or the wait itself failed. A wake-up that
    /// carries none of the requested conditions, such as a hang-up alone,
    /// yields an empty status.
    pub fn wait<C: Connection + ?Sized>(&self, connection: &C, status: WaitStatus) -> WaitStatus {
        let timeout = status
            .contains(WaitStatus::TIMEOUT)
            .then(|| Duration::from_secs(u64::from(connection.timeout_value())));

        let observed = match self.poller.wait(connection.socket(), interest(status), timeout) {
            Ok(None) => WaitStatus::TIMEOUT,
            Ok(Some(ready)) => status_of(ready) & status,
            Err(e) => {
                log::debug!("wait({}) failed: {}", status, e);
                WaitStatus::TIMEOUT
            }
        };

        log::debug!("wait({}) -> {}", status, observed);
        observed
    }
}

/// Maps requested flags onto the primitive's interest set.
fn interest(status: WaitStatus) -> Interest {
    Interest {
        read: status.contains(WaitStatus::READ),
        write: status.contains(WaitStatus::WRITE),
        except: status.contains(WaitStatus::EXCEPT),
    }
}

/// Maps fired readiness back onto status flags.
fn status_of(ready: Readiness) -> WaitStatus {
    let mut status = WaitStatus::empty();
    status.set(WaitStatus::READ, ready.readable);
    status.set(WaitStatus::WRITE, ready.writable);
    status.set(WaitStatus::EXCEPT, ready.exceptional);
    status
}

/// Waits on `connection` with the current platform's primitive.
///
/// Shorthand for `ReadinessWaiter::new().wait(connection, status)`.
pub fn wait<C: Connection + ?Sized>(connection: &C, status: WaitStatus) -> WaitStatus {
    ReadinessWaiter::new().wait(connection, status)
}
