use super::RawSocket;

use std::io;
use std::time::Duration;

/// Conditions to wait for on a single socket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Interest {
    pub read: bool,
    pub write: bool,
    /// Priority / out-of-band data.
    pub except: bool,
}

/// Readiness reported by a [`PollPrimitive`] for the registered socket.
///
/// An empty `Readiness` means the socket woke the primitive without any
/// requested condition, e.g. on a hang-up or a socket error alone. It is
/// not a deadline expiry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Readiness {
    pub readable: bool,
    pub writable: bool,
    pub exceptional: bool,
}

/// A blocking, single-socket readiness primitive.
///
/// Implementations park the calling thread until the socket satisfies at
/// least one condition in `interest`, or until `timeout` elapses. A `None`
/// timeout blocks indefinitely.
///
/// Returns `Ok(None)` when the timeout elapsed with nothing ready, and
/// `Ok(Some(_))` when the primitive reported the socket.
///
/// The socket is borrowed: implementations must never close it.
pub trait PollPrimitive {
    fn wait(
        &self,
        socket: RawSocket,
        interest: Interest,
        timeout: Option<Duration>,
    ) -> io::Result<Option<Readiness>>;
}

impl<P: PollPrimitive + ?Sized> PollPrimitive for &P {
    fn wait(
        &self,
        socket: RawSocket,
        interest: Interest,
        timeout: Option<Duration>,
    ) -> io::Result<Option<Readiness>> {
        (**self).wait(socket, interest, timeout)
    }
}
