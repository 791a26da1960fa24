//! Unix `poll(2)`-based readiness primitive.
//!
//! A single `pollfd` is built per call. Nothing is registered or kept
//! between calls, so the primitive is stateless and `Copy`.

use super::RawSocket;
use super::common::{Interest, PollPrimitive, Readiness};

use libc::{POLLIN, POLLNVAL, POLLOUT, POLLPRI, c_int, nfds_t, poll, pollfd};
use std::io;
use std::time::Duration;

/// Readiness primitive backed by `poll(2)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PollPoller;

impl PollPoller {
    pub fn new() -> Self {
        PollPoller
    }
}

/// Converts an optional timeout into the millisecond argument of `poll`.
///
/// `None` maps to `-1` (infinite). Durations beyond `c_int::MAX` ms saturate.
fn timeout_millis(timeout: Option<Duration>) -> c_int {
    timeout
        .map(|t| t.as_millis().min(c_int::MAX as u128) as c_int)
        .unwrap_or(-1)
}

impl PollPrimitive for PollPoller {
    fn wait(
        &self,
        socket: RawSocket,
        interest: Interest,
        timeout: Option<Duration>,
    ) -> io::Result<Option<Readiness>> {
        let mut events = 0;
        if interest.read {
            events |= POLLIN;
        }
        if interest.write {
            events |= POLLOUT;
        }
        if interest.except {
            events |= POLLPRI;
        }

        let mut pfd = pollfd {
            fd: socket,
            events,
            revents: 0,
        };

        let rc = unsafe { poll(&mut pfd, 1 as nfds_t, timeout_millis(timeout)) };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        if rc == 0 {
            return Ok(None);
        }

        // poll reports a descriptor that is not open through revents
        // rather than through its return value.
        if pfd.revents & POLLNVAL != 0 {
            return Err(io::Error::from_raw_os_error(libc::EBADF));
        }

        Ok(Some(Readiness {
            readable: pfd.revents & POLLIN != 0,
            writable: pfd.revents & POLLOUT != 0,
            exceptional: pfd.revents & POLLPRI != 0,
        }))
    }
}
