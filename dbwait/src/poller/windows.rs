//! Windows `select`-based readiness primitive.
//!
//! Winsock's `select` takes one `FD_SET` per condition. Only the sets for
//! requested conditions are passed; the others are null. Winsock ignores
//! the `nfds` argument.

use super::RawSocket;
use super::common::{Interest, PollPrimitive, Readiness};

use std::io;
use std::mem;
use std::ptr;
use std::sync::Once;
use std::time::Duration;

use windows_sys::Win32::Networking::WinSock::{
    FD_SET, SOCKET, SOCKET_ERROR, TIMEVAL, WSADATA, WSAStartup, select,
};

static WINSOCK_INIT: Once = Once::new();

/// Creates a MAKEWORD value for Winsock version.
#[inline]
fn makeword(low: u8, high: u8) -> u16 {
    ((high as u16) << 8) | (low as u16)
}

/// Initializes Winsock once per process.
///
/// A failed `WSAStartup` is not fatal here: the following `select` then
/// fails with `WSANOTINITIALISED`, which the waiter reports as a timeout.
fn ensure_winsock() {
    WINSOCK_INIT.call_once(|| unsafe {
        let mut data: WSADATA = mem::zeroed();
        let rc = WSAStartup(makeword(2, 2), &mut data as *mut _);
        if rc != 0 {
            log::debug!("WSAStartup failed: {}", rc);
        }
    });
}

/// Readiness primitive backed by Winsock `select`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectPoller;

impl SelectPoller {
    pub fn new() -> Self {
        SelectPoller
    }
}

/// Builds an `FD_SET` holding only `socket`.
fn single_set(socket: SOCKET) -> FD_SET {
    let mut set: FD_SET = unsafe { mem::zeroed() };
    set.fd_count = 1;
    set.fd_array[0] = socket;
    set
}

/// Equivalent of `FD_ISSET` for the sets built by [`single_set`].
fn is_set(set: &FD_SET, socket: SOCKET) -> bool {
    set.fd_array[..set.fd_count as usize].contains(&socket)
}

/// Converts a timeout into a `TIMEVAL`, saturating the seconds field.
fn timeval(timeout: Duration) -> TIMEVAL {
    TIMEVAL {
        tv_sec: timeout.as_secs().min(i32::MAX as u64) as i32,
        tv_usec: timeout.subsec_micros() as i32,
    }
}

fn as_ptr(set: &mut Option<FD_SET>) -> *mut FD_SET {
    set.as_mut().map_or(ptr::null_mut(), |s| s as *mut FD_SET)
}

impl PollPrimitive for SelectPoller {
    fn wait(
        &self,
        socket: RawSocket,
        interest: Interest,
        timeout: Option<Duration>,
    ) -> io::Result<Option<Readiness>> {
        ensure_winsock();

        let s = socket as SOCKET;
        let mut rs = interest.read.then(|| single_set(s));
        let mut ws = interest.write.then(|| single_set(s));
        let mut es = interest.except.then(|| single_set(s));

        let tv = timeout.map(timeval);
        let tv_ptr = tv.as_ref().map_or(ptr::null(), |t| t as *const TIMEVAL);

        let rc = unsafe { select(0, as_ptr(&mut rs), as_ptr(&mut ws), as_ptr(&mut es), tv_ptr) };
        if rc == SOCKET_ERROR {
            return Err(io::Error::last_os_error());
        }
        if rc == 0 {
            return Ok(None);
        }

        Ok(Some(Readiness {
            readable: rs.as_ref().is_some_and(|set| is_set(set, s)),
            writable: ws.as_ref().is_some_and(|set| is_set(set, s)),
            exceptional: es.as_ref().is_some_and(|set| is_set(set, s)),
        }))
    }
}
