use crate::poller::RawSocket;

use std::marker::PhantomData;

#[cfg(unix)]
use std::os::fd::AsRawFd;

#[cfg(windows)]
use std::os::windows::io::AsRawSocket;

/// The view of a database client connection needed to wait on it.
///
/// The connection is owned by the client library. A waiter only borrows it
/// for the duration of one wait and never closes its socket.
pub trait Connection {
    /// Returns the connection's underlying socket descriptor.
    fn socket(&self) -> RawSocket;

    /// Returns the timeout, in seconds, that bounds a wait when the client
    /// library requests [`WaitStatus::TIMEOUT`](crate::WaitStatus::TIMEOUT).
    fn timeout_value(&self) -> u32;
}

impl<C: Connection + ?Sized> Connection for &C {
    fn socket(&self) -> RawSocket {
        (**self).socket()
    }

    fn timeout_value(&self) -> u32 {
        (**self).timeout_value()
    }
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    fn socket(&self) -> RawSocket {
        (**self).socket()
    }

    fn timeout_value(&self) -> u32 {
        (**self).timeout_value()
    }
}

/// A [`Connection`] over a socket the caller already holds.
///
/// The socket is borrowed for `'a`, so it cannot be dropped while the
/// connection is in use.
///
/// ```rust,ignore
/// let stream = TcpStream::connect(addr)?;
/// let conn = SocketConnection::new(&stream, 5);
/// let ready = dbwait::wait(&conn, WaitStatus::READ | WaitStatus::TIMEOUT);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct SocketConnection<'a> {
    socket: RawSocket,
    timeout: u32,
    _socket: PhantomData<&'a ()>,
}

impl<'a> SocketConnection<'a> {
    /// Wraps `socket` with a timeout of `timeout_secs` seconds.
    #[cfg(unix)]
    pub fn new<S: AsRawFd + ?Sized>(socket: &'a S, timeout_secs: u32) -> Self {
        Self {
            socket: socket.as_raw_fd(),
            timeout: timeout_secs,
            _socket: PhantomData,
        }
    }

    /// Wraps `socket` with a timeout of `timeout_secs` seconds.
    #[cfg(windows)]
    pub fn new<S: AsRawSocket + ?Sized>(socket: &'a S, timeout_secs: u32) -> Self {
        Self {
            socket: socket.as_raw_socket(),
            timeout: timeout_secs,
            _socket: PhantomData,
        }
    }

    /// Wraps a raw descriptor.
    ///
    /// # Safety
    ///
    /// `socket` must stay open for as long as the returned value is used.
    pub unsafe fn from_raw(socket: RawSocket, timeout_secs: u32) -> Self {
        Self {
            socket,
            timeout: timeout_secs,
            _socket: PhantomData,
        }
    }

    /// Returns a copy with a different timeout.
    pub fn with_timeout(self, timeout_secs: u32) -> Self {
        Self {
            timeout: timeout_secs,
            ..self
        }
    }
}

impl Connection for SocketConnection<'_> {
    fn socket(&self) -> RawSocket {
        self.socket
    }

    fn timeout_value(&self) -> u32 {
        self.timeout
    }
}
