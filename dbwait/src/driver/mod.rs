//! The loop that drives an asynchronous client operation to completion.
//!
//! A non-blocking database client call is split in two: a `start` step that
//! begins the operation, and a `resume` step that advances it once the
//! socket is ready. Each step returns the [`WaitStatus`] the operation is
//! blocked on, and an empty status once it is done.
//!
//! [`Driver::run`] alternates those steps with a [`ReadinessWaiter`] wait
//! until the operation finishes, optionally giving up after a number of
//! consecutive timeouts.

mod builder;

pub use builder::DriverBuilder;

use crate::connection::Connection;
use crate::poller::{PollPrimitive, Poller};
use crate::status::WaitStatus;
use crate::waiter::ReadinessWaiter;

use std::io;

/// A non-blocking operation of a database client.
///
/// Both methods return the conditions the operation is waiting for, or an
/// empty [`WaitStatus`] once it has completed.
pub trait AsyncOperation {
    /// Begins the operation.
    fn start(&mut self) -> WaitStatus;

    /// Advances the operation with the conditions observed by the last wait.
    fn resume(&mut self, ready: WaitStatus) -> WaitStatus;
}

impl<O: AsyncOperation + ?Sized> AsyncOperation for &mut O {
    fn start(&mut self) -> WaitStatus {
        (**self).start()
    }

    fn resume(&mut self, ready: WaitStatus) -> WaitStatus {
        (**self).resume(ready)
    }
}

/// Runs [`AsyncOperation`]s to completion on a connection.
///
/// Created through [`DriverBuilder`].
#[derive(Clone, Copy, Debug)]
pub struct Driver<P = Poller> {
    waiter: ReadinessWaiter<P>,
    max_timeouts: Option<usize>,
}

impl Driver {
    /// Creates a driver with the default configuration.
    pub fn new() -> Self {
        DriverBuilder::new().build()
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PollPrimitive> Driver<P> {
    /// Drives `op` on `connection` until it reports an empty status.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::TimedOut`] once the configured number of
    /// consecutive waits ended in [`WaitStatus::TIMEOUT`]. The operation is
    /// left as it was after its last step.
    pub fn run<C, O>(&self, connection: &C, mut op: O) -> io::Result<()>
    where
        C: Connection + ?Sized,
        O: AsyncOperation,
    {
        let mut status = op.start();
        let mut timeouts = 0;

        while !status.is_empty() {
            let ready = self.waiter.wait(connection, status);

            if ready.is_timeout() {
                timeouts += 1;
                if self.max_timeouts.is_some_and(|max| timeouts >= max) {
                    log::debug!("giving up on {} after {} timeouts", status, timeouts);
                    return Err(io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("operation waiting on {status} timed out {timeouts} times"),
                    ));
                }
            } else {
                timeouts = 0;
            }

            let next = op.resume(ready);
            log::trace!("resume({}) -> {}", ready, next);
            status = next;
        }

        Ok(())
    }
}
