use super::Driver;
use crate::poller::{PollPrimitive, Poller};
use crate::waiter::ReadinessWaiter;

/// Builder for configuring and creating a [`Driver`].
///
/// # Examples
///
/// ```rust,ignore
/// let driver = DriverBuilder::new()
///     .max_timeouts(3)
///     .build();
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DriverBuilder {
    /// Consecutive timeouts tolerated before giving up. `None` never gives up.
    max_timeouts: Option<usize>,
}

impl DriverBuilder {
    /// Creates a builder whose driver never gives up on its own.
    pub fn new() -> Self {
        Self { max_timeouts: None }
    }

    /// Gives up after `n` consecutive [`WaitStatus::TIMEOUT`] results.
    ///
    /// Any other result resets the count.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`.
    ///
    /// [`WaitStatus::TIMEOUT`]: crate::WaitStatus::TIMEOUT
    pub fn max_timeouts(mut self, n: usize) -> Self {
        assert!(n > 0, "max_timeouts must be > 0");

        self.max_timeouts = Some(n);
        self
    }

    /// Builds a driver using the current platform's primitive.
    pub fn build(self) -> Driver {
        self.build_with(Poller::default())
    }

    /// Builds a driver using `poller`.
    pub fn build_with<P: PollPrimitive>(self, poller: P) -> Driver<P> {
        Driver {
            waiter: ReadinessWaiter::with_poller(poller),
            max_timeouts: self.max_timeouts,
        }
    }
}

impl Default for DriverBuilder {
    fn default() -> Self {
        Self::new()
    }
}
