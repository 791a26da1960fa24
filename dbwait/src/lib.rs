//! # dbwait
//!
//! **dbwait** blocks the calling thread on a database client connection's
//! socket until the client library's pending non-blocking operation can make
//! progress, or until the library's timeout elapses.
//!
//! Non-blocking MariaDB / MySQL client calls return a bitmask saying what they
//! are waiting for: readable, writable, an exceptional condition, and whether
//! the connection's timeout applies. This crate turns that bitmask into a
//! single-socket OS wait and turns the result back into the same vocabulary:
//!
//! - `poll(2)` on Unix targets,
//! - Winsock `select` on Windows.
//!
//! The backend is chosen at compile time. Waits are synchronous: there is no
//! runtime, no cancellation, and no state kept between calls.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dbwait::{SocketConnection, WaitStatus};
//!
//! let conn = SocketConnection::new(&stream, 5);
//!
//! let mut status = client.query_start(sql);
//! while !status.is_empty() {
//!     status = dbwait::wait(&conn, status);
//!     status = client.query_cont(status);
//! }
//! ```
//!
//! The same loop is available as [`Driver::run`] for types implementing
//! [`AsyncOperation`].
//!
//! ## Timeouts and errors
//!
//! A wait never fails. A deadline expiry and a failure of the OS primitive
//! both come back as exactly [`WaitStatus::TIMEOUT`]; the calling loop decides
//! when to give up.
//!
//! ## Modules
//!
//! - [`poller`]: the platform readiness primitives behind [`PollPrimitive`]

mod connection;
mod driver;
mod status;
mod waiter;

pub mod poller;

pub use connection::{Connection, SocketConnection};
pub use driver::{AsyncOperation, Driver, DriverBuilder};
pub use poller::{PollPrimitive, RawSocket};
pub use status::WaitStatus;
pub use waiter::{ReadinessWaiter, wait};
