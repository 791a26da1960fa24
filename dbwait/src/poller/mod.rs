//! Platform-specific readiness primitives.
//!
//! This module provides a unified interface over the operating system's
//! single-socket wait primitive:
//! - `poll(2)` on Unix targets,
//! - Winsock `select` on Windows.
//!
//! The concrete implementation is selected at compile time and exposed as
//! [`Poller`]. Everything above this module talks to [`PollPrimitive`] only.

mod common;

pub use common::{Interest, PollPrimitive, Readiness};

#[cfg(unix)]
mod unix;

#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub type Poller = unix::PollPoller;

#[cfg(windows)]
pub type Poller = windows::SelectPoller;

/// Raw socket descriptor type of the current platform.
#[cfg(unix)]
pub type RawSocket = std::os::fd::RawFd;

/// Raw socket descriptor type of the current platform.
#[cfg(windows)]
pub type RawSocket = std::os::windows::io::RawSocket;
