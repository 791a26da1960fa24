use bitflags::bitflags;

use std::ffi::c_int;
use std::fmt;

bitflags! {
    /// The wait status vocabulary shared with the database client library.
    ///
    /// The same set is used in both directions:
    /// - as a request, it names the conditions an asynchronous client call
    ///   is blocked on, and whether the connection's timeout applies;
    /// - as a result, it names the conditions that were observed.
    ///   `TIMEOUT` alone means nothing became ready in time.
    ///
    /// Bit values match the client library's `MYSQL_WAIT_*` constants, so
    /// raw statuses can be passed through [`WaitStatus::from_raw`] and
    /// [`WaitStatus::to_raw`] unchanged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WaitStatus: u32 {
        /// Socket is readable.
        const READ = 1;
        /// Socket is writable.
        const WRITE = 2;
        /// Socket has an exceptional condition (out-of-band data).
        const EXCEPT = 4;
        /// Bounded by the connection timeout / deadline elapsed.
        const TIMEOUT = 8;
    }
}

impl WaitStatus {
    /// Builds a status from the client library's raw `int` form.
    ///
    /// Bits outside the four known flags are dropped.
    pub fn from_raw(raw: c_int) -> Self {
        Self::from_bits_truncate(raw as u32)
    }

    /// Returns the raw `int` form expected by the client library.
    pub fn to_raw(self) -> c_int {
        self.bits() as c_int
    }

    /// Returns `true` if this is exactly the timeout outcome.
    pub fn is_timeout(self) -> bool {
        self == Self::TIMEOUT
    }
}

impl fmt::Display for WaitStatus {
    /// Renders the set flags joined by `|`, or `NULL` when empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NULL");
        }

        let mut first = true;
        for (name, _) in self.iter_names() {
            if !first {
                f.write_str("|")?;
            }
            f.write_str(name)?;
            first = false;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::WaitStatus;

    #[test]
    fn test_raw_values_match_client_library() {
        assert_eq!(WaitStatus::READ.to_raw(), 1);
        assert_eq!(WaitStatus::WRITE.to_raw(), 2);
        assert_eq!(WaitStatus::EXCEPT.to_raw(), 4);
        assert_eq!(WaitStatus::TIMEOUT.to_raw(), 8);
    }

    #[test]
    fn test_from_raw_drops_unknown_bits() {
        let status = WaitStatus::from_raw(0x10 | 0x1 | 0x8);
        assert_eq!(status, WaitStatus::READ | WaitStatus::TIMEOUT);
    }

    #[test]
    fn test_display() {
        assert_eq!(WaitStatus::empty().to_string(), "NULL");
        assert_eq!(WaitStatus::READ.to_string(), "READ");
        assert_eq!(
            (WaitStatus::TIMEOUT | WaitStatus::READ | WaitStatus::EXCEPT).to_string(),
            "READ|EXCEPT|TIMEOUT"
        );
    }

    #[test]
    fn test_is_timeout_only_when_alone() {
        assert!(WaitStatus::TIMEOUT.is_timeout());
        assert!(!(WaitStatus::TIMEOUT | WaitStatus::READ).is_timeout());
        assert!(!WaitStatus::empty().is_timeout());
    }
}
