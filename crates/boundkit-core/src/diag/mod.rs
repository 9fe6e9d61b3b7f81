//! Failure diagnostics: error taxonomy plus the last-failure slot.
//!
//! Reporting follows errno conventions. Each fallible operation returns an
//! explicit [`UtilError`]; in addition, the failure path records the
//! operation's name and an errno-aligned code in a thread-local slot so a
//! caller can ask "what failed last?" after the fact. Successful calls never
//! touch the slot.

use std::cell::Cell;

use thiserror::Error;

/// Invalid argument (errno-aligned).
pub const EINVAL: i32 = 22;
/// Cannot allocate memory (errno-aligned).
pub const ENOMEM: i32 = 12;
/// No data available (errno-aligned).
pub const ENODATA: i32 = 61;

/// errno-aligned code recorded alongside the failing operation's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidArgument,
    OutOfMemory,
    EndOfInput,
}

impl ErrorCode {
    /// The errno value C callers expect for this code.
    #[must_use]
    pub const fn as_errno(self) -> i32 {
        match self {
            Self::InvalidArgument => EINVAL,
            Self::OutOfMemory => ENOMEM,
            Self::EndOfInput => ENODATA,
        }
    }
}

/// Error returned by the fallible boundkit operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UtilError {
    /// A buffer argument was empty or a byte cap was zero.
    #[error("invalid argument: empty buffer or zero byte cap")]
    InvalidArgument,
    /// The requested allocation could not be satisfied.
    #[error("out of memory")]
    OutOfMemory,
    /// The input stream ended before any byte could be read.
    #[error("end of input")]
    EndOfInput,
}

impl UtilError {
    /// The errno-aligned code for this error.
    #[must_use]
    pub const fn code(self) -> ErrorCode {
        match self {
            Self::InvalidArgument => ErrorCode::InvalidArgument,
            Self::OutOfMemory => ErrorCode::OutOfMemory,
            Self::EndOfInput => ErrorCode::EndOfInput,
        }
    }
}

/// A recorded failure: which operation failed, and with what code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Failure {
    /// Name of the failing operation (`"scan_length"`, `"duplicate"`,
    /// `"read_line"`).
    pub op: &'static str,
    /// errno-aligned code of the failure.
    pub code: ErrorCode,
}

thread_local! {
    static LAST_FAILURE: Cell<Option<Failure>> = const { Cell::new(None) };
}

/// Returns the most recent failure recorded on this thread, if any.
///
/// Only failing calls write the slot; successful calls never clear it, so a
/// stale entry can outlive later successes. Check each call's `Result` first
/// and consult this only after observing a failure.
#[must_use]
pub fn last_failure() -> Option<Failure> {
    LAST_FAILURE.get()
}

/// Records `op` as the last failing operation and hands `err` back for the
/// failing return.
pub(crate) fn fail(op: &'static str, err: UtilError) -> UtilError {
    LAST_FAILURE.set(Some(Failure {
        op,
        code: err.code(),
    }));
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_records_op_and_code() {
        let err = fail("scan_length", UtilError::InvalidArgument);
        assert_eq!(err, UtilError::InvalidArgument);
        let failure = last_failure().unwrap();
        assert_eq!(failure.op, "scan_length");
        assert_eq!(failure.code, ErrorCode::InvalidArgument);
    }

    #[test]
    fn test_slot_overwritten_by_newer_failure() {
        let _ = fail("scan_length", UtilError::InvalidArgument);
        let _ = fail("duplicate", UtilError::OutOfMemory);
        let failure = last_failure().unwrap();
        assert_eq!(failure.op, "duplicate");
        assert_eq!(failure.code, ErrorCode::OutOfMemory);
    }

    #[test]
    fn test_success_does_not_clear_slot() {
        let _ = fail("read_line", UtilError::EndOfInput);
        // A successful operation between failures leaves the slot stale.
        assert_eq!(crate::string::scan_length(b"ok\0", 8), Ok(2));
        let failure = last_failure().unwrap();
        assert_eq!(failure.op, "read_line");
        assert_eq!(failure.code, ErrorCode::EndOfInput);
    }

    #[test]
    fn test_errno_mapping() {
        assert_eq!(ErrorCode::InvalidArgument.as_errno(), EINVAL);
        assert_eq!(ErrorCode::OutOfMemory.as_errno(), ENOMEM);
        assert_eq!(ErrorCode::EndOfInput.as_errno(), ENODATA);
        assert_eq!(UtilError::OutOfMemory.code(), ErrorCode::OutOfMemory);
    }
}
