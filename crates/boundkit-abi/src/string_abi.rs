//! ABI layer for the bounded string primitives.
//!
//! The duplicator allocates through `libc::malloc` so its results obey C
//! ownership rules: the caller releases them with `free()`.

use std::ffi::c_char;

use boundkit_core::diag::{EINVAL, ENOMEM};

use crate::diag_abi::record_failure;

/// Offset of the first NUL within `limit` bytes of `ptr`, or `limit` if
/// none is found. Never reads past `limit` bytes.
///
/// # Safety
///
/// `ptr` must be valid for reads of `limit` bytes.
unsafe fn scan_raw_len(ptr: *const c_char, limit: usize) -> usize {
    for i in 0..limit {
        if unsafe { *ptr.add(i) } == 0 {
            return i;
        }
    }
    limit
}

/// Length of the string at `s`, scanning at most `max_bytes` bytes.
///
/// Returns the offset of the first NUL, or `max_bytes` if none is found
/// within that window (truncation, not an error). The NUL is not counted.
/// Returns 0 with errno `EINVAL` when `s` is null or `max_bytes` is zero.
///
/// # Safety
///
/// A non-null `s` must be valid for reads of `max_bytes` bytes.
#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn bk_strnlen(s: *const c_char, max_bytes: usize) -> usize {
    if s.is_null() || max_bytes == 0 {
        record_failure(c"bk_strnlen", EINVAL);
        return 0;
    }
    unsafe { scan_raw_len(s, max_bytes) }
}

/// Duplicates at most `max_bytes` bytes of `s` into a freshly `malloc`ed,
/// NUL-terminated buffer of exactly `length + 1` bytes.
///
/// The caller owns the result exclusively and must release it with
/// `free()`. Returns null with errno `EINVAL` on null/zero input, or with
/// errno `ENOMEM` when the allocation fails.
///
/// # Safety
///
/// A non-null `s` must be valid for reads of `max_bytes` bytes.
#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn bk_strndup(s: *const c_char, max_bytes: usize) -> *mut c_char {
    if s.is_null() || max_bytes == 0 {
        record_failure(c"bk_strndup", EINVAL);
        return std::ptr::null_mut();
    }

    let len = unsafe { scan_raw_len(s, max_bytes) };
    let dup = unsafe { libc::malloc(len + 1) }.cast::<c_char>();
    if dup.is_null() {
        record_failure(c"bk_strndup", ENOMEM);
        return std::ptr::null_mut();
    }

    // SAFETY: the scan proved `s` spans `len` readable bytes and `dup`
    // spans `len + 1`.
    unsafe {
        std::ptr::copy_nonoverlapping(s, dup, len);
        *dup.add(len) = 0;
    }
    dup
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn test_strnlen_counts_up_to_nul() {
        let s = c"hello";
        assert_eq!(unsafe { bk_strnlen(s.as_ptr(), 16) }, 5);
    }

    #[test]
    fn test_strnlen_caps_at_max_bytes() {
        let s = c"hello";
        assert_eq!(unsafe { bk_strnlen(s.as_ptr(), 3) }, 3);
    }

    #[test]
    fn test_strnlen_rejects_null_and_zero() {
        assert_eq!(unsafe { bk_strnlen(std::ptr::null(), 8) }, 0);
        assert_eq!(unsafe { *crate::diag_abi::bk_errno_location() }, EINVAL);
        let s = c"x";
        assert_eq!(unsafe { bk_strnlen(s.as_ptr(), 0) }, 0);
    }

    #[test]
    fn test_strndup_roundtrip() {
        let s = c"hello world";
        let dup = unsafe { bk_strndup(s.as_ptr(), 64) };
        assert!(!dup.is_null());
        assert_eq!(unsafe { CStr::from_ptr(dup) }, s);
        unsafe { libc::free(dup.cast()) };
    }

    #[test]
    fn test_strndup_truncates_and_terminates() {
        let s = c"hello";
        let dup = unsafe { bk_strndup(s.as_ptr(), 3) };
        assert!(!dup.is_null());
        assert_eq!(unsafe { CStr::from_ptr(dup) }, c"hel");
        unsafe { libc::free(dup.cast()) };
    }

    #[test]
    fn test_strndup_rejects_invalid_input() {
        assert!(unsafe { bk_strndup(std::ptr::null(), 8) }.is_null());
        let name = unsafe { CStr::from_ptr(crate::diag_abi::bk_errfunc()) };
        assert_eq!(name, c"bk_strndup");
    }
}
