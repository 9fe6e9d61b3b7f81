//! ABI layer for bounded line capture from standard input.
//!
//! Reads fd 0 one byte at a time: without a persistent stream buffer this
//! is the only way to stop consuming exactly at the newline, so the next
//! call starts at the next line.

use std::ffi::c_char;
use std::io::{Error, ErrorKind};

use boundkit_core::diag::{EINVAL, ENODATA};

use crate::diag_abi::record_failure;

/// Reads one byte from fd 0, retrying on EINTR. `None` means end of stream
/// or a read error.
fn read_byte() -> Option<u8> {
    let mut byte = [0u8; 1];
    loop {
        let rc = unsafe { libc::read(libc::STDIN_FILENO, byte.as_mut_ptr().cast(), 1) };
        if rc == 1 {
            return Some(byte[0]);
        }
        if rc < 0 && Error::last_os_error().kind() == ErrorKind::Interrupted {
            continue;
        }
        return None;
    }
}

/// Reads one line from standard input into `buf`.
///
/// `buf` is zero-filled across `capacity` bytes first. At most
/// `capacity - 1` bytes of the line are stored (the final byte stays a NUL
/// terminator). A trailing newline is stripped. If the line was longer than
/// the buffer could hold, the remainder is read and discarded, up to and
/// including the next newline or end of stream, so a subsequent call starts
/// cleanly at the next line.
///
/// Blocks until a line or end of stream arrives. Returns `buf` on success;
/// null with errno `EINVAL` when `buf` is null or `capacity` is zero
/// (buffer contents undefined on that path); null with errno `ENODATA` at
/// immediate end of stream.
///
/// # Safety
///
/// A non-null `buf` must be valid for writes of `capacity` bytes.
#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn bk_read_line(buf: *mut c_char, capacity: usize) -> *mut c_char {
    if buf.is_null() || capacity == 0 {
        record_failure(c"bk_read_line", EINVAL);
        return std::ptr::null_mut();
    }

    unsafe { std::ptr::write_bytes(buf, 0, capacity) };

    let usable = capacity - 1;
    let mut stored = 0usize;
    let mut saw_newline = false;
    let mut saw_any = false;

    // One loop covers capture and overflow draining: once the usable window
    // is full, bytes are consumed but no longer stored.
    loop {
        let Some(byte) = read_byte() else { break };
        saw_any = true;
        if stored < usable {
            unsafe { *buf.add(stored) = byte as c_char };
            stored += 1;
            if byte == b'\n' {
                saw_newline = true;
                break;
            }
        } else if byte == b'\n' {
            break;
        }
    }

    if !saw_any {
        record_failure(c"bk_read_line", ENODATA);
        return std::ptr::null_mut();
    }

    if saw_newline {
        // Strip the trailing newline.
        unsafe { *buf.add(stored - 1) = 0 };
    }
    buf
}
