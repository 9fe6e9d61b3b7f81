//! Bounded line capture from an input stream.
//!
//! One call captures one logical line into a caller-supplied fixed buffer,
//! reserving the final byte for a NUL terminator. A line that does not fit
//! is truncated, and the unread remainder is drained so the next call starts
//! cleanly at the following line.

use std::io::{BufRead, ErrorKind};

use crate::diag::{self, UtilError};

const OP: &str = "read_line";

/// Reads one line from `reader` into `buf`.
///
/// `buf` is zero-filled first. At most `buf.len() - 1` bytes of the line are
/// stored (the final byte stays a NUL terminator). A trailing newline is
/// stripped. If the line was longer than the buffer could hold, the rest of
/// it is read and discarded, up to and including the next newline or end of
/// stream, so the stream is left positioned at the next line; the caller
/// keeps the truncated prefix. A `\r` before the newline is not touched.
///
/// Returns the number of line bytes stored.
///
/// # Errors
///
/// [`UtilError::InvalidArgument`] when `buf` is empty (its contents are
/// undefined on this path); [`UtilError::EndOfInput`] when the stream ends
/// before any byte could be read.
pub fn read_line_from<R: BufRead>(reader: &mut R, buf: &mut [u8]) -> Result<usize, UtilError> {
    if buf.is_empty() {
        return Err(diag::fail(OP, UtilError::InvalidArgument));
    }
    buf.fill(0);

    let usable = buf.len() - 1;
    let mut stored = 0usize;
    let mut saw_newline = false;
    let mut saw_any = false;

    loop {
        let used = {
            let chunk = match reader.fill_buf() {
                Ok(chunk) => chunk,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(_) => break,
            };
            if chunk.is_empty() {
                break;
            }
            saw_any = true;

            let take = chunk.len().min(usable - stored);
            match chunk[..take].iter().position(|&b| b == b'\n') {
                Some(pos) => {
                    buf[stored..=stored + pos].copy_from_slice(&chunk[..=pos]);
                    stored += pos + 1;
                    saw_newline = true;
                    pos + 1
                }
                None => {
                    buf[stored..stored + take].copy_from_slice(&chunk[..take]);
                    stored += take;
                    take
                }
            }
        };
        reader.consume(used);
        if saw_newline || stored == usable {
            break;
        }
    }

    if !saw_any {
        return Err(diag::fail(OP, UtilError::EndOfInput));
    }

    if saw_newline {
        // Strip the trailing newline.
        stored -= 1;
        buf[stored] = 0;
    } else {
        drain_line(reader);
    }

    Ok(stored)
}

/// Reads one line from standard input into `buf`.
///
/// Blocks until a full line or end of stream arrives; this is the only
/// suspension point in the crate and it is not cancellable.
///
/// # Errors
///
/// Same contract as [`read_line_from`].
pub fn read_line(buf: &mut [u8]) -> Result<usize, UtilError> {
    let stdin = std::io::stdin();
    let mut lock = stdin.lock();
    read_line_from(&mut lock, buf)
}

/// Discards input up to and including the next newline or end of stream.
fn drain_line<R: BufRead>(reader: &mut R) {
    loop {
        let (used, done) = {
            let chunk = match reader.fill_buf() {
                Ok(chunk) => chunk,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(_) => return,
            };
            if chunk.is_empty() {
                return;
            }
            match chunk.iter().position(|&b| b == b'\n') {
                Some(pos) => (pos + 1, true),
                None => (chunk.len(), false),
            }
        };
        reader.consume(used);
        if done {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::{ErrorCode, last_failure};
    use std::io::Cursor;

    #[test]
    fn test_read_line_strips_newline() {
        let mut input = Cursor::new(&b"hello\n"[..]);
        let mut buf = [0xFFu8; 10];
        assert_eq!(read_line_from(&mut input, &mut buf), Ok(5));
        assert_eq!(&buf[..6], b"hello\0");
    }

    #[test]
    fn test_read_line_zero_fills_buffer() {
        let mut input = Cursor::new(&b"hi\n"[..]);
        let mut buf = [0xFFu8; 8];
        assert_eq!(read_line_from(&mut input, &mut buf), Ok(2));
        assert_eq!(&buf, b"hi\0\0\0\0\0\0");
    }

    #[test]
    fn test_read_line_without_trailing_newline() {
        let mut input = Cursor::new(&b"hello"[..]);
        let mut buf = [0u8; 10];
        assert_eq!(read_line_from(&mut input, &mut buf), Ok(5));
        assert_eq!(&buf[..6], b"hello\0");
    }

    #[test]
    fn test_read_line_truncates_and_drains() {
        let mut input = Cursor::new(&b"0123456789abcdef\nnext\n"[..]);
        let mut buf = [0u8; 8];
        assert_eq!(read_line_from(&mut input, &mut buf), Ok(7));
        assert_eq!(&buf, b"0123456\0");
        // The overlong line was drained: the next call starts at "next".
        assert_eq!(read_line_from(&mut input, &mut buf), Ok(4));
        assert_eq!(&buf[..5], b"next\0");
    }

    #[test]
    fn test_read_line_newline_on_last_usable_byte() {
        // The newline lands exactly on the last usable byte: stripped, no
        // draining, the next line is intact.
        let mut input = Cursor::new(&b"abcd\nefgh\n"[..]);
        let mut buf = [0u8; 6];
        assert_eq!(read_line_from(&mut input, &mut buf), Ok(4));
        assert_eq!(&buf[..5], b"abcd\0");
        assert_eq!(read_line_from(&mut input, &mut buf), Ok(4));
        assert_eq!(&buf[..5], b"efgh\0");
    }

    #[test]
    fn test_read_line_exact_fit_drains_only_newline() {
        // "abcde" fills the usable window; the newline is consumed by the
        // drain, leaving the next line intact.
        let mut input = Cursor::new(&b"abcde\nxy\n"[..]);
        let mut buf = [0u8; 6];
        assert_eq!(read_line_from(&mut input, &mut buf), Ok(5));
        assert_eq!(&buf, b"abcde\0");
        assert_eq!(read_line_from(&mut input, &mut buf), Ok(2));
        assert_eq!(&buf[..3], b"xy\0");
    }

    #[test]
    fn test_read_line_keeps_carriage_return() {
        let mut input = Cursor::new(&b"hello\r\n"[..]);
        let mut buf = [0u8; 10];
        assert_eq!(read_line_from(&mut input, &mut buf), Ok(6));
        assert_eq!(&buf[..7], b"hello\r\0");
    }

    #[test]
    fn test_read_line_empty_line() {
        let mut input = Cursor::new(&b"\nrest\n"[..]);
        let mut buf = [0u8; 4];
        assert_eq!(read_line_from(&mut input, &mut buf), Ok(0));
        assert_eq!(buf[0], 0);
    }

    #[test]
    fn test_read_line_end_of_input() {
        let mut input = Cursor::new(&b""[..]);
        let mut buf = [0u8; 4];
        assert_eq!(
            read_line_from(&mut input, &mut buf),
            Err(UtilError::EndOfInput)
        );
        let failure = last_failure().unwrap();
        assert_eq!(failure.op, "read_line");
        assert_eq!(failure.code, ErrorCode::EndOfInput);
    }

    #[test]
    fn test_read_line_empty_buffer_rejected() {
        let mut input = Cursor::new(&b"hello\n"[..]);
        let mut buf = [0u8; 0];
        assert_eq!(
            read_line_from(&mut input, &mut buf),
            Err(UtilError::InvalidArgument)
        );
        assert_eq!(last_failure().unwrap().op, "read_line");
    }

    #[test]
    fn test_read_line_capacity_one_discards_line() {
        // No room for payload: the caller gets an empty line and the stream
        // still advances past it.
        let mut input = Cursor::new(&b"skipped\nkept\n"[..]);
        let mut buf = [0u8; 1];
        assert_eq!(read_line_from(&mut input, &mut buf), Ok(0));
        let mut buf2 = [0u8; 8];
        assert_eq!(read_line_from(&mut input, &mut buf2), Ok(4));
        assert_eq!(&buf2[..5], b"kept\0");
    }
}
