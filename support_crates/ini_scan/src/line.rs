//! Reading single lines from a [`Store`]
//!
//! A line ends at the first `\n` or `\r`. If that terminator is directly followed by the other
//! kind of terminator, both are consumed so that `\r\n` and `\n\r` each count as a single line
//! break while `\n\n` still produces an empty line.

use crate::error::ReadLineError;
use crate::store::Store;
use memchr::memchr2;

/// The smallest buffer usable for reading lines: one character, a terminator and one byte of
/// lookahead
pub const MIN_LINE_BUFFER: usize = 3;

/// The result of successfully reading from a store
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum LineRead {
    /// A line was read into the first `len` bytes of the buffer (without its terminator) and the
    /// next line starts at `next_offset`
    Line { len: usize, next_offset: u64 },
    /// There are no more lines
    EndOfStream,
}

/// Read the line starting at `offset` into `buf`.
///
/// The whole buffer is used as scratch space but only the reported number of bytes belong to the
/// line. A line must leave room for its terminator and one byte of lookahead, so at most
/// `buf.len() - 2` characters fit. Longer lines fail with [`ReadLineError::BufferTooSmall`]
/// instead of being truncated.
pub fn read_line<S: Store + ?Sized>(
    store: &mut S,
    buf: &mut [u8],
    offset: u64,
) -> Result<LineRead, ReadLineError> {
    if buf.len() < MIN_LINE_BUFFER {
        return Err(ReadLineError::BufferTooSmall);
    }
    if !store.seek(offset) {
        return Err(ReadLineError::SeekFailed);
    }

    let bytes_read = fill(store, buf);
    if bytes_read == 0 {
        return Ok(LineRead::EndOfStream);
    }

    let searchable = bytes_read.min(buf.len() - 1);
    match memchr2(b'\n', b'\r', &buf[..searchable]) {
        Some(i) => {
            let other = if buf[i] == b'\n' { b'\r' } else { b'\n' };
            let consumed = if i + 1 < bytes_read && buf[i + 1] == other {
                i + 2
            } else {
                i + 1
            };
            Ok(LineRead::Line {
                len: i,
                next_offset: offset + consumed as u64,
            })
        }
        // the store ended without a final line break
        None if bytes_read < buf.len() - 1 => Ok(LineRead::Line {
            len: bytes_read,
            next_offset: offset + bytes_read as u64,
        }),
        None => Err(ReadLineError::BufferTooSmall),
    }
}

/// Read from the store until `buf` is full or the store is exhausted
fn fill<S: Store + ?Sized>(store: &mut S, buf: &mut [u8]) -> usize {
    let mut total = 0;
    while total < buf.len() {
        match store.read(&mut buf[total..]) {
            0 => break,
            n => total += n,
        }
    }
    total
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::store::SliceStore;

    /// A store that hands out at most one byte per read
    struct TrickleStore<'a>(SliceStore<'a>);

    impl Store for TrickleStore<'_> {
        fn seek(&mut self, offset: u64) -> bool {
            self.0.seek(offset)
        }

        fn read(&mut self, buf: &mut [u8]) -> usize {
            let len = buf.len().min(1);
            self.0.read(&mut buf[..len])
        }
    }

    struct UnseekableStore;

    impl Store for UnseekableStore {
        fn seek(&mut self, _offset: u64) -> bool {
            false
        }

        fn read(&mut self, _buf: &mut [u8]) -> usize {
            0
        }
    }

    fn read_all(doc: &[u8], buf: &mut [u8], lines: &mut [[u8; 16]; 4]) -> usize {
        let mut store = SliceStore::new(doc);
        let mut offset = 0;
        let mut count = 0;
        while let LineRead::Line { len, next_offset } = read_line(&mut store, buf, offset).unwrap()
        {
            lines[count][..len].copy_from_slice(&buf[..len]);
            offset = next_offset;
            count += 1;
        }
        count
    }

    #[test]
    fn reads_lf_terminated_line() {
        let mut store = SliceStore::new(b"abc\ndef\n");
        let mut buf = [0u8; 16];
        assert_eq!(
            read_line(&mut store, &mut buf, 0),
            Ok(LineRead::Line {
                len: 3,
                next_offset: 4
            })
        );
        assert_eq!(&buf[..3], b"abc");
    }

    #[test]
    fn consumes_crlf_and_lfcr_as_single_break() {
        let mut buf = [0u8; 16];
        for doc in [&b"abc\r\ndef"[..], b"abc\n\rdef"] {
            let mut store = SliceStore::new(doc);
            assert_eq!(
                read_line(&mut store, &mut buf, 0),
                Ok(LineRead::Line {
                    len: 3,
                    next_offset: 5
                })
            );
        }
    }

    #[test]
    fn lone_cr_terminates_line() {
        let mut store = SliceStore::new(b"abc\rdef");
        let mut buf = [0u8; 16];
        assert_eq!(
            read_line(&mut store, &mut buf, 0),
            Ok(LineRead::Line {
                len: 3,
                next_offset: 4
            })
        );
    }

    #[test]
    fn repeated_terminator_produces_empty_line() {
        let mut store = SliceStore::new(b"a\n\nb\r\rc");
        let mut buf = [0u8; 16];
        assert_eq!(
            read_line(&mut store, &mut buf, 0),
            Ok(LineRead::Line {
                len: 1,
                next_offset: 2
            })
        );
        assert_eq!(
            read_line(&mut store, &mut buf, 2),
            Ok(LineRead::Line {
                len: 0,
                next_offset: 3
            })
        );
        assert_eq!(
            read_line(&mut store, &mut buf, 3),
            Ok(LineRead::Line {
                len: 1,
                next_offset: 5
            })
        );
        assert_eq!(
            read_line(&mut store, &mut buf, 5),
            Ok(LineRead::Line {
                len: 0,
                next_offset: 6
            })
        );
    }

    #[test]
    fn end_of_stream_at_end() {
        let mut store = SliceStore::new(b"abc\n");
        let mut buf = [0u8; 16];
        assert_eq!(
            read_line(&mut store, &mut buf, 4),
            Ok(LineRead::EndOfStream)
        );
    }

    #[test]
    fn empty_store_is_end_of_stream() {
        let mut store = SliceStore::new(b"");
        let mut buf = [0u8; 16];
        assert_eq!(
            read_line(&mut store, &mut buf, 0),
            Ok(LineRead::EndOfStream)
        );
    }

    #[test]
    fn final_line_without_terminator_is_read() {
        let mut store = SliceStore::new(b"abc\nlast");
        let mut buf = [0u8; 16];
        assert_eq!(
            read_line(&mut store, &mut buf, 4),
            Ok(LineRead::Line {
                len: 4,
                next_offset: 8
            })
        );
        assert_eq!(&buf[..4], b"last");
        assert_eq!(
            read_line(&mut store, &mut buf, 8),
            Ok(LineRead::EndOfStream)
        );
    }

    #[test]
    fn line_of_capacity_minus_two_fits() {
        let mut store = SliceStore::new(b"abcdef\nx");
        let mut buf = [0u8; 8];
        assert_eq!(
            read_line(&mut store, &mut buf, 0),
            Ok(LineRead::Line {
                len: 6,
                next_offset: 7
            })
        );
    }

    #[test]
    fn line_of_capacity_minus_one_is_too_long() {
        let mut store = SliceStore::new(b"abcdefg\nx");
        let mut buf = [0u8; 8];
        assert_eq!(
            read_line(&mut store, &mut buf, 0),
            Err(ReadLineError::BufferTooSmall)
        );
    }

    #[test]
    fn unterminated_final_line_of_capacity_minus_one_is_too_long() {
        let mut store = SliceStore::new(b"abcdefg");
        let mut buf = [0u8; 8];
        assert_eq!(
            read_line(&mut store, &mut buf, 0),
            Err(ReadLineError::BufferTooSmall)
        );
    }

    #[test]
    fn tiny_buffer_is_rejected() {
        let mut store = SliceStore::new(b"a\n");
        let mut buf = [0u8; 2];
        assert_eq!(
            read_line(&mut store, &mut buf, 0),
            Err(ReadLineError::BufferTooSmall)
        );
    }

    #[test]
    fn seek_failure_is_reported() {
        let mut buf = [0u8; 8];
        assert_eq!(
            read_line(&mut UnseekableStore, &mut buf, 0),
            Err(ReadLineError::SeekFailed)
        );
    }

    #[test]
    fn short_reads_are_filled_up() {
        let mut store = TrickleStore(SliceStore::new(b"abc\r\ndef"));
        let mut buf = [0u8; 16];
        assert_eq!(
            read_line(&mut store, &mut buf, 0),
            Ok(LineRead::Line {
                len: 3,
                next_offset: 5
            })
        );
    }

    #[test]
    fn line_endings_produce_same_lines() {
        let mut reference = [[0u8; 16]; 4];
        let mut buf = [0u8; 16];
        let count = read_all(b"[a]\nx=1\n\ny=2\n", &mut buf, &mut reference);
        assert_eq!(count, 4);
        for doc in [&b"[a]\rx=1\r\ry=2\r"[..], b"[a]\r\nx=1\r\n\r\ny=2\r\n"] {
            let mut lines = [[0u8; 16]; 4];
            assert_eq!(read_all(doc, &mut buf, &mut lines), count);
            assert_eq!(lines, reference);
        }
    }
}
