//! The byte store that holds an ini document
//!
//! The scanner never owns the document itself. It only needs to reposition a read cursor and to
//! copy bytes from that cursor into a caller provided buffer, which is what the [`Store`] trait
//! describes.

/// A seekable, byte addressable medium holding an ini document.
pub trait Store {
    /// Move the read cursor to `offset` bytes from the start of the store.
    ///
    /// Returns `false` if the cursor could not be moved there (e.g. because `offset` lies beyond
    /// the end of the store).
    fn seek(&mut self, offset: u64) -> bool;

    /// Read up to `buf.len()` bytes starting at the current cursor and advance the cursor
    /// accordingly.
    ///
    /// Returns the number of bytes that were read. `0` denotes the end of the store.
    fn read(&mut self, buf: &mut [u8]) -> usize;
}

impl<S: Store + ?Sized> Store for &mut S {
    fn seek(&mut self, offset: u64) -> bool {
        (**self).seek(offset)
    }

    fn read(&mut self, buf: &mut [u8]) -> usize {
        (**self).read(buf)
    }
}

/// A [`Store`] backed by an in-memory byte slice
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SliceStore<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceStore<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// The complete underlying document
    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

impl Store for SliceStore<'_> {
    fn seek(&mut self, offset: u64) -> bool {
        match usize::try_from(offset) {
            Ok(offset) if offset <= self.data.len() => {
                self.pos = offset;
                true
            }
            _ => false,
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> usize {
        let remaining = &self.data[self.pos..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        n
    }
}

#[cfg(any(test, feature = "std"))]
pub use io_store::IoStore;

#[cfg(any(test, feature = "std"))]
mod io_store {
    use super::Store;
    use log::warn;
    use std::io::{ErrorKind, Read, Seek, SeekFrom};

    /// A [`Store`] that reads from anything implementing [`Read`] and [`Seek`], e.g. a
    /// [`std::fs::File`]
    #[derive(Debug)]
    pub struct IoStore<T> {
        inner: T,
    }

    impl<T: Read + Seek> IoStore<T> {
        pub fn new(inner: T) -> Self {
            Self { inner }
        }

        pub fn into_inner(self) -> T {
            self.inner
        }
    }

    impl<T: Read + Seek> Store for IoStore<T> {
        fn seek(&mut self, offset: u64) -> bool {
            self.inner.seek(SeekFrom::Start(offset)).is_ok()
        }

        fn read(&mut self, buf: &mut [u8]) -> usize {
            loop {
                match self.inner.read(buf) {
                    Ok(n) => return n,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => {
                        warn!(
                            "reading from the underlying store failed, the running lookup will \
                             report the section or key as missing: {e}"
                        );
                        return 0;
                    }
                }
            }
        }
    }
}
