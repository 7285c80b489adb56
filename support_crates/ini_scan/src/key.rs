//! Scanning for a key inside the current section (or the whole document)

use crate::classify::{classify, names_equal, LineKind};
use crate::error::LookupError;
use crate::line::{read_line, LineRead};
use crate::state::ScanState;
use crate::store::Store;
use core::ops::Range;
use core::task::Poll;
use log::{debug, trace};

/// Examine the next line of the document and check whether it assigns `key`.
///
/// If the lookup is `scoped` to a section, the search ends with [`LookupError::KeyNotFound`] at the
/// next section header since keys only belong to the section they appear in. Unscoped lookups
/// skip over headers and search the whole document. On success the returned range locates the
/// trimmed value inside `buf`.
pub(crate) fn locate_key<S: Store + ?Sized>(
    store: &mut S,
    buf: &mut [u8],
    key: &str,
    scoped: bool,
    case_sensitive: bool,
    state: &mut ScanState,
) -> Poll<Result<Range<usize>, LookupError>> {
    if key.is_empty() {
        return Poll::Ready(Err(LookupError::KeyNotFound));
    }

    let offset = state.resume_offset;
    let len = match read_line(store, buf, offset) {
        Err(e) => return Poll::Ready(Err(e.into())),
        Ok(LineRead::EndOfStream) => {
            debug!("key {key} does not exist");
            return Poll::Ready(Err(LookupError::KeyNotFound));
        }
        Ok(LineRead::Line { len, next_offset }) => {
            state.resume_offset = next_offset;
            len
        }
    };

    let line = &buf[..len];
    match classify(line) {
        LineKind::SectionHeader { .. } if scoped => {
            debug!("key {key} does not exist, next section starts at offset {offset}");
            Poll::Ready(Err(LookupError::KeyNotFound))
        }
        LineKind::KeyValue { key: name, value }
            if names_equal(&line[name.clone()], key.as_bytes(), case_sensitive) =>
        {
            debug!("found key {key} at offset {offset}");
            Poll::Ready(Ok(value))
        }
        kind => {
            trace!("skipping {kind:?} line at offset {offset} while looking for key {key}");
            Poll::Pending
        }
    }
}
