//! Scanning for the header of a named section

use crate::classify::{classify, names_equal, LineKind};
use crate::error::LookupError;
use crate::line::{read_line, LineRead};
use crate::state::ScanState;
use crate::store::Store;
use core::task::Poll;
use log::{debug, trace};

/// Examine the next line of the document and check whether it opens `section`.
///
/// Returns `Poll::Ready(Ok(()))` when the matching header was just read, in which case
/// `state.resume_offset` points at the line following it. Only the first matching header is ever
/// found since the scan never moves backwards.
pub(crate) fn locate_section<S: Store + ?Sized>(
    store: &mut S,
    buf: &mut [u8],
    section: &str,
    case_sensitive: bool,
    state: &mut ScanState,
) -> Poll<Result<(), LookupError>> {
    let offset = state.resume_offset;
    let len = match read_line(store, buf, offset) {
        Err(e) => return Poll::Ready(Err(e.into())),
        Ok(LineRead::EndOfStream) => {
            debug!("section [{section}] does not exist");
            return Poll::Ready(Err(LookupError::SectionNotFound));
        }
        Ok(LineRead::Line { len, next_offset }) => {
            state.resume_offset = next_offset;
            len
        }
    };

    let line = &buf[..len];
    match classify(line) {
        LineKind::SectionHeader { name: Some(name) }
            if names_equal(&line[name.clone()], section.as_bytes(), case_sensitive) =>
        {
            debug!("found section [{section}] at offset {offset}");
            Poll::Ready(Ok(()))
        }
        kind => {
            trace!("skipping {kind:?} line at offset {offset} while looking for section [{section}]");
            Poll::Pending
        }
    }
}
