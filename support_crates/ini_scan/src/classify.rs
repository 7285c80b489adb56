//! Classification of single ini lines
//!
//! All positions are byte ranges into the line so that callers can refer back into their own
//! buffer instead of copying text around.

use core::ops::Range;
use memchr::memchr;

/// What a single line of an ini document contains
#[derive(Debug, Eq, PartialEq, Clone)]
pub(crate) enum LineKind {
    /// Nothing but whitespace
    Blank,
    /// A line whose first non-whitespace character is `;` or `#`
    Comment,
    /// A line starting with `[`.
    ///
    /// `name` holds the trimmed text up to the first `]` or `None` if the bracket is never closed.
    SectionHeader { name: Option<Range<usize>> },
    /// A line containing a `=`, split at the first one and with both sides trimmed
    KeyValue {
        key: Range<usize>,
        value: Range<usize>,
    },
    /// Anything else
    Other,
}

pub(crate) fn is_comment_char(c: u8) -> bool {
    c == b';' || c == b'#'
}

/// Narrow `range` so that it neither starts nor ends with ASCII whitespace
pub(crate) fn trim_range(line: &[u8], mut range: Range<usize>) -> Range<usize> {
    while range.start < range.end && line[range.start].is_ascii_whitespace() {
        range.start += 1;
    }
    while range.end > range.start && line[range.end - 1].is_ascii_whitespace() {
        range.end -= 1;
    }
    range
}

/// Remove leading and trailing ASCII whitespace
pub(crate) fn trim(text: &[u8]) -> &[u8] {
    &text[trim_range(text, 0..text.len())]
}

/// Compare two names either byte-by-byte or ignoring ASCII case
pub(crate) fn names_equal(a: &[u8], b: &[u8], case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a.eq_ignore_ascii_case(b)
    }
}

pub(crate) fn classify(line: &[u8]) -> LineKind {
    let content = trim_range(line, 0..line.len());
    if content.is_empty() {
        return LineKind::Blank;
    }

    let first = line[content.start];

    if is_comment_char(first) {
        return LineKind::Comment;
    }

    if first == b'[' {
        let inner_start = content.start + 1;
        let name = memchr(b']', &line[inner_start..content.end])
            .map(|i| trim_range(line, inner_start..inner_start + i));
        return LineKind::SectionHeader { name };
    }

    match memchr(b'=', &line[content.clone()]) {
        Some(i) => {
            let eq = content.start + i;
            LineKind::KeyValue {
                key: trim_range(line, content.start..eq),
                value: trim_range(line, eq + 1..content.end),
            }
        }
        None => LineKind::Other,
    }
}
