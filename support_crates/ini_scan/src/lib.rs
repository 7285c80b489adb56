//! A library for looking up values in ini documents without allocating
//!
//! ## Format
//! ```text
//! ; a comment
//! global = value before any section
//!
//! [SectionName]
//! key = value
//! # another comment
//! ```
//! - Lines end with `\n`, `\r`, `\r\n` or `\n\r`.
//! - Lines whose first non-whitespace character is `;` or `#` are comments. Both characters are
//!   ordinary text anywhere else, so `key = a ; b` has the value `a ; b`.
//! - Section and key names as well as values have surrounding whitespace removed.
//! - If a section appears more than once, only its first occurrence is searched.
//! - A lookup in a section only sees the keys between that section's header and the next one.
//!   A lookup without a section returns the first occurrence of the key anywhere in the document.
//!
//! ## Memory usage
//! The document is read from a [`Store`] one line at a time into a buffer provided by the caller.
//! A line may be at most `buf.len() - 2` bytes long, longer lines fail with
//! [`ReadLineError::BufferTooSmall`] rather than being truncated. [`IniFile::validate`] checks a
//! whole document against a buffer size up front.
//!
//! Lookups can either run to completion ([`IniFile::get_value`] and the typed getters) or be
//! advanced one line at a time with [`IniFile::get_value_step`] and a caller owned [`ScanState`].
//!
//! # Example
//!
//! ```rust
//! # use ini_scan::{IniFile, SliceStore};
//! let doc = b"[network]\ntimeout = 30\nenabled = yes\n";
//! let mut ini = IniFile::new(SliceStore::new(doc));
//! let mut buf = [0u8; 64];
//! assert_eq!(ini.get_value(Some("network"), "timeout", &mut buf), Ok(&b"30"[..]));
//! assert_eq!(ini.get_int(Some("network"), "timeout", &mut buf), Ok(30));
//! assert_eq!(ini.get_bool(Some("network"), "enabled", &mut buf), Ok(true));
//! ```
#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

mod classify;
mod convert;
mod error;
mod ini_file;
mod key;
mod line;
mod section;
mod state;
mod store;


pub use convert::{copy_value, parse_value, ConversionError, FromIniValue};
pub use error::{LookupError, ReadLineError, ValueError};
pub use ini_file::{IniConfig, IniFile};
pub use line::{read_line, LineRead, MIN_LINE_BUFFER};
pub use state::{Phase, ScanState};
#[cfg(feature = "std")]
pub use store::IoStore;
pub use store::{SliceStore, Store};
