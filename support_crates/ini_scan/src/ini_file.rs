//! Looking up values in an ini document

use crate::convert::{copy_value, FromIniValue};
use crate::error::{LookupError, ValueError};
use crate::key::locate_key;
use crate::line::{read_line, LineRead};
use crate::section::locate_section;
use crate::state::{Phase, ScanState};
use crate::store::Store;
use core::ops::Range;
use core::task::Poll;
use log::error;

/// Settings that influence how names are matched
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct IniConfig {
    /// Whether section and key names must match exactly (`true`) or only up to ASCII case
    /// (`false`, the default)
    pub case_sensitive: bool,
}

impl Default for IniConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
        }
    }
}

/// An ini document stored in a [`Store`].
///
/// Lookups never allocate. All text is read one line at a time into a buffer supplied by the
/// caller, so the longest line of the document (plus two bytes) bounds the memory needed.
#[derive(Debug)]
pub struct IniFile<S> {
    store: S,
    config: IniConfig,
}

impl<S: Store> IniFile<S> {
    /// Use the document in `store` with the default configuration
    pub fn new(store: S) -> Self {
        Self::with_config(store, IniConfig::default())
    }

    /// Use the document in `store` with an explicit configuration
    pub fn with_config(store: S, config: IniConfig) -> Self {
        Self { store, config }
    }

    /// The configuration currently in effect
    pub fn config(&self) -> IniConfig {
        self.config
    }

    /// Whether section and key names are matched case sensitively
    pub fn case_sensitive(&self) -> bool {
        self.config.case_sensitive
    }

    /// Change how section and key names are matched for all following lookups
    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.config.case_sensitive = case_sensitive;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Give back the underlying store
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Check that every line of the document can be read with `buf`.
    ///
    /// Fails with the first read error, which is usually
    /// [`ReadLineError::BufferTooSmall`](crate::ReadLineError::BufferTooSmall).
    pub fn validate(&mut self, buf: &mut [u8]) -> Result<(), LookupError> {
        let mut offset = 0;
        loop {
            match read_line(&mut self.store, buf, offset)? {
                LineRead::Line { next_offset, .. } => offset = next_offset,
                LineRead::EndOfStream => return Ok(()),
            }
        }
    }

    /// Advance the lookup of `key` in `section` by at most one line.
    ///
    /// `state` must be fresh when a lookup starts and is then passed back unchanged on every
    /// call until this returns `Poll::Ready`, which allows interleaving a lookup with other
    /// work. A `section` of `None` (or `""`) looks for the first occurrence of the key anywhere in
    /// the document.
    ///
    /// On success the returned range locates the trimmed value inside `buf`. It is only valid
    /// until `buf` is used again.
    pub fn get_value_step(
        &mut self,
        section: Option<&str>,
        key: &str,
        buf: &mut [u8],
        state: &mut ScanState,
    ) -> Poll<Result<Range<usize>, LookupError>> {
        let section = section.filter(|s| !s.is_empty());
        let case_sensitive = self.config.case_sensitive;

        let outcome = match (state.phase, section) {
            (Phase::Unset, _) => {
                state.resume_offset = 0;
                state.phase = match section {
                    Some(_) => Phase::LocatingSection,
                    None => Phase::LocatingKey,
                };
                return Poll::Pending;
            }
            (Phase::LocatingSection, Some(section)) => {
                match locate_section(&mut self.store, buf, section, case_sensitive, state) {
                    Poll::Pending => return Poll::Pending,
                    Poll::Ready(Ok(())) => {
                        state.phase = Phase::LocatingKey;
                        return Poll::Pending;
                    }
                    Poll::Ready(Err(e)) => Err(e),
                }
            }
            (Phase::LocatingKey, section) => {
                let scoped = section.is_some();
                match locate_key(&mut self.store, buf, key, scoped, case_sensitive, state) {
                    Poll::Pending => return Poll::Pending,
                    Poll::Ready(result) => result,
                }
            }
            (phase, section) => {
                error!("cannot continue lookup of {key} in {section:?} from phase {phase:?}");
                Err(LookupError::MalformedState)
            }
        };

        state.phase = Phase::Finished;
        Poll::Ready(outcome)
    }

    /// Look up the raw value of `key` in `section`.
    ///
    /// The returned value has surrounding whitespace removed and borrows from `buf`.
    pub fn get_value<'b>(
        &mut self,
        section: Option<&str>,
        key: &str,
        buf: &'b mut [u8],
    ) -> Result<&'b [u8], LookupError> {
        let mut state = ScanState::new();
        let range = loop {
            if let Poll::Ready(result) = self.get_value_step(section, key, buf, &mut state) {
                break result?;
            }
        };
        Ok(&buf[range])
    }

    /// Look up a value and convert it into `T`
    pub fn get<T: FromIniValue>(
        &mut self,
        section: Option<&str>,
        key: &str,
        buf: &mut [u8],
    ) -> Result<T, ValueError> {
        let raw = self.get_value(section, key, buf)?;
        Ok(T::from_ini_value(raw)?)
    }

    /// Look up a boolean spelled as `true`/`yes`/`1` or `false`/`no`/`0` in any case
    pub fn get_bool(
        &mut self,
        section: Option<&str>,
        key: &str,
        buf: &mut [u8],
    ) -> Result<bool, ValueError> {
        self.get(section, key, buf)
    }

    /// Look up a signed 32-bit integer
    pub fn get_int(
        &mut self,
        section: Option<&str>,
        key: &str,
        buf: &mut [u8],
    ) -> Result<i32, ValueError> {
        self.get(section, key, buf)
    }

    /// Look up a signed 64-bit integer
    pub fn get_long(
        &mut self,
        section: Option<&str>,
        key: &str,
        buf: &mut [u8],
    ) -> Result<i64, ValueError> {
        self.get(section, key, buf)
    }

    /// Look up an unsigned 16-bit integer
    pub fn get_u16(
        &mut self,
        section: Option<&str>,
        key: &str,
        buf: &mut [u8],
    ) -> Result<u16, ValueError> {
        self.get(section, key, buf)
    }

    /// Look up an unsigned 64-bit integer
    pub fn get_unsigned_long(
        &mut self,
        section: Option<&str>,
        key: &str,
        buf: &mut [u8],
    ) -> Result<u64, ValueError> {
        self.get(section, key, buf)
    }

    /// Look up a 32-bit floating point number
    pub fn get_float(
        &mut self,
        section: Option<&str>,
        key: &str,
        buf: &mut [u8],
    ) -> Result<f32, ValueError> {
        self.get(section, key, buf)
    }

    /// Look up a value and copy it into `dest`, followed by a NUL byte.
    ///
    /// `buf` is only used for scanning; the returned text borrows from `dest`.
    pub fn get_string<'d>(
        &mut self,
        section: Option<&str>,
        key: &str,
        buf: &mut [u8],
        dest: &'d mut [u8],
    ) -> Result<&'d [u8], ValueError> {
        let raw = self.get_value(section, key, buf)?;
        Ok(copy_value(raw, dest)?)
    }
}
