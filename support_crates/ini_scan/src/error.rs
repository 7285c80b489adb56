//! Errors that can occur while looking up and converting values

use crate::convert::ConversionError;
use thiserror_no_std::Error;

/// Errors that can occur when reading a single line from a store
#[derive(Debug, Error, Eq, PartialEq, Copy, Clone)]
pub enum ReadLineError {
    /// The line does not fit into the provided buffer (or the buffer is smaller than 3 bytes)
    #[error("The line does not fit into the provided buffer")]
    BufferTooSmall,
    /// The store could not be positioned at the start of the line
    #[error("The store could not seek to the start of the line")]
    SeekFailed,
}

/// The reasons for which a lookup can end without a value
#[derive(Debug, Error, Eq, PartialEq, Copy, Clone)]
pub enum LookupError {
    /// The requested section does not exist in the document
    #[error("The requested section does not exist")]
    SectionNotFound,
    /// The requested key does not exist in the requested section (or before the first section)
    #[error("The requested key does not exist")]
    KeyNotFound,
    /// A line could not be read from the store
    #[error("A line could not be read: {0}")]
    Read(#[from] ReadLineError),
    /// The scan state passed to a resumable lookup is not valid for the requested lookup
    #[error("The scan state is not valid for this lookup")]
    MalformedState,
}

impl LookupError {
    /// Whether the lookup failed because a value is absent rather than because of an I/O or usage
    /// problem
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SectionNotFound | Self::KeyNotFound)
    }
}

/// The error returned by typed value getters
#[derive(Debug, Error, Eq, PartialEq, Copy, Clone)]
pub enum ValueError {
    /// No raw value could be looked up
    #[error("Could not look up the value: {0}")]
    Lookup(#[from] LookupError),
    /// A raw value was found but it could not be converted into the requested type
    #[error("Could not convert the value: {0}")]
    Conversion(#[from] ConversionError),
}
