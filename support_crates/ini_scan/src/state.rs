//! Progress of a resumable lookup

/// The phase a resumable lookup is in
#[derive(Debug, Default, Eq, PartialEq, Copy, Clone)]
pub enum Phase {
    /// The lookup has not started yet
    #[default]
    Unset,
    /// Lines are scanned for the header of the requested section
    LocatingSection,
    /// Lines are scanned for the requested key
    LocatingKey,
    /// The lookup has reached a final outcome and must not be stepped again
    Finished,
}

/// Caller owned progress of a single lookup.
///
/// A fresh state is created for every lookup and handed to
/// [`IniFile::get_value_step`](crate::IniFile::get_value_step) until that reports a final
/// outcome. The scanner itself keeps no progress between calls.
#[derive(Debug, Default, Eq, PartialEq, Copy, Clone)]
pub struct ScanState {
    /// Offset of the next unread line. It never decreases during a lookup.
    pub resume_offset: u64,
    pub phase: Phase,
}

impl ScanState {
    pub const fn new() -> Self {
        Self {
            resume_offset: 0,
            phase: Phase::Unset,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }
}
