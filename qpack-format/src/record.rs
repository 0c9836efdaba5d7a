use std::ops::Range;

use crate::hash::NameHash;

/// Encoded size of [`EntryRecord`] in bytes.
pub const ENTRY_RECORD_SIZE: usize = 24;

/// One row of a package's entry table.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EntryRecord {
    /// Position of the entry's bytes, relative to the start of the data
    /// section rather than the start of the file.
    pub data_offset_in_bytes: u64,

    /// The exact length of the entry's bytes.
    pub data_size_in_bytes: u64,

    /// FNV-1a hash of the entry's name.
    pub filename_hash: u64,
}

impl EntryRecord {
    #[inline(always)]
    pub fn hash(&self) -> NameHash {
        NameHash(self.filename_hash)
    }

    /// Byte range within the data section, or `None` if it overflows.
    #[inline(always)]
    pub(crate) fn data_range(&self) -> Option<Range<u64>> {
        let end = self
            .data_offset_in_bytes
            .checked_add(self.data_size_in_bytes)?;
        Some(self.data_offset_in_bytes..end)
    }
}
