use std::path::PathBuf;

use crate::hash::NameHash;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read file for package entry. Path: '{}'", .1.display())]
    Io(#[source] std::io::Error, PathBuf),

    #[error(
        "Not enough space left in the builder arena for '{}' (required {required} bytes, {remaining} remaining)",
        .path.display()
    )]
    CapacityExceeded {
        path: PathBuf,
        required: u64,
        remaining: u64,
    },

    #[error("Path cannot be used as an entry name (not valid UTF-8). Path: '{}'", .0.display())]
    InvalidName(PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Data is too small to be valid (required at least {required} bytes, got {actual}).")]
    TooSmall { required: usize, actual: usize },

    #[error(
        "Magic bytes invalid (expected '{}', found '{}').",
        String::from_utf8_lossy(.expected),
        String::from_utf8_lossy(.found)
    )]
    BadMagic { expected: [u8; 4], found: [u8; 4] },

    #[error("Unsupported format version {found} (only versions up to {supported} are supported).")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("{section} section is truncated (required {required} bytes, {available} available).")]
    Truncated {
        section: &'static str,
        required: u64,
        available: u64,
    },

    #[error(
        "Entry {hash} points outside the data section (offset {offset}, size {size}, data size {data_size})."
    )]
    EntryOutOfBounds {
        hash: NameHash,
        offset: u64,
        size: u64,
        data_size: u64,
    },

    #[error("Malformed manifest: {0}")]
    MalformedManifest(String),
}

#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("Failed to read file. Path: '{}'", .1.display())]
    ReadFailed(#[source] std::io::Error, PathBuf),

    #[error("Invalid file. Path: '{}'", .1.display())]
    Invalid(#[source] DecodeError, PathBuf),
}

impl OpenError {
    /// The decode failure, if the file could be read but not parsed.
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            OpenError::Invalid(e, _) => Some(e),
            OpenError::ReadFailed(..) => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Entry not found in package. Name: '{name}' (hash {hash})")]
    EntryNotFound { name: String, hash: NameHash },

    #[error("No entry with hash {0}")]
    HashNotFound(NameHash),

    #[error("Entry '{name}' cannot be read as {expected} ({actual} bytes)")]
    InvalidValue {
        name: String,
        expected: &'static str,
        actual: usize,
    },
}
