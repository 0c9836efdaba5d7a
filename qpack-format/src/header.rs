use crate::compression::CompressionMode;

// Stored as the raw bytes a little-endian host produces when it writes the
// 4-character tag as a u32.
pub const PACKAGE_MAGIC_BYTES: &[u8; 4] = b"qpck";
pub const MANIFEST_MAGIC_BYTES: &[u8; 4] = b"qmnf";

/// Highest package version this crate reads, and the version it writes.
pub const PACKAGE_VERSION: u32 = 1;

/// Highest manifest version this crate reads, and the version it writes.
pub const MANIFEST_VERSION: u32 = 1;

/// Encoded size of [`PackageHeader`] in bytes.
pub const PACKAGE_HEADER_SIZE: usize = 64;

/// Encoded size of [`ManifestHeader`] in bytes.
pub const MANIFEST_HEADER_SIZE: usize = 16;

/// Byte offset of `filenames_size_in_bytes` within the manifest header.
pub(crate) const MANIFEST_FILENAMES_SIZE_OFFSET: u64 = 8;

/// Package-wide flags, 8 bytes on disk: the compression mode byte followed
/// by 7 reserved bytes.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct PackageFlags {
    pub compression_mode: CompressionMode,
    pub reserved: [u8; 7],
}

impl PackageFlags {
    pub fn new(compression_mode: CompressionMode) -> PackageFlags {
        PackageFlags {
            compression_mode,
            reserved: [0; 7],
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PackageHeader {
    pub magic_bytes: [u8; 4],
    pub version: u32,
    pub flags: PackageFlags,
    pub entries_count: u64,
    pub uncompressed_data_size: u64,
    pub reserved: [u64; 4],
}

impl PackageHeader {
    pub(crate) fn new(
        flags: PackageFlags,
        entries_count: u64,
        uncompressed_data_size: u64,
    ) -> PackageHeader {
        PackageHeader {
            magic_bytes: *PACKAGE_MAGIC_BYTES,
            version: PACKAGE_VERSION,
            flags,
            entries_count,
            uncompressed_data_size,
            reserved: [0; 4],
        }
    }
}

impl Default for PackageHeader {
    fn default() -> Self {
        PackageHeader::new(PackageFlags::default(), 0, 0)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ManifestHeader {
    pub magic_bytes: [u8; 4],
    pub version: u32,
    pub filenames_size_in_bytes: u64,
}

impl ManifestHeader {
    pub(crate) fn new(filenames_size_in_bytes: u64) -> ManifestHeader {
        ManifestHeader {
            magic_bytes: *MANIFEST_MAGIC_BYTES,
            version: MANIFEST_VERSION,
            filenames_size_in_bytes,
        }
    }
}

impl Default for ManifestHeader {
    fn default() -> Self {
        ManifestHeader::new(0)
    }
}
