use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::{
    compression::CompressionMode,
    error::DecodeError,
    header::{
        ManifestHeader, PackageFlags, PackageHeader, MANIFEST_HEADER_SIZE, MANIFEST_MAGIC_BYTES,
        MANIFEST_VERSION, PACKAGE_HEADER_SIZE, PACKAGE_MAGIC_BYTES, PACKAGE_VERSION,
    },
    record::EntryRecord,
};

pub(crate) mod v1;

pub(crate) trait DeserializeOwned {
    fn deserialize_owned<R: Read>(reader: &mut R) -> std::io::Result<Self>
    where
        Self: Sized;
}

impl DeserializeOwned for PackageFlags {
    fn deserialize_owned<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let compression_mode = CompressionMode::from_id(reader.read_u8()?);
        let mut reserved = [0u8; 7];
        reader.read_exact(&mut reserved)?;

        Ok(PackageFlags {
            compression_mode,
            reserved,
        })
    }
}

impl DeserializeOwned for PackageHeader {
    fn deserialize_owned<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut magic_bytes = [0u8; 4];
        reader.read_exact(&mut magic_bytes)?;
        let version = reader.read_u32::<LittleEndian>()?;
        let flags = PackageFlags::deserialize_owned(reader)?;
        let entries_count = reader.read_u64::<LittleEndian>()?;
        let uncompressed_data_size = reader.read_u64::<LittleEndian>()?;
        let mut reserved = [0u64; 4];
        reader.read_u64_into::<LittleEndian>(&mut reserved)?;

        Ok(PackageHeader {
            magic_bytes,
            version,
            flags,
            entries_count,
            uncompressed_data_size,
            reserved,
        })
    }
}

impl DeserializeOwned for EntryRecord {
    fn deserialize_owned<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        Ok(EntryRecord {
            data_offset_in_bytes: reader.read_u64::<LittleEndian>()?,
            data_size_in_bytes: reader.read_u64::<LittleEndian>()?,
            filename_hash: reader.read_u64::<LittleEndian>()?,
        })
    }
}

impl DeserializeOwned for ManifestHeader {
    fn deserialize_owned<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut magic_bytes = [0u8; 4];
        reader.read_exact(&mut magic_bytes)?;

        Ok(ManifestHeader {
            magic_bytes,
            version: reader.read_u32::<LittleEndian>()?,
            filenames_size_in_bytes: reader.read_u64::<LittleEndian>()?,
        })
    }
}

/// Decoded package body: entry table plus the raw data section.
pub(crate) struct PackageBody {
    pub(crate) entries: Vec<EntryRecord>,
    pub(crate) data: Vec<u8>,
}

/// A fixed-size header that starts with a magic tag and a version.
pub(crate) trait VersionedHeader: DeserializeOwned + Sized {
    const SIZE: usize;
    const MAGIC_BYTES: &'static [u8; 4];
    const SUPPORTED_VERSION: u32;

    fn magic_bytes(&self) -> [u8; 4];
    fn version(&self) -> u32;
}

impl VersionedHeader for PackageHeader {
    const SIZE: usize = PACKAGE_HEADER_SIZE;
    const MAGIC_BYTES: &'static [u8; 4] = PACKAGE_MAGIC_BYTES;
    const SUPPORTED_VERSION: u32 = PACKAGE_VERSION;

    fn magic_bytes(&self) -> [u8; 4] {
        self.magic_bytes
    }

    fn version(&self) -> u32 {
        self.version
    }
}

impl VersionedHeader for ManifestHeader {
    const SIZE: usize = MANIFEST_HEADER_SIZE;
    const MAGIC_BYTES: &'static [u8; 4] = MANIFEST_MAGIC_BYTES;
    const SUPPORTED_VERSION: u32 = MANIFEST_VERSION;

    fn magic_bytes(&self) -> [u8; 4] {
        self.magic_bytes
    }

    fn version(&self) -> u32 {
        self.version
    }
}

/// Decode a header from the front of `data`.
///
/// Checks run in order: size floor, magic, version ceiling. Nothing past
/// the header is touched when any of them fail.
fn read_header<H: VersionedHeader>(data: &[u8]) -> Result<H, DecodeError> {
    let too_small = || DecodeError::TooSmall {
        required: H::SIZE,
        actual: data.len(),
    };

    if data.len() < H::SIZE {
        return Err(too_small());
    }

    let header = H::deserialize_owned(&mut &data[..H::SIZE]).map_err(|_| too_small())?;

    let found = header.magic_bytes();
    if &found != H::MAGIC_BYTES {
        return Err(DecodeError::BadMagic {
            expected: *H::MAGIC_BYTES,
            found,
        });
    }

    let found = header.version();
    if found > H::SUPPORTED_VERSION {
        return Err(DecodeError::UnsupportedVersion {
            found,
            supported: H::SUPPORTED_VERSION,
        });
    }

    Ok(header)
}

pub(crate) fn read_package_header(data: &[u8]) -> Result<PackageHeader, DecodeError> {
    let header = read_header::<PackageHeader>(data)?;

    tracing::debug!(
        version = header.version,
        entries = header.entries_count,
        data_size = header.uncompressed_data_size,
        compression = %header.flags.compression_mode,
        "deserialized PackageHeader"
    );

    Ok(header)
}

pub(crate) fn read_manifest_header(data: &[u8]) -> Result<ManifestHeader, DecodeError> {
    let header = read_header::<ManifestHeader>(data)?;

    tracing::debug!(
        version = header.version,
        filenames_size = header.filenames_size_in_bytes,
        "deserialized ManifestHeader"
    );

    Ok(header)
}

// ============================================================================
// VERSION DISPATCH
// ============================================================================

/// Parse everything after the package header with the parser for the
/// header's version.
pub(crate) fn deserialize_package_body(
    header: &PackageHeader,
    body: &[u8],
) -> Result<PackageBody, DecodeError> {
    match header.version {
        1 => v1::deserialize_package(header, body),
        found => Err(DecodeError::UnsupportedVersion {
            found,
            supported: PACKAGE_VERSION,
        }),
    }
}

/// Parse everything after the manifest header with the parser for the
/// header's version.
pub(crate) fn deserialize_manifest_body(
    header: &ManifestHeader,
    body: &[u8],
) -> Result<Vec<Vec<u8>>, DecodeError> {
    match header.version {
        1 => v1::deserialize_manifest(header, body),
        found => Err(DecodeError::UnsupportedVersion {
            found,
            supported: MANIFEST_VERSION,
        }),
    }
}
