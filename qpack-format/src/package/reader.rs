use std::path::Path;

use super::{FromEntry, Package};
use crate::{
    compression::CompressionMode,
    de::{deserialize_package_body, read_package_header, PackageBody},
    error::{DecodeError, LookupError, OpenError},
    fs::open_mapped,
    hash::{build_index, hash_str, NameHash},
    header::{PackageFlags, PackageHeader, PACKAGE_HEADER_SIZE},
    record::EntryRecord,
};

impl Package {
    /// Decode a package from its complete byte representation.
    pub fn decode(bytes: &[u8]) -> Result<Package, DecodeError> {
        let header = read_package_header(bytes)?;
        let PackageBody { entries, data } =
            deserialize_package_body(&header, &bytes[PACKAGE_HEADER_SIZE..])?;
        let index = build_index(entries.iter().map(|e| e.filename_hash), "package");

        Ok(Package {
            header,
            entries,
            data,
            index,
        })
    }

    /// Open and decode the package file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Package, OpenError> {
        let path = path.as_ref();
        let package = open_mapped(path, Package::decode)?;

        tracing::debug!(
            path = %path.display(),
            entries = package.len(),
            bytes = package.data_size(),
            "opened package"
        );

        Ok(package)
    }

    #[inline(always)]
    pub fn header(&self) -> &PackageHeader {
        &self.header
    }

    #[inline(always)]
    pub fn version(&self) -> u32 {
        self.header.version
    }

    #[inline(always)]
    pub fn flags(&self) -> PackageFlags {
        self.header.flags
    }

    #[inline(always)]
    pub fn compression_mode(&self) -> CompressionMode {
        self.header.flags.compression_mode
    }

    /// Number of entry records, including any whose hash collides.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Size of the data section in bytes.
    #[inline(always)]
    pub fn data_size(&self) -> u64 {
        self.header.uncompressed_data_size
    }

    /// Entry records in file order.
    #[inline(always)]
    pub fn entries(&self) -> &[EntryRecord] {
        &self.entries
    }

    /// Entry records with their bytes, in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&EntryRecord, &[u8])> + '_ {
        self.entries
            .iter()
            .map(move |record| (record, self.record_data(record)))
    }

    #[inline(always)]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&hash_str(name))
    }

    /// Bytes of the entry named `name`.
    pub fn get(&self, name: &str) -> Result<&[u8], LookupError> {
        let hash = hash_str(name);
        self.get_by_hash(hash)
            .ok_or_else(|| LookupError::EntryNotFound {
                name: name.to_string(),
                hash: NameHash(hash),
            })
    }

    /// Bytes of the entry whose name hashes to `hash`.
    pub fn get_by_hash(&self, hash: u64) -> Option<&[u8]> {
        self.index
            .get(&hash)
            .map(|i| self.record_data(&self.entries[*i]))
    }

    /// Decode the entry named `name` as a `V`.
    ///
    /// The package carries no type information; this only checks that the
    /// entry's length fits `V`.
    pub fn value<V: FromEntry>(&self, name: &str) -> Result<V, LookupError> {
        let bytes = self.get(name)?;
        V::from_entry(bytes).ok_or_else(|| LookupError::InvalidValue {
            name: name.to_string(),
            expected: V::TYPE_NAME,
            actual: bytes.len(),
        })
    }

    #[inline(always)]
    fn record_data(&self, record: &EntryRecord) -> &[u8] {
        // Record ranges are checked against the data section when decoding.
        let start = record.data_offset_in_bytes as usize;
        &self.data[start..start + record.data_size_in_bytes as usize]
    }
}
