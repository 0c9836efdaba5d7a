use std::path::Path;

use super::Manifest;
use crate::{
    de::{deserialize_manifest_body, read_manifest_header},
    error::{DecodeError, LookupError, OpenError},
    fs::open_mapped,
    hash::{build_index, hash_name, hash_str, NameHash},
    header::{ManifestHeader, MANIFEST_HEADER_SIZE},
};

impl Manifest {
    /// Decode a manifest from its complete byte representation.
    pub fn decode(bytes: &[u8]) -> Result<Manifest, DecodeError> {
        let header = read_manifest_header(bytes)?;
        let raw_names = deserialize_manifest_body(&header, &bytes[MANIFEST_HEADER_SIZE..])?;

        let index = build_index(raw_names.iter().map(|name| hash_name(name)), "manifest");
        let names = raw_names
            .iter()
            .map(|name| String::from_utf8_lossy(name).into_owned())
            .collect();

        Ok(Manifest {
            header,
            raw_names,
            names,
            index,
        })
    }

    /// Open and decode the manifest file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Manifest, OpenError> {
        let path = path.as_ref();
        let manifest = open_mapped(path, Manifest::decode)?;

        tracing::debug!(
            path = %path.display(),
            names = manifest.len(),
            "opened manifest"
        );

        Ok(manifest)
    }

    #[inline(always)]
    pub fn header(&self) -> &ManifestHeader {
        &self.header
    }

    #[inline(always)]
    pub fn version(&self) -> u32 {
        self.header.version
    }

    #[inline(always)]
    pub fn filenames_size(&self) -> u64 {
        self.header.filenames_size_in_bytes
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in file order.
    #[inline(always)]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Raw name bytes in file order.
    #[inline(always)]
    pub fn raw_names(&self) -> &[Vec<u8>] {
        &self.raw_names
    }

    /// Names with their hashes, in file order. The hash is taken over the
    /// raw bytes, so it matches the package even for non-UTF-8 names.
    pub fn iter(&self) -> impl Iterator<Item = (NameHash, &str)> + '_ {
        self.raw_names
            .iter()
            .zip(self.names.iter())
            .map(|(raw, name)| (NameHash(hash_name(raw)), name.as_str()))
    }

    #[inline(always)]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&hash_str(name))
    }

    /// The name whose hash is `hash`. If several names share it, the last
    /// one in the manifest.
    pub fn name(&self, hash: u64) -> Option<&str> {
        self.index.get(&hash).map(|i| self.names[*i].as_str())
    }

    /// The raw bytes of the name whose hash is `hash`.
    pub fn name_bytes(&self, hash: u64) -> Option<&[u8]> {
        self.index.get(&hash).map(|i| self.raw_names[*i].as_slice())
    }

    pub fn resolve(&self, hash: u64) -> Result<&str, LookupError> {
        self.name(hash)
            .ok_or_else(|| LookupError::HashNotFound(NameHash(hash)))
    }
}
