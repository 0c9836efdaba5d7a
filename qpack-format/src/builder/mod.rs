use std::convert::TryFrom;
use std::fs::File;
use std::path::Path;

use crate::{
    error::BuildError,
    hash::{hash_str, NameHash},
    header::PackageFlags,
};

mod arena;

pub use self::arena::{Arena, ArenaSpan};

#[derive(Debug, Clone, Copy)]
enum EntryData<'a> {
    /// Caller-owned bytes, referenced without copying.
    Borrowed(&'a [u8]),
    /// Bytes read from disk into the builder's arena.
    Arena(ArenaSpan),
}

#[derive(Debug, Clone, Copy)]
struct EntryInfo<'a> {
    name_hash: u64,
    size_in_bytes: u64,
    data: EntryData<'a>,
}

/// Accumulates named entries in memory until they are written out as a
/// package and manifest.
///
/// Entries are append-only and keep their insertion order, which becomes
/// the on-disk order in both files. Writing only reads the builder, so the
/// same builder can be saved any number of times.
#[derive(Debug)]
pub struct PackageBuilder<'a> {
    flags: PackageFlags,
    arena: Arena,
    entries: Vec<EntryInfo<'a>>,
    names: Vec<String>,
    data_size_in_bytes: u64,
}

impl<'a> PackageBuilder<'a> {
    /// Create an empty builder. `arena_capacity` bytes are allocated up front
    /// to hold the contents of files added with [`add_from_disk`].
    ///
    /// [`add_from_disk`]: PackageBuilder::add_from_disk
    pub fn new(flags: PackageFlags, arena_capacity: usize) -> PackageBuilder<'a> {
        PackageBuilder {
            flags,
            arena: Arena::with_capacity(arena_capacity),
            entries: vec![],
            names: vec![],
            data_size_in_bytes: 0,
        }
    }

    /// Add an entry whose bytes stay in caller memory until the builder is
    /// written.
    ///
    /// A name is cut at its first NUL, matching how it will be hashed and
    /// how it is stored in a manifest.
    pub fn add_from_memory(&mut self, name: &str, data: &'a [u8]) {
        self.push(name, EntryData::Borrowed(data), data.len());
    }

    /// Read a whole file into the arena and add it as an entry named by its
    /// path.
    pub fn add_from_disk<P: AsRef<Path>>(&mut self, path: P) -> Result<(), BuildError> {
        let path = path.as_ref();
        let name = path
            .to_str()
            .ok_or_else(|| BuildError::InvalidName(path.to_path_buf()))?;
        self.add_from_disk_as(path, name)
    }

    /// Read a whole file into the arena and add it under `name`.
    pub fn add_from_disk_as<P: AsRef<Path>>(
        &mut self,
        path: P,
        name: &str,
    ) -> Result<(), BuildError> {
        let path = path.as_ref();
        let io_err = |e| BuildError::Io(e, path.to_path_buf());

        let mut file = File::open(path).map_err(io_err)?;
        let file_size = file.metadata().map_err(io_err)?.len();

        let remaining = self.arena.remaining();
        let len = match usize::try_from(file_size) {
            Ok(len) if len <= remaining => len,
            _ => {
                return Err(BuildError::CapacityExceeded {
                    path: path.to_path_buf(),
                    required: file_size,
                    remaining: remaining as u64,
                })
            }
        };

        let span = self.arena.fill_from(&mut file, len).map_err(io_err)?;
        self.push(name, EntryData::Arena(span), span.len);

        Ok(())
    }

    fn push(&mut self, name: &str, data: EntryData<'a>, len: usize) {
        let name = match name.find('\0') {
            Some(end) => &name[..end],
            None => name,
        };

        let entry = EntryInfo {
            name_hash: hash_str(name),
            size_in_bytes: len as u64,
            data,
        };

        tracing::debug!(
            name,
            hash = %NameHash(entry.name_hash),
            bytes = entry.size_in_bytes,
            "added entry"
        );

        self.entries.push(entry);
        self.names.push(name.to_string());
        self.data_size_in_bytes += entry.size_in_bytes;
    }

    #[inline(always)]
    pub fn flags(&self) -> PackageFlags {
        self.flags
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entry sizes.
    #[inline(always)]
    pub fn data_size(&self) -> u64 {
        self.data_size_in_bytes
    }

    #[inline(always)]
    pub fn arena_capacity(&self) -> usize {
        self.arena.capacity()
    }

    #[inline(always)]
    pub fn arena_remaining(&self) -> usize {
        self.arena.remaining()
    }

    /// Entry names in insertion order.
    #[inline(always)]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Name hash and bytes of every entry, in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (NameHash, &[u8])> + '_ {
        self.entries
            .iter()
            .map(move |entry| (NameHash(entry.name_hash), self.entry_data(entry)))
    }

    #[inline(always)]
    fn entry_data(&self, entry: &EntryInfo<'a>) -> &[u8] {
        match entry.data {
            EntryData::Borrowed(data) => data,
            EntryData::Arena(span) => self.arena.get(span),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn keeps_insertion_order() {
        let a = [1u8, 2, 3];
        let b = [4u8; 5];

        let mut builder = PackageBuilder::new(PackageFlags::default(), 0);
        builder.add_from_memory("b", &b);
        builder.add_from_memory("a", &a);

        assert_eq!(builder.names(), &["b".to_string(), "a".to_string()]);
        assert_eq!(builder.data_size(), 8);

        let entries = builder.entries().collect::<Vec<_>>();
        assert_eq!(entries[0], (NameHash::of("b"), &b[..]));
        assert_eq!(entries[1], (NameHash::of("a"), &a[..]));
    }

    #[test]
    fn memory_entries_are_not_copied() {
        let data = vec![9u8; 32];
        let mut builder = PackageBuilder::new(PackageFlags::default(), 0);
        builder.add_from_memory("nine", &data);

        let (_, bytes) = builder.entries().next().unwrap();
        assert_eq!(bytes.as_ptr(), data.as_ptr());
        assert_eq!(builder.arena_remaining(), 0);
    }

    #[test]
    fn name_is_cut_at_nul() {
        let mut builder = PackageBuilder::new(PackageFlags::default(), 0);
        builder.add_from_memory("apple\0pie", b"x");

        assert_eq!(builder.names(), &["apple".to_string()]);
        assert_eq!(builder.entries().next().unwrap().0.get(), hash_str("apple"));
    }

    #[test]
    fn disk_entry_uses_path_as_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("simple.txt");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"simple text")
            .unwrap();

        let mut builder = PackageBuilder::new(PackageFlags::default(), 64);
        builder.add_from_disk(&path).unwrap();

        let name = path.to_str().unwrap();
        assert_eq!(builder.names(), &[name.to_string()]);
        let (hash, bytes) = builder.entries().next().unwrap();
        assert_eq!(hash, NameHash::of(name));
        assert_eq!(bytes, b"simple text");
        assert_eq!(builder.arena_remaining(), 64 - 11);
    }

    #[test]
    fn disk_entry_over_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.bin");
        std::fs::write(&path, vec![0u8; 10]).unwrap();

        let mut builder = PackageBuilder::new(PackageFlags::default(), 16);
        builder.add_from_disk_as(&path, "first").unwrap();

        match builder.add_from_disk_as(&path, "second") {
            Err(BuildError::CapacityExceeded {
                required,
                remaining,
                ..
            }) => {
                assert_eq!(required, 10);
                assert_eq!(remaining, 6);
            }
            other => panic!("unexpected result: {:?}", other),
        }

        // The failed add leaves no trace.
        assert_eq!(builder.len(), 1);
        assert_eq!(builder.arena_remaining(), 6);
    }

    #[test]
    fn exact_fit_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fit.bin");
        std::fs::write(&path, b"12345678").unwrap();

        let mut builder = PackageBuilder::new(PackageFlags::default(), 8);
        builder.add_from_disk_as(&path, "fit").unwrap();
        assert_eq!(builder.arena_remaining(), 0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut builder = PackageBuilder::new(PackageFlags::default(), 8);

        assert!(matches!(
            builder.add_from_disk(dir.path().join("missing.txt")),
            Err(BuildError::Io(..))
        ));
        assert!(builder.is_empty());
    }
}
