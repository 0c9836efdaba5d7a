use std::io::{Result, Write};
use std::path::Path;

use crate::{
    builder::PackageBuilder,
    fs::write_file,
    header::{PackageHeader, PACKAGE_HEADER_SIZE},
    options::WriteOptions,
    record::{EntryRecord, ENTRY_RECORD_SIZE},
    ser::Serialize,
};

impl<'a> PackageBuilder<'a> {
    #[inline(always)]
    fn package_header(&self) -> PackageHeader {
        PackageHeader::new(self.flags(), self.len() as u64, self.data_size())
    }

    /// Entry records with offsets assigned in insertion order, each entry
    /// starting where the previous one ends.
    fn entry_records(&self) -> impl Iterator<Item = EntryRecord> + '_ {
        self.entries().scan(0u64, |offset, (hash, data)| {
            let record = EntryRecord {
                data_offset_in_bytes: *offset,
                data_size_in_bytes: data.len() as u64,
                filename_hash: hash.get(),
            };
            *offset += record.data_size_in_bytes;
            Some(record)
        })
    }

    /// Encode the package (header, entry table, then data section) into
    /// `writer`. Returns the number of bytes written.
    pub fn write_package<W: Write>(&self, writer: &mut W) -> Result<u64> {
        let header = self.package_header();
        header.write(writer)?;

        for record in self.entry_records() {
            record.write(writer)?;
        }

        for (_, data) in self.entries() {
            writer.write_all(data)?;
        }

        Ok(self.package_size())
    }

    /// Encoded size of the package in bytes.
    pub fn package_size(&self) -> u64 {
        PACKAGE_HEADER_SIZE as u64 + (ENTRY_RECORD_SIZE * self.len()) as u64 + self.data_size()
    }

    /// Write the package to `path`, replacing any existing file.
    pub fn save_package<P: AsRef<Path>>(&self, path: P, options: &WriteOptions) -> Result<u64> {
        let path = path.as_ref();
        let len = write_file(path, options, |w| self.write_package(w).map(|_| ()))?;

        tracing::debug!(
            path = %path.display(),
            entries = self.len(),
            bytes = len,
            atomic = options.atomic,
            "saved package"
        );

        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::PackageFlags;

    fn u64_at(buf: &[u8], at: usize) -> u64 {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&buf[at..at + 8]);
        u64::from_le_bytes(bytes)
    }

    #[test]
    fn offsets_are_contiguous() {
        let mut builder = PackageBuilder::new(PackageFlags::default(), 0);
        builder.add_from_memory("a", b"aaa");
        builder.add_from_memory("b", b"");
        builder.add_from_memory("c", b"cccccc");

        let records = builder.entry_records().collect::<Vec<_>>();
        let offsets = records
            .iter()
            .map(|r| (r.data_offset_in_bytes, r.data_size_in_bytes))
            .collect::<Vec<_>>();
        assert_eq!(offsets, vec![(0, 3), (3, 0), (3, 6)]);
    }

    #[test]
    fn layout_and_size() {
        let mut builder = PackageBuilder::new(PackageFlags::default(), 0);
        builder.add_from_memory("apple", &[5, 0, 0, 0, 0, 0, 0, 0]);
        builder.add_from_memory("pear", b"ab");

        let mut buf = vec![];
        let written = builder.write_package(&mut buf).unwrap();

        let data_start = PACKAGE_HEADER_SIZE + 2 * ENTRY_RECORD_SIZE;
        assert_eq!(written, buf.len() as u64);
        assert_eq!(buf.len(), data_start + 10);
        assert_eq!(written, builder.package_size());

        // entries_count and uncompressed_data_size
        assert_eq!(u64_at(&buf, 16), 2);
        assert_eq!(u64_at(&buf, 24), 10);

        let second = PACKAGE_HEADER_SIZE + ENTRY_RECORD_SIZE;
        assert_eq!(u64_at(&buf, second), 8);
        assert_eq!(u64_at(&buf, second + 8), 2);
        assert_eq!(u64_at(&buf, second + 16), crate::hash::hash_str("pear"));
        assert_eq!(&buf[data_start + 8..], b"ab");
    }

    #[test]
    fn empty_package_is_header_only() {
        let builder = PackageBuilder::new(PackageFlags::default(), 0);
        let mut buf = vec![];
        builder.write_package(&mut buf).unwrap();

        assert_eq!(buf.len(), PACKAGE_HEADER_SIZE);
        assert_eq!(&buf[..4], b"qpck");
    }

    #[test]
    fn save_twice_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        let mut builder = PackageBuilder::new(PackageFlags::default(), 0);
        builder.add_from_memory("x", b"xyz");

        let first = dir.path().join("first.package");
        let second = dir.path().join("second.package");
        builder.save_package(&first, &WriteOptions::atomic()).unwrap();
        builder.save_package(&second, &WriteOptions::in_place()).unwrap();

        assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
    }
}
