use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::{
    header::{ManifestHeader, PackageFlags, PackageHeader},
    record::EntryRecord,
};

pub(crate) trait Serialize {
    fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()>;
}

impl Serialize for PackageFlags {
    fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_u8(self.compression_mode.id())?;
        writer.write_all(&self.reserved)
    }
}

impl Serialize for PackageHeader {
    fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.magic_bytes)?;
        writer.write_u32::<LittleEndian>(self.version)?;
        self.flags.write(writer)?;
        writer.write_u64::<LittleEndian>(self.entries_count)?;
        writer.write_u64::<LittleEndian>(self.uncompressed_data_size)?;
        for reserved in self.reserved.iter() {
            writer.write_u64::<LittleEndian>(*reserved)?;
        }
        Ok(())
    }
}

impl Serialize for EntryRecord {
    fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_u64::<LittleEndian>(self.data_offset_in_bytes)?;
        writer.write_u64::<LittleEndian>(self.data_size_in_bytes)?;
        writer.write_u64::<LittleEndian>(self.filename_hash)
    }
}

impl Serialize for ManifestHeader {
    fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.magic_bytes)?;
        writer.write_u32::<LittleEndian>(self.version)?;
        writer.write_u64::<LittleEndian>(self.filenames_size_in_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::CompressionMode;
    use crate::header::{MANIFEST_HEADER_SIZE, PACKAGE_HEADER_SIZE};
    use crate::record::ENTRY_RECORD_SIZE;

    #[test]
    fn package_header_layout() {
        let header = PackageHeader::new(PackageFlags::new(CompressionMode::Lz4), 3, 0x0102);
        let mut buf = vec![];
        header.write(&mut buf).unwrap();

        assert_eq!(buf.len(), PACKAGE_HEADER_SIZE);
        assert_eq!(&buf[0..4], b"qpck");
        assert_eq!(&buf[4..8], &1u32.to_le_bytes());
        assert_eq!(buf[8], 0x01);
        assert_eq!(&buf[9..16], &[0u8; 7]);
        assert_eq!(&buf[16..24], &3u64.to_le_bytes());
        assert_eq!(&buf[24..32], &0x0102u64.to_le_bytes());
        assert!(buf[32..].iter().all(|b| *b == 0));
    }

    #[test]
    fn entry_record_layout() {
        let record = EntryRecord {
            data_offset_in_bytes: 8,
            data_size_in_bytes: 16,
            filename_hash: 0xdead_beef,
        };
        let mut buf = vec![];
        record.write(&mut buf).unwrap();

        assert_eq!(buf.len(), ENTRY_RECORD_SIZE);
        assert_eq!(&buf[0..8], &8u64.to_le_bytes());
        assert_eq!(&buf[8..16], &16u64.to_le_bytes());
        assert_eq!(&buf[16..24], &0xdead_beefu64.to_le_bytes());
    }

    #[test]
    fn manifest_header_layout() {
        let mut buf = vec![];
        ManifestHeader::new(42).write(&mut buf).unwrap();

        assert_eq!(buf.len(), MANIFEST_HEADER_SIZE);
        assert_eq!(&buf[0..4], b"qmnf");
        assert_eq!(&buf[8..16], &42u64.to_le_bytes());
    }
}
