use std::io::{Result, Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::{
    builder::PackageBuilder,
    fs::write_file,
    header::{ManifestHeader, MANIFEST_FILENAMES_SIZE_OFFSET, MANIFEST_HEADER_SIZE},
    options::WriteOptions,
    ser::Serialize,
};

impl<'a> PackageBuilder<'a> {
    /// Encode the manifest into `writer`, starting at its current position.
    ///
    /// The header goes out with a zero filenames size, which is patched once
    /// the names are written. `writer` is left positioned after the last
    /// name. Returns the number of bytes written.
    pub fn write_manifest<W: Write + Seek>(&self, writer: &mut W) -> Result<u64> {
        let start = writer.seek(SeekFrom::Current(0))?;
        ManifestHeader::new(0).write(writer)?;

        let mut filenames_size = 0u64;
        for name in self.names() {
            writer.write_all(name.as_bytes())?;
            writer.write_u8(0)?;
            filenames_size += name.len() as u64 + 1;
        }

        let end = writer.seek(SeekFrom::Current(0))?;
        writer.seek(SeekFrom::Start(start + MANIFEST_FILENAMES_SIZE_OFFSET))?;
        writer.write_u64::<LittleEndian>(filenames_size)?;
        writer.seek(SeekFrom::Start(end))?;

        tracing::debug!(
            count = self.names().len(),
            filenames_size,
            "wrote manifest"
        );

        Ok(MANIFEST_HEADER_SIZE as u64 + filenames_size)
    }

    /// Write the manifest to `path`, replacing any existing file.
    pub fn save_manifest<P: AsRef<Path>>(&self, path: P, options: &WriteOptions) -> Result<u64> {
        let path = path.as_ref();
        let len = write_file(path, options, |w| self.write_manifest(w).map(|_| ()))?;

        tracing::debug!(
            path = %path.display(),
            names = self.len(),
            bytes = len,
            atomic = options.atomic,
            "saved manifest"
        );

        Ok(len)
    }
}
