//! File access shared by the package and manifest codecs.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use memmap2::Mmap;

use crate::{
    error::{DecodeError, OpenError},
    options::WriteOptions,
};

/// Memory-map the file at `path` and run `decode` over its bytes.
pub(crate) fn open_mapped<T, F>(path: &Path, decode: F) -> Result<T, OpenError>
where
    F: FnOnce(&[u8]) -> Result<T, DecodeError>,
{
    let read_failed = |e| OpenError::ReadFailed(e, path.to_path_buf());

    let file = File::open(path).map_err(read_failed)?;
    let len = file.metadata().map_err(read_failed)?.len();

    let result = if len == 0 {
        decode(&[])
    } else {
        // Safety: the map is only read for the duration of `decode`, which
        // copies everything it keeps.
        let mmap = unsafe { Mmap::map(&file) }.map_err(read_failed)?;
        decode(&mmap)
    };

    result.map_err(|e| OpenError::Invalid(e, path.to_path_buf()))
}

/// Create `path` and hand a buffered writer over it to `write`, honoring
/// [`WriteOptions::atomic`]. Returns the final file length.
pub(crate) fn write_file<P, F>(path: P, options: &WriteOptions, write: F) -> std::io::Result<u64>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<&mut File>) -> std::io::Result<()>,
{
    let path = path.as_ref();

    if !options.atomic {
        let mut file = File::create(path)?;
        write_buffered(&mut file, write)?;
        return Ok(file.metadata()?.len());
    }

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    write_buffered(tmp.as_file_mut(), write)?;
    tmp.as_file().sync_all()?;

    let file = tmp.persist(path).map_err(|e| e.error)?;
    tracing::debug!(path = %path.display(), "persisted temporary file");
    Ok(file.metadata()?.len())
}

fn write_buffered<F>(file: &mut File, write: F) -> std::io::Result<()>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> std::io::Result<()>,
{
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_place_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        std::fs::write(&path, b"a much longer previous file").unwrap();

        let len = write_file(&path, &WriteOptions::in_place(), |w| w.write_all(b"new")).unwrap();
        assert_eq!(len, 3);
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn atomic_replaces_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        std::fs::write(&path, b"old").unwrap();

        write_file(&path, &WriteOptions::atomic(), |w| w.write_all(b"replacement")).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"replacement");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn failed_atomic_write_keeps_original() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        std::fs::write(&path, b"original").unwrap();

        let result = write_file(&path, &WriteOptions::atomic(), |w| {
            w.write_all(b"partial")?;
            Err(std::io::Error::new(std::io::ErrorKind::Other, "interrupted"))
        });

        assert!(result.is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"original");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
