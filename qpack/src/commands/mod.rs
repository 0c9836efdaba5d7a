use std::path::{Path, PathBuf};

use qpack_format::{Manifest, Package};

use crate::error::{Error, Result};

pub mod create;
pub mod extract;
pub mod get;
pub mod list;

pub use create::run as create;
pub use extract::run as extract;
pub use get::run as get;
pub use list::run as list;

/// The manifest path used when none is given: the package path with its
/// extension replaced by `manifest`.
pub fn default_manifest_path(package: &Path) -> PathBuf {
    package.with_extension("manifest")
}

pub(crate) fn open_package(path: &Path) -> Result<Package> {
    Package::open(path).map_err(|source| Error::OpenPackage {
        path: path.to_path_buf(),
        source,
    })
}

/// Open the manifest for `package`. An explicitly given manifest must
/// exist; a missing default manifest just means entries go unnamed.
pub(crate) fn open_manifest(package: &Path, explicit: Option<&Path>) -> Result<Option<Manifest>> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = default_manifest_path(package);
            if !path.exists() {
                tracing::debug!(path = %path.display(), "no manifest next to package");
                return Ok(None);
            }
            path
        }
    };

    Manifest::open(&path)
        .map(Some)
        .map_err(|source| Error::OpenManifest { path, source })
}

/// Name of an entry without a manifest name.
pub(crate) fn unnamed_entry_name(hash: u64) -> String {
    format!("{:016x}.bin", hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_path_replaces_extension() {
        assert_eq!(
            default_manifest_path(Path::new("out/test.package")),
            PathBuf::from("out/test.manifest")
        );
        assert_eq!(
            default_manifest_path(Path::new("bare")),
            PathBuf::from("bare.manifest")
        );
    }

    #[test]
    fn missing_default_manifest_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let package = dir.path().join("none.package");
        assert!(open_manifest(&package, None).unwrap().is_none());
    }

    #[test]
    fn missing_explicit_manifest_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let package = dir.path().join("none.package");
        let manifest = dir.path().join("none.manifest");
        assert!(matches!(
            open_manifest(&package, Some(&manifest)),
            Err(Error::OpenManifest { .. })
        ));
    }
}
