use std::path::PathBuf;

use qpack_format::{BuildError, LookupError, OpenError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot handle path `{}` (entry names must be valid UTF-8)", .path.display())]
    InvalidPath { path: PathBuf },

    #[error("`{}` is a directory (use -r to add its contents)", .path.display())]
    IsDirectory { path: PathBuf },

    #[error("Cowardly refusing to add `{}` to itself", .path.display())]
    PackageIsInput { path: PathBuf },

    #[error("Cannot walk directory `{}`", .path.display())]
    WalkDirectory {
        path: PathBuf,
        #[source]
        source: jwalk::Error,
    },

    #[error("Cannot add file to package `{}`", .path.display())]
    AddFile {
        path: PathBuf,
        #[source]
        source: BuildError,
    },

    #[error("Cannot open package `{}`", .path.display())]
    OpenPackage {
        path: PathBuf,
        #[source]
        source: OpenError,
    },

    #[error("Cannot open manifest `{}`", .path.display())]
    OpenManifest {
        path: PathBuf,
        #[source]
        source: OpenError,
    },

    #[error("Cannot write package `{}`", .path.display())]
    WritePackage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write manifest `{}`", .path.display())]
    WriteManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create directory `{}`", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write file `{}`", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read entry")]
    Lookup {
        #[source]
        source: LookupError,
    },

    #[error("Cannot write to stdout")]
    Stdout {
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot encode listing as JSON")]
    Json {
        #[source]
        source: serde_json::Error,
    },
}
