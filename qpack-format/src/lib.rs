mod builder;
pub mod compression;
mod de;
mod error;
mod fs;
pub mod hash;
mod header;
mod manifest;
mod options;
mod package;
mod record;
mod ser;

pub use builder::{Arena, ArenaSpan, PackageBuilder};
pub use compression::CompressionMode;
pub use error::{BuildError, DecodeError, LookupError, OpenError};
pub use hash::{hash_name, hash_str, NameHash};
pub use header::{
    ManifestHeader, PackageFlags, PackageHeader, MANIFEST_HEADER_SIZE, MANIFEST_MAGIC_BYTES,
    MANIFEST_VERSION, PACKAGE_HEADER_SIZE, PACKAGE_MAGIC_BYTES, PACKAGE_VERSION,
};
pub use manifest::Manifest;
pub use options::WriteOptions;
pub use package::{FromEntry, Package};
pub use record::{EntryRecord, ENTRY_RECORD_SIZE};
