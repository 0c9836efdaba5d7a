use std::collections::HashMap;

use crate::{header::PackageHeader, record::EntryRecord};

pub mod reader;
pub mod value;
pub mod writer;

pub use self::value::FromEntry;

/// A decoded package.
///
/// Owns its entry table and data section. Entries are addressed by name
/// hash; the name itself is not stored in the package.
#[derive(Debug, Clone)]
pub struct Package {
    pub(crate) header: PackageHeader,
    pub(crate) entries: Vec<EntryRecord>,
    pub(crate) data: Vec<u8>,

    /// Name hash to position in `entries`. On a collision the later entry
    /// wins.
    pub(crate) index: HashMap<u64, usize>,
}
