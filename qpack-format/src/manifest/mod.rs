use std::collections::HashMap;

use crate::header::ManifestHeader;

pub mod reader;
pub mod writer;

/// A decoded manifest: the names of a package's entries, in the order they
/// were added.
///
/// A manifest is paired with a package by recomputing each name's hash. It
/// holds no offsets and can be read without the package it describes.
///
/// Names are stored as the raw bytes found in the file, which is what they
/// are hashed over. The `&str` accessors return a lossy UTF-8 rendering.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub(crate) header: ManifestHeader,
    pub(crate) raw_names: Vec<Vec<u8>>,
    pub(crate) names: Vec<String>,
    pub(crate) index: HashMap<u64, usize>,
}
