use std::path::{Component, Path, PathBuf};

use jwalk::WalkDir;
use qpack_format::{PackageBuilder, PackageFlags, WriteOptions};

use crate::cli::CreateArgs;
use crate::error::{Error, Result};

use super::default_manifest_path;

/// Entry name for a file path: its components joined with `/`, without any
/// leading `./` or root.
pub(crate) fn entry_name(path: &Path) -> Result<String> {
    let mut parts = vec![];

    for component in path.components() {
        match component {
            Component::Normal(part) => match part.to_str() {
                Some(part) => parts.push(part),
                None => {
                    return Err(Error::InvalidPath {
                        path: path.to_path_buf(),
                    })
                }
            },
            Component::ParentDir => parts.push(".."),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    Ok(parts.join("/"))
}

/// Absolute form of `path` with symlinks and `.`/`..` resolved, usable
/// before the file exists: a missing file is resolved through its parent
/// directory.
fn resolved_path(path: &Path) -> PathBuf {
    if let Ok(path) = std::fs::canonicalize(path) {
        return path;
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    match (std::fs::canonicalize(parent), path.file_name()) {
        (Ok(parent), Some(name)) => parent.join(name),
        _ => path.to_path_buf(),
    }
}

/// Expand the selected paths into the files to add, in order. Files that
/// resolve to one of `outputs` are left out of directory walks.
fn collect_files(selected: &[PathBuf], recursive: bool, outputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = vec![];

    for path in selected {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        if !recursive {
            return Err(Error::IsDirectory { path: path.clone() });
        }

        for entry in WalkDir::new(path).sort(true).skip_hidden(false) {
            let entry = entry.map_err(|source| Error::WalkDirectory {
                path: path.clone(),
                source,
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let file_path = entry.path();
            if outputs.contains(&resolved_path(&file_path)) {
                tracing::debug!(path = %file_path.display(), "skipping output file");
                continue;
            }
            files.push(file_path);
        }
    }

    Ok(files)
}

pub fn run(args: CreateArgs, verbose: bool) -> Result<()> {
    let manifest_path = args
        .manifest
        .clone()
        .unwrap_or_else(|| default_manifest_path(&args.package));

    let outputs = vec![resolved_path(&args.package), resolved_path(&manifest_path)];

    for file in args.files.iter().filter(|f| !f.is_dir()) {
        if outputs.contains(&resolved_path(file)) {
            return Err(Error::PackageIsInput { path: file.clone() });
        }
    }

    let files = collect_files(&args.files, args.recursive, &outputs)?;

    let mut builder = PackageBuilder::new(PackageFlags::new(args.compression), args.capacity());

    for file_path in files.iter() {
        let name = entry_name(file_path)?;
        builder
            .add_from_disk_as(file_path, &name)
            .map_err(|source| Error::AddFile {
                path: file_path.clone(),
                source,
            })?;

        if verbose {
            println!("{}", name);
        }
    }

    let options = WriteOptions {
        atomic: !args.no_atomic,
    };

    builder
        .save_package(&args.package, &options)
        .map_err(|source| Error::WritePackage {
            path: args.package.clone(),
            source,
        })?;

    builder
        .save_manifest(&manifest_path, &options)
        .map_err(|source| Error::WriteManifest {
            path: manifest_path.clone(),
            source,
        })?;

    tracing::info!(
        package = %args.package.display(),
        manifest = %manifest_path.display(),
        entries = builder.len(),
        bytes = builder.data_size(),
        "created package"
    );

    Ok(())
}
