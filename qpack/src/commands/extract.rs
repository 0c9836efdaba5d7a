use std::path::{Path, PathBuf};

use crate::cli::ExtractArgs;
use crate::error::{Error, Result};

use super::{open_manifest, open_package, unnamed_entry_name};

/// Relative output path for an entry name, or `None` if the name is empty
/// or would escape the output directory.
pub(crate) fn output_path(name: &str) -> Option<PathBuf> {
    let mut path = PathBuf::new();

    for part in name.split('/') {
        match part {
            "" | "." => {}
            ".." => return None,
            part if part.contains('\\') || part.contains(':') => return None,
            part => path.push(part),
        }
    }

    if path.as_os_str().is_empty() {
        None
    } else {
        Some(path)
    }
}

fn write_entry(output: &Path, relative: &Path, data: &[u8]) -> Result<()> {
    let path = output.join(relative);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| Error::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(&path, data).map_err(|source| Error::WriteFile { path, source })
}

pub fn run(args: ExtractArgs, verbose: bool) -> Result<()> {
    let package = open_package(&args.package)?;
    let manifest = open_manifest(&args.package, args.manifest.as_deref())?;

    std::fs::create_dir_all(&args.output).map_err(|source| Error::CreateDirectory {
        path: args.output.clone(),
        source,
    })?;

    let mut unnamed = 0usize;
    for (record, data) in package.iter() {
        let name = manifest.as_ref().and_then(|m| m.name(record.filename_hash));
        let relative = match name.and_then(output_path) {
            Some(path) => path,
            None => {
                if let Some(name) = name {
                    tracing::warn!(name, hash = %record.hash(), "unsafe entry name; writing by hash");
                }
                unnamed += 1;
                PathBuf::from(unnamed_entry_name(record.filename_hash))
            }
        };

        if verbose {
            println!("{}", relative.display());
        }
        write_entry(&args.output, &relative, data)?;
    }

    tracing::info!(
        output = %args.output.display(),
        entries = package.len(),
        unnamed,
        "extracted package"
    );

    Ok(())
}
