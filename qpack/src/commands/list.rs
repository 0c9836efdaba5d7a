use humansize::{file_size_opts as options, FileSize};
use qpack_format::{Manifest, Package};
use serde_json::json;

use crate::cli::ListArgs;
use crate::error::{Error, Result};

use super::{open_manifest, open_package};

#[inline(always)]
fn entry_name<'a>(manifest: Option<&'a Manifest>, hash: u64) -> Option<&'a str> {
    manifest.and_then(|m| m.name(hash))
}

fn to_json(package: &Package, manifest: Option<&Manifest>) -> serde_json::Value {
    let entries = package
        .entries()
        .iter()
        .map(|record| {
            json!({
                "hash": record.hash().to_string(),
                "offset": record.data_offset_in_bytes,
                "size": record.data_size_in_bytes,
                "name": entry_name(manifest, record.filename_hash),
            })
        })
        .collect::<Vec<_>>();

    json!({
        "version": package.version(),
        "compression": package.compression_mode().to_string(),
        "data_size": package.data_size(),
        "entries": entries,
    })
}

pub fn run(args: ListArgs) -> Result<()> {
    let package = open_package(&args.package)?;
    let manifest = open_manifest(&args.package, args.manifest.as_deref())?;

    if args.json {
        let doc = to_json(&package, manifest.as_ref());
        let out = serde_json::to_string_pretty(&doc).map_err(|source| Error::Json { source })?;
        println!("{}", out);
        return Ok(());
    }

    println!("Hash                  Offset         Length         Name");
    println!("------------------    -------------  -------------  --------");
    for record in package.entries().iter() {
        let length = record
            .data_size_in_bytes
            .file_size(options::BINARY)
            .unwrap_or_else(|_| record.data_size_in_bytes.to_string());
        let name = entry_name(manifest.as_ref(), record.filename_hash).unwrap_or("-");

        println!(
            "{}    {:>12}   {:>12}   {}",
            record.hash(),
            record.data_offset_in_bytes,
            length,
            name,
        );
    }

    Ok(())
}
