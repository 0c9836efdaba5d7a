//! Version 1 body parsers.
//!
//! Package v1 body: `entries_count` 24-byte entry records followed by
//! `uncompressed_data_size` bytes of data.
//!
//! Manifest v1 body: `filenames_size_in_bytes` bytes of NUL-terminated
//! names.

use std::convert::TryFrom;

use crate::{
    error::DecodeError,
    hash::NameHash,
    header::{ManifestHeader, PackageHeader},
    record::{EntryRecord, ENTRY_RECORD_SIZE},
};

use super::{DeserializeOwned, PackageBody};

/// Check that `body[offset..]` holds at least `required` bytes and return
/// the span as `usize`s.
fn section(
    name: &'static str,
    body: &[u8],
    offset: usize,
    required: Option<u64>,
) -> Result<(usize, usize), DecodeError> {
    let available = (body.len() - offset) as u64;
    let truncated = |required: u64| DecodeError::Truncated {
        section: name,
        required,
        available,
    };

    let required = required.ok_or_else(|| truncated(u64::MAX))?;
    if required > available {
        return Err(truncated(required));
    }

    let len = usize::try_from(required).map_err(|_| truncated(required))?;
    Ok((offset, offset + len))
}

pub(crate) fn deserialize_package(
    header: &PackageHeader,
    body: &[u8],
) -> Result<PackageBody, DecodeError> {
    let (start, end) = section(
        "Entries",
        body,
        0,
        header.entries_count.checked_mul(ENTRY_RECORD_SIZE as u64),
    )?;

    let mut reader = &body[start..end];
    let mut entries = Vec::with_capacity(header.entries_count as usize);
    for _ in 0..header.entries_count {
        let record = EntryRecord::deserialize_owned(&mut reader).map_err(|_| {
            DecodeError::Truncated {
                section: "Entries",
                required: ENTRY_RECORD_SIZE as u64,
                available: reader.len() as u64,
            }
        })?;
        entries.push(record);
    }

    tracing::debug!(
        start = format_args!("{:#x}", start),
        end = format_args!("{:#x}", end),
        bytes = end - start,
        count = entries.len(),
        "deserialized entry records"
    );

    let (data_start, data_end) =
        section("Data", body, end, Some(header.uncompressed_data_size))?;
    let data = body[data_start..data_end].to_vec();

    for record in entries.iter() {
        let in_bounds = record
            .data_range()
            .map(|range| range.end <= header.uncompressed_data_size)
            .unwrap_or(false);

        if !in_bounds {
            return Err(DecodeError::EntryOutOfBounds {
                hash: NameHash(record.filename_hash),
                offset: record.data_offset_in_bytes,
                size: record.data_size_in_bytes,
                data_size: header.uncompressed_data_size,
            });
        }
    }

    tracing::debug!(
        start = format_args!("{:#x}", data_start),
        end = format_args!("{:#x}", data_end),
        bytes = data.len(),
        "deserialized data section"
    );

    Ok(PackageBody { entries, data })
}

/// Split the filenames section into raw names. Names are byte strings; the
/// only structural requirement is that each one ends with a NUL inside the
/// declared size.
pub(crate) fn deserialize_manifest(
    header: &ManifestHeader,
    body: &[u8],
) -> Result<Vec<Vec<u8>>, DecodeError> {
    let (start, end) = section("Filenames", body, 0, Some(header.filenames_size_in_bytes))?;
    let filenames = &body[start..end];

    let mut names = Vec::new();
    let mut pos = 0;
    while pos < filenames.len() {
        let len = filenames[pos..]
            .iter()
            .position(|b| *b == 0)
            .ok_or_else(|| {
                DecodeError::MalformedManifest(format!(
                    "name at offset {} is not terminated within the declared {} bytes",
                    pos,
                    filenames.len()
                ))
            })?;

        names.push(filenames[pos..pos + len].to_vec());
        pos += len + 1;
    }

    tracing::debug!(
        start = format_args!("{:#x}", start),
        end = format_args!("{:#x}", end),
        bytes = end - start,
        count = names.len(),
        "deserialized filenames"
    );

    Ok(names)
}
