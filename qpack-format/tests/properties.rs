//! Property tests: any set of named blobs survives a package and manifest
//! round trip.

use std::collections::BTreeMap;
use std::io::Cursor;

use proptest::prelude::*;
use qpack_format::{hash_str, Manifest, Package, PackageBuilder, PackageFlags};

fn name_strategy() -> impl Strategy<Value = String> {
    any::<String>().prop_map(|s| s.replace('\0', ""))
}

fn entries_strategy() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
    prop::collection::btree_map(
        name_strategy(),
        prop::collection::vec(any::<u8>(), 0..256),
        0..24,
    )
}

fn encode(entries: &BTreeMap<String, Vec<u8>>) -> (Vec<u8>, Vec<u8>) {
    let mut builder = PackageBuilder::new(PackageFlags::default(), 0);
    for (name, data) in entries {
        builder.add_from_memory(name, data);
    }

    let mut package = vec![];
    builder.write_package(&mut package).unwrap();
    let mut manifest = Cursor::new(vec![]);
    builder.write_manifest(&mut manifest).unwrap();

    (package, manifest.into_inner())
}

proptest! {
    #[test]
    fn test_every_entry_round_trips(entries in entries_strategy()) {
        let (package_bytes, manifest_bytes) = encode(&entries);
        let package = Package::decode(&package_bytes).unwrap();
        let manifest = Manifest::decode(&manifest_bytes).unwrap();

        prop_assert_eq!(package.len(), entries.len());
        for (name, data) in &entries {
            prop_assert_eq!(package.get(name).unwrap(), &data[..]);
            prop_assert_eq!(manifest.name(hash_str(name)), Some(name.as_str()));
        }
    }

    #[test]
    fn test_sizes_and_offsets_add_up(entries in entries_strategy()) {
        let (package_bytes, manifest_bytes) = encode(&entries);
        let package = Package::decode(&package_bytes).unwrap();
        let manifest = Manifest::decode(&manifest_bytes).unwrap();

        let data_size = entries.values().map(|d| d.len() as u64).sum::<u64>();
        prop_assert_eq!(package.data_size(), data_size);

        let filenames_size = entries.keys().map(|n| n.len() as u64 + 1).sum::<u64>();
        prop_assert_eq!(manifest.filenames_size(), filenames_size);

        let mut expected_offset = 0u64;
        for record in package.entries() {
            prop_assert_eq!(record.data_offset_in_bytes, expected_offset);
            expected_offset += record.data_size_in_bytes;
        }
    }
}
