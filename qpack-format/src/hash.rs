//! FNV-1a name hashing.
//!
//! The 64-bit hash of an entry's name is the only key a package stores. A
//! manifest stores the names themselves, and the two files are joined by
//! recomputing this hash.

use std::collections::HashMap;
use std::fmt;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Hash a name with 64-bit FNV-1a.
///
/// Hashing stops at the first NUL byte, so `b"abc\0def"` hashes the same as
/// `b"abc"`. Names are stored NUL-terminated in manifests and this keeps the
/// two sides in agreement.
#[inline]
pub fn hash_name(name: &[u8]) -> u64 {
    name.iter()
        .take_while(|&&b| b != 0)
        .fold(FNV_OFFSET_BASIS, |hash, &b| {
            (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
        })
}

#[inline]
pub fn hash_str(name: &str) -> u64 {
    hash_name(name.as_bytes())
}

/// A name hash, formatted as `0x`-prefixed hex.
#[repr(transparent)]
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct NameHash(pub u64);

impl NameHash {
    #[inline(always)]
    pub fn of(name: &str) -> NameHash {
        NameHash(hash_str(name))
    }

    #[inline(always)]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Map each hash to its position in `hashes`. Later positions replace
/// earlier ones with the same hash, and each replacement is logged.
pub(crate) fn build_index<I>(hashes: I, source: &'static str) -> HashMap<u64, usize>
where
    I: IntoIterator<Item = u64>,
{
    let hashes = hashes.into_iter();
    let mut index = HashMap::with_capacity(hashes.size_hint().0);

    for (i, hash) in hashes.enumerate() {
        if let Some(previous) = index.insert(hash, i) {
            tracing::warn!(
                source,
                hash = %NameHash(hash),
                previous,
                current = i,
                "duplicate name hash; later entry replaces earlier"
            );
        }
    }

    index
}

impl From<u64> for NameHash {
    fn from(value: u64) -> Self {
        NameHash(value)
    }
}

impl fmt::Display for NameHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

impl fmt::Debug for NameHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
