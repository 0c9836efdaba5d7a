//! Typed views over raw entry bytes.
//!
//! Entries are untyped on disk. Numbers are read little-endian, the byte
//! order used for every other field in the format.

use byteorder::{ByteOrder, LittleEndian};

/// A type that can be decoded from the complete bytes of one entry.
pub trait FromEntry: Sized {
    /// Shown in errors when the bytes do not fit.
    const TYPE_NAME: &'static str;

    /// Decode `bytes`, or `None` if their length does not fit the type.
    fn from_entry(bytes: &[u8]) -> Option<Self>;
}

macro_rules! impl_from_entry {
    ($ty:ty, $name:expr, $size:expr, $read:path, $read_into:path) => {
        impl FromEntry for $ty {
            const TYPE_NAME: &'static str = $name;

            fn from_entry(bytes: &[u8]) -> Option<Self> {
                if bytes.len() != $size {
                    return None;
                }
                Some($read(bytes))
            }
        }

        impl FromEntry for Vec<$ty> {
            const TYPE_NAME: &'static str = concat!("[", $name, "]");

            fn from_entry(bytes: &[u8]) -> Option<Self> {
                if bytes.len() % $size != 0 {
                    return None;
                }
                let mut out = vec![<$ty>::default(); bytes.len() / $size];
                $read_into(bytes, &mut out);
                Some(out)
            }
        }
    };
}

impl_from_entry!(u16, "u16", 2, LittleEndian::read_u16, LittleEndian::read_u16_into);
impl_from_entry!(u32, "u32", 4, LittleEndian::read_u32, LittleEndian::read_u32_into);
impl_from_entry!(u64, "u64", 8, LittleEndian::read_u64, LittleEndian::read_u64_into);
impl_from_entry!(i16, "i16", 2, LittleEndian::read_i16, LittleEndian::read_i16_into);
impl_from_entry!(i32, "i32", 4, LittleEndian::read_i32, LittleEndian::read_i32_into);
impl_from_entry!(i64, "i64", 8, LittleEndian::read_i64, LittleEndian::read_i64_into);
impl_from_entry!(f32, "f32", 4, LittleEndian::read_f32, LittleEndian::read_f32_into);
impl_from_entry!(f64, "f64", 8, LittleEndian::read_f64, LittleEndian::read_f64_into);

impl FromEntry for u8 {
    const TYPE_NAME: &'static str = "u8";

    fn from_entry(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [b] => Some(*b),
            _ => None,
        }
    }
}

impl FromEntry for i8 {
    const TYPE_NAME: &'static str = "i8";

    fn from_entry(bytes: &[u8]) -> Option<Self> {
        u8::from_entry(bytes).map(|b| b as i8)
    }
}

impl FromEntry for Vec<u8> {
    const TYPE_NAME: &'static str = "bytes";

    fn from_entry(bytes: &[u8]) -> Option<Self> {
        Some(bytes.to_vec())
    }
}

impl FromEntry for String {
    const TYPE_NAME: &'static str = "UTF-8 string";

    fn from_entry(bytes: &[u8]) -> Option<Self> {
        std::str::from_utf8(bytes).ok().map(str::to_string)
    }
}
