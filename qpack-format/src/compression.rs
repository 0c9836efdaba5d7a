use std::fmt;

pub mod constants {
    pub const COMPRESSION_NONE: u8 = 0x00;
    pub const COMPRESSION_LZ4: u8 = 0x01;
    pub const COMPRESSION_DEFLATE: u8 = 0x02;
}

use self::constants::*;

/// Compression mode recorded in a package header.
///
/// The mode is informational only. Entry data is always written and read
/// as stored bytes regardless of the value here.
#[derive(Clone, Copy, Eq, PartialEq)]
pub enum CompressionMode {
    None,
    Lz4,
    Deflate,
    Unknown(u8),
}

impl Default for CompressionMode {
    fn default() -> Self {
        Self::None
    }
}

impl CompressionMode {
    pub const fn available_variants() -> &'static [&'static str] {
        &["none", "lz4", "deflate"]
    }

    pub const fn id(self) -> u8 {
        use CompressionMode::*;

        match self {
            None => COMPRESSION_NONE,
            Lz4 => COMPRESSION_LZ4,
            Deflate => COMPRESSION_DEFLATE,
            Unknown(id) => id,
        }
    }

    pub const fn from_id(id: u8) -> CompressionMode {
        use CompressionMode::*;

        match id {
            COMPRESSION_NONE => None,
            COMPRESSION_LZ4 => Lz4,
            COMPRESSION_DEFLATE => Deflate,
            id => Unknown(id),
        }
    }
}

impl fmt::Display for CompressionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CompressionMode::*;

        let s = match self {
            None => "none",
            Lz4 => "LZ4",
            Deflate => "DEFLATE",
            Unknown(id) => return write!(f, "Unknown(id: {:x})", id),
        };

        write!(f, "{}", s)
    }
}

impl fmt::Debug for CompressionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
