/// How package and manifest files are written to disk.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct WriteOptions {
    /// Write to a temporary file in the destination directory and rename it
    /// over the destination once complete. When `false` the destination is
    /// truncated and written in place, and an interrupted write leaves a
    /// partial file behind.
    ///
    /// Files written atomically are created with the temporary file's
    /// permissions (owner read/write on Unix).
    pub atomic: bool,
}

impl WriteOptions {
    pub const fn atomic() -> WriteOptions {
        WriteOptions { atomic: true }
    }

    pub const fn in_place() -> WriteOptions {
        WriteOptions { atomic: false }
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions::atomic()
    }
}
