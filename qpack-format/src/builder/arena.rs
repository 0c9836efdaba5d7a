use std::io::Read;

/// A region of an [`Arena`], as offset and length.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ArenaSpan {
    pub offset: usize,
    pub len: usize,
}

/// Fixed-capacity, append-only byte buffer.
///
/// The full capacity is allocated up front and never grown. Spans handed out
/// stay valid for the arena's lifetime because nothing is ever removed.
#[derive(Debug)]
pub struct Arena {
    buf: Vec<u8>,
    capacity: usize,
}

impl Arena {
    pub fn with_capacity(capacity: usize) -> Arena {
        Arena {
            buf: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.capacity - self.buf.len()
    }

    /// Read exactly `len` bytes from `reader` into the arena.
    ///
    /// The caller must have checked `len <= self.remaining()`. On failure the
    /// cursor is left where it was.
    pub(crate) fn fill_from<R: Read>(
        &mut self,
        reader: &mut R,
        len: usize,
    ) -> std::io::Result<ArenaSpan> {
        debug_assert!(len <= self.remaining());

        let offset = self.buf.len();
        self.buf.resize(offset + len, 0);

        if let Err(e) = reader.read_exact(&mut self.buf[offset..]) {
            self.buf.truncate(offset);
            return Err(e);
        }

        Ok(ArenaSpan { offset, len })
    }

    #[inline(always)]
    pub fn get(&self, span: ArenaSpan) -> &[u8] {
        &self.buf[span.offset..span.offset + span.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_are_contiguous() {
        let mut arena = Arena::with_capacity(16);
        let a = arena.fill_from(&mut &b"hello"[..], 5).unwrap();
        let b = arena.fill_from(&mut &b"world!"[..], 6).unwrap();

        assert_eq!(a, ArenaSpan { offset: 0, len: 5 });
        assert_eq!(b, ArenaSpan { offset: 5, len: 6 });
        assert_eq!(arena.get(a), b"hello");
        assert_eq!(arena.get(b), b"world!");
        assert_eq!(arena.remaining(), 5);
    }

    #[test]
    fn short_read_rolls_back() {
        let mut arena = Arena::with_capacity(16);
        arena.fill_from(&mut &b"abc"[..], 3).unwrap();

        let err = arena.fill_from(&mut &b"xy"[..], 4).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.remaining(), 13);
    }
}
