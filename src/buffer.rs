//! Growable byte storage for one input line.

use anyhow::{Context, Result};

/// Capacity allocated on the first byte pushed into an empty [`LineBuffer`].
pub const INITIAL_CAPACITY: usize = 1024;

/// Owned byte buffer that holds the line currently being read.
///
/// The buffer is reused across reads: [`clear`](LineBuffer::clear) forgets the
/// content but keeps the storage. Capacity starts at [`INITIAL_CAPACITY`] and
/// doubles whenever the next byte would leave no free slot after the content,
/// so `len() < capacity()` holds for any allocated buffer. It never shrinks.
#[derive(Debug, Default)]
pub struct LineBuffer {
    bytes: Vec<u8>,
    capacity: usize,
}

impl LineBuffer {
    /// Create an empty buffer. Nothing is allocated until the first push.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one byte, growing the storage first if needed.
    ///
    /// Returns an error only if the allocator refuses the larger block.
    pub fn push(&mut self, byte: u8) -> Result<()> {
        if self.capacity == 0 {
            self.grow_to(INITIAL_CAPACITY)?;
        }
        if self.bytes.len() + 1 >= self.capacity {
            self.grow_to(self.capacity * 2)?;
        }
        self.bytes.push(byte);
        Ok(())
    }

    fn grow_to(&mut self, capacity: usize) -> Result<()> {
        let additional = capacity - self.bytes.len();
        self.bytes
            .try_reserve_exact(additional)
            .with_context(|| format!("failed to grow line buffer to {capacity} bytes"))?;
        tracing::trace!(from = self.capacity, to = capacity, "line buffer grown");
        self.capacity = capacity;
        Ok(())
    }

    /// Forget the content, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Drop a single trailing `\n`, if there is one.
    pub fn strip_newline(&mut self) {
        if self.bytes.last() == Some(&b'\n') {
            self.bytes.pop();
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Logical capacity, including the slot reserved after the content.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: usize) -> LineBuffer {
        let mut buf = LineBuffer::new();
        for _ in 0..n {
            buf.push(b'x').unwrap();
        }
        buf
    }

    #[test]
    fn test_new_buffer_allocates_lazily() {
        let buf = LineBuffer::new();
        assert_eq!(buf.capacity(), 0);
        assert!(buf.is_empty());

        let buf = filled(1);
        assert_eq!(buf.capacity(), INITIAL_CAPACITY);
        assert_eq!(buf.as_bytes(), b"x");
    }

    #[test]
    fn test_capacity_doubles_before_last_slot_is_taken() {
        // 1023 bytes still leave one free slot in 1024.
        let buf = filled(INITIAL_CAPACITY - 1);
        assert_eq!(buf.capacity(), INITIAL_CAPACITY);

        let buf = filled(INITIAL_CAPACITY);
        assert_eq!(buf.capacity(), INITIAL_CAPACITY * 2);
    }

    #[test]
    fn test_long_content_survives_repeated_growth() {
        let mut buf = LineBuffer::new();
        let content: Vec<u8> = (0..5000).map(|i| b'a' + (i % 26) as u8).collect();
        for &b in &content {
            buf.push(b).unwrap();
            assert!(buf.len() < buf.capacity());
        }
        assert_eq!(buf.capacity(), 8192);
        assert_eq!(buf.as_bytes(), content.as_slice());
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut buf = filled(3000);
        assert_eq!(buf.capacity(), 4096);
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 4096);
        buf.push(b'y').unwrap();
        assert_eq!(buf.as_bytes(), b"y");
        assert_eq!(buf.capacity(), 4096);
    }

    #[test]
    fn test_strip_newline_removes_only_one() {
        let mut buf = LineBuffer::new();
        for &b in b"ls\n\n" {
            buf.push(b).unwrap();
        }
        buf.strip_newline();
        assert_eq!(buf.as_bytes(), b"ls\n");
        buf.strip_newline();
        assert_eq!(buf.as_bytes(), b"ls");
        buf.strip_newline();
        assert_eq!(buf.as_bytes(), b"ls");
    }
}
