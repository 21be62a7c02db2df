use thiserror::Error;

/// Returned when a write would run past the end of a fixed-capacity buffer.
///
/// Blocks surface this as their "full" signal; the container reacts by
/// opening a new block.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("write would exceed block capacity")]
pub struct BlockFull;

/// A fixed-capacity byte region written front to back.
///
/// The whole capacity is allocated up front and never grows. Multi-byte
/// values are stored little-endian using exactly as many bytes as the caller
/// asks for, so there is never any slack beyond the last written byte.
#[derive(Debug, Clone)]
pub struct ByteBuffer {
    bytes: Box<[u8]>,
    /// Number of bytes written so far.
    len: usize,
}

impl ByteBuffer {
    /// Creates an empty buffer able to hold exactly `max_bytes` bytes.
    pub fn with_limit(max_bytes: usize) -> Self {
        Self {
            bytes: vec![0u8; max_bytes].into_boxed_slice(),
            len: 0,
        }
    }

    /// Returns the number of bytes written.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the fixed capacity in bytes.
    #[inline]
    pub fn limit(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the number of bytes that can still be written.
    #[inline]
    pub fn remaining_capacity(&self) -> usize {
        self.bytes.len() - self.len
    }

    /// Returns the written prefix of the buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_u8(&mut self, byte: u8) -> Result<(), BlockFull> {
        if self.remaining_capacity() == 0 {
            return Err(BlockFull);
        }
        self.bytes[self.len] = byte;
        self.len += 1;
        Ok(())
    }

    /// Writes the low `width` bytes of `value` in little-endian order.
    /// `width` must be <= 8; a width of zero writes nothing.
    ///
    /// Nothing is written when the value does not fit.
    pub fn write_le(&mut self, value: u64, width: usize) -> Result<(), BlockFull> {
        debug_assert!(width <= 8);
        if width > self.remaining_capacity() {
            return Err(BlockFull);
        }
        self.bytes[self.len..self.len + width].copy_from_slice(&value.to_le_bytes()[..width]);
        self.len += width;
        Ok(())
    }
}

/// A cursor for reading bytes sequentially from a written byte region.
#[derive(Debug)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader over the written part of `buffer`.
    pub fn new(buffer: &'a ByteBuffer) -> Self {
        Self {
            bytes: buffer.as_bytes(),
            pos: 0,
        }
    }

    /// Creates a reader over `bytes` starting at byte offset `pos`.
    pub fn at(bytes: &'a [u8], pos: usize) -> Self {
        Self { bytes, pos }
    }

    /// Returns the current byte offset.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of unread bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Reads a single byte. Returns `None` if exhausted.
    #[inline]
    pub fn read_u8(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    /// Reads `width` little-endian bytes into the low end of a `u64`.
    /// Returns `None` if fewer than `width` bytes remain.
    pub fn read_le(&mut self, width: usize) -> Option<u64> {
        debug_assert!(width <= 8);
        let src = self.bytes.get(self.pos..self.pos + width)?;
        let mut word = [0u8; 8];
        word[..width].copy_from_slice(src);
        self.pos += width;
        Some(u64::from_le_bytes(word))
    }
}
