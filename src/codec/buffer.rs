use bytes::BytesMut;

use crate::common::{CodecError, Result};

/// Addressable, fixed-capacity byte storage that encoders read from and write
/// into. Offsets are absolute, zero-based positions; the buffer never tracks a
/// cursor of its own.
///
/// Every access is bounds-checked: nothing outside `[offset, offset + len)`
/// is touched, and an access past the end fails with
/// [`CodecError::BufferOverflow`].
pub trait RowBuffer {
    /// Returns the backing bytes.
    fn as_bytes(&self) -> &[u8];

    /// Returns the backing bytes mutably.
    fn as_bytes_mut(&mut self) -> &mut [u8];

    /// Returns the buffer capacity in bytes.
    fn capacity(&self) -> usize {
        self.as_bytes().len()
    }

    /// Fails unless `[offset, offset + len)` lies inside the buffer.
    fn ensure_range(&self, offset: usize, len: usize) -> Result<()> {
        check_range(offset, len, self.capacity())
    }

    /// Reads `len` raw bytes starting at `offset`.
    fn read_bytes(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let capacity = self.capacity();
        check_range(offset, len, capacity)?;
        Ok(&self.as_bytes()[offset..offset + len])
    }

    /// Writes `bytes` starting at `offset`.
    fn write_bytes(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        let capacity = self.capacity();
        check_range(offset, bytes.len(), capacity)?;
        self.as_bytes_mut()[offset..offset + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// Fills `len` bytes starting at `offset` with `byte`.
    fn fill_bytes(&mut self, offset: usize, len: usize, byte: u8) -> Result<()> {
        let capacity = self.capacity();
        check_range(offset, len, capacity)?;
        self.as_bytes_mut()[offset..offset + len].fill(byte);
        Ok(())
    }
}

fn check_range(offset: usize, len: usize, capacity: usize) -> Result<()> {
    match offset.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(CodecError::BufferOverflow {
            offset,
            len,
            capacity,
        }),
    }
}

impl RowBuffer for [u8] {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self
    }
}

impl<const N: usize> RowBuffer for [u8; N] {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self
    }
}

impl RowBuffer for Vec<u8> {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self
    }
}

impl RowBuffer for BytesMut {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self
    }
}
