use std::fmt;

use super::{RowBuffer, Value};
use crate::common::{CodecError, ColumnDescriptor, Result};

/// The (signedness, width) combinations an integer column can be stored as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntKind {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
}

impl IntKind {
    /// Returns the kind for a signedness and bit width, or None if the width
    /// is not one of 8, 16, 32 or 64.
    pub fn new(signed: bool, width_bits: u32) -> Option<Self> {
        let kind = match (signed, width_bits) {
            (false, 8) => IntKind::U8,
            (true, 8) => IntKind::I8,
            (false, 16) => IntKind::U16,
            (true, 16) => IntKind::I16,
            (false, 32) => IntKind::U32,
            (true, 32) => IntKind::I32,
            (false, 64) => IntKind::U64,
            (true, 64) => IntKind::I64,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_signed(&self) -> bool {
        matches!(self, IntKind::I8 | IntKind::I16 | IntKind::I32 | IntKind::I64)
    }

    pub fn width_bits(&self) -> u32 {
        match self {
            IntKind::U8 | IntKind::I8 => 8,
            IntKind::U16 | IntKind::I16 => 16,
            IntKind::U32 | IntKind::I32 => 32,
            IntKind::U64 | IntKind::I64 => 64,
        }
    }

    /// Width in bytes.
    pub fn width(&self) -> usize {
        (self.width_bits() / 8) as usize
    }

    pub fn min(&self) -> i128 {
        match self {
            IntKind::U8 | IntKind::U16 | IntKind::U32 | IntKind::U64 => 0,
            IntKind::I8 => i8::MIN as i128,
            IntKind::I16 => i16::MIN as i128,
            IntKind::I32 => i32::MIN as i128,
            IntKind::I64 => i64::MIN as i128,
        }
    }

    pub fn max(&self) -> i128 {
        match self {
            IntKind::U8 => u8::MAX as i128,
            IntKind::I8 => i8::MAX as i128,
            IntKind::U16 => u16::MAX as i128,
            IntKind::I16 => i16::MAX as i128,
            IntKind::U32 => u32::MAX as i128,
            IntKind::I32 => i32::MAX as i128,
            IntKind::U64 => u64::MAX as i128,
            IntKind::I64 => i64::MAX as i128,
        }
    }

    /// Returns true if `value` is representable by this kind.
    pub fn contains(&self, value: i128) -> bool {
        (self.min()..=self.max()).contains(&value)
    }
}

impl fmt::Display for IntKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_signed() { "i" } else { "u" };
        write!(f, "{}{}", sign, self.width_bits())
    }
}

/// Reads and writes two's-complement integers of one [`IntKind`].
/// Multi-byte widths are little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntEncoder {
    kind: IntKind,
}

/// Produces the encoder for a (signedness, bit width) pair.
pub fn make_int_encoder(signed: bool, width_bits: u32) -> Result<IntEncoder> {
    IntKind::new(signed, width_bits)
        .map(IntEncoder::new)
        .ok_or(CodecError::InvalidWidth(width_bits))
}

fn le<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}

impl IntEncoder {
    pub const fn new(kind: IntKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> IntKind {
        self.kind
    }

    /// Number of bytes this encoder occupies.
    pub fn width(&self) -> usize {
        self.kind.width()
    }

    /// Reads the integer at `offset`, sign-extending signed kinds.
    pub fn read_raw(&self, buffer: &dyn RowBuffer, offset: usize) -> Result<i128> {
        let b = buffer.read_bytes(offset, self.width())?;
        let v = match self.kind {
            IntKind::U8 => b[0] as i128,
            IntKind::I8 => b[0] as i8 as i128,
            IntKind::U16 => u16::from_le_bytes(le(b)) as i128,
            IntKind::I16 => i16::from_le_bytes(le(b)) as i128,
            IntKind::U32 => u32::from_le_bytes(le(b)) as i128,
            IntKind::I32 => i32::from_le_bytes(le(b)) as i128,
            IntKind::U64 => u64::from_le_bytes(le(b)) as i128,
            IntKind::I64 => i64::from_le_bytes(le(b)) as i128,
        };
        Ok(v)
    }

    /// Writes `value` at `offset`. Values outside the kind's range are
    /// rejected rather than wrapped.
    pub fn write_raw(
        &self,
        value: i128,
        buffer: &mut dyn RowBuffer,
        offset: usize,
    ) -> Result<usize> {
        if !self.kind.contains(value) {
            return Err(CodecError::OutOfRange {
                kind: self.kind,
                value,
            });
        }
        match self.kind {
            IntKind::U8 => buffer.write_bytes(offset, &[value as u8])?,
            IntKind::I8 => buffer.write_bytes(offset, &(value as i8).to_le_bytes())?,
            IntKind::U16 => buffer.write_bytes(offset, &(value as u16).to_le_bytes())?,
            IntKind::I16 => buffer.write_bytes(offset, &(value as i16).to_le_bytes())?,
            IntKind::U32 => buffer.write_bytes(offset, &(value as u32).to_le_bytes())?,
            IntKind::I32 => buffer.write_bytes(offset, &(value as i32).to_le_bytes())?,
            IntKind::U64 => buffer.write_bytes(offset, &(value as u64).to_le_bytes())?,
            IntKind::I64 => buffer.write_bytes(offset, &(value as i64).to_le_bytes())?,
        }
        Ok(self.width())
    }

    /// Reads a column value: signed kinds yield `Value::Int`, unsigned kinds
    /// `Value::UInt`.
    pub fn read(
        &self,
        _column: &ColumnDescriptor,
        buffer: &dyn RowBuffer,
        offset: usize,
    ) -> Result<Value> {
        let v = self.read_raw(buffer, offset)?;
        // read_raw never yields a value outside the kind's range
        Ok(if self.kind.is_signed() {
            Value::Int(v as i64)
        } else {
            Value::UInt(v as u64)
        })
    }

    pub fn write(
        &self,
        column: &ColumnDescriptor,
        value: &Value,
        buffer: &mut dyn RowBuffer,
        offset: usize,
    ) -> Result<usize> {
        let v = value.as_i128().ok_or_else(|| CodecError::TypeMismatch {
            column: column.to_string(),
            value: value.kind_name(),
        })?;
        self.write_raw(v, buffer, offset)
    }
}
