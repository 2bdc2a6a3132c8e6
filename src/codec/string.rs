use super::{CharsetService, IntEncoder, IntKind, RowBuffer, Value};
use crate::common::{
    CodecError, ColumnDescriptor, Result, MAX_LONG_PREFIX_LEN, MAX_SHORT_PREFIX_LEN,
};

/// Encodes a value into payload bytes plus the byte used to pad it.
fn payload(
    binary: bool,
    charsets: &CharsetService,
    column: &ColumnDescriptor,
    value: &Value,
) -> Result<(Vec<u8>, u8)> {
    match (binary, value) {
        (false, Value::String(s)) => {
            let charset = charsets.get(column.charset_id)?;
            Ok((charset.encode(s)?, charset.pad_byte()))
        }
        (true, Value::Bytes(b)) => Ok((b.clone(), 0)),
        (true, Value::String(s)) => Ok((s.as_bytes().to_vec(), 0)),
        _ => Err(CodecError::TypeMismatch {
            column: column.to_string(),
            value: value.kind_name(),
        }),
    }
}

fn decode(
    binary: bool,
    charsets: &CharsetService,
    column: &ColumnDescriptor,
    bytes: &[u8],
) -> Result<Value> {
    if binary {
        return Ok(Value::Bytes(bytes.to_vec()));
    }
    let charset = charsets.get(column.charset_id)?;
    Ok(Value::String(charset.decode(bytes)?))
}

/// CHAR / BINARY: exactly `column.length` bytes, right-padded.
///
/// Text is padded with the charset's space byte, binary data with zero bytes.
/// Reads return the full padded width; stripping pad is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedStringEncoder {
    binary: bool,
}

impl FixedStringEncoder {
    pub const fn text() -> Self {
        Self { binary: false }
    }

    pub const fn binary() -> Self {
        Self { binary: true }
    }

    pub fn read(
        &self,
        charsets: &CharsetService,
        column: &ColumnDescriptor,
        buffer: &dyn RowBuffer,
        offset: usize,
    ) -> Result<Value> {
        let bytes = buffer.read_bytes(offset, column.length as usize)?;
        decode(self.binary, charsets, column, bytes)
    }

    pub fn write(
        &self,
        charsets: &CharsetService,
        column: &ColumnDescriptor,
        value: &Value,
        buffer: &mut dyn RowBuffer,
        offset: usize,
    ) -> Result<usize> {
        let len = column.length as usize;
        let (mut bytes, pad) = payload(self.binary, charsets, column, value)?;
        let keep = if self.binary {
            bytes.len().min(len)
        } else {
            charsets.get(column.charset_id)?.fit(&bytes, len)
        };
        bytes.truncate(keep);
        bytes.resize(len, pad);
        buffer.write_bytes(offset, &bytes)?;
        Ok(len)
    }
}

/// VARCHAR / LONGVARCHAR / VARBINARY / LONGVARBINARY: an unsigned length
/// prefix of 1 or 2 bytes followed by the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarStringEncoder {
    prefix: IntEncoder,
    binary: bool,
}

impl VarStringEncoder {
    /// 1-byte length prefix.
    pub const fn short(binary: bool) -> Self {
        Self {
            prefix: IntEncoder::new(IntKind::U8),
            binary,
        }
    }

    /// 2-byte length prefix; same layout logic as [`short`](Self::short).
    pub const fn long(binary: bool) -> Self {
        Self {
            prefix: IntEncoder::new(IntKind::U16),
            binary,
        }
    }

    pub fn length_prefix_width(&self) -> usize {
        self.prefix.width()
    }

    /// Largest payload the prefix can describe.
    pub fn max_payload(&self) -> usize {
        match self.prefix.kind() {
            IntKind::U8 => MAX_SHORT_PREFIX_LEN,
            _ => MAX_LONG_PREFIX_LEN,
        }
    }

    pub fn read(
        &self,
        charsets: &CharsetService,
        column: &ColumnDescriptor,
        buffer: &dyn RowBuffer,
        offset: usize,
    ) -> Result<Value> {
        let len = self.prefix.read_raw(buffer, offset)? as usize;
        let bytes = buffer.read_bytes(offset + self.length_prefix_width(), len)?;
        decode(self.binary, charsets, column, bytes)
    }

    pub fn write(
        &self,
        charsets: &CharsetService,
        column: &ColumnDescriptor,
        value: &Value,
        buffer: &mut dyn RowBuffer,
        offset: usize,
    ) -> Result<usize> {
        let (bytes, _) = payload(self.binary, charsets, column, value)?;
        let len = bytes.len();
        if len > self.max_payload() {
            return Err(CodecError::LengthPrefixOverflow {
                len,
                max: self.max_payload(),
            });
        }
        if column.length > 0 && len > column.length as usize {
            return Err(CodecError::ValueTooLong {
                len,
                max: column.length as usize,
            });
        }

        let width = self.length_prefix_width();
        buffer.ensure_range(offset, width + len)?;
        self.prefix.write_raw(len as i128, buffer, offset)?;
        buffer.write_bytes(offset + width, &bytes)?;
        Ok(width + len)
    }
}
