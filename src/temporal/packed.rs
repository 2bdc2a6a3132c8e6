use super::{TemporalValue, TimeParseMode};
use crate::codec::{IntEncoder, IntKind, RowBuffer, Value};
use crate::common::{CodecError, ColumnDescriptor, Result, MAX_MICROSECOND};

/// Largest hour a packed TIME can hold.
pub const MAX_TIME_HOURS: u32 = 838;

/// Largest year a packed DATE or DATETIME can hold.
pub const MAX_YEAR: u32 = 9999;

/// Storage layouts for the engine's packed temporal columns.
///
/// ```text
/// DATE      3 bytes LE   day | month << 5 | year << 9
/// TIME      3 bytes LE   signed hhmmss (e.g. -123456 = -12:34:56)
/// DATETIME  8 bytes LE   unsigned YYYYMMDDhhmmss
/// ```
///
/// None of the layouts store fractional seconds; values read back have
/// `fsp == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackedTemporalEncoder {
    Date,
    Time,
    DateTime,
}

fn read_u24(buffer: &dyn RowBuffer, offset: usize) -> Result<u32> {
    let b = buffer.read_bytes(offset, 3)?;
    Ok(u32::from_le_bytes([b[0], b[1], b[2], 0]))
}

fn write_u24(value: u32, buffer: &mut dyn RowBuffer, offset: usize) -> Result<()> {
    buffer.write_bytes(offset, &value.to_le_bytes()[..3])
}

impl PackedTemporalEncoder {
    /// Bytes occupied in the row.
    pub fn width(&self) -> usize {
        match self {
            PackedTemporalEncoder::Date | PackedTemporalEncoder::Time => 3,
            PackedTemporalEncoder::DateTime => 8,
        }
    }

    /// Converts a column value into a valid temporal value. Strings are
    /// parsed with the constructor matching this layout.
    pub fn to_temporal(
        &self,
        column: &ColumnDescriptor,
        value: &Value,
        mode: TimeParseMode,
    ) -> Result<TemporalValue> {
        let temporal = match value {
            Value::Temporal(t) => *t,
            Value::String(s) => match self {
                PackedTemporalEncoder::Date => TemporalValue::from_date_string(s),
                PackedTemporalEncoder::Time => TemporalValue::from_time_string_with(s, mode),
                PackedTemporalEncoder::DateTime => {
                    TemporalValue::from_datetime_string_with(s, mode)
                }
            },
            _ => {
                return Err(CodecError::TypeMismatch {
                    column: column.to_string(),
                    value: value.kind_name(),
                })
            }
        };
        if !temporal.valid || temporal.microsecond > MAX_MICROSECOND {
            return Err(CodecError::InvalidTemporal(value.to_string()));
        }
        Ok(temporal)
    }

    pub fn read(
        &self,
        _column: &ColumnDescriptor,
        buffer: &dyn RowBuffer,
        offset: usize,
    ) -> Result<Value> {
        let t = match self {
            PackedTemporalEncoder::Date => {
                let packed = read_u24(buffer, offset)?;
                TemporalValue::date(packed >> 9, (packed >> 5) & 0x0f, packed & 0x1f)
            }
            PackedTemporalEncoder::Time => {
                // Sign-extend the 24-bit value
                let packed = ((read_u24(buffer, offset)? << 8) as i32) >> 8;
                let hhmmss = packed.unsigned_abs();
                TemporalValue::time(
                    packed < 0,
                    hhmmss / 10000,
                    hhmmss / 100 % 100,
                    hhmmss % 100,
                    0,
                )
            }
            PackedTemporalEncoder::DateTime => {
                let packed = IntEncoder::new(IntKind::U64).read_raw(buffer, offset)? as u64;
                let ymd = (packed / 1_000_000) as u32;
                let hms = (packed % 1_000_000) as u32;
                TemporalValue::datetime(
                    ymd / 10000,
                    ymd / 100 % 100,
                    ymd % 100,
                    hms / 10000,
                    hms / 100 % 100,
                    hms % 100,
                    0,
                )
            }
        };
        Ok(Value::Temporal(t))
    }

    pub fn write(
        &self,
        mode: TimeParseMode,
        column: &ColumnDescriptor,
        value: &Value,
        buffer: &mut dyn RowBuffer,
        offset: usize,
    ) -> Result<usize> {
        let t = self.to_temporal(column, value, mode)?;
        let out_of_range =
            || CodecError::InvalidTemporal(format!("{} out of range for {}", t, column));
        match self {
            PackedTemporalEncoder::Date => {
                if t.year > MAX_YEAR || t.month > 12 || t.day > 31 || t.is_negative() {
                    return Err(out_of_range());
                }
                write_u24(t.day | t.month << 5 | t.year << 9, buffer, offset)?;
            }
            PackedTemporalEncoder::Time => {
                if t.hour > MAX_TIME_HOURS || t.minute > 59 || t.second > 59 {
                    return Err(out_of_range());
                }
                let hhmmss = (t.hour * 10000 + t.minute * 100 + t.second) as i32;
                let signed = if t.is_negative() { -hhmmss } else { hhmmss };
                write_u24(signed as u32 & 0x00ff_ffff, buffer, offset)?;
            }
            PackedTemporalEncoder::DateTime => {
                if t.year > MAX_YEAR
                    || t.month > 12
                    || t.day > 31
                    || t.hour > 23
                    || t.minute > 59
                    || t.second > 59
                    || t.is_negative()
                {
                    return Err(out_of_range());
                }
                let ymd = (t.year * 10000 + t.month * 100 + t.day) as u64;
                let hms = (t.hour * 10000 + t.minute * 100 + t.second) as u64;
                IntEncoder::new(IntKind::U64).write_raw(
                    (ymd * 1_000_000 + hms) as i128,
                    buffer,
                    offset,
                )?;
            }
        }
        Ok(self.width())
    }
}
