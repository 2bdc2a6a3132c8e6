use tracing::debug;

use super::{
    CharsetService, FixedStringEncoder, FloatEncoder, IntEncoder, IntKind, RowBuffer, Value,
    VarStringEncoder,
};
use crate::common::{CodecConfig, ColumnDescriptor, ColumnType, Result};
use crate::temporal::PackedTemporalEncoder;

/// Everything an encoder may consult besides its column and buffer.
#[derive(Clone, Copy)]
pub struct CodecContext<'a> {
    pub charsets: &'a CharsetService,
    pub config: &'a CodecConfig,
}

/// A stateless reader/writer for one column storage format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoder {
    Int(IntEncoder),
    Float(FloatEncoder),
    FixedString(FixedStringEncoder),
    VarString(VarStringEncoder),
    Temporal(PackedTemporalEncoder),
}

impl Encoder {
    /// Decodes the column value stored at `offset`.
    pub fn read(
        &self,
        ctx: CodecContext<'_>,
        column: &ColumnDescriptor,
        buffer: &dyn RowBuffer,
        offset: usize,
    ) -> Result<Value> {
        match self {
            Encoder::Int(e) => e.read(column, buffer, offset),
            Encoder::Float(e) => e.read(column, buffer, offset),
            Encoder::FixedString(e) => e.read(ctx.charsets, column, buffer, offset),
            Encoder::VarString(e) => e.read(ctx.charsets, column, buffer, offset),
            Encoder::Temporal(e) => e.read(column, buffer, offset),
        }
    }

    /// Encodes `value` at `offset`, returning the number of bytes written.
    pub fn write(
        &self,
        ctx: CodecContext<'_>,
        column: &ColumnDescriptor,
        value: &Value,
        buffer: &mut dyn RowBuffer,
        offset: usize,
    ) -> Result<usize> {
        match self {
            Encoder::Int(e) => e.write(column, value, buffer, offset),
            Encoder::Float(e) => e.write(column, value, buffer, offset),
            Encoder::FixedString(e) => e.write(ctx.charsets, column, value, buffer, offset),
            Encoder::VarString(e) => e.write(ctx.charsets, column, value, buffer, offset),
            Encoder::Temporal(e) => {
                e.write(ctx.config.time_parse_mode, column, value, buffer, offset)
            }
        }
    }

    /// Width of the length prefix: 0 for everything but var strings.
    pub fn length_prefix_width(&self) -> usize {
        match self {
            Encoder::VarString(e) => e.length_prefix_width(),
            _ => 0,
        }
    }

    /// Bytes a column of this format reserves in a fixed row layout.
    pub fn slot_size(&self, column: &ColumnDescriptor) -> usize {
        match self {
            Encoder::Int(e) => e.width(),
            Encoder::Float(e) => e.width(),
            Encoder::FixedString(_) => column.length as usize,
            Encoder::VarString(e) => e.length_prefix_width() + column.length as usize,
            Encoder::Temporal(e) => e.width(),
        }
    }
}

/// Maps column type codes to encoders.
///
/// Slots are dense by type code; a code with no encoder is a registry miss,
/// which callers must check before reading or writing.
#[derive(Debug, Clone)]
pub struct EncoderRegistry {
    slots: Vec<Option<Encoder>>,
}

impl EncoderRegistry {
    /// A registry with no encoders.
    pub fn empty() -> Self {
        Self {
            slots: vec![None; ColumnType::MAX_CODE as usize + 1],
        }
    }

    /// The standard encoder table.
    pub fn new() -> Self {
        use ColumnType::*;

        let mut registry = Self::empty();
        registry.register(TinyInt, Encoder::Int(IntEncoder::new(IntKind::I8)));
        registry.register(TinyUnsigned, Encoder::Int(IntEncoder::new(IntKind::U8)));
        registry.register(SmallInt, Encoder::Int(IntEncoder::new(IntKind::I16)));
        registry.register(SmallUnsigned, Encoder::Int(IntEncoder::new(IntKind::U16)));
        registry.register(Int, Encoder::Int(IntEncoder::new(IntKind::I32)));
        registry.register(Unsigned, Encoder::Int(IntEncoder::new(IntKind::U32)));
        registry.register(BigInt, Encoder::Int(IntEncoder::new(IntKind::I64)));
        registry.register(BigUnsigned, Encoder::Int(IntEncoder::new(IntKind::U64)));
        registry.register(Float, Encoder::Float(FloatEncoder::Float));
        registry.register(Double, Encoder::Float(FloatEncoder::Double));
        registry.register(Char, Encoder::FixedString(FixedStringEncoder::text()));
        registry.register(VarChar, Encoder::VarString(VarStringEncoder::short(false)));
        registry.register(LongVarChar, Encoder::VarString(VarStringEncoder::long(false)));
        registry.register(Binary, Encoder::FixedString(FixedStringEncoder::binary()));
        registry.register(VarBinary, Encoder::VarString(VarStringEncoder::short(true)));
        registry.register(LongVarBinary, Encoder::VarString(VarStringEncoder::long(true)));
        registry.register(Date, Encoder::Temporal(PackedTemporalEncoder::Date));
        registry.register(Time, Encoder::Temporal(PackedTemporalEncoder::Time));
        registry.register(DateTime, Encoder::Temporal(PackedTemporalEncoder::DateTime));

        debug!(supported = registry.supported().count(), "encoder registry built");
        registry
    }

    /// Installs `encoder` for `column_type`, replacing any existing one.
    pub fn register(&mut self, column_type: ColumnType, encoder: Encoder) {
        self.slots[column_type.code() as usize] = Some(encoder);
    }

    /// Returns the encoder for a type code, or None if the code is not
    /// supported.
    pub fn lookup(&self, type_code: u8) -> Option<&Encoder> {
        self.slots.get(type_code as usize).and_then(Option::as_ref)
    }

    /// Iterates over the type codes that have an encoder.
    pub fn supported(&self) -> impl Iterator<Item = u8> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(code, _)| code as u8)
    }
}

impl Default for EncoderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        let registry = EncoderRegistry::new();
        assert_eq!(
            registry.lookup(1),
            Some(&Encoder::Int(IntEncoder::new(IntKind::I8)))
        );
        assert_eq!(
            registry.lookup(8),
            Some(&Encoder::Int(IntEncoder::new(IntKind::U32)))
        );
        assert_eq!(
            registry.lookup(14),
            Some(&Encoder::FixedString(FixedStringEncoder::text()))
        );
        assert_eq!(registry.lookup(15).unwrap().length_prefix_width(), 1);
        assert_eq!(registry.lookup(23).unwrap().length_prefix_width(), 2);
    }

    #[test]
    fn test_unsupported_codes_miss() {
        let registry = EncoderRegistry::new();
        for ty in [
            ColumnType::MediumInt,
            ColumnType::Decimal,
            ColumnType::Blob,
            ColumnType::Text,
            ColumnType::Bit,
            ColumnType::Year,
            ColumnType::Timestamp,
        ] {
            assert!(registry.lookup(ty.code()).is_none(), "{}", ty);
        }
        assert!(registry.lookup(0).is_none());
        assert!(registry.lookup(200).is_none());
    }

    #[test]
    fn test_slot_sizes() {
        let registry = EncoderRegistry::new();
        let varchar = ColumnDescriptor::new(ColumnType::VarChar.code(), 30, 45);
        let char10 = ColumnDescriptor::new(ColumnType::Char.code(), 10, 45);
        let enc = registry.lookup(varchar.type_code).unwrap();
        assert_eq!(enc.slot_size(&varchar), 31);
        let enc = registry.lookup(char10.type_code).unwrap();
        assert_eq!(enc.slot_size(&char10), 10);
    }

    #[test]
    fn test_empty_registry() {
        let mut registry = EncoderRegistry::empty();
        assert_eq!(registry.supported().count(), 0);
        registry.register(ColumnType::Year, Encoder::Int(IntEncoder::new(IntKind::U8)));
        assert_eq!(registry.supported().collect::<Vec<_>>(), vec![26]);
    }
}
