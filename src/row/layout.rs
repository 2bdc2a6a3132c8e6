use std::collections::HashMap;
use std::sync::Arc;

use crate::codec::{ColumnCodec, EncoderRegistry, RowBuffer, Value};
use crate::common::{CodecError, ColumnDescriptor, ColumnType, Result};

/// A named column placed at a fixed offset inside a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutColumn {
    name: String,
    descriptor: ColumnDescriptor,
    nullable: bool,

    /// Position in the layout (0-indexed)
    ordinal: usize,

    /// Offset from the start of the row, past the null bitmap
    offset: usize,

    /// Bytes reserved for the column
    size: usize,
}

impl LayoutColumn {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &ColumnDescriptor {
        &self.descriptor
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Offset of the column from the start of the row.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

/// Fixed layout of a storage row.
///
/// ```text
/// +----------------+----------+----------+-----+
/// | Null Bitmap    | Column 0 | Column 1 | ... |
/// | (N bytes)      |          |          |     |
/// +----------------+----------+----------+-----+
/// ```
///
/// - **Null Bitmap**: ceil(column_count / 8) bytes, 1 bit per column (1 = NULL)
/// - **Columns**: every column owns a slot of fixed size at a fixed offset.
///   Variable-length strings reserve their length prefix plus the declared
///   column length, so rows of one layout always have the same size.
#[derive(Debug, Clone)]
pub struct RowLayout {
    columns: Vec<LayoutColumn>,
    name_to_index: HashMap<String, usize>,
    null_bitmap_size: usize,
    row_size: usize,
}

impl RowLayout {
    /// Lays out `columns` in order. Fails if a column type has no encoder in
    /// `registry`, or a string column declares no length.
    pub fn new(
        columns: Vec<(String, ColumnDescriptor, bool)>,
        registry: &EncoderRegistry,
    ) -> Result<Self> {
        let null_bitmap_size = (columns.len() + 7) / 8;
        let mut offset = null_bitmap_size;
        let mut name_to_index = HashMap::new();
        let mut laid_out = Vec::with_capacity(columns.len());

        for (ordinal, (name, descriptor, nullable)) in columns.into_iter().enumerate() {
            let encoder = registry
                .lookup(descriptor.type_code)
                .ok_or(CodecError::UnsupportedColumnType(descriptor.type_code))?;
            if is_string(&descriptor) && descriptor.length == 0 {
                return Err(CodecError::InvalidLayout(format!(
                    "column {} has no declared length",
                    name
                )));
            }
            if name_to_index.insert(name.clone(), ordinal).is_some() {
                return Err(CodecError::InvalidLayout(format!(
                    "duplicate column {}",
                    name
                )));
            }

            let size = encoder.slot_size(&descriptor);
            laid_out.push(LayoutColumn {
                name,
                descriptor,
                nullable,
                ordinal,
                offset,
                size,
            });
            offset += size;
        }

        Ok(Self {
            columns: laid_out,
            name_to_index,
            null_bitmap_size,
            row_size: offset,
        })
    }

    /// Creates a layout builder for fluent construction.
    pub fn builder() -> RowLayoutBuilder {
        RowLayoutBuilder::new()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, index: usize) -> Option<&LayoutColumn> {
        self.columns.get(index)
    }

    pub fn column_by_name(&self, name: &str) -> Option<&LayoutColumn> {
        self.column_index(name).and_then(|i| self.columns.get(i))
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    pub fn columns(&self) -> impl Iterator<Item = &LayoutColumn> {
        self.columns.iter()
    }

    pub fn null_bitmap_size(&self) -> usize {
        self.null_bitmap_size
    }

    /// Total bytes of one row, null bitmap included.
    pub fn row_size(&self) -> usize {
        self.row_size
    }

    /// Encodes one row at `base`. NULL values set their bitmap bit and zero
    /// their slot. Returns the row size.
    ///
    /// If a column value fails to encode, the row's bytes are left partially
    /// written and must not be read back.
    pub fn write_row(
        &self,
        codec: &ColumnCodec,
        values: &[Value],
        buffer: &mut dyn RowBuffer,
        base: usize,
    ) -> Result<usize> {
        if values.len() != self.columns.len() {
            return Err(CodecError::ColumnCountMismatch {
                expected: self.columns.len(),
                actual: values.len(),
            });
        }
        buffer.ensure_range(base, self.row_size)?;
        if let Some(col) = self
            .columns
            .iter()
            .zip(values)
            .find_map(|(col, value)| (value.is_null() && !col.nullable).then_some(col))
        {
            return Err(CodecError::NullNotAllowed(col.name.clone()));
        }

        let mut bitmap = vec![0u8; self.null_bitmap_size];
        for (col, value) in self.columns.iter().zip(values) {
            buffer.fill_bytes(base + col.offset, col.size, 0)?;
            if value.is_null() {
                bitmap[col.ordinal / 8] |= 1 << (col.ordinal % 8);
            } else {
                codec.write(&col.descriptor, value, buffer, base + col.offset)?;
            }
        }
        buffer.write_bytes(base, &bitmap)?;
        Ok(self.row_size)
    }

    /// Decodes one row starting at `base`.
    pub fn read_row(
        &self,
        codec: &ColumnCodec,
        buffer: &dyn RowBuffer,
        base: usize,
    ) -> Result<Vec<Value>> {
        let bitmap = buffer.read_bytes(base, self.null_bitmap_size)?;
        let is_null = |i: usize| bitmap[i / 8] & (1 << (i % 8)) != 0;

        self.columns
            .iter()
            .map(|col| {
                if is_null(col.ordinal) {
                    Ok(Value::Null)
                } else {
                    codec.read(&col.descriptor, buffer, base + col.offset)
                }
            })
            .collect()
    }
}

fn is_string(descriptor: &ColumnDescriptor) -> bool {
    matches!(
        descriptor.column_type(),
        Some(
            ColumnType::Char
                | ColumnType::VarChar
                | ColumnType::LongVarChar
                | ColumnType::Binary
                | ColumnType::VarBinary
                | ColumnType::LongVarBinary
        )
    )
}

impl PartialEq for RowLayout {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
    }
}

impl Eq for RowLayout {}

/// Builder for constructing row layouts fluently.
pub struct RowLayoutBuilder {
    columns: Vec<(String, ColumnDescriptor, bool)>,
}

impl RowLayoutBuilder {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Adds a non-nullable column.
    pub fn column(mut self, name: impl Into<String>, descriptor: ColumnDescriptor) -> Self {
        self.columns.push((name.into(), descriptor, false));
        self
    }

    /// Adds a nullable column.
    pub fn nullable_column(
        mut self,
        name: impl Into<String>,
        descriptor: ColumnDescriptor,
    ) -> Self {
        self.columns.push((name.into(), descriptor, true));
        self
    }

    pub fn build(self, registry: &EncoderRegistry) -> Result<RowLayout> {
        RowLayout::new(self.columns, registry)
    }

    /// Builds the layout wrapped in an Arc for shared ownership.
    pub fn build_arc(self, registry: &EncoderRegistry) -> Result<Arc<RowLayout>> {
        self.build(registry).map(Arc::new)
    }
}

impl Default for RowLayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_layout() -> RowLayout {
        RowLayout::builder()
            .column("id", ColumnDescriptor::of(ColumnType::Int))
            .column("name", ColumnDescriptor::new(ColumnType::VarChar.code(), 20, 45))
            .nullable_column("code", ColumnDescriptor::new(ColumnType::Char.code(), 4, 8))
            .column("age", ColumnDescriptor::of(ColumnType::SmallUnsigned))
            .build(&EncoderRegistry::new())
            .unwrap()
    }

    #[test]
    fn test_offsets() {
        let layout = create_test_layout();

        assert_eq!(layout.null_bitmap_size(), 1);
        let offsets: Vec<_> = layout.columns().map(|c| (c.offset(), c.size())).collect();
        assert_eq!(offsets, vec![(1, 4), (5, 21), (26, 4), (30, 2)]);
        assert_eq!(layout.row_size(), 32);
    }

    #[test]
    fn test_column_lookup() {
        let layout = create_test_layout();

        assert_eq!(layout.column_index("id"), Some(0));
        assert_eq!(layout.column_index("nonexistent"), None);
        let col = layout.column_by_name("code").unwrap();
        assert!(col.is_nullable());
        assert_eq!(col.ordinal(), 2);
    }

    #[test]
    fn test_rejects_unsupported_and_unsized() {
        let registry = EncoderRegistry::new();
        let err = RowLayout::builder()
            .column("d", ColumnDescriptor::of(ColumnType::Decimal))
            .build(&registry)
            .unwrap_err();
        assert_eq!(err, CodecError::UnsupportedColumnType(29));

        let err = RowLayout::builder()
            .column("s", ColumnDescriptor::new(ColumnType::VarChar.code(), 0, 45))
            .build(&registry)
            .unwrap_err();
        assert!(matches!(err, CodecError::InvalidLayout(_)));

        let err = RowLayout::builder()
            .column("a", ColumnDescriptor::of(ColumnType::Int))
            .column("a", ColumnDescriptor::of(ColumnType::Int))
            .build(&registry)
            .unwrap_err();
        assert!(matches!(err, CodecError::InvalidLayout(_)));
    }
}
