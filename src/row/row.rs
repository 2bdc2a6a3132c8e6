use std::sync::Arc;

use super::RowLayout;
use crate::codec::{ColumnCodec, RowBuffer, Value};
use crate::common::{CodecError, Result};

/// A row of values laid out by a [`RowLayout`].
#[derive(Debug, Clone)]
pub struct Row {
    layout: Arc<RowLayout>,

    /// The values for each column (in layout order)
    values: Vec<Value>,
}

impl Row {
    /// Creates a row; the value count must match the layout.
    pub fn new(layout: Arc<RowLayout>, values: Vec<Value>) -> Result<Self> {
        if values.len() != layout.column_count() {
            return Err(CodecError::ColumnCountMismatch {
                expected: layout.column_count(),
                actual: values.len(),
            });
        }
        Ok(Self { layout, values })
    }

    /// Decodes a row from `buffer` at `base`.
    pub fn read_from(
        layout: Arc<RowLayout>,
        codec: &ColumnCodec,
        buffer: &dyn RowBuffer,
        base: usize,
    ) -> Result<Self> {
        let values = layout.read_row(codec, buffer, base)?;
        Ok(Self { layout, values })
    }

    /// Decodes a row from a byte slice holding exactly one row.
    pub fn from_bytes(layout: Arc<RowLayout>, codec: &ColumnCodec, data: &[u8]) -> Result<Self> {
        let buffer = data.to_vec();
        Self::read_from(layout, codec, &buffer, 0)
    }

    /// Encodes the row into `buffer` at `base`, returning bytes written.
    pub fn write_to(
        &self,
        codec: &ColumnCodec,
        buffer: &mut dyn RowBuffer,
        base: usize,
    ) -> Result<usize> {
        self.layout.write_row(codec, &self.values, buffer, base)
    }

    /// Encodes the row into a freshly allocated buffer of the layout's size.
    pub fn to_bytes(&self, codec: &ColumnCodec) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; self.layout.row_size()];
        self.write_to(codec, &mut buffer, 0)?;
        Ok(buffer)
    }

    pub fn layout(&self) -> &Arc<RowLayout> {
        &self.layout
    }

    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn value_by_name(&self, name: &str) -> Option<&Value> {
        self.layout
            .column_index(name)
            .and_then(|i| self.values.get(i))
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Sets the value at the given column index.
    pub fn set_value(&mut self, index: usize, value: Value) -> bool {
        match self.values.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.layout == other.layout && self.values == other.values
    }
}

/// Builder for constructing rows fluently. Unset columns are NULL.
pub struct RowBuilder {
    layout: Arc<RowLayout>,
    values: Vec<Value>,
    current_index: usize,
}

impl RowBuilder {
    pub fn new(layout: Arc<RowLayout>) -> Self {
        let count = layout.column_count();
        Self {
            layout,
            values: vec![Value::Null; count],
            current_index: 0,
        }
    }

    /// Sets the value at the current position and advances.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        if let Some(slot) = self.values.get_mut(self.current_index) {
            *slot = value.into();
            self.current_index += 1;
        }
        self
    }

    /// Skips the current position, leaving it NULL.
    pub fn null(self) -> Self {
        self.value(Value::Null)
    }

    /// Sets a column by name without moving the current position. Names not
    /// in the layout are ignored.
    pub fn set(mut self, name: &str, value: impl Into<Value>) -> Self {
        if let Some(slot) = self
            .layout
            .column_index(name)
            .and_then(|i| self.values.get_mut(i))
        {
            *slot = value.into();
        }
        self
    }

    pub fn build(self) -> Row {
        Row {
            layout: self.layout,
            values: self.values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{CharsetService, EncoderRegistry};
    use crate::common::{ColumnDescriptor, ColumnType};

    fn layout() -> Arc<RowLayout> {
        RowLayout::builder()
            .column("id", ColumnDescriptor::of(ColumnType::Int))
            .nullable_column("note", ColumnDescriptor::new(ColumnType::VarChar.code(), 10, 45))
            .build_arc(&EncoderRegistry::new())
            .unwrap()
    }

    #[test]
    fn test_builder_defaults_to_null() {
        let row = RowBuilder::new(layout()).value(7i32).build();
        assert_eq!(row.value(0), Some(&Value::Int(7)));
        assert_eq!(row.value_by_name("note"), Some(&Value::Null));
    }

    #[test]
    fn test_builder_set_and_null() {
        let row = RowBuilder::new(layout())
            .set("note", "kept")
            .set("missing", 1i32)
            .null()
            .value("positional")
            .null()
            .build();
        assert_eq!(row.value(0), Some(&Value::Null));
        assert_eq!(row.value_by_name("note"), Some(&Value::from("positional")));
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_new_checks_arity() {
        let err = Row::new(layout(), vec![Value::Int(1)]).unwrap_err();
        assert_eq!(
            err,
            CodecError::ColumnCountMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_bytes_roundtrip() {
        let codec = ColumnCodec::new(Arc::new(CharsetService::new()));
        let row = RowBuilder::new(layout())
            .set("note", "hi")
            .set("id", -5i32)
            .build();
        let bytes = row.to_bytes(&codec).unwrap();
        assert_eq!(bytes.len(), 1 + 4 + 11);
        assert_eq!(bytes[0], 0);

        let back = Row::from_bytes(row.layout().clone(), &codec, &bytes).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn test_null_bitmap() {
        let codec = ColumnCodec::new(Arc::new(CharsetService::new()));
        let row = RowBuilder::new(layout()).value(1i32).null().build();
        let bytes = row.to_bytes(&codec).unwrap();
        assert_eq!(bytes[0], 0b10);

        let missing_id = RowBuilder::new(layout()).build();
        assert_eq!(
            missing_id.to_bytes(&codec),
            Err(CodecError::NullNotAllowed("id".to_string()))
        );
    }
}
