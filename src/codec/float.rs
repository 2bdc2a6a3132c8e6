use super::{RowBuffer, Value};
use crate::common::{CodecError, ColumnDescriptor, Result};

/// IEEE 754 FLOAT (4 bytes) or DOUBLE (8 bytes), little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatEncoder {
    Float,
    Double,
}

impl FloatEncoder {
    pub fn width(&self) -> usize {
        match self {
            FloatEncoder::Float => 4,
            FloatEncoder::Double => 8,
        }
    }

    pub fn read(
        &self,
        _column: &ColumnDescriptor,
        buffer: &dyn RowBuffer,
        offset: usize,
    ) -> Result<Value> {
        let b = buffer.read_bytes(offset, self.width())?;
        Ok(match self {
            FloatEncoder::Float => Value::Float(f32::from_le_bytes([b[0], b[1], b[2], b[3]])),
            FloatEncoder::Double => Value::Double(f64::from_le_bytes([
                b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
            ])),
        })
    }

    /// Writes a float; integers and floats of the other width are converted.
    pub fn write(
        &self,
        column: &ColumnDescriptor,
        value: &Value,
        buffer: &mut dyn RowBuffer,
        offset: usize,
    ) -> Result<usize> {
        let v = match value {
            Value::Float(v) => *v as f64,
            Value::Double(v) => *v,
            Value::Int(v) => *v as f64,
            Value::UInt(v) => *v as f64,
            _ => {
                return Err(CodecError::TypeMismatch {
                    column: column.to_string(),
                    value: value.kind_name(),
                })
            }
        };
        match self {
            FloatEncoder::Float => buffer.write_bytes(offset, &(v as f32).to_le_bytes())?,
            FloatEncoder::Double => buffer.write_bytes(offset, &v.to_le_bytes())?,
        }
        Ok(self.width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ColumnType;

    #[test]
    fn test_float_roundtrip() {
        let column = ColumnDescriptor::of(ColumnType::Float);
        let mut buf = vec![0u8; 4];
        FloatEncoder::Float
            .write(&column, &Value::Float(3.5), &mut buf, 0)
            .unwrap();
        assert_eq!(buf, 3.5f32.to_le_bytes().to_vec());
        assert_eq!(
            FloatEncoder::Float.read(&column, &buf, 0).unwrap(),
            Value::Float(3.5)
        );
    }

    #[test]
    fn test_double_accepts_integers() {
        let column = ColumnDescriptor::of(ColumnType::Double);
        let mut buf = vec![0u8; 8];
        FloatEncoder::Double
            .write(&column, &Value::Int(-2), &mut buf, 0)
            .unwrap();
        assert_eq!(
            FloatEncoder::Double.read(&column, &buf, 0).unwrap(),
            Value::Double(-2.0)
        );
        assert!(FloatEncoder::Double
            .write(&column, &Value::from("1.0"), &mut buf, 0)
            .is_err());
    }
}
