use std::fmt;

/// Column storage formats understood by the engine, keyed by their on-disk
/// type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColumnType {
    TinyInt = 1,
    TinyUnsigned = 2,
    SmallInt = 3,
    SmallUnsigned = 4,
    MediumInt = 5,
    MediumUnsigned = 6,
    Int = 7,
    Unsigned = 8,
    BigInt = 9,
    BigUnsigned = 10,
    Float = 11,
    Double = 12,
    OldDecimal = 13,
    Char = 14,
    VarChar = 15,
    Binary = 16,
    VarBinary = 17,
    DateTime = 18,
    Date = 19,
    Blob = 20,
    Text = 21,
    Bit = 22,
    LongVarChar = 23,
    LongVarBinary = 24,
    Time = 25,
    Year = 26,
    Timestamp = 27,
    OldDecimalUnsigned = 28,
    Decimal = 29,
    DecimalUnsigned = 30,
}

impl ColumnType {
    /// Largest type code the engine assigns.
    pub const MAX_CODE: u8 = 30;

    /// Returns the numeric type code.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Maps a numeric type code back to a column type.
    pub fn from_code(code: u8) -> Option<Self> {
        use ColumnType::*;
        let ty = match code {
            1 => TinyInt,
            2 => TinyUnsigned,
            3 => SmallInt,
            4 => SmallUnsigned,
            5 => MediumInt,
            6 => MediumUnsigned,
            7 => Int,
            8 => Unsigned,
            9 => BigInt,
            10 => BigUnsigned,
            11 => Float,
            12 => Double,
            13 => OldDecimal,
            14 => Char,
            15 => VarChar,
            16 => Binary,
            17 => VarBinary,
            18 => DateTime,
            19 => Date,
            20 => Blob,
            21 => Text,
            22 => Bit,
            23 => LongVarChar,
            24 => LongVarBinary,
            25 => Time,
            26 => Year,
            27 => Timestamp,
            28 => OldDecimalUnsigned,
            29 => Decimal,
            30 => DecimalUnsigned,
            _ => return None,
        };
        Some(ty)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::TinyInt => "TINYINT",
            ColumnType::TinyUnsigned => "TINYINT UNSIGNED",
            ColumnType::SmallInt => "SMALLINT",
            ColumnType::SmallUnsigned => "SMALLINT UNSIGNED",
            ColumnType::MediumInt => "MEDIUMINT",
            ColumnType::MediumUnsigned => "MEDIUMINT UNSIGNED",
            ColumnType::Int => "INT",
            ColumnType::Unsigned => "INT UNSIGNED",
            ColumnType::BigInt => "BIGINT",
            ColumnType::BigUnsigned => "BIGINT UNSIGNED",
            ColumnType::Float => "FLOAT",
            ColumnType::Double => "DOUBLE",
            ColumnType::OldDecimal => "OLDDECIMAL",
            ColumnType::Char => "CHAR",
            ColumnType::VarChar => "VARCHAR",
            ColumnType::Binary => "BINARY",
            ColumnType::VarBinary => "VARBINARY",
            ColumnType::DateTime => "DATETIME",
            ColumnType::Date => "DATE",
            ColumnType::Blob => "BLOB",
            ColumnType::Text => "TEXT",
            ColumnType::Bit => "BIT",
            ColumnType::LongVarChar => "LONGVARCHAR",
            ColumnType::LongVarBinary => "LONGVARBINARY",
            ColumnType::Time => "TIME",
            ColumnType::Year => "YEAR",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::OldDecimalUnsigned => "OLDDECIMAL UNSIGNED",
            ColumnType::Decimal => "DECIMAL",
            ColumnType::DecimalUnsigned => "DECIMAL UNSIGNED",
        };
        f.write_str(name)
    }
}

/// Describes how a single column is stored: its type code, declared length
/// (in bytes for string columns) and character set.
///
/// Descriptors are supplied by the caller on every codec call and are never
/// retained by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnDescriptor {
    pub type_code: u8,
    pub length: u32,
    pub charset_id: u16,
}

impl ColumnDescriptor {
    pub fn new(type_code: u8, length: u32, charset_id: u16) -> Self {
        Self {
            type_code,
            length,
            charset_id,
        }
    }

    /// Descriptor for a column whose type carries no length or charset.
    pub fn of(column_type: ColumnType) -> Self {
        Self::new(column_type.code(), 0, 0)
    }

    pub fn column_type(&self) -> Option<ColumnType> {
        ColumnType::from_code(self.type_code)
    }
}

impl fmt::Display for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column_type() {
            Some(ty @ (ColumnType::Char
            | ColumnType::VarChar
            | ColumnType::LongVarChar
            | ColumnType::Binary
            | ColumnType::VarBinary
            | ColumnType::LongVarBinary)) => write!(f, "{}({})", ty, self.length),
            Some(ty) => write!(f, "{}", ty),
            None => write!(f, "TYPE#{}", self.type_code),
        }
    }
}
