use thiserror::Error;

use crate::codec::IntKind;

/// Codec error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("Column type {0} is not supported")]
    UnsupportedColumnType(u8),

    #[error("Unsupported integer width: {0} bits")]
    InvalidWidth(u32),

    #[error("Value {value} out of range for {kind}")]
    OutOfRange { kind: IntKind, value: i128 },

    #[error("Payload of {len} bytes exceeds length prefix maximum {max}")]
    LengthPrefixOverflow { len: usize, max: usize },

    #[error("Payload of {len} bytes exceeds column length {max}")]
    ValueTooLong { len: usize, max: usize },

    #[error("Buffer overflow: {len} bytes at offset {offset} exceeds capacity {capacity}")]
    BufferOverflow {
        offset: usize,
        len: usize,
        capacity: usize,
    },

    #[error("Cannot store {value} value in {column} column")]
    TypeMismatch { column: String, value: &'static str },

    #[error("Charset {0} not found")]
    UnknownCharset(u16),

    #[error("Character {ch:?} cannot be represented in {charset}")]
    Unmappable { charset: &'static str, ch: char },

    #[error("Bytes are not valid {0}")]
    Undecodable(&'static str),

    #[error("Invalid temporal value: {0}")]
    InvalidTemporal(String),

    #[error("Column {0} does not allow NULL")]
    NullNotAllowed(String),

    #[error("Invalid row layout: {0}")]
    InvalidLayout(String),

    #[error("Row has {actual} values but layout has {expected} columns")]
    ColumnCountMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, CodecError>;
