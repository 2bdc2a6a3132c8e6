//! Rowcodec - typed column codec for fixed-layout storage rows
//!
//! This crate marshals application values into and out of the byte layout a
//! storage engine uses for its columns, and provides a lossless interchange
//! format for date and time data.
//!
//! # Architecture
//!
//! The crate is organized into a few layers:
//!
//! - **Codec** (`codec`): Per-column encoders
//!   - `RowBuffer`: Bounds-checked byte access at absolute offsets
//!   - `IntEncoder`: Two's-complement integers of 8/16/32/64 bits, little-endian
//!   - `FixedStringEncoder`: CHAR/BINARY, padded to the declared length
//!   - `VarStringEncoder`: VARCHAR/LONGVARCHAR with a 1- or 2-byte length prefix
//!   - `CharsetService`: Pluggable charset re-encoding for string columns
//!   - `EncoderRegistry`: Column type code to encoder lookup
//!   - `ColumnCodec`: Single entry point bundling the above
//!
//! - **Temporal** (`temporal`): Date and time interchange
//!   - `TemporalValue`: Sign, calendar fields, microseconds and precision
//!   - `PackedTemporalEncoder`: The engine's packed DATE/TIME/DATETIME layouts
//!
//! - **Row** (`row`): Whole-row layout with a null bitmap and fixed column slots
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use rowcodec::codec::{CharsetService, ColumnCodec, Value};
//! use rowcodec::common::{ColumnDescriptor, ColumnType};
//!
//! let codec = ColumnCodec::new(Arc::new(CharsetService::new()));
//! let column = ColumnDescriptor::new(ColumnType::VarChar.code(), 32, 45);
//!
//! let mut buffer = vec![0u8; 64];
//! let written = codec.write(&column, &Value::from("hello"), &mut buffer, 0).unwrap();
//! assert_eq!(written, 6);
//! assert_eq!(codec.read(&column, &buffer, 0).unwrap(), Value::from("hello"));
//! ```

pub mod codec;
pub mod common;
pub mod row;
pub mod temporal;

// Re-export commonly used types at the crate root
pub use codec::{ColumnCodec, Value};
pub use common::{CodecError, ColumnDescriptor, ColumnType, Result};
pub use temporal::TemporalValue;
