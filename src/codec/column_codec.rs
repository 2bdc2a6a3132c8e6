use std::sync::Arc;

use super::{CharsetService, CodecContext, Encoder, EncoderRegistry, RowBuffer, Value};
use crate::common::{CodecConfig, CodecError, ColumnDescriptor, Result};

/// Entry point for reading and writing single column values.
///
/// Bundles the encoder table, the charset service the string encoders
/// delegate to, and codec configuration. Every call is independent; the
/// codec holds no per-call state.
pub struct ColumnCodec {
    registry: EncoderRegistry,
    charsets: Arc<CharsetService>,
    config: CodecConfig,
}

impl ColumnCodec {
    pub fn new(charsets: Arc<CharsetService>) -> Self {
        Self::with_config(charsets, CodecConfig::default())
    }

    pub fn with_config(charsets: Arc<CharsetService>, config: CodecConfig) -> Self {
        Self::with_registry(EncoderRegistry::new(), charsets, config)
    }

    pub fn with_registry(
        registry: EncoderRegistry,
        charsets: Arc<CharsetService>,
        config: CodecConfig,
    ) -> Self {
        Self {
            registry,
            charsets,
            config,
        }
    }

    pub fn registry(&self) -> &EncoderRegistry {
        &self.registry
    }

    pub fn charsets(&self) -> &Arc<CharsetService> {
        &self.charsets
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn context(&self) -> CodecContext<'_> {
        CodecContext {
            charsets: &self.charsets,
            config: &self.config,
        }
    }

    /// Returns the encoder for the column, failing on a registry miss.
    pub fn encoder(&self, column: &ColumnDescriptor) -> Result<&Encoder> {
        self.registry
            .lookup(column.type_code)
            .ok_or(CodecError::UnsupportedColumnType(column.type_code))
    }

    pub fn read(
        &self,
        column: &ColumnDescriptor,
        buffer: &dyn RowBuffer,
        offset: usize,
    ) -> Result<Value> {
        self.encoder(column)?.read(self.context(), column, buffer, offset)
    }

    pub fn write(
        &self,
        column: &ColumnDescriptor,
        value: &Value,
        buffer: &mut dyn RowBuffer,
        offset: usize,
    ) -> Result<usize> {
        self.encoder(column)?.write(self.context(), column, value, buffer, offset)
    }
}
