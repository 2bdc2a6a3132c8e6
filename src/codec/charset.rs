use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::common::{CodecError, Result, DEFAULT_CHARSET_ID};

/// A character set that string columns re-encode through.
///
/// Conversion is opaque to the codec: it only asks for bytes in, string out,
/// and where a byte sequence may be cut without splitting a character.
pub trait Charset: Send + Sync {
    fn name(&self) -> &'static str;

    fn encode(&self, s: &str) -> Result<Vec<u8>>;

    fn decode(&self, bytes: &[u8]) -> Result<String>;

    /// Returns the length of the longest prefix of `bytes` that is at most
    /// `max` bytes and ends on a character boundary.
    fn fit(&self, bytes: &[u8], max: usize) -> usize {
        bytes.len().min(max)
    }

    /// Byte used to pad fixed-length columns.
    fn pad_byte(&self) -> u8 {
        b' '
    }
}

pub struct Utf8;

impl Charset for Utf8 {
    fn name(&self) -> &'static str {
        "utf8mb4"
    }

    fn encode(&self, s: &str) -> Result<Vec<u8>> {
        Ok(s.as_bytes().to_vec())
    }

    fn decode(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::Undecodable(self.name()))
    }

    fn fit(&self, bytes: &[u8], max: usize) -> usize {
        if bytes.len() <= max {
            return bytes.len();
        }
        let mut end = max;
        // Back off continuation bytes (10xxxxxx)
        while end > 0 && bytes[end] & 0xc0 == 0x80 {
            end -= 1;
        }
        end
    }
}

pub struct Latin1;

impl Charset for Latin1 {
    fn name(&self) -> &'static str {
        "latin1"
    }

    fn encode(&self, s: &str) -> Result<Vec<u8>> {
        s.chars()
            .map(|ch| {
                u8::try_from(ch as u32).map_err(|_| CodecError::Unmappable {
                    charset: self.name(),
                    ch,
                })
            })
            .collect()
    }

    fn decode(&self, bytes: &[u8]) -> Result<String> {
        Ok(bytes.iter().map(|&b| b as char).collect())
    }
}

pub struct Ascii;

impl Charset for Ascii {
    fn name(&self) -> &'static str {
        "ascii"
    }

    fn encode(&self, s: &str) -> Result<Vec<u8>> {
        match s.chars().find(|ch| !ch.is_ascii()) {
            Some(ch) => Err(CodecError::Unmappable {
                charset: self.name(),
                ch,
            }),
            None => Ok(s.as_bytes().to_vec()),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<String> {
        if !bytes.is_ascii() {
            return Err(CodecError::Undecodable(self.name()));
        }
        Ok(bytes.iter().map(|&b| b as char).collect())
    }
}

/// Resolves charset ids to [`Charset`] implementations.
///
/// Created once by the embedding application and shared by reference (or
/// `Arc`) with every codec. Lookups take a read lock; registration is rare.
pub struct CharsetService {
    charsets: RwLock<HashMap<u16, Arc<dyn Charset>>>,
    default_id: u16,
}

impl CharsetService {
    /// Creates a service with the built-in charsets registered.
    pub fn new() -> Self {
        Self::with_default_charset(DEFAULT_CHARSET_ID)
    }

    /// Creates a service that resolves charset id 0 to `default_id`.
    pub fn with_default_charset(default_id: u16) -> Self {
        let utf8: Arc<dyn Charset> = Arc::new(Utf8);
        let latin1: Arc<dyn Charset> = Arc::new(Latin1);
        let ascii: Arc<dyn Charset> = Arc::new(Ascii);

        let mut charsets = HashMap::new();
        for id in [33, 45, 46, 83, 192, 224, 255] {
            charsets.insert(id, utf8.clone());
        }
        for id in [5, 8, 15, 31, 47, 48, 49, 94] {
            charsets.insert(id, latin1.clone());
        }
        for id in [11, 65] {
            charsets.insert(id, ascii.clone());
        }
        debug!(count = charsets.len(), default_id, "charset service initialized");

        Self {
            charsets: RwLock::new(charsets),
            default_id,
        }
    }

    /// Registers (or replaces) the charset for `id`.
    pub fn register(&self, id: u16, charset: Arc<dyn Charset>) {
        debug!(id, name = charset.name(), "registering charset");
        self.charsets.write().insert(id, charset);
    }

    /// Returns the charset for `id`; id 0 means the default charset.
    pub fn get(&self, id: u16) -> Result<Arc<dyn Charset>> {
        let id = if id == 0 { self.default_id } else { id };
        self.charsets
            .read()
            .get(&id)
            .cloned()
            .ok_or(CodecError::UnknownCharset(id))
    }

    pub fn default_id(&self) -> u16 {
        self.default_id
    }
}

impl Default for CharsetService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_fit_respects_char_boundary() {
        let bytes = "aé€".as_bytes(); // 1 + 2 + 3 bytes
        assert_eq!(Utf8.fit(bytes, 6), 6);
        assert_eq!(Utf8.fit(bytes, 5), 3);
        assert_eq!(Utf8.fit(bytes, 2), 1);
        assert_eq!(Utf8.fit(bytes, 0), 0);
    }

    #[test]
    fn test_latin1() {
        assert_eq!(Latin1.encode("café").unwrap(), vec![b'c', b'a', b'f', 0xe9]);
        assert_eq!(Latin1.decode(&[b'c', 0xe9]).unwrap(), "cé");
        assert!(matches!(
            Latin1.encode("€"),
            Err(CodecError::Unmappable { ch: '€', .. })
        ));
    }

    #[test]
    fn test_ascii_rejects_high_bytes() {
        assert!(Ascii.decode(&[0x80]).is_err());
        assert!(Ascii.encode("é").is_err());
        assert_eq!(Ascii.decode(b"ok").unwrap(), "ok");
    }

    #[test]
    fn test_service_lookup() {
        let service = CharsetService::new();
        assert_eq!(service.get(8).unwrap().name(), "latin1");
        assert_eq!(service.get(0).unwrap().name(), "utf8mb4");
        assert_eq!(service.get(9999).err(), Some(CodecError::UnknownCharset(9999)));

        service.register(9999, Arc::new(Ascii));
        assert_eq!(service.get(9999).unwrap().name(), "ascii");
    }
}
