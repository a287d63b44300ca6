//! Binary persistence codec
//!
//! The `.cfgx` format stores a tree's mapping form with an explicit type tag
//! on every scalar, so integers, floats, booleans, strings and nulls come back
//! exactly as they went in.
//!
//! # Format
//!
//! ```text
//! magic   "CFGX"            4 bytes
//! version u8                currently 1
//! body    value             root must be a MAP
//! digest  SHA-256(body)     32 bytes
//!
//! value := tag u8, payload
//!   0x00 NULL
//!   0x01 BOOL    u8 (0 or 1)
//!   0x02 INT     i64 little-endian
//!   0x03 FLOAT   f64 little-endian
//!   0x04 STRING  u32 LE byte length, UTF-8 bytes
//!   0x05 MAP     u32 LE entry count, then (key, value) pairs,
//!                key = u32 LE byte length, UTF-8 bytes
//! ```
//!
//! Decoding validates the header and digest before parsing and never returns
//! a partially populated mapping.

mod reader;
mod writer;

pub use reader::from_bytes;
pub use writer::to_bytes;

use crate::error::Result;
use crate::storage::StorageBackend;
use log::debug;
use serde_json::{Map, Value};
use std::io::{Read, Write};

/// File magic
pub const MAGIC: &[u8; 4] = b"CFGX";
/// Current format version
pub const VERSION: u8 = 1;
/// Magic plus version byte
pub const HEADER_SIZE: usize = 5;
/// SHA-256 trailer
pub const DIGEST_SIZE: usize = 32;
/// Deepest nesting accepted on either side of the codec
pub const MAX_DEPTH: usize = 128;

pub(crate) const TAG_NULL: u8 = 0x00;
pub(crate) const TAG_BOOL: u8 = 0x01;
pub(crate) const TAG_INT: u8 = 0x02;
pub(crate) const TAG_FLOAT: u8 = 0x03;
pub(crate) const TAG_STRING: u8 = 0x04;
pub(crate) const TAG_MAP: u8 = 0x05;

/// Encode a mapping and write it to `sink`
///
/// # Errors
///
/// Returns an error if the mapping holds values the format cannot represent
/// or if writing to `sink` fails.
pub fn save<W: Write>(data: &Map<String, Value>, sink: &mut W) -> Result<()> {
    let bytes = to_bytes(data)?;
    sink.write_all(&bytes)?;
    sink.flush()?;
    debug!("Encoded {} top-level keys into {} bytes", data.len(), bytes.len());
    Ok(())
}

/// Read everything from `source` and decode it
///
/// # Errors
///
/// Returns `Error::Io` if reading fails, `Error::Format` if the bytes are
/// truncated or structurally invalid.
pub fn load<R: Read>(source: &mut R) -> Result<Map<String, Value>> {
    let mut bytes = Vec::new();
    source.read_to_end(&mut bytes)?;
    from_bytes(&bytes)
}

/// Binary storage backend (`.cfgx` files)
#[derive(Clone, Copy, Debug, Default)]
pub struct BinaryStorage;

impl BinaryStorage {
    pub fn new() -> Self {
        Self
    }
}

impl StorageBackend for BinaryStorage {
    fn extension(&self) -> &str {
        "cfgx"
    }

    fn encode(&self, data: &Map<String, Value>) -> Result<Vec<u8>> {
        to_bytes(data)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Map<String, Value>> {
        from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn sample() -> Map<String, Value> {
        match json!({
            "server": {
                "name": "Alpha",
                "port": 8080,
                "active": true,
                "load": 45.5,
                "motd": null,
            },
            "empty": {},
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_stream_roundtrip() {
        let mut buf = Vec::new();
        save(&sample(), &mut buf).unwrap();
        assert_eq!(&buf[..4], MAGIC);

        let loaded = load(&mut Cursor::new(buf)).unwrap();
        assert_eq!(loaded, sample());
        assert!(loaded["server"]["port"].is_i64());
        assert!(loaded["server"]["load"].is_f64());
        assert!(loaded["server"]["active"].is_boolean());
    }

    #[test]
    fn test_whole_float_stays_float() {
        let mut map = Map::new();
        map.insert("x".into(), json!(2.0));
        let loaded = from_bytes(&to_bytes(&map).unwrap()).unwrap();
        assert!(loaded["x"].is_f64());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("system.cfgx");
        let storage = BinaryStorage::new();

        storage.write(&path, &sample()).unwrap();
        assert_eq!(storage.read(&path).unwrap(), sample());
    }

    #[test]
    fn test_load_empty_source() {
        let err = load(&mut Cursor::new(Vec::<u8>::new())).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }
}
