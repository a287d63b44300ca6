//! Storage backend trait and implementations

use crate::error::{Error, Result};
use log::{debug, warn};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Trait for persisting a tree's mapping form
///
/// A backend turns the nested mapping produced by
/// [`ConfigTree::to_dict`](crate::ConfigTree::to_dict) into bytes and back.
/// File handling (atomic replace, parent directories, permissions) is shared
/// through the provided `read`/`write` methods.
pub trait StorageBackend: Clone + Send + Sync {
    /// File extension for this storage format (e.g., "cfgx", "json")
    fn extension(&self) -> &str;

    /// Encode a mapping to bytes
    fn encode(&self, data: &Map<String, Value>) -> Result<Vec<u8>>;

    /// Decode bytes into a mapping.
    ///
    /// Must fail rather than return a partially populated mapping.
    fn decode(&self, bytes: &[u8]) -> Result<Map<String, Value>>;

    /// Read and decode from file
    fn read(&self, path: &Path) -> Result<Map<String, Value>> {
        let bytes = std::fs::read(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());
        self.decode(&bytes)
    }

    /// Encode and write to file
    ///
    /// Uses atomic write: writes to temp file then renames to prevent corruption.
    fn write(&self, path: &Path, data: &Map<String, Value>) -> Result<()> {
        let content = self.encode(data)?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        // Atomic write: temp file + rename
        // Use .tmp suffix append to preserve original filename fully
        let file_name = path.file_name().ok_or_else(|| Error::FileWrite {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path must have a filename",
            ),
        })?;
        let mut temp_filename = file_name.to_os_string();
        temp_filename.push(".tmp");
        let temp_path = path.with_file_name(temp_filename);

        if let Err(e) = std::fs::write(&temp_path, &content) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(Error::FileWrite {
                path: temp_path,
                source: e,
            });
        }

        if let Err(e) = std::fs::rename(&temp_path, path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(Error::FileWrite {
                path: path.to_path_buf(),
                source: e,
            });
        }

        if let Err(e) = crate::security::set_secure_file_permissions(path) {
            warn!("Could not restrict permissions on {}: {e}", path.display());
        }

        debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }
}

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.starts_with("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(path.strip_prefix("~").unwrap_or(path));
        }
    }
    path.to_path_buf()
}

// =============================================================================
// JSON Storage Implementation
// =============================================================================

/// JSON storage backend for human-readable exports
///
/// Integer and float kinds survive a JSON round trip (`8080` vs `8080.0`),
/// so this backend is type-preserving for every scalar kind the tree holds.
#[cfg(feature = "json")]
#[derive(Clone, Default)]
pub struct JsonStorage {
    /// Pretty print JSON output
    pretty: bool,
}

#[cfg(feature = "json")]
impl JsonStorage {
    /// Create a new JSON storage backend with pretty printing enabled
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Create a compact JSON storage (no pretty printing)
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

#[cfg(feature = "json")]
impl StorageBackend for JsonStorage {
    fn extension(&self) -> &str {
        "json"
    }

    fn encode(&self, data: &Map<String, Value>) -> Result<Vec<u8>> {
        if self.pretty {
            serde_json::to_vec_pretty(data).map_err(Error::from)
        } else {
            serde_json::to_vec(data).map_err(Error::from)
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<Map<String, Value>> {
        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::InvalidFormat(
                "top-level JSON value must be an object".into(),
            )),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn sample() -> Map<String, Value> {
        match json!({"server": {"name": "alpha", "port": 8080, "load": 45.0}}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_json_encode_pretty() {
        let bytes = JsonStorage::new().encode(&sample()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains('\n')); // Pretty printed
        assert!(text.contains("\"port\": 8080"));
    }

    #[test]
    fn test_json_encode_compact() {
        let bytes = JsonStorage::compact().encode(&sample()).unwrap();
        assert!(!bytes.contains(&b'\n'));
    }

    #[test]
    fn test_json_roundtrip_keeps_float_kind() {
        let storage = JsonStorage::new();
        let dir = tempdir().unwrap();
        let path = dir.path().join("subdir/config.json");

        storage.write(&path, &sample()).unwrap();
        let loaded = storage.read(&path).unwrap();

        assert_eq!(loaded, sample());
        assert!(loaded["server"]["load"].is_f64());
        assert!(loaded["server"]["port"].is_i64());
        assert!(!dir.path().join("subdir/config.json.tmp").exists());
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let storage = JsonStorage::new();
        let dir = tempdir().unwrap();
        // Renaming a file over a non-empty directory fails
        let path = dir.path().join("config.json");
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        let err = storage.write(&path, &sample()).unwrap_err();
        assert!(matches!(err, Error::FileWrite { .. }));
        assert!(!dir.path().join("config.json.tmp").exists());
    }

    #[test]
    fn test_failed_temp_write_reports_temp_path() {
        let storage = JsonStorage::new();
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        // The temp file name is taken by a directory, so writing it fails
        std::fs::create_dir_all(dir.path().join("config.json.tmp")).unwrap();

        match storage.write(&path, &sample()).unwrap_err() {
            Error::FileWrite { path: failed, .. } => {
                assert_eq!(failed, dir.path().join("config.json.tmp"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_json_decode_non_object() {
        let result = JsonStorage::new().decode(b"[1, 2]");
        assert!(matches!(result, Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = JsonStorage::new().read(Path::new("/nonexistent/file.json"));
        assert!(matches!(result.unwrap_err(), Error::FileRead { .. }));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/etc/app.cfgx"), PathBuf::from("/etc/app.cfgx"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/app.cfgx"), home.join("app.cfgx"));
        }
    }
}
