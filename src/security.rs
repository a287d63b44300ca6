//! File permissions for saved configuration files

use crate::error::{Error, Result};
use std::path::Path;

/// Restrict a saved config file to its owner (Unix: 0o600)
///
/// Configuration trees often carry credentials, so files written through a
/// [`StorageBackend`](crate::StorageBackend) are made owner read/write only.
///
/// # Errors
///
/// * `Error::FileRead` - If the file metadata cannot be read
/// * `Error::FileWrite` - If the permissions cannot be changed
#[cfg(unix)]
pub fn set_secure_file_permissions(path: &Path) -> Result<()> {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut perms = metadata.permissions();
    perms.set_mode(0o600);

    fs::set_permissions(path, perms).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// No-op on Windows (permissions managed via ACLs)
#[cfg(not(unix))]
pub fn set_secure_file_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_secure_file_permissions() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("system.cfgx");

        fs::write(&file_path, b"CFGX").unwrap();

        set_secure_file_permissions(&file_path).unwrap();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&file_path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = set_secure_file_permissions(&dir.path().join("absent.cfgx"));

        #[cfg(unix)]
        assert!(matches!(result, Err(Error::FileRead { .. })));
        #[cfg(not(unix))]
        assert!(result.is_ok());
    }
}
