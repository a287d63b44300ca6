//! Dotted path parsing

use crate::error::{Error, Result};

/// Separator between path segments
pub const SEPARATOR: char = '.';

/// Deepest node a tree can hold, counted in path segments below the root.
///
/// Every tree within this depth encodes in the binary format and parses back
/// from JSON (serde_json stops at 128 nested mappings, the root included).
pub const MAX_PATH_DEPTH: usize = 126;

/// Normalize a dotted path and split it into segments.
///
/// Surrounding whitespace is trimmed and empty segments (from leading,
/// trailing, or repeated dots) are dropped. Segments are case-sensitive and
/// otherwise kept verbatim.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if no segment remains.
///
/// # Example
///
/// ```
/// use configx::normalize_and_split;
///
/// assert_eq!(normalize_and_split(" a..b.c ").unwrap(), vec!["a", "b", "c"]);
/// assert!(normalize_and_split("...").is_err());
/// ```
pub fn normalize_and_split(path: &str) -> Result<Vec<String>> {
    let segments: Vec<String> = path
        .trim()
        .split(SEPARATOR)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if segments.is_empty() {
        return Err(Error::invalid_path(path, "path cannot be empty"));
    }

    Ok(segments)
}

/// Join segments back into a dotted path
pub(crate) fn join(segments: &[String]) -> String {
    segments.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_split() {
        assert_eq!(
            normalize_and_split("server.port").unwrap(),
            vec!["server", "port"]
        );
    }

    #[test]
    fn test_trims_and_drops_empty_segments() {
        assert_eq!(
            normalize_and_split("  .a..b.  ").unwrap(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_inner_whitespace_kept() {
        assert_eq!(normalize_and_split("a. b").unwrap(), vec!["a", " b"]);
    }

    #[test]
    fn test_empty_paths_rejected() {
        for path in ["", "   ", ".", "...", "\t.\n"] {
            assert!(
                matches!(normalize_and_split(path), Err(Error::InvalidPath { .. })),
                "expected InvalidPath for {path:?}"
            );
        }
    }

    #[test]
    fn test_only_outer_whitespace_trimmed() {
        // Spaces between dots are segment content, not padding
        assert_eq!(normalize_and_split(" . . ").unwrap(), vec![" "]);
    }

    #[test]
    fn test_case_sensitive() {
        assert_ne!(
            normalize_and_split("Server").unwrap(),
            normalize_and_split("server").unwrap()
        );
    }

    #[test]
    fn test_join() {
        let segments = normalize_and_split("a.b.c").unwrap();
        assert_eq!(join(&segments), "a.b.c");
    }
}
