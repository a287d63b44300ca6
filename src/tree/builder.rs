//! Builder for ConfigTree
//!
//! This module contains [`ConfigTreeBuilder`] which provides a fluent API
//! for creating a [`ConfigTree`].

use crate::error::Result;
use crate::tree::core::ConfigTree;
use serde_json::Value;

/// Builder for creating a [`ConfigTree`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use configx::ConfigTree;
/// use serde_json::json;
///
/// let tree = ConfigTree::builder()
///     .strict_mode(true)
///     .data(json!({"server": {"port": 8080}}))
///     .build()?;
///
/// // Existing leaves can be updated, new nodes are refused
/// let mut tree = tree;
/// assert!(tree.set("server.port", 9090).is_ok());
/// assert!(tree.set("cache.size", 64).is_err());
/// # Ok::<(), configx::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigTreeBuilder {
    strict_mode: bool,
    data: Option<Value>,
}

impl ConfigTreeBuilder {
    /// Create a new builder (lenient, empty)
    pub fn new() -> Self {
        Self::default()
    }

    /// Forbid writes from creating missing nodes
    pub fn strict_mode(mut self, enabled: bool) -> Self {
        self.strict_mode = enabled;
        self
    }

    /// Initial content, loaded as with [`ConfigTree::load_dict`].
    ///
    /// Strict mode does not apply to the initial load.
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Build the [`ConfigTree`].
    ///
    /// # Errors
    ///
    /// Returns an error if the initial data is not a valid mapping.
    pub fn build(self) -> Result<ConfigTree> {
        let mut tree = ConfigTree::new();
        if let Some(data) = &self.data {
            tree.load_dict(data)?;
        }
        tree.set_strict_mode(self.strict_mode);
        Ok(tree)
    }
}
