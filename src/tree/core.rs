use crate::error::{Error, Result};
use crate::node::Node;
use crate::tree::builder::ConfigTreeBuilder;
use crate::tree::path::{MAX_PATH_DEPTH, join};

use log::debug;

/// Name of the anchor node every tree hangs from
pub const ROOT_NAME: &str = "root";

/// Hierarchical configuration store addressed by dotted paths.
///
/// The tree owns a single interior root node. Every other node is reachable
/// from it through the children chain, and each node owns its children
/// exclusively, so deleting a node drops its whole subtree.
///
/// # Example
///
/// ```rust
/// use configx::{ConfigTree, Error};
/// use serde_json::json;
///
/// let mut tree = ConfigTree::new();
/// tree.set("server.port", 8080)?;
/// tree.set("server.name", "alpha")?;
///
/// assert_eq!(tree.get("server.port")?, json!(8080));
/// assert_eq!(tree.get("server")?, json!({"port": 8080, "name": "alpha"}));
///
/// // An interior node cannot be overwritten by a scalar
/// assert!(matches!(tree.set("server", 1), Err(Error::NodeStructure { .. })));
/// # Ok::<(), configx::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigTree {
    /// Anchor of the tree, always interior
    pub(crate) root: Node,

    /// When set, writes may not create missing nodes
    pub(crate) strict_mode: bool,
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigTree {
    /// Create an empty tree in lenient mode
    pub fn new() -> Self {
        Self::with_strict_mode(false)
    }

    /// Create an empty tree with the given strict-mode setting
    pub fn with_strict_mode(strict_mode: bool) -> Self {
        Self {
            root: Node::interior(ROOT_NAME),
            strict_mode,
        }
    }

    /// Create a new builder for `ConfigTree`
    ///
    /// # Example
    /// ```rust
    /// use configx::ConfigTree;
    /// use serde_json::json;
    ///
    /// let tree = ConfigTree::builder()
    ///     .data(json!({"server": {"port": 8080}}))
    ///     .strict_mode(true)
    ///     .build()?;
    /// assert!(tree.is_strict());
    /// # Ok::<(), configx::Error>(())
    /// ```
    pub fn builder() -> ConfigTreeBuilder {
        ConfigTreeBuilder::new()
    }

    pub fn is_strict(&self) -> bool {
        self.strict_mode
    }

    /// Toggle strict mode at runtime.
    ///
    /// Only affects subsequent writes; existing nodes are not re-validated.
    pub fn set_strict_mode(&mut self, enabled: bool) {
        self.strict_mode = enabled;
        debug!("Strict mode set to {enabled}");
    }

    /// The root node
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// True when the root has no children
    pub fn is_empty(&self) -> bool {
        !self.root.has_children()
    }

    /// Resolve segments without creating anything.
    ///
    /// Returns `None` as soon as a segment is missing; descending through a
    /// leaf finds nothing since leaves have no children.
    pub(crate) fn walk(&self, segments: &[String]) -> Option<&Node> {
        segments
            .iter()
            .try_fold(&self.root, |node, segment| node.child(segment))
    }

    /// Resolve segments, creating missing interior nodes unless strict mode is on.
    ///
    /// Paths deeper than [`MAX_PATH_DEPTH`] are refused up front.
    ///
    /// Errors are only raised before the first node is created: once a node
    /// is created every later segment is missing too, so the walk cannot fail
    /// halfway through and leave partial state behind.
    pub(crate) fn walk_or_create(&mut self, path: &str, segments: &[String]) -> Result<&mut Node> {
        if segments.len() > MAX_PATH_DEPTH {
            return Err(Error::invalid_path(
                path,
                format!(
                    "{} segments exceeds the maximum depth of {MAX_PATH_DEPTH}",
                    segments.len()
                ),
            ));
        }

        let strict = self.strict_mode;
        let mut node = &mut self.root;

        for (idx, segment) in segments.iter().enumerate() {
            if node.is_leaf() {
                return Err(Error::structure(
                    path,
                    format!(
                        "'{}' holds a value and cannot have children",
                        join(&segments[..idx])
                    ),
                ));
            }

            let next = if node.child(segment).is_some() {
                node.child_mut(segment)
            } else {
                if strict {
                    return Err(Error::StrictModeViolation(path.to_string()));
                }
                debug!("Creating interior node '{}'", join(&segments[..=idx]));
                node.insert_child(Node::interior(segment.clone()))
            };
            node = next.ok_or_else(|| Error::PathNotFound(path.to_string()))?;
        }

        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::path::normalize_and_split;

    fn segments(path: &str) -> Vec<String> {
        normalize_and_split(path).unwrap()
    }

    #[test]
    fn test_new_tree_is_empty() {
        let tree = ConfigTree::new();
        assert!(tree.is_empty());
        assert!(!tree.is_strict());
        assert_eq!(tree.root().name(), ROOT_NAME);
        assert!(tree.root().is_interior());
    }

    #[test]
    fn test_walk_missing_returns_none() {
        let tree = ConfigTree::new();
        assert!(tree.walk(&segments("a.b")).is_none());
    }

    #[test]
    fn test_walk_or_create_builds_interiors() {
        let mut tree = ConfigTree::new();
        let node = tree.walk_or_create("a.b.c", &segments("a.b.c")).unwrap();
        assert_eq!(node.name(), "c");
        assert!(node.is_interior());

        let b = tree.walk(&segments("a.b")).unwrap();
        assert!(b.child("c").is_some());
    }

    #[test]
    fn test_walk_or_create_strict() {
        let mut tree = ConfigTree::with_strict_mode(true);
        let err = tree.walk_or_create("x.y", &segments("x.y")).unwrap_err();
        assert!(matches!(err, Error::StrictModeViolation(ref p) if p == "x.y"));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_walk_or_create_reuses_existing() {
        let mut tree = ConfigTree::new();
        tree.walk_or_create("a.b", &segments("a.b")).unwrap();
        tree.set_strict_mode(true);
        assert!(tree.walk_or_create("a.b", &segments("a.b")).is_ok());
    }

    #[test]
    fn test_walk_or_create_depth_limit() {
        let mut tree = ConfigTree::new();
        let deepest = vec!["n"; MAX_PATH_DEPTH].join(".");
        assert!(tree.walk_or_create(&deepest, &segments(&deepest)).is_ok());

        let too_deep = format!("{deepest}.n");
        let err = tree.walk_or_create(&too_deep, &segments(&too_deep)).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn test_walk_or_create_through_leaf() {
        let mut tree = ConfigTree::new();
        tree.root.insert_child(Node::leaf("a", 1));
        let err = tree.walk_or_create("a.b", &segments("a.b")).unwrap_err();
        assert!(matches!(err, Error::NodeStructure { .. }));
        assert!(tree.walk(&segments("a.b")).is_none());
    }
}
