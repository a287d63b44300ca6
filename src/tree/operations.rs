use crate::error::{Error, Result};
use crate::node::Node;
use crate::tree::core::{ConfigTree, ROOT_NAME};
use crate::tree::path::{join, normalize_and_split};
use crate::value::{Scalar, ScalarType};

use log::debug;
use serde_json::Value;

impl ConfigTree {
    /// Get the primitive projection of the node at `path`.
    ///
    /// Leaves project to their scalar, interior nodes to a nested mapping
    /// (an empty mapping if they have no children).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path is empty or only dots/whitespace
    /// - No node exists at the path
    pub fn get(&self, path: &str) -> Result<Value> {
        let segments = normalize_and_split(path)?;
        self.walk(&segments)
            .map(Node::to_primitive)
            .ok_or_else(|| Error::PathNotFound(path.to_string()))
    }

    /// Get a value and deserialize it into `T`.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`ConfigTree::get`], or [`Error::Parse`] if
    /// the value cannot be deserialized to `T`.
    pub fn get_as<T>(&self, path: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let value = self.get(path)?;
        serde_json::from_value(value).map_err(|e| Error::Parse(format!("'{path}': {e}")))
    }

    /// Borrow the node at `path`, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid.
    pub fn node(&self, path: &str) -> Result<Option<&Node>> {
        let segments = normalize_and_split(path)?;
        Ok(self.walk(&segments))
    }

    /// Check whether a node exists at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid.
    pub fn contains(&self, path: &str) -> Result<bool> {
        Ok(self.node(path)?.is_some())
    }

    /// Type tag of the leaf at `path`; `None` for an interior node.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid or does not exist.
    pub fn type_of(&self, path: &str) -> Result<Option<ScalarType>> {
        self.node(path)?
            .map(Node::scalar_type)
            .ok_or_else(|| Error::PathNotFound(path.to_string()))
    }

    /// Names of the children of the interior node at `path`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid, missing, or names a leaf.
    pub fn keys(&self, path: &str) -> Result<Vec<String>> {
        let node = self
            .node(path)?
            .ok_or_else(|| Error::PathNotFound(path.to_string()))?;
        if node.is_leaf() {
            return Err(Error::structure(path, "a leaf has no children"));
        }
        Ok(node.children().iter().map(|c| c.name().to_string()).collect())
    }

    /// Full dotted paths of every leaf, depth-first in insertion order
    pub fn leaf_paths(&self) -> Vec<String> {
        fn collect_leaves(node: &Node, prefix: &mut Vec<String>, out: &mut Vec<String>) {
            for child in node.children() {
                prefix.push(child.name().to_string());
                if child.is_leaf() {
                    out.push(join(prefix));
                } else {
                    collect_leaves(child, prefix, out);
                }
                prefix.pop();
            }
        }

        let mut out = Vec::new();
        collect_leaves(&self.root, &mut Vec::new(), &mut out);
        out
    }

    /// Assign a scalar to the node at `path` and return the stored value.
    ///
    /// Missing intermediate nodes are created as interior nodes unless strict
    /// mode is on. An existing leaf is overwritten; an interior node with no
    /// children becomes a leaf. The type tag is taken from the scalar variant.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path is invalid or deeper than [`MAX_PATH_DEPTH`](crate::MAX_PATH_DEPTH)
    /// - Strict mode is on and any node on the path is missing
    /// - The target node has children (a write never drops a subtree)
    /// - An intermediate node on the path is a leaf
    /// - The value is a non-finite float
    ///
    /// Nothing is modified when an error is returned.
    pub fn set(&mut self, path: &str, value: impl Into<Scalar>) -> Result<Scalar> {
        let value = value.into();
        let segments = normalize_and_split(path)?;

        value.check().map_err(|reason| Error::InvalidValue {
            path: path.to_string(),
            reason,
        })?;

        // Refuse interior targets up front so lenient mode cannot create
        // anything for a write that is going to fail.
        if self.walk(&segments).is_some_and(Node::has_children) {
            return Err(Error::structure(
                path,
                "cannot assign a scalar to a node that has children",
            ));
        }

        let node = self.walk_or_create(path, &segments)?;
        node.assign(value.clone());

        debug!("Set {path} = {value} ({})", value.scalar_type());
        Ok(value)
    }

    /// Assign a scalar given as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if `value` is an array, an object, or an
    /// integer beyond the signed 64-bit range, plus all errors of [`ConfigTree::set`].
    pub fn set_value(&mut self, path: &str, value: &Value) -> Result<Scalar> {
        let scalar = Scalar::from_value(value).map_err(|reason| Error::InvalidValue {
            path: path.to_string(),
            reason,
        })?;
        self.set(path, scalar)
    }

    /// Delete the node at `path` together with its subtree.
    ///
    /// Returns `true` if a node was removed and `false` if nothing existed at
    /// the path; deleting a missing path is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid or names the root.
    pub fn delete(&mut self, path: &str) -> Result<bool> {
        let segments = normalize_and_split(path)?;

        if segments.len() == 1 && segments[0] == ROOT_NAME {
            return Err(Error::structure(path, "cannot delete the root node"));
        }

        let Some((key, parent_segments)) = segments.split_last() else {
            return Ok(false);
        };

        // The parent is re-walked from the root; nodes keep no parent links
        let parent = if parent_segments.is_empty() {
            Some(&mut self.root)
        } else {
            self.walk_mut(parent_segments)
        };

        let Some(parent) = parent else {
            debug!("Delete {path}: parent not found");
            return Ok(false);
        };

        match parent.remove_child(key) {
            Some(_) => {
                debug!("Deleted {path}");
                Ok(true)
            }
            None => {
                debug!("Delete {path}: no such node");
                Ok(false)
            }
        }
    }

    /// Mutable counterpart of `walk`, never creates nodes
    fn walk_mut(&mut self, segments: &[String]) -> Option<&mut Node> {
        let mut node = &mut self.root;
        for segment in segments {
            node = node.child_mut(segment)?;
        }
        Some(node)
    }
}

// =============================================================================
// Tests
// =============================================================================
