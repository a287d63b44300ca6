//! Tree nodes
//!
//! A [`Node`] is either a leaf holding a [`Scalar`] or an interior node holding
//! named children. The two states are separate enum variants, so a node can
//! never carry a value and children at the same time.

use crate::error::{Error, Result};
use crate::tree::MAX_PATH_DEPTH;
use crate::value::{Scalar, ScalarType};
use serde_json::{Map, Value};

/// Payload of a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A single typed value, no children
    Leaf(Scalar),
    /// Named children in insertion order, no value
    Interior(Vec<Node>),
}

/// A named node in a configuration tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    kind: NodeKind,
}

impl Node {
    /// Create an empty interior node
    pub fn interior(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Interior(Vec::new()),
        }
    }

    /// Create a leaf node
    pub fn leaf(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Leaf(value.into()),
        }
    }

    /// The path segment this node occupies in its parent
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    pub fn is_interior(&self) -> bool {
        matches!(self.kind, NodeKind::Interior(_))
    }

    /// The scalar held by a leaf, `None` for interior nodes
    pub fn value(&self) -> Option<&Scalar> {
        match &self.kind {
            NodeKind::Leaf(scalar) => Some(scalar),
            NodeKind::Interior(_) => None,
        }
    }

    /// Type tag of a leaf's scalar, `None` for interior nodes
    pub fn scalar_type(&self) -> Option<ScalarType> {
        self.value().map(Scalar::scalar_type)
    }

    /// Children in insertion order (always empty for a leaf)
    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Interior(children) => children,
            NodeKind::Leaf(_) => &[],
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    /// Look up a direct child by name
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children().iter().find(|c| c.name == name)
    }

    pub(crate) fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        match &mut self.kind {
            NodeKind::Interior(children) => children.iter_mut().find(|c| c.name == name),
            NodeKind::Leaf(_) => None,
        }
    }

    /// Attach a child, replacing any existing child with the same name.
    ///
    /// Returns `None` when called on a leaf.
    pub(crate) fn insert_child(&mut self, node: Node) -> Option<&mut Node> {
        let NodeKind::Interior(children) = &mut self.kind else {
            return None;
        };
        match children.iter().position(|c| c.name == node.name) {
            Some(idx) => {
                children[idx] = node;
                Some(&mut children[idx])
            }
            None => {
                children.push(node);
                children.last_mut()
            }
        }
    }

    /// Detach a child together with its whole subtree
    pub(crate) fn remove_child(&mut self, name: &str) -> Option<Node> {
        let NodeKind::Interior(children) = &mut self.kind else {
            return None;
        };
        let idx = children.iter().position(|c| c.name == name)?;
        Some(children.remove(idx))
    }

    /// Turn this node into a leaf holding `value`.
    ///
    /// The caller must have checked that the node has no children.
    pub(crate) fn assign(&mut self, value: Scalar) {
        debug_assert!(!self.has_children());
        self.kind = NodeKind::Leaf(value);
    }

    /// Primitive projection: the scalar for a leaf, a nested mapping otherwise
    pub fn to_primitive(&self) -> Value {
        match &self.kind {
            NodeKind::Leaf(scalar) => scalar.to_value(),
            NodeKind::Interior(children) => Value::Object(children_to_map(children)),
        }
    }

    /// Build a subtree from a primitive value.
    ///
    /// Scalars become leaves, mappings become interior nodes built recursively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if any value at any depth is neither a
    /// scalar nor a mapping, is a number outside the supported range, or sits
    /// deeper than [`MAX_PATH_DEPTH`] counting this node as the first level.
    pub fn from_primitive(name: impl Into<String>, value: &Value) -> Result<Self> {
        let name = name.into();
        let location = name.clone();
        build(name, value, &location, 1)
    }
}

pub(crate) fn children_to_map(children: &[Node]) -> Map<String, Value> {
    children
        .iter()
        .map(|c| (c.name.clone(), c.to_primitive()))
        .collect()
}

fn build(name: String, value: &Value, location: &str, depth: usize) -> Result<Node> {
    if depth > MAX_PATH_DEPTH {
        return Err(Error::InvalidFormat(format!(
            "'{location}': nesting deeper than {MAX_PATH_DEPTH} levels"
        )));
    }

    match value {
        Value::Object(map) => {
            let mut children = Vec::with_capacity(map.len());
            for (key, child) in map {
                let child_location = format!("{location}.{key}");
                children.push(build(key.clone(), child, &child_location, depth + 1)?);
            }
            Ok(Node {
                name,
                kind: NodeKind::Interior(children),
            })
        }
        other => {
            let scalar = Scalar::from_value(other)
                .map_err(|reason| Error::InvalidFormat(format!("'{location}': {reason}")))?;
            Ok(Node {
                name,
                kind: NodeKind::Leaf(scalar),
            })
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
