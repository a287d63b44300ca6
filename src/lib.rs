//! # configx - Hierarchical Config Tree
//!
//! A hierarchical configuration store addressed by dotted paths
//! (`"server.port"`), with bulk import/export through nested mappings and a
//! binary file format that preserves the type of every value.
//!
//! ## Features
//!
//! - **Dotted Paths**: Read, write and delete nodes by `"a.b.c"` paths
//! - **Typed Leaves**: Strings, integers, floats, booleans and nulls keep their kind
//! - **Structural Safety**: A node is either a leaf or an interior node, never both
//! - **Strict Mode**: Optionally refuse writes that would create missing nodes
//! - **Persistence**: Binary `.cfgx` files with integrity check, or JSON export
//!
//! ## Quick Start
//!
//! ```rust
//! use configx::{ConfigTree, ScalarType};
//! use serde_json::json;
//!
//! let mut conf = ConfigTree::new();
//! conf.set("server.name", "Alpha")?;
//! conf.set("server.port", 8080)?;
//! conf.set("server.active", true)?;
//! conf.set("server.load", 45.5)?;
//!
//! assert_eq!(conf.get("server.port")?, json!(8080));
//! assert_eq!(conf.type_of("server.port")?, Some(ScalarType::Integer));
//!
//! // Deleting a node drops its whole subtree
//! assert!(conf.delete("server")?);
//! assert!(conf.get("server.port").is_err());
//! # Ok::<(), configx::Error>(())
//! ```
//!
//! ## Strict Mode
//!
//! ```rust
//! use configx::{ConfigTree, Error};
//!
//! let mut conf = ConfigTree::with_strict_mode(true);
//! assert!(matches!(conf.set("x.y", 1), Err(Error::StrictModeViolation(_))));
//!
//! conf.set_strict_mode(false);
//! conf.set("x.y", 1)?;
//! # Ok::<(), configx::Error>(())
//! ```
//!
//! ## Import / Export
//!
//! ```rust
//! use configx::ConfigTree;
//! use serde_json::{json, Value};
//!
//! let mut conf = ConfigTree::new();
//! conf.load_dict(&json!({"a": {"b": 1}}))?;
//! assert_eq!(Value::Object(conf.to_dict()), json!({"a": {"b": 1}}));
//! # Ok::<(), configx::Error>(())
//! ```
//!
//! ## Binary Persistence
//!
//! ```rust
//! use configx::ConfigTree;
//! use std::io::Cursor;
//!
//! let mut conf = ConfigTree::new();
//! conf.set("server.port", 8080)?;
//!
//! let mut bytes = Vec::new();
//! conf.save(&mut bytes)?;
//!
//! let mut restored = ConfigTree::new();
//! restored.load(&mut Cursor::new(bytes))?;
//! assert_eq!(restored.to_dict(), conf.to_dict());
//! # Ok::<(), configx::Error>(())
//! ```

mod error;
mod node;
mod tree;
mod value;

pub mod binary;
pub mod security;
pub mod storage;

pub use error::{Error, Result};
pub use node::{Node, NodeKind};
pub use tree::{
    ConfigTree, ConfigTreeBuilder, MAX_PATH_DEPTH, ROOT_NAME, SEPARATOR, normalize_and_split,
};
pub use value::{Scalar, ScalarType};

pub use binary::BinaryStorage;
#[cfg(feature = "json")]
pub use storage::JsonStorage;
pub use storage::StorageBackend;
