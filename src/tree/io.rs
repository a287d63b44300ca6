use crate::binary::{self, BinaryStorage};
use crate::error::{Error, Result};
use crate::node::{Node, children_to_map};
use crate::storage::{StorageBackend, expand_home};
use crate::tree::core::{ConfigTree, ROOT_NAME};

use log::info;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::io::{Read, Write};
use std::path::Path;

impl ConfigTree {
    /// Export the whole tree as a nested mapping of primitives.
    ///
    /// An empty tree exports an empty mapping.
    pub fn to_dict(&self) -> Map<String, Value> {
        if self.is_empty() {
            return Map::new();
        }
        children_to_map(self.root.children())
    }

    /// Replace the whole tree with nodes built from a nested mapping.
    ///
    /// The new tree is built completely before it is installed, so a failure
    /// at any depth leaves the current tree untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if `data` is not a mapping or contains
    /// a value that is neither a scalar nor a mapping at any depth.
    pub fn load_dict(&mut self, data: &Value) -> Result<()> {
        let Value::Object(map) = data else {
            return Err(Error::InvalidFormat(
                "top-level configuration must be a mapping".into(),
            ));
        };

        let mut root = Node::interior(ROOT_NAME);
        for (key, value) in map {
            root.insert_child(Node::from_primitive(key.clone(), value)?);
        }

        self.root = root;
        info!("Loaded {} top-level keys into config tree", map.len());
        Ok(())
    }

    /// Write the tree in binary form to `sink`
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if writing fails.
    pub fn save<W: Write>(&self, sink: &mut W) -> Result<()> {
        binary::save(&self.to_dict(), sink)
    }

    /// Replace the tree with binary data read from `source`.
    ///
    /// The tree is left unchanged if reading or decoding fails.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails and `Error::Format` if the data is
    /// truncated or malformed.
    pub fn load<R: Read>(&mut self, source: &mut R) -> Result<()> {
        let map = binary::load(source)?;
        self.load_dict(&Value::Object(map))
    }

    /// Save the tree to a binary `.cfgx` file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use configx::ConfigTree;
    ///
    /// let mut conf = ConfigTree::new();
    /// conf.set("server.port", 8080)?;
    /// conf.save_to_file("~/.config/app/system.cfgx")?;
    ///
    /// let mut restored = ConfigTree::new();
    /// restored.load_from_file("~/.config/app/system.cfgx")?;
    /// assert_eq!(restored.to_dict(), conf.to_dict());
    /// # Ok::<(), configx::Error>(())
    /// ```
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save_with(path, &BinaryStorage::new())
    }

    /// Load the tree from a binary `.cfgx` file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.load_with(path, &BinaryStorage::new())
    }

    /// Save the tree through any storage backend
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn save_with<S: StorageBackend>(&self, path: impl AsRef<Path>, storage: &S) -> Result<()> {
        let path = expand_home(path);
        storage.write(&path, &self.to_dict())?;
        info!("Saved config tree to {} ({})", path.display(), storage.extension());
        Ok(())
    }

    /// Load the tree through any storage backend
    ///
    /// # Errors
    ///
    /// Returns an error if reading or decoding fails; the tree is unchanged.
    pub fn load_with<S: StorageBackend>(&mut self, path: impl AsRef<Path>, storage: &S) -> Result<()> {
        let path = expand_home(path);
        let map = storage.read(&path)?;
        self.load_dict(&Value::Object(map))?;
        info!("Loaded config tree from {}", path.display());
        Ok(())
    }
}

impl Serialize for ConfigTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_dict().serialize(serializer)
    }
}

// =============================================================================
// Tests
// =============================================================================
