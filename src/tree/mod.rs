//! The configuration tree and its path engine

mod builder;
mod core;
mod io;
mod operations;
mod path;

pub use builder::ConfigTreeBuilder;
pub use self::core::{ConfigTree, ROOT_NAME};
pub use path::{MAX_PATH_DEPTH, SEPARATOR, normalize_and_split};
