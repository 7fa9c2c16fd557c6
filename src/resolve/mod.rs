use std::collections::BTreeMap;

use crate::path::{ApiPath, PathError};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Invalid path format: {0}")]
    InvalidPath(#[from] PathError),

    #[error("Unknown list {element:?} in {path:?}: no key leaf on record")]
    UnknownList { path: String, element: String },

    #[error("Cannot bind the datastore root to a schema node")]
    RootTarget,
}

impl ResolveError {
    pub fn unknown_list(path: &str, element: &str) -> Self {
        ResolveError::UnknownList {
            path: path.to_string(),
            element: element.to_string(),
        }
    }
}

/// Key leaf of a list entry, recovered from the entry's path segment.
/// Only the first key of a multi-key list is recovered; the remaining
/// keys stay encoded in the path fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLeaf {
    pub name: String,
    pub value: String,
}

/// Schema binding of a data path: the node name payload wrappers carry,
/// plus the key leaf when the path addresses a list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundTarget {
    pub element: String,
    pub key: Option<KeyLeaf>,
}

/// Resolves a data path against schema knowledge.
///
/// The edit translation needs very little from the schema: the node
/// name of the deepest path segment and, for list entries, which leaf
/// holds the key. Implementations may consult a fully compiled YANG
/// model or a table as small as [`KeyTable`].
pub trait PathBinder {
    fn bind(&self, data_path: &str) -> Result<BoundTarget, ResolveError>;
}

/// [`PathBinder`] backed by a plain list-element-to-key-leaf table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyTable {
    keys: BTreeMap<String, String>,
}

impl KeyTable {
    pub fn new() -> Self {
        KeyTable::default()
    }

    pub fn with_key(mut self, element: &str, key_leaf: &str) -> Self {
        self.keys.insert(element.to_string(), key_leaf.to_string());
        self
    }
}

impl From<BTreeMap<String, String>> for KeyTable {
    fn from(keys: BTreeMap<String, String>) -> Self {
        KeyTable { keys }
    }
}

impl PathBinder for KeyTable {
    fn bind(&self, data_path: &str) -> Result<BoundTarget, ResolveError> {
        let path = ApiPath::parse(data_path)?;
        let Some(segment) = path.last() else {
            return Err(ResolveError::RootTarget);
        };

        let key = if let Some(value) = segment.keys.first() {
            let Some(leaf) = self.keys.get(&segment.name) else {
                return Err(ResolveError::unknown_list(data_path, &segment.name));
            };
            Some(KeyLeaf {
                name: leaf.clone(),
                value: value.clone(),
            })
        } else {
            None
        };

        Ok(BoundTarget {
            element: segment.name.clone(),
            key,
        })
    }
}
