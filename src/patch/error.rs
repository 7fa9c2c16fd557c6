use crate::{api::ApiError, patch::edit::EditOperation, path::PathError, resolve::ResolveError};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PatchError {
    /// The patch body does not follow the yang-patch structure: wrong
    /// resource, wrong field cardinality, or a field of the wrong type.
    #[error("Malformed message: {reason}")]
    MalformedMessage { reason: String },

    #[error("Operation \"{operation}\" is not supported")]
    UnsupportedOperation { operation: EditOperation },

    #[error("Failed to resolve path: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Invalid path: {0}")]
    Path(#[from] PathError),

    #[error("Data-resource call failed: {0}")]
    Api(#[from] ApiError),

    #[error("Failed to encode the edit value: {reason}")]
    Encode { reason: String },

    /// Any failure below, labeled with the edit it happened in.
    #[error("Edit {edit}: {source}")]
    Edit {
        edit: String,
        source: Box<PatchError>,
    },
}

impl PatchError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        PatchError::MalformedMessage {
            reason: reason.into(),
        }
    }

    pub fn unsupported(operation: EditOperation) -> Self {
        PatchError::UnsupportedOperation { operation }
    }

    pub fn encode(err: serde_json::Error) -> Self {
        PatchError::Encode {
            reason: err.to_string(),
        }
    }

    pub fn in_edit(self, label: &str) -> Self {
        PatchError::Edit {
            edit: label.to_string(),
            source: Box::new(self),
        }
    }
}
