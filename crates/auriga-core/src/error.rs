use std::path::PathBuf;

use crate::id::{CharacterId, ExitId, ItemId, SpaceId};

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building, mutating, or persisting a world.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested space ID does not exist.
    #[error("space not found: {0}")]
    SpaceNotFound(SpaceId),

    /// The requested exit ID does not exist.
    #[error("exit not found: {0}")]
    ExitNotFound(ExitId),

    /// The requested item ID does not exist.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// The requested character ID does not exist.
    #[error("character not found: {0}")]
    CharacterNotFound(CharacterId),

    /// An entity with the same name already exists.
    #[error("{kind} already exists: \"{name}\"")]
    DuplicateName {
        /// Kind of entity.
        kind: &'static str,
        /// The duplicated name.
        name: String,
    },

    /// A named reference could not be resolved to an existing entity.
    #[error("invalid reference: {kind} \"{name}\" not found")]
    InvalidReference {
        /// The unresolved name.
        name: String,
        /// The expected entity kind.
        kind: &'static str,
    },

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),

    /// Reading or writing a save failed.
    #[error("cannot access {path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// World content could not be parsed.
    #[error("invalid content: {0}")]
    Content(#[from] serde_json::Error),

    /// A record could not be encoded or decoded.
    #[error("invalid record {path}: {source}")]
    Json {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
}

impl CoreError {
    /// Shorthand for an unresolved name.
    pub fn invalid_reference(kind: &'static str, name: impl Into<String>) -> Self {
        Self::InvalidReference {
            name: name.into(),
            kind,
        }
    }
}
