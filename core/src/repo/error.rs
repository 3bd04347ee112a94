use std::path::PathBuf;

use thiserror::Error;

use crate::index::IndexError;
use crate::object::{
    AttributionError, CodecError, CommitError, Id, Kind, ObjectError, ParseIdError, TreeError,
};

/// Describes the potential error conditions that might arise from `Repo` operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("object {0} not found")]
    ObjectNotFound(Id),

    #[error("object {id} is corrupt: {reason}")]
    CorruptObject { id: Id, reason: String },

    #[error("object {id} is a {actual}, expected a {expected}")]
    UnexpectedKind { id: Id, expected: Kind, actual: Kind },

    #[error("malformed object: {0}")]
    MalformedObject(#[from] ObjectError),

    #[error("malformed tree: {0}")]
    MalformedTree(#[from] TreeError),

    #[error("malformed commit: {0}")]
    MalformedCommit(#[from] CommitError),

    #[error("malformed index: {0}")]
    MalformedIndex(#[from] IndexError),

    #[error("malformed history line: {0}")]
    MalformedHistory(String),

    #[error("nothing to commit: the staging index is empty")]
    EmptyIndex,

    #[error("commit message must not contain line breaks or tabs")]
    InvalidMessage,

    #[error(transparent)]
    InvalidAttribution(#[from] AttributionError),

    #[error(transparent)]
    InvalidId(#[from] ParseIdError),

    #[error("no such file: {0}")]
    MissingFile(PathBuf),

    #[error("path is outside the working directory: {0}")]
    PathOutsideWorkDir(PathBuf),

    #[error("working directory doesn't exist: {0}")]
    WorkDirDoesntExist(PathBuf),

    #[error("repository directory doesn't exist: {0}")]
    RepoDirDoesntExist(PathBuf),

    #[error("repository directory already exists: {0}")]
    RepoDirShouldntExist(PathBuf),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn corrupt(id: &Id, err: CodecError) -> Error {
        Error::CorruptObject {
            id: *id,
            reason: err.to_string(),
        }
    }
}

/// A specialized `Result` type for `Repo` operations.
pub type Result<T> = std::result::Result<T, Error>;
