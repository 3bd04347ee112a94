//! Encoding and parsing of tree bodies.
//!
//! A tree body is a sequence of entries, each `"<mode> <name>\0<id>"`
//! where `<id>` is always the 40-character hex rendering of the child's
//! object ID. Entries are written in canonical [`PathMode`] order so that
//! two snapshots of the same directory always produce the same tree.
//!
//! [`PathMode`]: ../path/struct.PathMode.html

use std::str;

use thiserror::Error;

use super::{id::HEX_LEN, Id, Kind, ParseIdError};
use crate::path::{FileMode, PathMode};

/// One named child of a tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreeEntry {
    pub mode: FileMode,
    pub name: String,
    pub id: Id,
}

impl TreeEntry {
    /// Create a new tree entry.
    pub fn new<S: Into<String>>(mode: FileMode, name: S, id: Id) -> TreeEntry {
        TreeEntry {
            mode,
            name: name.into(),
            id,
        }
    }

    /// Returns the kind of object this entry points to.
    ///
    /// A `40000` mode marks a sub-tree; anything else is a blob.
    pub fn kind(&self) -> Kind {
        if self.mode.is_tree() {
            Kind::Tree
        } else {
            Kind::Blob
        }
    }

    fn path_mode(&self) -> PathMode {
        PathMode {
            path: self.name.as_bytes(),
            mode: self.mode,
        }
    }
}

/// Describes why a tree body could not be parsed.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TreeError {
    #[error("tree entry at byte {0} is truncated in its mode")]
    TruncatedMode(usize),

    #[error("tree entry at byte {0} has invalid mode `{1}`")]
    InvalidMode(usize, String),

    #[error("tree entry at byte {0} is truncated in its name")]
    TruncatedName(usize),

    #[error("tree entry at byte {0} has an empty or invalid name")]
    InvalidName(usize),

    #[error("tree entry at byte {0} is truncated in its object ID")]
    TruncatedId(usize),

    #[error("tree entry at byte {0} has invalid object ID: {1}")]
    InvalidId(usize, ParseIdError),
}

/// Encodes tree entries into a canonical tree body.
///
/// Entries are sorted into canonical order first; the caller's order
/// does not matter.
pub fn encode_tree(entries: &[TreeEntry]) -> Vec<u8> {
    let mut sorted: Vec<&TreeEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.path_mode().cmp(&b.path_mode()));

    let mut body = Vec::new();
    for entry in sorted {
        body.extend_from_slice(entry.mode.as_str().as_bytes());
        body.push(b' ');
        body.extend_from_slice(entry.name.as_bytes());
        body.push(0);
        body.extend_from_slice(entry.id.to_string().as_bytes());
    }

    body
}

/// Parses a tree body into its entries, in stored order.
pub fn parse_tree(body: &[u8]) -> Result<Vec<TreeEntry>, TreeError> {
    let mut entries = Vec::new();
    let mut pos = 0;

    while pos < body.len() {
        let start = pos;
        let rest = &body[pos..];

        let space = rest
            .iter()
            .position(|b| *b == b' ')
            .ok_or(TreeError::TruncatedMode(start))?;

        let mode = FileMode::from_octal_slice(&rest[..space]).ok_or_else(|| {
            TreeError::InvalidMode(start, String::from_utf8_lossy(&rest[..space]).into_owned())
        })?;

        let rest = &rest[space + 1..];
        let nul = rest
            .iter()
            .position(|b| *b == 0)
            .ok_or(TreeError::TruncatedName(start))?;

        let name = str::from_utf8(&rest[..nul])
            .ok()
            .filter(|n| is_valid_name(n))
            .ok_or(TreeError::InvalidName(start))?;

        let rest = &rest[nul + 1..];
        if rest.len() < HEX_LEN {
            return Err(TreeError::TruncatedId(start));
        }

        let id = Id::from_hex(&rest[..HEX_LEN]).map_err(|err| TreeError::InvalidId(start, err))?;

        entries.push(TreeEntry::new(mode, name, id));
        pos = body.len() - rest.len() + HEX_LEN;
    }

    Ok(entries)
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/')
}
