//! The staging index: a mapping from working-directory paths to the
//! object each path was last staged as.
//!
//! The persisted form is text, one entry per line:
//!
//! ```text
//! <mode> <hash> <stage> <path>
//! ```
//!
//! Paths are relative to the working directory and use `/` as the
//! separator. They may contain spaces; the path is everything after the
//! third space. Entries are written in path order so that the same map
//! always produces the same bytes.

use std::collections::btree_map::{self, BTreeMap};
use std::str;

use thiserror::Error;

use crate::object::{Id, ParseIdError};
use crate::path::FileMode;

/// A single staged path.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IndexEntry {
    pub mode: FileMode,
    pub id: Id,
}

impl IndexEntry {
    pub fn new(mode: FileMode, id: Id) -> IndexEntry {
        IndexEntry { mode, id }
    }
}

/// Describes why an index file could not be parsed.
/// The `usize` is the 1-based line number.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum IndexError {
    #[error("line {0}: not valid UTF-8")]
    NotUtf8(usize),

    #[error("line {0}: missing {1}")]
    MissingField(usize, &'static str),

    #[error("line {0}: invalid mode `{1}`")]
    InvalidMode(usize, String),

    #[error("line {0}: invalid object ID: {1}")]
    InvalidId(usize, ParseIdError),

    #[error("line {0}: invalid stage `{1}`")]
    InvalidStage(usize, String),

    #[error("line {0}: invalid path `{1}`")]
    InvalidPath(usize, String),
}

/// The in-memory staging index.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Index {
    entries: BTreeMap<String, IndexEntry>,
}

impl Index {
    pub fn new() -> Index {
        Index::default()
    }

    /// Parse the persisted form. Blank lines are ignored.
    pub fn parse(content: &[u8]) -> Result<Index, IndexError> {
        let mut entries = BTreeMap::new();

        for (n, line) in content.split(|b| *b == b'\n').enumerate() {
            let line_no = n + 1;
            if line.is_empty() {
                continue;
            }

            let line = str::from_utf8(line).map_err(|_| IndexError::NotUtf8(line_no))?;
            let mut fields = line.splitn(4, ' ');

            let mode = fields
                .next()
                .ok_or(IndexError::MissingField(line_no, "mode"))?;
            let mode = FileMode::from_octal_slice(mode.as_bytes())
                .ok_or_else(|| IndexError::InvalidMode(line_no, mode.to_string()))?;

            let id = fields
                .next()
                .ok_or(IndexError::MissingField(line_no, "hash"))?;
            let id = Id::from_hex(id.as_bytes()).map_err(|err| IndexError::InvalidId(line_no, err))?;

            let stage = fields
                .next()
                .ok_or(IndexError::MissingField(line_no, "stage"))?;
            if stage.is_empty() || !stage.bytes().all(|b| b.is_ascii_digit()) {
                return Err(IndexError::InvalidStage(line_no, stage.to_string()));
            }

            let path = fields
                .next()
                .ok_or(IndexError::MissingField(line_no, "path"))?;
            if !is_valid_path(path) {
                return Err(IndexError::InvalidPath(line_no, path.to_string()));
            }

            entries.insert(path.to_string(), IndexEntry { mode, id });
        }

        Ok(Index { entries })
    }

    /// Returns the persisted form.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut r = String::new();
        for (path, entry) in &self.entries {
            r.push_str(&format!("{} {} 0 {}\n", entry.mode, entry.id, path));
        }
        r.into_bytes()
    }

    pub fn get(&self, path: &str) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    /// Stage `entry` at `path`.
    ///
    /// Returns true if the index changed; staging the same mode and ID
    /// that are already recorded is a no-op.
    pub fn upsert(&mut self, path: &str, entry: IndexEntry) -> bool {
        match self.entries.get(path) {
            Some(existing) if *existing == entry => false,
            _ => {
                self.entries.insert(path.to_string(), entry);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in path order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, IndexEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Index {
    type Item = (&'a String, &'a IndexEntry);
    type IntoIter = btree_map::Iter<'a, String, IndexEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A valid index path is relative, `/`-separated, and has no empty,
/// `.`, or `..` components.
pub(crate) fn is_valid_path(path: &str) -> bool {
    !path.is_empty()
        && !path.contains('\n')
        && !path.contains('\0')
        && path
            .split('/')
            .all(|c| !c.is_empty() && c != "." && c != "..")
}
