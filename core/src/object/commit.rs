use std::str;

use thiserror::Error;

use super::{Attribution, Id, ParseIdError};

/// A commit links a tree snapshot to its parent commit.
///
/// The canonical body is
///
/// ```text
/// tree <tree-id>
/// parent <parent-id>
/// author <author> <timestamp> <timezone>
/// <message>
/// ```
///
/// A root commit records the all-zero ID as its parent.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Commit {
    tree: Id,
    parent: Id,
    attribution: Attribution,
    message: String,
}

/// Describes why a commit body could not be parsed.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CommitError {
    #[error("commit body is not valid UTF-8")]
    NotUtf8,

    #[error("commit body is missing its `{0}` line")]
    MissingHeader(&'static str),

    #[error("commit `{0}` line has invalid object ID: {1}")]
    InvalidId(&'static str, ParseIdError),

    #[error("commit `author` line is malformed")]
    InvalidAuthor,

    #[error("commit message is not terminated by a newline")]
    UnterminatedMessage,
}

impl Commit {
    /// Create a new commit. A `parent` of `None` makes this a root commit.
    pub fn new(tree: Id, parent: Option<Id>, attribution: Attribution, message: &str) -> Commit {
        Commit {
            tree,
            parent: parent.unwrap_or_else(Id::zero),
            attribution,
            message: message.to_string(),
        }
    }

    /// Returns the ID of the root tree of this snapshot.
    pub fn tree(&self) -> &Id {
        &self.tree
    }

    /// Returns the parent commit, or `None` for a root commit.
    pub fn parent(&self) -> Option<&Id> {
        if self.parent.is_zero() {
            None
        } else {
            Some(&self.parent)
        }
    }

    /// Returns the parent ID as recorded, which is the all-zero
    /// ID for a root commit.
    pub fn parent_id(&self) -> &Id {
        &self.parent
    }

    /// Returns the author and time of this commit.
    pub fn attribution(&self) -> &Attribution {
        &self.attribution
    }

    /// Returns the commit message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the canonical body of this commit.
    pub fn to_body(&self) -> Vec<u8> {
        format!(
            "tree {}\nparent {}\nauthor {}\n{}\n",
            self.tree, self.parent, self.attribution, self.message
        )
        .into_bytes()
    }

    /// Parse a canonical commit body.
    pub fn parse(body: &[u8]) -> Result<Commit, CommitError> {
        let body = str::from_utf8(body).map_err(|_| CommitError::NotUtf8)?;
        let mut lines = body.splitn(4, '\n');

        let tree = parse_id_header(lines.next(), "tree")?;
        let parent = parse_id_header(lines.next(), "parent")?;

        let author = header(lines.next(), "author")?;
        let attribution = Attribution::parse(author).ok_or(CommitError::InvalidAuthor)?;

        // The message is the remainder, minus the trailing newline.
        let message = lines
            .next()
            .and_then(|rest| rest.strip_suffix('\n'))
            .ok_or(CommitError::UnterminatedMessage)?;

        Ok(Commit {
            tree,
            parent,
            attribution,
            message: message.to_string(),
        })
    }
}

/// Returns the value of a `"<name> <value>"` line.
fn header<'a>(line: Option<&'a str>, name: &'static str) -> Result<&'a str, CommitError> {
    line.and_then(|line| line.strip_prefix(name))
        .and_then(|rest| rest.strip_prefix(' '))
        .ok_or(CommitError::MissingHeader(name))
}

fn parse_id_header(line: Option<&str>, name: &'static str) -> Result<Id, CommitError> {
    let value = header(line, name)?;
    Id::from_hex(value).map_err(|err| CommitError::InvalidId(name, err))
}
