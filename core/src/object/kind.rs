use std::fmt::{self, Display, Formatter};

/// Describes the fundamental object type (blob, tree, or commit).
///
/// We use the word `kind` here to avoid conflict with the Rust reserved word `type`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    Blob,
    Tree,
    Commit,
}

impl Kind {
    /// Parse the textual kind tag found in an object header.
    ///
    /// Returns `None` if the tag is not one of the recognized kinds.
    pub fn from_tag(tag: &[u8]) -> Option<Kind> {
        match tag {
            b"blob" => Some(Kind::Blob),
            b"tree" => Some(Kind::Tree),
            b"commit" => Some(Kind::Commit),
            _ => None,
        }
    }

    /// Returns the textual kind tag used in object headers.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Blob => "blob",
            Kind::Tree => "tree",
            Kind::Commit => "commit",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
