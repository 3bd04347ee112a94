//! Represents the concept of an "object" which is a tuple of
//! object type and binary data identified by the hash of the binary data.

use std::io::{self, Read};

use sha1::{Digest, Sha1};

mod attribution;
pub use attribution::{Attribution, AttributionError};

pub mod codec;
pub use codec::{CodecError, ObjectError};

mod commit;
pub use commit::{Commit, CommitError};

mod content_source;
pub use content_source::{ContentSource, ContentSourceOpenResult};

mod file_content_source;
pub use file_content_source::FileContentSource;

mod id;
pub use id::{Id, ParseIdError, HEX_LEN, ID_LEN};

mod kind;
pub use kind::Kind;

pub mod tree;
pub use tree::{TreeEntry, TreeError};

/// Describes a single object stored (or about to be stored) in a repository.
///
/// The ID is computed when the object is created, from the canonical
/// header and the content, so an `Object` always knows its own address.
pub struct Object {
    id: Id,
    kind: Kind,
    content_source: Box<dyn ContentSource>,
}

impl Object {
    /// Create a new Object.
    ///
    /// Reads the content once to compute the object's ID.
    ///
    /// This is functionally equivalent to `hash-object` without the
    /// `-w` option that would write the object to the repo.
    pub fn new(kind: Kind, content_source: Box<dyn ContentSource>) -> io::Result<Object> {
        let mut hasher = Sha1::new();
        hasher.update(codec::encode_header(kind, content_source.len()));

        {
            let mut reader = content_source.open()?;
            let mut buf = [0; 8192];
            let mut total = 0;

            loop {
                let n = reader.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                hasher.update(&buf[..n]);
                total += n;
            }

            if total != content_source.len() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "content length changed while hashing",
                ));
            }
        }

        Ok(Object {
            id: codec::digest_to_id(hasher),
            kind,
            content_source,
        })
    }

    /// Create a new Object from bytes already in memory.
    pub fn from_bytes(kind: Kind, content: Vec<u8>) -> Object {
        let id = codec::hash(&codec::encode_object(kind, &content));
        Object {
            id,
            kind,
            content_source: Box::new(content),
        }
    }

    /// Return the ID of the object.
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Return the kind of the object.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Return the size (in bytes) of the object's content.
    pub fn len(&self) -> usize {
        self.content_source.len()
    }

    /// Returns true if the object is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a `BufRead` struct which can be used for reading the content.
    pub fn open(&self) -> ContentSourceOpenResult {
        self.content_source.open()
    }

    /// Reads the object's content (the body, without header) into memory.
    pub fn content(&self) -> io::Result<Vec<u8>> {
        self.content_source.read_all()
    }

    /// Returns the canonical encoding: header followed by content.
    pub fn encode(&self) -> io::Result<Vec<u8>> {
        Ok(codec::encode_object(self.kind, &self.content()?))
    }
}
