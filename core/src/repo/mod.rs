//! Represents an abstract repository.
//!
//! ## Design Goals
//!
//! Repositories may be stored in multiple different mechanisms. Every
//! component (tree building, staging, committing, checking out) reaches
//! storage only through a [`Repo`] handle, so the same operations run
//! against the on-disk layout (see the `minigit_on_disk` crate) or against
//! the in-memory [`MemRepo`] used in tests.
//!
//! [`Repo`]: trait.Repo.html
//! [`MemRepo`]: struct.MemRepo.html

use std::path::Path;

use tracing::debug;

mod error;
pub use error::{Error, Result};

mod mem;
pub use mem::MemRepo;

use crate::object::{codec, Commit, Id, Kind, Object, TreeEntry};

/// The mutable metadata files a repository keeps next to its objects.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RepoFile {
    /// The staging index.
    Index,

    /// The machine-readable commit history, one line per commit.
    History,

    /// The human-readable commit log.
    Log,
}

/// A struct that implements the `Repo` trait represents a particular mechanism
/// for storing and accessing a repository.
///
/// The required methods on this trait represent the most primitive operations
/// which must be defined for a given storage architecture: storing and fetching
/// loose objects, and reading and rewriting the few metadata files.
///
/// The provided methods on this trait represent the object-store operations
/// built on those primitives, regardless of storage mechanism.
pub trait Repo {
    /// Returns the working directory whose content this repository tracks.
    fn work_dir(&self) -> &Path;

    /// Returns true if a loose object with this ID exists.
    fn has_loose_object(&self, id: &Id) -> Result<bool>;

    /// Stores the compressed encoding of an object under its ID.
    ///
    /// Must be idempotent: if an object with this ID already exists, it is
    /// left untouched and this returns `Ok(false)`. Returns `Ok(true)` if
    /// the object was newly written.
    fn put_loose_bytes(&mut self, id: &Id, compressed: &[u8]) -> Result<bool>;

    /// Returns the compressed encoding stored under this ID.
    ///
    /// Fails with `ObjectNotFound` if there is no such object.
    fn get_loose_bytes(&self, id: &Id) -> Result<Vec<u8>>;

    /// Reads a metadata file. Returns `None` if it doesn't exist.
    fn read_file(&self, file: RepoFile) -> Result<Option<Vec<u8>>>;

    /// Replaces the content of a metadata file.
    fn write_file(&mut self, file: RepoFile, content: &[u8]) -> Result<()>;

    /// Appends to a metadata file, creating it if necessary.
    fn append_file(&mut self, file: RepoFile, content: &[u8]) -> Result<()> {
        let mut existing = self.read_file(file)?.unwrap_or_default();
        existing.extend_from_slice(content);
        self.write_file(file, &existing)
    }

    /// Writes an object to the object store if it isn't there already.
    ///
    /// Returns true if the object was newly written.
    fn put_loose_object(&mut self, object: &Object) -> Result<bool> {
        let compressed = codec::compress(&object.encode()?)?;
        let written = self.put_loose_bytes(object.id(), &compressed)?;

        if written {
            debug!(id = %object.id(), kind = %object.kind(), "wrote object");
        }

        Ok(written)
    }

    /// Encodes, hashes, and stores an object; returns its ID.
    ///
    /// Storing the same content twice yields the same ID and writes once.
    fn put_object(&mut self, kind: Kind, body: Vec<u8>) -> Result<Id> {
        let object = Object::from_bytes(kind, body);
        self.put_loose_object(&object)?;
        Ok(*object.id())
    }

    /// Fetches and decodes an object.
    ///
    /// Fails with `ObjectNotFound` if the object is absent and with
    /// `CorruptObject` if its bytes don't inflate, don't decode, or
    /// don't hash back to `id`.
    fn get_object(&self, id: &Id) -> Result<Object> {
        let compressed = self.get_loose_bytes(id)?;
        let encoded = codec::decompress(&compressed).map_err(|err| Error::corrupt(id, err))?;

        let (kind, body) = codec::decode_object(&encoded).map_err(|err| Error::CorruptObject {
            id: *id,
            reason: err.to_string(),
        })?;

        let object = Object::from_bytes(kind, body.to_vec());
        if object.id() != id {
            return Err(Error::CorruptObject {
                id: *id,
                reason: format!("content hashes to {}", object.id()),
            });
        }

        Ok(object)
    }

    /// Fetches an object and checks that it has the expected kind.
    fn get_object_of_kind(&self, id: &Id, expected: Kind) -> Result<Object> {
        let object = self.get_object(id)?;
        if object.kind() != expected {
            return Err(Error::UnexpectedKind {
                id: *id,
                expected,
                actual: object.kind(),
            });
        }
        Ok(object)
    }

    /// Fetches and parses a tree.
    fn read_tree(&self, id: &Id) -> Result<Vec<TreeEntry>> {
        let object = self.get_object_of_kind(id, Kind::Tree)?;
        Ok(crate::object::tree::parse_tree(&object.content()?)?)
    }

    /// Fetches and parses a commit.
    fn read_commit(&self, id: &Id) -> Result<Commit> {
        let object = self.get_object_of_kind(id, Kind::Commit)?;
        Ok(Commit::parse(&object.content()?)?)
    }
}
