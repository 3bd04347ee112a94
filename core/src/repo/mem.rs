use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{Error, Repo, RepoFile, Result};
use crate::object::Id;

/// A repository whose object store and metadata files live in memory.
///
/// The working directory is still a real path; only what would live under
/// the repository's metadata directory is kept in memory.
#[derive(Debug, Default)]
pub struct MemRepo {
    work_dir: PathBuf,
    objects: HashMap<Id, Vec<u8>>,
    files: HashMap<RepoFile, Vec<u8>>,
}

impl MemRepo {
    /// Creates an empty in-memory repository tracking `work_dir`.
    pub fn new<P: AsRef<Path>>(work_dir: P) -> MemRepo {
        MemRepo {
            work_dir: work_dir.as_ref().to_path_buf(),
            ..MemRepo::default()
        }
    }

    /// Returns the number of objects stored.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Replaces the stored bytes of an object. Used to simulate corruption.
    pub fn overwrite_loose_bytes(&mut self, id: &Id, compressed: Vec<u8>) {
        self.objects.insert(*id, compressed);
    }
}

impl Repo for MemRepo {
    fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    fn has_loose_object(&self, id: &Id) -> Result<bool> {
        Ok(self.objects.contains_key(id))
    }

    fn put_loose_bytes(&mut self, id: &Id, compressed: &[u8]) -> Result<bool> {
        if self.objects.contains_key(id) {
            return Ok(false);
        }
        self.objects.insert(*id, compressed.to_vec());
        Ok(true)
    }

    fn get_loose_bytes(&self, id: &Id) -> Result<Vec<u8>> {
        self.objects
            .get(id)
            .cloned()
            .ok_or(Error::ObjectNotFound(*id))
    }

    fn read_file(&self, file: RepoFile) -> Result<Option<Vec<u8>>> {
        Ok(self.files.get(&file).cloned())
    }

    fn write_file(&mut self, file: RepoFile, content: &[u8]) -> Result<()> {
        self.files.insert(file, content.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::object::{codec, Kind};

    #[test]
    fn put_object_is_idempotent() {
        let mut r = MemRepo::new("/nowhere");

        let id1 = r.put_object(Kind::Blob, b"hi".to_vec()).unwrap();
        let id2 = r.put_object(Kind::Blob, b"hi".to_vec()).unwrap();

        assert_eq!(id1, id2);
        assert_eq!(id1.to_string(), "32f95c0d1244a78b2be1bab8de17906fabb2c4a8");
        assert_eq!(r.object_count(), 1);
        assert!(r.has_loose_object(&id1).unwrap());
    }

    #[test]
    fn get_object_round_trip() {
        let mut r = MemRepo::new("/nowhere");
        let id = r.put_object(Kind::Blob, b"hello\n".to_vec()).unwrap();

        let o = r.get_object(&id).unwrap();
        assert_eq!(o.kind(), Kind::Blob);
        assert_eq!(o.content().unwrap(), b"hello\n".to_vec());
        assert_eq!(o.id(), &id);
    }

    #[test]
    fn get_object_not_found() {
        let r = MemRepo::new("/nowhere");
        let id = codec::hash(b"blob 0\0");

        match r.get_object(&id) {
            Err(Error::ObjectNotFound(missing)) => assert_eq!(missing, id),
            other => panic!("unexpected result: {:?}", other.map(|o| *o.id())),
        }
    }

    #[test]
    fn get_object_corrupt_bytes() {
        let mut r = MemRepo::new("/nowhere");
        let id = r.put_object(Kind::Blob, b"hi".to_vec()).unwrap();

        r.overwrite_loose_bytes(&id, b"garbage".to_vec());
        assert!(matches!(
            r.get_object(&id),
            Err(Error::CorruptObject { .. })
        ));
    }

    #[test]
    fn get_object_wrong_content() {
        let mut r = MemRepo::new("/nowhere");
        let id = r.put_object(Kind::Blob, b"hi".to_vec()).unwrap();

        let other = codec::compress(&codec::encode_object(Kind::Blob, b"bye")).unwrap();
        r.overwrite_loose_bytes(&id, other);

        assert!(matches!(
            r.get_object(&id),
            Err(Error::CorruptObject { .. })
        ));
    }

    #[test]
    fn get_object_of_kind_mismatch() {
        let mut r = MemRepo::new("/nowhere");
        let id = r.put_object(Kind::Blob, b"hi".to_vec()).unwrap();

        assert!(matches!(
            r.read_tree(&id),
            Err(Error::UnexpectedKind {
                expected: Kind::Tree,
                actual: Kind::Blob,
                ..
            })
        ));
    }

    #[test]
    fn metadata_files() {
        let mut r = MemRepo::new("/nowhere");
        assert!(r.read_file(RepoFile::History).unwrap().is_none());

        r.append_file(RepoFile::History, b"one\n").unwrap();
        r.append_file(RepoFile::History, b"two\n").unwrap();
        assert_eq!(
            r.read_file(RepoFile::History).unwrap().unwrap(),
            b"one\ntwo\n".to_vec()
        );

        r.write_file(RepoFile::Log, b"x").unwrap();
        r.write_file(RepoFile::Log, b"y").unwrap();
        assert_eq!(r.read_file(RepoFile::Log).unwrap().unwrap(), b"y".to_vec());
    }
}
