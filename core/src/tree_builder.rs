//! Builds tree objects, either by walking a directory on disk or from the
//! entries of a staging index.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::index::{Index, IndexEntry};
use crate::object::{tree, FileContentSource, Id, Kind, Object, TreeEntry};
use crate::path::FileMode;
use crate::repo::{Error, Repo, Result};
use crate::REPO_DIR_NAME;

/// Creates a blob object from a file on disk without storing it.
///
/// Returns the file's mode alongside the object. Fails with `MissingFile`
/// if `path` doesn't exist or isn't a regular file.
pub fn blob_from_file(path: &Path) -> Result<(FileMode, Object)> {
    let source = FileContentSource::new(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => Error::MissingFile(path.to_path_buf()),
        _ => Error::IoError(err),
    })?;

    let mode = source.mode();
    Ok((mode, Object::new(Kind::Blob, Box::new(source))?))
}

/// Stores a file's content as a blob; returns its index entry.
pub fn put_file<R: Repo + ?Sized>(repo: &mut R, path: &Path) -> Result<IndexEntry> {
    let (mode, object) = blob_from_file(path)?;
    repo.put_loose_object(&object)?;
    Ok(IndexEntry::new(mode, *object.id()))
}

/// Builds and stores the tree for `dir` and everything beneath it.
///
/// Every regular file becomes a blob and every subdirectory a sub-tree.
/// Directories named like the repository metadata directory are skipped.
pub fn build_tree<R: Repo + ?Sized>(repo: &mut R, dir: &Path) -> Result<Id> {
    walk_tree(repo, dir, "", &mut |_, _| ())
}

/// Like `build_tree`, but reports each stored entry to `visit` along with
/// its `/`-separated path relative to `dir`.
///
/// Files are reported before the directory that contains them.
pub fn walk_tree<R, F>(repo: &mut R, dir: &Path, prefix: &str, visit: &mut F) -> Result<Id>
where
    R: Repo + ?Sized,
    F: FnMut(&str, IndexEntry),
{
    let mut entries = Vec::new();

    for dir_entry in fs::read_dir(dir)? {
        let dir_entry = dir_entry?;

        let name = match dir_entry.file_name().into_string() {
            Ok(name) => name,
            Err(name) => {
                warn!(name = ?name, dir = %dir.display(), "skipping entry with non-UTF-8 name");
                continue;
            }
        };

        if name == REPO_DIR_NAME {
            continue;
        }

        let path = dir_entry.path();
        let rel_path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", prefix, name)
        };

        let metadata = fs::metadata(&path)?;
        let entry = if metadata.is_dir() {
            let id = walk_tree(repo, &path, &rel_path, visit)?;
            IndexEntry::new(FileMode::Tree, id)
        } else if metadata.is_file() {
            put_file(repo, &path)?
        } else {
            debug!(path = %path.display(), "skipping special file");
            continue;
        };

        visit(&rel_path, entry);
        entries.push(TreeEntry::new(entry.mode, name, entry.id));
    }

    repo.put_object(Kind::Tree, tree::encode_tree(&entries))
}

#[derive(Default)]
struct DirNode {
    files: BTreeMap<String, IndexEntry>,
    dirs: BTreeMap<String, DirNode>,
    aggregate: Option<Id>,
}

impl DirNode {
    fn dir_mut(&mut self, name: &str) -> &mut DirNode {
        if self.files.remove(name).is_some() {
            warn!(name, "directory replaces staged file of the same name");
        }
        self.dirs.entry(name.to_string()).or_default()
    }

    fn write<R: Repo + ?Sized>(&self, repo: &mut R) -> Result<Id> {
        let mut entries: Vec<TreeEntry> = self
            .files
            .iter()
            .map(|(name, e)| TreeEntry::new(e.mode, name.as_str(), e.id))
            .collect();

        for (name, node) in &self.dirs {
            let id = match node.aggregate {
                Some(id) if node.files.is_empty() && node.dirs.is_empty() => id,
                _ => node.write(repo)?,
            };
            entries.push(TreeEntry::new(FileMode::Tree, name.as_str(), id));
        }

        repo.put_object(Kind::Tree, tree::encode_tree(&entries))
    }
}

/// Builds and stores the root tree described by a staging index.
///
/// Files are grouped into sub-trees by their directory components. A
/// staged directory entry (mode `40000`) stands in for its directory only
/// when no staged file lies beneath it.
pub fn build_tree_from_index<R: Repo + ?Sized>(repo: &mut R, index: &Index) -> Result<Id> {
    let mut root = DirNode::default();

    for (path, entry) in index {
        let mut components: Vec<&str> = path.split('/').collect();
        let last = match components.pop() {
            Some(last) => last,
            None => continue,
        };

        let mut node = &mut root;
        for dir in components {
            node = node.dir_mut(dir);
        }

        if entry.mode.is_tree() {
            node.dir_mut(last).aggregate = Some(entry.id);
        } else if node.dirs.contains_key(last) {
            warn!(path = path.as_str(), "staged file shadowed by a directory");
        } else {
            node.files.insert(last.to_string(), *entry);
        }
    }

    let id = root.write(repo)?;
    debug!(tree = %id, entries = index.len(), "built tree from index");
    Ok(id)
}
