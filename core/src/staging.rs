//! Moves working-directory content into the object store and records it
//! in the staging index.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::index::{Index, IndexEntry};
use crate::object::Id;
use crate::path::FileMode;
use crate::repo::{Error, Repo, RepoFile, Result};
use crate::tree_builder;
use crate::REPO_DIR_NAME;

/// Reads the staging index. A repository without one has an empty index.
pub fn load_index<R: Repo + ?Sized>(repo: &R) -> Result<Index> {
    match repo.read_file(RepoFile::Index)? {
        Some(content) => Ok(Index::parse(&content)?),
        None => Ok(Index::new()),
    }
}

/// Rewrites the staging index.
pub fn save_index<R: Repo + ?Sized>(repo: &mut R, index: &Index) -> Result<()> {
    repo.write_file(RepoFile::Index, &index.to_bytes())?;
    debug!(entries = index.len(), "saved index");
    Ok(())
}

/// Outcome of staging a batch of paths.
///
/// A failure on one path doesn't stop the others from being staged.
#[derive(Debug, Default)]
pub struct AddReport {
    /// Index paths whose entry is new or changed, with the staged ID.
    pub added: Vec<(String, Id)>,

    /// Paths that could not be staged.
    pub failed: Vec<(PathBuf, Error)>,
}

impl AddReport {
    /// Returns true if every path was staged.
    pub fn is_ok(&self) -> bool {
        self.failed.is_empty()
    }

    fn stage(&mut self, index: &mut Index, path: &str, entry: IndexEntry) {
        if index.upsert(path, entry) {
            debug!(path, id = %entry.id, mode = %entry.mode, "staged");
            self.added.push((path.to_string(), entry.id));
        }
    }
}

/// Stages each of `paths`.
///
/// Relative paths are taken relative to the repository's working directory.
/// A directory is staged along with everything beneath it. Missing or
/// unreadable paths are reported in the result and skipped.
pub fn add_paths<R, P>(repo: &mut R, paths: &[P]) -> Result<AddReport>
where
    R: Repo + ?Sized,
    P: AsRef<Path>,
{
    let mut index = load_index(repo)?;
    let mut report = AddReport::default();

    for path in paths {
        let path = path.as_ref();
        if let Err(err) = add_path(repo, &mut index, &mut report, path) {
            warn!(path = %path.display(), error = %err, "not staged");
            report.failed.push((path.to_path_buf(), err));
        }
    }

    if !report.added.is_empty() {
        save_index(repo, &index)?;
    }

    info!(
        added = report.added.len(),
        failed = report.failed.len(),
        "add finished"
    );
    Ok(report)
}

fn add_path<R: Repo + ?Sized>(
    repo: &mut R,
    index: &mut Index,
    report: &mut AddReport,
    path: &Path,
) -> Result<()> {
    let work_dir = repo.work_dir().to_path_buf();
    let full_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        work_dir.join(path)
    };

    let rel_path = index_path(&work_dir, &full_path)?;
    if !full_path.exists() {
        return Err(Error::MissingFile(path.to_path_buf()));
    }

    if full_path.is_dir() {
        let mut staged = Vec::new();
        let id = tree_builder::walk_tree(repo, &full_path, &rel_path, &mut |p, entry| {
            staged.push((p.to_string(), entry))
        })?;

        for (p, entry) in staged {
            report.stage(index, &p, entry);
        }
        report.stage(index, &rel_path, IndexEntry::new(FileMode::Tree, id));
    } else {
        let entry = tree_builder::put_file(repo, &full_path)?;
        report.stage(index, &rel_path, entry);
    }

    Ok(())
}

/// Stages the whole working directory.
///
/// Every file is staged as a blob and every directory as a tree.
/// Entries whose mode and ID are already staged are left alone; the index
/// is only rewritten if something changed.
pub fn add_all<R: Repo + ?Sized>(repo: &mut R) -> Result<AddReport> {
    let work_dir = repo.work_dir().to_path_buf();
    let mut index = load_index(repo)?;

    let mut staged = Vec::new();
    tree_builder::walk_tree(repo, &work_dir, "", &mut |p, entry| {
        staged.push((p.to_string(), entry))
    })?;

    let mut report = AddReport::default();
    for (p, entry) in staged {
        report.stage(&mut index, &p, entry);
    }

    if !report.added.is_empty() {
        save_index(repo, &index)?;
    }

    info!(added = report.added.len(), "add all finished");
    Ok(report)
}

/// Converts `path` (inside `work_dir`) to its `/`-separated index path.
///
/// The conversion is lexical: `.` components are dropped, and a path that
/// climbs out of `work_dir`, names `work_dir` itself, or points into the
/// metadata directory is rejected.
pub fn index_path(work_dir: &Path, path: &Path) -> Result<String> {
    let outside = || Error::PathOutsideWorkDir(path.to_path_buf());

    let rel = path.strip_prefix(work_dir).map_err(|_| outside())?;

    let mut components = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(name) => components.push(name.to_str().ok_or_else(outside)?),
            Component::CurDir => (),
            _ => return Err(outside()),
        }
    }

    match components.first() {
        None => Err(outside()),
        Some(first) if *first == REPO_DIR_NAME => Err(outside()),
        Some(_) => Ok(components.join("/")),
    }
}
