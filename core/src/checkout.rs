//! Restores committed file content into the working directory.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::object::{Commit, Id, Kind, TreeEntry};
use crate::path::FileMode;
use crate::repo::{Error, Repo, Result};

/// Outcome of a checkout.
///
/// A failure on one file doesn't stop the others from being restored.
#[derive(Debug, Default)]
pub struct CheckoutReport {
    /// Names of the files written to the working directory.
    pub restored: Vec<String>,

    /// Names of sub-trees that were not materialized.
    pub skipped: Vec<String>,

    /// Files that could not be restored.
    pub failed: Vec<(String, Error)>,
}

impl CheckoutReport {
    /// Returns true if every file was restored.
    pub fn is_ok(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Resolves a commit (or a tree given directly) to its root tree ID.
pub fn resolve_tree<R: Repo + ?Sized>(repo: &R, id: &Id) -> Result<Id> {
    let object = repo.get_object(id)?;
    match object.kind() {
        Kind::Commit => Ok(*Commit::parse(&object.content()?)?.tree()),
        Kind::Tree => Ok(*id),
        actual => Err(Error::UnexpectedKind {
            id: *id,
            expected: Kind::Commit,
            actual,
        }),
    }
}

/// Writes the files of a commit's root tree into the working directory.
///
/// Each blob entry is written to a file of the same name directly in the
/// working directory, replacing any existing file. Sub-trees are not
/// descended into. Fails outright only if the commit or its tree can't be
/// read; a blob that can't be restored is reported and skipped.
pub fn checkout<R: Repo + ?Sized>(repo: &R, id: &Id) -> Result<CheckoutReport> {
    let tree = resolve_tree(repo, id)?;
    let entries = repo.read_tree(&tree)?;
    debug!(commit = %id, tree = %tree, entries = entries.len(), "checking out");

    let mut report = CheckoutReport::default();

    for entry in entries {
        if entry.mode.is_tree() {
            debug!(name = entry.name.as_str(), "skipping sub-tree");
            report.skipped.push(entry.name);
            continue;
        }

        match restore(repo, repo.work_dir(), &entry) {
            Ok(()) => report.restored.push(entry.name),
            Err(err) => {
                warn!(name = entry.name.as_str(), error = %err, "not restored");
                report.failed.push((entry.name, err));
            }
        }
    }

    info!(
        restored = report.restored.len(),
        failed = report.failed.len(),
        "checkout finished"
    );
    Ok(report)
}

fn restore<R: Repo + ?Sized>(repo: &R, work_dir: &Path, entry: &TreeEntry) -> Result<()> {
    let blob = repo.get_object_of_kind(&entry.id, Kind::Blob)?;
    let path = work_dir.join(&entry.name);

    if path.is_dir() {
        return Err(Error::IoError(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} is a directory", path.display()),
        )));
    }

    fs::write(&path, blob.content()?)?;
    set_mode(&path, entry.mode)?;
    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: FileMode) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    let bits = permissions.mode();
    let bits = match mode {
        FileMode::Executable => bits | 0o111,
        _ => bits & !0o111,
    };
    permissions.set_mode(bits);
    fs::set_permissions(path, permissions)?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: FileMode) -> Result<()> {
    Ok(())
}
