//! Records the staged snapshot as a new commit.

use tracing::{debug, info, info_span};

use crate::history;
use crate::object::{Attribution, Commit, Id, Kind};
use crate::repo::{Error, Repo, Result};
use crate::staging;
use crate::tree_builder;

/// Returns an error if `message` can't be stored in a history line.
pub fn validate_message(message: &str) -> Result<()> {
    if message.contains(|c: char| c == '\n' || c == '\t') {
        Err(Error::InvalidMessage)
    } else {
        Ok(())
    }
}

/// Commits the staging index.
///
/// Builds a tree from the staged entries, links it to the previous commit
/// (or the all-zero ID if there is none), stores the commit object, and
/// records it in the history and the log. `date` is the human-readable
/// timestamp shown in the log.
///
/// Fails with `EmptyIndex` before writing anything if nothing is staged.
/// The staging index itself is left as it is.
pub fn commit<R: Repo + ?Sized>(
    repo: &mut R,
    attribution: &Attribution,
    date: &str,
    message: &str,
) -> Result<Id> {
    let _span = info_span!("commit").entered();

    validate_message(message)?;

    let index = staging::load_index(repo)?;
    if index.is_empty() {
        return Err(Error::EmptyIndex);
    }

    debug!(entries = index.len(), "building tree");
    let tree = tree_builder::build_tree_from_index(repo, &index)?;

    let parent = history::head(repo)?;
    debug!(
        parent = %parent.unwrap_or_else(Id::zero),
        "linked parent"
    );

    let commit = Commit::new(tree, parent, attribution.clone(), message);
    let id = repo.put_object(Kind::Commit, commit.to_body())?;

    history::append(repo, &commit)?;
    history::prepend_log(repo, &id, &commit, date)?;

    info!(commit = %id, tree = %tree, "committed");
    Ok(id)
}
