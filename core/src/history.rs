//! The commit history and the human-readable log.
//!
//! The history file holds one line per commit, oldest first:
//!
//! ```text
//! <parent> <tree> <author> <timestamp> <timezone>\tcommit: <message>
//! ```
//!
//! A line carries every field of its commit, so the commit's ID is
//! recovered by re-encoding those fields and hashing them. The last line
//! therefore names the current head.
//!
//! The log file holds one block per commit, newest first.

use std::str;

use tracing::debug;

use crate::object::{codec, Attribution, Commit, Id, Kind};
use crate::repo::{Error, Repo, RepoFile, Result};

const MESSAGE_PREFIX: &str = "commit: ";

/// One line of the history file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HistoryRecord {
    commit: Commit,
}

impl HistoryRecord {
    pub fn new(commit: Commit) -> HistoryRecord {
        HistoryRecord { commit }
    }

    /// Parse a single history line (without its trailing newline).
    pub fn parse_line(line: &str) -> Result<HistoryRecord> {
        let malformed = || Error::MalformedHistory(line.to_string());

        let tab = line.find('\t').ok_or_else(malformed)?;
        let (fields, message) = (&line[..tab], &line[tab + 1..]);

        if !message.starts_with(MESSAGE_PREFIX) {
            return Err(malformed());
        }
        let message = &message[MESSAGE_PREFIX.len()..];

        let mut fields = fields.splitn(3, ' ');
        let parent = fields.next().ok_or_else(malformed)?;
        let tree = fields.next().ok_or_else(malformed)?;
        let attribution = fields
            .next()
            .and_then(Attribution::parse)
            .ok_or_else(malformed)?;

        let parent = Id::from_hex(parent.as_bytes()).map_err(|_| malformed())?;
        let tree = Id::from_hex(tree.as_bytes()).map_err(|_| malformed())?;

        let parent = if parent.is_zero() { None } else { Some(parent) };
        Ok(HistoryRecord {
            commit: Commit::new(tree, parent, attribution, message),
        })
    }

    /// Returns the line (including trailing newline) for this record.
    pub fn to_line(&self) -> String {
        let c = &self.commit;
        format!(
            "{} {} {}\t{}{}\n",
            c.parent_id(),
            c.tree(),
            c.attribution(),
            MESSAGE_PREFIX,
            c.message()
        )
    }

    /// Returns the commit this record describes.
    pub fn commit(&self) -> &Commit {
        &self.commit
    }

    /// Returns the ID of the commit this record describes.
    pub fn commit_id(&self) -> Id {
        codec::hash(&codec::encode_object(Kind::Commit, &self.commit.to_body()))
    }
}

/// Returns the most recent history record, or `None` if nothing has been
/// committed yet.
pub fn last_record<R: Repo + ?Sized>(repo: &R) -> Result<Option<HistoryRecord>> {
    let content = match repo.read_file(RepoFile::History)? {
        Some(content) => content,
        None => return Ok(None),
    };

    let content = str::from_utf8(&content)
        .map_err(|_| Error::MalformedHistory("history is not valid UTF-8".to_string()))?;

    // Split on '\n' only; `lines()` would also drop a trailing '\r'.
    match content.split('\n').rev().find(|line| !line.is_empty()) {
        Some(line) => Ok(Some(HistoryRecord::parse_line(line)?)),
        None => Ok(None),
    }
}

/// Returns the ID of the most recent commit, if any.
pub fn head<R: Repo + ?Sized>(repo: &R) -> Result<Option<Id>> {
    Ok(last_record(repo)?.map(|r| r.commit_id()))
}

/// Appends a commit to the history file.
pub fn append<R: Repo + ?Sized>(repo: &mut R, commit: &Commit) -> Result<()> {
    let record = HistoryRecord::new(commit.clone());
    repo.append_file(RepoFile::History, record.to_line().as_bytes())
}

/// Formats one block of the human-readable log.
pub fn log_entry(id: &Id, commit: &Commit, date: &str) -> String {
    format!(
        "commit {}\nAuthor: {}\nDate: {}\n\n    {}\n\n",
        id,
        commit.attribution().author(),
        date,
        commit.message()
    )
}

/// Puts a block describing `commit` at the top of the log.
pub fn prepend_log<R: Repo + ?Sized>(
    repo: &mut R,
    id: &Id,
    commit: &Commit,
    date: &str,
) -> Result<()> {
    let mut content = log_entry(id, commit, date).into_bytes();
    if let Some(existing) = repo.read_file(RepoFile::Log)? {
        content.extend_from_slice(&existing);
    }

    repo.write_file(RepoFile::Log, &content)?;
    debug!(commit = %id, "log updated");
    Ok(())
}

/// Returns the human-readable log, newest first. Empty if nothing has
/// been committed.
pub fn read_log<R: Repo + ?Sized>(repo: &R) -> Result<Vec<u8>> {
    Ok(repo.read_file(RepoFile::Log)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::str::FromStr;

    use crate::repo::MemRepo;

    const TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

    fn commit(parent: Option<Id>, message: &str) -> Commit {
        Commit::new(
            Id::from_str(TREE).unwrap(),
            parent,
            Attribution::new("A. U. Thor <author@localhost>", "1", "+0000").unwrap(),
            message,
        )
    }

    #[test]
    fn line_format() {
        let r = HistoryRecord::new(commit(None, "first one"));
        assert_eq!(
            r.to_line(),
            format!(
                "{} {} A. U. Thor <author@localhost> 1 +0000\tcommit: first one\n",
                "0".repeat(40),
                TREE
            )
        );
    }

    #[test]
    fn parse_line_round_trip() {
        let parent = codec::hash(b"anything");
        let r = HistoryRecord::new(commit(Some(parent), "second"));

        let line = r.to_line();
        let parsed = HistoryRecord::parse_line(line.trim_end_matches('\n')).unwrap();
        assert_eq!(parsed, r);
        assert_eq!(parsed.commit().parent(), Some(&parent));
    }

    #[test]
    fn commit_id_matches_stored_commit() {
        let mut repo = MemRepo::new("/nowhere");
        let c = commit(None, "msg");
        let stored = repo.put_object(Kind::Commit, c.to_body()).unwrap();

        assert_eq!(HistoryRecord::new(c).commit_id(), stored);
    }

    #[test]
    fn parse_line_errors() {
        let lines = vec![
            String::new(),
            "no tab here".to_string(),
            "a b c 1 +0000\tcommit: x".to_string(),
            format!("{} {} author 1 +0000\tmessage: x", TREE, TREE),
            format!("{} {} 1\tcommit: x", TREE, TREE),
        ];

        for line in &lines {
            assert!(
                matches!(HistoryRecord::parse_line(line), Err(Error::MalformedHistory(_))),
                "accepted {:?}",
                line
            );
        }
    }

    #[test]
    fn head_follows_last_line() {
        let mut repo = MemRepo::new("/nowhere");
        assert!(head(&repo).unwrap().is_none());

        let first = commit(None, "first");
        append(&mut repo, &first).unwrap();
        let first_id = head(&repo).unwrap().unwrap();

        let second = commit(Some(first_id), "second");
        append(&mut repo, &second).unwrap();

        let last = last_record(&repo).unwrap().unwrap();
        assert_eq!(last.commit(), &second);
        assert_eq!(last.commit().parent(), Some(&first_id));
    }

    #[test]
    fn log_is_newest_first() {
        let mut repo = MemRepo::new("/nowhere");
        assert!(read_log(&repo).unwrap().is_empty());

        let one = commit(None, "one");
        let two = commit(None, "two");
        let one_id = codec::hash(b"1");
        let two_id = codec::hash(b"2");

        prepend_log(&mut repo, &one_id, &one, "Mon Jan 01 00:00:00 2024 +0000").unwrap();
        prepend_log(&mut repo, &two_id, &two, "Tue Jan 02 00:00:00 2024 +0000").unwrap();

        let expected = format!(
            "commit {}\nAuthor: A. U. Thor <author@localhost>\nDate: Tue Jan 02 00:00:00 2024 +0000\n\n    two\n\n\
             commit {}\nAuthor: A. U. Thor <author@localhost>\nDate: Mon Jan 01 00:00:00 2024 +0000\n\n    one\n\n",
            two_id, one_id
        );
        assert_eq!(String::from_utf8(read_log(&repo).unwrap()).unwrap(), expected);
    }
}
