//! This crate provides a repository that stores content on the local file system.
//!
//! Objects live as zlib-compressed loose files under `.minigit/objects`,
//! fanned out by the first two hex digits of their ID. The staging index,
//! the commit history, and the human-readable log are plain text files
//! next to them.

#![deny(warnings)]

mod on_disk_repo;
pub use on_disk_repo::OnDiskRepo;

mod temp_repo;
pub use temp_repo::TempRepo;
