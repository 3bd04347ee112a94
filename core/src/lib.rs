//! This crate implements the core data model for a minimal content-addressable
//! version-control store: objects, trees, commits, the staging index, and the
//! operations that move content between a working directory and a [`Repo`].
//!
//! [`Repo`]: repo/trait.Repo.html

pub mod checkout;
pub mod commit;
pub mod history;
pub mod index;
pub mod object;
pub mod path;
pub mod repo;
pub mod staging;
pub mod tree_builder;

/// Name of the metadata directory kept at the top of a working directory.
///
/// Tree building and staging never descend into a directory with this name.
pub const REPO_DIR_NAME: &str = ".minigit";
