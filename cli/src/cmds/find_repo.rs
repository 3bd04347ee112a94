use std::{env, path::Path};

use minigit_core::repo::Result;
use minigit_on_disk::OnDiskRepo;

// Discover a repo starting from the given path.
//
// This handles only the simple case where there is a `.minigit`
// directory directly within the given path. Parent directories
// are not searched.
//
// Returns a `Result` with `OnDiskRepo` or
// `minigit_core::repo::Error` if no such repo exists.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<OnDiskRepo> {
    OnDiskRepo::new(path.as_ref())
}

// Discover a repo starting from the current working directory.
#[cfg(not(tarpaulin_include))]
pub fn from_current_dir() -> Result<OnDiskRepo> {
    // Excluded from code coverage because we can't be sure of the
    // execution environment while testing. So we keep it as simple
    // as possible.
    let path = env::current_dir()?;
    from_path(path)
}
