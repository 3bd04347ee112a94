use std::fs;
use std::path::{Path, PathBuf};

use crate::OnDiskRepo;

/// A `TempRepo` creates a temporary, empty repository in a directory that
/// is deleted when the struct is dropped.
///
/// Because this struct is intended for testing, its functions
/// panic instead of returning Result structs.
pub struct TempRepo {
    #[allow(dead_code)] // tempdir is only used for RAII
    tempdir: tempfile::TempDir,
    path: PathBuf,
}

impl TempRepo {
    /// Create a new, empty repo in a temporary directory.
    pub fn new() -> TempRepo {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().to_path_buf();

        OnDiskRepo::init(&path).unwrap();

        TempRepo { tempdir, path }
    }

    /// Return the path for this repo's root (working directory).
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Open the repository.
    pub fn repo(&self) -> OnDiskRepo {
        OnDiskRepo::new(&self.path).unwrap()
    }

    /// Write a file into the working directory, creating parent
    /// directories as needed. Returns `self` for method chaining.
    pub fn write_file<P: AsRef<Path>, C: AsRef<[u8]>>(&self, path: P, content: C) -> &Self {
        let path = self.path.join(path);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).unwrap();
        }
        fs::write(&path, content).unwrap();
        self
    }

    /// Read a file from the working directory.
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Vec<u8> {
        fs::read(self.path.join(path)).unwrap()
    }
}

impl Default for TempRepo {
    fn default() -> Self {
        TempRepo::new()
    }
}
