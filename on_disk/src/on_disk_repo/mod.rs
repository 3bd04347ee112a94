use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use minigit_core::object::Id;
use minigit_core::repo::{Error, Repo, RepoFile, Result};
use minigit_core::REPO_DIR_NAME;

/// Implementation of `minigit_core::repo::Repo` that stores content on the
/// local file system.
///
/// Layout, relative to the `.minigit` directory:
///
/// ```text
/// objects/<2-hex>/<38-hex>   compressed object bytes
/// index                      staging index
/// logs/HEAD                  commit history
/// logs/log                   human-readable log
/// ```
#[derive(Debug)]
pub struct OnDiskRepo {
    work_dir: PathBuf,
    repo_dir: PathBuf,
}

impl OnDiskRepo {
    /// Open an existing on-disk repository.
    ///
    /// `work_dir` should be the top-level working directory. A `.minigit`
    /// directory should exist at this path. Use `init` to create an empty
    /// on-disk repository if necessary.
    pub fn new(work_dir: &Path) -> Result<Self> {
        let work_dir = work_dir.to_path_buf();
        if !work_dir.exists() {
            return Err(Error::WorkDirDoesntExist(work_dir));
        }

        let repo_dir = work_dir.join(REPO_DIR_NAME);
        if !repo_dir.is_dir() {
            return Err(Error::RepoDirDoesntExist(repo_dir));
        }

        Ok(OnDiskRepo { work_dir, repo_dir })
    }

    /// Creates a new, empty repository on the local file system.
    ///
    /// The working directory is created if it doesn't exist yet.
    pub fn init(work_dir: &Path) -> Result<Self> {
        let repo_dir = work_dir.join(REPO_DIR_NAME);
        if repo_dir.exists() {
            return Err(Error::RepoDirShouldntExist(repo_dir));
        }

        fs::create_dir_all(&repo_dir)?;

        create_head(&repo_dir)?;
        create_objects_dir(&repo_dir)?;
        create_logs_dir(&repo_dir)?;
        create_refs_dir(&repo_dir)?;
        create_index(&repo_dir)?;

        info!(path = %repo_dir.display(), "initialized empty repository");

        Ok(OnDiskRepo {
            work_dir: work_dir.to_path_buf(),
            repo_dir,
        })
    }

    /// Return the path to the `.minigit` directory.
    pub fn repo_dir(&self) -> &Path {
        self.repo_dir.as_path()
    }

    /// Return the path where the loose object with this ID is stored.
    pub fn loose_object_path(&self, id: &Id) -> PathBuf {
        let (dir, file) = id.loose_path_parts();
        self.repo_dir.join("objects").join(dir).join(file)
    }

    /// Return the path of a metadata file.
    pub fn file_path(&self, file: RepoFile) -> PathBuf {
        match file {
            RepoFile::Index => self.repo_dir.join("index"),
            RepoFile::History => self.repo_dir.join("logs/HEAD"),
            RepoFile::Log => self.repo_dir.join("logs/log"),
        }
    }
}

impl Repo for OnDiskRepo {
    fn work_dir(&self) -> &Path {
        self.work_dir.as_path()
    }

    fn has_loose_object(&self, id: &Id) -> Result<bool> {
        Ok(self.loose_object_path(id).is_file())
    }

    fn put_loose_bytes(&mut self, id: &Id, compressed: &[u8]) -> Result<bool> {
        let object_path = self.loose_object_path(id);
        if object_path.exists() {
            return Ok(false);
        }

        let object_dir = match object_path.parent() {
            Some(dir) => dir,
            None => return Err(Error::RepoDirDoesntExist(self.repo_dir.clone())),
        };
        fs::create_dir_all(object_dir)?;

        let mut temp = NamedTempFile::new_in(object_dir)?;
        temp.write_all(compressed)?;

        match temp.persist_noclobber(&object_path) {
            Ok(_) => {
                debug!(path = %object_path.display(), "wrote loose object");
                Ok(true)
            }
            // Another writer got there first with identical content.
            Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(err) => Err(err.error.into()),
        }
    }

    fn get_loose_bytes(&self, id: &Id) -> Result<Vec<u8>> {
        match fs::read(self.loose_object_path(id)) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(Error::ObjectNotFound(*id)),
            Err(err) => Err(err.into()),
        }
    }

    fn read_file(&self, file: RepoFile) -> Result<Option<Vec<u8>>> {
        match fs::read(self.file_path(file)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write_file(&mut self, file: RepoFile, content: &[u8]) -> Result<()> {
        let path = self.file_path(file);
        let dir = path.parent().unwrap_or_else(|| self.repo_dir.as_path());
        fs::create_dir_all(dir)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(content)?;
        temp.persist(&path).map_err(|err| err.error)?;
        Ok(())
    }

    fn append_file(&mut self, file: RepoFile, content: &[u8]) -> Result<()> {
        let path = self.file_path(file);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let mut f = OpenOptions::new().create(true).append(true).open(&path)?;
        f.write_all(content)?;
        Ok(())
    }
}

fn create_head(repo_dir: &Path) -> Result<()> {
    let head_path = repo_dir.join("HEAD");
    let head_txt = "ref: refs/heads/main\n";

    fs::write(head_path, head_txt).map_err(|e| e.into())
}

fn create_objects_dir(repo_dir: &Path) -> Result<()> {
    fs::create_dir_all(repo_dir.join("objects")).map_err(|e| e.into())
}

fn create_logs_dir(repo_dir: &Path) -> Result<()> {
    fs::create_dir_all(repo_dir.join("logs")).map_err(|e| e.into())
}

fn create_refs_dir(repo_dir: &Path) -> Result<()> {
    let heads_dir = repo_dir.join("refs/heads");
    fs::create_dir_all(&heads_dir).map_err(|e| e.into())
}

fn create_index(repo_dir: &Path) -> Result<()> {
    fs::write(repo_dir.join("index"), "").map_err(|e| e.into())
}
