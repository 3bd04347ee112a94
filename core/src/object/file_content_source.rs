use std::convert::AsRef;
use std::fs::{self, File};
use std::io::{self, BufReader, Error, ErrorKind};
use std::path::{Path, PathBuf};

use super::{ContentSource, ContentSourceOpenResult};
use crate::path::FileMode;

/// Implements `ContentSource` to read content from a file on disk.
pub struct FileContentSource {
    path: PathBuf,
    len: usize,
    mode: FileMode,
}

impl FileContentSource {
    /// Create a `FileContentSource` for a file that exists
    /// already on disk.
    pub fn new<P: AsRef<Path>>(path: P) -> io::Result<FileContentSource> {
        let m = fs::metadata(&path)?;
        if !m.is_file() {
            return Err(Error::new(ErrorKind::NotFound, "not a single file"));
        }

        Ok(FileContentSource {
            len: m.len() as usize,
            mode: FileMode::from_metadata(&m),
            path: path.as_ref().to_owned(),
        })
    }

    /// Returns the path this content is read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file mode (regular or executable) observed when the
    /// source was created.
    pub fn mode(&self) -> FileMode {
        self.mode
    }
}

impl ContentSource for FileContentSource {
    fn len(&self) -> usize {
        self.len
    }

    fn open(&self) -> ContentSourceOpenResult {
        let f = File::open(&self.path)?;
        Ok(Box::new(BufReader::new(f)))
    }
}
