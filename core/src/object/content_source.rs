use std::{
    io::{self, BufRead, Cursor, Read},
    vec::Vec,
};

/// Result type for [`ContentSource.open()`] call.
///
/// [`ContentSource.open()`]: trait.ContentSource.html#tymethod.open
pub type ContentSourceOpenResult<'a> = io::Result<Box<dyn BufRead + 'a>>;

/// Trait used for reading object content from various sources.
pub trait ContentSource {
    /// Returns the length (in bytes) of the content.
    fn len(&self) -> usize;

    /// Returns true if the content is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a [`BufRead`] struct which can be used for reading the content.
    ///
    /// [`BufRead`]: https://doc.rust-lang.org/std/io/trait.BufRead.html
    fn open(&self) -> ContentSourceOpenResult;

    /// Reads the entire content into memory.
    ///
    /// Fails with `InvalidData` if the source yields a different number of
    /// bytes than `len()` reported (for example, a file that changed while
    /// being read).
    fn read_all(&self) -> io::Result<Vec<u8>> {
        let mut content = Vec::with_capacity(self.len());
        self.open()?.read_to_end(&mut content)?;

        if content.len() != self.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "content length changed while reading (expected {}, read {})",
                    self.len(),
                    content.len()
                ),
            ));
        }

        Ok(content)
    }
}

impl ContentSource for Vec<u8> {
    fn len(&self) -> usize {
        self.len()
    }

    fn open(&self) -> ContentSourceOpenResult {
        Ok(Box::new(Cursor::new(self)))
    }
}

impl ContentSource for String {
    fn len(&self) -> usize {
        self.len()
    }

    fn open(&self) -> ContentSourceOpenResult {
        Ok(Box::new(Cursor::new(self.as_bytes())))
    }
}
