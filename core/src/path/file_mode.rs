use std::fmt::{self, Display, Formatter};
use std::fs::Metadata;

/// Describes the file type as represented in trees and in the staging index.
///
/// The following values are recognized:
///
/// * `100644` - normal file
/// * `100755` - executable file
/// * `40000` - tree (subdirectory)
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum FileMode {
    Normal,
    Executable,
    Tree,
}

impl FileMode {
    /// Convert from file-mode integer to `FileMode` enum.
    ///
    /// Returns `None` if the value is not one of the recognized constants.
    pub fn from_value(value: u32) -> Option<FileMode> {
        match value {
            0o100644 => Some(FileMode::Normal),
            0o100755 => Some(FileMode::Executable),
            0o040000 => Some(FileMode::Tree),
            _ => None,
        }
    }

    /// Convert from `FileMode` enum to file-mode integer.
    pub fn to_value(self) -> u32 {
        match self {
            FileMode::Normal => 0o100644,
            FileMode::Executable => 0o100755,
            FileMode::Tree => 0o040000,
        }
    }

    /// Parse the octal text form used in tree entries and index lines.
    ///
    /// Leading zeros are rejected so that every mode has exactly one
    /// spelling; `40000` is valid, `040000` is not.
    pub fn from_octal_slice(s: &[u8]) -> Option<FileMode> {
        if s.is_empty() || s[0] == b'0' || s.len() > 6 {
            return None;
        }

        let mut value = 0u32;
        for c in s {
            match c {
                b'0'..=b'7' => value = value << 3 | u32::from(c - b'0'),
                _ => return None,
            }
        }

        FileMode::from_value(value)
    }

    /// Returns the octal text form used in tree entries and index lines.
    pub fn as_str(self) -> &'static str {
        match self {
            FileMode::Normal => "100644",
            FileMode::Executable => "100755",
            FileMode::Tree => "40000",
        }
    }

    /// Returns true if the mode describes a subdirectory.
    pub fn is_tree(self) -> bool {
        self == FileMode::Tree
    }

    /// Classify a file or directory from its metadata.
    ///
    /// A file is `Executable` when its owner-execute bit is set. Platforms
    /// without Unix permissions always yield `Normal` for files.
    pub fn from_metadata(m: &Metadata) -> FileMode {
        if m.is_dir() {
            return FileMode::Tree;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            if m.permissions().mode() & 0o100 != 0 {
                return FileMode::Executable;
            }
        }

        FileMode::Normal
    }
}

impl Display for FileMode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_value() {
        assert_eq!(FileMode::from_value(0o100644).unwrap(), FileMode::Normal);
        assert_eq!(
            FileMode::from_value(0o100755).unwrap(),
            FileMode::Executable
        );
        assert_eq!(FileMode::from_value(0o040000).unwrap(), FileMode::Tree);
        assert!(FileMode::from_value(0o120000).is_none());
        assert!(FileMode::from_value(0o160000).is_none());
        assert!(FileMode::from_value(0).is_none());
    }

    #[test]
    fn to_value() {
        assert_eq!(FileMode::to_value(FileMode::Normal), 0o100644);
        assert_eq!(FileMode::to_value(FileMode::Executable), 0o100755);
        assert_eq!(FileMode::to_value(FileMode::Tree), 0o040000);
    }

    #[test]
    fn from_octal_slice() {
        assert_eq!(FileMode::from_octal_slice(b"100644"), Some(FileMode::Normal));
        assert_eq!(
            FileMode::from_octal_slice(b"100755"),
            Some(FileMode::Executable)
        );
        assert_eq!(FileMode::from_octal_slice(b"40000"), Some(FileMode::Tree));

        assert_eq!(FileMode::from_octal_slice(b"040000"), None);
        assert_eq!(FileMode::from_octal_slice(b"040755"), None);
        assert_eq!(FileMode::from_octal_slice(b"100664"), None);
        assert_eq!(FileMode::from_octal_slice(b"100648"), None);
        assert_eq!(FileMode::from_octal_slice(b"1006440"), None);
        assert_eq!(FileMode::from_octal_slice(b""), None);
    }

    #[test]
    fn text_round_trip() {
        for mode in &[FileMode::Normal, FileMode::Executable, FileMode::Tree] {
            assert_eq!(
                FileMode::from_octal_slice(mode.as_str().as_bytes()),
                Some(*mode)
            );
            assert_eq!(mode.to_string(), mode.as_str());
        }
    }
}
