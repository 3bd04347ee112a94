use std::fmt;

use thiserror::Error;

/// An `Attribution` records who made a commit and when.
///
/// All three values come from the caller's environment and are stored
/// verbatim: `author` is typically `Name <email>`, `timestamp` is seconds
/// since the Unix epoch, and `timezone` an offset such as `+0530`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attribution {
    author: String,
    timestamp: String,
    timezone: String,
}

/// Describes why attribution values can't be stored.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum AttributionError {
    #[error("author must not be empty or contain line breaks or tabs")]
    InvalidAuthor,

    #[error("timestamp `{0}` must be a non-empty word")]
    InvalidTimestamp(String),

    #[error("timezone `{0}` must be a non-empty word")]
    InvalidTimezone(String),
}

impl Attribution {
    /// Creates a new attribution.
    ///
    /// The author may contain spaces, but neither the timestamp nor the
    /// timezone may; that is what lets [`parse`] split them apart again.
    ///
    /// [`parse`]: #method.parse
    pub fn new(
        author: &str,
        timestamp: &str,
        timezone: &str,
    ) -> Result<Attribution, AttributionError> {
        if author.trim().is_empty() || author.contains(|c: char| c == '\n' || c == '\t') {
            return Err(AttributionError::InvalidAuthor);
        }

        if !is_word(timestamp) {
            return Err(AttributionError::InvalidTimestamp(timestamp.to_string()));
        }

        if !is_word(timezone) {
            return Err(AttributionError::InvalidTimezone(timezone.to_string()));
        }

        Ok(Attribution {
            author: author.to_string(),
            timestamp: timestamp.to_string(),
            timezone: timezone.to_string(),
        })
    }

    /// Parse `"<author> <timestamp> <timezone>"`.
    /// Returns `None` if unable to parse the line properly.
    pub fn parse(line: &str) -> Option<Attribution> {
        let mut words = line.rsplitn(3, ' ');
        let timezone = words.next()?;
        let timestamp = words.next()?;
        let author = words.next()?;

        Attribution::new(author, timestamp, timezone).ok()
    }

    /// Returns the author identity.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Returns the timezone offset.
    pub fn timezone(&self) -> &str {
        &self.timezone
    }
}

impl fmt::Display for Attribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.author, self.timestamp, self.timezone)
    }
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && !s.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_and_display() {
        let a = Attribution::new("A. U. Thor <author@localhost>", "1700000000", "+0530").unwrap();
        assert_eq!(a.author(), "A. U. Thor <author@localhost>");
        assert_eq!(a.timestamp(), "1700000000");
        assert_eq!(a.timezone(), "+0530");
        assert_eq!(a.to_string(), "A. U. Thor <author@localhost> 1700000000 +0530");
    }

    #[test]
    fn parse() {
        let a = Attribution::parse("A. U. Thor <author@localhost> 1 -0700").unwrap();
        assert_eq!(a.author(), "A. U. Thor <author@localhost>");
        assert_eq!(a.timestamp(), "1");
        assert_eq!(a.timezone(), "-0700");

        assert_eq!(Attribution::parse(&a.to_string()).unwrap(), a);

        assert!(Attribution::parse("1 +0000").is_none());
        assert!(Attribution::parse("").is_none());
        assert!(Attribution::parse("someone 1 ").is_none());
    }

    #[test]
    fn invalid_values() {
        assert_eq!(
            Attribution::new("", "1", "+0000").unwrap_err(),
            AttributionError::InvalidAuthor
        );
        assert_eq!(
            Attribution::new("a\nb", "1", "+0000").unwrap_err(),
            AttributionError::InvalidAuthor
        );
        assert_eq!(
            Attribution::new("a", "1 2", "+0000").unwrap_err(),
            AttributionError::InvalidTimestamp("1 2".to_string())
        );
        assert_eq!(
            Attribution::new("a", "1", "").unwrap_err(),
            AttributionError::InvalidTimezone("".to_string())
        );
    }
}
