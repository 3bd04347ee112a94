//! Who is committing, and when.

use std::env;

use chrono::{DateTime, Local};

use minigit_core::object::{Attribution, AttributionError};

const DEFAULT_NAME: &str = "minigit";
const DEFAULT_EMAIL: &str = "minigit@localhost";

/// Format of the date line in the human-readable log.
pub(crate) const LOG_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %Y %z";

#[derive(Debug, Eq, PartialEq)]
pub(crate) struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    /// Reads the author from `MINIGIT_AUTHOR_NAME` / `MINIGIT_AUTHOR_EMAIL`,
    /// then `GIT_AUTHOR_NAME` / `GIT_AUTHOR_EMAIL`.
    #[cfg(not(tarpaulin_include))]
    pub fn from_env() -> Identity {
        Identity::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Identity
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str], default: &str| {
            keys.iter()
                .filter_map(|key| lookup(*key))
                .map(|value| value.trim().to_string())
                .find(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Identity {
            name: first(&["MINIGIT_AUTHOR_NAME", "GIT_AUTHOR_NAME"], DEFAULT_NAME),
            email: first(&["MINIGIT_AUTHOR_EMAIL", "GIT_AUTHOR_EMAIL"], DEFAULT_EMAIL),
        }
    }

    /// Returns `Name <email>`.
    pub fn author(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// Stamps this identity with `time`. Returns the attribution and the
    /// date as shown in the log.
    pub fn attribution_at(
        &self,
        time: &DateTime<Local>,
    ) -> Result<(Attribution, String), AttributionError> {
        let attribution = Attribution::new(
            &self.author(),
            &time.timestamp().to_string(),
            &time.format("%z").to_string(),
        )?;

        Ok((attribution, time.format(LOG_DATE_FORMAT).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use chrono::TimeZone;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let id = Identity::from_lookup(lookup(&[]));
        assert_eq!(id.author(), "minigit <minigit@localhost>");
    }

    #[test]
    fn minigit_vars_win() {
        let id = Identity::from_lookup(lookup(&[
            ("MINIGIT_AUTHOR_NAME", "Mini"),
            ("MINIGIT_AUTHOR_EMAIL", "mini@example.com"),
            ("GIT_AUTHOR_NAME", "Git"),
            ("GIT_AUTHOR_EMAIL", "git@example.com"),
        ]));
        assert_eq!(id.author(), "Mini <mini@example.com>");
    }

    #[test]
    fn falls_back_to_git_vars() {
        let id = Identity::from_lookup(lookup(&[
            ("MINIGIT_AUTHOR_NAME", "  "),
            ("GIT_AUTHOR_NAME", "Git"),
        ]));
        assert_eq!(
            id,
            Identity {
                name: "Git".to_string(),
                email: "minigit@localhost".to_string()
            }
        );
    }

    #[test]
    fn attribution() {
        let id = Identity::from_lookup(lookup(&[("MINIGIT_AUTHOR_NAME", "A. U. Thor")]));
        let time = Local.timestamp_opt(1_700_000_000, 0).unwrap();

        let (a, date) = id.attribution_at(&time).unwrap();
        assert_eq!(a.author(), "A. U. Thor <minigit@localhost>");
        assert_eq!(a.timestamp(), "1700000000");
        assert_eq!(a.timezone(), time.format("%z").to_string());
        assert_eq!(date, time.format(LOG_DATE_FORMAT).to_string());
        assert!(date.contains("2023"));
    }
}
