// SYNOID Catalog - Playlist Registry
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Ordered subject -> playlist bindings. Read-only for the whole run.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Curated subjects shipped with the binary, in display order.
const DEFAULT_PLAYLISTS: &[(&str, &str)] = &[
    ("Databases", "https://www.youtube.com/playlist?list=PLxCzCOWd7aiFAN6I8CuViBuCdJgiOkT2Y"),
    ("Computer Networks", "https://www.youtube.com/playlist?list=PLxCzCOWd7aiGFBD2-2joCpWOLUrDLvVV_"),
    ("Algorithms", "https://www.youtube.com/playlist?list=PLxCzCOWd7aiHcmS4i14bI0VrMbZTUvlTa"),
    ("Theory of Computation", "https://www.youtube.com/playlist?list=PLxCzCOWd7aiFM9Lj5G9G_76adtyb4ef7i"),
    ("Digital Logic", "https://www.youtube.com/playlist?list=PLxCzCOWd7aiGmXg4NoX6R31AsC5LeCPHe"),
    ("Operating Systems", "https://www.youtube.com/playlist?list=PLxCzCOWd7aiGz9donHRrE9I3Mwn6XdP8p"),
    ("Compiler Design", "https://www.youtube.com/playlist?list=PLxCzCOWd7aiEKtKSIHYusizkESC42diyc"),
    ("Computer Organization and Architecture", "https://www.youtube.com/playlist?list=PLxCzCOWd7aiHMonh3G6QNKq53C6oNXGrX"),
    ("Discrete Mathematics", "https://www.youtube.com/playlist?list=PLxCzCOWd7aiH2wwES9vPWsEL6ipTaUSl3"),
];

/// Maximum number of initials kept in a subject prefix.
const PREFIX_LEN: usize = 2;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read registry file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse registry file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("registry contains no subjects")]
    Empty,
    #[error("subject '{0}' is declared more than once")]
    DuplicateSubject(String),
    #[error("subject '{subject}' has an invalid playlist locator '{locator}': {reason}")]
    InvalidLocator {
        subject: String,
        locator: String,
        reason: String,
    },
}

/// One curated topic category bound to a single playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(rename = "subject")]
    pub name: String,
    #[serde(rename = "playlist")]
    pub locator: String,
}

impl Subject {
    pub fn new(name: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locator: locator.into(),
        }
    }

    /// Prefix used to namespace this subject's record ids.
    pub fn prefix(&self) -> String {
        subject_prefix(&self.name)
    }
}

/// Lowercased initials of the purely alphabetic words in `name`, capped at two characters.
///
/// `"Theory of Computation"` -> `"to"`, `"Databases"` -> `"d"`. Words containing any
/// non-alphabetic character (`"C++"`, `"2D"`) contribute nothing.
pub fn subject_prefix(name: &str) -> String {
    name.split_whitespace()
        .filter(|word| word.chars().all(char::is_alphabetic))
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_lowercase)
        .take(PREFIX_LEN)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRegistry {
    subjects: Vec<Subject>,
}

impl Default for PlaylistRegistry {
    fn default() -> Self {
        Self {
            subjects: DEFAULT_PLAYLISTS
                .iter()
                .map(|(name, locator)| Subject::new(*name, *locator))
                .collect(),
        }
    }
}

impl PlaylistRegistry {
    /// Build a registry from an ordered list, rejecting empty lists,
    /// duplicate names, and locators that are not http(s) URLs.
    pub fn new(subjects: Vec<Subject>) -> Result<Self, RegistryError> {
        if subjects.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for subject in &subjects {
            if !seen.insert(subject.name.as_str()) {
                return Err(RegistryError::DuplicateSubject(subject.name.clone()));
            }
            validate_locator(subject)?;
        }

        let registry = Self { subjects };
        registry.warn_on_prefix_collisions();
        Ok(registry)
    }

    /// Load a registry from a JSON array of `{ "subject": ..., "playlist": ... }` objects.
    pub fn from_json_file(path: &Path) -> Result<Self, RegistryError> {
        let raw = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let subjects: Vec<Subject> = serde_json::from_str(&raw)?;
        info!(
            "[REGISTRY] Loaded {} subjects from {}",
            subjects.len(),
            path.display()
        );
        Self::new(subjects)
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    fn warn_on_prefix_collisions(&self) {
        let mut owners: HashMap<String, &str> = HashMap::new();
        for subject in &self.subjects {
            let prefix = subject.prefix();
            if let Some(previous) = owners.get(&prefix) {
                warn!(
                    "[REGISTRY] Subjects '{}' and '{}' share id prefix '{}'; their ids will overlap",
                    previous, subject.name, prefix
                );
            } else {
                owners.insert(prefix, subject.name.as_str());
            }
        }
    }
}

fn validate_locator(subject: &Subject) -> Result<(), RegistryError> {
    let invalid = |reason: String| RegistryError::InvalidLocator {
        subject: subject.name.clone(),
        locator: subject.locator.clone(),
        reason,
    };

    let parsed = url::Url::parse(&subject.locator).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_prefix() {
        assert_eq!(subject_prefix("Databases"), "d");
        assert_eq!(subject_prefix("Computer Networks"), "cn");
        assert_eq!(subject_prefix("Theory of Computation"), "to");
        assert_eq!(subject_prefix("Computer Organization and Architecture"), "co");
        assert_eq!(subject_prefix("C++ Programming"), "p");
        assert_eq!(subject_prefix("2024"), "");
        assert_eq!(subject_prefix(""), "");
    }

    #[test]
    fn test_default_registry_order() {
        let registry = PlaylistRegistry::default();
        let names: Vec<&str> = registry.subjects().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.len(), 9);
        assert_eq!(names[0], "Databases");
        assert_eq!(names[2], "Algorithms");
        assert_eq!(names[8], "Discrete Mathematics");
    }

    #[test]
    fn test_default_registry_is_valid() {
        let defaults = PlaylistRegistry::default().subjects().to_vec();
        assert!(PlaylistRegistry::new(defaults).is_ok());
    }

    #[test]
    fn test_rejects_duplicates() {
        let res = PlaylistRegistry::new(vec![
            Subject::new("Algorithms", "https://example.com/a"),
            Subject::new("Algorithms", "https://example.com/b"),
        ]);
        assert!(matches!(res, Err(RegistryError::DuplicateSubject(name)) if name == "Algorithms"));
    }

    #[test]
    fn test_rejects_empty_and_bad_locator() {
        assert!(matches!(PlaylistRegistry::new(vec![]), Err(RegistryError::Empty)));

        let res = PlaylistRegistry::new(vec![Subject::new("Algorithms", "not a url")]);
        assert!(matches!(res, Err(RegistryError::InvalidLocator { .. })));

        let res = PlaylistRegistry::new(vec![Subject::new("Algorithms", "ftp://example.com/list")]);
        assert!(matches!(res, Err(RegistryError::InvalidLocator { .. })));
    }

    #[test]
    fn test_from_json_file_preserves_order() {
        let path = std::env::temp_dir().join("synoid_catalog_registry_test.json");
        std::fs::write(
            &path,
            r#"[
                {"subject": "Zeta Topics", "playlist": "https://example.com/z"},
                {"subject": "Alpha Topics", "playlist": "https://example.com/a"}
            ]"#,
        )
        .unwrap();

        let registry = PlaylistRegistry::from_json_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(registry.subjects().len(), 2);
        assert_eq!(registry.subjects()[0].name, "Zeta Topics");
        assert_eq!(registry.subjects()[1].prefix(), "at");
    }
}
