//! Project model.
//! The migration engine works on this view of a project file: the recorded
//! `LastUpgradeCheck` and the project-level build configurations.
//! Reading and writing the file itself goes through a `ProjectStore`.

use crate::pbxproj::{Dict, Document, ParseError, Value};
use crate::version::Version;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Build settings of one configuration, in file order.
pub type Settings = Dict;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    /// Object identifier inside the project file.
    pub id: String,
    /// "Debug", "Release", ... Only used for reporting.
    pub name: String,
    pub settings: Settings,
}

impl Configuration {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            settings: Settings::new(),
        }
    }

    #[cfg(test)]
    pub fn with_setting(mut self, key: &str, value: &str) -> Self {
        self.settings.insert(key, Value::from(value));
        self
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.settings.contains_key(key)
    }

    /// The setting's value when it is a plain string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.settings.get(key).and_then(Value::as_str)
    }

    /// Overwrites an existing setting in place; a new one goes where Xcode
    /// would sort it.
    pub fn set(&mut self, key: &str, value: &str) {
        self.settings.insert_sorted(key, Value::from(value));
    }
}

#[derive(Clone, Debug, Default)]
pub struct Project {
    /// `None` when the project was never upgrade-checked.
    pub recorded_version: Option<Version>,
    pub configurations: Vec<Configuration>,
    /// Source document, kept so persisting only touches what changed.
    pub(crate) document: Document,
}

impl Project {
    #[cfg(test)]
    pub fn new(recorded_version: Option<Version>, configurations: Vec<Configuration>) -> Self {
        Self {
            recorded_version,
            configurations,
            document: Document::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse {}: {source}", path.display())]
    Parse { path: PathBuf, source: ParseError },

    #[error("{} is not an Xcode project: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Loads and persists projects.
///
/// `persist` must replace the file atomically: if it fails, the previous
/// content stays on disk untouched.
pub trait ProjectStore {
    fn load(&self, path: &Path) -> Result<Project, StoreError>;
    fn persist(&self, project: &Project, path: &Path) -> Result<(), StoreError>;
}
