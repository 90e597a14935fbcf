//! Tree walker.
//! Finds `.xcodeproj` bundles and `.pbxproj` files under a root and runs each
//! through the migrator. A failing file is reported and the walk goes on; only
//! a missing root stops the run.

use crate::migrate::{Migrator, Outcome};
use crate::report::{Event, EventSink};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const PROJECT_EXTENSIONS: &[&str] = &["xcodeproj", "pbxproj"];

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("cannot access {}: {source}", path.display())]
    Inaccessible { path: PathBuf, source: io::Error },
}

/// Per-run counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WalkSummary {
    pub visited: usize,
    pub migrated: usize,
    pub up_to_date: usize,
    pub failed: usize,
}

pub fn is_project_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PROJECT_EXTENSIONS.contains(&ext))
}

pub struct TreeWalker<'a> {
    migrator: &'a Migrator<'a>,
    recursive: bool,
}

impl<'a> TreeWalker<'a> {
    pub fn new(migrator: &'a Migrator<'a>, recursive: bool) -> Self {
        Self { migrator, recursive }
    }

    pub fn walk(&self, root: &Path, sink: &mut dyn EventSink) -> Result<WalkSummary, WalkError> {
        let metadata = fs::metadata(root).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => WalkError::PathNotFound(root.to_path_buf()),
            _ => WalkError::Inaccessible {
                path: root.to_path_buf(),
                source,
            },
        })?;

        let mut summary = WalkSummary::default();
        if is_project_file(root) {
            self.visit_project(root, sink, &mut summary);
        } else if metadata.is_dir() {
            self.visit_dir(root, sink, &mut summary);
        } else {
            debug!(path = %root.display(), "root is not a project file or directory");
        }
        Ok(summary)
    }

    fn visit_project(&self, path: &Path, sink: &mut dyn EventSink, summary: &mut WalkSummary) {
        summary.visited += 1;
        match self.migrator.migrate_file(path, sink) {
            Ok(Outcome::UpToDate) => summary.up_to_date += 1,
            Ok(Outcome::Migrated { .. } | Outcome::DryRun { .. }) => summary.migrated += 1,
            Err(err) => {
                summary.failed += 1;
                sink.emit(Event::Failed {
                    path: path.to_path_buf(),
                    error: err.to_string(),
                });
            }
        }
    }

    fn visit_dir(&self, dir: &Path, sink: &mut dyn EventSink, summary: &mut WalkSummary) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                summary.failed += 1;
                sink.emit(Event::Failed {
                    path: dir.to_path_buf(),
                    error: format!("cannot list directory: {err}"),
                });
                return;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    summary.failed += 1;
                    sink.emit(Event::Failed {
                        path: dir.to_path_buf(),
                        error: format!("cannot list directory: {err}"),
                    });
                    continue;
                }
            };
            let path = entry.path();
            if is_project_file(&path) {
                self.visit_project(&path, sink, summary);
            } else if self.recursive && entry.file_type().is_ok_and(|kind| kind.is_dir()) {
                self.visit_dir(&path, sink, summary);
            }
        }
    }
}
