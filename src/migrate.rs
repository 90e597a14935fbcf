//! Project migrator.
//! Classifies a project against the target version and, when it is behind,
//! applies the rule delta and deployment floor to every project-level
//! configuration before handing the project back to the store.

use crate::deployment::{normalize_deployment_target, DEPLOYMENT_TARGET_KEY};
use crate::merge::apply_delta;
use crate::project::{Project, ProjectStore, StoreError};
use crate::report::{Event, EventSink};
use crate::rules::delta_for;
use crate::version::Version;
use std::path::Path;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    UpToDate,
    NeedsMigration { origin: Version },
}

/// A project that was never upgrade-checked counts as up to date, so files
/// that never opted in are not rewritten.
pub fn classify(recorded: Option<Version>, target: Version) -> State {
    match recorded {
        Some(origin) if origin < target => State::NeedsMigration { origin },
        _ => State::UpToDate,
    }
}

/// What happened to one project file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    UpToDate,
    Migrated { from: Version, to: Version },
    /// Migration computed but not written.
    DryRun { from: Version, to: Version },
}

/// Migrates `project` in memory. Returns the origin version when anything was
/// done, `None` when the project was already up to date.
pub fn migrate_project(project: &mut Project, target: Version, sink: &mut dyn EventSink) -> Option<Version> {
    let State::NeedsMigration { origin } = classify(project.recorded_version, target) else {
        return None;
    };

    sink.emit(Event::VersionBumped {
        from: origin,
        to: target,
    });
    project.recorded_version = Some(target);

    let delta = delta_for(origin, target);
    debug!(%origin, %target, settings = delta.len(), "computed delta");

    for configuration in &mut project.configurations {
        sink.emit(Event::Configuration {
            name: configuration.name.clone(),
        });
        for (key, value) in apply_delta(configuration, &delta) {
            sink.emit(Event::SettingAdded {
                configuration: configuration.name.clone(),
                key,
                value,
            });
        }
        if let Some(raise) = normalize_deployment_target(configuration, target) {
            sink.emit(Event::SettingChanged {
                configuration: configuration.name.clone(),
                key: DEPLOYMENT_TARGET_KEY.to_string(),
                from: raise.from,
                to: raise.to,
            });
        }
    }
    Some(origin)
}

/// Runs one file through load, migrate and persist.
pub struct Migrator<'a> {
    store: &'a dyn ProjectStore,
    target: Version,
    dry_run: bool,
}

impl<'a> Migrator<'a> {
    pub fn new(store: &'a dyn ProjectStore, target: Version) -> Self {
        Self {
            store,
            target,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Errors are scoped to this file; the caller reports them and moves on.
    /// A failed persist drops the migrated project, leaving the file as it was.
    pub fn migrate_file(&self, path: &Path, sink: &mut dyn EventSink) -> Result<Outcome, StoreError> {
        sink.emit(Event::Reading {
            path: path.to_path_buf(),
        });
        let mut project = self.store.load(path)?;

        let Some(from) = migrate_project(&mut project, self.target, sink) else {
            sink.emit(Event::UpToDate {
                path: path.to_path_buf(),
                recorded: project.recorded_version,
                target: self.target,
            });
            return Ok(Outcome::UpToDate);
        };
        let to = self.target;

        if self.dry_run {
            sink.emit(Event::Migrated {
                path: path.to_path_buf(),
                from,
                to,
                dry_run: true,
            });
            return Ok(Outcome::DryRun { from, to });
        }

        sink.emit(Event::Writing {
            path: path.to_path_buf(),
        });
        self.store.persist(&project, path)?;
        sink.emit(Event::Migrated {
            path: path.to_path_buf(),
            from,
            to,
            dry_run: false,
        });
        Ok(Outcome::Migrated { from, to })
    }
}
