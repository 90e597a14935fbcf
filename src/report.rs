//! Reporting module.
//! The engine describes what it does as a stream of `Event`s; reporters turn
//! them into console lines or JSON objects. Nothing in the engine prints.

use crate::version::Version;
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// A project file is about to be loaded.
    Reading { path: PathBuf },
    /// Nothing to do: no recorded version, or already at or past the target.
    UpToDate {
        path: PathBuf,
        recorded: Option<Version>,
        target: Version,
    },
    VersionBumped { from: Version, to: Version },
    /// Subsequent setting events belong to this configuration.
    Configuration { name: String },
    SettingAdded {
        configuration: String,
        key: String,
        value: String,
    },
    SettingChanged {
        configuration: String,
        key: String,
        from: String,
        to: String,
    },
    Writing { path: PathBuf },
    Migrated {
        path: PathBuf,
        from: Version,
        to: Version,
        dry_run: bool,
    },
    Failed { path: PathBuf, error: String },
}

pub trait EventSink {
    fn emit(&mut self, event: Event);
}

/// Collects events, mostly for tests.
impl EventSink for Vec<Event> {
    fn emit(&mut self, event: Event) {
        self.push(event);
    }
}

/// Output style selected with `--format`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// One line per event, failures on stderr.
#[derive(Debug, Default)]
pub struct HumanReporter;

impl HumanReporter {
    fn render(event: &Event) -> String {
        match event {
            Event::Reading { path } => format!("📖 Reading {}", path.display()),
            Event::UpToDate {
                path,
                recorded: Some(recorded),
                target,
            } => format!("✅ {} is up to date ({recorded}, target {target})", path.display()),
            Event::UpToDate { path, recorded: None, .. } => {
                format!("✅ {} has no LastUpgradeCheck, left as is", path.display())
            }
            Event::VersionBumped { from, to } => format!("⬆ lastUpgradeCheck: {from} → {to}"),
            Event::Configuration { name } => format!("⚙️ {name}"),
            Event::SettingAdded { key, value, .. } => format!("＋ ⚠️ {key} = {value}"),
            Event::SettingChanged { key, from, to, .. } => format!("⬆ 📱 {key} {from} → {to}"),
            Event::Writing { path } => format!("💾 Writing {}", path.display()),
            Event::Migrated {
                path, dry_run: true, ..
            } => format!("🔍 Dry run, {} left unchanged", path.display()),
            Event::Migrated { path, from, to, .. } => {
                format!("✨ Migrated {} from {from} to {to}", path.display())
            }
            Event::Failed { path, error } => format!("❌ {}: {error}", path.display()),
        }
    }
}

impl EventSink for HumanReporter {
    fn emit(&mut self, event: Event) {
        let line = Self::render(&event);
        match event {
            Event::Failed { .. } => eprintln!("{line}"),
            _ => println!("{line}"),
        }
    }
}

/// One JSON object per line on stdout.
#[derive(Debug, Default)]
pub struct JsonReporter;

impl EventSink for JsonReporter {
    fn emit(&mut self, event: Event) {
        match serde_json::to_string(&event) {
            Ok(line) => println!("{line}"),
            Err(err) => warn!(?event, "failed to serialize event: {err}"),
        }
    }
}

pub fn reporter(format: OutputFormat) -> Box<dyn EventSink> {
    match format {
        OutputFormat::Human => Box::new(HumanReporter),
        OutputFormat::Json => Box::new(JsonReporter),
    }
}
