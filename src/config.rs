//! Config module.
//! Resolves the command line (and `XPROJUP_XCODE`) into one immutable
//! `RunConfig`, built once in `main` and passed down by reference.

use crate::report::OutputFormat;
use crate::version::Version;
use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

pub const TARGET_ENV: &str = "XPROJUP_XCODE";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub root: PathBuf,
    pub target: Version,
    pub recursive: bool,
    pub dry_run: bool,
    pub output: OutputFormat,
}

pub fn command() -> Command {
    Command::new("xprojup")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Upgrade Xcode project build settings to a newer Xcode baseline")
        .arg(
            Arg::new("path")
                .value_name("PATH")
                .help("Project (.xcodeproj / .pbxproj) or folder to update")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("xcode")
                .long("xcode")
                .value_name("VERSION")
                .env(TARGET_ENV)
                .help("Target Xcode version, e.g. 14.0 or 1400 (default 1400)")
                .value_parser(|s: &str| s.parse::<Version>()),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Look recursively for project files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dry-run")
                .short('n')
                .long("dry-run")
                .help("Report what would change without writing anything")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .help("Output style")
                .default_value("human")
                .value_parser(["human", "json"]),
        )
}

impl RunConfig {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let root = matches
            .get_one::<PathBuf>("path")
            .cloned()
            .context("missing PATH argument")?;
        let target = matches
            .get_one::<Version>("xcode")
            .copied()
            .unwrap_or(Version::DEFAULT_TARGET);
        let output = match matches.get_one::<String>("format").map(String::as_str) {
            Some("json") => OutputFormat::Json,
            Some("human") | None => OutputFormat::Human,
            Some(other) => bail!("unknown output format '{other}'"),
        };

        Ok(Self {
            root,
            target,
            recursive: matches.get_flag("recursive"),
            dry_run: matches.get_flag("dry-run"),
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<RunConfig> {
        let matches = command().try_get_matches_from(args)?;
        RunConfig::from_matches(&matches)
    }

    #[test]
    fn test_command_is_well_formed() {
        command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        // an inherited XPROJUP_XCODE would change the target
        if std::env::var_os(TARGET_ENV).is_some() {
            return;
        }
        let config = parse(&["xprojup", "Projects"]).unwrap();
        assert_eq!(
            config,
            RunConfig {
                root: PathBuf::from("Projects"),
                target: Version::DEFAULT_TARGET,
                recursive: false,
                dry_run: false,
                output: OutputFormat::Human,
            }
        );
    }

    #[test]
    fn test_all_options() {
        let config = parse(&[
            "xprojup",
            "--xcode",
            "13.2",
            "-r",
            "--dry-run",
            "--format",
            "json",
            "App.xcodeproj",
        ])
        .unwrap();
        assert_eq!(config.target, Version::new(13, 20));
        assert!(config.recursive);
        assert!(config.dry_run);
        assert_eq!(config.output, OutputFormat::Json);

        let config = parse(&["xprojup", "--xcode", "1320", "App.xcodeproj"]).unwrap();
        assert_eq!(config.target, Version::new(13, 20));
    }

    #[test]
    fn test_invalid_version_is_rejected() {
        assert!(parse(&["xprojup", "--xcode", "latest", "App.xcodeproj"]).is_err());
        assert!(parse(&["xprojup", "--format", "yaml", "App.xcodeproj"]).is_err());
        assert!(parse(&["xprojup"]).is_err());
    }
}
