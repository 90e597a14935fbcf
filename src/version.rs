//! Version model.
//! Xcode records versions as a (major, minor) pair, written concatenated with
//! two digits each (`LastUpgradeCheck = 1320;` is Xcode 13.2).
//! Users type them either way, so parsing accepts both forms.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A (major, minor) Xcode version. Ordering compares major first, then minor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub const V0820: Version = Version::new(8, 20);
    pub const V0900: Version = Version::new(9, 0);
    pub const V0930: Version = Version::new(9, 30);
    pub const V1000: Version = Version::new(10, 0);
    pub const V1100: Version = Version::new(11, 0);
    pub const V1300: Version = Version::new(13, 0);
    pub const V1400: Version = Version::new(14, 0);

    /// Target used when neither `--xcode` nor `XPROJUP_XCODE` is given.
    pub const DEFAULT_TARGET: Version = Version::V1400;

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid Xcode version '{input}': expected e.g. 1320 or 13.2")]
pub struct VersionParseError {
    input: String,
}

impl VersionParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

fn digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let err = || VersionParseError::new(s);

        if let Some((major, rest)) = input.split_once('.') {
            // "13.2.1": the patch component does not take part in upgrade checks
            let (minor_digits, patch) = match rest.split_once('.') {
                Some((minor, patch)) => (minor, Some(patch)),
                None => (rest, None),
            };
            if !digits(major) || !digits(minor_digits) || minor_digits.len() > 2 {
                return Err(err());
            }
            if patch.is_some_and(|patch| !digits(patch)) {
                return Err(err());
            }
            let major: u32 = major.parse().map_err(|_| err())?;
            let mut minor: u32 = minor_digits.parse().map_err(|_| err())?;
            // Xcode 13.2 is recorded as 1320
            if minor_digits.len() == 1 {
                minor *= 10;
            }
            return Ok(Version::new(major, minor));
        }

        if !digits(input) {
            return Err(err());
        }
        match input.len() {
            1 | 2 => Ok(Version::new(input.parse().map_err(|_| err())?, 0)),
            3 | 4 => {
                let (major, minor) = input.split_at(input.len() - 2);
                Ok(Version::new(
                    major.parse().map_err(|_| err())?,
                    minor.parse().map_err(|_| err())?,
                ))
            }
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.major, self.minor)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_major_then_minor() {
        assert!(Version::new(9, 30) < Version::new(10, 0));
        assert!(Version::new(13, 0) < Version::new(13, 20));
        assert!(Version::new(14, 0) > Version::new(13, 99));
        assert!(Version::new(13, 20) <= Version::new(13, 20));
        assert!(Version::new(13, 20) >= Version::new(13, 20));
        assert_eq!(Version::new(13, 20), Version::new(13, 20));
        assert_ne!(Version::new(13, 2), Version::new(13, 20));
    }

    #[test]
    fn test_parse_concatenated() {
        assert_eq!("1320".parse(), Ok(Version::new(13, 20)));
        assert_eq!("0930".parse(), Ok(Version::V0930));
        assert_eq!("930".parse(), Ok(Version::V0930));
        assert_eq!("14".parse(), Ok(Version::V1400));
        assert_eq!("9".parse(), Ok(Version::V0900));
    }

    #[test]
    fn test_parse_dotted() {
        assert_eq!("13.2".parse(), Ok(Version::new(13, 20)));
        assert_eq!("13.20".parse(), Ok(Version::new(13, 20)));
        assert_eq!("9.3".parse(), Ok(Version::V0930));
        assert_eq!("14.0".parse(), Ok(Version::V1400));
        assert_eq!("14.1.1".parse(), Ok(Version::new(14, 10)));
        assert_eq!(" 8.2 ".parse(), Ok(Version::V0820));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in [
            "", "xcode", "13.", ".2", "13.200", "12345", "1a20", "-1", "13.2.", "13.2.x", "13.2.1.4",
        ] {
            assert!(input.parse::<Version>().is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_display_uses_recorded_form() {
        assert_eq!(Version::new(13, 20).to_string(), "1320");
        assert_eq!(Version::V0820.to_string(), "0820");
        assert_eq!(Version::V1400.to_string(), "1400");
    }
}
