//! Configuration merge policy.
//! Migration only fills gaps: a setting the user already has, whatever its
//! value (even empty), is left exactly as it is.

use crate::project::Configuration;
use crate::rules::Delta;

/// Adds every delta entry whose key is absent from `configuration`.
/// Returns the entries actually added, in delta order.
pub fn apply_delta(configuration: &mut Configuration, delta: &Delta) -> Vec<(String, String)> {
    let mut added = Vec::new();
    for (&key, &value) in delta {
        if configuration.contains_key(key) {
            continue;
        }
        configuration.set(key, value);
        added.push((key.to_string(), value.to_string()));
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pbxproj::Value;
    use crate::rules::delta_for;
    use crate::version::Version;

    #[test]
    fn test_absent_keys_are_added() {
        let mut config = Configuration::new("ID", "Debug");
        let delta = delta_for(Version::V1300, Version::V1400);

        let added = apply_delta(&mut config, &delta);
        assert_eq!(added, vec![("DEAD_CODE_STRIPPING".to_string(), "YES".to_string())]);
        assert_eq!(config.get_str("DEAD_CODE_STRIPPING"), Some("YES"));
    }

    #[test]
    fn test_existing_values_are_never_touched() {
        let mut config = Configuration::new("ID", "Release")
            .with_setting("CLANG_WARN_COMMA", "NO")
            .with_setting("CLANG_WARN_STRICT_PROTOTYPES", "");
        config.settings.insert(
            "CLANG_WARN_RANGE_LOOP_ANALYSIS",
            Value::Array(vec![Value::from("YES")]),
        );
        let before = config.clone();
        let delta = delta_for(Version::V0820, Version::V0900);

        let added = apply_delta(&mut config, &delta);

        for (key, value) in before.settings.iter() {
            assert_eq!(config.settings.get(key), Some(value), "{key} changed");
        }
        assert_eq!(added.len(), delta.len() - 3);
        assert!(added.iter().all(|(key, _)| !before.contains_key(key)));
    }

    #[test]
    fn test_second_application_adds_nothing() {
        let mut config = Configuration::new("ID", "Debug");
        let delta = delta_for(Version::new(0, 0), Version::V1400);

        assert_eq!(apply_delta(&mut config, &delta).len(), delta.len());
        let after_first = config.clone();
        assert!(apply_delta(&mut config, &delta).is_empty());
        assert_eq!(config, after_first);
    }

    #[test]
    fn test_empty_delta_is_a_no_op() {
        let mut config = Configuration::new("ID", "Debug").with_setting("SDKROOT", "iphoneos");
        assert!(apply_delta(&mut config, &Delta::new()).is_empty());
        assert_eq!(config.settings.iter().count(), 1);
    }
}
