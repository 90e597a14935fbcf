//! Deployment-target normalizer.
//! Each Xcode release drops support for old iOS versions. A deployment target
//! below the floor of the target Xcode is not buildable, so it is raised: the
//! one place migration overwrites an existing value.

use crate::project::Configuration;
use crate::version::Version;
use tracing::debug;

pub const DEPLOYMENT_TARGET_KEY: &str = "IPHONEOS_DEPLOYMENT_TARGET";

/// (minimum target Xcode, floor), descending. Floors never decrease as the
/// target version grows.
const FLOORS: &[(Version, &str)] = &[(Version::V1300, "12.0"), (Version::V1100, "10.0")];

const BASE_FLOOR: &str = "10.0";

/// The change made to a configuration's deployment target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raise {
    pub from: String,
    pub to: String,
}

/// Lowest deployment target supported when targeting `target`.
pub fn floor_for(target: Version) -> &'static str {
    FLOORS
        .iter()
        .find(|(min, _)| target >= *min)
        .map_or(BASE_FLOOR, |&(_, floor)| floor)
}

/// Raises the configuration's deployment target to the floor for `target`.
/// Absent or non-numeric values are left alone.
pub fn normalize_deployment_target(configuration: &mut Configuration, target: Version) -> Option<Raise> {
    let current = configuration.get_str(DEPLOYMENT_TARGET_KEY)?;
    let Some(numeric) = current.trim().parse::<f64>().ok().filter(|n| n.is_finite()) else {
        debug!(
            configuration = %configuration.name,
            value = current,
            "skipping non-numeric deployment target"
        );
        return None;
    };

    let floor = floor_for(target);
    let floor_numeric: f64 = floor.parse().ok()?;
    if numeric >= floor_numeric {
        return None;
    }

    let raise = Raise {
        from: current.to_string(),
        to: floor.to_string(),
    };
    configuration.set(DEPLOYMENT_TARGET_KEY, floor);
    Some(raise)
}
