//! Rule table module.
//! Each Xcode release that changed the recommended project settings gets one
//! rule: crossing its threshold introduces those settings.
//! Rules never share a key, so the delta does not depend on application order.

use crate::version::Version;
use std::collections::BTreeMap;

/// Settings introduced when a migration crosses `threshold`.
#[derive(Debug)]
pub struct UpgradeRule {
    pub threshold: Version,
    pub settings: &'static [(&'static str, &'static str)],
}

impl UpgradeRule {
    /// A rule fires for `origin -> target` iff `origin < threshold <= target`.
    pub fn fires(&self, origin: Version, target: Version) -> bool {
        origin < self.threshold && self.threshold <= target
    }
}

/// Setting additions for one migration, keyed by build setting name.
pub type Delta = BTreeMap<&'static str, &'static str>;

/// Ascending by threshold.
pub static RULES: &[UpgradeRule] = &[
    UpgradeRule {
        threshold: Version::V0820,
        settings: &[
            ("CLANG_WARN_BOOL_CONVERSION", "YES"),
            ("CLANG_WARN_CONSTANT_CONVERSION", "YES"),
            ("CLANG_WARN_EMPTY_BODY", "YES"),
            ("CLANG_WARN_ENUM_CONVERSION", "YES"),
            ("CLANG_WARN_INFINITE_RECURSION", "YES"),
            ("CLANG_WARN_INT_CONVERSION", "YES"),
            ("CLANG_WARN_SUSPICIOUS_MOVE", "YES"),
            ("CLANG_WARN_UNREACHABLE_CODE", "YES"),
            ("CLANG_WARN__DUPLICATE_METHOD_MATCH", "YES"),
            ("ENABLE_STRICT_OBJC_MSGSEND", "YES"),
            ("ENABLE_TESTABILITY", "YES"),
            ("GCC_NO_COMMON_BLOCKS", "YES"),
            ("GCC_WARN_64_TO_32_BIT_CONVERSION", "YES"),
            ("GCC_WARN_UNDECLARED_SELECTOR", "YES"),
            ("GCC_WARN_UNINITIALIZED_AUTOS", "YES"),
            ("GCC_WARN_UNUSED_FUNCTION", "YES"),
        ],
    },
    UpgradeRule {
        threshold: Version::V0900,
        settings: &[
            ("CLANG_WARN_BLOCK_CAPTURE_AUTORELEASING", "YES"),
            ("CLANG_WARN_COMMA", "YES"),
            ("CLANG_WARN_NON_LITERAL_NULL_CONVERSION", "YES"),
            ("CLANG_WARN_OBJC_LITERAL_CONVERSION", "YES"),
            ("CLANG_WARN_RANGE_LOOP_ANALYSIS", "YES"),
            ("CLANG_WARN_STRICT_PROTOTYPES", "YES"),
        ],
    },
    UpgradeRule {
        threshold: Version::V0930,
        settings: &[
            ("CLANG_WARN_DEPRECATED_OBJC_IMPLEMENTATIONS", "YES"),
            ("CLANG_WARN_OBJC_IMPLICIT_RETAIN_SELF", "YES"),
        ],
    },
    UpgradeRule {
        threshold: Version::V1000,
        settings: &[("CLANG_ANALYZER_LOCALIZABILITY_NONLOCALIZED", "YES")],
    },
    UpgradeRule {
        threshold: Version::V1300,
        settings: &[("CLANG_WARN_QUOTED_INCLUDE_IN_FRAMEWORK_HEADER", "YES")],
    },
    UpgradeRule {
        threshold: Version::V1400,
        settings: &[("DEAD_CODE_STRIPPING", "YES")],
    },
];

/// Union of the settings of every rule with a threshold in `(origin, target]`.
pub fn delta_for(origin: Version, target: Version) -> Delta {
    delta_from(RULES, origin, target)
}

fn delta_from(rules: &[UpgradeRule], origin: Version, target: Version) -> Delta {
    rules
        .iter()
        .filter(|rule| rule.fires(origin, target))
        .flat_map(|rule| rule.settings.iter().copied())
        .collect()
}
