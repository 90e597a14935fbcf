//! Shared test fixtures.

use std::fs;
use std::path::{Path, PathBuf};

/// A small iOS app project last checked with Xcode 9.0, in Xcode's own layout.
/// The project-level Debug configuration sets `CLANG_WARN_COMMA = NO` and a
/// 9.0 deployment target; Release blanks out
/// `CLANG_ANALYZER_LOCALIZABILITY_NONLOCALIZED` and targets 13.0.
pub const PROJECT_0900: &str = r#"// !$*UTF8*$!
{
	archiveVersion = 1;
	classes = {
	};
	objectVersion = 48;
	objects = {

/* Begin PBXBuildFile section */
		0A1B2C3D4E5F600000000001 /* AppDelegate.m in Sources */ = {isa = PBXBuildFile; fileRef = 0A1B2C3D4E5F600000000002 /* AppDelegate.m */; };
/* End PBXBuildFile section */

/* Begin PBXFileReference section */
		0A1B2C3D4E5F600000000002 /* AppDelegate.m */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.c.objc; path = AppDelegate.m; sourceTree = "<group>"; };
		0A1B2C3D4E5F600000000003 /* Demo.app */ = {isa = PBXFileReference; explicitFileType = wrapper.application; includeInIndex = 0; path = Demo.app; sourceTree = BUILT_PRODUCTS_DIR; };
/* End PBXFileReference section */

/* Begin PBXGroup section */
		0A1B2C3D4E5F600000000004 = {
			isa = PBXGroup;
			children = (
				0A1B2C3D4E5F600000000002 /* AppDelegate.m */,
				0A1B2C3D4E5F600000000005 /* Products */,
			);
			sourceTree = "<group>";
		};
		0A1B2C3D4E5F600000000005 /* Products */ = {
			isa = PBXGroup;
			children = (
				0A1B2C3D4E5F600000000003 /* Demo.app */,
			);
			name = Products;
			sourceTree = "<group>";
		};
/* End PBXGroup section */

/* Begin PBXNativeTarget section */
		0A1B2C3D4E5F600000000006 /* Demo */ = {
			isa = PBXNativeTarget;
			buildConfigurationList = 0A1B2C3D4E5F60000000000D /* Build configuration list for PBXNativeTarget "Demo" */;
			buildPhases = (
				0A1B2C3D4E5F600000000008 /* Sources */,
			);
			buildRules = (
			);
			dependencies = (
			);
			name = Demo;
			productName = Demo;
			productReference = 0A1B2C3D4E5F600000000003 /* Demo.app */;
			productType = "com.apple.product-type.application";
		};
/* End PBXNativeTarget section */

/* Begin PBXProject section */
		0A1B2C3D4E5F600000000007 /* Project object */ = {
			isa = PBXProject;
			attributes = {
				LastUpgradeCheck = 0900;
				ORGANIZATIONNAME = "Example Org";
			};
			buildConfigurationList = 0A1B2C3D4E5F60000000000C /* Build configuration list for PBXProject "Demo" */;
			compatibilityVersion = "Xcode 8.0";
			developmentRegion = en;
			hasScannedForEncodings = 0;
			knownRegions = (
				en,
				Base,
			);
			mainGroup = 0A1B2C3D4E5F600000000004;
			productRefGroup = 0A1B2C3D4E5F600000000005 /* Products */;
			projectDirPath = "";
			projectRoot = "";
			targets = (
				0A1B2C3D4E5F600000000006 /* Demo */,
			);
		};
/* End PBXProject section */

/* Begin PBXSourcesBuildPhase section */
		0A1B2C3D4E5F600000000008 /* Sources */ = {
			isa = PBXSourcesBuildPhase;
			buildActionMask = 2147483647;
			files = (
				0A1B2C3D4E5F600000000001 /* AppDelegate.m in Sources */,
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
/* End PBXSourcesBuildPhase section */

/* Begin XCBuildConfiguration section */
		0A1B2C3D4E5F600000000009 /* Debug */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				ALWAYS_SEARCH_USER_PATHS = NO;
				CLANG_WARN_COMMA = NO;
				GCC_PREPROCESSOR_DEFINITIONS = (
					"DEBUG=1",
					"$(inherited)",
				);
				IPHONEOS_DEPLOYMENT_TARGET = 9.0;
				SDKROOT = iphoneos;
			};
			name = Debug;
		};
		0A1B2C3D4E5F60000000000A /* Release */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				ALWAYS_SEARCH_USER_PATHS = NO;
				CLANG_ANALYZER_LOCALIZABILITY_NONLOCALIZED = "";
				IPHONEOS_DEPLOYMENT_TARGET = 13.0;
				SDKROOT = iphoneos;
				VALIDATE_PRODUCT = YES;
			};
			name = Release;
		};
		0A1B2C3D4E5F60000000000B /* Debug */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				PRODUCT_NAME = "$(TARGET_NAME)";
			};
			name = Debug;
		};
/* End XCBuildConfiguration section */

/* Begin XCConfigurationList section */
		0A1B2C3D4E5F60000000000C /* Build configuration list for PBXProject "Demo" */ = {
			isa = XCConfigurationList;
			buildConfigurations = (
				0A1B2C3D4E5F600000000009 /* Debug */,
				0A1B2C3D4E5F60000000000A /* Release */,
			);
			defaultConfigurationIsVisible = 0;
			defaultConfigurationName = Release;
		};
		0A1B2C3D4E5F60000000000D /* Build configuration list for PBXNativeTarget "Demo" */ = {
			isa = XCConfigurationList;
			buildConfigurations = (
				0A1B2C3D4E5F60000000000B /* Debug */,
			);
			defaultConfigurationIsVisible = 0;
			defaultConfigurationName = Release;
		};
/* End XCConfigurationList section */
	};
	rootObject = 0A1B2C3D4E5F600000000007 /* Project object */;
}
"#;

/// `PROJECT_0900` with no `LastUpgradeCheck` attribute.
pub fn project_never_checked() -> String {
    PROJECT_0900.replace("\t\t\t\tLastUpgradeCheck = 0900;\n", "")
}

/// Writes `contents` as `<dir>/<name>.xcodeproj/project.pbxproj` and returns the bundle path.
pub fn write_bundle(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let bundle = dir.join(format!("{name}.xcodeproj"));
    fs::create_dir_all(&bundle).expect("create bundle");
    fs::write(bundle.join("project.pbxproj"), contents).expect("write project.pbxproj");
    bundle
}
