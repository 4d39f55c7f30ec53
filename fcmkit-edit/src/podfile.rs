//! Line-oriented patches for the CocoaPods `Podfile`.
//!
//! The Podfile is Ruby, so it is edited as text. Both patches are idempotent
//! through substring checks: any `post_install` mention suppresses the block,
//! and a pod already pinned to the target version is left alone.

use crate::error::{EditError, EditResult};
use crate::ports::{ProjectIo, abs_path};
use fcmkit_types::vars::{IOS_FIREBASE_SDK_VERSION, IOS_STRIP_DEBUG};
use fcmkit_types::{IosPlatform, PLUGIN_NAME, PatchKind, PatchOutcome, PluginVars};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::{debug, info, warn};

pub const POST_INSTALL_MARKER: &str = "post_install";

static VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\d+\.\d+\.\d+[^'"]*"#).expect("version regex"));

static FIREBASE_POD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"pod 'Firebase([^']+)', '(\d+\.\d+\.\d+[^'"]*)'"#).expect("firebase pod regex")
});

static DEPLOYMENT_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"platform :ios, '(\d+\.\d+\.?\d*)'").expect("deployment target regex")
});

/// `dwarf` strips debug symbols from pods; `dwarf-with-dsym` keeps them.
pub fn debug_information_format(vars: &PluginVars) -> &'static str {
    if vars.is_true(IOS_STRIP_DEBUG) {
        "dwarf"
    } else {
        "dwarf-with-dsym"
    }
}

/// The `platform :ios, 'X.Y'` deployment target declared by the Podfile.
pub fn deployment_target(podfile: &str) -> Option<&str> {
    DEPLOYMENT_TARGET
        .captures(podfile)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// The Ruby block appended to the Podfile.
pub fn post_install_block(vars: &PluginVars, deployment_target: Option<&str>) -> String {
    let mut block = String::from(
        "\npost_install do |installer|\n    installer.pods_project.targets.each do |target|\n        target.build_configurations.each do |config|\n",
    );
    block.push_str(&format!(
        "            config.build_settings['DEBUG_INFORMATION_FORMAT'] = '{}'\n",
        debug_information_format(vars)
    ));
    if let Some(target) = deployment_target {
        block.push_str(&format!(
            "            config.build_settings['IPHONEOS_DEPLOYMENT_TARGET'] = '{target}'\n"
        ));
    }
    block.push_str(
        "            if target.respond_to?(:product_type) and target.product_type == \"com.apple.product-type.bundle\"\n                config.build_settings['CODE_SIGNING_ALLOWED'] = 'NO'\n            end\n        end\n    end\nend\n",
    );
    block
}

/// Podfile text with the post-install block appended, or `None` if the file
/// already mentions `post_install` anywhere.
pub fn with_post_install(podfile: &str, vars: &PluginVars) -> Option<String> {
    if podfile.contains(POST_INSTALL_MARKER) {
        return None;
    }
    let mut out = podfile.to_string();
    out.push_str(&post_install_block(vars, deployment_target(podfile)));
    Some(out)
}

/// Reject SDK versions that do not look like `X.Y.Z[suffix]`.
pub fn validate_sdk_version(version: &str) -> EditResult<()> {
    if VERSION.is_match(version) {
        Ok(())
    } else {
        Err(EditError::InvalidConfiguration {
            variable: IOS_FIREBASE_SDK_VERSION.to_string(),
            value: version.to_string(),
        })
    }
}

/// Podfile text with every `pod 'Firebase…', '<version>'` pinned to
/// `version`, or `None` if every such pod is already pinned to it.
pub fn with_firebase_version(podfile: &str, version: &str) -> Option<String> {
    let mut modified = false;
    let out = FIREBASE_POD.replace_all(podfile, |caps: &Captures<'_>| {
        let line = &caps[0];
        let pinned = &caps[2];
        if pinned == version {
            return line.to_string();
        }
        modified = true;
        debug!(pod = &caps[1], from = pinned, to = version, "pinning firebase pod");
        // The pinned version is the last thing before the closing quote.
        let head = &line[..line.len() - pinned.len() - 1];
        format!("{head}{version}'")
    });
    modified.then(|| out.into_owned())
}

/// Append the post-install block to the Podfile unless one is present.
pub fn apply_pods_post_install(
    vars: &PluginVars,
    platform: &IosPlatform,
    io: &dyn ProjectIo,
) -> EditResult<PatchOutcome> {
    let path = &platform.podfile;
    if !io.exists(path) {
        let msg = format!("Podfile not found at {}", abs_path(io.root(), path));
        warn!("{PLUGIN_NAME}: {msg}");
        return Ok(PatchOutcome::skipped(PatchKind::PodsPostInstall, msg));
    }

    let podfile = io.read_to_string(path)?;
    let mut outcome = PatchOutcome::new(PatchKind::PodsPostInstall);
    match with_post_install(&podfile, vars) {
        Some(out) => {
            io.write_file(path, out.as_bytes())?;
            outcome.modified = true;
            outcome.record_write(path.as_path());
            info!("{PLUGIN_NAME}: Applied post install block to Podfile");
        }
        None => debug!(%path, "Podfile already has a post_install block"),
    }
    Ok(outcome)
}

/// Pin Firebase pods to `IOS_FIREBASE_SDK_VERSION` when it is set.
pub fn apply_plugin_vars_to_podfile(
    vars: &PluginVars,
    platform: &IosPlatform,
    io: &dyn ProjectIo,
) -> EditResult<PatchOutcome> {
    let path = &platform.podfile;
    if !io.exists(path) {
        let msg = format!("Podfile not found at {}", abs_path(io.root(), path));
        warn!("{PLUGIN_NAME}: {msg}");
        return Ok(PatchOutcome::skipped(PatchKind::PodfileSdkVersion, msg));
    }

    let podfile = io.read_to_string(path)?;
    let mut outcome = PatchOutcome::new(PatchKind::PodfileSdkVersion);

    let Some(version) = vars.get(IOS_FIREBASE_SDK_VERSION).filter(|v| !v.is_empty()) else {
        debug!("{IOS_FIREBASE_SDK_VERSION} not set, leaving pod versions alone");
        return Ok(outcome);
    };
    validate_sdk_version(version)?;

    if let Some(out) = with_firebase_version(&podfile, version) {
        io.write_file(path, out.as_bytes())?;
        outcome.modified = true;
        outcome.record_write(path.as_path());
        info!("{PLUGIN_NAME}: Firebase iOS SDK version set to v{version} in Podfile");
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PODFILE: &str = "source 'https://cdn.cocoapods.org/'
platform :ios, '11.0'
use_frameworks!
target 'HelloCordova' do
\tproject 'HelloCordova.xcodeproj'
\tpod 'Firebase/Core', '10.24.0'
\tpod 'Firebase/Messaging', '10.24.0'
\tpod 'GoogleUtilities', '7.13.0'
end
";

    fn vars(pairs: &[(&str, &str)]) -> PluginVars {
        pairs.iter().copied().collect()
    }

    #[test]
    fn block_uses_dwarf_only_when_stripping() {
        let strip = post_install_block(&vars(&[(IOS_STRIP_DEBUG, "true")]), None);
        assert!(strip.contains("= 'dwarf'\n"));
        let keep = post_install_block(&vars(&[(IOS_STRIP_DEBUG, "TRUE")]), None);
        assert!(keep.contains("= 'dwarf-with-dsym'\n"));
        assert!(!keep.contains("IPHONEOS_DEPLOYMENT_TARGET"));
    }

    #[test]
    fn deployment_target_accepts_two_or_three_parts() {
        assert_eq!(deployment_target(PODFILE), Some("11.0"));
        assert_eq!(deployment_target("platform :ios, '13.4.1'"), Some("13.4.1"));
        assert_eq!(deployment_target("platform :osx, '10.15'"), None);
    }

    #[test]
    fn block_is_appended_once() {
        let once = with_post_install(PODFILE, &PluginVars::new()).expect("appended");
        assert!(once.starts_with(PODFILE));
        assert!(once.contains("config.build_settings['IPHONEOS_DEPLOYMENT_TARGET'] = '11.0'\n"));
        assert!(once.ends_with("    end\nend\n"));
        assert_eq!(once.matches("post_install do |installer|").count(), 1);
        assert_eq!(with_post_install(&once, &PluginVars::new()), None);
    }

    #[test]
    fn any_post_install_mention_suppresses_the_block() {
        let commented = format!("{PODFILE}# post_install handled elsewhere\n");
        assert_eq!(with_post_install(&commented, &PluginVars::new()), None);
    }

    #[test]
    fn version_pin_rewrites_only_firebase_pods() {
        let out = with_firebase_version(PODFILE, "11.2.0").expect("modified");
        assert!(out.contains("pod 'Firebase/Core', '11.2.0'"));
        assert!(out.contains("pod 'Firebase/Messaging', '11.2.0'"));
        assert!(out.contains("pod 'GoogleUtilities', '7.13.0'"));
        assert_eq!(with_firebase_version(&out, "11.2.0"), None);
    }

    #[test]
    fn version_pin_replaces_prerelease_versions() {
        let podfile = "pod 'FirebaseMessaging', '10.0.0-beta'\n";
        assert_eq!(
            with_firebase_version(podfile, "11.0.0").as_deref(),
            Some("pod 'FirebaseMessaging', '11.0.0'\n")
        );
    }

    #[test]
    fn version_pin_moves_a_prerelease_to_its_release() {
        let podfile = "pod 'FirebaseMessaging', '10.0.0-beta'\n";
        assert_eq!(
            with_firebase_version(podfile, "10.0.0").as_deref(),
            Some("pod 'FirebaseMessaging', '10.0.0'\n")
        );
    }

    #[test]
    fn version_pin_compares_whole_versions() {
        let podfile = "pod 'FirebaseMessaging', '11.0.0'\n";
        assert_eq!(
            with_firebase_version(podfile, "1.0.0").as_deref(),
            Some("pod 'FirebaseMessaging', '1.0.0'\n")
        );
        assert_eq!(with_firebase_version(podfile, "11.0.0"), None);
    }

    #[test]
    fn sdk_version_validation() {
        assert!(validate_sdk_version("11.2.0").is_ok());
        assert!(validate_sdk_version("11.2.0-rc1").is_ok());
        let err = validate_sdk_version("abc").unwrap_err();
        assert!(matches!(err, EditError::InvalidConfiguration { .. }));
        assert!(validate_sdk_version("11.2").is_err());
    }
}
