//! End-to-end runs of the hook pipeline against a copy of a generated
//! Cordova project.

use camino::{Utf8Path, Utf8PathBuf};
use fcmkit_core::FsProject;
use fcmkit_core::pipeline::{
    HookError, run_after_plugin_install, run_after_prepare, run_all,
};
use fcmkit_core::settings::HookSettings;
use fcmkit_edit::EditError;
use fcmkit_types::PatchKind;
use fcmkit_types::report::{ToolInfo, VerdictStatus};
use fcmkit_types::vars::{IOS_FCM_ENABLED, IOS_FIREBASE_SDK_VERSION};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use tempfile::TempDir;

const PODFILE: &str = "platforms/ios/Podfile";
const PBXPROJ: &str = "platforms/ios/HelloCordova.xcodeproj/project.pbxproj";
const GOOGLE_PLIST: &str = "platforms/ios/HelloCordova/Resources/GoogleService-Info.plist";

fn tool() -> ToolInfo {
    ToolInfo {
        name: "fcmkit".to_string(),
        version: Some("test".to_string()),
    }
}

fn copy_dir(from: &Utf8Path, to: &Utf8Path) {
    std::fs::create_dir_all(to).expect("mkdir");
    for entry in std::fs::read_dir(from).expect("read_dir") {
        let entry = entry.expect("entry");
        let name = entry.file_name().into_string().expect("utf8 name");
        let src = from.join(&name);
        let dst = to.join(&name);
        if entry.file_type().expect("file type").is_dir() {
            copy_dir(&src, &dst);
        } else {
            std::fs::copy(&src, &dst).expect("copy");
        }
    }
}

fn snapshot(root: &Utf8Path) -> BTreeMap<Utf8PathBuf, String> {
    fn walk(root: &Utf8Path, dir: &Utf8Path, out: &mut BTreeMap<Utf8PathBuf, String>) {
        for entry in std::fs::read_dir(dir).expect("read_dir") {
            let entry = entry.expect("entry");
            let path = Utf8PathBuf::from_path_buf(entry.path()).expect("utf8");
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).expect("prefix").to_path_buf();
                out.insert(rel, std::fs::read_to_string(&path).expect("read"));
            }
        }
    }
    let mut out = BTreeMap::new();
    walk(root, root, &mut out);
    out
}

struct Fixture {
    _temp: TempDir,
    root: Utf8PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let src = Utf8Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/hello_cordova");
        copy_dir(&src, &root);
        Self { _temp: temp, root }
    }

    fn io(&self) -> FsProject {
        FsProject::new(self.root.clone())
    }

    fn settings(&self) -> HookSettings {
        HookSettings::default()
    }

    fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.root.join(rel)).expect("read")
    }
}

#[test]
fn first_run_patches_everything_and_requires_pod_install() {
    let fx = Fixture::new();
    let run = run_all(&fx.settings(), &fx.io(), tool()).expect("run");
    let report = run.report;

    let kinds: Vec<_> = report.outcomes.iter().map(|o| (o.patch, o.modified)).collect();
    assert_eq!(
        kinds,
        vec![
            (PatchKind::RunpathSearchPaths, true),
            (PatchKind::PluginPlists, true),
            (PatchKind::PodsPostInstall, true),
            (PatchKind::PodfileSdkVersion, true),
        ]
    );
    assert!(report.pod_install_required);
    assert_eq!(report.verdict.status, VerdictStatus::Pass);
    assert_eq!(report.verdict.counts.modified, 4);

    // pbxproj, app plist, both entitlements, Podfile. The Google plist is
    // left alone because FCM stays enabled.
    let paths: Vec<_> = report.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths.len(), 5);
    assert!(!paths.contains(&GOOGLE_PLIST));
    assert!(report.files.iter().all(|f| f.before_sha256.is_some()));

    let podfile = fx.read(PODFILE);
    assert!(podfile.contains("pod 'Firebase/Messaging', '11.2.0'"));
    assert!(podfile.contains("pod 'FirebaseInstallations', '11.2.0'"));
    assert!(podfile.contains("config.build_settings['IPHONEOS_DEPLOYMENT_TARGET'] = '11.0'"));
    assert!(podfile.contains("'DEBUG_INFORMATION_FORMAT'] = 'dwarf-with-dsym'"));

    assert!(fx
        .read("platforms/ios/HelloCordova/Entitlements-Release.plist")
        .contains("<key>com.apple.developer.usernotifications.critical-alerts</key>\n\t<true/>"));
    assert!(fx
        .read("platforms/ios/HelloCordova/HelloCordova-Info.plist")
        .contains("<key>FirebaseMessagingAutoInitEnabled</key>\n\t<true/>"));
}

#[test]
fn second_run_settles() {
    let fx = Fixture::new();
    run_all(&fx.settings(), &fx.io(), tool()).expect("first run");
    let before = snapshot(&fx.root);

    let run = run_all(&fx.settings(), &fx.io(), tool()).expect("second run");
    assert!(run.report.outcomes.iter().all(|o| !o.modified));
    assert!(!run.report.pod_install_required);
    assert_eq!(snapshot(&fx.root), before);

    // Only the project descriptor is rewritten, with identical contents.
    assert_eq!(run.report.files.len(), 1);
    let pbx = &run.report.files[0];
    assert_eq!(pbx.path, PBXPROJ);
    assert_eq!(pbx.before_sha256.as_deref(), Some(pbx.after_sha256.as_str()));
    assert!(run.patch.is_empty());
}

#[test]
fn dry_run_touches_nothing_and_renders_a_diff() {
    let fx = Fixture::new();
    let before = snapshot(&fx.root);
    let settings = HookSettings {
        dry_run: true,
        ..fx.settings()
    };

    let run = run_all(&settings, &fx.io(), tool()).expect("dry run");

    assert_eq!(snapshot(&fx.root), before);
    assert!(run.report.dry_run);
    assert!(run.report.pod_install_required);
    assert!(run.patch.contains(&format!("diff --git a/{PODFILE} b/{PODFILE}\n")));
    assert!(run.patch.contains(&format!("diff --git a/{PBXPROJ} b/{PBXPROJ}\n")));
    // The version pin read the post-install step's pending write.
    assert!(run.patch.contains("+post_install do |installer|"));
    assert!(run.patch.contains("+\tpod 'Firebase/Messaging', '11.2.0'"));
}

#[test]
fn settings_variables_override_project_files() {
    let fx = Fixture::new();
    let settings = HookSettings {
        variables: [(IOS_FCM_ENABLED, "false")].into_iter().collect(),
        ..fx.settings()
    };
    run_after_prepare(&settings, &fx.io(), tool()).expect("run");

    let google = fx.read(GOOGLE_PLIST);
    assert!(google.contains("<key>FIREBASEX_IOS_FCM_ENABLED</key>\n\t<false/>"));
    assert!(fx
        .read("platforms/ios/HelloCordova/HelloCordova-Info.plist")
        .contains("<key>FirebaseMessagingAutoInitEnabled</key>\n\t<false/>"));
}

#[test]
fn invalid_sdk_version_aborts_and_keeps_the_podfile() {
    let fx = Fixture::new();
    let original = fx.read(PODFILE);
    let settings = HookSettings {
        variables: [(IOS_FIREBASE_SDK_VERSION, "latest")].into_iter().collect(),
        ..fx.settings()
    };

    let err = run_after_prepare(&settings, &fx.io(), tool()).unwrap_err();
    assert!(matches!(
        err,
        HookError::Edit(EditError::InvalidConfiguration { .. })
    ));
    // The post-install block was already applied; only the pin is refused.
    assert!(fx.read(PODFILE).starts_with(&original));
    assert!(fx.read(PODFILE).contains("pod 'Firebase/Messaging', '10.24.0'"));
}

#[test]
fn missing_app_name_is_fatal() {
    let fx = Fixture::new();
    std::fs::remove_file(fx.root.join("config.xml")).expect("rm");
    let err = run_all(&fx.settings(), &fx.io(), tool()).unwrap_err();
    assert!(matches!(err, HookError::MissingAppName));
}

#[test]
fn missing_platform_only_warns() {
    let fx = Fixture::new();
    std::fs::remove_dir_all(fx.root.join("platforms")).expect("rm");

    let run = run_all(&fx.settings(), &fx.io(), tool()).expect("run");
    let report = run.report;
    assert_eq!(report.verdict.status, VerdictStatus::Warn);
    let warnings: Vec<_> = report.warnings().collect();
    assert_eq!(warnings.len(), 4);
    assert!(warnings[0].starts_with("Xcode project not found at "));
    assert!(warnings[1].starts_with("Google plist not found at "));
    assert!(warnings[2].starts_with("Podfile not found at "));
    assert!(report.files.is_empty());
}

#[test]
fn new_layout_project_is_preferred() {
    let fx = Fixture::new();
    let new_dir = fx.root.join("platforms/ios/App.xcodeproj");
    std::fs::create_dir_all(&new_dir).expect("mkdir");
    std::fs::copy(fx.root.join(PBXPROJ), new_dir.join("project.pbxproj")).expect("copy");
    let old = fx.read(PBXPROJ);

    let run = run_after_plugin_install(&fx.settings(), &fx.io(), tool()).expect("run");
    assert_eq!(
        run.report.files[0].path,
        "platforms/ios/App.xcodeproj/project.pbxproj"
    );
    assert_eq!(fx.read(PBXPROJ), old);
}

#[test]
fn explicit_app_name_selects_the_platform_paths() {
    let fx = Fixture::new();
    let settings = HookSettings {
        app_name: Some("Missing".to_string()),
        ..fx.settings()
    };
    let run = run_after_plugin_install(&settings, &fx.io(), tool()).expect("run");
    let warnings: Vec<_> = run.report.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].ends_with("platforms/ios/Missing.xcodeproj/project.pbxproj"));
}
