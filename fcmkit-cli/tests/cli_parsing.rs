//! CLI end-to-end tests against a copy of the sample Cordova project.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PODFILE: &str = "platforms/ios/Podfile";
const PBXPROJ: &str = "platforms/ios/HelloCordova.xcodeproj/project.pbxproj";

fn fcmkit() -> Command {
    Command::cargo_bin("fcmkit").expect("fcmkit binary")
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let dst = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &dst);
        } else {
            fs::copy(entry.path(), &dst).unwrap();
        }
    }
}

fn create_temp_project() -> TempDir {
    let td = tempfile::tempdir().expect("tempdir");
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../fcmkit-core/tests/fixtures/hello_cordova");
    copy_dir(&fixture, td.path());
    td
}

fn read(td: &TempDir, rel: &str) -> String {
    fs::read_to_string(td.path().join(rel)).unwrap()
}

#[test]
fn test_help_lists_hooks() {
    fcmkit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("after-plugin-install"))
        .stdout(predicate::str::contains("after-prepare"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn test_missing_subcommand_fails() {
    fcmkit().assert().failure();
}

#[test]
fn test_run_no_args_uses_current_dir() {
    let temp = create_temp_project();

    fcmkit().current_dir(temp.path()).arg("run").assert().success();

    let podfile = read(&temp, PODFILE);
    assert!(podfile.contains("post_install do |installer|"));
    assert!(podfile.contains("pod 'Firebase/Messaging', '11.2.0'"));
    assert!(read(&temp, PBXPROJ).contains("@executable_path/Frameworks"));
}

#[test]
fn test_project_root_flag() {
    let temp = create_temp_project();

    fcmkit()
        .arg("after-prepare")
        .arg("--project-root")
        .arg(temp.path())
        .assert()
        .success();

    assert!(read(&temp, PODFILE).contains("post_install"));
}

#[test]
fn test_after_plugin_install_leaves_podfile_alone() {
    let temp = create_temp_project();
    let before = read(&temp, PODFILE);

    fcmkit()
        .current_dir(temp.path())
        .arg("after-plugin-install")
        .assert()
        .success();

    assert_eq!(read(&temp, PODFILE), before);
}

#[test]
fn test_dry_run_prints_patch_and_writes_nothing() {
    let temp = create_temp_project();
    let podfile = read(&temp, PODFILE);
    let pbxproj = read(&temp, PBXPROJ);

    fcmkit()
        .current_dir(temp.path())
        .arg("run")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("diff --git a/platforms/ios/Podfile"))
        .stdout(predicate::str::contains("+post_install do |installer|"));

    assert_eq!(read(&temp, PODFILE), podfile);
    assert_eq!(read(&temp, PBXPROJ), pbxproj);
}

#[test]
fn test_report_is_written_as_json() {
    let temp = create_temp_project();
    let report_path = temp.path().join("out").join("report.json");

    fcmkit()
        .current_dir(temp.path())
        .arg("after-prepare")
        .arg("--report")
        .arg(&report_path)
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["schema"], "fcmkit.report.v1");
    assert_eq!(report["tool"]["name"], "fcmkit");
    assert_eq!(report["pod_install_required"], true);
    assert_eq!(report["verdict"]["status"], "pass");
}

#[test]
fn test_duplicate_var_flags_last_wins() {
    let temp = create_temp_project();

    fcmkit()
        .current_dir(temp.path())
        .arg("after-prepare")
        .arg("--var")
        .arg("IOS_FIREBASE_SDK_VERSION=abc")
        .arg("--var")
        .arg("IOS_FIREBASE_SDK_VERSION=11.3.0")
        .assert()
        .success();

    assert!(read(&temp, PODFILE).contains("pod 'FirebaseInstallations', '11.3.0'"));
}

#[test]
fn test_var_flag_overrides_config_file() {
    let temp = create_temp_project();
    fs::write(
        temp.path().join("fcmkit.toml"),
        "[variables]\nIOS_FIREBASE_SDK_VERSION = \"11.4.0\"\nIOS_STRIP_DEBUG = true\n",
    )
    .unwrap();

    fcmkit()
        .current_dir(temp.path())
        .arg("after-prepare")
        .arg("--var")
        .arg("IOS_FIREBASE_SDK_VERSION=11.5.0")
        .assert()
        .success();

    let podfile = read(&temp, PODFILE);
    assert!(podfile.contains("'11.5.0'"));
    assert!(podfile.contains("= 'dwarf'"));
}

#[test]
fn test_invalid_sdk_version_exits_with_1() {
    let temp = create_temp_project();
    let before = read(&temp, PODFILE);

    fcmkit()
        .current_dir(temp.path())
        .arg("after-prepare")
        .arg("--var")
        .arg("IOS_FIREBASE_SDK_VERSION=abc")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "is not a valid semantic version format",
        ));

    // The post-install block runs before the version check.
    let after = read(&temp, PODFILE);
    assert!(after.contains("post_install"));
    assert!(after.contains("'10.24.0'"));
    assert_ne!(after, before);
}

#[test]
fn test_malformed_var_flag_fails() {
    let temp = create_temp_project();

    fcmkit()
        .current_dir(temp.path())
        .arg("run")
        .arg("--var")
        .arg("IOS_STRIP_DEBUG")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}

#[test]
fn test_unknown_var_flag_warns_and_runs() {
    let temp = create_temp_project();

    fcmkit()
        .current_dir(temp.path())
        .arg("run")
        .arg("--var")
        .arg("IOS_STRIP_DEBUGG=true")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "unknown plugin variable IOS_STRIP_DEBUGG",
        ));
}

#[test]
fn test_missing_app_name_fails() {
    let temp = tempfile::tempdir().unwrap();

    fcmkit()
        .current_dir(temp.path())
        .arg("run")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot determine the app name"));
}

#[test]
fn test_missing_platform_only_warns() {
    let temp = tempfile::tempdir().unwrap();

    fcmkit()
        .current_dir(temp.path())
        .arg("run")
        .arg("--app-name")
        .arg("HelloCordova")
        .assert()
        .success()
        .stderr(predicate::str::contains("Xcode project not found"))
        .stderr(predicate::str::contains("Podfile not found"));

    assert!(fs::read_dir(temp.path()).unwrap().next().is_none());
}

#[test]
fn test_app_name_from_config_file() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("fcmkit.toml"), "app_name = \"Elsewhere\"\n").unwrap();

    fcmkit()
        .current_dir(temp.path())
        .arg("after-plugin-install")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "platforms/ios/Elsewhere.xcodeproj/project.pbxproj",
        ));
}

#[test]
fn test_invalid_config_file_fails() {
    let temp = create_temp_project();
    fs::write(temp.path().join("fcmkit.toml"), "app_name = [").unwrap();

    fcmkit()
        .current_dir(temp.path())
        .arg("run")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("load fcmkit.toml config"));
}
