//! Serialization shape of the report artifact.

use fcmkit_types::report::{HookReport, ToolInfo, VerdictStatus};
use fcmkit_types::{PatchKind, PatchOutcome};
use pretty_assertions::assert_eq;

fn tool() -> ToolInfo {
    ToolInfo {
        name: "fcmkit".to_string(),
        version: Some("0.0.0".to_string()),
    }
}

#[test]
fn report_without_warnings_passes() {
    let mut report = HookReport::new(tool());
    let mut outcome = PatchOutcome::new(PatchKind::PodsPostInstall);
    outcome.modified = true;
    outcome.record_write("platforms/ios/Podfile");
    report.push_outcome(outcome);
    report.push_outcome(PatchOutcome::new(PatchKind::PodfileSdkVersion));

    report.finish();

    assert_eq!(report.verdict.status, VerdictStatus::Pass);
    assert_eq!(report.verdict.counts.modified, 1);
    assert_eq!(report.verdict.counts.unchanged, 1);
    assert!(report.run.ended_at.is_some());
}

#[test]
fn any_warning_turns_the_verdict_to_warn() {
    let mut report = HookReport::new(tool());
    report.push_outcome(PatchOutcome::skipped(
        PatchKind::PluginPlists,
        "Google plist not found at platforms/ios/App/Resources/GoogleService-Info.plist",
    ));

    report.finish();

    assert_eq!(report.verdict.status, VerdictStatus::Warn);
    assert_eq!(report.verdict.counts.warnings, 1);
    assert_eq!(report.warnings().count(), 1);
}

#[test]
fn outcome_json_uses_snake_case_kinds_and_omits_empty_lists() {
    let outcome = PatchOutcome::new(PatchKind::RunpathSearchPaths);
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "patch": "runpath_search_paths",
            "modified": false,
        })
    );
}

#[test]
fn report_round_trips_through_json() {
    let mut report = HookReport::new(tool());
    report.dry_run = true;
    report.push_outcome(PatchOutcome::skipped(PatchKind::PodsPostInstall, "missing"));
    report.finish();

    let s = serde_json::to_string_pretty(&report).unwrap();
    let back: HookReport = serde_json::from_str(&s).unwrap();

    assert_eq!(back.schema, fcmkit_types::schema::FCMKIT_REPORT_V1);
    assert!(back.dry_run);
    assert_eq!(back.outcomes, report.outcomes);
    assert_eq!(back.run.run_id, report.run.run_id);
}
