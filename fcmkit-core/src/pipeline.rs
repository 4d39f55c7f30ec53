//! The install-hook pipeline.
//!
//! These entry points are I/O-agnostic: every read and write goes through the
//! port passed in. With `dry_run` set, writes land in a [`DryRunProject`]
//! overlay instead, and later steps read the pending contents.

use crate::adapters::{DryRunProject, TrackedIo};
use crate::locator::locate_xcode_project;
use crate::project::{resolve_app_name, resolve_plugin_vars};
use crate::settings::{Hook, HookSettings};
use fcmkit_edit::ports::abs_path;
use fcmkit_edit::{
    EditError, ProjectIo, apply_plugin_vars_to_plists, apply_plugin_vars_to_podfile,
    apply_pods_post_install, ensure_runpath_search_path,
};
use fcmkit_types::report::{HookReport, ToolInfo};
use fcmkit_types::{IosPlatform, PLUGIN_NAME, PatchKind, PatchOutcome};
use tracing::{debug, info, warn};

/// Error type for pipeline results. Every variant exits with code 1.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error(
        "cannot determine the app name: pass --app-name, set app_name in fcmkit.toml, or add <name> to config.xml"
    )]
    MissingAppName,
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

/// Outcome of one pipeline run.
#[derive(Debug)]
pub struct HookRun {
    pub report: HookReport,
    /// Unified diff of every file the run wrote (or would write, in a dry run).
    pub patch: String,
}

/// Ensure runpath search paths in the Xcode project.
pub fn run_after_plugin_install(
    settings: &HookSettings,
    io: &dyn ProjectIo,
    tool: ToolInfo,
) -> Result<HookRun, HookError> {
    run_hook(Hook::AfterPluginInstall, settings, io, tool)
}

/// Apply plugin variables to the plists and patch the Podfile.
pub fn run_after_prepare(
    settings: &HookSettings,
    io: &dyn ProjectIo,
    tool: ToolInfo,
) -> Result<HookRun, HookError> {
    run_hook(Hook::AfterPrepare, settings, io, tool)
}

/// Both hooks in sequence, reported together.
pub fn run_all(
    settings: &HookSettings,
    io: &dyn ProjectIo,
    tool: ToolInfo,
) -> Result<HookRun, HookError> {
    run_hook(Hook::All, settings, io, tool)
}

pub fn run_hook(
    hook: Hook,
    settings: &HookSettings,
    io: &dyn ProjectIo,
    tool: ToolInfo,
) -> Result<HookRun, HookError> {
    let overlay;
    let base: &dyn ProjectIo = if settings.dry_run {
        overlay = DryRunProject::new(io);
        &overlay
    } else {
        io
    };
    let tracked = TrackedIo::new(base);

    let mut report = HookReport::new(tool);
    report.dry_run = settings.dry_run;

    let app_name = resolve_app_name(settings, &tracked)?.ok_or(HookError::MissingAppName)?;
    debug!(app_name = app_name.as_str(), ?hook, dry_run = settings.dry_run, "running hook");

    if matches!(hook, Hook::AfterPluginInstall | Hook::All) {
        report.push_outcome(after_plugin_install(&app_name, &tracked)?);
    }

    if matches!(hook, Hook::AfterPrepare | Hook::All) {
        let vars = resolve_plugin_vars(settings, &tracked)?;
        let platform = IosPlatform::for_app(&app_name);

        let plists = apply_plugin_vars_to_plists(&vars, &platform, &tracked)?;
        let post_install = apply_pods_post_install(&vars, &platform, &tracked)?;
        let sdk_version = apply_plugin_vars_to_podfile(&vars, &platform, &tracked)?;

        if post_install.modified || sdk_version.modified {
            report.pod_install_required = true;
            info!("{PLUGIN_NAME}: Podfile changed, `pod install` must be run again");
        }
        report.push_outcome(plists);
        report.push_outcome(post_install);
        report.push_outcome(sdk_version);
    }

    report.files = tracked.changes();
    report.finish();
    Ok(HookRun {
        patch: tracked.render_patch(),
        report,
    })
}

fn after_plugin_install(app_name: &str, io: &dyn ProjectIo) -> Result<PatchOutcome, HookError> {
    let project_path = locate_xcode_project(io, app_name);
    if !io.exists(&project_path) {
        let msg = format!(
            "Xcode project not found at {}",
            abs_path(io.root(), &project_path)
        );
        warn!("{PLUGIN_NAME}: {msg}");
        return Ok(PatchOutcome::skipped(PatchKind::RunpathSearchPaths, msg));
    }
    Ok(ensure_runpath_search_path(io, &project_path)?)
}
