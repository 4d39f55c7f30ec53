//! Push-related plugin variables written into the app's property lists.
//!
//! All four plists must exist before anything is touched; the first missing
//! one is reported and the patch stops. Each plist (the two entitlements files
//! count as one unit) is rewritten only when one of its keys actually changed,
//! so running the hook twice writes nothing the second time.

use crate::error::{EditError, EditResult};
use crate::plist::{Plist, Value};
use crate::ports::{ProjectIo, abs_path};
use camino::Utf8Path;
use fcmkit_types::vars::{
    FIREBASE_FCM_AUTOINIT_ENABLED, IOS_ENABLE_CRITICAL_ALERTS_ENABLED, IOS_FCM_ENABLED,
};
use fcmkit_types::{IosPlatform, PLUGIN_NAME, PatchKind, PatchOutcome, PluginVars};
use tracing::{debug, info, warn};

pub const CRITICAL_ALERTS_KEY: &str = "com.apple.developer.usernotifications.critical-alerts";
pub const AUTO_INIT_KEY: &str = "FirebaseMessagingAutoInitEnabled";
pub const FCM_ENABLED_KEY: &str = "FIREBASEX_IOS_FCM_ENABLED";

/// The four plists, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginPlists {
    pub google: Plist,
    pub app: Plist,
    pub entitlements_debug: Plist,
    pub entitlements_release: Plist,
}

/// Which of the plists changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlistChanges {
    pub google: bool,
    pub app: bool,
    pub entitlements: bool,
}

impl PlistChanges {
    pub fn any(&self) -> bool {
        self.google || self.app || self.entitlements
    }
}

fn set_bool(plist: &mut Plist, key: &str, value: bool) {
    match plist.dict_mut() {
        Some(dict) => {
            dict.set(key, Value::Boolean(value));
        }
        None => debug!(key, "plist root is not a dictionary, skipping"),
    }
}

/// Apply the variable rules in memory.
///
/// `IOS_FCM_ENABLED=false` runs last, so it overrides
/// `FIREBASE_FCM_AUTOINIT_ENABLED` on the app plist. Changes are measured
/// against the state before the call, so a value set and then reset counts
/// as unchanged.
pub fn apply_vars(vars: &PluginVars, plists: &mut PluginPlists) -> PlistChanges {
    let before = plists.clone();

    if vars.is_true(IOS_ENABLE_CRITICAL_ALERTS_ENABLED) {
        set_bool(&mut plists.entitlements_debug, CRITICAL_ALERTS_KEY, true);
        set_bool(&mut plists.entitlements_release, CRITICAL_ALERTS_KEY, true);
    }

    if let Some(value) = vars.get(FIREBASE_FCM_AUTOINIT_ENABLED) {
        set_bool(&mut plists.app, AUTO_INIT_KEY, value == "true");
    }

    if vars.is_false(IOS_FCM_ENABLED) {
        set_bool(&mut plists.google, FCM_ENABLED_KEY, false);
        set_bool(&mut plists.app, AUTO_INIT_KEY, false);
    }

    PlistChanges {
        google: plists.google != before.google,
        app: plists.app != before.app,
        entitlements: plists.entitlements_debug != before.entitlements_debug
            || plists.entitlements_release != before.entitlements_release,
    }
}

fn read_plist(io: &dyn ProjectIo, path: &Utf8Path) -> EditResult<Plist> {
    let src = io.read_to_string(path)?;
    Plist::parse(&src).map_err(|err| EditError::parse(path, err))
}

fn write_plist(
    io: &dyn ProjectIo,
    path: &Utf8Path,
    plist: &Plist,
    outcome: &mut PatchOutcome,
) -> EditResult<()> {
    io.write_file(path, plist.to_xml().as_bytes())?;
    outcome.record_write(path);
    info!("{PLUGIN_NAME}: updated {path}");
    Ok(())
}

/// Apply the push-related plugin variables to the four plists.
pub fn apply_plugin_vars_to_plists(
    vars: &PluginVars,
    platform: &IosPlatform,
    io: &dyn ProjectIo,
) -> EditResult<PatchOutcome> {
    for (label, path) in platform.plists() {
        if !io.exists(path) {
            let msg = format!("{label} not found at {}", abs_path(io.root(), path));
            warn!("{PLUGIN_NAME}: {msg}");
            return Ok(PatchOutcome::skipped(PatchKind::PluginPlists, msg));
        }
    }

    let mut plists = PluginPlists {
        google: read_plist(io, &platform.google_plist)?,
        app: read_plist(io, &platform.app_plist)?,
        entitlements_debug: read_plist(io, &platform.entitlements_debug_plist)?,
        entitlements_release: read_plist(io, &platform.entitlements_release_plist)?,
    };

    let changes = apply_vars(vars, &mut plists);
    let mut outcome = PatchOutcome::new(PatchKind::PluginPlists);
    outcome.modified = changes.any();

    if changes.google {
        write_plist(io, &platform.google_plist, &plists.google, &mut outcome)?;
    }
    if changes.app {
        write_plist(io, &platform.app_plist, &plists.app, &mut outcome)?;
    }
    if changes.entitlements {
        write_plist(
            io,
            &platform.entitlements_debug_plist,
            &plists.entitlements_debug,
            &mut outcome,
        )?;
        write_plist(
            io,
            &platform.entitlements_release_plist,
            &plists.entitlements_release,
            &mut outcome,
        )?;
    }
    if !outcome.modified {
        debug!("plists already match plugin variables");
    }
    Ok(outcome)
}
