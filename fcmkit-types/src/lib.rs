//! Shared DTOs for the fcmkit workspace.
//!
//! # Design constraints
//! - The report types are serialized to disk.
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod outcome;
pub mod platform;
pub mod report;
pub mod vars;

pub use outcome::{PatchKind, PatchOutcome};
pub use platform::IosPlatform;
pub use vars::PluginVars;

/// Schema identifiers.
pub mod schema {
    pub const FCMKIT_REPORT_V1: &str = "fcmkit.report.v1";
}

/// The plugin these hooks belong to. Variables are looked up under this id.
pub const PLUGIN_ID: &str = "cordova-plugin-firebasex";

/// Human-readable plugin name used as a log prefix.
pub const PLUGIN_NAME: &str = "FirebaseX plugin";
