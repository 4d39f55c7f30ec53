//! Patches applied to a generated Cordova iOS platform.
//!
//! Responsibilities:
//! - Ensure `LD_RUNPATH_SEARCH_PATHS` in the Xcode project descriptor.
//! - Append the CocoaPods post-install block and pin Firebase pod versions.
//! - Write push-related plugin variables into the app's plists.
//! - Render a unified diff preview of pending changes.
//!
//! Every patch is idempotent and goes through the [`ports`] traits, so the
//! same code runs against the real tree or a dry-run overlay.

pub mod error;
pub mod plist;
pub mod plist_vars;
pub mod podfile;
pub mod ports;
pub mod runpath;

pub use error::{EditError, EditResult};
pub use plist_vars::apply_plugin_vars_to_plists;
pub use podfile::{apply_plugin_vars_to_podfile, apply_pods_post_install};
pub use ports::{FsProject, ProjectIo, RepoView, WritePort};
pub use runpath::ensure_runpath_search_path;

use camino::Utf8PathBuf;
use diffy::PatchFormatter;
use std::collections::BTreeMap;

/// Unified diff of every file whose contents differ between `before` and
/// `after`. A file missing from `before` is diffed against empty text.
pub fn render_patch(
    before: &BTreeMap<Utf8PathBuf, String>,
    after: &BTreeMap<Utf8PathBuf, String>,
) -> String {
    let mut out = String::new();
    let formatter = PatchFormatter::new();

    for (path, new) in after {
        let old = before.get(path).map(String::as_str).unwrap_or("");
        if old == new {
            continue;
        }

        out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
        let patch = diffy::create_patch(old, new);
        out.push_str(&formatter.fmt_patch(&patch).to_string());
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }

    out
}
