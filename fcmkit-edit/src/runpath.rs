//! `LD_RUNPATH_SEARCH_PATHS` patch for the Xcode project descriptor.
//!
//! Both the `Debug` and `Release` configurations must search
//! `@executable_path/Frameworks` and inherit the parent setting. The rules
//! mirror the plugin's install hook exactly, including one quirk: when a
//! configuration has no runpath, the default is *added* to every configuration
//! with that name rather than updated, which can leave a duplicate key in a
//! configuration that already had one.

use crate::error::{EditError, EditResult};
use crate::ports::ProjectIo;
use camino::Utf8Path;
use fcmkit_pbxproj::{BuildValue, Document};
use fcmkit_types::{PLUGIN_NAME, PatchKind, PatchOutcome};
use tracing::{debug, info};

pub const RUNPATH_SEARCH_PATHS: &str = "LD_RUNPATH_SEARCH_PATHS";
pub const EXECUTABLE_FRAMEWORKS: &str = "@executable_path/Frameworks";
pub const INHERITED: &str = "$(inherited)";

/// Value added when a configuration has no runpath. Quotes are part of the token.
pub const DEFAULT_RUNPATH: &str = "\"$(inherited) @executable_path/Frameworks\"";

const CONFIGURATIONS: [&str; 2] = ["Debug", "Release"];

/// Apply the runpath rules to an in-memory descriptor.
pub fn ensure_runpath_in_document(doc: &mut Document) {
    for build in CONFIGURATIONS {
        let paths = doc
            .get_build_property(RUNPATH_SEARCH_PATHS, Some(build))
            .map(BuildValue::into_list)
            .unwrap_or_else(|| vec![String::new()]);

        for path in paths {
            if path.is_empty() {
                debug!(build, "no runpath, adding default");
                doc.add_build_property(
                    RUNPATH_SEARCH_PATHS,
                    &BuildValue::from(DEFAULT_RUNPATH),
                    Some(build),
                );
                continue;
            }

            // Both splices start from the original element; the later update wins.
            if !path.contains(EXECUTABLE_FRAMEWORKS) {
                debug!(build, path = path.as_str(), "runpath lacks frameworks dir");
                doc.update_build_property(
                    RUNPATH_SEARCH_PATHS,
                    &BuildValue::Single(splice(&path, EXECUTABLE_FRAMEWORKS)),
                    Some(build),
                );
            }
            if !path.contains(INHERITED) {
                debug!(build, path = path.as_str(), "runpath does not inherit");
                doc.update_build_property(
                    RUNPATH_SEARCH_PATHS,
                    &BuildValue::Single(splice(&path, INHERITED)),
                    Some(build),
                );
            }
        }
    }
}

/// Insert ` <token>` before the closing quote of a quoted element.
///
/// An unquoted element is quoted instead of losing its last character.
fn splice(element: &str, token: &str) -> String {
    match element.strip_suffix('"') {
        Some(body) if element.len() > 1 => format!("{body} {token}\""),
        _ => format!("\"{element} {token}\""),
    }
}

/// Parse the descriptor at `project_path`, patch it and write it back.
///
/// The file is always rewritten; `modified` reports whether its text changed.
pub fn ensure_runpath_search_path(
    io: &dyn ProjectIo,
    project_path: &Utf8Path,
) -> EditResult<PatchOutcome> {
    let src = io.read_to_string(project_path)?;
    let mut doc = Document::parse(&src).map_err(|source| EditError::Project {
        path: project_path.to_path_buf(),
        source,
    })?;

    ensure_runpath_in_document(&mut doc);

    let out = doc.to_string();
    io.write_file(project_path, out.as_bytes())?;

    let mut outcome = PatchOutcome::new(PatchKind::RunpathSearchPaths);
    outcome.modified = out != src;
    outcome.record_write(project_path);
    if outcome.modified {
        info!("{PLUGIN_NAME}: updated {RUNPATH_SEARCH_PATHS} in {project_path}");
    } else {
        debug!(%project_path, "runpath search paths already set");
    }
    Ok(outcome)
}
