use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Which patch produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchKind {
    /// `LD_RUNPATH_SEARCH_PATHS` in the Xcode project.
    RunpathSearchPaths,
    /// The `post_install` block appended to the Podfile.
    PodsPostInstall,
    /// `pod 'Firebase*'` version pins in the Podfile.
    PodfileSdkVersion,
    /// Plugin variables written to the plists.
    PluginPlists,
}

impl PatchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PatchKind::RunpathSearchPaths => "runpath_search_paths",
            PatchKind::PodsPostInstall => "pods_post_install",
            PatchKind::PodfileSdkVersion => "podfile_sdk_version",
            PatchKind::PluginPlists => "plugin_plists",
        }
    }
}

/// Result of a single patch operation.
///
/// Missing input files are not errors: they are reported in `warnings` and the
/// operation is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchOutcome {
    pub patch: PatchKind,
    pub modified: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files_written: Vec<Utf8PathBuf>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl PatchOutcome {
    pub fn new(patch: PatchKind) -> Self {
        Self {
            patch,
            modified: false,
            files_written: vec![],
            warnings: vec![],
        }
    }

    /// An outcome for an operation that did not run.
    pub fn skipped(patch: PatchKind, warning: impl Into<String>) -> Self {
        let mut outcome = Self::new(patch);
        outcome.warnings.push(warning.into());
        outcome
    }

    pub fn record_write(&mut self, path: impl Into<Utf8PathBuf>) {
        self.files_written.push(path.into());
    }
}
