//! Where the generated Xcode project descriptor lives.

use camino::Utf8PathBuf;
use fcmkit_edit::RepoView;
use fcmkit_types::platform::IOS_DIR;
use tracing::debug;

/// Project name used by newer platform generators regardless of app name.
pub const NEW_LAYOUT_PROJECT: &str = "App";

fn descriptor(project_name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(IOS_DIR)
        .join(format!("{project_name}.xcodeproj"))
        .join("project.pbxproj")
}

/// Path of `project.pbxproj`, relative to the project root.
///
/// `platforms/ios/App.xcodeproj` wins when it exists; otherwise the
/// app-named project is returned whether or not it exists.
pub fn locate_xcode_project(repo: &dyn RepoView, app_name: &str) -> Utf8PathBuf {
    let new_path = descriptor(NEW_LAYOUT_PROJECT);
    if repo.exists(&new_path) {
        debug!(path = %new_path, "using new platform layout");
        return new_path;
    }
    descriptor(app_name)
}
