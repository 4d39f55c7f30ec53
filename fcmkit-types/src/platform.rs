//! Expected locations of the generated iOS platform files.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Root of the generated iOS platform, relative to the project root.
pub const IOS_DIR: &str = "platforms/ios";

/// Paths to the files the iOS hooks patch, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IosPlatform {
    /// `GoogleService-Info.plist` copied into the app resources.
    pub google_plist: Utf8PathBuf,
    /// `<App>-Info.plist`.
    pub app_plist: Utf8PathBuf,
    pub entitlements_debug_plist: Utf8PathBuf,
    pub entitlements_release_plist: Utf8PathBuf,
    pub podfile: Utf8PathBuf,
}

impl IosPlatform {
    /// Layout produced by the platform generator for an app named `app_name`.
    pub fn for_app(app_name: &str) -> Self {
        let ios = Utf8Path::new(IOS_DIR);
        let app = ios.join(app_name);
        Self {
            google_plist: app.join("Resources").join("GoogleService-Info.plist"),
            app_plist: app.join(format!("{app_name}-Info.plist")),
            entitlements_debug_plist: app.join("Entitlements-Debug.plist"),
            entitlements_release_plist: app.join("Entitlements-Release.plist"),
            podfile: ios.join("Podfile"),
        }
    }

    /// The four plists, in the order their existence is checked.
    pub fn plists(&self) -> [(&'static str, &Utf8Path); 4] {
        [
            ("Google plist", &self.google_plist),
            ("App plist", &self.app_plist),
            ("Entitlements debug plist", &self.entitlements_debug_plist),
            ("Entitlements release plist", &self.entitlements_release_plist),
        ]
    }
}
