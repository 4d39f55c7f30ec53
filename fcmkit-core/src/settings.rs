//! Clap-free settings for the hook pipeline.

use fcmkit_types::PluginVars;

/// Which install hook to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Hook {
    AfterPluginInstall,
    AfterPrepare,
    #[default]
    All,
}

/// Settings shared by both hooks. The project root is the root of the
/// `ProjectIo` the hooks run against.
#[derive(Debug, Clone, Default)]
pub struct HookSettings {
    /// Overrides the `<name>` in `config.xml`.
    pub app_name: Option<String>,

    /// Highest-precedence variables, layered over `config.xml` and
    /// `package.json`.
    pub variables: PluginVars,

    pub dry_run: bool,
}
