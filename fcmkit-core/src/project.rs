//! Reading the Cordova project: app name and plugin variables.
//!
//! Plugin variables are layered, later sources winning:
//! 1. `<plugin name="cordova-plugin-firebasex"><variable …/></plugin>` in `config.xml`
//! 2. `cordova.plugins["cordova-plugin-firebasex"]` in `package.json`
//! 3. the caller's overrides (config file and command line)

use crate::settings::HookSettings;
use anyhow::Context;
use camino::Utf8Path;
use fcmkit_edit::RepoView;
use fcmkit_types::{PLUGIN_ID, PluginVars};
use tracing::debug;

pub const CONFIG_XML: &str = "config.xml";
pub const PACKAGE_JSON: &str = "package.json";

fn parse_config_xml<'a>(src: &'a str) -> anyhow::Result<roxmltree::Document<'a>> {
    roxmltree::Document::parse(src).with_context(|| format!("parse {CONFIG_XML}"))
}

/// The app name from `<widget><name>` in `config.xml`, if present.
pub fn read_app_name(repo: &dyn RepoView) -> anyhow::Result<Option<String>> {
    let rel = Utf8Path::new(CONFIG_XML);
    if !repo.exists(rel) {
        return Ok(None);
    }
    let src = repo.read_to_string(rel)?;
    let doc = parse_config_xml(&src)?;
    let name = doc
        .root_element()
        .children()
        .find(|n| n.has_tag_name("name"))
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);
    Ok(name)
}

/// Variables declared for this plugin in `config.xml`.
pub fn read_config_xml_vars(repo: &dyn RepoView) -> anyhow::Result<PluginVars> {
    let rel = Utf8Path::new(CONFIG_XML);
    if !repo.exists(rel) {
        return Ok(PluginVars::new());
    }
    let src = repo.read_to_string(rel)?;
    let doc = parse_config_xml(&src)?;

    let vars = doc
        .root_element()
        .children()
        .filter(|n| n.has_tag_name("plugin") && n.attribute("name") == Some(PLUGIN_ID))
        .flat_map(|plugin| plugin.children().filter(|n| n.has_tag_name("variable")))
        .filter_map(|var| Some((var.attribute("name")?, var.attribute("value").unwrap_or(""))))
        .collect();
    Ok(vars)
}

/// Variables recorded for this plugin in `package.json`.
///
/// Non-string values are stringified, so `true` becomes `"true"`.
pub fn read_package_json_vars(repo: &dyn RepoView) -> anyhow::Result<PluginVars> {
    let rel = Utf8Path::new(PACKAGE_JSON);
    if !repo.exists(rel) {
        return Ok(PluginVars::new());
    }
    let src = repo.read_to_string(rel)?;
    let json: serde_json::Value =
        serde_json::from_str(&src).with_context(|| format!("parse {PACKAGE_JSON}"))?;

    let Some(plugin) = json
        .pointer("/cordova/plugins")
        .and_then(|plugins| plugins.get(PLUGIN_ID))
        .and_then(serde_json::Value::as_object)
    else {
        return Ok(PluginVars::new());
    };

    Ok(plugin
        .iter()
        .map(|(k, v)| match v {
            serde_json::Value::String(s) => (k.clone(), s.clone()),
            other => (k.clone(), other.to_string()),
        })
        .collect())
}

/// All variable sources merged, `settings.variables` on top.
pub fn resolve_plugin_vars(
    settings: &HookSettings,
    repo: &dyn RepoView,
) -> anyhow::Result<PluginVars> {
    let mut vars = read_config_xml_vars(repo)?;
    vars.merge(read_package_json_vars(repo)?);
    vars.merge(settings.variables.clone());
    debug!(count = vars.len(), "resolved plugin variables");
    Ok(vars)
}

/// `settings.app_name`, else the name in `config.xml`.
pub fn resolve_app_name(
    settings: &HookSettings,
    repo: &dyn RepoView,
) -> anyhow::Result<Option<String>> {
    if let Some(name) = &settings.app_name {
        return Ok(Some(name.clone()));
    }
    read_app_name(repo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use fcmkit_types::vars::{IOS_FCM_ENABLED, IOS_STRIP_DEBUG};
    use std::collections::BTreeMap;

    struct TestRepo {
        root: Utf8PathBuf,
        files: BTreeMap<String, String>,
    }

    impl TestRepo {
        fn new(files: &[(&str, &str)]) -> Self {
            Self {
                root: Utf8PathBuf::from("/project"),
                files: files
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            }
        }
    }

    impl RepoView for TestRepo {
        fn root(&self) -> &Utf8Path {
            &self.root
        }

        fn read_to_string(&self, rel: &Utf8Path) -> anyhow::Result<String> {
            self.files
                .get(rel.as_str())
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("missing {}", rel))
        }

        fn exists(&self, rel: &Utf8Path) -> bool {
            self.files.contains_key(rel.as_str())
        }
    }

    const CONFIG: &str = r#"<?xml version='1.0' encoding='utf-8'?>
<widget id="io.cordova.hellocordova" version="1.0.0" xmlns="http://www.w3.org/ns/widgets" xmlns:cdv="http://cordova.apache.org/ns/1.0">
    <name> HelloCordova </name>
    <plugin name="cordova-plugin-other" spec="1.0.0">
        <variable name="IOS_STRIP_DEBUG" value="false" />
    </plugin>
    <plugin name="cordova-plugin-firebasex" spec="^16.0.0">
        <variable name="IOS_STRIP_DEBUG" value="true" />
        <variable name="IOS_FCM_ENABLED" value="true" />
    </plugin>
</widget>
"#;

    const PACKAGE: &str = r#"{
  "name": "hello",
  "cordova": {
    "plugins": {
      "cordova-plugin-firebasex": { "IOS_FCM_ENABLED": "false", "IOS_STRIP_DEBUG": true }
    }
  }
}"#;

    #[test]
    fn app_name_comes_from_the_namespaced_widget() {
        let repo = TestRepo::new(&[(CONFIG_XML, CONFIG)]);
        assert_eq!(read_app_name(&repo).unwrap().as_deref(), Some("HelloCordova"));
    }

    #[test]
    fn explicit_app_name_wins() {
        let repo = TestRepo::new(&[(CONFIG_XML, CONFIG)]);
        let settings = HookSettings {
            app_name: Some("Other".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_app_name(&settings, &repo).unwrap().as_deref(), Some("Other"));
    }

    #[test]
    fn only_this_plugins_variables_are_read() {
        let repo = TestRepo::new(&[(CONFIG_XML, CONFIG)]);
        let vars = read_config_xml_vars(&repo).unwrap();
        assert_eq!(vars.get(IOS_STRIP_DEBUG), Some("true"));
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn package_json_overrides_config_xml_and_settings_override_both() {
        let repo = TestRepo::new(&[(CONFIG_XML, CONFIG), (PACKAGE_JSON, PACKAGE)]);

        let vars = resolve_plugin_vars(&HookSettings::default(), &repo).unwrap();
        assert_eq!(vars.get(IOS_FCM_ENABLED), Some("false"));
        assert_eq!(vars.get(IOS_STRIP_DEBUG), Some("true"));

        let settings = HookSettings {
            variables: [(IOS_FCM_ENABLED, "true")].into_iter().collect(),
            ..Default::default()
        };
        let vars = resolve_plugin_vars(&settings, &repo).unwrap();
        assert_eq!(vars.get(IOS_FCM_ENABLED), Some("true"));
    }

    #[test]
    fn missing_sources_yield_nothing() {
        let repo = TestRepo::new(&[]);
        assert!(resolve_plugin_vars(&HookSettings::default(), &repo).unwrap().is_empty());
        assert_eq!(read_app_name(&repo).unwrap(), None);
    }

    #[test]
    fn malformed_config_xml_is_an_error() {
        let repo = TestRepo::new(&[(CONFIG_XML, "<widget><name>x</widget>")]);
        let err = read_app_name(&repo).unwrap_err();
        assert!(format!("{err:#}").contains("config.xml"));
    }
}
