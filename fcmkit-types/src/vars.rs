//! Plugin configuration variables.
//!
//! Variables are opaque strings. Boolean-like values are the literal strings
//! `"true"` and `"false"`; nothing else is validated here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Strip debug symbols from pod targets (`dwarf` instead of `dwarf-with-dsym`).
pub const IOS_STRIP_DEBUG: &str = "IOS_STRIP_DEBUG";
/// Pin every `pod 'Firebase*'` line in the Podfile to this version.
pub const IOS_FIREBASE_SDK_VERSION: &str = "IOS_FIREBASE_SDK_VERSION";
/// Add the critical-alerts entitlement to both entitlements plists.
pub const IOS_ENABLE_CRITICAL_ALERTS_ENABLED: &str = "IOS_ENABLE_CRITICAL_ALERTS_ENABLED";
/// Value for `FirebaseMessagingAutoInitEnabled` in the app plist.
pub const FIREBASE_FCM_AUTOINIT_ENABLED: &str = "FIREBASE_FCM_AUTOINIT_ENABLED";
/// `"false"` disables FCM entirely on iOS.
pub const IOS_FCM_ENABLED: &str = "IOS_FCM_ENABLED";

/// Every variable the iOS hooks consume.
pub const KNOWN_VARIABLES: &[&str] = &[
    IOS_STRIP_DEBUG,
    IOS_FIREBASE_SDK_VERSION,
    IOS_ENABLE_CRITICAL_ALERTS_ENABLED,
    FIREBASE_FCM_AUTOINIT_ENABLED,
    IOS_FCM_ENABLED,
];

/// String-keyed plugin variables, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginVars(BTreeMap<String, String>);

impl PluginVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// True only for the exact string `"true"`.
    pub fn is_true(&self, key: &str) -> bool {
        self.get(key) == Some("true")
    }

    /// True only for the exact string `"false"`.
    pub fn is_false(&self, key: &str) -> bool {
        self.get(key) == Some("false")
    }

    /// Insert or replace a variable, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Overlay `other` on top of `self`; values in `other` win.
    pub fn merge(&mut self, other: PluginVars) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PluginVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for PluginVars {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
