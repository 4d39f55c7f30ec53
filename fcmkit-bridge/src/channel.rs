use serde::{Deserialize, Serialize};

/// Vibration setting: on/off or an explicit pattern in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Vibration {
    Enabled(bool),
    Pattern(Vec<u64>),
}

/// Notification channel definition passed to `createChannel` and
/// `setDefaultChannel`. Unset fields are omitted so the native side applies
/// its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelOptions {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibration: Option<Vibration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_color: Option<String>,
    /// 0 (none) to 4 (high).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<bool>,
    /// -1 (secret), 0 (private) or 1 (public).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<i8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_type: Option<i32>,
}

impl ChannelOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}
