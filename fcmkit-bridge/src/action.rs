//! The fixed catalog of native actions exposed by the plugin.

use std::fmt;
use std::str::FromStr;

use crate::error::BridgeError;

/// Native service every call is routed to.
pub const SERVICE: &str = "FirebasePlugin";

/// One entry in the native action catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    GetToken,
    GetApnsToken,
    OnMessageReceived,
    OnTokenRefresh,
    OnApnsTokenReceived,
    Subscribe,
    Unsubscribe,
    Unregister,
    IsAutoInitEnabled,
    SetAutoInitEnabled,
    OnOpenSettings,
    SetBadgeNumber,
    GetBadgeNumber,
    GrantPermission,
    GrantCriticalPermission,
    HasPermission,
    HasCriticalPermission,
    SetDefaultChannel,
    CreateChannel,
    DeleteChannel,
    ListChannels,
    ClearAllNotifications,
    GetId,
    GetInstallationId,
    GetInstallationToken,
    DeleteInstallationId,
}

impl Action {
    pub const ALL: [Action; 26] = [
        Action::GetToken,
        Action::GetApnsToken,
        Action::OnMessageReceived,
        Action::OnTokenRefresh,
        Action::OnApnsTokenReceived,
        Action::Subscribe,
        Action::Unsubscribe,
        Action::Unregister,
        Action::IsAutoInitEnabled,
        Action::SetAutoInitEnabled,
        Action::OnOpenSettings,
        Action::SetBadgeNumber,
        Action::GetBadgeNumber,
        Action::GrantPermission,
        Action::GrantCriticalPermission,
        Action::HasPermission,
        Action::HasCriticalPermission,
        Action::SetDefaultChannel,
        Action::CreateChannel,
        Action::DeleteChannel,
        Action::ListChannels,
        Action::ClearAllNotifications,
        Action::GetId,
        Action::GetInstallationId,
        Action::GetInstallationToken,
        Action::DeleteInstallationId,
    ];

    /// Name the native side dispatches on.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::GetToken => "getToken",
            Action::GetApnsToken => "getAPNSToken",
            Action::OnMessageReceived => "onMessageReceived",
            Action::OnTokenRefresh => "onTokenRefresh",
            Action::OnApnsTokenReceived => "onApnsTokenReceived",
            Action::Subscribe => "subscribe",
            Action::Unsubscribe => "unsubscribe",
            Action::Unregister => "unregister",
            Action::IsAutoInitEnabled => "isAutoInitEnabled",
            Action::SetAutoInitEnabled => "setAutoInitEnabled",
            Action::OnOpenSettings => "onOpenSettings",
            Action::SetBadgeNumber => "setBadgeNumber",
            Action::GetBadgeNumber => "getBadgeNumber",
            Action::GrantPermission => "grantPermission",
            Action::GrantCriticalPermission => "grantCriticalPermission",
            Action::HasPermission => "hasPermission",
            Action::HasCriticalPermission => "hasCriticalPermission",
            Action::SetDefaultChannel => "setDefaultChannel",
            Action::CreateChannel => "createChannel",
            Action::DeleteChannel => "deleteChannel",
            Action::ListChannels => "listChannels",
            Action::ClearAllNotifications => "clearAllNotifications",
            Action::GetId => "getId",
            Action::GetInstallationId => "getInstallationId",
            Action::GetInstallationToken => "getInstallationToken",
            Action::DeleteInstallationId => "deleteInstallationId",
        }
    }

    /// Actions whose success value is normalized to a boolean.
    pub fn returns_boolean(self) -> bool {
        matches!(
            self,
            Action::GrantPermission
                | Action::GrantCriticalPermission
                | Action::HasPermission
                | Action::HasCriticalPermission
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| BridgeError::UnknownAction(s.to_string()))
    }
}
