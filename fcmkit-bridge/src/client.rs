//! Typed client over the `FirebasePlugin` native service.
//!
//! Each method maps to exactly one [`Action`] and forwards its arguments
//! positionally. Success values pass through untouched except for the
//! permission queries, which are normalized with [`ensure_boolean`].

use serde_json::Value;
use tracing::debug;

use crate::action::{Action, SERVICE};
use crate::channel::ChannelOptions;
use crate::error::BridgeError;
use crate::exec::{Callbacks, NativeCall, NativeExec};
use crate::value::{ensure_boolean, is_truthy};

type Listener<T> = Option<Box<dyn FnMut(T)>>;

#[derive(Default)]
struct Listeners {
    installation_id_change: Listener<String>,
    application_did_become_active: Listener<()>,
    application_did_enter_background: Listener<()>,
}

pub struct MessagingClient<E> {
    exec: E,
    listeners: Listeners,
}

impl<E: NativeExec> MessagingClient<E> {
    pub fn new(exec: E) -> Self {
        Self {
            exec,
            listeners: Listeners::default(),
        }
    }

    pub fn exec(&self) -> &E {
        &self.exec
    }

    fn call(
        &self,
        action: Action,
        args: Vec<Value>,
        on_success: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        debug!(service = SERVICE, %action, args = args.len(), "native call");
        let call = NativeCall {
            service: SERVICE,
            action,
            args,
        };
        self.exec.exec(call, Callbacks::new(on_success, on_error));
    }

    fn call_boolean(
        &self,
        action: Action,
        args: Vec<Value>,
        mut on_success: impl FnMut(bool) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call(
            action,
            args,
            move |value| on_success(ensure_boolean(&value)),
            on_error,
        );
    }

    // Token

    pub fn get_token(
        &self,
        on_success: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call(Action::GetToken, Vec::new(), on_success, on_error);
    }

    pub fn get_apns_token(
        &self,
        on_success: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call(Action::GetApnsToken, Vec::new(), on_success, on_error);
    }

    /// `on_message` runs for every message delivered while the app is alive.
    pub fn on_message_received(
        &self,
        on_message: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call(Action::OnMessageReceived, Vec::new(), on_message, on_error);
    }

    pub fn on_token_refresh(
        &self,
        on_token: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call(Action::OnTokenRefresh, Vec::new(), on_token, on_error);
    }

    pub fn on_apns_token_received(
        &self,
        on_token: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call(Action::OnApnsTokenReceived, Vec::new(), on_token, on_error);
    }

    // Topics

    pub fn subscribe(
        &self,
        topic: &str,
        on_success: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call(Action::Subscribe, vec![topic.into()], on_success, on_error);
    }

    pub fn unsubscribe(
        &self,
        topic: &str,
        on_success: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call(Action::Unsubscribe, vec![topic.into()], on_success, on_error);
    }

    pub fn unregister(
        &self,
        on_success: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call(Action::Unregister, Vec::new(), on_success, on_error);
    }

    // Auto-init

    pub fn is_auto_init_enabled(
        &self,
        on_success: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call(Action::IsAutoInitEnabled, Vec::new(), on_success, on_error);
    }

    /// `enabled` is coerced with JavaScript truthiness before it is sent.
    pub fn set_auto_init_enabled(
        &self,
        enabled: impl Into<Value>,
        on_success: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        let enabled = is_truthy(&enabled.into());
        self.call(
            Action::SetAutoInitEnabled,
            vec![Value::Bool(enabled)],
            on_success,
            on_error,
        );
    }

    pub fn on_open_settings(
        &self,
        on_open: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call(Action::OnOpenSettings, Vec::new(), on_open, on_error);
    }

    // Badge

    pub fn set_badge_number(
        &self,
        number: i64,
        on_success: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call(
            Action::SetBadgeNumber,
            vec![number.into()],
            on_success,
            on_error,
        );
    }

    pub fn get_badge_number(
        &self,
        on_success: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call(Action::GetBadgeNumber, Vec::new(), on_success, on_error);
    }

    // Permissions

    /// Requests notification permission. The optional flag is normalized with
    /// [`ensure_boolean`]; `None` sends `false`.
    pub fn grant_permission(
        &self,
        requested: Option<Value>,
        on_success: impl FnMut(bool) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        let flag = requested.as_ref().is_some_and(ensure_boolean);
        self.call_boolean(
            Action::GrantPermission,
            vec![Value::Bool(flag)],
            on_success,
            on_error,
        );
    }

    pub fn grant_critical_permission(
        &self,
        on_success: impl FnMut(bool) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call_boolean(
            Action::GrantCriticalPermission,
            Vec::new(),
            on_success,
            on_error,
        );
    }

    pub fn has_permission(
        &self,
        on_success: impl FnMut(bool) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call_boolean(Action::HasPermission, Vec::new(), on_success, on_error);
    }

    pub fn has_critical_permission(
        &self,
        on_success: impl FnMut(bool) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call_boolean(
            Action::HasCriticalPermission,
            Vec::new(),
            on_success,
            on_error,
        );
    }

    // Channels

    pub fn set_default_channel(
        &self,
        options: &ChannelOptions,
        on_success: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) -> Result<(), BridgeError> {
        let options = serde_json::to_value(options)?;
        self.call(Action::SetDefaultChannel, vec![options], on_success, on_error);
        Ok(())
    }

    pub fn create_channel(
        &self,
        options: &ChannelOptions,
        on_success: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) -> Result<(), BridgeError> {
        let options = serde_json::to_value(options)?;
        self.call(Action::CreateChannel, vec![options], on_success, on_error);
        Ok(())
    }

    pub fn delete_channel(
        &self,
        channel_id: &str,
        on_success: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call(
            Action::DeleteChannel,
            vec![channel_id.into()],
            on_success,
            on_error,
        );
    }

    pub fn list_channels(
        &self,
        on_success: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call(Action::ListChannels, Vec::new(), on_success, on_error);
    }

    pub fn clear_all_notifications(
        &self,
        on_success: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call(
            Action::ClearAllNotifications,
            Vec::new(),
            on_success,
            on_error,
        );
    }

    // Installations

    pub fn get_id(
        &self,
        on_success: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call(Action::GetId, Vec::new(), on_success, on_error);
    }

    pub fn get_installation_id(
        &self,
        on_success: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call(Action::GetInstallationId, Vec::new(), on_success, on_error);
    }

    pub fn get_installation_token(
        &self,
        on_success: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call(
            Action::GetInstallationToken,
            Vec::new(),
            on_success,
            on_error,
        );
    }

    pub fn delete_installation_id(
        &self,
        on_success: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) {
        self.call(
            Action::DeleteInstallationId,
            Vec::new(),
            on_success,
            on_error,
        );
    }
}

/// Event slots. One listener per event kind; registering again replaces it.
impl<E> MessagingClient<E> {
    pub fn register_installation_id_change_listener(
        &mut self,
        listener: impl FnMut(String) + 'static,
    ) {
        self.listeners.installation_id_change = Some(Box::new(listener));
    }

    pub fn register_application_did_become_active_listener(
        &mut self,
        mut listener: impl FnMut() + 'static,
    ) {
        self.listeners.application_did_become_active = Some(Box::new(move |()| listener()));
    }

    pub fn register_application_did_enter_background_listener(
        &mut self,
        mut listener: impl FnMut() + 'static,
    ) {
        self.listeners.application_did_enter_background = Some(Box::new(move |()| listener()));
    }

    /// Called by the native host when the installation id changes.
    pub fn dispatch_installation_id_change(&mut self, installation_id: &str) {
        if let Some(listener) = self.listeners.installation_id_change.as_mut() {
            listener(installation_id.to_string());
        }
    }

    pub fn dispatch_application_did_become_active(&mut self) {
        if let Some(listener) = self.listeners.application_did_become_active.as_mut() {
            listener(());
        }
    }

    pub fn dispatch_application_did_enter_background(&mut self) {
        if let Some(listener) = self.listeners.application_did_enter_background.as_mut() {
            listener(());
        }
    }
}
