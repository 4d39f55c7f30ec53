// Stub executor for builds without a native host.
//
// Every call fails through the error continuation; native transports plug in
// through `NativeExec`.

use serde_json::Value;

use crate::error::BridgeError;
use crate::exec::{Callbacks, NativeCall, NativeExec};

/// Executor returned when no native host is linked.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubExec;

impl NativeExec for StubExec {
    fn exec(&self, call: NativeCall, mut callbacks: Callbacks) {
        tracing::warn!("{}.{} called on stub bridge", call.service, call.action);
        let err = BridgeError::PlatformUnavailable {
            action: call.action,
        };
        callbacks.error(Value::String(err.to_string()));
    }
}
