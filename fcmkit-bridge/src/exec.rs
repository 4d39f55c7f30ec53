//! The seam between the typed client and whatever runs the native side.

use serde_json::Value;

use crate::action::Action;

/// One positional call into the native service.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeCall {
    pub service: &'static str,
    pub action: Action,
    pub args: Vec<Value>,
}

/// A continuation the native side may invoke more than once; event style
/// actions such as `onMessageReceived` report every delivery through it.
pub type Continuation = Box<dyn FnMut(Value)>;

pub struct Callbacks {
    pub on_success: Continuation,
    pub on_error: Continuation,
}

impl Callbacks {
    pub fn new(
        on_success: impl FnMut(Value) + 'static,
        on_error: impl FnMut(Value) + 'static,
    ) -> Self {
        Self {
            on_success: Box::new(on_success),
            on_error: Box::new(on_error),
        }
    }

    pub fn success(&mut self, value: Value) {
        (self.on_success)(value)
    }

    pub fn error(&mut self, value: Value) {
        (self.on_error)(value)
    }
}

/// Executes native calls. Implementations must invoke at most one of the
/// continuations per delivery and never both for a one-shot action.
pub trait NativeExec {
    fn exec(&self, call: NativeCall, callbacks: Callbacks);
}

impl<T: NativeExec + ?Sized> NativeExec for Box<T> {
    fn exec(&self, call: NativeCall, callbacks: Callbacks) {
        (**self).exec(call, callbacks)
    }
}
