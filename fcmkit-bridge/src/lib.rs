//! Typed client for the `FirebasePlugin` JS-to-native bridge.
//!
//! The bridge is a single positional call shape, `(service, action, args)`,
//! answered through a success and an error continuation. This crate fixes the
//! action catalog ([`Action`]), the argument shapes, the boolean normalization
//! for permission queries and the per-client event slots. The native side is
//! behind [`NativeExec`]; [`platform_exec`] returns [`StubExec`], which fails
//! every call through the error continuation.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use fcmkit_bridge::{MessagingClient, platform_exec};
//!
//! let client = MessagingClient::new(platform_exec());
//! let error = Rc::new(RefCell::new(None));
//! let sink = Rc::clone(&error);
//! client.get_token(|_| {}, move |err| *sink.borrow_mut() = Some(err));
//! assert!(error.borrow().is_some());
//! ```

pub mod action;
pub mod channel;
pub mod client;
pub mod error;
pub mod exec;
pub mod stub;
pub mod value;

pub use action::{Action, SERVICE};
pub use channel::{ChannelOptions, Vibration};
pub use client::MessagingClient;
pub use error::BridgeError;
pub use exec::{Callbacks, Continuation, NativeCall, NativeExec};
pub use stub::StubExec;
pub use value::{ensure_boolean, is_truthy};

/// Executor for the current target.
pub fn platform_exec() -> Box<dyn NativeExec> {
    Box::new(StubExec)
}
