use thiserror::Error;

use crate::action::Action;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// No native implementation is linked for this target.
    #[error("{action} is unavailable on this platform")]
    PlatformUnavailable { action: Action },

    /// An action name outside the catalog.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// Arguments could not be converted to JSON.
    #[error("failed to encode arguments: {0}")]
    Encode(#[from] serde_json::Error),
}
