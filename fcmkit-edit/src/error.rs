//! Error types for fcmkit-edit.
//!
//! Missing generated files are not errors: patches warn and report
//! "not modified". Everything here aborts the hook.

use camino::Utf8PathBuf;
use thiserror::Error;

/// The top-level error type for patch operations.
#[derive(Debug, Error)]
pub enum EditError {
    /// A structured file could not be parsed. Nothing was written to it.
    #[error("failed to parse {path}: {message}")]
    Parse {
        path: Utf8PathBuf,
        message: String,
    },

    /// The Xcode project descriptor could not be parsed. Nothing was written.
    #[error("failed to parse {path}: {source}")]
    Project {
        path: Utf8PathBuf,
        #[source]
        source: fcmkit_pbxproj::PbxprojError,
    },

    /// A configuration variable holds a value the patch cannot use.
    #[error("The value \"{value}\" for {variable} is not a valid semantic version format")]
    InvalidConfiguration { variable: String, value: String },

    /// I/O and other runtime failures, with path context attached.
    #[error("runtime error: {0}")]
    Runtime(#[from] anyhow::Error),
}

impl EditError {
    pub(crate) fn parse(path: impl Into<Utf8PathBuf>, message: impl ToString) -> Self {
        EditError::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Returns the recommended exit code for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Result type alias using EditError.
pub type EditResult<T> = Result<T, EditError>;
