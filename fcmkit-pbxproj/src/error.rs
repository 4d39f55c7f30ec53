use thiserror::Error;

/// Errors produced while reading a project file.
#[derive(Debug, Error)]
pub enum PbxprojError {
    /// The input is not a well-formed NeXTSTEP property list.
    #[error("parse error at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PbxprojError {
    pub(crate) fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        PbxprojError::Parse {
            line,
            column,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PbxprojError>;
