use std::path::PathBuf;

use thiserror::Error;

pub type LiteralResult<T> = Result<T, LiteralError>;

#[derive(Debug, Error)]
pub enum LiteralError {
    #[error("failed to serialize option structure: {0}")]
    Serialization(String),

    #[error("failed to parse object literal at byte {offset}: {message}")]
    Parse { offset: usize, message: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("i/o failure on `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LiteralError {
    pub(crate) fn parse(offset: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            offset,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for LiteralError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
