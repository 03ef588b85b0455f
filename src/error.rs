use std::io;
use std::path::PathBuf;

/// Failure to turn a `vmess://` payload into link fields.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("vmess payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("vmess payload is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("vmess payload is not a json object")]
    NotAnObject,
    #[error("vmess payload is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("vmess link has no `://` separator")]
    NoScheme,
}

/// Errors of a single compilation. None of them should stop the caller from
/// moving on to the next link.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("malformed link: {0}")]
    MalformedLink(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("write {path:?} failed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("encode config document failed: {0}")]
    Encode(#[source] serde_json::Error),
}

impl CompileError {
    pub(crate) fn malformed<S: Into<String>>(reason: S) -> Self {
        CompileError::MalformedLink(reason.into())
    }

    pub(crate) fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        CompileError::Io {
            path: path.into(),
            source,
        }
    }
}


/// Failure to read a compile options file.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("read options {path:?} failed: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parse options {path:?} failed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
