use thiserror::Error;

/// A business-level rejection reported in the `errcode` field of a response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("errcode: {code}, errmsg: {message}")]
pub struct RemoteError {
    pub code: i64,
    pub message: String,
}
