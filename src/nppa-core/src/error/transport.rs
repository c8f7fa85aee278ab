use crate::error::reqwest::WrappedReqwestError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request was cancelled by the caller")]
    Cancelled,

    #[error("Request did not complete within {0:?}")]
    DeadlineExceeded(Duration),

    #[error("Failed to send request")]
    SendFailed(#[source] WrappedReqwestError),

    #[error("Failed to read response body")]
    ReadBodyFailed(#[source] WrappedReqwestError),

    #[error("Failed to build http client")]
    BuildClientFailed(#[source] WrappedReqwestError),
}

impl TransportError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TransportError::Cancelled)
    }
}
