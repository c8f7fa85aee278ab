use crate::error::configuration::ConfigurationError;
use crate::error::crypto::{CryptoError, EncryptPayloadError};
use crate::error::encoding::EncodingError;
use crate::error::remote::RemoteError;
use crate::error::transport::TransportError;
use thiserror::Error;

/// The first failure met while building, sending or interpreting a request.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl From<EncryptPayloadError> for RequestError {
    fn from(err: EncryptPayloadError) -> Self {
        match err {
            EncryptPayloadError::InvalidKey(e) => RequestError::Configuration(e),
            EncryptPayloadError::Crypto(e) => RequestError::Crypto(e),
        }
    }
}
