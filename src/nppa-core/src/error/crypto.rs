use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Secure random source is exhausted")]
    RandomSourceExhausted(#[source] ring::error::Unspecified),

    #[error("Failed to encrypt content")]
    EncryptContentFailed(#[source] aes_gcm::Error),

    #[error("Failed to decrypt content")]
    DecryptContentFailed(#[source] aes_gcm::Error),

    #[error("Envelope data is not valid base64")]
    MalformedEnvelope(#[source] base64::DecodeError),

    #[error("Envelope holds {0} bytes, which is shorter than nonce and tag")]
    EnvelopeTooShort(usize),
}

/// Failure of a standalone payload encryption: either the key itself is
/// unusable or the cipher could not do its work.
#[derive(Error, Debug)]
pub enum EncryptPayloadError {
    #[error(transparent)]
    InvalidKey(#[from] crate::error::configuration::ConfigurationError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
