use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Endpoint configuration field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("Secret key is not valid hex")]
    MalformedSecretKey(#[source] hex::FromHexError),

    #[error("Secret key decodes to {0} bytes, expected 16")]
    InvalidKeyLength(usize),

    #[error("Host '{0}' is not an absolute http(s) url")]
    UnsupportedHost(String),

    #[error("Failed to parse '{url}' as a url")]
    MalformedUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
