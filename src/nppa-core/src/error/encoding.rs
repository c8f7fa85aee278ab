use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("Failed to serialize request body")]
    SerializeBodyFailed(#[source] serde_json::Error),

    #[error("Failed to deserialize response body")]
    DeserializeResponseFailed(#[source] serde_json::Error),

    #[error("Invalid value for header '{name}'")]
    InvalidHeaderValue {
        name: &'static str,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
}
