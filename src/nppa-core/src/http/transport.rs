use crate::config::model::endpoint::EndpointConfig;
use crate::error::reqwest::WrappedReqwestError;
use crate::error::transport::TransportError;
use crate::error::transport::TransportError::{BuildClientFailed, SendFailed};
use async_trait::async_trait;
use std::sync::Arc;

/// Sends a prepared request and hands back the response head.
///
/// Implementations are shared between concurrent calls and are expected to
/// pool connections.
#[async_trait]
pub trait HttpTransport: Sync + Send {
    async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response, TransportError>;
}

#[async_trait]
impl HttpTransport for reqwest::Client {
    async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response, TransportError> {
        reqwest::Client::execute(self, request)
            .await
            .map_err(|err| SendFailed(WrappedReqwestError(err)))
    }
}

/// Builds the process-wide client for `config`.
///
/// Certificate verification is only disabled when the endpoint asks for it.
pub fn build_transport(config: &EndpointConfig) -> Result<Arc<dyn HttpTransport>, TransportError> {
    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(config.skip_tls_verify)
        .build()
        .map_err(|err| BuildClientFailed(WrappedReqwestError(err)))?;
    Ok(Arc::new(client))
}
