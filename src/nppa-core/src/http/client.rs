use crate::config::model::credentials::Credentials;
use crate::config::model::endpoint::EndpointConfig;
use crate::crypto::nonce::{NonceSource, SystemNonceSource};
use crate::crypto::PayloadCipher;
use crate::error::configuration::ConfigurationError;
use crate::error::configuration::ConfigurationError::MalformedUrl;
use crate::error::encoding::EncodingError;
use crate::error::request::RequestError;
use crate::error::reqwest::WrappedReqwestError;
use crate::error::transport::TransportError::ReadBodyFailed;
use crate::http::context::CallContext;
use crate::http::transport::HttpTransport;
use crate::http::{
    APP_ID_HEADER, BIZ_ID_HEADER, CONTENT_TYPE_JSON, SIGN_HEADER, TIMESTAMP_HEADER,
};
use crate::sign::{QueryParams, SignableParams, Timestamp};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Body, Method, Request};
use std::sync::Arc;
use url::Url;

/// A request-scoped handle on one regulator endpoint.
///
/// Holds configuration only, so building one per call is cheap; the
/// transport behind it is the long-lived part and should be shared.
pub struct NppaClient {
    credentials: Credentials,
    host: String,
    transport: Arc<dyn HttpTransport>,
    nonces: Arc<dyn NonceSource>,
}

impl NppaClient {
    pub fn new(
        config: &EndpointConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            credentials: config.credentials(),
            host: config.host.clone(),
            transport,
            nonces: Arc::new(SystemNonceSource::new()),
        })
    }

    pub fn with_nonce_source(mut self, nonces: Arc<dyn NonceSource>) -> Self {
        self.nonces = nonces;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Sends a signed request and returns the raw response body.
    ///
    /// The status code is not inspected; interpreting the body is up to the
    /// caller. Nothing is retried.
    pub async fn execute(
        &self,
        ctx: &CallContext,
        method: Method,
        path: &str,
        query: &QueryParams,
        body: &[u8],
    ) -> Result<Vec<u8>, RequestError> {
        let request = self.prepare(method, path, query, body, Timestamp::now())?;

        let bytes = ctx
            .run(async {
                let response = self.transport.execute(request).await?;
                response
                    .bytes()
                    .await
                    .map_err(|err| ReadBodyFailed(WrappedReqwestError(err)))
            })
            .await?;

        Ok(bytes.to_vec())
    }

    /// Builds the outbound request for `timestamp`: target url, encrypted body,
    /// identity headers and signature.
    ///
    /// An empty `body` is sent as zero bytes and signed as an empty string; it
    /// is never wrapped in an envelope.
    pub fn prepare(
        &self,
        method: Method,
        path: &str,
        query: &QueryParams,
        body: &[u8],
        timestamp: Timestamp,
    ) -> Result<Request, RequestError> {
        let params = SignableParams::augment(query, &self.credentials, timestamp);
        let url = self.target_url(path, &params)?;

        let body = if body.is_empty() {
            String::new()
        } else {
            let cipher = PayloadCipher::new(&self.credentials.secret_key, self.nonces.clone())?;
            cipher.encrypt(body)?.to_json()?
        };
        let signature = params.sign(self.credentials.secret_key.as_str(), &body);

        let mut request = Request::new(method, url);
        let headers = request.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
        insert_header(headers, APP_ID_HEADER, params.app_id())?;
        insert_header(headers, BIZ_ID_HEADER, params.biz_id())?;
        insert_header(headers, TIMESTAMP_HEADER, &params.timestamp().to_string())?;
        insert_header(headers, SIGN_HEADER, signature.as_str())?;
        *request.body_mut() = Some(Body::from(body.into_bytes()));

        Ok(request)
    }

    fn target_url(&self, path: &str, params: &SignableParams) -> Result<Url, ConfigurationError> {
        let raw = format!("{}{}", self.host, path);
        let mut url = Url::parse(&raw).map_err(|source| MalformedUrl {
            url: raw.clone(),
            source,
        })?;
        if params.has_query() {
            url.query_pairs_mut().extend_pairs(params.query_pairs());
        }
        Ok(url)
    }
}

fn insert_header(
    headers: &mut HeaderMap,
    name: &'static str,
    value: &str,
) -> Result<(), EncodingError> {
    let value = HeaderValue::from_str(value)
        .map_err(|source| EncodingError::InvalidHeaderValue { name, source })?;
    headers.insert(HeaderName::from_static(name), value);
    Ok(())
}
