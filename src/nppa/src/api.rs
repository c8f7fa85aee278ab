use crate::models::{
    BehaviorCollection, BehaviorReportData, BehaviorReportRequest, BehaviorReportResult,
    RealNameAuthData, RealNameAuthRequest, RealNameAuthResult,
};
use nppa_core::config::model::endpoint::EndpointConfig;
use nppa_core::error::encoding::EncodingError;
use nppa_core::error::request::RequestError;
use nppa_core::http::client::NppaClient;
use nppa_core::http::context::CallContext;
use nppa_core::http::response::parse_response;
use nppa_core::http::transport::HttpTransport;
use nppa_core::http::Method;
use nppa_core::sign::QueryParams;
use serde::Serialize;
use slog::{debug, info, Logger};
use std::sync::Arc;

/// One regulator endpoint and the business call made against it.
pub struct NppaApi {
    config: EndpointConfig,
    log: Logger,
}

impl NppaApi {
    pub fn new(config: EndpointConfig, log: Logger) -> Self {
        let log = log.new(slog::o!("api" => config.api.clone()));
        Self { config, log }
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    fn client(&self, transport: &Arc<dyn HttpTransport>) -> Result<NppaClient, RequestError> {
        Ok(NppaClient::new(&self.config, transport.clone())?)
    }

    /// Submits a player's name and id number for verification.
    pub async fn real_name_auth(
        &self,
        ctx: &CallContext,
        transport: &Arc<dyn HttpTransport>,
        ai: &str,
        name: &str,
        id_num: &str,
    ) -> Result<RealNameAuthResult, RequestError> {
        let client = self.client(transport)?;
        let body = to_body(&RealNameAuthRequest {
            ai: ai.to_string(),
            name: name.to_string(),
            id_num: id_num.to_string(),
        })?;
        debug!(self.log, "RealNameAuth request"; "ai" => ai);

        let response = client
            .execute(ctx, Method::POST, &self.config.api, &QueryParams::new(), &body)
            .await?;
        info!(self.log, "RealNameAuth response"; "body" => String::from_utf8_lossy(&response).into_owned());

        let data: RealNameAuthData = parse_response(&response)?;
        Ok(data.result)
    }

    /// Looks up the outcome of an earlier authentication that was still processing.
    pub async fn real_name_auth_query(
        &self,
        ctx: &CallContext,
        transport: &Arc<dyn HttpTransport>,
        ai: &str,
    ) -> Result<RealNameAuthResult, RequestError> {
        let client = self.client(transport)?;
        let query = QueryParams::from([("ai".to_string(), ai.to_string())]);
        debug!(self.log, "RealNameAuthQuery request"; "ai" => ai);

        let response = client
            .execute(ctx, Method::GET, &self.config.api, &query, &[])
            .await?;
        info!(self.log, "RealNameAuthQuery response"; "body" => String::from_utf8_lossy(&response).into_owned());

        let data: RealNameAuthData = parse_response(&response)?;
        Ok(data.result)
    }

    /// Reports a batch of login/logout events. The returned list holds only the
    /// events the regulator rejected.
    pub async fn player_behavior_report(
        &self,
        ctx: &CallContext,
        transport: &Arc<dyn HttpTransport>,
        collections: Vec<BehaviorCollection>,
    ) -> Result<Vec<BehaviorReportResult>, RequestError> {
        let client = self.client(transport)?;
        let count = collections.len();
        let body = to_body(&BehaviorReportRequest { collections })?;
        debug!(self.log, "PlayerBehaviorReport request"; "collections" => count);

        let response = client
            .execute(ctx, Method::POST, &self.config.api, &QueryParams::new(), &body)
            .await?;
        info!(self.log, "PlayerBehaviorReport response"; "body" => String::from_utf8_lossy(&response).into_owned());

        let data: BehaviorReportData = parse_response(&response)?;
        Ok(data.results)
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Vec<u8>, EncodingError> {
    serde_json::to_vec(value).map_err(EncodingError::SerializeBodyFailed)
}
