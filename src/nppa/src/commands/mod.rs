use clap::Subcommand;
use nppa::api::NppaApi;
use nppa_core::config::model::endpoint::{EndpointConfig, EndpointSuite};
use nppa_core::http::context::CallContext;
use nppa_core::http::transport::{build_transport, HttpTransport};
use serde::Serialize;
use slog::Logger;
use std::sync::Arc;

mod auth;
mod query;
mod report;

/// Everything a subcommand needs: the loaded endpoints, the root logger and
/// the context every call runs under.
pub struct CommandEnv {
    suite: EndpointSuite,
    log: Logger,
    ctx: CallContext,
}

impl CommandEnv {
    pub fn new(suite: EndpointSuite, log: Logger, ctx: CallContext) -> Self {
        Self { suite, log, ctx }
    }

    pub fn log(&self) -> &Logger {
        &self.log
    }

    pub fn ctx(&self) -> &CallContext {
        &self.ctx
    }

    pub fn suite(&self) -> &EndpointSuite {
        &self.suite
    }

    /// Builds the api wrapper and its transport for one endpoint.
    pub fn connect(
        &self,
        config: &EndpointConfig,
    ) -> anyhow::Result<(NppaApi, Arc<dyn HttpTransport>)> {
        let transport = build_transport(config)?;
        Ok((NppaApi::new(config.clone(), self.log.clone()), transport))
    }
}

#[derive(Subcommand)]
pub enum NppaCommand {
    Auth(auth::AuthOpts),
    Query(query::QueryOpts),
    Report(report::ReportOpts),
}

pub async fn exec(env: &CommandEnv, cmd: NppaCommand) -> anyhow::Result<()> {
    match cmd {
        NppaCommand::Auth(v) => auth::exec(env, v).await,
        NppaCommand::Query(v) => query::exec(env, v).await,
        NppaCommand::Report(v) => report::exec(env, v).await,
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
