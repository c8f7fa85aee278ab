use crate::commands::{print_json, CommandEnv};
use anyhow::bail;
use clap::Parser;
use nppa::models::BehaviorCollection;
use nppa_core::json::load_json_file;
use slog::warn;
use std::path::PathBuf;

/// Reports a batch of player login and logout events.
#[derive(Parser)]
pub struct ReportOpts {
    /// JSON file holding an array of behavior collections.
    #[arg(long)]
    collections: PathBuf,
}

pub async fn exec(env: &CommandEnv, opts: ReportOpts) -> anyhow::Result<()> {
    let collections: Vec<BehaviorCollection> = load_json_file(&opts.collections)?;
    if collections.is_empty() {
        bail!("No events found in {}.", opts.collections.display());
    }

    let (api, transport) = env.connect(&env.suite().player_behavior)?;
    let rejected = api
        .player_behavior_report(env.ctx(), &transport, collections)
        .await?;
    if !rejected.is_empty() {
        warn!(env.log(), "Some events were rejected"; "count" => rejected.len());
    }
    print_json(&rejected)
}

#[cfg(test)]
mod test {
    use super::*;
    use nppa::logger::discard_logger;
    use nppa_core::config::model::endpoint::EndpointSuite;
    use nppa_core::http::context::CallContext;

    #[tokio::test]
    async fn empty_batch_is_refused_before_sending() {
        let dir = tempfile::tempdir().unwrap();
        let events = dir.path().join("events.json");
        std::fs::write(&events, "[]").unwrap();

        let env = CommandEnv::new(EndpointSuite::default(), discard_logger(), CallContext::new());
        let err = exec(&env, ReportOpts { collections: events })
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("No events found in"));
    }
}
