use crate::commands::{print_json, CommandEnv};
use clap::Parser;

/// Looks up the result of an authentication that was still processing.
#[derive(Parser)]
pub struct QueryOpts {
    /// The account id the authentication was submitted for.
    #[arg(long)]
    ai: String,
}

pub async fn exec(env: &CommandEnv, opts: QueryOpts) -> anyhow::Result<()> {
    let (api, transport) = env.connect(&env.suite().real_name_query)?;
    let result = api
        .real_name_auth_query(env.ctx(), &transport, &opts.ai)
        .await?;
    print_json(&result)
}
