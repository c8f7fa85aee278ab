use crate::commands::{print_json, CommandEnv};
use clap::Parser;

/// Submits a player's real name and id number for authentication.
#[derive(Parser)]
pub struct AuthOpts {
    /// The game's internal account id for the player.
    #[arg(long)]
    ai: String,

    /// The player's real name.
    #[arg(long)]
    name: String,

    /// The player's resident id number.
    #[arg(long)]
    id_num: String,
}

pub async fn exec(env: &CommandEnv, opts: AuthOpts) -> anyhow::Result<()> {
    let (api, transport) = env.connect(&env.suite().real_name_auth)?;
    let result = api
        .real_name_auth(env.ctx(), &transport, &opts.ai, &opts.name, &opts.id_num)
        .await?;
    print_json(&result)
}
