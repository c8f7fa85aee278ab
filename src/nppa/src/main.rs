use crate::commands::CommandEnv;
use anyhow::{Context, Error};
use clap::{ArgAction, Parser};
use nppa::logger::{create_root_logger, LoggingMode};
use nppa_core::config::model::endpoint::EndpointSuite;
use nppa_core::http::context::CallContext;
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

mod commands;

/// Client for the NPPA anti-addiction real-name authentication and player behavior APIs.
#[derive(Parser)]
#[command(name = "nppa", version, arg_required_else_help = true)]
pub struct CliOpts {
    /// Displays detailed information about operations. -vv also logs every request.
    #[arg(long, short, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppresses informational messages. -qq limits to errors only; -qqq disables them all.
    #[arg(long, short, action = ArgAction::Count, global = true)]
    quiet: u8,

    /// The logging mode to use. You can log to stderr, a file, or both.
    #[arg(long = "log", default_value = "stderr", value_parser = ["stderr", "tee", "file"], global = true)]
    logmode: String,

    /// The file to log to, if logging to a file (see --log).
    #[arg(long, global = true)]
    logfile: Option<String>,

    /// Path to the JSON file describing the three regulator endpoints.
    #[arg(long, env = "NPPA_CONFIG", default_value = "nppa.json", global = true)]
    config: PathBuf,

    /// Gives up on the request after this many seconds.
    #[arg(long, global = true, value_name = "SECONDS")]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: commands::NppaCommand,
}

fn setup_logging(opts: &CliOpts) -> std::io::Result<slog::Logger> {
    let verbose_level = opts.verbose as i64 - opts.quiet as i64;

    let logfile = || PathBuf::from(opts.logfile.as_deref().unwrap_or("nppa.log"));
    let mode = match opts.logmode.as_str() {
        "tee" => LoggingMode::Tee(logfile()),
        "file" => LoggingMode::File(logfile()),
        _ => LoggingMode::Stderr,
    };

    create_root_logger(verbose_level, mode)
}

fn inner_main() -> anyhow::Result<()> {
    let opts = CliOpts::parse();
    let log = setup_logging(&opts).context("Failed to set up logging.")?;

    let suite = EndpointSuite::load(&opts.config)?;
    let runtime = Runtime::new().context("Failed to start the async runtime.")?;

    let token = CancellationToken::new();
    let mut ctx = CallContext::new().with_cancellation(token.clone());
    if let Some(seconds) = opts.timeout {
        ctx = ctx.with_timeout(Duration::from_secs(seconds));
    }

    let env = CommandEnv::new(suite, log, ctx);
    runtime.block_on(async {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        });
        slog::trace!(env.log(), "Trace mode enabled. Lots of logs coming up.");
        commands::exec(&env, opts.command).await
    })
}

fn print_error(err: Error) {
    for (level, cause) in err.chain().enumerate() {
        let prefix = if level == 0 { "Error" } else { "Caused by" };
        eprintln!("{prefix}: {cause}");
    }
}

fn main() {
    if let Err(err) = inner_main() {
        print_error(err);
        std::process::exit(255);
    }
}

#[cfg(test)]
mod tests {
    use crate::CliOpts;
    use clap::CommandFactory;

    #[test]
    fn validate_cli() {
        CliOpts::command().debug_assert();
    }
}
