mod cmd;
mod output;
#[cfg(test)]
mod tests;

use std::process::ExitCode;

use clap::{ArgAction, Parser};
use cmd::Commands;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "zmon", version, about = "ZMON command line interface")]
pub struct Opts {
    #[clap(subcommand)]
    cmd: Commands,

    #[arg(long, global = true, help = "Path to config file (default ~/.zmon-cli.yaml)")]
    config: Option<String>,

    #[arg(long, global = true, env = "ZMON_URL", help = "ZMON base URL (overrides config)")]
    url: Option<String>,

    #[arg(
        long,
        global = true,
        env = "ZMON_TOKEN",
        hide_env_values = true,
        help = "API token (overrides config)"
    )]
    token: Option<String>,

    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

impl Opts {
    pub fn log_filter(&self) -> EnvFilter {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let opts = Opts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(opts.log_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cmd::run(opts).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !e.is::<cmd::helpers::Reported>() {
                output::print_error(&format!("{e:#}"));
            }
            ExitCode::FAILURE
        }
    }
}
