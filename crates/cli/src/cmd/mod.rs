pub(crate) mod alert;
pub(crate) mod config;
pub(crate) mod dashboard;
pub(crate) mod helpers;
mod version;

use anyhow::Result;
use clap::Subcommand;

use helpers::GlobalArgs;

#[derive(Subcommand)]
pub enum Commands {
    /// Manage alert definitions
    #[command(subcommand)]
    AlertDefinitions(alert::AlertCmd),
    /// Manage ZMON dashboards
    #[command(subcommand)]
    Dashboard(dashboard::DashboardCmd),
    /// Manage the CLI configuration file
    #[command(subcommand)]
    Config(config::ConfigCmd),
    Version,
}

pub async fn run(opts: crate::Opts) -> Result<()> {
    let global = GlobalArgs {
        config: opts.config,
        url: opts.url,
        token: opts.token,
    };

    match opts.cmd {
        Commands::AlertDefinitions(cmd) => alert::execute(cmd, &global).await,
        Commands::Dashboard(cmd) => dashboard::execute(cmd, &global).await,
        Commands::Config(cmd) => config::execute(cmd, &global),
        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}
