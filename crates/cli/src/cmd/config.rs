use anyhow::{Context, Result};
use clap::Subcommand;
use zmon_client::config::{self, ClientConfig};

use super::helpers::{self, GlobalArgs};
use crate::output::{print_success, prompt, theme};

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Interactively write the configuration file
    Init,
    /// Show the effective configuration
    Show,
    /// Print the configuration file path
    Path,
}

pub fn execute(cmd: ConfigCmd, global: &GlobalArgs) -> Result<()> {
    match cmd {
        ConfigCmd::Init => init(global),
        ConfigCmd::Show => show(global),
        ConfigCmd::Path => {
            println!("{}", helpers::config_path(global.config.as_deref()).display());
            Ok(())
        }
    }
}

fn init(global: &GlobalArgs) -> Result<()> {
    let path = helpers::config_path(global.config.as_deref());
    let existing = helpers::load_config(global).ok();

    let default_url = global
        .url
        .clone()
        .or_else(|| existing.as_ref().map(|c| c.url.clone()));
    let default_user = existing
        .as_ref()
        .and_then(|c| c.user.clone())
        .or_else(|| std::env::var("USER").ok());

    let url = prompt::text("ZMON URL", default_url.as_deref())?;
    let token = match &global.token {
        Some(token) => token.clone(),
        None => prompt::secret("Token (leave empty for none)")?,
    };
    let user = prompt::text("User name", default_user.as_deref())?;

    let mut cfg = existing.unwrap_or_else(|| ClientConfig::new(url.clone()));
    cfg.url = url;
    cfg.token = Some(token).filter(|t| !t.is_empty());
    cfg.user = Some(user).filter(|u| !u.is_empty());

    config::save_to_file(&path, &cfg)
        .with_context(|| format!("saving config to {}", path.display()))?;
    print_success(&format!("Configuration written to {}", path.display()));
    Ok(())
}

fn show(global: &GlobalArgs) -> Result<()> {
    let cfg = helpers::load_config(global)?;

    theme::print_header("ZMON Configuration");
    theme::print_kv("URL", &cfg.url);
    theme::print_kv("User", cfg.user_or_unknown());
    theme::print_kv("Token", mask(cfg.token.as_deref()));
    if let Some(username) = &cfg.username {
        theme::print_kv("Basic auth user", username);
    }
    theme::print_kv("Verify TLS", &cfg.verify.to_string());
    theme::print_kv("Timeout", &format!("{}s", cfg.timeout_secs));
    println!();
    Ok(())
}

pub(crate) fn mask(secret: Option<&str>) -> &'static str {
    match secret {
        Some(s) if !s.is_empty() => "********",
        _ => "<not set>",
    }
}
