use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use zmon_client::model::Dashboard;
use zmon_client::{gateway, ClientError, Document, Gateway};

use super::helpers::{self, GlobalArgs};
use crate::output::{print_success, prompt, render, render_fields, spinner, theme, OutputFormat};

#[derive(Subcommand)]
pub enum DashboardCmd {
    /// Initialize a new dashboard YAML file
    Init(InitArgs),
    /// Get ZMON dashboard
    Get(GetArgs),
    /// Create/Update a single ZMON dashboard
    Update(UpdateArgs),
}

#[derive(clap::Args)]
pub struct InitArgs {
    #[arg(help = "YAML file to write")]
    yaml_file: PathBuf,
}

#[derive(clap::Args)]
pub struct GetArgs {
    #[arg(help = "Dashboard ID")]
    dashboard_id: i64,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    output: OutputFormat,
    #[arg(long, help = "Indent JSON output")]
    pretty: bool,
}

#[derive(clap::Args)]
pub struct UpdateArgs {
    #[arg(help = "Dashboard YAML file", value_parser = existing_file)]
    yaml_file: PathBuf,
}

fn existing_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("path '{s}' does not exist"))
    }
}

/// What `dashboard update` will do with a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DashboardAction {
    Create,
    Update(String),
}

impl DashboardAction {
    pub(crate) fn of(dashboard: &Document) -> Self {
        match gateway::document_id(dashboard) {
            Some(id) => Self::Update(id),
            None => Self::Create,
        }
    }

    pub(crate) fn message(&self) -> String {
        match self {
            Self::Create => "Creating new dashboard...".to_string(),
            Self::Update(id) => format!("Updating dashboard {id}..."),
        }
    }
}

pub async fn execute(cmd: DashboardCmd, global: &GlobalArgs) -> Result<()> {
    match cmd {
        DashboardCmd::Init(args) => init(args, global),
        DashboardCmd::Get(args) => {
            let (_, client) = helpers::connect(global)?;
            get(&client, args).await
        }
        DashboardCmd::Update(args) => {
            let (_, client) = helpers::connect(global)?;
            update(&client, args).await
        }
    }
}

fn init(args: InitArgs, global: &GlobalArgs) -> Result<()> {
    let user = helpers::template_user(global)?;

    let name = prompt::text("Dashboard name", Some("Example dashboard"))?;
    let teams = prompt::text("Alert Teams (comma separated)", Some("Team1, Team2"))?;

    let dashboard = Dashboard::template(&name, parse_teams(&teams), &user);
    helpers::write_yaml(&args.yaml_file, &dashboard)?;
    print_success(&format!("Wrote {}", args.yaml_file.display()));
    Ok(())
}

async fn get<G: Gateway>(gw: &G, args: GetArgs) -> Result<()> {
    let sp = spinner::create("Retrieving dashboard...");
    let dashboard = gw.get_dashboard(args.dashboard_id).await;
    spinner::finish_clear(&sp);

    let dashboard =
        dashboard.with_context(|| format!("retrieving dashboard {}", args.dashboard_id))?;
    println!(
        "{}",
        render(&dashboard, args.output, args.pretty, render_fields)?
    );
    Ok(())
}

async fn update<G: Gateway>(gw: &G, args: UpdateArgs) -> Result<()> {
    let dashboard = helpers::read_document(&args.yaml_file)?;
    let action = DashboardAction::of(&dashboard);

    theme::print_dim(&action.message());
    let url = save_dashboard(gw, dashboard).await.with_context(|| match &action {
        DashboardAction::Create => "creating dashboard".to_string(),
        DashboardAction::Update(id) => format!("updating dashboard {id}"),
    })?;
    print_success(&url);
    Ok(())
}

/// Splits a comma separated team list, trimming each entry.
pub(crate) fn parse_teams(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) async fn save_dashboard<G: Gateway>(
    gw: &G,
    dashboard: Document,
) -> Result<String, ClientError> {
    let id = gw.update_dashboard(dashboard).await?;
    Ok(gw.dashboard_url(&id))
}
