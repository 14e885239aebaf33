use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::Value;
use tracing::info;
use zmon_client::model::AlertDefinition;
use zmon_client::{ClientError, Document, Gateway};

use super::helpers::{self, GlobalArgs, Reported};
use crate::output::{
    print_error, print_success, prompt, render, render_alerts, render_fields, spinner, theme,
    OutputFormat,
};

#[derive(Subcommand)]
pub enum AlertCmd {
    /// Initialize a new alert definition YAML file
    Init(InitArgs),
    /// Get a single alert definition
    Get(GetArgs),
    /// List all active alert definitions
    List(ListArgs),
    /// Filter active alert definitions
    Filter(FilterArgs),
    /// Create a single alert definition
    Create(FileArgs),
    /// Update a single alert definition
    Update(FileArgs),
    /// Delete a single alert definition
    Delete(DeleteArgs),
}

#[derive(clap::Args)]
pub struct InitArgs {
    #[arg(help = "YAML file to write")]
    yaml_file: PathBuf,
}

#[derive(clap::Args)]
pub struct GetArgs {
    #[arg(help = "Alert definition ID")]
    alert_id: i64,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    output: OutputFormat,
    #[arg(long, help = "Indent JSON output")]
    pretty: bool,
}

#[derive(clap::Args)]
pub struct ListArgs {
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
    #[arg(long, help = "Indent JSON output")]
    pretty: bool,
}

#[derive(clap::Args)]
pub struct FilterArgs {
    #[arg(help = "Field to match")]
    field: String,
    #[arg(help = "Value the field must equal")]
    value: String,
    #[command(flatten)]
    list: ListArgs,
}

#[derive(clap::Args)]
pub struct FileArgs {
    #[arg(help = "Alert definition YAML file")]
    yaml_file: PathBuf,
}

#[derive(clap::Args)]
pub struct DeleteArgs {
    #[arg(help = "Alert definition ID")]
    alert_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Submit {
    Create,
    Update,
}

pub async fn execute(cmd: AlertCmd, global: &GlobalArgs) -> Result<()> {
    if let AlertCmd::Init(args) = cmd {
        return init(args);
    }

    let (cfg, client) = helpers::connect(global)?;
    let user = cfg.user_or_unknown();

    match cmd {
        AlertCmd::Init(args) => init(args),
        AlertCmd::Get(args) => get(&client, args).await,
        AlertCmd::List(args) => list(&client, None, args).await,
        AlertCmd::Filter(args) => {
            let filter = Some((args.field.as_str(), args.value.as_str()));
            list(&client, filter, args.list).await
        }
        AlertCmd::Create(args) => submit(&client, args, user, Submit::Create).await,
        AlertCmd::Update(args) => submit(&client, args, user, Submit::Update).await,
        AlertCmd::Delete(args) => delete(&client, args).await,
    }
}

fn init(args: InitArgs) -> Result<()> {
    let name = prompt::text("Alert name", Some("Example Alert"))?;
    let check_id = prompt::text("Check ID", None)?;
    let team = prompt::text("(Responsible-) Team", Some("Example Team"))?;

    let alert = AlertDefinition::template(&name, &check_id, &team);
    helpers::write_yaml(&args.yaml_file, &alert)?;
    print_success(&format!("Wrote {}", args.yaml_file.display()));
    Ok(())
}

async fn get<G: Gateway>(gw: &G, args: GetArgs) -> Result<()> {
    let sp = spinner::create("Retrieving alert definition...");
    let alert = fetch_alert(gw, args.alert_id).await;
    spinner::finish_clear(&sp);

    let alert = alert.with_context(|| format!("retrieving alert definition {}", args.alert_id))?;
    println!("{}", render(&alert, args.output, args.pretty, render_fields)?);
    Ok(())
}

async fn list<G: Gateway>(gw: &G, filter: Option<(&str, &str)>, args: ListArgs) -> Result<()> {
    let msg = match filter {
        Some(_) => "Retrieving and filtering alert definitions...",
        None => "Retrieving active alert definitions...",
    };
    let sp = spinner::create(msg);
    let alerts = fetch_active_alerts(gw, filter).await;
    spinner::finish_clear(&sp);

    let alerts = alerts.context("retrieving alert definitions")?;
    if args.output == OutputFormat::Text {
        if alerts.is_empty() {
            theme::print_dim("No alert definitions found");
            return Ok(());
        }
        theme::print_header("Alert Definitions");
    }
    println!(
        "{}",
        render(alerts.as_slice(), args.output, args.pretty, render_alerts)?
    );
    Ok(())
}

async fn submit<G: Gateway>(gw: &G, args: FileArgs, user: &str, mode: Submit) -> Result<()> {
    let alert = helpers::read_document(&args.yaml_file)?;

    let msg = match mode {
        Submit::Create => "Creating alert definition...",
        Submit::Update => "Updating alert definition...",
    };
    let sp = spinner::create(msg);
    let result = submit_alert(gw, alert, user, mode).await;
    spinner::finish_clear(&sp);

    let url = submit_outcome(result, mode)?;
    print_success(&url);
    Ok(())
}

/// Rejected payloads are printed here and surface as [`Reported`], so `main`
/// exits non-zero without repeating the message.
pub(crate) fn submit_outcome(result: Result<String, ClientError>, mode: Submit) -> Result<String> {
    match result {
        Ok(url) => Ok(url),
        Err(ClientError::Argument(msg)) => {
            print_error(&msg);
            Err(Reported.into())
        }
        Err(e) => Err(e).context(match mode {
            Submit::Create => "creating alert definition",
            Submit::Update => "updating alert definition",
        }),
    }
}

async fn delete<G: Gateway>(gw: &G, args: DeleteArgs) -> Result<()> {
    let sp = spinner::create("Deleting alert definition...");
    let result = gw.delete_alert_definition(args.alert_id).await;
    spinner::finish_clear(&sp);

    result.with_context(|| format!("deleting alert definition {}", args.alert_id))?;
    info!(id = args.alert_id, "alert definition deleted");
    print_success(&format!("Deleted alert definition {}", args.alert_id));
    Ok(())
}

/// Fetches one alert definition with null-valued fields removed.
pub(crate) async fn fetch_alert<G: Gateway>(gw: &G, id: i64) -> Result<Document, ClientError> {
    let mut alert = gw.get_alert_definition(id).await?;
    strip_nulls(&mut alert);
    Ok(alert)
}

pub(crate) fn strip_nulls(doc: &mut Document) {
    doc.retain(|_, v| !v.is_null());
}

/// Active alert definitions, optionally narrowed to `field == value`,
/// each carrying its detail URL under `link`.
pub(crate) async fn fetch_active_alerts<G: Gateway>(
    gw: &G,
    filter: Option<(&str, &str)>,
) -> Result<Vec<Document>, ClientError> {
    let alerts = gw.get_alert_definitions().await?;
    let mut alerts = match filter {
        Some((field, value)) => filter_alerts(alerts, field, value),
        None => alerts,
    };
    for alert in &mut alerts {
        let link = gw.alert_details_url(alert);
        alert.insert("link".into(), Value::String(link));
    }
    Ok(alerts)
}

/// Keeps alerts whose `field` is a string equal to `value`. No coercion.
pub(crate) fn filter_alerts(alerts: Vec<Document>, field: &str, value: &str) -> Vec<Document> {
    alerts
        .into_iter()
        .filter(|alert| matches!(alert.get(field), Some(Value::String(s)) if s == value))
        .collect()
}

/// Stamps the user and sends the document. Returns the detail URL.
pub(crate) async fn submit_alert<G: Gateway>(
    gw: &G,
    mut alert: Document,
    user: &str,
    mode: Submit,
) -> Result<String, ClientError> {
    alert.insert("last_modified_by".into(), Value::String(user.to_string()));

    match mode {
        Submit::Create => {
            let created = gw.create_alert_definition(alert).await?;
            Ok(gw.alert_details_url(&created))
        }
        Submit::Update => {
            let url = gw.alert_details_url(&alert);
            gw.update_alert_definition(alert).await?;
            Ok(url)
        }
    }
}
