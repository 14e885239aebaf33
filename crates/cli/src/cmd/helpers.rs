use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use zmon_client::config::{self, ClientConfig};
use zmon_client::{Document, ZmonClient};

const CONFIG_FILE_NAME: &str = ".zmon-cli.yaml";

/// Flags shared by every subcommand.
#[derive(Debug, Default, Clone)]
pub struct GlobalArgs {
    pub config: Option<String>,
    pub url: Option<String>,
    pub token: Option<String>,
}

/// Marker for failures whose message was already shown to the user.
#[derive(Debug)]
pub struct Reported;

impl std::fmt::Display for Reported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "command failed")
    }
}

impl std::error::Error for Reported {}

pub fn default_config_path() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(CONFIG_FILE_NAME),
        None => PathBuf::from(CONFIG_FILE_NAME),
    }
}

pub fn config_path(config_flag: Option<&str>) -> PathBuf {
    config_flag
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Loads the config file and applies `--url`/`--token` on top of it.
/// A missing file is tolerated when `--url` is given.
pub fn load_config(global: &GlobalArgs) -> Result<ClientConfig> {
    let path = config_path(global.config.as_deref());

    let mut cfg = if path.exists() {
        config::load_from_file(&path)
            .with_context(|| format!("loading config from {}", path.display()))?
    } else if let Some(url) = &global.url {
        ClientConfig::new(url.clone())
    } else {
        bail!(
            "no configuration found at {}; run `zmon config init` or pass --url",
            path.display()
        );
    };

    if let Some(url) = &global.url {
        cfg.url = url.clone();
    }
    if let Some(token) = &global.token {
        cfg.token = Some(token.clone());
    }

    config::validate(&cfg).with_context(|| format!("invalid configuration ({})", path.display()))?;
    debug!(url = %cfg.url, "configuration loaded");
    Ok(cfg)
}

/// User recorded in generated templates. Falls back to `unknown` only when
/// there is no config file and no `--url`; a broken config is an error.
pub fn template_user(global: &GlobalArgs) -> Result<String> {
    let path = config_path(global.config.as_deref());
    if !path.exists() && global.url.is_none() {
        return Ok(config::UNKNOWN_USER.to_string());
    }
    Ok(load_config(global)?.user_or_unknown().to_string())
}

pub fn connect(global: &GlobalArgs) -> Result<(ClientConfig, ZmonClient)> {
    let cfg = load_config(global)?;
    let client = ZmonClient::new(&cfg).context("building API client")?;
    Ok((cfg, client))
}

/// Reads a YAML file whose top level must be a mapping.
pub fn read_document(path: &Path) -> Result<Document> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_document(&contents).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_document(yaml: &str) -> Result<Document> {
    let value = serde_yaml::from_str::<serde_yaml::Value>(yaml)?;
    match yaml_to_json(value)? {
        Value::Object(doc) => Ok(doc),
        other => bail!("expected a YAML mapping at top level, found {}", kind(&other)),
    }
}

/// JSON only has string keys and finite numbers; anything else is rejected
/// rather than silently altered.
fn yaml_to_json(value: serde_yaml::Value) -> Result<Value> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| anyhow!("unsupported number {n}: only finite numbers are allowed"))?
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        Yaml::Mapping(map) => {
            let mut doc = Document::new();
            for (key, value) in map {
                let key = match key {
                    Yaml::String(s) => s,
                    other => bail!("mapping keys must be strings, found {other:?}"),
                };
                doc.insert(key, yaml_to_json(value)?);
            }
            Value::Object(doc)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "nothing",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

pub fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = serde_yaml::to_string(value)?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}
