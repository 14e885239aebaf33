use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Yaml,
    Json,
}

pub fn render_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

pub fn render_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let text = serde_yaml::to_string(value)?;
    Ok(text.trim_end().to_string())
}

/// Renders documents in the chosen format. `table` builds the text form.
pub fn render<T, F>(value: &T, format: OutputFormat, pretty: bool, table: F) -> Result<String>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Text => Ok(table(value)),
        OutputFormat::Yaml => render_yaml(value),
        OutputFormat::Json => render_json(value, pretty),
    }
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}
