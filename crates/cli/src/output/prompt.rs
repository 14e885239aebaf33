use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input, Password};

/// Reads a line from the terminal; an empty answer yields `default` when given.
pub fn text(prompt: &str, default: Option<&str>) -> Result<String> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt);
    if let Some(d) = default {
        input = input.default(d.to_string());
    }
    input
        .interact_text()
        .with_context(|| format!("reading \"{prompt}\""))
}

/// Hidden input; may be left empty.
pub fn secret(prompt: &str) -> Result<String> {
    Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .with_context(|| format!("reading \"{prompt}\""))
}
