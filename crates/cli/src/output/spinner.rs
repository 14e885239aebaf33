use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "];

/// Spinner on stderr; hidden automatically when stderr is not a terminal.
pub fn create(msg: &str) -> ProgressBar {
    let sp = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan.bold} {msg}") {
        sp.set_style(style.tick_strings(TICKS));
    }
    sp.set_message(msg.to_string());
    sp.enable_steady_tick(Duration::from_millis(80));
    sp
}

pub fn finish_clear(sp: &ProgressBar) {
    sp.finish_and_clear();
}
