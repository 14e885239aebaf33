pub mod banner;
pub mod format;
pub mod prompt;
pub mod spinner;
pub mod table;
pub mod theme;

pub use format::{print_error, print_success, render, OutputFormat};
pub use table::{render_alerts, render_fields};
