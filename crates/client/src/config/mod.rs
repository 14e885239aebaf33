mod loader;
mod schema;

pub use loader::{load_from_file, load_from_str, save_to_file, validate, LoadError};
pub use schema::{ClientConfig, UNKNOWN_USER};
