use std::path::Path;

use super::schema::ClientConfig;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("validation: {0}")]
    Validation(String),
}

pub fn load_from_file(path: &Path) -> Result<ClientConfig, LoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

pub fn load_from_str(yaml: &str) -> Result<ClientConfig, LoadError> {
    let cfg: ClientConfig = serde_yaml::from_str(yaml)?;
    validate(&cfg)?;
    Ok(cfg)
}

pub fn save_to_file(path: &Path, cfg: &ClientConfig) -> Result<(), LoadError> {
    validate(cfg)?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, serde_yaml::to_string(cfg)?)?;
    Ok(())
}

pub fn validate(cfg: &ClientConfig) -> Result<(), LoadError> {
    if cfg.url.is_empty() {
        return Err(LoadError::Validation("url must not be empty".into()));
    }
    if !(cfg.url.starts_with("http://") || cfg.url.starts_with("https://")) {
        return Err(LoadError::Validation(format!(
            "url must start with http:// or https://, got {}",
            cfg.url
        )));
    }
    if cfg.timeout_secs == 0 {
        return Err(LoadError::Validation("timeout_secs must be > 0".into()));
    }
    Ok(())
}
