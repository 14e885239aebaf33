use serde::{Deserialize, Serialize};

pub const UNKNOWN_USER: &str = "unknown";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Recorded as `last_modified_by` on submitted documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default = "yes")]
    pub verify: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
            user: None,
            username: None,
            password: None,
            verify: yes(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn user_or_unknown(&self) -> &str {
        self.user
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(UNKNOWN_USER)
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn yes() -> bool {
    true
}
