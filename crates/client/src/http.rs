use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::gateway::{self, id_text, Document, Gateway};

pub const ZMON_USER_AGENT: &str = concat!("zmon-cli/", env!("CARGO_PKG_VERSION"));

const ALERT_DEF: &str = "alert-definitions";
const ACTIVE_ALERT_DEF: &str = "checks/all-active-alert-definitions";
const DASHBOARD: &str = "dashboard";

/// [`Gateway`] backed by the ZMON REST API.
#[derive(Debug)]
pub struct ZmonClient {
    base_url: String,
    basic_auth: Option<(String, Option<String>)>,
    http: reqwest::Client,
}

impl ZmonClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(ZMON_USER_AGENT));

        let mut basic_auth = None;
        match (&config.token, &config.username) {
            (Some(token), _) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|_| ClientError::argument("token contains invalid characters"))?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            (None, Some(username)) => {
                basic_auth = Some((username.clone(), config.password.clone()));
            }
            (None, None) => {}
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(!config.verify)
            .build()?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            basic_auth,
            http,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1/{path}", self.base_url)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!(%method, url, "zmon request");
        let req = self.http.request(method, url);
        match &self.basic_auth {
            Some((user, password)) => req.basic_auth(user, password.as_deref()),
            None => req,
        }
    }

    async fn checked(req: RequestBuilder) -> Result<Response, ClientError> {
        let resp = req.send().await?;
        let status = resp.status();
        debug!(status = status.as_u16(), url = %resp.url(), "zmon response");

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(resp.url().path().to_string()));
        }
        if status == StatusCode::BAD_REQUEST {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Argument(body));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }

    async fn json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, ClientError> {
        let bytes = Self::checked(req).await?.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[derive(serde::Deserialize)]
struct ActiveAlertDefinitions {
    #[serde(default)]
    alert_definitions: Vec<Document>,
}

#[async_trait]
impl Gateway for ZmonClient {
    async fn get_alert_definition(&self, id: i64) -> Result<Document, ClientError> {
        let url = self.endpoint(&format!("{ALERT_DEF}/{id}"));
        Self::json(self.request(Method::GET, &url)).await
    }

    async fn get_alert_definitions(&self) -> Result<Vec<Document>, ClientError> {
        let url = self.endpoint(ACTIVE_ALERT_DEF);
        let resp: ActiveAlertDefinitions = Self::json(self.request(Method::GET, &url)).await?;
        Ok(resp.alert_definitions)
    }

    async fn create_alert_definition(&self, mut alert: Document) -> Result<Document, ClientError> {
        gateway::prepare_new_alert(&mut alert)?;
        let url = self.endpoint(ALERT_DEF);
        Self::json(self.request(Method::POST, &url).json(&alert)).await
    }

    async fn update_alert_definition(&self, alert: Document) -> Result<Document, ClientError> {
        let id = gateway::prepare_alert_update(&alert)?;
        let url = self.endpoint(&format!("{ALERT_DEF}/{id}"));
        Self::json(self.request(Method::PUT, &url).json(&alert)).await
    }

    async fn delete_alert_definition(&self, id: i64) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("{ALERT_DEF}/{id}"));
        Self::checked(self.request(Method::DELETE, &url)).await?;
        Ok(())
    }

    async fn get_dashboard(&self, id: i64) -> Result<Document, ClientError> {
        let url = self.endpoint(&format!("{DASHBOARD}/{id}"));
        Self::json(self.request(Method::GET, &url)).await
    }

    async fn update_dashboard(&self, dashboard: Document) -> Result<String, ClientError> {
        let url = match gateway::document_id(&dashboard) {
            Some(id) => self.endpoint(&format!("{DASHBOARD}/{id}")),
            None => self.endpoint(DASHBOARD),
        };
        let id: Value = Self::json(self.request(Method::POST, &url).json(&dashboard)).await?;
        id_text(&id).ok_or_else(|| ClientError::Decode(format!("unexpected dashboard id: {id}")))
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
