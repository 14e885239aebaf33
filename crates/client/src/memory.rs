use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::ClientError;
use crate::gateway::{self, Document, Gateway};

/// Requests observed by an [`InMemoryGateway`], in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetAlert(i64),
    ListAlerts,
    CreateAlert(Document),
    UpdateAlert(Document),
    DeleteAlert(i64),
    GetDashboard(i64),
    CreateDashboard(Document),
    UpdateDashboard(i64, Document),
}

#[derive(Default)]
struct Store {
    alerts: BTreeMap<i64, Document>,
    dashboards: BTreeMap<i64, Document>,
    next_id: i64,
    calls: Vec<Call>,
}

impl Store {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// [`Gateway`] holding alert definitions and dashboards in process memory.
/// Applies the same client-side validation as [`ZmonClient`](crate::ZmonClient).
#[derive(Clone)]
pub struct InMemoryGateway {
    base_url: String,
    store: Arc<Mutex<Store>>,
}

impl InMemoryGateway {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            store: Arc::new(Mutex::new(Store {
                next_id: 1000,
                ..Store::default()
            })),
        }
    }

    /// Stores an alert definition as-is under its numeric `id`.
    pub async fn seed_alert(&self, alert: Document) -> Result<i64, ClientError> {
        let id = numeric_id(&alert)?;
        self.store.lock().await.alerts.insert(id, alert);
        Ok(id)
    }

    pub async fn seed_dashboard(&self, dashboard: Document) -> Result<i64, ClientError> {
        let id = numeric_id(&dashboard)?;
        self.store.lock().await.dashboards.insert(id, dashboard);
        Ok(id)
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.store.lock().await.calls.clone()
    }

    pub async fn alert(&self, id: i64) -> Option<Document> {
        self.store.lock().await.alerts.get(&id).cloned()
    }

    pub async fn dashboard(&self, id: i64) -> Option<Document> {
        self.store.lock().await.dashboards.get(&id).cloned()
    }
}

fn numeric_id(doc: &Document) -> Result<i64, ClientError> {
    gateway::document_id(doc)
        .and_then(|id| id.parse().ok())
        .ok_or_else(|| ClientError::argument("document must have a numeric \"id\""))
}

fn is_active(alert: &Document) -> bool {
    alert
        .get("status")
        .and_then(Value::as_str)
        .map_or(true, |s| s == gateway::DEFAULT_ALERT_STATUS)
}

#[async_trait]
impl Gateway for InMemoryGateway {
    async fn get_alert_definition(&self, id: i64) -> Result<Document, ClientError> {
        let mut store = self.store.lock().await;
        store.calls.push(Call::GetAlert(id));
        store
            .alerts
            .get(&id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("alert definition {id}")))
    }

    async fn get_alert_definitions(&self) -> Result<Vec<Document>, ClientError> {
        let mut store = self.store.lock().await;
        store.calls.push(Call::ListAlerts);
        Ok(store.alerts.values().filter(|a| is_active(a)).cloned().collect())
    }

    async fn create_alert_definition(&self, mut alert: Document) -> Result<Document, ClientError> {
        let mut store = self.store.lock().await;
        store.calls.push(Call::CreateAlert(alert.clone()));
        gateway::prepare_new_alert(&mut alert)?;

        let id = store.allocate_id();
        alert.insert("id".into(), Value::from(id));
        store.alerts.insert(id, alert.clone());
        Ok(alert)
    }

    async fn update_alert_definition(&self, alert: Document) -> Result<Document, ClientError> {
        let mut store = self.store.lock().await;
        store.calls.push(Call::UpdateAlert(alert.clone()));
        gateway::prepare_alert_update(&alert)?;

        let id = numeric_id(&alert)?;
        match store.alerts.get_mut(&id) {
            Some(existing) => {
                *existing = alert.clone();
                Ok(alert)
            }
            None => Err(ClientError::NotFound(format!("alert definition {id}"))),
        }
    }

    async fn delete_alert_definition(&self, id: i64) -> Result<(), ClientError> {
        let mut store = self.store.lock().await;
        store.calls.push(Call::DeleteAlert(id));
        store
            .alerts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ClientError::NotFound(format!("alert definition {id}")))
    }

    async fn get_dashboard(&self, id: i64) -> Result<Document, ClientError> {
        let mut store = self.store.lock().await;
        store.calls.push(Call::GetDashboard(id));
        store
            .dashboards
            .get(&id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("dashboard {id}")))
    }

    async fn update_dashboard(&self, mut dashboard: Document) -> Result<String, ClientError> {
        let mut store = self.store.lock().await;

        if gateway::document_id(&dashboard).is_none() {
            store.calls.push(Call::CreateDashboard(dashboard.clone()));
            let id = store.allocate_id();
            dashboard.insert("id".into(), Value::from(id));
            store.dashboards.insert(id, dashboard);
            return Ok(id.to_string());
        }

        let id = numeric_id(&dashboard)?;
        store.calls.push(Call::UpdateDashboard(id, dashboard.clone()));
        match store.dashboards.get_mut(&id) {
            Some(existing) => {
                *existing = dashboard;
                Ok(id.to_string())
            }
            None => Err(ClientError::NotFound(format!("dashboard {id}"))),
        }
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
