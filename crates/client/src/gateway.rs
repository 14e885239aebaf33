use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::ClientError;

/// A ZMON record as exchanged with the API: an untyped JSON object.
pub type Document = Map<String, Value>;

pub const DEFAULT_ALERT_STATUS: &str = "ACTIVE";

/// Operations the CLI performs against the ZMON management API.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn get_alert_definition(&self, id: i64) -> Result<Document, ClientError>;

    /// All alert definitions currently in `ACTIVE` state.
    async fn get_alert_definitions(&self) -> Result<Vec<Document>, ClientError>;

    async fn create_alert_definition(&self, alert: Document) -> Result<Document, ClientError>;

    async fn update_alert_definition(&self, alert: Document) -> Result<Document, ClientError>;

    async fn delete_alert_definition(&self, id: i64) -> Result<(), ClientError>;

    async fn get_dashboard(&self, id: i64) -> Result<Document, ClientError>;

    /// Creates the dashboard when it carries no id, updates it otherwise.
    /// Returns the id of the stored dashboard.
    async fn update_dashboard(&self, dashboard: Document) -> Result<String, ClientError>;

    fn base_url(&self) -> &str;

    fn alert_details_url(&self, alert: &Document) -> String {
        let id = document_id(alert).unwrap_or_default();
        format!("{}#/alert-details/{id}/", self.base_url())
    }

    fn dashboard_url(&self, id: &str) -> String {
        format!("{}#/dashboards/views/{id}/", self.base_url())
    }
}

/// Returns the `id` of a document as text, treating `null` and `""` as absent.
pub fn document_id(doc: &Document) -> Option<String> {
    doc.get("id").and_then(id_text)
}

pub(crate) fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Checks performed before an alert definition is sent for creation.
/// Fills in the default status when missing.
pub fn prepare_new_alert(alert: &mut Document) -> Result<(), ClientError> {
    if !alert.contains_key("last_modified_by") {
        return Err(ClientError::argument(
            "Alert definition must have \"last_modified_by\"",
        ));
    }
    if !alert.contains_key("check_definition_id") {
        return Err(ClientError::argument(
            "Alert definition must have \"check_definition_id\"",
        ));
    }
    alert
        .entry("status")
        .or_insert_with(|| Value::String(DEFAULT_ALERT_STATUS.into()));
    Ok(())
}

/// Checks performed before an alert definition is sent for update.
/// Returns the id to address.
pub fn prepare_alert_update(alert: &Document) -> Result<String, ClientError> {
    let id = document_id(alert)
        .ok_or_else(|| ClientError::argument("Alert definition must have \"id\""))?;
    if !alert.contains_key("last_modified_by") {
        return Err(ClientError::argument(
            "Alert definition must have \"last_modified_by\"",
        ));
    }
    if !alert.contains_key("check_definition_id") {
        return Err(ClientError::argument(
            "Alert definition must have \"check_definition_id\"",
        ));
    }
    Ok(id)
}
