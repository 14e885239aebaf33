//! Typed shapes of the documents written by the `init` commands.
//!
//! Fields are declared in alphabetical order so the serialized YAML matches
//! the sorted-key layout of documents rendered from the API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::gateway::{Document, DEFAULT_ALERT_STATUS};

pub const DEFAULT_VIEW_MODE: &str = "FULL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertDefinition {
    pub check_definition_id: String,
    pub condition: String,
    pub description: String,
    #[serde(default)]
    pub entities: Vec<Document>,
    #[serde(default)]
    pub entities_exclude: Vec<Document>,
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
    #[serde(default)]
    pub parent_id: String,
    #[serde(default = "default_priority")]
    pub priority: u8,
    pub responsible_team: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub team: String,
    #[serde(default)]
    pub template: bool,
}

impl AlertDefinition {
    pub fn template(name: &str, check_id: &str, team: &str) -> Self {
        Self {
            check_definition_id: check_id.to_string(),
            condition: ">100".to_string(),
            description: "Example Alert Description".to_string(),
            entities: Vec::new(),
            entities_exclude: Vec::new(),
            id: String::new(),
            name: name.to_string(),
            parameters: BTreeMap::new(),
            parent_id: String::new(),
            priority: default_priority(),
            responsible_team: team.to_string(),
            status: default_status(),
            tags: Vec::new(),
            team: team.to_string(),
            template: false,
        }
    }
}

fn default_priority() -> u8 {
    2
}

fn default_status() -> String {
    DEFAULT_ALERT_STATUS.to_string()
}

fn default_view_mode() -> String {
    DEFAULT_VIEW_MODE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dashboard {
    #[serde(default)]
    pub alert_teams: Vec<String>,
    #[serde(default)]
    pub id: String,
    pub last_modified_by: String,
    pub name: String,
    #[serde(default)]
    pub shared_teams: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_view_mode")]
    pub view_mode: String,
    #[serde(default)]
    pub widget_configuration: Vec<Value>,
}

impl Dashboard {
    pub fn template(name: &str, alert_teams: Vec<String>, user: &str) -> Self {
        Self {
            alert_teams,
            id: String::new(),
            last_modified_by: user.to_string(),
            name: name.to_string(),
            shared_teams: Vec::new(),
            tags: Vec::new(),
            view_mode: default_view_mode(),
            widget_configuration: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_template_shape() {
        let alert = AlertDefinition::template("X", "5", "T");
        let value = serde_json::to_value(&alert).unwrap();

        assert_eq!(value["check_definition_id"], "5");
        assert_eq!(value["condition"], ">100");
        assert_eq!(value["priority"], 2);
        assert_eq!(value["status"], "ACTIVE");
        assert_eq!(value["team"], "T");
        assert_eq!(value["responsible_team"], "T");
        assert_eq!(value["template"], false);
        assert_eq!(value["id"], "");
        assert_eq!(value.as_object().unwrap().len(), 15);
    }

    #[test]
    fn alert_template_yaml_keys_sorted() {
        let yaml = serde_yaml::to_string(&AlertDefinition::template("X", "5", "T")).unwrap();
        let keys: Vec<&str> = yaml
            .lines()
            .filter(|l| !l.starts_with(' ') && !l.starts_with('-'))
            .filter_map(|l| l.split(':').next())
            .collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn alert_yaml_reads_back() {
        let yaml = serde_yaml::to_string(&AlertDefinition::template("X", "5", "T")).unwrap();
        let parsed: AlertDefinition = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.status, "ACTIVE");
        assert_eq!(parsed.check_definition_id, "5");
    }

    #[test]
    fn dashboard_template_shape() {
        let dash = Dashboard::template("Ops", vec!["A".into(), "B".into()], "jdoe");
        let value = serde_json::to_value(&dash).unwrap();

        assert_eq!(value["alert_teams"], serde_json::json!(["A", "B"]));
        assert_eq!(value["view_mode"], "FULL");
        assert_eq!(value["last_modified_by"], "jdoe");
        assert_eq!(value["widget_configuration"], serde_json::json!([]));
    }

    #[test]
    fn dashboard_reads_back_with_defaults() {
        let parsed: Dashboard =
            serde_yaml::from_str("name: Ops\nlast_modified_by: jdoe\n").unwrap();
        assert_eq!(parsed.view_mode, "FULL");
        assert!(parsed.alert_teams.is_empty());
    }

    #[test]
    fn alert_status_defaults_to_active() {
        let yaml = "check_definition_id: '5'\ncondition: '>1'\ndescription: d\nname: n\nresponsible_team: T\nteam: T\n";
        let parsed: AlertDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed.status, "ACTIVE");
        assert_eq!(parsed.priority, 2);
    }
}
