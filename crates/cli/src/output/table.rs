use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use serde_json::Value;
use zmon_client::Document;

const ALERT_COLUMNS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("Name", "name"),
    ("Check ID", "check_definition_id"),
    ("Team", "responsible_team"),
    ("Priority", "priority"),
    ("Status", "status"),
    ("Link", "link"),
];

pub fn build_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan).add_attribute(Attribute::Bold))
        .collect();
    table.set_header(cells);
    table
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

pub fn render_alerts(alerts: &[Document]) -> String {
    let headers: Vec<&str> = ALERT_COLUMNS.iter().map(|(h, _)| *h).collect();
    let mut table = build_table(&headers);
    for alert in alerts {
        table.add_row(
            ALERT_COLUMNS
                .iter()
                .map(|(_, key)| cell_text(alert.get(*key)))
                .collect::<Vec<_>>(),
        );
    }
    table.to_string()
}

/// One row per field, for single documents.
pub fn render_fields(doc: &Document) -> String {
    let mut table = build_table(&["Field", "Value"]);
    for (key, value) in doc {
        table.add_row(vec![key.clone(), cell_text(Some(value))]);
    }
    table.to_string()
}
