//! Alert definition types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::execution::state::AlertState;

/// Per-state reporting text with positional `{0}`-style placeholders
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportingTemplate {
    pub text: String,
}

/// Check-source metadata carried by an alert definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertSource {
    /// Reporting templates keyed by lowercase state name
    #[serde(default)]
    pub reporting: HashMap<String, ReportingTemplate>,
    /// Check-specific configuration (URIs, thresholds, ...), passed through
    /// untouched for the concrete check to interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Immutable description of one alert: metadata (name, label, owning
/// service/component, run interval) plus its source metadata
#[derive(Debug, Clone)]
pub struct AlertDefinition {
    meta: Map<String, Value>,
    source: AlertSource,
}

impl AlertDefinition {
    pub fn new(meta: Map<String, Value>, source: AlertSource) -> Self {
        Self { meta, source }
    }

    /// The run interval, clamped to a minimum of 1. An absent or
    /// non-numeric `interval` key defaults to 1 so a misconfigured
    /// definition cannot stall or flood the scheduler.
    pub fn interval(&self) -> u64 {
        self.meta
            .get("interval")
            .and_then(Value::as_i64)
            .map(|i| if i < 1 { 1 } else { i as u64 })
            .unwrap_or(1)
    }

    /// Permissive metadata accessor: `None` for an absent or null key,
    /// non-string values stringified
    pub fn find_value(&self, key: &str) -> Option<String> {
        match self.meta.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        }
    }

    /// Reporting template text for a state, matched case-insensitively
    pub fn reporting_text(&self, state: AlertState) -> Option<&str> {
        self.source
            .reporting
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(state.reporting_key()))
            .map(|(_, template)| template.text.as_str())
    }

    pub fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }

    pub fn source(&self) -> &AlertSource {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn definition(meta: Value, source: AlertSource) -> AlertDefinition {
        match meta {
            Value::Object(map) => AlertDefinition::new(map, source),
            _ => panic!("metadata fixture must be an object"),
        }
    }

    #[test]
    fn test_interval_clamps_to_one() {
        let def = definition(json!({ "interval": 0 }), AlertSource::default());
        assert_eq!(def.interval(), 1);

        let def = definition(json!({ "interval": -5 }), AlertSource::default());
        assert_eq!(def.interval(), 1);

        let def = definition(json!({ "interval": 5 }), AlertSource::default());
        assert_eq!(def.interval(), 5);
    }

    #[test]
    fn test_interval_defaults_when_absent() {
        let def = definition(json!({ "name": "x" }), AlertSource::default());
        assert_eq!(def.interval(), 1);

        let def = definition(json!({ "interval": "soon" }), AlertSource::default());
        assert_eq!(def.interval(), 1);
    }

    #[test]
    fn test_find_value_is_permissive() {
        let def = definition(
            json!({ "name": "disk_check", "port": 8080, "flag": null }),
            AlertSource::default(),
        );
        assert_eq!(def.find_value("name"), Some("disk_check".to_string()));
        assert_eq!(def.find_value("port"), Some("8080".to_string()));
        assert_eq!(def.find_value("flag"), None);
        assert_eq!(def.find_value("missing"), None);
    }

    #[test]
    fn test_reporting_text_matches_case_insensitively() {
        let source: AlertSource = serde_json::from_value(json!({
            "reporting": {
                "OK": { "text": "all good" },
                "critical": { "text": "broken: {0}" }
            }
        }))
        .unwrap();
        let def = definition(json!({}), source);

        assert_eq!(def.reporting_text(AlertState::Ok), Some("all good"));
        assert_eq!(def.reporting_text(AlertState::Critical), Some("broken: {0}"));
        assert_eq!(def.reporting_text(AlertState::Warning), None);
    }

    #[test]
    fn test_source_keeps_check_specific_fields() {
        let source: AlertSource = serde_json::from_value(json!({
            "type": "WEB",
            "uri": "{{hdfs-site/dfs.namenode.http-address}}",
            "reporting": { "ok": { "text": "up" } }
        }))
        .unwrap();

        assert_eq!(
            source.extra.get("uri").and_then(Value::as_str),
            Some("{{hdfs-site/dfs.namenode.http-address}}")
        );
        assert_eq!(source.reporting.len(), 1);
    }
}
