//! Loading alert definitions from JSON files

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use super::alert::{AlertDefinition, AlertSource};

/// Definition loading errors
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error("Failed to read definitions file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse definitions: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Definition entry is not a JSON object")]
    NotAnObject,
}

#[derive(Deserialize)]
struct DefinitionsFile {
    #[serde(default)]
    definitions: Vec<Value>,
}

/// Load alert definitions from a JSON file shaped as
/// `{ "definitions": [ { ...metadata, "source": { ... } }, ... ] }`
pub fn load_definitions(path: impl AsRef<Path>) -> Result<Vec<AlertDefinition>, DefinitionError> {
    let raw = std::fs::read_to_string(path)?;
    parse_definitions(&raw)
}

/// Parse alert definitions from raw JSON
pub fn parse_definitions(raw: &str) -> Result<Vec<AlertDefinition>, DefinitionError> {
    let file: DefinitionsFile = serde_json::from_str(raw)?;
    file.definitions
        .into_iter()
        .map(definition_from_value)
        .collect()
}

fn definition_from_value(value: Value) -> Result<AlertDefinition, DefinitionError> {
    let mut meta = match value {
        Value::Object(map) => map,
        _ => return Err(DefinitionError::NotAnObject),
    };

    // The source block lives alongside the metadata keys in the file;
    // everything that is not the source is metadata.
    let source: AlertSource = match meta.remove("source") {
        Some(value) => serde_json::from_value(value)?,
        None => AlertSource::default(),
    };

    Ok(AlertDefinition::new(meta, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DEFINITIONS: &str = r#"{
        "definitions": [
            {
                "name": "datanode_process",
                "label": "DataNode Process",
                "service": "HDFS",
                "componentName": "DATANODE",
                "interval": 3,
                "source": {
                    "type": "PORT",
                    "uri": "{{hdfs-site/dfs.datanode.address}}",
                    "reporting": {
                        "ok": { "text": "TCP OK: {0}s response on port {1}" },
                        "critical": { "text": "Connection failed: {0}" }
                    }
                }
            },
            {
                "name": "bare_minimum",
                "interval": 1
            }
        ]
    }"#;

    #[test]
    fn test_parse_definitions() {
        let defs = parse_definitions(DEFINITIONS).unwrap();
        assert_eq!(defs.len(), 2);

        assert_eq!(defs[0].find_value("name"), Some("datanode_process".to_string()));
        assert_eq!(defs[0].interval(), 3);
        assert_eq!(defs[0].source().reporting.len(), 2);
        // the source block itself must not leak into the metadata table
        assert_eq!(defs[0].find_value("source"), None);

        assert_eq!(defs[1].find_value("name"), Some("bare_minimum".to_string()));
        assert!(defs[1].source().reporting.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_object_entries() {
        let result = parse_definitions(r#"{ "definitions": [ 42 ] }"#);
        assert!(matches!(result, Err(DefinitionError::NotAnObject)));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let result = parse_definitions("{ not json");
        assert!(matches!(result, Err(DefinitionError::Parse(_))));
    }

    #[test]
    fn test_empty_file_yields_no_definitions() {
        let defs = parse_definitions("{}").unwrap();
        assert!(defs.is_empty());
    }

    #[test]
    fn test_load_definitions_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DEFINITIONS.as_bytes()).unwrap();

        let defs = load_definitions(file.path()).unwrap();
        assert_eq!(defs.len(), 2);
    }

    #[test]
    fn test_load_definitions_missing_file() {
        let result = load_definitions("/nonexistent/alerts.json");
        assert!(matches!(result, Err(DefinitionError::Io(_))));
    }
}
