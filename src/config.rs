//! Batch description file.
//!
//! The batch is a JSON document with a connection descriptor and an
//! ordered list of statement definitions, each carrying zero or more
//! parameter sets:
//!
//! ```json
//! {
//!   "user": "root",
//!   "password": "secret",
//!   "host": "127.0.0.1",
//!   "port": 3306,
//!   "database": "employees",
//!   "prepared_statement": [
//!     {
//!       "statement": "INSERT INTO t VALUES (?, ?)",
//!       "parameter": [
//!         [
//!           { "type": "INT", "unsigned": false, "value": 1 },
//!           { "type": "VARCHAR", "value": "Ann" }
//!         ]
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::binder::ParameterValue;
use crate::error::{Error, Result};
use crate::types::FieldKind;

/// The whole batch: connection descriptor plus statement definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
    #[serde(rename = "prepared_statement")]
    pub prepared_statements: Vec<StatementConfig>,
}

/// One statement and its ordered parameter sets. A statement without
/// parameter sets executes exactly once with no bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementConfig {
    pub statement: String,
    #[serde(rename = "parameter", default)]
    pub parameter_sets: Vec<Vec<ParameterSpec>>,
}

/// One placeholder's description in the batch file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSpec {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(rename = "unsigned", default)]
    pub is_unsigned: bool,
    pub value: ParameterLiteral,
}

/// A parameter's literal value: text or number
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterLiteral {
    Text(String),
    Number(f64),
}

impl BatchConfig {
    /// Load and parse the batch description file
    pub fn load(path: &Path) -> Result<BatchConfig> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot open file '{}': {}", path.display(), e)))?;
        let config: BatchConfig = serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("'{}': {}", path.display(), e)))?;
        Ok(config)
    }
}

impl ParameterSpec {
    /// Resolve the declared type name and split the literal into the
    /// kind's authoritative slot.
    pub fn to_parameter(&self) -> ParameterValue {
        let kind = FieldKind::resolve(&self.type_name);
        match &self.value {
            ParameterLiteral::Text(s) => ParameterValue {
                kind,
                is_unsigned: self.is_unsigned,
                text: Some(s.clone()),
                number: None,
            },
            ParameterLiteral::Number(n) => ParameterValue {
                kind,
                is_unsigned: self.is_unsigned,
                text: None,
                number: Some(*n),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "user": "root",
        "password": "secret",
        "host": "127.0.0.1",
        "port": 3306,
        "database": "employees",
        "prepared_statement": [
            {
                "statement": "SELECT id, name FROM users WHERE id = ?",
                "parameter": [
                    [ { "type": "INT", "unsigned": true, "value": 7 } ],
                    [ { "type": "INT", "value": 8 } ]
                ]
            },
            {
                "statement": "COMMIT"
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample_batch() {
        let config: BatchConfig = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(config.user, "root");
        assert_eq!(config.port, 3306);
        assert_eq!(config.prepared_statements.len(), 2);

        let first = &config.prepared_statements[0];
        assert_eq!(first.parameter_sets.len(), 2);
        assert!(first.parameter_sets[0][0].is_unsigned);
        assert!(!first.parameter_sets[1][0].is_unsigned);

        // Missing "parameter" means zero sets
        assert!(config.prepared_statements[1].parameter_sets.is_empty());
    }

    #[test]
    fn test_literal_is_text_or_number() {
        let spec: ParameterSpec =
            serde_json::from_str(r#"{ "type": "VARCHAR", "value": "Ann" }"#).unwrap();
        let param = spec.to_parameter();
        assert_eq!(param.kind, FieldKind::StringOrBlob);
        assert_eq!(param.text.as_deref(), Some("Ann"));
        assert_eq!(param.number, None);

        let spec: ParameterSpec =
            serde_json::from_str(r#"{ "type": "DOUBLE", "value": 42.0 }"#).unwrap();
        let param = spec.to_parameter();
        assert_eq!(param.kind, FieldKind::Double);
        assert_eq!(param.number, Some(42.0));
    }

    #[test]
    fn test_missing_connection_field_is_an_error() {
        let broken = r#"{ "user": "root", "prepared_statement": [] }"#;
        assert!(serde_json::from_str::<BatchConfig>(broken).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statement.json");
        fs::write(&path, SAMPLE).unwrap();
        let config = BatchConfig::load(&path).unwrap();
        assert_eq!(config.database, "employees");

        let err = BatchConfig::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
