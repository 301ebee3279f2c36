//! In-memory decision table handed to the validators.
//!
//! Only what the validators need is modelled: column declarations and the
//! raw text of every rule cell.

use crate::expression::DeclaredType;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Variable name an input entry is checked against when none is declared
pub const DEFAULT_INPUT_VARIABLE: &str = "cellInput";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DecisionTable {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub inputs: Vec<InputClause>,
    #[serde(default)]
    pub outputs: Vec<OutputClause>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputClause {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "default_input_variable")]
    pub variable: String,
    #[serde(default)]
    pub type_ref: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputClause {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub type_ref: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    #[serde(default)]
    pub input_entries: Vec<String>,
    #[serde(default)]
    pub output_entries: Vec<String>,
}

fn default_input_variable() -> String {
    DEFAULT_INPUT_VARIABLE.to_string()
}

impl DecisionTable {
    /// Read a table from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid decision table {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Name used when reporting on this table
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

impl InputClause {
    pub fn new(variable: impl Into<String>, type_ref: Option<&str>) -> Self {
        Self {
            label: None,
            variable: variable.into(),
            type_ref: type_ref.map(str::to_string),
        }
    }

    pub fn declared_type(&self) -> DeclaredType {
        DeclaredType::from_type_ref(self.type_ref.as_deref())
    }
}

impl OutputClause {
    pub fn new(type_ref: Option<&str>) -> Self {
        Self {
            name: None,
            type_ref: type_ref.map(str::to_string),
        }
    }

    pub fn declared_type(&self) -> DeclaredType {
        DeclaredType::from_type_ref(self.type_ref.as_deref())
    }
}

impl Rule {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_inputs<S: Into<String>>(mut self, entries: impl IntoIterator<Item = S>) -> Self {
        self.input_entries = entries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_outputs<S: Into<String>>(mut self, entries: impl IntoIterator<Item = S>) -> Self {
        self.output_entries = entries.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::ExpressionType;

    #[test]
    fn test_from_json_defaults() {
        let table = DecisionTable::from_json(
            r#"{
                "inputs": [{ "type_ref": "integer" }],
                "outputs": [{}],
                "rules": [{ "id": "r1", "input_entries": ["<5"] }]
            }"#,
        )
        .unwrap();

        assert_eq!(table.display_name(), "<unnamed>");
        assert_eq!(table.inputs[0].variable, DEFAULT_INPUT_VARIABLE);
        assert_eq!(table.inputs[0].declared_type().base, ExpressionType::Integer);
        assert_eq!(table.outputs[0].declared_type().base, ExpressionType::Top);
        assert_eq!(table.rules[0].input_entries, vec!["<5"]);
        assert!(table.rules[0].output_entries.is_empty());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(DecisionTable::from_json("{ \"rules\": 3 }").is_err());
    }

    #[test]
    fn test_rule_builder() {
        let rule = Rule::new("r1").with_inputs(["<5", "\"a\""]).with_outputs(["1"]);
        assert_eq!(rule.id, "r1");
        assert_eq!(rule.input_entries.len(), 2);
        assert_eq!(rule.output_entries, vec!["1".to_string()]);
    }
}
