//! Table-level validators.
//!
//! Each validator walks a `DecisionTable` and reports findings that point
//! back at the offending `Rule`. Validators are registered statically and
//! selected by name.

use anyhow::{bail, Result};
use log::debug;
use serde::Deserialize;

pub mod enums;
pub mod finding;
pub mod input_entry;
pub mod output_entry;
pub mod shadowed_rule;
pub mod table;
pub mod type_validator;

// Re-export validation types
pub use enums::{load_enums, EnumLookup, NoEnums};
pub use finding::{Severity, ValidationFinding};
pub use input_entry::InputEntryTypeValidator;
pub use output_entry::OutputEntryTypeValidator;
pub use shadowed_rule::ShadowedRuleValidator;
pub use table::{DecisionTable, InputClause, OutputClause, Rule, DEFAULT_INPUT_VARIABLE};
pub use type_validator::{TypeValidator, EMPTY_NOT_ALLOWED};

/// Trait for all table validators
pub trait Validator: Send + Sync {
    /// Name the validator is selected by
    fn name(&self) -> &'static str;

    /// Check `table`, returning one finding per problem found
    fn validate<'t>(
        &self,
        table: &'t DecisionTable,
        enums: &dyn EnumLookup,
    ) -> Vec<ValidationFinding<&'t Rule>>;
}

/// Names of all registered validators, in registration order
pub const VALIDATOR_NAMES: [&str; 3] = ["input-entry-type", "output-entry-type", "shadowed-rule"];

/// Which validators to run and how to configure them
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Validators to run; empty selects all of them
    pub validators: Vec<String>,
    pub allow_empty_outputs: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            validators: Vec::new(),
            allow_empty_outputs: true,
        }
    }
}

/// All validators with their default configuration
pub fn registry() -> Vec<Box<dyn Validator>> {
    vec![
        Box::new(InputEntryTypeValidator),
        Box::new(OutputEntryTypeValidator::new()),
        Box::new(ShadowedRuleValidator),
    ]
}

/// Build the validators selected by `config`
pub fn build_validators(config: &ValidatorConfig) -> Result<Vec<Box<dyn Validator>>> {
    for name in &config.validators {
        if !VALIDATOR_NAMES.contains(&name.as_str()) {
            bail!(
                "Unknown validator '{}', expected one of: {}",
                name,
                VALIDATOR_NAMES.join(", ")
            );
        }
    }

    let selected = |name: &str| config.validators.is_empty() || config.validators.iter().any(|v| v == name);

    let validators: Vec<Box<dyn Validator>> = vec![
        Box::new(InputEntryTypeValidator),
        Box::new(OutputEntryTypeValidator::new().with_empty_allowed(config.allow_empty_outputs)),
        Box::new(ShadowedRuleValidator),
    ];

    Ok(validators
        .into_iter()
        .filter(|validator| selected(validator.name()))
        .collect())
}

/// Run every validator over `table`, concatenating their findings
pub fn validate_table<'t>(
    table: &'t DecisionTable,
    validators: &[Box<dyn Validator>],
    enums: &dyn EnumLookup,
) -> Vec<ValidationFinding<&'t Rule>> {
    validators
        .iter()
        .flat_map(|validator| {
            let findings = validator.validate(table, enums);
            debug!(
                "{} reported {} findings for {}",
                validator.name(),
                findings.len(),
                table.display_name()
            );
            findings
        })
        .collect()
}
