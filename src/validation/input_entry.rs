//! Type check of input entries against their input column.

use crate::expression::Context;
use crate::validation::{
    DecisionTable, EnumLookup, Rule, TypeValidator, ValidationFinding, Validator,
};
use log::warn;

#[derive(Debug, Clone, Copy, Default)]
pub struct InputEntryTypeValidator;

impl TypeValidator for InputEntryTypeValidator {
    fn error_message(&self) -> &'static str {
        "Type of input entry does not match type of input expression"
    }
}

impl Validator for InputEntryTypeValidator {
    fn name(&self) -> &'static str {
        "input-entry-type"
    }

    fn validate<'t>(
        &self,
        table: &'t DecisionTable,
        enums: &dyn EnumLookup,
    ) -> Vec<ValidationFinding<&'t Rule>> {
        let mut findings = Vec::new();

        for rule in &table.rules {
            if rule.input_entries.len() != table.inputs.len() {
                warn!(
                    "Rule {} has {} input entries for {} inputs",
                    rule.id,
                    rule.input_entries.len(),
                    table.inputs.len()
                );
            }

            for (text, input) in rule.input_entries.iter().zip(&table.inputs) {
                let declared = input.declared_type();
                let context = Context::single(input.variable.as_str(), declared.base);

                findings.extend(self.typecheck_cell(text, &context, &declared, enums, rule));
            }
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{InputClause, NoEnums, Severity};

    fn table(type_ref: Option<&str>, entries: &[&str]) -> DecisionTable {
        DecisionTable {
            inputs: vec![InputClause::new("cellInput", type_ref)],
            rules: entries
                .iter()
                .enumerate()
                .map(|(i, entry)| Rule::new(format!("rule{}", i)).with_inputs([*entry]))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_accepts_well_typed_entries() {
        let table = table(Some("integer"), &["42", "<5", "[1..9]", "", "cellInput"]);
        let findings = InputEntryTypeValidator.validate(&table, &NoEnums);
        assert!(findings.is_empty(), "{:?}", findings);
    }

    #[test]
    fn test_rejects_ill_typed_entry() {
        let table = table(Some("integer"), &["42", "\"Steak\""]);
        let findings = InputEntryTypeValidator.validate(&table, &NoEnums);

        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "Type of input entry does not match type of input expression"
        );
        assert_eq!(findings[0].severity, Severity::Error);
        assert!(std::ptr::eq(findings[0].element, &table.rules[1]));
    }

    #[test]
    fn test_declared_variable_name() {
        let table = DecisionTable {
            inputs: vec![InputClause::new("age", Some("long"))],
            rules: vec![
                Rule::new("r1").with_inputs(["< age"]),
                Rule::new("r2").with_inputs(["< cellInput"]),
            ],
            ..Default::default()
        };

        let findings = InputEntryTypeValidator.validate(&table, &NoEnums);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].element.id, "r2");
        assert_eq!(findings[0].message, "Variable 'cellInput' has no type.");
    }
}
