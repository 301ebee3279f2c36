//! Type check of output entries against their output column.

use crate::expression::Context;
use crate::validation::{
    DecisionTable, EnumLookup, Rule, TypeValidator, ValidationFinding, Validator,
};

#[derive(Debug, Clone, Copy)]
pub struct OutputEntryTypeValidator {
    empty_allowed: bool,
}

impl OutputEntryTypeValidator {
    pub fn new() -> Self {
        Self {
            empty_allowed: true,
        }
    }

    /// Whether blank output cells pass the check
    pub fn with_empty_allowed(mut self, empty_allowed: bool) -> Self {
        self.empty_allowed = empty_allowed;
        self
    }
}

impl Default for OutputEntryTypeValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeValidator for OutputEntryTypeValidator {
    fn error_message(&self) -> &'static str {
        "Type of output entry does not match type of output expression"
    }

    fn is_empty_allowed(&self) -> bool {
        self.empty_allowed
    }
}

impl Validator for OutputEntryTypeValidator {
    fn name(&self) -> &'static str {
        "output-entry-type"
    }

    fn validate<'t>(
        &self,
        table: &'t DecisionTable,
        enums: &dyn EnumLookup,
    ) -> Vec<ValidationFinding<&'t Rule>> {
        // Output entries cannot refer to variables
        let context = &Context::new();

        table
            .rules
            .iter()
            .flat_map(|rule| {
                rule.output_entries
                    .iter()
                    .zip(&table.outputs)
                    .filter_map(move |(text, output)| {
                        self.typecheck_cell(text, context, &output.declared_type(), enums, rule)
                    })
            })
            .collect()
    }
}
