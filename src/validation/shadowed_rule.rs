//! Detection of rules that can never match on their own.
//!
//! A rule is shadowed when an earlier rule's input entries subsume its own,
//! column by column.

use crate::expression::Expression;
use crate::syntax::{parse, ParseError};
use crate::util::sequence;
use crate::validation::{DecisionTable, EnumLookup, Rule, ValidationFinding, Validator};
use log::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct ShadowedRuleValidator;

impl ShadowedRuleValidator {
    fn parse_inputs(rule: &Rule) -> Result<Vec<Expression>, ParseError> {
        sequence(rule.input_entries.iter().map(|text| parse(text)))
    }
}

impl Validator for ShadowedRuleValidator {
    fn name(&self) -> &'static str {
        "shadowed-rule"
    }

    fn validate<'t>(
        &self,
        table: &'t DecisionTable,
        _enums: &dyn EnumLookup,
    ) -> Vec<ValidationFinding<&'t Rule>> {
        let mut earlier: Vec<(&Rule, Vec<Expression>)> = Vec::new();
        let mut findings = Vec::new();

        for rule in &table.rules {
            let inputs = match Self::parse_inputs(rule) {
                Ok(inputs) => inputs,
                Err(err) => {
                    debug!("Skipping rule {} in shadowing check: {}", rule.id, err);
                    continue;
                }
            };

            let shadowing = earlier.iter().find(|(_, previous)| {
                previous.len() == inputs.len()
                    && previous
                        .iter()
                        .zip(&inputs)
                        .all(|(outer, inner)| outer.subsumes(inner) == Some(true))
            });

            if let Some((shadowing_rule, _)) = shadowing {
                findings.push(ValidationFinding::warning(
                    format!("Rule is shadowed by rule {}", shadowing_rule.id),
                    rule,
                ));
            }

            earlier.push((rule, inputs));
        }

        findings
    }
}
