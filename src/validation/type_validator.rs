//! Shared cell type check used by the entry validators.

use crate::expression::{typecheck, Context, DeclaredType, Expression, ExpressionType};
use crate::syntax::parse;
use crate::validation::{EnumLookup, ValidationFinding};
use log::trace;

pub const EMPTY_NOT_ALLOWED: &str = "Empty expression is not allowed.";

/// Type checking of single cells against their column's declared type
pub trait TypeValidator {
    /// Message reported when a cell's type does not fit the declared type
    fn error_message(&self) -> &'static str;

    fn is_empty_allowed(&self) -> bool {
        true
    }

    /// Parse and type check one cell.
    ///
    /// Parse failures short-circuit before type checking. Enumeration
    /// membership is checked here, after the checker has established that
    /// the cell is string-typed.
    fn typecheck_cell<E>(
        &self,
        text: &str,
        context: &Context,
        expected: &DeclaredType,
        enums: &dyn EnumLookup,
        element: E,
    ) -> Option<ValidationFinding<E>> {
        let checked = parse(text)
            .map_err(|err| err.to_string())
            .and_then(|expr| {
                typecheck(context, &expr)
                    .map(|ty| (expr, ty))
                    .map_err(|err| err.to_string())
            });

        let problem = match checked {
            Err(message) => Some(message),
            Ok((expr, ty)) => {
                trace!("cell {:?} has type {}, expected {}", text, ty, expected);
                self.judge(&expr, ty, expected, enums)
            }
        };

        problem.map(|message| ValidationFinding::error(message, element))
    }

    /// Compare a well-typed cell with the declared type
    fn judge(
        &self,
        expr: &Expression,
        ty: ExpressionType,
        expected: &DeclaredType,
        enums: &dyn EnumLookup,
    ) -> Option<String> {
        if ty.is_subtype_of(ExpressionType::String) {
            if let Some(enumeration) = &expected.enumeration {
                return check_enum_values(expr, enumeration, enums);
            }
        }

        if ty == ExpressionType::Top {
            if self.is_empty_allowed() {
                None
            } else {
                Some(EMPTY_NOT_ALLOWED.to_string())
            }
        } else if ty.is_subtype_of(expected.base) {
            None
        } else {
            Some(self.error_message().to_string())
        }
    }
}

/// Check every string literal in `expr` against the enumeration's members
fn check_enum_values(expr: &Expression, enumeration: &str, enums: &dyn EnumLookup) -> Option<String> {
    let members = match enums.members(enumeration) {
        Some(members) => members,
        None => return Some(format!("Enumeration {} is not known.", enumeration)),
    };

    let mut values = Vec::new();
    collect_strings(expr, &mut values);

    values
        .into_iter()
        .find(|value| !members.contains(*value))
        .map(|value| format!("Value \"{}\" does not belong to {}", value, enumeration))
}

fn collect_strings<'e>(expr: &'e Expression, values: &mut Vec<&'e str>) {
    match expr {
        Expression::StringLiteral(value) => values.push(value),
        Expression::Disjunction { head, tail } => {
            collect_strings(head, values);
            collect_strings(tail, values);
        }
        _ => {}
    }
}
