//! Type checking for cell expressions.

use crate::expression::{Expression, ExpressionType, Operator, OperatorKind, TypeError, TypeResult};
use crate::util::ensure;
use std::collections::HashMap;

/// Types admitted as range bounds
const RANGE_TYPES: [ExpressionType; 4] = [
    ExpressionType::Integer,
    ExpressionType::Double,
    ExpressionType::Long,
    ExpressionType::Date,
];

/// Variable typings for a single check.
///
/// Built once per cell and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    bindings: HashMap<String, ExpressionType>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context binding exactly one variable
    pub fn single(name: impl Into<String>, ty: ExpressionType) -> Self {
        Self {
            bindings: HashMap::from([(name.into(), ty)]),
        }
    }

    pub fn get(&self, name: &str) -> Option<ExpressionType> {
        self.bindings.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, ExpressionType)> for Context {
    fn from_iter<I: IntoIterator<Item = (S, ExpressionType)>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Type checker for cell expressions
pub struct TypeChecker<'a> {
    context: &'a Context,
}

impl<'a> TypeChecker<'a> {
    /// Create a new type checker over the given context
    pub fn new(context: &'a Context) -> Self {
        Self { context }
    }

    /// Type check an expression and return its type
    pub fn check(&self, expr: &Expression) -> TypeResult<ExpressionType> {
        match expr {
            Expression::Empty => Ok(ExpressionType::Top),
            Expression::BooleanLiteral(_) => Ok(ExpressionType::Boolean),
            Expression::DateLiteral(_) => Ok(ExpressionType::Date),
            Expression::DoubleLiteral(_) => Ok(ExpressionType::Double),
            Expression::IntegerLiteral(_) => Ok(ExpressionType::Integer),
            Expression::StringLiteral(_) => Ok(ExpressionType::String),

            Expression::VariableLiteral(name) => {
                self.context
                    .get(name)
                    .ok_or_else(|| TypeError::UnboundVariable { name: name.clone() })
            }

            Expression::Range { lower, upper, .. } => {
                let lower_type = self.check(lower)?;
                let upper_type = self.check(upper)?;

                ensure(lower_type == upper_type, || TypeError::RangeBoundMismatch {
                    lower: lower_type,
                    upper: upper_type,
                })?;
                ensure(RANGE_TYPES.contains(&lower_type), || {
                    TypeError::UnsupportedRangeType { found: lower_type }
                })?;

                Ok(lower_type)
            }

            Expression::Unary { operator, operand } => {
                ensure(operator.is_comparison(), || {
                    TypeError::UnsupportedUnaryOperator {
                        operator: *operator,
                    }
                })?;

                let operand_type = self.check(operand)?;
                check_operator(*operator, operand_type)
            }

            Expression::Binary {
                left,
                operator,
                right,
            } => {
                let left_type = self.check(left)?;
                let right_type = self.check(right)?;

                ensure(left_type == right_type, || TypeError::OperandMismatch {
                    left: left_type,
                    right: right_type,
                })?;

                check_operator(*operator, left_type)
            }

            Expression::Disjunction { head, tail } => {
                let head_type = self.check(head)?;
                let tail_type = self.check(tail)?;

                ensure(head_type == tail_type, || TypeError::DisjunctionMismatch {
                    head: head_type,
                    tail: tail_type,
                })?;

                Ok(head_type)
            }
        }
    }
}

/// Check that `operand_type` is acceptable for `operator`
fn check_operator(operator: Operator, operand_type: ExpressionType) -> TypeResult<ExpressionType> {
    match operator.kind() {
        OperatorKind::Comparison | OperatorKind::Arithmetic => {
            ensure(operand_type.is_numeric(), || TypeError::NonNumericOperand {
                operator,
                found: operand_type,
            })?;
        }
        OperatorKind::Boolean => {
            ensure(operand_type == ExpressionType::Boolean, || {
                TypeError::NonBooleanOperand {
                    operator,
                    found: operand_type,
                }
            })?;
        }
    }

    Ok(operand_type)
}

/// Type check an expression against a context
pub fn typecheck(context: &Context, expr: &Expression) -> TypeResult<ExpressionType> {
    TypeChecker::new(context).check(expr)
}

/// Type check an expression that refers to no variables
pub fn typecheck_empty(expr: &Expression) -> TypeResult<ExpressionType> {
    typecheck(&Context::new(), expr)
}
