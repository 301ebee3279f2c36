//! Error types for type checking.

use crate::expression::{ExpressionType, Operator};
use thiserror::Error;

/// Reasons a cell expression fails to type check.
///
/// The `Display` text of each variant is the message reported to users.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Variable not bound in the typing context
    #[error("Variable '{name}' has no type.")]
    UnboundVariable { name: String },

    #[error("Types of lower and upper bound do not match.")]
    RangeBoundMismatch {
        lower: ExpressionType,
        upper: ExpressionType,
    },

    #[error("Type is unsupported for RangeExpressions.")]
    UnsupportedRangeType { found: ExpressionType },

    #[error("Operator is not supported in UnaryExpression.")]
    UnsupportedUnaryOperator { operator: Operator },

    #[error("Types of left and right operand do not match.")]
    OperandMismatch {
        left: ExpressionType,
        right: ExpressionType,
    },

    #[error("Types of head and tail do not match.")]
    DisjunctionMismatch {
        head: ExpressionType,
        tail: ExpressionType,
    },

    /// Comparison or arithmetic operator applied to a non-numeric type
    #[error("Operator '{operator}' expects a numeric operand, found {found}.")]
    NonNumericOperand {
        operator: Operator,
        found: ExpressionType,
    },

    /// Boolean operator applied to a non-boolean type
    #[error("Operator '{operator}' expects a boolean operand, found {found}.")]
    NonBooleanOperand {
        operator: Operator,
        found: ExpressionType,
    },
}

/// Result type for type checking
pub type TypeResult<T> = Result<T, TypeError>;
