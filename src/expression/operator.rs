//! Operator definitions for cell expressions.

use std::fmt;

/// Operators that can appear in a cell expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Comparison
    Gt,
    Ge,
    Lt,
    Le,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Exp,

    // Boolean
    And,
    Or,
    Not,
}

/// Broad grouping of operators, used by the type checker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Comparison,
    Arithmetic,
    Boolean,
}

impl Operator {
    /// Get the category this operator belongs to
    pub fn kind(&self) -> OperatorKind {
        match self {
            Operator::Gt | Operator::Ge | Operator::Lt | Operator::Le => OperatorKind::Comparison,
            Operator::Add | Operator::Sub | Operator::Mul | Operator::Div | Operator::Exp => {
                OperatorKind::Arithmetic
            }
            Operator::And | Operator::Or | Operator::Not => OperatorKind::Boolean,
        }
    }

    /// Whether this operator may prefix a cell as a unary comparison
    pub fn is_comparison(&self) -> bool {
        self.kind() == OperatorKind::Comparison
    }

    /// Get the source symbol for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Exp => "**",
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Not => "not",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_kinds() {
        assert_eq!(Operator::Gt.kind(), OperatorKind::Comparison);
        assert_eq!(Operator::Le.kind(), OperatorKind::Comparison);
        assert_eq!(Operator::Exp.kind(), OperatorKind::Arithmetic);
        assert_eq!(Operator::Div.kind(), OperatorKind::Arithmetic);
        assert_eq!(Operator::Not.kind(), OperatorKind::Boolean);
        assert_eq!(Operator::Or.kind(), OperatorKind::Boolean);

        assert!(Operator::Lt.is_comparison());
        assert!(!Operator::Add.is_comparison());
        assert!(!Operator::Not.is_comparison());
    }

    #[test]
    fn test_operator_display() {
        assert_eq!(Operator::Ge.as_str(), ">=");
        assert_eq!(Operator::Exp.as_str(), "**");
        assert_eq!(Operator::And.to_string(), "and");
        assert_eq!(Operator::Sub.to_string(), "-");
    }
}
