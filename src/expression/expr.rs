//! Expression AST definitions.

use crate::expression::operator::Operator;
use chrono::NaiveDateTime;
use std::fmt;

/// Expression tree node for the content of a single table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Blank cell; matches any value
    Empty,

    BooleanLiteral(bool),

    /// `date and time("...")`
    DateLiteral(NaiveDateTime),

    DoubleLiteral(f64),

    IntegerLiteral(i64),

    StringLiteral(String),

    /// Reference to a named variable
    VariableLiteral(String),

    /// Interval such as `[1..5)`
    Range {
        lower_inclusive: bool,
        lower: Box<Expression>,
        upper: Box<Expression>,
        upper_inclusive: bool,
    },

    /// Prefix comparison such as `<= 5`
    Unary {
        operator: Operator,
        operand: Box<Expression>,
    },

    /// Infix arithmetic or boolean operation
    Binary {
        left: Box<Expression>,
        operator: Operator,
        right: Box<Expression>,
    },

    /// Comma-separated alternatives, associated to the right
    Disjunction {
        head: Box<Expression>,
        tail: Box<Expression>,
    },
}

impl Expression {
    /// Create a string literal expression
    pub fn string(value: impl Into<String>) -> Self {
        Expression::StringLiteral(value.into())
    }

    /// Create a variable reference expression
    pub fn variable(name: impl Into<String>) -> Self {
        Expression::VariableLiteral(name.into())
    }

    /// Create a range expression
    pub fn range(
        lower_inclusive: bool,
        lower: Expression,
        upper: Expression,
        upper_inclusive: bool,
    ) -> Self {
        Expression::Range {
            lower_inclusive,
            lower: Box::new(lower),
            upper: Box::new(upper),
            upper_inclusive,
        }
    }

    /// Create a unary expression
    pub fn unary(operator: Operator, operand: Expression) -> Self {
        Expression::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    /// Create a binary expression
    pub fn binary(left: Expression, operator: Operator, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    /// Create a disjunction of two alternatives
    pub fn disjunction(head: Expression, tail: Expression) -> Self {
        Expression::Disjunction {
            head: Box::new(head),
            tail: Box::new(tail),
        }
    }

    /// Fold a non-empty list of alternatives into a right-associated disjunction
    pub fn disjunction_of(mut alternatives: Vec<Expression>) -> Option<Self> {
        let mut result = alternatives.pop()?;
        while let Some(head) = alternatives.pop() {
            result = Expression::disjunction(head, result);
        }
        Some(result)
    }

    pub fn lt(operand: Expression) -> Self {
        Self::unary(Operator::Lt, operand)
    }

    pub fn le(operand: Expression) -> Self {
        Self::unary(Operator::Le, operand)
    }

    pub fn gt(operand: Expression) -> Self {
        Self::unary(Operator::Gt, operand)
    }

    pub fn ge(operand: Expression) -> Self {
        Self::unary(Operator::Ge, operand)
    }

    /// Check if this expression is a single literal or variable
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Expression::BooleanLiteral(_)
                | Expression::DateLiteral(_)
                | Expression::DoubleLiteral(_)
                | Expression::IntegerLiteral(_)
                | Expression::StringLiteral(_)
                | Expression::VariableLiteral(_)
        )
    }
}

/// Prints the canonical source form, which parses back to an equal tree.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Empty => Ok(()),
            Expression::BooleanLiteral(value) => write!(f, "{}", value),
            Expression::DateLiteral(value) => {
                write!(f, "date and time(\"{}\")", value.format("%Y-%m-%dT%H:%M:%S%.f"))
            }
            Expression::DoubleLiteral(value) => write_double(f, *value),
            Expression::IntegerLiteral(value) => write!(f, "{}", value),
            Expression::StringLiteral(value) => write!(f, "\"{}\"", value.replace('"', "\\\"")),
            Expression::VariableLiteral(name) => f.write_str(name),
            Expression::Range {
                lower_inclusive,
                lower,
                upper,
                upper_inclusive,
            } => write!(
                f,
                "{}{}..{}{}",
                if *lower_inclusive { '[' } else { '(' },
                lower,
                upper,
                if *upper_inclusive { ']' } else { ')' }
            ),
            Expression::Unary {
                operator: Operator::Not,
                operand,
            } => write!(f, "not({})", operand),
            Expression::Unary { operator, operand } => write!(f, "{}{}", operator, operand),
            Expression::Binary {
                left,
                operator,
                right,
            } => {
                write_operand(f, left)?;
                write!(f, " {} ", operator)?;
                write_operand(f, right)
            }
            Expression::Disjunction { head, tail } => write!(f, "{}, {}", head, tail),
        }
    }
}

/// Positional notation with a decimal point, so the lexer reads a double back
fn write_double(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    let digits = value.to_string();
    if digits.contains('.') {
        f.write_str(&digits)
    } else {
        write!(f, "{}.0", digits)
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Expression) -> fmt::Result {
    match operand {
        Expression::Binary { .. } => write!(f, "({})", operand),
        _ => write!(f, "{}", operand),
    }
}
