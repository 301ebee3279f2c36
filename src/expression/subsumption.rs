//! Subsumption between cell expressions.
//!
//! `subsumes(outer, inner, ..)` decides whether every value matched by
//! `inner` is also matched by `outer`. Comparisons and ranges are both read
//! as intervals and compared bound by bound; the answer is `None` whenever
//! the two expressions cannot be compared (different literal kinds, variable
//! bounds, disjunctions, arithmetic).

use crate::expression::{Expression, Operator};
use std::cmp::Ordering;
use std::ops::Bound;

/// Exact literal equality
pub fn exact_equals(left: &Expression, right: &Expression) -> bool {
    left == right
}

/// Literal equality that treats doubles within `epsilon` of each other as equal
pub fn tolerant_equals(epsilon: f64) -> impl Fn(&Expression, &Expression) -> bool {
    move |left, right| match (left, right) {
        (Expression::DoubleLiteral(l), Expression::DoubleLiteral(r)) => (l - r).abs() <= epsilon,
        _ => left == right,
    }
}

/// Decide whether `outer` subsumes `inner`.
///
/// `value_equals` is only ever called with two literals of the same kind.
pub fn subsumes<F>(outer: &Expression, inner: &Expression, value_equals: F) -> Option<bool>
where
    F: Fn(&Expression, &Expression) -> bool,
{
    match (outer, inner) {
        (Expression::Empty, _) => Some(true),
        (_, Expression::Empty) => Some(false),

        (outer, inner) if outer.is_literal() && inner.is_literal() => {
            if same_kind(outer, inner) {
                Some(value_equals(outer, inner))
            } else {
                None
            }
        }

        (outer, inner) => {
            let outer = Interval::of(outer)?;
            let inner = Interval::of(inner)?;
            outer.contains(&inner, &value_equals)
        }
    }
}

impl Expression {
    /// Subsumption with exact literal equality
    pub fn subsumes(&self, other: &Expression) -> Option<bool> {
        subsumes(self, other, exact_equals)
    }
}

fn same_kind(left: &Expression, right: &Expression) -> bool {
    std::mem::discriminant(left) == std::mem::discriminant(right)
}

/// A range or comparison viewed as an interval over its bound values
#[derive(Debug)]
struct Interval<'a> {
    lower: Bound<&'a Expression>,
    upper: Bound<&'a Expression>,
}

impl<'a> Interval<'a> {
    fn of(expr: &'a Expression) -> Option<Self> {
        match expr {
            Expression::Range {
                lower_inclusive,
                lower,
                upper,
                upper_inclusive,
            } => Some(Interval {
                lower: bound(*lower_inclusive, lower),
                upper: bound(*upper_inclusive, upper),
            }),

            Expression::Unary { operator, operand } => {
                let operand = operand.as_ref();
                let (lower, upper) = match operator {
                    Operator::Lt => (Bound::Unbounded, Bound::Excluded(operand)),
                    Operator::Le => (Bound::Unbounded, Bound::Included(operand)),
                    Operator::Gt => (Bound::Excluded(operand), Bound::Unbounded),
                    Operator::Ge => (Bound::Included(operand), Bound::Unbounded),
                    _ => return None,
                };
                Some(Interval { lower, upper })
            }

            _ => None,
        }
    }

    fn contains<F>(&self, inner: &Interval<'_>, value_equals: &F) -> Option<bool>
    where
        F: Fn(&Expression, &Expression) -> bool,
    {
        // An incomparable bound on either side makes the whole answer None
        let lower = covers(self.lower, inner.lower, Ordering::Less, value_equals)?;
        let upper = covers(self.upper, inner.upper, Ordering::Greater, value_equals)?;
        Some(lower && upper)
    }
}

fn bound(inclusive: bool, value: &Expression) -> Bound<&Expression> {
    if inclusive {
        Bound::Included(value)
    } else {
        Bound::Excluded(value)
    }
}

/// Check that the outer bound is at least as permissive as the inner one.
///
/// `outward` is the ordering of a value lying beyond the inner bound: `Less`
/// for lower bounds, `Greater` for upper bounds.
fn covers<F>(
    outer: Bound<&Expression>,
    inner: Bound<&Expression>,
    outward: Ordering,
    value_equals: &F,
) -> Option<bool>
where
    F: Fn(&Expression, &Expression) -> bool,
{
    let (outer_value, outer_inclusive) = match outer {
        Bound::Included(value) => (value, true),
        Bound::Excluded(value) => (value, false),
        Bound::Unbounded => return Some(true),
    };
    let (inner_value, inner_inclusive) = match inner {
        Bound::Included(value) => (value, true),
        Bound::Excluded(value) => (value, false),
        Bound::Unbounded => return Some(false),
    };

    let ordering = compare_values(outer_value, inner_value, value_equals)?;
    Some(match ordering {
        Ordering::Equal => outer_inclusive || !inner_inclusive,
        ordering => ordering == outward,
    })
}

/// Order two bound values of the same kind
fn compare_values<F>(left: &Expression, right: &Expression, value_equals: &F) -> Option<Ordering>
where
    F: Fn(&Expression, &Expression) -> bool,
{
    if !same_kind(left, right) {
        return None;
    }

    let ordering = match (left, right) {
        (Expression::IntegerLiteral(l), Expression::IntegerLiteral(r)) => l.cmp(r),
        (Expression::DoubleLiteral(l), Expression::DoubleLiteral(r)) => l.partial_cmp(r)?,
        (Expression::DateLiteral(l), Expression::DateLiteral(r)) => l.cmp(r),
        _ => return None,
    };

    if value_equals(left, right) {
        Some(Ordering::Equal)
    } else {
        Some(ordering)
    }
}
