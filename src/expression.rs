//! Cell expressions and their static semantics.
//!
//! This module provides:
//! - Expression AST representation and its canonical printer
//! - The type lattice and declared column types
//! - Type checking against a variable context
//! - Subsumption between expressions

pub mod error;
pub mod expr;
pub mod operator;
pub mod subsumption;
pub mod type_checker;
pub mod types;

pub use error::{TypeError, TypeResult};
pub use expr::Expression;
pub use operator::{Operator, OperatorKind};
pub use subsumption::{exact_equals, subsumes, tolerant_equals};
pub use type_checker::{typecheck, typecheck_empty, Context, TypeChecker};
pub use types::{DeclaredType, ExpressionType};
