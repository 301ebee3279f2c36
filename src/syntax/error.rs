//! Error type for cell parsing.

use thiserror::Error;

/// A cell whose text does not match the expression grammar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Could not parse '{text}': {message} at position {position}.")]
pub struct ParseError {
    /// The complete cell text
    pub text: String,
    pub message: String,
    /// Character offset where parsing stopped
    pub position: usize,
}

pub type ParseResult<T> = Result<T, ParseError>;
