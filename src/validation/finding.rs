//! Validation findings attached to caller-owned elements.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A problem found in a decision table.
///
/// `element` is whatever reference the caller handed in; it is carried
/// along untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFinding<E> {
    pub severity: Severity,
    pub message: String,
    pub element: E,
}

impl<E> ValidationFinding<E> {
    pub fn new(severity: Severity, message: impl Into<String>, element: E) -> Self {
        Self {
            severity,
            message: message.into(),
            element,
        }
    }

    pub fn error(message: impl Into<String>, element: E) -> Self {
        Self::new(Severity::Error, message, element)
    }

    pub fn warning(message: impl Into<String>, element: E) -> Self {
        Self::new(Severity::Warning, message, element)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl<E> fmt::Display for ValidationFinding<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}
