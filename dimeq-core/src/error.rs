//! Structured errors for callers at the edge of the library
//!
//! Leaf crates return their own typed errors. Front ends convert them into
//! a `DimeqError`, which carries a machine-readable code and serializes
//! cleanly to JSON.

use crate::NumberError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const NON_FINITE: &str = "NON_FINITE";
    pub const INEXACT_CAST: &str = "INEXACT_CAST";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const UNKNOWN_EQUIVALENCE: &str = "UNKNOWN_EQUIVALENCE";
    pub const INCOMPATIBLE_DIMENSIONS: &str = "INCOMPATIBLE_DIMENSIONS";
    pub const NO_RELATION: &str = "NO_RELATION";
    pub const AMBIGUOUS_RULE: &str = "AMBIGUOUS_RULE";
    pub const UNREGISTERED: &str = "UNREGISTERED";
    pub const REGISTRATION: &str = "REGISTRATION";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Structured error with code, message and an optional hint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimeqError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl DimeqError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    // ========== Common Error Constructors ==========

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
            .with_suggestion("Write quantities as \"<number> <unit>\", e.g. \"589 nm\"")
    }

    pub fn unknown_unit(symbol: &str) -> Self {
        Self::new(codes::UNKNOWN_UNIT, format!("Unknown unit: {}", symbol))
            .with_suggestion("Check the unit symbol or use a compound form like \"kg*m/s^2\"")
    }

    pub fn unknown_equivalence(name: &str) -> Self {
        Self::new(codes::UNKNOWN_EQUIVALENCE, format!("Unknown equivalence: {}", name))
            .with_suggestion("Use one of: mass-energy, thermal, spectral, photon-energy")
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
    }
}

impl std::fmt::Display for DimeqError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for DimeqError {}

impl From<NumberError> for DimeqError {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::ParseError(s) => Self::parse_error(s),
            NumberError::DivisionByZero => Self::new(codes::DIV_ZERO, "Division by zero")
                .with_suggestion("Ensure divisor is not zero"),
            NumberError::NonFinite(_) => Self::new(codes::NON_FINITE, err.to_string()),
            NumberError::InexactCast { .. } => Self::new(codes::INEXACT_CAST, err.to_string())
                .with_suggestion("Strip into a float type or keep the exact Number"),
        }
    }
}
