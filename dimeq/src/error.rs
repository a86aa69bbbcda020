//! Errors raised while registering relations and resolving conversions

use dimeq_core::{codes, DimeqError, NumberError};
use dimeq_units::{ConversionError, Dimension};
use thiserror::Error;

use crate::equivalence::TagPattern;

/// Render a dimension with its common name when it has one
pub(crate) fn describe(dimension: &Dimension) -> String {
    match dimension.name() {
        Some(name) => format!("{} ({})", name, dimension),
        None => format!("[{}]", dimension),
    }
}

/// Failure to convert a quantity through an equivalence
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EquivalenceError {
    /// No rule of the equivalence bridges the two dimensions
    #[error("{equivalence} defines no relation from {} to {}", describe(.from), describe(.to))]
    NoRelation {
        equivalence: String,
        from: Dimension,
        to: Dimension,
    },

    /// The equivalence type was never registered with the resolver
    #[error("{0} is not registered with this resolver")]
    Unregistered(String),

    /// Several equally specific rules match the equivalence's tags
    #[error("{count} equally specific rules match {equivalence} from {} to {}", describe(.from), describe(.to))]
    AmbiguousRule {
        equivalence: String,
        from: Dimension,
        to: Dimension,
        count: usize,
    },

    /// A rule returned a quantity of the wrong dimension
    #[error("rule for {equivalence} produced {}, expected {}", describe(.found), describe(.expected))]
    WrongDimension {
        equivalence: String,
        expected: Dimension,
        found: Dimension,
    },

    /// A rule was handed an equivalence of a different type than it was registered for
    #[error("rule registered for {expected} was handed {found}")]
    FamilyMismatch {
        expected: &'static str,
        found: String,
    },

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Number(#[from] NumberError),
}

/// A malformed relation or rule declaration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    #[error("relation '{0}' must have the shape 'A / B' or 'A * B'")]
    InvalidShape(String),

    #[error("unknown dimension '{0}'")]
    UnknownDimension(String),

    #[error("relation must join two distinct dimensions, got {} twice", describe(.0))]
    SameDimension(Dimension),

    #[error("constant for {relation} has dimension {}, expected {}", describe(.found), describe(.expected))]
    ConstantDimension {
        relation: String,
        expected: Dimension,
        found: Dimension,
    },

    #[error("{equivalence} already has a rule from {} to {} for tags {pattern}", describe(.from), describe(.to))]
    DuplicateRule {
        equivalence: &'static str,
        from: Dimension,
        to: Dimension,
        pattern: TagPattern,
    },
}

impl From<EquivalenceError> for DimeqError {
    fn from(err: EquivalenceError) -> Self {
        match err {
            EquivalenceError::NoRelation { .. } => {
                DimeqError::new(codes::NO_RELATION, err.to_string())
                    .with_suggestion("Pick an equivalence that relates these dimensions")
            }
            EquivalenceError::Unregistered(_) => {
                DimeqError::new(codes::UNREGISTERED, err.to_string())
                    .with_suggestion("Register the equivalence's relations before converting")
            }
            EquivalenceError::AmbiguousRule { .. } => {
                DimeqError::new(codes::AMBIGUOUS_RULE, err.to_string())
                    .with_suggestion("Register a more specific tag pattern to break the tie")
            }
            EquivalenceError::WrongDimension { .. } | EquivalenceError::FamilyMismatch { .. } => {
                DimeqError::internal(err.to_string())
            }
            EquivalenceError::Conversion(e) => e.into(),
            EquivalenceError::Number(e) => e.into(),
        }
    }
}

impl From<RegistrationError> for DimeqError {
    fn from(err: RegistrationError) -> Self {
        DimeqError::new(codes::REGISTRATION, err.to_string())
    }
}
