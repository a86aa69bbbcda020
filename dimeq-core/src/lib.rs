//! dimeq Core - Fundamental types
//!
//! This crate provides the core types used throughout dimeq:
//! - `Number`: exact rationals with float promotion
//! - `FromNumber`: numeric targets for stripped magnitudes
//! - `DimeqError`: structured errors for front ends

mod number;
mod error;

pub use number::{Number, NumberError, FromNumber};
pub use error::{DimeqError, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Number, NumberError, FromNumber, DimeqError};
    pub use crate::error::codes;
}
