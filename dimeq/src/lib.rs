//! dimeq - Dimensional Equivalences
//!
//! Converts quantities across dimension boundaries (mass to energy,
//! wavelength to energy, temperature to energy) when a named physical
//! relation licenses it. Same-dimension conversion is left to `dimeq_units`.
//!
//! ```
//! use dimeq::{ustrip_as, builtin::PhotonEnergy};
//! use dimeq_units::{parse_quantity, parse_unit};
//!
//! let ev: f64 = ustrip_as(
//!     &parse_unit("eV").unwrap(),
//!     parse_quantity("589 nm").unwrap(),
//!     &PhotonEnergy::default(),
//! ).unwrap();
//! assert!((ev - 2.105).abs() < 1e-3);
//! ```
//!
//! New equivalences are declared with [`equivalence!`] (or by implementing
//! [`Equivalence`]) and registered on a [`ResolverBuilder`], usually with
//! [`eqrelation!`].

mod convert;
mod equivalence;
mod error;
mod relation;
mod resolver;
pub mod builtin;

use std::sync::LazyLock;

pub use convert::{uconvert, uconvert_all, ustrip, ustrip_all, ustrip_as};
pub use equivalence::{AsAny, Equivalence, Tag, TagPattern};
pub use error::{EquivalenceError, RegistrationError};
pub use relation::{Relation, RelationKind};
pub use resolver::{Resolver, ResolverBuilder};

/// Resolver holding the built-in equivalences, built on first use
pub static RESOLVER: LazyLock<Resolver> = LazyLock::new(|| {
    builtin::resolver().expect("built-in relations are well-formed")
});

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::builtin::{Convention, MassEnergy, PhotonEnergy, Spectral, Thermal};
    pub use crate::{uconvert, ustrip, ustrip_as, Equivalence, EquivalenceError};
    pub use dimeq_units::{parse_quantity, parse_unit, Quantity, Unit};
}
