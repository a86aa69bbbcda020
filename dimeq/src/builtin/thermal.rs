//! Thermal energy scale, E = k_B T

use dimeq_units::constants;

use crate::eqrelation;
use crate::error::RegistrationError;
use crate::resolver::ResolverBuilder;

crate::equivalence!(
    /// Characteristic thermal energy of a temperature, `E / T = k_B`.
    ///
    /// Affine temperatures (degC, degF) are normalized to kelvin first.
    pub Thermal
);

pub(crate) fn register(b: &mut ResolverBuilder) -> Result<(), RegistrationError> {
    eqrelation!(b, Thermal, Energy / Temperature = constants::k_b())
}
