//! Mass-energy equivalence, E = mc²

use dimeq_units::constants;

use crate::eqrelation;
use crate::error::RegistrationError;
use crate::resolver::ResolverBuilder;

crate::equivalence!(
    /// Rest energy of a mass, `E / m = c²`
    pub MassEnergy
);

pub(crate) fn register(b: &mut ResolverBuilder) -> Result<(), RegistrationError> {
    eqrelation!(b, MassEnergy, Energy / Mass = constants::c_squared())
}
