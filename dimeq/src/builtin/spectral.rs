//! Photon energy, frequency and wavelength without wavenumbers
//!
//! Wavenumber is left out on purpose: 1/λ and 2π/λ are both in common use,
//! and this equivalence has no tag to tell them apart. Use
//! [`PhotonEnergy`](super::PhotonEnergy) when wavenumbers are needed.

use dimeq_units::constants;

use super::wave::{self, Convention, Wave};
use crate::eqrelation;
use crate::equivalence::{Equivalence, Tag};
use crate::error::RegistrationError;
use crate::resolver::ResolverBuilder;

/// Energy, frequency and wavelength of a photon.
///
/// Tags: `[frequency, wavelength]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Spectral {
    pub frequency: Convention,
    pub wavelength: Convention,
}

impl Spectral {
    pub fn new(frequency: Convention, wavelength: Convention) -> Self {
        Spectral { frequency, wavelength }
    }
}

impl Equivalence for Spectral {
    fn tags(&self) -> Vec<Tag> {
        vec![self.frequency.tag(), self.wavelength.tag()]
    }
}

fn slot(kind: Wave) -> usize {
    match kind {
        Wave::Frequency => 0,
        _ => 1,
    }
}

pub(crate) fn register(b: &mut ResolverBuilder) -> Result<(), RegistrationError> {
    eqrelation!(b, Spectral [linear, _], Energy / Frequency = constants::h())?;
    eqrelation!(b, Spectral [angular, _], Energy / Frequency = constants::hbar())?;
    eqrelation!(b, Spectral [_, linear], Energy * Length = constants::hc())?;
    eqrelation!(b, Spectral [_, angular], Energy * Length = constants::hbar_c())?;

    wave::register_pair::<Spectral>(b, 2, slot, (Wave::Frequency, Wave::Wavelength))
}
