//! Photon energy with independently tagged frequency, wavelength and wavenumber

use dimeq_units::constants;

use super::wave::{self, Convention, Wave};
use crate::eqrelation;
use crate::equivalence::{Equivalence, Tag};
use crate::error::RegistrationError;
use crate::resolver::ResolverBuilder;

/// Energy, frequency, wavelength and wavenumber of a photon.
///
/// Each spectral quantity has its own convention, giving 8 variants.
/// Tags: `[frequency, wavelength, wavenumber]`.
///
/// | convention | frequency | wavelength | wavenumber |
/// |---|---|---|---|
/// | linear | f, `E = h f` | λ, `E = h c / λ` | ν̃ = 1/λ, `E = h c ν̃` |
/// | angular | ω = 2πf, `E = ħ ω` | ƛ = λ/2π, `E = ħ c / ƛ` | k = 2π/λ, `E = ħ c k` |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PhotonEnergy {
    pub frequency: Convention,
    pub wavelength: Convention,
    pub wavenumber: Convention,
}

impl PhotonEnergy {
    pub fn new(frequency: Convention, wavelength: Convention, wavenumber: Convention) -> Self {
        PhotonEnergy { frequency, wavelength, wavenumber }
    }
}

impl Equivalence for PhotonEnergy {
    fn tags(&self) -> Vec<Tag> {
        vec![self.frequency.tag(), self.wavelength.tag(), self.wavenumber.tag()]
    }
}

fn slot(kind: Wave) -> usize {
    match kind {
        Wave::Frequency => 0,
        Wave::Wavelength => 1,
        Wave::Wavenumber => 2,
    }
}

pub(crate) fn register(b: &mut ResolverBuilder) -> Result<(), RegistrationError> {
    eqrelation!(b, PhotonEnergy [linear, _, _], Energy / Frequency = constants::h())?;
    eqrelation!(b, PhotonEnergy [angular, _, _], Energy / Frequency = constants::hbar())?;
    eqrelation!(b, PhotonEnergy [_, linear, _], Energy * Length = constants::hc())?;
    eqrelation!(b, PhotonEnergy [_, angular, _], Energy * Length = constants::hbar_c())?;
    eqrelation!(b, PhotonEnergy [_, _, linear], Energy / Wavenumber = constants::hc())?;
    eqrelation!(b, PhotonEnergy [_, _, angular], Energy / Wavenumber = constants::hbar_c())?;

    for pair in [
        (Wave::Frequency, Wave::Wavelength),
        (Wave::Frequency, Wave::Wavenumber),
        (Wave::Wavelength, Wave::Wavenumber),
    ] {
        wave::register_pair::<PhotonEnergy>(b, 3, slot, pair)?;
    }
    Ok(())
}
