//! Linear/angular conventions shared by the spectral equivalences
//!
//! A tagged value equals its linear value times (2π)^s, where s is the
//! convention's exponent: +1 for angular frequency (ω = 2πf) and angular
//! wavenumber (k = 2πν̃), -1 for reduced wavelength (ƛ = λ/2π), 0 for linear.

use dimeq_core::Number;
use dimeq_units::{constants, Dimension, Quantity};

use crate::equivalence::{Equivalence, Tag, TagPattern};
use crate::error::{EquivalenceError, RegistrationError};
use crate::resolver::ResolverBuilder;

/// Linear or angular (2π-scaled) convention for one spectral quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Convention {
    #[default]
    Linear,
    Angular,
}

impl Convention {
    pub const ALL: [Convention; 2] = [Convention::Linear, Convention::Angular];

    pub fn tag(self) -> Tag {
        match self {
            Convention::Linear => Tag::LINEAR,
            Convention::Angular => Tag::ANGULAR,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "linear" | "lin" => Some(Convention::Linear),
            "angular" | "ang" => Some(Convention::Angular),
            _ => None,
        }
    }
}

/// Spectral quantity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Wave {
    Frequency,
    Wavelength,
    Wavenumber,
}

impl Wave {
    pub(crate) fn dimension(self) -> Dimension {
        match self {
            Wave::Frequency => Dimension::FREQUENCY,
            Wave::Wavelength => Dimension::LENGTH,
            Wave::Wavenumber => Dimension::WAVENUMBER,
        }
    }

    fn exponent(self, convention: Convention) -> i32 {
        match (convention, self) {
            (Convention::Linear, _) => 0,
            (Convention::Angular, Wave::Wavelength) => -1,
            (Convention::Angular, _) => 1,
        }
    }
}

/// Multiply by (2π)^n, leaving exact values exact when n is 0
fn turn(x: &Quantity, n: i32) -> Result<Quantity, EquivalenceError> {
    if n == 0 {
        return Ok(x.clone());
    }
    Ok(x.scale(&Number::tau().pow(n)?))
}

/// Base relations between linear quantities: f = c/λ, f = c·ν̃, λ = 1/ν̃
fn linear(from: Wave, to: Wave, x: &Quantity) -> Result<Quantity, EquivalenceError> {
    let c = constants::c();
    let converted = match (from, to) {
        (Wave::Frequency, Wave::Wavelength) | (Wave::Wavelength, Wave::Frequency) => c.div(x)?,
        (Wave::Wavenumber, Wave::Frequency) => x.mul(&c),
        (Wave::Frequency, Wave::Wavenumber) => x.div(&c)?,
        (Wave::Wavelength, Wave::Wavenumber) | (Wave::Wavenumber, Wave::Wavelength) => {
            Quantity::dimensionless(1).div(x)?
        }
        _ => x.clone(),
    };
    Ok(converted)
}

/// Convert between two tagged spectral quantities
pub(crate) fn convert(
    from: (Wave, Convention),
    to: (Wave, Convention),
    x: &Quantity,
) -> Result<Quantity, EquivalenceError> {
    let source = turn(x, -from.0.exponent(from.1))?;
    let target = linear(from.0, to.0, &source)?;
    turn(&target, to.0.exponent(to.1))
}

/// Register the piecewise rules for one pair, in both directions, for every
/// combination of the two conventions. `slot` maps a kind to its tag index.
pub(crate) fn register_pair<E: Equivalence>(
    b: &mut ResolverBuilder,
    slots: usize,
    slot: fn(Wave) -> usize,
    pair: (Wave, Wave),
) -> Result<(), RegistrationError> {
    for (from, to) in [pair, (pair.1, pair.0)] {
        for cf in Convention::ALL {
            for ct in Convention::ALL {
                let mut pattern = vec![None; slots];
                pattern[slot(from)] = Some(cf.tag());
                pattern[slot(to)] = Some(ct.tag());

                b.rule::<E, _>(
                    TagPattern::new(pattern),
                    from.dimension(),
                    to.dimension(),
                    move |_, x| convert((from, cf), (to, ct), x),
                )?;
            }
        }
    }
    Ok(())
}
