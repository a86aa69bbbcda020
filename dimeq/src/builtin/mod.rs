//! Built-in equivalences
//!
//! - `mass-energy`: [`MassEnergy`], E = mc²
//! - `thermal`: [`Thermal`], E = k_B T
//! - `spectral[:f,λ]`: [`Spectral`], energy, frequency and wavelength
//! - `photon-energy[:f,λ,ν̃]`: [`PhotonEnergy`], adds wavenumber
//!
//! Conventions after the colon are `linear` or `angular`, defaulting to linear.

mod mass_energy;
mod photon;
mod spectral;
mod thermal;
mod wave;

use std::collections::HashSet;

use dimeq_core::{codes, DimeqError};

use crate::equivalence::Equivalence;
use crate::error::RegistrationError;
use crate::resolver::{Resolver, ResolverBuilder};

pub use mass_energy::MassEnergy;
pub use photon::PhotonEnergy;
pub use spectral::Spectral;
pub use thermal::Thermal;
pub use wave::Convention;

/// Names accepted by [`by_name`]
pub const NAMES: [&str; 4] = ["mass-energy", "thermal", "spectral", "photon-energy"];

/// Add every built-in relation to `b`
pub fn register(b: &mut ResolverBuilder) -> Result<(), RegistrationError> {
    mass_energy::register(b)?;
    thermal::register(b)?;
    spectral::register(b)?;
    photon::register(b)?;
    Ok(())
}

/// A resolver holding only the built-ins
pub fn resolver() -> Result<Resolver, RegistrationError> {
    let mut b = Resolver::builder();
    register(&mut b)?;
    Ok(b.build())
}

/// Look up a built-in equivalence by name, e.g. `"photon-energy:angular,linear,linear"`
pub fn by_name(text: &str) -> Result<Box<dyn Equivalence>, DimeqError> {
    let (name, conventions) = match text.split_once(':') {
        Some((name, rest)) => (name, Some(rest)),
        None => (text, None),
    };
    let key: String = name.trim().to_lowercase().replace('_', "-");

    let conventions = match conventions {
        Some(list) => list.split(',')
            .map(|c| Convention::parse(c).ok_or_else(|| {
                DimeqError::new(codes::UNKNOWN_EQUIVALENCE, format!("Unknown convention '{}' in {}", c.trim(), text))
                    .with_suggestion("Conventions are 'linear' or 'angular'")
            }))
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    let arity = match key.as_str() {
        "mass-energy" | "thermal" => 0,
        "spectral" => 2,
        "photon-energy" => 3,
        _ => {
            let similar = similar_names(&key);
            let mut err = DimeqError::unknown_equivalence(name.trim());
            if !similar.is_empty() {
                err = err.with_suggestion(format!("Did you mean: {}?", similar.join(", ")));
            }
            return Err(err);
        }
    };

    if !conventions.is_empty() && conventions.len() != arity {
        return Err(DimeqError::new(
            codes::UNKNOWN_EQUIVALENCE,
            format!("{} takes {} conventions, got {}", key, arity, conventions.len()),
        ));
    }
    let nth = |i: usize| conventions.get(i).copied().unwrap_or_default();

    let eq: Box<dyn Equivalence> = match key.as_str() {
        "mass-energy" => Box::new(MassEnergy),
        "thermal" => Box::new(Thermal),
        "spectral" => Box::new(Spectral::new(nth(0), nth(1))),
        _ => Box::new(PhotonEnergy::new(nth(0), nth(1), nth(2))),
    };
    Ok(eq)
}

/// Built-in names resembling `query`, best first
fn similar_names(query: &str) -> Vec<&'static str> {
    let query_chars: HashSet<char> = query.chars().collect();
    let mut scored: Vec<(&'static str, usize)> = NAMES.iter()
        .map(|&name| {
            let mut score = 0;
            if name.starts_with(query) || query.starts_with(name) {
                score += 100;
            } else if name.contains(query) || query.contains(name) {
                score += 50;
            }
            let name_chars: HashSet<char> = name.chars().collect();
            score += query_chars.intersection(&name_chars).count() * 2;
            (name, score)
        })
        .filter(|(_, score)| *score >= 10)
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(name, _)| name).take(2).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EquivalenceError;
    use crate::{uconvert, ustrip, ustrip_as};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use dimeq_core::Number;
    use dimeq_units::{parse_quantity, parse_unit, Dimension, Quantity, Unit};

    fn unit(s: &str) -> Unit {
        parse_unit(s).unwrap()
    }

    fn q(s: &str) -> Quantity {
        parse_quantity(s).unwrap()
    }

    fn linear() -> PhotonEnergy {
        PhotonEnergy::default()
    }

    #[test]
    fn test_electron_rest_energy() {
        let ev: f64 = ustrip_as(&unit("eV"), q("1 m_e"), &MassEnergy).unwrap();
        assert_relative_eq!(ev, 510998.95, max_relative = 0.01);
        assert_relative_eq!(ev, 510998.95, max_relative = 1e-7);
    }

    #[test]
    fn test_mass_energy_exact_round_trip() {
        let energy = uconvert(&unit("J"), q("3 kg"), &MassEnergy).unwrap();
        assert!(energy.value.is_exact());
        let mass = ustrip(&unit("kg"), energy, &MassEnergy).unwrap();
        assert_eq!(mass, Number::from_i64(3));
    }

    #[test]
    fn test_sodium_line_energy() {
        let ev: f64 = ustrip_as(&unit("eV"), q("589 nm"), &linear()).unwrap();
        assert_abs_diff_eq!(ev, 2.105, epsilon = 0.001);

        let spectral: f64 = ustrip_as(&unit("eV"), q("589 nm"), &Spectral::default()).unwrap();
        assert_eq!(ev, spectral);
    }

    #[test]
    fn test_room_temperature_energy() {
        let ev: f64 = ustrip_as(&unit("eV"), q("20 degC"), &Thermal).unwrap();
        assert_abs_diff_eq!(ev, 0.02526, epsilon = 0.0001);
    }

    #[test]
    fn test_affine_normalized_before_relation() {
        let from_celsius = ustrip(&unit("meV"), q("20 degC"), &Thermal).unwrap();
        let from_kelvin = ustrip(&unit("meV"), q("293.15 K"), &Thermal).unwrap();
        let from_fahrenheit = ustrip(&unit("meV"), q("68 degF"), &Thermal).unwrap();
        assert!(from_celsius.is_exact());
        assert_eq!(from_celsius, from_kelvin);
        assert_eq!(from_celsius, from_fahrenheit);
    }

    #[test]
    fn test_energy_to_affine_target() {
        let kelvin = uconvert(&unit("K"), q("1 eV"), &Thermal).unwrap();
        let celsius = uconvert(&unit("degC"), q("1 eV"), &Thermal).unwrap();
        assert_eq!(celsius.value, kelvin.value.sub(&Number::from_str("273.15").unwrap()));
    }

    #[test]
    fn test_frequency_variant_selects_constant() {
        let e_linear = ustrip(&unit("J"), q("1 Hz"), &linear()).unwrap();
        assert_eq!(e_linear, Number::from_str("6.62607015e-34").unwrap());

        let angular = PhotonEnergy::new(Convention::Angular, Convention::Linear, Convention::Linear);
        let e_angular = ustrip(&unit("J"), q("1 Hz"), &angular).unwrap();
        assert!(!e_angular.is_exact());
        assert_relative_eq!(e_angular.to_f64(), 1.054571817e-34, max_relative = 1e-9);
    }

    #[test]
    fn test_wavenumber_round_trip() {
        let nu = q("15000 kayser");
        let energy = uconvert(&unit("eV"), nu.clone(), &linear()).unwrap();
        let back = ustrip(&unit("cm^-1"), energy, &linear()).unwrap();
        assert_eq!(back, Number::from_i64(15000));
    }

    #[test]
    fn test_all_pairs_all_variants() {
        let inputs = [q("2.105 eV"), q("509 THz"), q("589 nm"), q("16978 cm^-1")];
        let targets = ["eV", "THz", "nm", "cm^-1"];

        for f in Convention::ALL {
            for l in Convention::ALL {
                for n in Convention::ALL {
                    let eq = PhotonEnergy::new(f, l, n);
                    for x in &inputs {
                        for t in targets {
                            let target = unit(t);
                            let out = crate::RESOLVER.uconvert(&target, x.clone(), &eq)
                                .unwrap_or_else(|e| panic!("{:?}: {} -> {}: {}", eq, x, t, e));
                            assert_eq!(out.dimension(), target.dimension);

                            // And back again
                            let back = crate::RESOLVER.uconvert(&x.unit, out, &eq).unwrap();
                            assert_relative_eq!(back.value.to_f64(), x.value.to_f64(), max_relative = 1e-9);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_angular_combinations() {
        let tau = std::f64::consts::TAU;
        let ang_f = PhotonEnergy::new(Convention::Angular, Convention::Linear, Convention::Linear);
        let ang_l = PhotonEnergy::new(Convention::Linear, Convention::Angular, Convention::Linear);
        let both = PhotonEnergy::new(Convention::Angular, Convention::Angular, Convention::Linear);

        let f_lin: f64 = ustrip_as(&unit("Hz"), q("1 m"), &linear()).unwrap();
        let f_ang: f64 = ustrip_as(&unit("Hz"), q("1 m"), &ang_f).unwrap();
        let f_red: f64 = ustrip_as(&unit("Hz"), q("1 m"), &ang_l).unwrap();
        let f_both: f64 = ustrip_as(&unit("Hz"), q("1 m"), &both).unwrap();

        assert_relative_eq!(f_lin, 299792458.0);
        assert_relative_eq!(f_ang, 299792458.0 * tau, max_relative = 1e-12);
        assert_relative_eq!(f_red, 299792458.0 / tau, max_relative = 1e-12);
        assert_relative_eq!(f_both, 299792458.0, max_relative = 1e-12);
    }

    #[test]
    fn test_spectral_has_no_wavenumber() {
        let err = uconvert(&unit("cm^-1"), q("2 eV"), &Spectral::default()).unwrap_err();
        assert_eq!(err, EquivalenceError::NoRelation {
            equivalence: "Spectral(linear, linear)".to_string(),
            from: Dimension::ENERGY,
            to: Dimension::WAVENUMBER,
        });
    }

    #[test]
    fn test_missing_relation_names_dimensions() {
        let err = uconvert(&unit("Hz"), q("1 kg"), &MassEnergy).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("MassEnergy"));
        assert!(msg.contains("mass"));
        assert!(msg.contains("frequency"));
    }

    #[test]
    fn test_by_name() {
        let eq = by_name("photon-energy:angular,linear,linear").unwrap();
        assert_eq!(eq.name(), "PhotonEnergy(angular, linear, linear)");

        let eq = by_name("Spectral").unwrap();
        assert_eq!(eq.tags().len(), 2);

        let eq = by_name("mass_energy").unwrap();
        let ev: f64 = ustrip_as(&unit("MeV"), q("1 m_e"), eq.as_ref()).unwrap();
        assert_relative_eq!(ev, 0.51099895, max_relative = 1e-7);
    }

    #[test]
    fn test_by_name_errors() {
        let err = by_name("photon").unwrap_err();
        assert_eq!(err.code, codes::UNKNOWN_EQUIVALENCE);
        assert!(err.suggestion.unwrap().contains("photon-energy"));

        let err = by_name("spectral:linear").unwrap_err();
        assert!(err.message.contains("takes 2 conventions"));

        let err = by_name("spectral:linear,circular").unwrap_err();
        assert!(err.message.contains("circular"));
    }
}
