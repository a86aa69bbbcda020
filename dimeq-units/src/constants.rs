//! Physical constants as quantities
//!
//! The defining constants of the 2019 SI are exact decimals and are kept as
//! exact rationals. `hbar` involves 2π and is therefore floating point.

use dimeq_core::Number;
use crate::{Dimension, Quantity, Unit};

fn exact(literal: &str) -> Number {
    Number::from_str(literal).expect("constant literal is well-formed")
}

fn coherent(symbol: &str, name: &str, dimension: Dimension) -> Unit {
    Unit::new(symbol, name, dimension, Number::from_i64(1), "constant")
}

/// Speed of light in vacuum, 299792458 m/s
pub fn c() -> Quantity {
    Quantity::new(Number::from_i64(299_792_458), coherent("m/s", "meter per second", Dimension::VELOCITY))
}

/// Square of the speed of light, in m^2/s^2
pub fn c_squared() -> Quantity {
    let c = c();
    Quantity::new(
        c.value.mul(&c.value),
        coherent("m^2/s^2", "square meter per square second", Dimension::VELOCITY.power(2)),
    )
}

/// Planck constant, 6.62607015e-34 J*s
pub fn h() -> Quantity {
    Quantity::new(
        exact("6.62607015e-34"),
        coherent("J*s", "joule second", Dimension::ENERGY.multiply(&Dimension::TIME)),
    )
}

/// Reduced Planck constant h / 2π
pub fn hbar() -> Quantity {
    let h = h();
    let value = Number::from_f64(h.value.to_f64() / std::f64::consts::TAU);
    Quantity::new(value, h.unit)
}

/// Elementary charge, 1.602176634e-19 C
pub fn e() -> Quantity {
    Quantity::new(exact("1.602176634e-19"), coherent("Coul", "coulomb", Dimension::CHARGE))
}

/// Boltzmann constant, 1.380649e-23 J/K
pub fn k_b() -> Quantity {
    Quantity::new(
        exact("1.380649e-23"),
        coherent("J/K", "joule per kelvin", Dimension::ENERGY.divide(&Dimension::TEMPERATURE)),
    )
}

/// h*c, in J*m
pub fn hc() -> Quantity {
    let product = h().value.mul(&c().value);
    Quantity::new(product, coherent("J*m", "joule meter", Dimension::ENERGY.multiply(&Dimension::LENGTH)))
}

/// ħ*c, in J*m
pub fn hbar_c() -> Quantity {
    let product = hbar().value.mul(&c().value);
    Quantity::new(product, coherent("J*m", "joule meter", Dimension::ENERGY.multiply(&Dimension::LENGTH)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defining_constants_are_exact() {
        assert!(c().value.is_exact());
        assert!(h().value.is_exact());
        assert!(e().value.is_exact());
        assert!(k_b().value.is_exact());
        assert!(hc().value.is_exact());
    }

    #[test]
    fn test_hbar() {
        assert!(!hbar().value.is_exact());
        assert_relative_eq!(hbar().value.to_f64(), 1.054571817e-34, max_relative = 1e-9);
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(c_squared().dimension(), Dimension::ENERGY.divide(&Dimension::MASS));
        assert_eq!(k_b().dimension(), Dimension::ENERGY.divide(&Dimension::TEMPERATURE));
        assert_eq!(hc().dimension(), Dimension::ENERGY.multiply(&Dimension::LENGTH));
    }

    #[test]
    fn test_electronvolt_matches_charge() {
        let ev = crate::UNITS.get("eV").unwrap();
        assert_eq!(ev.to_si_factor, e().value);
    }
}
