//! Dimensional analysis types
//!
//! Each physical quantity has dimensions represented as a 7-element vector:
//! [length, mass, time, current, temperature, amount, luminosity]
//!
//! A `Dimension` is an identity, not a magnitude. It is `Copy + Eq + Hash`
//! so it can key dispatch tables directly.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Represents the dimensions of a physical quantity
/// as exponents of the 7 SI base dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    /// [length, mass, time, current, temperature, amount, luminosity]
    pub exponents: [i32; 7],
}

/// Named dimensions, in lookup order for `name()`
const NAMED: [(&str, Dimension); 22] = [
    ("dimensionless", Dimension::DIMENSIONLESS),
    ("length", Dimension::LENGTH),
    ("mass", Dimension::MASS),
    ("time", Dimension::TIME),
    ("current", Dimension::CURRENT),
    ("temperature", Dimension::TEMPERATURE),
    ("amount", Dimension::AMOUNT),
    ("luminosity", Dimension::LUMINOSITY),
    ("velocity", Dimension::VELOCITY),
    ("acceleration", Dimension::ACCELERATION),
    ("force", Dimension::FORCE),
    ("energy", Dimension::ENERGY),
    ("power", Dimension::POWER),
    ("pressure", Dimension::PRESSURE),
    ("area", Dimension::AREA),
    ("volume", Dimension::VOLUME),
    ("frequency", Dimension::FREQUENCY),
    ("wavenumber", Dimension::WAVENUMBER),
    ("charge", Dimension::CHARGE),
    ("voltage", Dimension::VOLTAGE),
    ("resistance", Dimension::RESISTANCE),
    ("momentum", Dimension::MOMENTUM),
];

impl Dimension {
    /// Dimensionless quantity (all exponents zero)
    pub const DIMENSIONLESS: Dimension = Dimension { exponents: [0, 0, 0, 0, 0, 0, 0] };

    /// Length dimension [L]
    pub const LENGTH: Dimension = Dimension { exponents: [1, 0, 0, 0, 0, 0, 0] };

    /// Mass dimension [M]
    pub const MASS: Dimension = Dimension { exponents: [0, 1, 0, 0, 0, 0, 0] };

    /// Time dimension [T]
    pub const TIME: Dimension = Dimension { exponents: [0, 0, 1, 0, 0, 0, 0] };

    /// Electric current dimension [I]
    pub const CURRENT: Dimension = Dimension { exponents: [0, 0, 0, 1, 0, 0, 0] };

    /// Temperature dimension [Θ]
    pub const TEMPERATURE: Dimension = Dimension { exponents: [0, 0, 0, 0, 1, 0, 0] };

    /// Amount of substance dimension [N]
    pub const AMOUNT: Dimension = Dimension { exponents: [0, 0, 0, 0, 0, 1, 0] };

    /// Luminous intensity dimension [J]
    pub const LUMINOSITY: Dimension = Dimension { exponents: [0, 0, 0, 0, 0, 0, 1] };

    /// Velocity [L T^-1]
    pub const VELOCITY: Dimension = Dimension { exponents: [1, 0, -1, 0, 0, 0, 0] };

    /// Acceleration [L T^-2]
    pub const ACCELERATION: Dimension = Dimension { exponents: [1, 0, -2, 0, 0, 0, 0] };

    /// Force [M L T^-2]
    pub const FORCE: Dimension = Dimension { exponents: [1, 1, -2, 0, 0, 0, 0] };

    /// Energy [M L^2 T^-2]
    pub const ENERGY: Dimension = Dimension { exponents: [2, 1, -2, 0, 0, 0, 0] };

    /// Power [M L^2 T^-3]
    pub const POWER: Dimension = Dimension { exponents: [2, 1, -3, 0, 0, 0, 0] };

    /// Pressure [M L^-1 T^-2]
    pub const PRESSURE: Dimension = Dimension { exponents: [-1, 1, -2, 0, 0, 0, 0] };

    /// Momentum [M L T^-1]
    pub const MOMENTUM: Dimension = Dimension { exponents: [1, 1, -1, 0, 0, 0, 0] };

    /// Area [L^2]
    pub const AREA: Dimension = Dimension { exponents: [2, 0, 0, 0, 0, 0, 0] };

    /// Volume [L^3]
    pub const VOLUME: Dimension = Dimension { exponents: [3, 0, 0, 0, 0, 0, 0] };

    /// Frequency [T^-1]
    pub const FREQUENCY: Dimension = Dimension { exponents: [0, 0, -1, 0, 0, 0, 0] };

    /// Wavenumber [L^-1]
    pub const WAVENUMBER: Dimension = Dimension { exponents: [-1, 0, 0, 0, 0, 0, 0] };

    /// Electric charge [I T]
    pub const CHARGE: Dimension = Dimension { exponents: [0, 0, 1, 1, 0, 0, 0] };

    /// Voltage [M L^2 T^-3 I^-1]
    pub const VOLTAGE: Dimension = Dimension { exponents: [2, 1, -3, -1, 0, 0, 0] };

    /// Resistance [M L^2 T^-3 I^-2]
    pub const RESISTANCE: Dimension = Dimension { exponents: [2, 1, -3, -2, 0, 0, 0] };

    /// Create a new dimension from exponents
    pub fn new(exponents: [i32; 7]) -> Self {
        Dimension { exponents }
    }

    /// Look up a dimension by name, ignoring case, spaces and underscores.
    ///
    /// `"Energy"`, `"energy"` and `"Wave_number"` all resolve.
    pub fn from_name(name: &str) -> Option<Dimension> {
        let key: String = name
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        NAMED.iter()
            .find(|(n, _)| *n == key)
            .map(|(_, d)| *d)
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Multiply dimensions (add exponents)
    pub fn multiply(&self, other: &Dimension) -> Dimension {
        let mut result = [0i32; 7];
        for (i, slot) in result.iter_mut().enumerate() {
            *slot = self.exponents[i] + other.exponents[i];
        }
        Dimension { exponents: result }
    }

    /// Divide dimensions (subtract exponents)
    pub fn divide(&self, other: &Dimension) -> Dimension {
        self.multiply(&other.invert())
    }

    /// Raise to integer power (multiply exponents)
    pub fn power(&self, exp: i32) -> Dimension {
        Dimension { exponents: self.exponents.map(|e| e * exp) }
    }

    /// Invert dimensions (negate exponents)
    pub fn invert(&self) -> Dimension {
        self.power(-1)
    }

    /// Get the dimension name if it matches a common dimension
    pub fn name(&self) -> Option<&'static str> {
        NAMED.iter()
            .find(|(_, d)| d == self)
            .map(|(n, _)| *n)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = ["L", "M", "T", "I", "Θ", "N", "J"];
        let mut parts = Vec::new();

        for (i, &exp) in self.exponents.iter().enumerate() {
            if exp != 0 {
                if exp == 1 {
                    parts.push(names[i].to_string());
                } else {
                    parts.push(format!("{}^{}", names[i], exp));
                }
            }
        }

        if parts.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensionless() {
        assert!(Dimension::DIMENSIONLESS.is_dimensionless());
        assert!(!Dimension::LENGTH.is_dimensionless());
    }

    #[test]
    fn test_multiply() {
        let velocity = Dimension::LENGTH.divide(&Dimension::TIME);
        assert_eq!(velocity, Dimension::VELOCITY);
    }

    #[test]
    fn test_force() {
        // Force = Mass * Acceleration = M * L * T^-2
        let force = Dimension::MASS.multiply(&Dimension::ACCELERATION);
        assert_eq!(force, Dimension::FORCE);
    }

    #[test]
    fn test_power() {
        let area = Dimension::LENGTH.power(2);
        assert_eq!(area, Dimension::AREA);
        assert_eq!(Dimension::LENGTH.invert(), Dimension::WAVENUMBER);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Dimension::from_name("Energy"), Some(Dimension::ENERGY));
        assert_eq!(Dimension::from_name("wave_number"), Some(Dimension::WAVENUMBER));
        assert_eq!(Dimension::from_name("Dimensionless"), Some(Dimension::DIMENSIONLESS));
        assert_eq!(Dimension::from_name("Flux"), None);
    }

    #[test]
    fn test_name() {
        assert_eq!(Dimension::FREQUENCY.name(), Some("frequency"));
        assert_eq!(Dimension::WAVENUMBER.name(), Some("wavenumber"));
        assert_eq!(Dimension::new([1, 0, 0, 0, 1, 0, 0]).name(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Dimension::DIMENSIONLESS), "1");
        assert_eq!(format!("{}", Dimension::LENGTH), "L");
        assert_eq!(format!("{}", Dimension::VELOCITY), "L T^-1");
        assert_eq!(format!("{}", Dimension::ENERGY), "L^2 M T^-2");
    }
}
