//! Unit representation with conversion factors

use std::fmt;
use serde::{Serialize, Deserialize};
use dimeq_core::{DimeqError, Number, NumberError, codes};
use crate::Dimension;

/// Represents a physical unit with its dimension and conversion factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// The unit symbol (e.g., "m", "kg", "s")
    pub symbol: String,
    /// The unit name (e.g., "meter", "kilogram", "second")
    pub name: String,
    /// The dimensional signature
    pub dimension: Dimension,
    /// Factor to convert to SI base unit (value_si = value * to_si_factor + to_si_offset)
    pub to_si_factor: Number,
    /// Offset for affine units like Celsius and Fahrenheit
    pub to_si_offset: Number,
    /// Category for organization (e.g., "length", "mass", "time")
    pub category: String,
}

impl Unit {
    /// Create a new unit with proportional conversion (no offset)
    pub fn new(
        symbol: &str,
        name: &str,
        dimension: Dimension,
        to_si_factor: Number,
        category: &str,
    ) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            to_si_factor,
            to_si_offset: Number::from_i64(0),
            category: category.to_string(),
        }
    }

    /// Create a unit with offset (for temperature conversions)
    pub fn with_offset(
        symbol: &str,
        name: &str,
        dimension: Dimension,
        to_si_factor: Number,
        to_si_offset: Number,
        category: &str,
    ) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            to_si_factor,
            to_si_offset,
            category: category.to_string(),
        }
    }

    /// The unit of plain numbers
    pub fn dimensionless() -> Self {
        Unit::new("", "dimensionless", Dimension::DIMENSIONLESS, Number::from_i64(1), "dimensionless")
    }

    /// The coherent SI unit for a dimension (factor 1, no offset)
    pub fn si_base(dimension: Dimension) -> Self {
        let symbol = si_symbol(dimension);
        let name = dimension.name().map(|s| s.to_string()).unwrap_or_else(|| symbol.clone());
        Unit::new(&symbol, &name, dimension, Number::from_i64(1), "si_base")
    }

    /// The absolute-scale counterpart of an affine unit.
    ///
    /// Affine units map to the coherent SI unit of their dimension (degC and
    /// degF both become K). Proportional units are returned unchanged.
    pub fn absolute(&self) -> Unit {
        if self.has_offset() {
            Unit::si_base(self.dimension)
        } else {
            self.clone()
        }
    }

    /// Check if this is a base SI unit
    pub fn is_si_base(&self) -> bool {
        self.to_si_factor == Number::from_i64(1) && self.to_si_offset.is_zero()
    }

    /// Check if this unit has an offset (affine scale)
    pub fn has_offset(&self) -> bool {
        !self.to_si_offset.is_zero()
    }

    /// Check if two units are dimensionally compatible (can be converted)
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Convert a value from this unit to SI base unit
    pub fn to_si(&self, value: &Number) -> Number {
        // value_si = value * factor + offset
        value.mul(&self.to_si_factor).add(&self.to_si_offset)
    }

    /// Convert a value from SI base unit to this unit
    pub fn from_si(&self, value_si: &Number) -> Result<Number, NumberError> {
        // value = (value_si - offset) / factor
        let shifted = value_si.sub(&self.to_si_offset);
        shifted.checked_div(&self.to_si_factor)
    }

    /// Convert a value from this unit to another unit of the same dimension
    pub fn convert_value(&self, value: &Number, target: &Unit) -> Result<Number, ConversionError> {
        if !self.is_compatible(target) {
            return Err(ConversionError::IncompatibleDimensions {
                from: self.symbol.clone(),
                to: target.symbol.clone(),
                from_dim: self.dimension,
                to_dim: target.dimension,
            });
        }

        if self == target {
            return Ok(value.clone());
        }

        // Convert to SI, then from SI to target
        let si_value = self.to_si(value);
        target.from_si(&si_value).map_err(ConversionError::NumberError)
    }

    /// Multiply two units (e.g., m * m -> m^2)
    pub fn multiply(&self, other: &Unit) -> Unit {
        Unit {
            symbol: join_symbols(&self.symbol, "*", &other.symbol),
            name: format!("{} {}", self.name, other.name).trim().to_string(),
            dimension: self.dimension.multiply(&other.dimension),
            to_si_factor: self.to_si_factor.mul(&other.to_si_factor),
            to_si_offset: Number::from_i64(0), // Product of offset units loses meaning
            category: "derived".to_string(),
        }
    }

    /// Divide two units (e.g., m / s -> m/s)
    pub fn divide(&self, other: &Unit) -> Result<Unit, NumberError> {
        let factor = self.to_si_factor.checked_div(&other.to_si_factor)?;
        let numerator = if self.symbol.is_empty() { "1" } else { &self.symbol };

        Ok(Unit {
            symbol: join_symbols(numerator, "/", &other.symbol),
            name: format!("{} per {}", self.name, other.name),
            dimension: self.dimension.divide(&other.dimension),
            to_si_factor: factor,
            to_si_offset: Number::from_i64(0),
            category: "derived".to_string(),
        })
    }

    /// Raise unit to a power (e.g., m^2, m^3, cm^-1)
    pub fn power(&self, exp: i32) -> Result<Unit, NumberError> {
        let new_factor = self.to_si_factor.pow(exp)?;

        let symbol = if exp == 1 {
            self.symbol.clone()
        } else {
            format!("{}^{}", self.symbol, exp)
        };

        Ok(Unit {
            symbol,
            name: format!("{} to the {}", self.name, exp),
            dimension: self.dimension.power(exp),
            to_si_factor: new_factor,
            to_si_offset: Number::from_i64(0),
            category: self.category.clone(),
        })
    }
}

fn join_symbols(left: &str, op: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, true) => String::new(),
        (true, false) if op == "*" => right.to_string(),
        (false, true) => left.to_string(),
        _ => format!("{}{}{}", left, op, right),
    }
}

/// Conventional SI symbol for a named dimension
fn si_symbol(dimension: Dimension) -> String {
    let symbol = match dimension.name() {
        Some("dimensionless") => "",
        Some("length") => "m",
        Some("mass") => "kg",
        Some("time") => "s",
        Some("current") => "A",
        Some("temperature") => "K",
        Some("amount") => "mol",
        Some("luminosity") => "cd",
        Some("velocity") => "m/s",
        Some("acceleration") => "m/s^2",
        Some("force") => "N",
        Some("energy") => "J",
        Some("power") => "W",
        Some("pressure") => "Pa",
        Some("momentum") => "kg*m/s",
        Some("area") => "m^2",
        Some("volume") => "m^3",
        Some("frequency") => "Hz",
        Some("wavenumber") => "m^-1",
        Some("charge") => "Coul",
        Some("voltage") => "V",
        Some("resistance") => "ohm",
        _ => return format!("{}", dimension),
    };
    symbol.to_string()
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Errors that can occur during unit conversion
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Units have incompatible dimensions
    IncompatibleDimensions {
        from: String,
        to: String,
        from_dim: Dimension,
        to_dim: Dimension,
    },
    /// Unknown unit symbol
    UnknownUnit(String),
    /// Malformed unit or quantity text
    Syntax(String),
    /// Numeric error during conversion
    NumberError(NumberError),
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::IncompatibleDimensions { from, to, from_dim, to_dim } => {
                write!(f, "cannot convert {} ({}) to {} ({}): incompatible dimensions",
                    from, from_dim, to, to_dim)
            }
            ConversionError::UnknownUnit(unit) => {
                write!(f, "unknown unit: {}", unit)
            }
            ConversionError::Syntax(details) => {
                write!(f, "invalid syntax: {}", details)
            }
            ConversionError::NumberError(e) => {
                write!(f, "numeric error: {}", e)
            }
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<NumberError> for ConversionError {
    fn from(err: NumberError) -> Self {
        ConversionError::NumberError(err)
    }
}

impl From<ConversionError> for DimeqError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::IncompatibleDimensions { .. } => {
                DimeqError::new(codes::INCOMPATIBLE_DIMENSIONS, err.to_string())
                    .with_suggestion("Pass an equivalence to cross dimension boundaries")
            }
            ConversionError::UnknownUnit(symbol) => DimeqError::unknown_unit(&symbol),
            ConversionError::Syntax(details) => DimeqError::parse_error(details),
            ConversionError::NumberError(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter() -> Unit {
        Unit::new("m", "meter", Dimension::LENGTH, Number::from_i64(1), "length")
    }

    fn kilometer() -> Unit {
        Unit::new("km", "kilometer", Dimension::LENGTH, Number::from_i64(1000), "length")
    }

    fn second() -> Unit {
        Unit::new("s", "second", Dimension::TIME, Number::from_i64(1), "time")
    }

    fn celsius() -> Unit {
        Unit::with_offset("degC", "celsius", Dimension::TEMPERATURE,
            Number::from_i64(1), Number::from_str("273.15").unwrap(), "temperature")
    }

    #[test]
    fn test_si_base_unit() {
        assert!(meter().is_si_base());
        assert!(!kilometer().is_si_base());
        assert!(!celsius().is_si_base());
    }

    #[test]
    fn test_compatible_units() {
        let m = meter();
        let km = kilometer();
        let s = second();

        assert!(m.is_compatible(&km));
        assert!(!m.is_compatible(&s));
    }

    #[test]
    fn test_to_si_conversion() {
        let km = kilometer();
        let value = Number::from_i64(5);
        assert_eq!(km.to_si(&value), Number::from_i64(5000));
    }

    #[test]
    fn test_from_si_conversion() {
        let km = kilometer();
        let value = km.from_si(&Number::from_i64(5000)).unwrap();
        assert_eq!(value, Number::from_i64(5));
    }

    #[test]
    fn test_unit_conversion() {
        let value = Number::from_i64(5000);
        let converted = meter().convert_value(&value, &kilometer()).unwrap();
        assert_eq!(converted, Number::from_i64(5));
    }

    #[test]
    fn test_incompatible_conversion() {
        let err = meter().convert_value(&Number::from_i64(1), &second()).unwrap_err();
        assert!(matches!(err, ConversionError::IncompatibleDimensions { .. }));
    }

    #[test]
    fn test_offset_conversion_is_exact() {
        let kelvin = Unit::si_base(Dimension::TEMPERATURE);
        let value = celsius().convert_value(&Number::from_i64(20), &kelvin).unwrap();
        assert_eq!(value, Number::from_str("293.15").unwrap());
        assert!(value.is_exact());
    }

    #[test]
    fn test_absolute() {
        assert_eq!(celsius().absolute().symbol, "K");
        assert_eq!(kilometer().absolute(), kilometer());
    }

    #[test]
    fn test_unit_power() {
        let m2 = meter().power(2).unwrap();
        assert_eq!(m2.symbol, "m^2");
        assert_eq!(m2.dimension, Dimension::AREA);
    }

    #[test]
    fn test_unit_multiply() {
        let m2 = meter().multiply(&meter());
        assert_eq!(m2.dimension, Dimension::AREA);
        assert_eq!(m2.symbol, "m*m");
    }

    #[test]
    fn test_unit_divide() {
        let velocity = meter().divide(&second()).unwrap();
        assert_eq!(velocity.dimension, Dimension::VELOCITY);
        assert_eq!(velocity.symbol, "m/s");
    }

    #[test]
    fn test_si_base_symbols() {
        assert_eq!(Unit::si_base(Dimension::ENERGY).symbol, "J");
        assert_eq!(Unit::si_base(Dimension::DIMENSIONLESS).symbol, "");
        assert_eq!(Unit::si_base(Dimension::new([1, 0, 0, 0, 1, 0, 0])).symbol, "L Θ");
    }

    #[test]
    fn test_error_code() {
        let err = meter().convert_value(&Number::from_i64(1), &second()).unwrap_err();
        let err: DimeqError = err.into();
        assert_eq!(err.code, codes::INCOMPATIBLE_DIMENSIONS);
    }
}
