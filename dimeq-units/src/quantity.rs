//! Quantity type - a value with an associated unit

use std::fmt;
use serde::{Serialize, Deserialize};
use dimeq_core::{Number, NumberError};
use crate::{Unit, Dimension};
use crate::unit::ConversionError;

/// A physical quantity: a numeric value with an associated unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quantity {
    /// The numeric value
    pub value: Number,
    /// The unit of measurement
    pub unit: Unit,
}

impl Quantity {
    /// Create a new quantity
    pub fn new(value: impl Into<Number>, unit: Unit) -> Self {
        Quantity { value: value.into(), unit }
    }

    /// Create a dimensionless quantity (pure number)
    pub fn dimensionless(value: impl Into<Number>) -> Self {
        Quantity::new(value, Unit::dimensionless())
    }

    /// Get the dimension of this quantity
    pub fn dimension(&self) -> Dimension {
        self.unit.dimension
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.unit.dimension.is_dimensionless()
    }

    /// Check if two quantities have compatible dimensions
    pub fn is_compatible(&self, other: &Quantity) -> bool {
        self.unit.is_compatible(&other.unit)
    }

    /// Convert to the coherent SI unit of this dimension
    pub fn to_si(&self) -> Quantity {
        Quantity::new(self.si_value(), Unit::si_base(self.dimension()))
    }

    /// Normalize an affine quantity (e.g. 20 degC) to the absolute scale.
    ///
    /// Quantities in proportional units are returned unchanged.
    pub fn to_absolute(&self) -> Quantity {
        if self.unit.has_offset() {
            Quantity::new(self.si_value(), self.unit.absolute())
        } else {
            self.clone()
        }
    }

    /// Convert to another unit
    pub fn convert_to(&self, target: &Unit) -> Result<Quantity, ConversionError> {
        let new_value = self.unit.convert_value(&self.value, target)?;
        Ok(Quantity::new(new_value, target.clone()))
    }

    /// Get the value in SI base units
    pub fn si_value(&self) -> Number {
        self.unit.to_si(&self.value)
    }

    /// Multiply by a plain number, keeping the unit
    pub fn scale(&self, factor: &Number) -> Quantity {
        Quantity::new(self.value.mul(factor), self.unit.clone())
    }

    /// Add two quantities (must have compatible dimensions)
    pub fn add(&self, other: &Quantity) -> Result<Quantity, ConversionError> {
        let converted = other.convert_to(&self.unit)?;
        Ok(Quantity::new(self.value.add(&converted.value), self.unit.clone()))
    }

    /// Multiply two quantities (dimensions are multiplied)
    pub fn mul(&self, other: &Quantity) -> Quantity {
        let new_value = self.value.mul(&other.value);
        let new_unit = self.unit.multiply(&other.unit);
        Quantity::new(new_value, new_unit)
    }

    /// Divide two quantities (dimensions are divided)
    pub fn div(&self, other: &Quantity) -> Result<Quantity, NumberError> {
        let new_value = self.value.checked_div(&other.value)?;
        let new_unit = self.unit.divide(&other.unit)?;
        Ok(Quantity::new(new_value, new_unit))
    }

    /// Raise quantity to an integer power
    pub fn pow(&self, exp: i32) -> Result<Quantity, NumberError> {
        let new_value = self.value.pow(exp)?;
        let new_unit = self.unit.power(exp)?;
        Ok(Quantity::new(new_value, new_unit))
    }
}

impl From<Number> for Quantity {
    fn from(value: Number) -> Self {
        Quantity::dimensionless(value)
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Quantity::dimensionless(value)
    }
}

impl From<i32> for Quantity {
    fn from(value: i32) -> Self {
        Quantity::dimensionless(value)
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Quantity::dimensionless(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit.symbol)
        }
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        // Compare SI values for equality
        if !self.is_compatible(other) {
            return false;
        }
        self.si_value() == other.si_value()
    }
}
