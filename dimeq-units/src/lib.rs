//! dimeq Units - Dimensions, Units and Quantities
//!
//! Provides unit-aware quantities with dimensional analysis. Conversions
//! inside one dimension live here; crossing dimensions is the job of the
//! `dimeq` crate.
//!
//! Categories:
//! - Length (m, nm, Å, ft, au, etc.)
//! - Mass (kg, g, lb, m_e, u, etc.)
//! - Time (s, min, h, etc.)
//! - Temperature (K, degC, degF, R)
//! - Energy (J, cal, kWh, eV family)
//! - Frequency and wavenumber (Hz family, kayser, cm^-1)
//! - Mechanics (N, Pa, W, m/s, m^3)
//! - Electrical (V, ohm, Coul)
//! - Angle (rad, deg, turn)

mod dimension;
mod unit;
mod quantity;
mod parse;
mod units;
pub mod constants;

pub use dimension::Dimension;
pub use unit::{Unit, ConversionError};
pub use quantity::Quantity;
pub use units::{UNITS, UnitRegistry};
pub use parse::{parse_unit, parse_quantity, parse_quantity_string, parse_conversion};
