//! Unit string parsing - parse expressions like "km/h" or "m^2"

use dimeq_core::Number;
use crate::{Unit, Quantity};
use crate::unit::ConversionError;
use crate::units::UNITS;

/// Parse a unit string into a Unit
///
/// Supported formats:
/// - Simple: "m", "kg", "s"
/// - Powers: "m^2", "s^-1", "m³"
/// - Products: "m*s", "N*m^3"
/// - Quotients: "m/s", "J/K"
/// - Combined: "kg*m/s^2"
pub fn parse_unit(s: &str) -> Result<Unit, ConversionError> {
    let s = s.trim();

    if s.is_empty() {
        return Ok(Unit::dimensionless());
    }

    // Try simple lookup first
    if let Some(unit) = UNITS.get(s) {
        return Ok(unit.clone());
    }

    parse_unit_expression(s)
}

/// Parse a complex unit expression like "kg*m/s^2"
fn parse_unit_expression(s: &str) -> Result<Unit, ConversionError> {
    let (num, den) = match s.split_once('/') {
        Some((num, den)) => (num, Some(den)),
        None => (s, None),
    };

    let numerator = parse_product(num)?;
    match den {
        None => Ok(numerator),
        Some(den) => {
            if den.contains('/') {
                return Err(ConversionError::Syntax(format!("more than one '/' in unit: {}", s)));
            }
            let denominator = parse_product(den)?;
            Ok(numerator.divide(&denominator)?)
        }
    }
}

/// Parse a product of units like "kg*m" or "m^2*s"
fn parse_product(s: &str) -> Result<Unit, ConversionError> {
    let factors: Vec<&str> = s.split(|c: char| c == '*' || c == '·' || c == ' ')
        .filter(|p| !p.is_empty())
        .collect();

    let Some((first, rest)) = factors.split_first() else {
        return Ok(Unit::dimensionless());
    };

    let mut result = parse_power(first)?;
    for factor in rest {
        result = result.multiply(&parse_power(factor)?);
    }
    Ok(result)
}

/// Largest exponent magnitude accepted in "m^n" or superscript form
const MAX_POWER: i32 = 64;

/// Parse a unit with optional power like "m^2" or "s^-1"
fn parse_power(s: &str) -> Result<Unit, ConversionError> {
    if let Some((base, exp_str)) = s.split_once('^') {
        let exponent = exp_str.parse::<i32>().ok()
            .filter(|e| e.unsigned_abs() <= MAX_POWER.unsigned_abs())
            .ok_or_else(|| ConversionError::Syntax(format!("invalid exponent: {}", exp_str)))?;
        return Ok(lookup_base_unit(base)?.power(exponent)?);
    }

    if let Some((base, exp)) = parse_superscript(s)? {
        return Ok(lookup_base_unit(base)?.power(exp)?);
    }

    lookup_base_unit(s)
}

/// Split trailing superscript exponents like m², cm⁻¹
fn parse_superscript(s: &str) -> Result<Option<(&str, i32)>, ConversionError> {
    const DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

    let Some(start) = s.char_indices()
        .find(|(_, c)| DIGITS.contains(c) || *c == '⁻')
        .map(|(i, _)| i)
    else {
        return Ok(None);
    };
    let (base, sup) = s.split_at(start);

    let (negative, digits) = match sup.strip_prefix('⁻') {
        Some(rest) => (true, rest),
        None => (false, sup),
    };
    if digits.is_empty() || base.is_empty() {
        return Ok(None);
    }

    let mut exp = 0i32;
    for c in digits.chars() {
        let Some(d) = DIGITS.iter().position(|&x| x == c) else {
            return Ok(None);
        };
        exp = exp * 10 + d as i32;
        if exp > MAX_POWER {
            return Err(ConversionError::Syntax(format!("invalid exponent: {}", sup)));
        }
    }
    Ok(Some((base, if negative { -exp } else { exp })))
}

/// Look up a base unit by symbol or alias
fn lookup_base_unit(s: &str) -> Result<Unit, ConversionError> {
    let s = s.trim();

    if s == "1" || s.is_empty() {
        return Ok(Unit::dimensionless());
    }

    UNITS.get(s)
        .cloned()
        .ok_or_else(|| ConversionError::UnknownUnit(s.to_string()))
}

/// Length of the numeric prefix of a quantity string
fn number_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;

    while end < bytes.len() {
        let c = bytes[end];
        let next_is_digit = bytes.get(end + 1).is_some_and(|b| b.is_ascii_digit());
        let next_is_signed_digit = matches!(bytes.get(end + 1), Some(b'+') | Some(b'-'))
            && bytes.get(end + 2).is_some_and(|b| b.is_ascii_digit());

        let accept = match c {
            b'0'..=b'9' => {
                seen_digit = true;
                true
            }
            b'+' | b'-' => end == 0,
            b'.' => true,
            // An exponent marker only when digits follow, so "3eV" is 3 eV
            b'e' | b'E' => seen_digit && (next_is_digit || next_is_signed_digit),
            b'/' => seen_digit && next_is_digit,
            _ => false,
        };
        if !accept {
            break;
        }
        if (c == b'e' || c == b'E') && next_is_signed_digit {
            end += 1;
        }
        end += 1;
    }

    if seen_digit { end } else { 0 }
}

/// Parse a quantity string like "5 m", "589nm" or "-3/2 s"
pub fn parse_quantity_string(s: &str) -> Result<(Number, Unit), ConversionError> {
    let s = s.trim();
    let split_pos = number_prefix_len(s);

    if split_pos == 0 {
        return Err(ConversionError::Syntax(format!("no number found in: {}", s)));
    }

    let (num_str, unit_str) = s.split_at(split_pos);
    let value = Number::from_str(num_str)?;
    let unit = parse_unit(unit_str)?;

    Ok((value, unit))
}

/// Parse a quantity directly
pub fn parse_quantity(s: &str) -> Result<Quantity, ConversionError> {
    let (value, unit) = parse_quantity_string(s)?;
    Ok(Quantity::new(value, unit))
}

/// Parse a conversion request like "589 nm -> eV" or "20 degC to eV"
pub fn parse_conversion(s: &str) -> Result<(Quantity, Unit), ConversionError> {
    let separators = ["->", "→", " to ", " in "];

    let (from, to) = separators.iter()
        .find_map(|sep| s.split_once(sep))
        .ok_or_else(|| ConversionError::Syntax(
            format!("invalid conversion format: {}, expected 'quantity -> unit'", s)
        ))?;

    if to.contains("->") || to.contains('→') {
        return Err(ConversionError::Syntax(
            format!("invalid conversion format: {}, expected 'quantity -> unit'", s)
        ));
    }

    let quantity = parse_quantity(from)?;
    let target = parse_unit(to)?;

    Ok((quantity, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dimension;

    #[test]
    fn test_parse_simple_unit() {
        let unit = parse_unit("m").unwrap();
        assert_eq!(unit.symbol, "m");
        assert_eq!(unit.dimension, Dimension::LENGTH);
    }

    #[test]
    fn test_parse_unit_with_power() {
        let unit = parse_unit("m^2").unwrap();
        assert_eq!(unit.dimension, Dimension::AREA);

        let unit = parse_unit("s^-1").unwrap();
        assert_eq!(unit.dimension, Dimension::FREQUENCY);
    }

    #[test]
    fn test_parse_superscripts() {
        assert_eq!(parse_unit("m³").unwrap().dimension, Dimension::VOLUME);
        let unit = parse_unit("cm⁻¹").unwrap();
        assert_eq!(unit.dimension, Dimension::WAVENUMBER);
        assert_eq!(unit.to_si_factor, Number::from_i64(100));
    }

    #[test]
    fn test_parse_oversized_exponents() {
        assert!(matches!(parse_unit("m¹¹¹¹¹¹¹¹¹¹¹"), Err(ConversionError::Syntax(_))));
        assert!(matches!(parse_unit("m⁻⁹⁹"), Err(ConversionError::Syntax(_))));
        assert!(matches!(parse_unit("m^2000000000"), Err(ConversionError::Syntax(_))));
        assert!(matches!(parse_unit("m^99999999999"), Err(ConversionError::Syntax(_))));
        assert!(matches!(parse_unit("m^-2147483648"), Err(ConversionError::Syntax(_))));
        assert!(parse_quantity("1 m¹¹¹¹¹¹¹¹¹¹¹").is_err());

        assert_eq!(parse_unit("m^-64").unwrap().dimension, Dimension::LENGTH.power(-64));
        assert_eq!(parse_unit("m⁶⁴").unwrap().dimension, Dimension::LENGTH.power(64));
    }

    #[test]
    fn test_parse_quotient() {
        let unit = parse_unit("J/K").unwrap();
        assert_eq!(unit.dimension, Dimension::ENERGY.divide(&Dimension::TEMPERATURE));
    }

    #[test]
    fn test_parse_product() {
        let unit = parse_unit("N*m^3").unwrap();
        let expected = Dimension::FORCE.multiply(&Dimension::VOLUME);
        assert_eq!(unit.dimension, expected);
    }

    #[test]
    fn test_parse_complex() {
        let unit = parse_unit("kg*m/s^2").unwrap();
        assert_eq!(unit.dimension, Dimension::FORCE);
    }

    #[test]
    fn test_parse_double_slash() {
        let err = parse_unit("m/s/s").unwrap_err();
        assert!(matches!(err, ConversionError::Syntax(_)));
    }

    #[test]
    fn test_parse_conversion() {
        let (q, to) = parse_conversion("589 nm -> eV").unwrap();
        assert_eq!(q.value, Number::from_i64(589));
        assert_eq!(q.unit.symbol, "nm");
        assert_eq!(to.symbol, "eV");
    }

    #[test]
    fn test_parse_conversion_words() {
        let (q, to) = parse_conversion("20 C to eV").unwrap();
        // C is an alias for degC
        assert_eq!(q.unit.symbol, "degC");
        assert_eq!(to.symbol, "eV");
    }

    #[test]
    fn test_parse_conversion_bad_format() {
        let err = parse_conversion("589 nm").unwrap_err();
        assert!(matches!(err, ConversionError::Syntax(_)));
    }

    #[test]
    fn test_parse_quantity_string() {
        let (value, unit) = parse_quantity_string("5 m").unwrap();
        assert_eq!(value, Number::from_i64(5));
        assert_eq!(unit.symbol, "m");

        let (value, unit) = parse_quantity_string("100kg").unwrap();
        assert_eq!(value, Number::from_i64(100));
        assert_eq!(unit.symbol, "kg");

        let (value, unit) = parse_quantity_string("-3/2 s").unwrap();
        assert_eq!(value, Number::from_ratio(-3, 2).unwrap());
        assert_eq!(unit.symbol, "s");
    }

    #[test]
    fn test_exponent_vs_electronvolt() {
        let (value, unit) = parse_quantity_string("3eV").unwrap();
        assert_eq!(value, Number::from_i64(3));
        assert_eq!(unit.symbol, "eV");

        let (value, unit) = parse_quantity_string("1.5e-3 eV").unwrap();
        assert_eq!(value, Number::from_str("0.0015").unwrap());
        assert_eq!(unit.symbol, "eV");
    }

    #[test]
    fn test_bare_number_is_dimensionless() {
        let q = parse_quantity("42").unwrap();
        assert!(q.is_dimensionless());
    }

    #[test]
    fn test_alias_lookup() {
        let unit = parse_unit("meter").unwrap();
        assert_eq!(unit.symbol, "m");

        let unit = parse_unit("electronvolt").unwrap();
        assert_eq!(unit.symbol, "eV");
    }

    #[test]
    fn test_unknown_unit() {
        let err = parse_unit("furlong").unwrap_err();
        assert_eq!(err, ConversionError::UnknownUnit("furlong".to_string()));
    }
}
