//! Proportional and antiproportional relations between two dimensions
//!
//! `A / B = k` generates `to_A(b) = b * k` and `to_B(a) = a / k`.
//! `A * B = k` generates `to_A(b) = k / b` and `to_B(a) = k / a`.

use std::fmt;

use dimeq_units::{Dimension, Quantity};
use serde::Serialize;

use crate::error::{EquivalenceError, RegistrationError};

/// Shape of a relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// `A / B = k`
    Proportional,
    /// `A * B = k`
    Antiproportional,
}

impl RelationKind {
    pub fn operator(&self) -> char {
        match self {
            RelationKind::Proportional => '/',
            RelationKind::Antiproportional => '*',
        }
    }
}

/// A relation between two distinct dimensions, without its constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Relation {
    pub kind: RelationKind,
    pub a: Dimension,
    pub b: Dimension,
}

fn lookup(name: &str) -> Result<Dimension, RegistrationError> {
    if name == "1" {
        return Ok(Dimension::DIMENSIONLESS);
    }
    Dimension::from_name(name).ok_or_else(|| RegistrationError::UnknownDimension(name.to_string()))
}

impl Relation {
    pub fn between(kind: RelationKind, a: Dimension, b: Dimension) -> Result<Self, RegistrationError> {
        if a == b {
            return Err(RegistrationError::SameDimension(a));
        }
        Ok(Relation { kind, a, b })
    }

    /// Build from dimension names such as `"Energy"` or `"Wavenumber"`
    pub fn new(kind: RelationKind, a: &str, b: &str) -> Result<Self, RegistrationError> {
        Relation::between(kind, lookup(a)?, lookup(b)?)
    }

    /// Parse `"A / B"` or `"A * B"`. A trailing `= k` is accepted and ignored;
    /// the constant is supplied separately at registration.
    pub fn parse(expr: &str) -> Result<Self, RegistrationError> {
        let invalid = || RegistrationError::InvalidShape(expr.trim().to_string());

        let lhs = match expr.split_once('=') {
            Some((lhs, _)) => lhs,
            None => expr,
        };

        let operators: Vec<(usize, char)> = lhs.char_indices()
            .filter(|(_, c)| !c.is_alphanumeric() && *c != '_' && !c.is_whitespace())
            .collect();
        let [(pos, op)] = operators.as_slice() else {
            return Err(invalid());
        };

        let kind = match op {
            '/' => RelationKind::Proportional,
            '*' => RelationKind::Antiproportional,
            _ => return Err(invalid()),
        };

        let a = lhs[..*pos].trim();
        let b = lhs[*pos + op.len_utf8()..].trim();
        let is_name = |s: &str| !s.is_empty() && !s.contains(char::is_whitespace);
        if !is_name(a) || !is_name(b) {
            return Err(invalid());
        }

        Relation::new(kind, a, b)
    }

    /// Dimension the constant `k` must carry
    pub fn constant_dimension(&self) -> Dimension {
        match self.kind {
            RelationKind::Proportional => self.a.divide(&self.b),
            RelationKind::Antiproportional => self.a.multiply(&self.b),
        }
    }

    /// Convert a quantity of dimension `b` into dimension `a`
    pub fn to_a(&self, b: &Quantity, k: &Quantity) -> Result<Quantity, EquivalenceError> {
        match self.kind {
            RelationKind::Proportional => Ok(b.mul(k)),
            RelationKind::Antiproportional => Ok(k.div(b)?),
        }
    }

    /// Convert a quantity of dimension `a` into dimension `b`
    pub fn to_b(&self, a: &Quantity, k: &Quantity) -> Result<Quantity, EquivalenceError> {
        match self.kind {
            RelationKind::Proportional => Ok(a.div(k)?),
            RelationKind::Antiproportional => Ok(k.div(a)?),
        }
    }
}

fn dimension_label(d: &Dimension) -> String {
    d.name().map_or_else(|| format!("[{}]", d), |n| n.to_string())
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", dimension_label(&self.a), self.kind.operator(), dimension_label(&self.b))
    }
}

/// Register a relation and both of its generated rules on a `ResolverBuilder`.
///
/// ```
/// use dimeq::{eqrelation, Resolver};
/// use dimeq_units::constants;
///
/// dimeq::equivalence!(pub Rest);
///
/// let mut builder = Resolver::builder();
/// eqrelation!(builder, Rest, Energy / Mass = constants::c_squared()).unwrap();
/// ```
///
/// Tags constrain the variants a relation applies to, `_` leaves a slot open:
/// `eqrelation!(b, PhotonEnergy [linear, _, _], Energy / Frequency = constants::h())`.
/// The constant may also be computed per instance: `= |eq| eq.constant.clone()`.
/// Any other shape is rejected at compile time.
#[macro_export]
macro_rules! eqrelation {
    (@kind /) => { $crate::RelationKind::Proportional };
    (@kind *) => { $crate::RelationKind::Antiproportional };
    (@kind $other:tt) => {
        compile_error!(concat!("unsupported relation operator `", stringify!($other), "`, use `/` or `*`"))
    };

    (@tag _) => { ::core::option::Option::None };
    (@tag $t:ident) => { ::core::option::Option::Some($crate::Tag::new(stringify!($t))) };

    (@pattern) => { $crate::TagPattern::any() };
    (@pattern [$($tag:tt),*]) => { $crate::TagPattern::new([$($crate::eqrelation!(@tag $tag)),*]) };

    ($builder:expr, $eq:ty $([$($tag:tt),*])?, $a:ident $op:tt $b:ident = |$e:ident| $body:expr) => {
        match $crate::Relation::new($crate::eqrelation!(@kind $op), stringify!($a), stringify!($b)) {
            ::core::result::Result::Ok(relation) => $builder.relate_with::<$eq, _>(
                $crate::eqrelation!(@pattern $([$($tag),*])?),
                relation,
                |$e: &$eq| $body,
            ),
            ::core::result::Result::Err(e) => ::core::result::Result::Err(e),
        }
    };

    ($builder:expr, $eq:ty $([$($tag:tt),*])?, $a:ident $op:tt $b:ident = $k:expr) => {
        match $crate::Relation::new($crate::eqrelation!(@kind $op), stringify!($a), stringify!($b)) {
            ::core::result::Result::Ok(relation) => $builder.relate::<$eq>(
                $crate::eqrelation!(@pattern $([$($tag),*])?),
                relation,
                $k,
            ),
            ::core::result::Result::Err(e) => ::core::result::Result::Err(e),
        }
    };

    ($($rest:tt)*) => {
        compile_error!("expected `eqrelation!(builder, Equivalence [tags], A / B = k)` or `A * B = k`")
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimeq_core::Number;
    use dimeq_units::{parse_unit, Quantity};

    #[test]
    fn test_parse_proportional() {
        let r = Relation::parse("Energy / Mass").unwrap();
        assert_eq!(r.kind, RelationKind::Proportional);
        assert_eq!(r.a, Dimension::ENERGY);
        assert_eq!(r.b, Dimension::MASS);
        assert_eq!(r.constant_dimension(), Dimension::VELOCITY.power(2));
    }

    #[test]
    fn test_parse_antiproportional_with_constant() {
        let r = Relation::parse("Force * Volume = k").unwrap();
        assert_eq!(r.kind, RelationKind::Antiproportional);
        assert_eq!(r.constant_dimension(), Dimension::FORCE.multiply(&Dimension::VOLUME));
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        for expr in ["Energy = Mass * k", "Energy + Mass", "Energy / Mass / Time", "Energy", "/ Mass", "Energy Mass / Time"] {
            let err = Relation::parse(expr).unwrap_err();
            assert!(matches!(err, RegistrationError::InvalidShape(_)), "{} gave {:?}", expr, err);
        }
    }

    #[test]
    fn test_parse_unknown_and_same_dimension() {
        assert_eq!(
            Relation::parse("Energy / Flux").unwrap_err(),
            RegistrationError::UnknownDimension("Flux".to_string())
        );
        assert_eq!(
            Relation::parse("Energy / energy").unwrap_err(),
            RegistrationError::SameDimension(Dimension::ENERGY)
        );
    }

    #[test]
    fn test_dimensionless_operand() {
        let r = Relation::parse("1 / Time").unwrap();
        assert_eq!(r.a, Dimension::DIMENSIONLESS);
        assert_eq!(r.constant_dimension(), Dimension::FREQUENCY);
    }

    #[test]
    fn test_generated_rules_proportional() {
        let r = Relation::parse("Length / Time").unwrap();
        let k = Quantity::new(3, parse_unit("m/s").unwrap());
        let t = Quantity::new(2, parse_unit("s").unwrap());

        let d = r.to_a(&t, &k).unwrap();
        assert_eq!(d.dimension(), Dimension::LENGTH);
        assert_eq!(d.si_value(), Number::from_i64(6));

        let back = r.to_b(&d, &k).unwrap();
        assert_eq!(back.dimension(), Dimension::TIME);
        assert_eq!(back.si_value(), Number::from_i64(2));
    }

    #[test]
    fn test_generated_rules_antiproportional() {
        let r = Relation::parse("Force * Volume").unwrap();
        let k = Quantity::new(-1, parse_unit("N*m^3").unwrap());
        let v = Quantity::new(10, parse_unit("m3").unwrap());

        let f = r.to_a(&v, &k).unwrap();
        assert_eq!(f.dimension(), Dimension::FORCE);
        assert_eq!(f.si_value(), Number::from_ratio(-1, 10).unwrap());

        let zero = Quantity::new(0, parse_unit("N").unwrap());
        assert!(r.to_b(&zero, &k).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Relation::parse("Energy*Wavenumber").unwrap().to_string(), "energy * wavenumber");
    }
}
