//! Public conversion entry points
//!
//! `uconvert` returns a quantity in exactly the requested unit, `ustrip`
//! returns its bare magnitude. Both run the same `resolve` step, and the
//! `_all` forms map that step over a collection.

use dimeq_core::{FromNumber, Number};
use dimeq_units::{Quantity, Unit};
use tracing::debug;

use crate::equivalence::Equivalence;
use crate::error::EquivalenceError;
use crate::resolver::Resolver;
use crate::RESOLVER;

impl Resolver {
    /// Normalize, cross the dimension boundary if needed, then render in `target`
    fn resolve(&self, target: &Unit, x: Quantity, eq: &dyn Equivalence) -> Result<Quantity, EquivalenceError> {
        let x = x.to_absolute();

        let bridged = if x.dimension() == target.dimension {
            debug!(dimension = %x.dimension(), "same dimension, equivalence not consulted");
            x
        } else {
            self.edconvert(target.dimension, &x, eq)?
        };

        Ok(bridged.convert_to(target)?)
    }

    /// Convert `x` into `target`, bridging dimensions through `eq`
    pub fn uconvert(
        &self,
        target: &Unit,
        x: impl Into<Quantity>,
        eq: &dyn Equivalence,
    ) -> Result<Quantity, EquivalenceError> {
        self.resolve(target, x.into(), eq)
    }

    /// Like `uconvert`, returning only the magnitude in `target`
    pub fn ustrip(
        &self,
        target: &Unit,
        x: impl Into<Quantity>,
        eq: &dyn Equivalence,
    ) -> Result<Number, EquivalenceError> {
        Ok(self.resolve(target, x.into(), eq)?.value)
    }

    /// Like `ustrip`, casting the magnitude to `T`
    pub fn ustrip_as<T: FromNumber>(
        &self,
        target: &Unit,
        x: impl Into<Quantity>,
        eq: &dyn Equivalence,
    ) -> Result<T, EquivalenceError> {
        let value = self.ustrip(target, x, eq)?;
        Ok(T::from_number(&value)?)
    }

    /// Elementwise `uconvert`; the first failure aborts the whole batch
    pub fn uconvert_all<I>(&self, target: &Unit, xs: I, eq: &dyn Equivalence) -> Result<Vec<Quantity>, EquivalenceError>
    where
        I: IntoIterator,
        I::Item: Into<Quantity>,
    {
        xs.into_iter().map(|x| self.uconvert(target, x, eq)).collect()
    }

    /// Elementwise `ustrip`
    pub fn ustrip_all<I>(&self, target: &Unit, xs: I, eq: &dyn Equivalence) -> Result<Vec<Number>, EquivalenceError>
    where
        I: IntoIterator,
        I::Item: Into<Quantity>,
    {
        xs.into_iter().map(|x| self.ustrip(target, x, eq)).collect()
    }
}

/// [`Resolver::uconvert`] on the built-in resolver
pub fn uconvert(target: &Unit, x: impl Into<Quantity>, eq: &dyn Equivalence) -> Result<Quantity, EquivalenceError> {
    RESOLVER.uconvert(target, x, eq)
}

/// [`Resolver::ustrip`] on the built-in resolver
pub fn ustrip(target: &Unit, x: impl Into<Quantity>, eq: &dyn Equivalence) -> Result<Number, EquivalenceError> {
    RESOLVER.ustrip(target, x, eq)
}

/// [`Resolver::ustrip_as`] on the built-in resolver
pub fn ustrip_as<T: FromNumber>(target: &Unit, x: impl Into<Quantity>, eq: &dyn Equivalence) -> Result<T, EquivalenceError> {
    RESOLVER.ustrip_as(target, x, eq)
}

/// [`Resolver::uconvert_all`] on the built-in resolver
pub fn uconvert_all<I>(target: &Unit, xs: I, eq: &dyn Equivalence) -> Result<Vec<Quantity>, EquivalenceError>
where
    I: IntoIterator,
    I::Item: Into<Quantity>,
{
    RESOLVER.uconvert_all(target, xs, eq)
}

/// [`Resolver::ustrip_all`] on the built-in resolver
pub fn ustrip_all<I>(target: &Unit, xs: I, eq: &dyn Equivalence) -> Result<Vec<Number>, EquivalenceError>
where
    I: IntoIterator,
    I::Item: Into<Quantity>,
{
    RESOLVER.ustrip_all(target, xs, eq)
}
