//! Rule registry and resolution (edconvert)
//!
//! Rules are keyed by (equivalence type, source dimension, target dimension)
//! and carry a [`TagPattern`]. A [`ResolverBuilder`] collects them during
//! start-up and [`ResolverBuilder::build`] freezes the table. A built
//! [`Resolver`] is read-only, so it can be shared freely across threads.
//! Registering more rules after start-up means building a new resolver.

use std::any::{type_name, TypeId};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use dimeq_units::{Dimension, Quantity};
use tracing::{debug, trace};

use crate::equivalence::{Equivalence, TagPattern};
use crate::error::{EquivalenceError, RegistrationError};
use crate::relation::Relation;

type RuleFn = Arc<dyn Fn(&dyn Equivalence, &Quantity) -> Result<Quantity, EquivalenceError> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RuleKey {
    family: TypeId,
    from: Dimension,
    to: Dimension,
}

#[derive(Clone)]
struct Rule {
    pattern: TagPattern,
    apply: RuleFn,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("pattern", &self.pattern).finish_non_exhaustive()
    }
}

fn downcast<E: Equivalence>(eq: &dyn Equivalence) -> Result<&E, EquivalenceError> {
    eq.as_any().downcast_ref::<E>().ok_or_else(|| EquivalenceError::FamilyMismatch {
        expected: type_name::<E>(),
        found: eq.name(),
    })
}

/// Collects rules before freezing them into a [`Resolver`]
#[derive(Debug, Default)]
pub struct ResolverBuilder {
    rules: HashMap<RuleKey, Vec<Rule>>,
    families: HashSet<TypeId>,
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a relation with a fixed constant `k`.
    ///
    /// `k` must carry the dimension `A / B` (proportional) or `A * B`
    /// (antiproportional). Both the forward and inverse rule are added, or
    /// neither is.
    pub fn relate<E: Equivalence>(
        &mut self,
        pattern: TagPattern,
        relation: Relation,
        k: Quantity,
    ) -> Result<(), RegistrationError> {
        let expected = relation.constant_dimension();
        if k.dimension() != expected {
            return Err(RegistrationError::ConstantDimension {
                relation: relation.to_string(),
                expected,
                found: k.dimension(),
            });
        }
        self.relate_with::<E, _>(pattern, relation, move |_| k.clone())
    }

    /// Register a relation whose constant is read from the equivalence instance
    pub fn relate_with<E, F>(
        &mut self,
        pattern: TagPattern,
        relation: Relation,
        constant: F,
    ) -> Result<(), RegistrationError>
    where
        E: Equivalence,
        F: Fn(&E) -> Quantity + Send + Sync + 'static,
    {
        let relation = Relation::between(relation.kind, relation.a, relation.b)?;
        self.check_vacant::<E>(&pattern, relation.b, relation.a)?;
        self.check_vacant::<E>(&pattern, relation.a, relation.b)?;

        let constant = Arc::new(constant);
        let k_inverse = Arc::clone(&constant);

        let to_a: RuleFn = Arc::new(move |eq: &dyn Equivalence, x: &Quantity| {
            let k = constant(downcast::<E>(eq)?);
            relation.to_a(x, &k)
        });
        let to_b: RuleFn = Arc::new(move |eq: &dyn Equivalence, x: &Quantity| {
            let k = k_inverse(downcast::<E>(eq)?);
            relation.to_b(x, &k)
        });
        self.insert::<E>(pattern.clone(), relation.b, relation.a, to_a);
        self.insert::<E>(pattern, relation.a, relation.b, to_b);

        trace!(equivalence = type_name::<E>(), %relation, "registered relation");
        Ok(())
    }

    /// Register a single hand-written rule from `from` to `to`
    pub fn rule<E, F>(
        &mut self,
        pattern: TagPattern,
        from: Dimension,
        to: Dimension,
        convert: F,
    ) -> Result<(), RegistrationError>
    where
        E: Equivalence,
        F: Fn(&E, &Quantity) -> Result<Quantity, EquivalenceError> + Send + Sync + 'static,
    {
        if from == to {
            return Err(RegistrationError::SameDimension(from));
        }
        self.check_vacant::<E>(&pattern, from, to)?;
        let apply: RuleFn = Arc::new(move |eq: &dyn Equivalence, x: &Quantity| {
            convert(downcast::<E>(eq)?, x)
        });
        self.insert::<E>(pattern, from, to, apply);

        trace!(equivalence = type_name::<E>(), %from, %to, "registered rule");
        Ok(())
    }

    /// Freeze the table
    pub fn build(self) -> Resolver {
        debug!(keys = self.rules.len(), families = self.families.len(), "resolver built");
        Resolver {
            rules: self.rules,
            families: self.families,
        }
    }

    fn check_vacant<E: Equivalence>(
        &self,
        pattern: &TagPattern,
        from: Dimension,
        to: Dimension,
    ) -> Result<(), RegistrationError> {
        let key = RuleKey { family: TypeId::of::<E>(), from, to };
        let taken = self.rules.get(&key)
            .is_some_and(|rules| rules.iter().any(|r| &r.pattern == pattern));
        if taken {
            return Err(RegistrationError::DuplicateRule {
                equivalence: type_name::<E>(),
                from,
                to,
                pattern: pattern.clone(),
            });
        }
        Ok(())
    }

    fn insert<E: Equivalence>(&mut self, pattern: TagPattern, from: Dimension, to: Dimension, apply: RuleFn) {
        let family = TypeId::of::<E>();
        self.families.insert(family);
        self.rules.entry(RuleKey { family, from, to })
            .or_default()
            .push(Rule { pattern, apply });
    }
}

/// Immutable dispatch table mapping (equivalence, source, target) to a rule
#[derive(Debug, Clone)]
pub struct Resolver {
    rules: HashMap<RuleKey, Vec<Rule>>,
    families: HashSet<TypeId>,
}

impl Resolver {
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    /// Convert `x` into dimension `target` using the most specific matching rule.
    ///
    /// Fails with `Unregistered` when the equivalence type has no rules at
    /// all, `NoRelation` when none of its rules bridges the two dimensions,
    /// and `AmbiguousRule` when the best match is not unique.
    pub fn edconvert(
        &self,
        target: Dimension,
        x: &Quantity,
        eq: &dyn Equivalence,
    ) -> Result<Quantity, EquivalenceError> {
        let family = eq.family_id();
        if !self.families.contains(&family) {
            return Err(EquivalenceError::Unregistered(eq.name()));
        }

        let from = x.dimension();
        let no_relation = || EquivalenceError::NoRelation {
            equivalence: eq.name(),
            from,
            to: target,
        };

        let tags = eq.tags();
        let candidates: Vec<&Rule> = self.rules.get(&RuleKey { family, from, to: target })
            .map(|rules| rules.iter().filter(|r| r.pattern.matches(&tags)).collect())
            .unwrap_or_default();

        if candidates.is_empty() {
            return Err(no_relation());
        }
        // Most specific: no other matching pattern refines it
        let winners: Vec<&&Rule> = candidates.iter()
            .filter(|r| !candidates.iter().any(|other| other.pattern.refines(&r.pattern)))
            .collect();

        let [rule] = winners.as_slice() else {
            return Err(EquivalenceError::AmbiguousRule {
                equivalence: eq.name(),
                from,
                to: target,
                count: winners.len(),
            });
        };

        debug!(
            equivalence = %eq.name(),
            %from,
            to = %target,
            pattern = %rule.pattern,
            specificity = rule.pattern.specificity(),
            "resolved conversion rule"
        );

        let converted = (rule.apply)(eq, x)?;
        if converted.dimension() != target {
            return Err(EquivalenceError::WrongDimension {
                equivalence: eq.name(),
                expected: target,
                found: converted.dimension(),
            });
        }
        Ok(converted)
    }

    /// Whether any rule is registered for this equivalence's type
    pub fn knows(&self, eq: &dyn Equivalence) -> bool {
        self.families.contains(&eq.family_id())
    }

    /// Dimension pairs this equivalence instance can bridge, sorted for display
    pub fn pairs(&self, eq: &dyn Equivalence) -> Vec<(Dimension, Dimension)> {
        let family = eq.family_id();
        let tags = eq.tags();
        let mut pairs: Vec<(Dimension, Dimension)> = self.rules.iter()
            .filter(|(key, rules)| key.family == family && rules.iter().any(|r| r.pattern.matches(&tags)))
            .map(|(key, _)| (key.from, key.to))
            .collect();
        pairs.sort_by_key(|(from, to)| (from.exponents, to.exponents));
        pairs
    }
}
