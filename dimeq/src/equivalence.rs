//! The equivalence capability, variant tags and tag patterns
//!
//! An equivalence is any `'static` type implementing [`Equivalence`]. The
//! resolver keys rules on the concrete type, so two types never share rules.
//! Parameterized equivalences expose their variant through [`Equivalence::tags`],
//! an ordered list with one [`Tag`] per independent choice. Rules are attached
//! to a [`TagPattern`] that may leave any slot unconstrained.

use std::any::{Any, TypeId};
use std::fmt;

/// Object-safe access to the concrete type behind a `dyn Equivalence`
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn family_id(&self) -> TypeId;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn family_id(&self) -> TypeId {
        TypeId::of::<T>()
    }
}

/// A named physical relation that licenses conversion between dimensions.
///
/// Stateless equivalences are unit structs (see [`equivalence!`]).
/// Parameterized ones report their variant through `tags()` and may carry
/// fields that per-instance rules read back by downcasting.
///
/// [`equivalence!`]: crate::equivalence!
pub trait Equivalence: AsAny + fmt::Debug + Send + Sync + 'static {
    /// Ordered variant tags, one per independent choice. Empty when stateless.
    fn tags(&self) -> Vec<Tag> {
        Vec::new()
    }

    /// Human-readable name used in diagnostics
    fn name(&self) -> String {
        let full = std::any::type_name::<Self>();
        // Only the outer path is dropped; generic arguments keep theirs
        let path = full.split('<').next().unwrap_or(full);
        let base = path.rsplit("::").next().unwrap_or(path);
        let short = format!("{}{}", base, &full[path.len()..]);
        let tags = self.tags();
        if tags.is_empty() {
            short
        } else {
            let tags: Vec<&str> = tags.iter().map(|t| t.name()).collect();
            format!("{}({})", short, tags.join(", "))
        }
    }
}

/// Declare a zero-field equivalence type in one step.
///
/// ```
/// dimeq::equivalence!(
///     /// Hydrostatic head
///     pub Head
/// );
/// ```
#[macro_export]
macro_rules! equivalence {
    ($(#[$meta:meta])* $vis:vis $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::Equivalence for $name {}
    };
}

/// One choice of a parameterized equivalence (e.g. `linear` vs `angular`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag(&'static str);

impl Tag {
    pub const LINEAR: Tag = Tag("linear");
    pub const ANGULAR: Tag = Tag("angular");

    pub const fn new(name: &'static str) -> Self {
        Tag(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Which tag combinations a rule applies to.
///
/// Each slot either names the tag it requires or is `None` (any tag).
/// Slots past the end of the pattern are unconstrained, so the empty
/// pattern matches every variant. Trailing `None`s are dropped on
/// construction, so equal patterns are exactly the ones that match alike.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TagPattern {
    slots: Vec<Option<Tag>>,
}

impl TagPattern {
    /// The unconstrained pattern
    pub fn any() -> Self {
        TagPattern::default()
    }

    pub fn new(slots: impl IntoIterator<Item = Option<Tag>>) -> Self {
        let mut slots: Vec<Option<Tag>> = slots.into_iter().collect();
        while slots.last() == Some(&None) {
            slots.pop();
        }
        TagPattern { slots }
    }

    /// Pattern constraining every slot
    pub fn exact(tags: &[Tag]) -> Self {
        TagPattern::new(tags.iter().copied().map(Some))
    }

    /// Number of constrained slots
    pub fn specificity(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Strictly more specific than `other`: every slot `other` constrains is
    /// constrained to the same tag here, and the patterns differ.
    ///
    /// This is a partial order. `(linear, _)` and `(_, linear)` refine neither
    /// each other nor the reverse.
    pub fn refines(&self, other: &TagPattern) -> bool {
        self != other
            && other.slots.iter().enumerate().all(|(i, slot)| match slot {
                None => true,
                Some(required) => self.slots.get(i) == Some(&Some(*required)),
            })
    }

    pub fn matches(&self, tags: &[Tag]) -> bool {
        self.slots.iter().enumerate().all(|(i, slot)| match slot {
            None => true,
            Some(required) => tags.get(i) == Some(required),
        })
    }
}

impl fmt::Display for TagPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.slots.is_empty() {
            return f.write_str("(*)");
        }
        let parts: Vec<&str> = self.slots.iter()
            .map(|s| s.map_or("_", |t| t.name()))
            .collect();
        write!(f, "({})", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::equivalence!(
        /// Test-only stateless equivalence
        Plain
    );

    #[derive(Debug)]
    struct Tagged(Vec<Tag>);

    impl Equivalence for Tagged {
        fn tags(&self) -> Vec<Tag> {
            self.0.clone()
        }
    }

    #[test]
    fn test_macro_declares_stateless_type() {
        let eq = Plain;
        assert!(eq.tags().is_empty());
        assert_eq!(eq.name(), "Plain");
        assert_eq!(eq, Plain::default());
    }

    #[test]
    fn test_family_id_through_dyn() {
        let eq: &dyn Equivalence = &Plain;
        assert_eq!(eq.family_id(), TypeId::of::<Plain>());
        assert!(eq.as_any().downcast_ref::<Plain>().is_some());
        assert!(eq.as_any().downcast_ref::<Tagged>().is_none());
    }

    #[test]
    fn test_name_includes_tags() {
        let eq = Tagged(vec![Tag::LINEAR, Tag::ANGULAR]);
        assert_eq!(eq.name(), "Tagged(linear, angular)");
    }

    #[test]
    fn test_pattern_matching() {
        let tags = [Tag::LINEAR, Tag::ANGULAR, Tag::LINEAR];

        assert!(TagPattern::any().matches(&tags));
        assert!(TagPattern::new([Some(Tag::LINEAR), None, None]).matches(&tags));
        assert!(TagPattern::new([None, Some(Tag::ANGULAR)]).matches(&tags));
        assert!(!TagPattern::new([Some(Tag::ANGULAR)]).matches(&tags));
        assert!(TagPattern::exact(&tags).matches(&tags));
        // A constrained slot the equivalence does not have never matches
        assert!(!TagPattern::new([None, None, None, Some(Tag::LINEAR)]).matches(&tags));
    }

    #[test]
    fn test_specificity() {
        assert_eq!(TagPattern::any().specificity(), 0);
        assert_eq!(TagPattern::new([Some(Tag::LINEAR), None, None]).specificity(), 1);
        assert_eq!(TagPattern::exact(&[Tag::LINEAR, Tag::LINEAR]).specificity(), 2);
    }

    #[test]
    fn test_pattern_display() {
        assert_eq!(TagPattern::any().to_string(), "(*)");
        assert_eq!(TagPattern::new([None, Some(Tag::LINEAR)]).to_string(), "(_, linear)");
        assert_eq!(TagPattern::new([Some(Tag::LINEAR), None]).to_string(), "(linear)");
    }

    #[test]
    fn test_trailing_wildcards_are_dropped() {
        let short = TagPattern::new([Some(Tag::LINEAR)]);
        let padded = TagPattern::new([Some(Tag::LINEAR), None, None]);
        assert_eq!(short, padded);
        assert_eq!(TagPattern::new([None, None]), TagPattern::any());
    }

    #[test]
    fn test_refinement_is_a_partial_order() {
        let any = TagPattern::any();
        let first = TagPattern::new([Some(Tag::LINEAR)]);
        let tail = TagPattern::new([None, Some(Tag::LINEAR), Some(Tag::LINEAR)]);
        let both = TagPattern::new([Some(Tag::LINEAR), Some(Tag::LINEAR)]);

        assert!(first.refines(&any));
        assert!(both.refines(&first));
        assert!(!first.refines(&both));
        assert!(!first.refines(&first));
        // Neither is nested in the other, whatever the slot counts say
        assert!(!tail.refines(&first));
        assert!(!first.refines(&tail));
        // Same slot, different tag
        assert!(!TagPattern::new([Some(Tag::ANGULAR)]).refines(&first));
    }

    #[derive(Debug)]
    struct Wrapped<T: Send + Sync + 'static>(std::marker::PhantomData<T>);

    impl<T: fmt::Debug + Send + Sync + 'static> Equivalence for Wrapped<T> {}

    #[test]
    fn test_name_of_generic_equivalence() {
        let eq = Wrapped::<Plain>(std::marker::PhantomData);
        let name = eq.name();
        assert!(name.starts_with("Wrapped<"), "{}", name);
        assert!(name.ends_with("::Plain>"), "{}", name);
    }
}
