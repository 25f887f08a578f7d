//! Per-comparison cycle detection.

use crate::inspect::Inspect;
use std::any::TypeId;
use std::collections::HashSet;

/// Referential identity of a resolved value.
///
/// The type is part of the identity: a struct and its first field share an
/// address but are different values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    type_id: TypeId,
    addr: usize,
}

impl Identity {
    pub fn of(value: &dyn Inspect) -> Self {
        Self {
            type_id: value.runtime_type(),
            addr: std::ptr::from_ref(value).cast::<()>() as usize,
        }
    }
}

/// Pairs of values already decomposed during one comparison.
///
/// Each top-level comparison owns its own guard; nothing is shared between
/// comparisons.
#[derive(Debug, Default)]
pub struct CycleGuard {
    traversed: HashSet<(Identity, Identity)>,
}

impl CycleGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn already_traversed(&self, left: &dyn Inspect, right: &dyn Inspect) -> bool {
        self.traversed
            .contains(&(Identity::of(left), Identity::of(right)))
    }

    /// Record a pair; returns `false` if it was already recorded
    pub fn mark_traversed(&mut self, left: &dyn Inspect, right: &dyn Inspect) -> bool {
        self.traversed
            .insert((Identity::of(left), Identity::of(right)))
    }

    pub fn len(&self) -> usize {
        self.traversed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traversed.is_empty()
    }

    pub fn clear(&mut self) {
        self.traversed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_not_equality() {
        let (a, b, c) = (String::from("x"), String::from("x"), String::from("y"));
        let mut guard = CycleGuard::new();
        assert!(guard.is_empty());

        assert!(guard.mark_traversed(&a, &c));
        assert!(guard.already_traversed(&a, &c));
        assert!(!guard.already_traversed(&b, &c));
        assert!(!guard.mark_traversed(&a, &c));
        assert_eq!(guard.len(), 1);
    }

    #[test]
    fn test_pairs_are_ordered() {
        let (a, b) = (1u32, 2u32);
        let mut guard = CycleGuard::new();
        guard.mark_traversed(&a, &b);
        assert!(!guard.already_traversed(&b, &a));
        guard.clear();
        assert!(!guard.already_traversed(&a, &b));
    }

    #[test]
    fn test_type_is_part_of_identity() {
        struct Wrapper {
            inner: u64,
        }
        impl Inspect for Wrapper {
            fn view(&self) -> crate::inspect::View<'_> {
                crate::inspect::View::Forward(&self.inner)
            }
        }
        let w = Wrapper { inner: 3 };
        assert_ne!(Identity::of(&w), Identity::of(&w.inner));
    }
}
