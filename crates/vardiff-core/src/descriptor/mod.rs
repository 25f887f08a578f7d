//! Type descriptors.
//!
//! A [`TypeDescriptor`] is the resolved, immutable view of a [`TypeShape`]:
//! every member with its effective annotations (direct markers merged with
//! those found on the metadata type), the ordered key members, and whether
//! the type as a whole is ignored. Descriptors are cached per shape for the
//! life of the process.
//!
//! [`TypeShape`]: crate::inspect::TypeShape

mod resolver;

pub use resolver::{effective_annotations, resolve};

use crate::errors::Result;
use crate::inspect::Described;
use std::sync::Arc;

/// Effective annotations of one member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationSet {
    pub key: bool,
    pub ignore: bool,
}

/// A comparable member in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    pub name: &'static str,
    pub ordinal: usize,
    pub annotations: AnnotationSet,
}

impl MemberDescriptor {
    pub fn is_key(&self) -> bool {
        self.annotations.key
    }

    pub fn is_ignored(&self) -> bool {
        self.annotations.ignore
    }
}

/// Resolved comparison behavior of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: &'static str,
    pub members: Vec<MemberDescriptor>,
    /// Key member names, in key order
    pub key_members: Vec<&'static str>,
    /// Type-level ignore, direct or through metadata
    pub ignored: bool,
    /// Name of the metadata type consulted for annotations
    pub metadata: Option<&'static str>,
}

impl TypeDescriptor {
    /// Descriptor for a type known at compile time
    ///
    /// # Errors
    ///
    /// Fails if the type's declared shape is inconsistent; see [`resolve`].
    pub fn of<T: Described>() -> Result<Arc<TypeDescriptor>> {
        resolve(Some(T::type_shape()))
    }

    pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn has_key(&self) -> bool {
        !self.key_members.is_empty()
    }

    /// Members that take part in comparison, in declaration order
    pub fn comparable_members(&self) -> impl Iterator<Item = &MemberDescriptor> {
        self.members.iter().filter(|m| !m.is_ignored())
    }
}
