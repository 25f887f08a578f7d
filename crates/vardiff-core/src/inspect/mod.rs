//! Introspection boundary.
//!
//! Values take part in a comparison by implementing [`Inspect`], which
//! classifies them into a [`View`]: absent, a transparent wrapper, a terminal
//! [`Scalar`], a [`Record`] with named members, or a [`Sequence`] of elements.
//! The engine only ever works with `&dyn Inspect` handles and the static
//! [`TypeShape`] declarations records expose.

mod impls;
mod macros;
mod scalar;
mod shape;

pub use scalar::{Decimal, ParseDecimalError, Scalar};
pub use shape::{Annotation, Described, MemberShape, TypeShape};

use std::any::{Any, TypeId};
use std::fmt;

/// Runtime type access for trait objects.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn runtime_type(&self) -> TypeId;
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn runtime_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A value the engine can compare.
pub trait Inspect: AsAny {
    fn view(&self) -> View<'_>;

    /// Shape of this type when known statically; used for sequence elements
    fn static_shape() -> Option<&'static TypeShape>
    where
        Self: Sized,
    {
        None
    }
}

impl<'a> dyn Inspect + 'a {
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.runtime_type() == TypeId::of::<T>()
    }
}

impl<'a> fmt::Debug for dyn Inspect + 'a {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.view())
    }
}

/// Classification of one value.
#[derive(Clone, Copy)]
pub enum View<'a> {
    /// No value (`None`, an unset cell)
    Absent,
    /// Transparent wrapper around another value
    Forward(&'a dyn Inspect),
    Scalar(Scalar<'a>),
    Record(&'a dyn Record),
    Sequence(&'a dyn Sequence),
}

impl fmt::Debug for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Absent => f.write_str("Absent"),
            View::Forward(inner) => write!(f, "Forward({})", (**inner).type_name()),
            View::Scalar(scalar) => write!(f, "Scalar({:?})", scalar),
            View::Record(record) => write!(f, "Record({})", record.shape().name),
            View::Sequence(seq) => write!(f, "Sequence(len={})", seq.len()),
        }
    }
}

/// A composite value with named members.
pub trait Record {
    fn shape(&self) -> &'static TypeShape;

    /// Borrow a declared member by name
    fn member(&self, name: &str) -> Option<&dyn Inspect>;
}

/// An enumerable value.
pub trait Sequence {
    fn element_shape(&self) -> Option<&'static TypeShape>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &dyn Inspect> + '_>;

    /// Whether `elements()` order is meaningful; unordered sequences are
    /// aligned in a canonical order instead
    fn is_ordered(&self) -> bool {
        true
    }
}
