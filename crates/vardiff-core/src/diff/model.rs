//! Variance output types.
//!
//! A [`Variance`] is an immutable node linked to the variance of its
//! enclosing pair. Siblings share their parent node, so the result of one
//! comparison is a forest of leaf-to-root chains.

use crate::diff::cycle_guard::Identity;
use crate::inspect::{Inspect, Scalar, View};
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

/// Label of a variance where one side is absent.
pub const VALUE_LABEL: &str = "value";

/// Label of a variance where the runtime types differ.
pub const TYPE_LABEL: &str = "Type";

/// One side of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// The value held by one side of a variance.
#[derive(Clone, Copy)]
pub enum Operand<'a> {
    Absent,
    /// A resolved value borrowed from the compared graph
    Value(&'a dyn Inspect),
    /// An element count produced by a sequence length check
    Count(usize),
}

impl<'a> Operand<'a> {
    pub(crate) fn from_resolved(value: Option<&'a dyn Inspect>) -> Self {
        value.map_or(Operand::Absent, Operand::Value)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Operand::Absent)
    }

    pub fn value(&self) -> Option<&'a dyn Inspect> {
        match self {
            Operand::Value(value) => Some(*value),
            _ => None,
        }
    }

    pub fn count(&self) -> Option<usize> {
        match self {
            Operand::Count(n) => Some(*n),
            _ => None,
        }
    }

    /// The terminal value, if this operand holds one
    pub fn scalar(&self) -> Option<Scalar<'a>> {
        match self.value()?.view() {
            View::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&'a T> {
        self.value()?.downcast_ref::<T>()
    }

    /// Whether this operand is `target` itself, not merely equal to it
    pub fn is<T: Inspect>(&self, target: &T) -> bool {
        self.value()
            .is_some_and(|value| Identity::of(value) == Identity::of(target))
    }
}

impl PartialEq for Operand<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Operand::Absent, Operand::Absent) => true,
            (Operand::Count(a), Operand::Count(b)) => a == b,
            (Operand::Value(a), Operand::Value(b)) => match (a.view(), b.view()) {
                (View::Scalar(x), View::Scalar(y)) => {
                    (**a).runtime_type() == (**b).runtime_type() && x == y
                }
                _ => Identity::of(*a) == Identity::of(*b),
            },
            _ => false,
        }
    }
}

impl fmt::Debug for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Absent => f.write_str("Absent"),
            Operand::Value(value) => write!(f, "Value({:?})", value),
            Operand::Count(n) => write!(f, "Count({})", n),
        }
    }
}

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Absent => f.write_str("null"),
            Operand::Count(n) => write!(f, "{}", n),
            Operand::Value(value) => match value.view() {
                View::Scalar(Scalar::Text(text)) => write!(f, "{:?}", text),
                View::Scalar(scalar) => write!(f, "{}", scalar),
                View::Record(record) => write!(f, "{} {{..}}", record.shape().name),
                View::Sequence(seq) => write!(f, "[{} elements]", seq.len()),
                View::Absent | View::Forward(_) => f.write_str((**value).type_name()),
            },
        }
    }
}

struct Node<'a> {
    label: Option<Cow<'static, str>>,
    left: Operand<'a>,
    right: Operand<'a>,
    parent: Option<Variance<'a>>,
}

/// One detected discrepancy and the chain of pairs that led to it.
#[derive(Clone)]
pub struct Variance<'a>(Rc<Node<'a>>);

impl<'a> Variance<'a> {
    pub fn new(
        label: Option<Cow<'static, str>>,
        left: Operand<'a>,
        right: Operand<'a>,
        parent: Option<Variance<'a>>,
    ) -> Self {
        Self(Rc::new(Node {
            label,
            left,
            right,
            parent,
        }))
    }

    /// Member or element label; `None` for a whole-value comparison
    pub fn label(&self) -> Option<&str> {
        self.0.label.as_deref()
    }

    pub fn left(&self) -> Operand<'a> {
        self.0.left
    }

    pub fn right(&self) -> Operand<'a> {
        self.0.right
    }

    pub fn parent(&self) -> Option<&Variance<'a>> {
        self.0.parent.as_ref()
    }

    /// Enclosing variances, nearest first
    pub fn ancestors(&self) -> impl Iterator<Item = &Variance<'a>> {
        std::iter::successors(self.parent(), |v| v.parent())
    }

    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    /// Outermost variance of the chain; `self` if it has no parent
    pub fn root(&self) -> &Variance<'a> {
        self.ancestors().last().unwrap_or(self)
    }

    /// Labels from root to this variance, joined with `/`
    pub fn path(&self) -> String {
        let mut labels: Vec<&str> = std::iter::once(self)
            .chain(self.ancestors())
            .filter_map(|v| v.label())
            .collect();
        labels.reverse();
        labels.join("/")
    }

    pub(crate) fn shares_node(&self, other: &Variance<'_>) -> bool {
        std::ptr::eq(
            Rc::as_ptr(&self.0) as *const (),
            Rc::as_ptr(&other.0) as *const (),
        )
    }
}

impl PartialEq for Variance<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.shares_node(other)
            || (self.label() == other.label()
                && self.left() == other.left()
                && self.right() == other.right()
                && self.parent() == other.parent())
    }
}

impl fmt::Debug for Variance<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variance")
            .field("path", &self.path())
            .field("label", &self.label())
            .field("left", &self.left())
            .field("right", &self.right())
            .field("depth", &self.depth())
            .finish()
    }
}

impl fmt::Display for Variance<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path();
        let path = if path.is_empty() { "(root)" } else { path.as_str() };
        write!(f, "{}: {} -> {}", path, self.left(), self.right())
    }
}
