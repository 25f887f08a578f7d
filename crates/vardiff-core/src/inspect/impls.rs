//! `Inspect` for std, `uuid` and `chrono` types.

use super::{Decimal, Inspect, Scalar, Sequence, TypeShape, View};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use std::borrow::Cow;
use std::cell::OnceCell;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use uuid::Uuid;

macro_rules! scalar_impls {
    ($($ty:ty => |$v:ident| $scalar:expr),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn view(&self) -> View<'_> {
                    let $v = self;
                    View::Scalar($scalar)
                }
            }
        )*
    };
}

scalar_impls! {
    bool => |v| Scalar::Bool(*v),
    char => |v| Scalar::Char(*v),
    i8 => |v| Scalar::Int(i128::from(*v)),
    i16 => |v| Scalar::Int(i128::from(*v)),
    i32 => |v| Scalar::Int(i128::from(*v)),
    i64 => |v| Scalar::Int(i128::from(*v)),
    i128 => |v| Scalar::Int(*v),
    isize => |v| Scalar::Int(*v as i128),
    u8 => |v| Scalar::UInt(u128::from(*v)),
    u16 => |v| Scalar::UInt(u128::from(*v)),
    u32 => |v| Scalar::UInt(u128::from(*v)),
    u64 => |v| Scalar::UInt(u128::from(*v)),
    u128 => |v| Scalar::UInt(*v),
    usize => |v| Scalar::UInt(*v as u128),
    f32 => |v| Scalar::Float(f64::from(*v)),
    f64 => |v| Scalar::Float(*v),
    String => |v| Scalar::Text(v.as_str()),
    &'static str => |v| Scalar::Text(v),
    Cow<'static, str> => |v| Scalar::Text(v.as_ref()),
    Uuid => |v| Scalar::Uuid(*v),
    Decimal => |v| Scalar::Decimal(*v),
    NaiveDate => |v| Scalar::Date(*v),
    NaiveTime => |v| Scalar::Time(*v),
    NaiveDateTime => |v| Scalar::DateTime(*v),
    DateTime<Utc> => |v| Scalar::OffsetDateTime(v.fixed_offset()),
    DateTime<FixedOffset> => |v| Scalar::OffsetDateTime(*v),
    TimeDelta => |v| Scalar::Span(
        i128::from(v.num_seconds()) * 1_000_000_000 + i128::from(v.subsec_nanos())
    ),
    Duration => |v| Scalar::Span(v.as_nanos() as i128),
}

// Wrappers resolve to whatever they hold.

impl<T: Inspect> Inspect for Option<T> {
    fn view(&self) -> View<'_> {
        match self {
            Some(inner) => View::Forward(inner),
            None => View::Absent,
        }
    }

    fn static_shape() -> Option<&'static TypeShape> {
        T::static_shape()
    }
}

impl<T: Inspect> Inspect for Box<T> {
    fn view(&self) -> View<'_> {
        View::Forward(&**self)
    }

    fn static_shape() -> Option<&'static TypeShape> {
        T::static_shape()
    }
}

impl Inspect for Box<dyn Inspect> {
    fn view(&self) -> View<'_> {
        View::Forward(&**self)
    }
}

impl<T: Inspect> Inspect for Rc<T> {
    fn view(&self) -> View<'_> {
        View::Forward(&**self)
    }

    fn static_shape() -> Option<&'static TypeShape> {
        T::static_shape()
    }
}

impl<T: Inspect> Inspect for Arc<T> {
    fn view(&self) -> View<'_> {
        View::Forward(&**self)
    }

    fn static_shape() -> Option<&'static TypeShape> {
        T::static_shape()
    }
}

impl<T: Inspect> Inspect for OnceCell<T> {
    fn view(&self) -> View<'_> {
        match self.get() {
            Some(inner) => View::Forward(inner),
            None => View::Absent,
        }
    }

    fn static_shape() -> Option<&'static TypeShape> {
        T::static_shape()
    }
}

impl<T: Inspect> Inspect for OnceLock<T> {
    fn view(&self) -> View<'_> {
        match self.get() {
            Some(inner) => View::Forward(inner),
            None => View::Absent,
        }
    }

    fn static_shape() -> Option<&'static TypeShape> {
        T::static_shape()
    }
}

// Sequences

macro_rules! sequence_impls {
    ($([$($generics:tt)*] $ty:ty, |$s:ident| $len:expr, ordered: $ordered:expr;)*) => {
        $(
            impl<$($generics)*> Inspect for $ty {
                fn view(&self) -> View<'_> {
                    View::Sequence(self)
                }
            }

            impl<$($generics)*> Sequence for $ty {
                fn element_shape(&self) -> Option<&'static TypeShape> {
                    T::static_shape()
                }

                fn len(&self) -> usize {
                    let $s = self;
                    $len
                }

                fn elements(&self) -> Box<dyn Iterator<Item = &dyn Inspect> + '_> {
                    Box::new(self.iter().map(|e| e as &dyn Inspect))
                }

                fn is_ordered(&self) -> bool {
                    $ordered
                }
            }
        )*
    };
}

sequence_impls! {
    [T: Inspect] Vec<T>, |s| Vec::len(s), ordered: true;
    [T: Inspect] VecDeque<T>, |s| VecDeque::len(s), ordered: true;
    [T: Inspect, const N: usize] [T; N], |_s| N, ordered: true;
    [T: Inspect] BTreeSet<T>, |s| BTreeSet::len(s), ordered: true;
    // iteration order depends on the hasher state of each set
    [T: Inspect, S: 'static] HashSet<T, S>, |s| HashSet::len(s), ordered: false;
}
