//! Shape declaration macros.
//!
//! ```
//! use vardiff_core::{describe, record};
//!
//! pub struct Customer {
//!     pub id: u32,
//!     pub name: String,
//! }
//!
//! pub struct CustomerMetadata;
//!
//! describe! {
//!     CustomerMetadata {
//!         #[key] id,
//!         #[ignore] name,
//!     }
//! }
//!
//! record! {
//!     #[metadata(CustomerMetadata)]
//!     Customer { id, name }
//! }
//! ```

/// Declare the shape of a type without making it comparable.
///
/// Used for metadata types whose member markers apply to another record.
/// Accepts the same markers as [`record!`](crate::record).
#[macro_export]
macro_rules! describe {
    (
        $(#[$tattr:ident $( ( $($targ:tt)* ) )?])*
        $ty:ident {
            $( $(#[$mattr:ident])* $field:ident ),* $(,)?
        }
    ) => {
        impl $crate::inspect::Described for $ty {
            fn type_shape() -> &'static $crate::inspect::TypeShape {
                static SHAPE: $crate::inspect::TypeShape = $crate::inspect::TypeShape {
                    name: stringify!($ty),
                    members: &[
                        $(
                            $crate::inspect::MemberShape {
                                name: stringify!($field),
                                annotations: &[ $( $crate::__member_annotation!($mattr) ),* ],
                            }
                        ),*
                    ],
                    annotations: $crate::__type_annotations!(
                        @acc [] $( [$tattr $( ( $($targ)* ) )?] )*
                    ),
                    metadata: $crate::__metadata_link!( $( [$tattr $( ( $($targ)* ) )?] )* ),
                };
                &SHAPE
            }
        }
    };
}

/// Make a struct comparable member by member.
///
/// Member markers: `#[key]`, `#[ignore]`. Type markers: `#[ignore]`,
/// `#[key(a, b)]` for a composite key block and `#[metadata(Type)]` to take
/// member markers from a type declared with [`describe!`](crate::describe).
/// Every listed field must implement [`Inspect`](crate::inspect::Inspect);
/// fields left out are invisible to the engine.
#[macro_export]
macro_rules! record {
    (
        $(#[$tattr:ident $( ( $($targ:tt)* ) )?])*
        $ty:ident {
            $( $(#[$mattr:ident])* $field:ident ),* $(,)?
        }
    ) => {
        $crate::describe! {
            $( #[$tattr $( ( $($targ)* ) )?] )*
            $ty { $( $(#[$mattr])* $field ),* }
        }

        impl $crate::inspect::Inspect for $ty {
            fn view(&self) -> $crate::inspect::View<'_> {
                $crate::inspect::View::Record(self)
            }

            fn static_shape() -> Option<&'static $crate::inspect::TypeShape> {
                Some(<Self as $crate::inspect::Described>::type_shape())
            }
        }

        impl $crate::inspect::Record for $ty {
            fn shape(&self) -> &'static $crate::inspect::TypeShape {
                <Self as $crate::inspect::Described>::type_shape()
            }

            fn member(&self, name: &str) -> Option<&dyn $crate::inspect::Inspect> {
                match name {
                    $( stringify!($field) => Some(&self.$field as &dyn $crate::inspect::Inspect), )*
                    _ => None,
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __member_annotation {
    (key) => {
        $crate::inspect::Annotation::Key
    };
    (ignore) => {
        $crate::inspect::Annotation::IgnoreVariance
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __type_annotations {
    (@acc [$($out:expr,)*]) => {
        &[$($out,)*]
    };
    (@acc [$($out:expr,)*] [ignore] $($rest:tt)*) => {
        $crate::__type_annotations!(
            @acc [$($out,)* $crate::inspect::Annotation::IgnoreVariance,] $($rest)*
        )
    };
    (@acc [$($out:expr,)*] [key ( $($member:ident),* $(,)? )] $($rest:tt)*) => {
        $crate::__type_annotations!(
            @acc [$($out,)* $crate::inspect::Annotation::KeyBlock(&[$(stringify!($member)),*]),]
            $($rest)*
        )
    };
    (@acc [$($out:expr,)*] [metadata $($link:tt)*] $($rest:tt)*) => {
        $crate::__type_annotations!(@acc [$($out,)*] $($rest)*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __metadata_link {
    () => {
        None
    };
    ([metadata ( $meta:ty )] $($rest:tt)*) => {
        Some(<$meta as $crate::inspect::Described>::type_shape as fn() -> &'static $crate::inspect::TypeShape)
    };
    ([$($other:tt)*] $($rest:tt)*) => {
        $crate::__metadata_link!($($rest)*)
    };
}

#[cfg(test)]
mod tests {
    use crate::inspect::{Annotation, Described, Inspect, Record, View};

    struct Plain {
        a: i32,
        b: String,
    }

    record! {
        Plain { a, b }
    }

    struct Marked {
        id: u32,
        name: String,
        secret: String,
    }

    struct MarkedMetadata;

    describe! {
        #[key(id, name)]
        MarkedMetadata { #[ignore] secret }
    }

    record! {
        #[ignore]
        #[metadata(MarkedMetadata)]
        Marked { #[key] id, name, #[ignore] secret }
    }

    #[test]
    fn test_record_exposes_members_in_order() {
        let shape = Plain::type_shape();
        assert_eq!(shape.name, "Plain");
        let names: Vec<_> = shape.members.iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(shape.annotations.is_empty());
        assert!(shape.metadata.is_none());

        let value = Plain {
            a: 1,
            b: "x".to_string(),
        };
        assert!(value.member("a").is_some_and(|m| m.is::<i32>()));
        assert!(value.member("b").is_some_and(|m| m.is::<String>()));
        assert!(value.member("c").is_none());
        assert!(matches!(value.view(), View::Record(_)));
        assert_eq!(<Plain as Inspect>::static_shape().map(|s| s.name), Some("Plain"));
    }

    #[test]
    fn test_markers_are_recorded() {
        let shape = Marked::type_shape();
        assert!(shape.has(Annotation::IgnoreVariance));
        assert!(shape.member("id").is_some_and(|m| m.has(Annotation::Key)));
        assert!(shape
            .member("secret")
            .is_some_and(|m| m.has(Annotation::IgnoreVariance)));
        assert_eq!(shape.metadata_shape().map(|s| s.name), Some("MarkedMetadata"));

        let meta = MarkedMetadata::type_shape();
        assert_eq!(meta.key_blocks().collect::<Vec<_>>(), vec![&["id", "name"][..]]);

        let value = Marked {
            id: 1,
            name: "n".to_string(),
            secret: "s".to_string(),
        };
        assert!(value.member("secret").is_some());
    }
}
