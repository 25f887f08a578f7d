#![allow(clippy::unwrap_used, clippy::expect_used)]

use vardiff_core::descriptor;
use vardiff_core::errors::{DiffError, ExError, ExErrorKind};
use vardiff_core::inspect::{Described, Inspect, Record, Scalar, TypeShape, View};
use vardiff_core::{compare, describe, Side};

/// Declares two members but only exposes one
struct Partial {
    a: u32,
}

describe! { Partial { a, b } }

impl Inspect for Partial {
    fn view(&self) -> View<'_> {
        View::Record(self)
    }
}

impl Record for Partial {
    fn shape(&self) -> &'static TypeShape {
        Partial::type_shape()
    }

    fn member(&self, name: &str) -> Option<&dyn Inspect> {
        match name {
            "a" => Some(&self.a),
            _ => None,
        }
    }
}

/// Reports a different shape depending on its state
struct Shifting {
    wide: bool,
    n: u32,
}

struct Narrow;
describe! { Narrow { n } }

struct Wide;
describe! { Wide { n, extra } }

impl Inspect for Shifting {
    fn view(&self) -> View<'_> {
        View::Record(self)
    }
}

impl Record for Shifting {
    fn shape(&self) -> &'static TypeShape {
        if self.wide {
            Wide::type_shape()
        } else {
            Narrow::type_shape()
        }
    }

    fn member(&self, name: &str) -> Option<&dyn Inspect> {
        match name {
            "n" => Some(&self.n),
            "extra" if self.wide => Some(&self.n),
            _ => None,
        }
    }
}

/// Terminal or sequence depending on its contents
struct Chameleon(Vec<u8>);

impl Inspect for Chameleon {
    fn view(&self) -> View<'_> {
        match self.0.as_slice() {
            [single] => View::Scalar(Scalar::UInt(u128::from(*single))),
            _ => self.0.view(),
        }
    }
}

#[test]
fn test_null_type_verifiable_by_kind() {
    let err = descriptor::resolve(None).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NullType);

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.code(), "ERR_NULL_TYPE");
    assert_eq!(ex_err.op(), Some("resolve_descriptor"));
}

#[test]
fn test_undeclared_member_is_invalid_shape() {
    let (l, r) = (Partial { a: 1 }, Partial { a: 2 });

    let err = compare(&l, &r).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidShape);
    let ex_err: ExError = err.into();
    assert_eq!(ex_err.code(), "ERR_INVALID_SHAPE");
    assert_eq!(ex_err.type_name(), Some("Partial"));
    assert_eq!(ex_err.member(), Some("b"));
    assert!(ex_err.message().contains("member b"));
}

#[test]
fn test_diverging_member_lists_are_invalid_shape() {
    let l = Shifting { wide: false, n: 1 };
    let r = Shifting { wide: true, n: 1 };

    let err = compare(&l, &r).unwrap_err();

    assert!(matches!(
        err,
        DiffError::InvalidShape { ref type_name, .. } if type_name == "Narrow"
    ));
}

#[test]
fn test_inconsistent_classification_is_invalid_shape() {
    let l = Chameleon(vec![1]);
    let r = Chameleon(vec![1, 2]);

    let err = compare(&l, &r).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidShape);
    let ex_err: ExError = err.into();
    assert_eq!(ex_err.member(), None);
}

#[test]
fn test_multiple_key_declarations_structured_fields() {
    let err = DiffError::MultipleKeyDeclarations {
        type_name: "Order".to_string(),
        count: 2,
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::MultipleKeyDeclarations);
    assert_eq!(ex_err.code(), "ERR_MULTIPLE_KEY_DECLARATIONS");
    assert_eq!(ex_err.type_name(), Some("Order"));
    assert!(ex_err.message().contains("declares 2 key declarations"));
}

#[test]
fn test_duplicate_key_names_side() {
    let err = DiffError::DuplicateKey {
        type_name: "User".to_string(),
        key: "{id=1}".to_string(),
        side: Side::Left,
    };

    assert_eq!(
        err.to_string(),
        "Sequence of User contains more than one element with key {id=1} on the left side"
    );
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::NullType, "ERR_NULL_TYPE"),
        (
            ExErrorKind::MultipleKeyDeclarations,
            "ERR_MULTIPLE_KEY_DECLARATIONS",
        ),
        (ExErrorKind::InvalidShape, "ERR_INVALID_SHAPE"),
        (ExErrorKind::DuplicateKey, "ERR_DUPLICATE_KEY"),
        (ExErrorKind::InvalidConfig, "ERR_INVALID_CONFIG"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}
