#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{envelope, user, IgnoredClass, User};
use vardiff_core::{compare, record, TypeDescriptor};

fn ignored(id: u32, name: &str, is_happy: bool) -> IgnoredClass {
    IgnoredClass {
        id,
        name: name.to_string(),
        is_happy,
    }
}

struct Holder {
    ignored: IgnoredClass,
    count: u32,
}

record! { Holder { ignored, count } }

#[test]
fn test_ignored_member_is_skipped() {
    let a = User {
        age: 30,
        ..user(1, "Foo")
    };
    let b = User {
        age: 31,
        ..user(1, "Foo")
    };

    assert!(compare(&a, &b).unwrap().is_empty());

    let descriptor = TypeDescriptor::of::<User>().unwrap();
    let comparable: Vec<&str> = descriptor.comparable_members().map(|m| m.name).collect();
    assert_eq!(comparable, vec!["id", "name", "role"]);
}

#[test]
fn test_ignored_type_at_root() {
    let a = ignored(1, "Foo", true);
    let b = ignored(2, "Bar", false);

    assert!(compare(&a, &b).unwrap().is_empty());
    assert!(TypeDescriptor::of::<IgnoredClass>().unwrap().ignored);
}

#[test]
fn test_ignored_type_member_while_siblings_report() {
    let a = Holder {
        ignored: ignored(1, "Foo", true),
        count: 1,
    };
    let b = Holder {
        ignored: ignored(2, "Bar", false),
        count: 2,
    };

    let variances = compare(&a, &b).unwrap();

    assert_eq!(variances.len(), 1);
    assert_eq!(variances[0].path(), "count");
}

#[test]
fn test_ignored_type_takes_precedence_over_type_mismatch() {
    let a = envelope(ignored(1, "Foo", true));
    let b = envelope("not a record".to_string());

    assert!(compare(&a, &b).unwrap().is_empty());
    assert!(compare(&b, &a).unwrap().is_empty());
}

#[test]
fn test_runtime_type_mismatch_in_member() {
    let a = envelope(1i32);
    let b = envelope("1".to_string());

    let variances = compare(&a, &b).unwrap();

    assert_eq!(variances.len(), 1);
    assert_eq!(variances[0].label(), Some("payload"));
    assert_eq!(variances[0].left().downcast_ref::<i32>(), Some(&1));
    assert_eq!(
        variances[0].right().downcast_ref::<String>().map(String::as_str),
        Some("1")
    );
}

#[test]
fn test_runtime_type_mismatch_at_root_uses_type_label() {
    let variances = compare(&1u8, &1u16).unwrap();

    assert_eq!(variances.len(), 1);
    assert_eq!(variances[0].label(), Some("Type"));
}
