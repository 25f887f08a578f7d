#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{customer, Customer};
use vardiff_core::descriptor::effective_annotations;
use vardiff_core::{compare, AnnotationSet, Described, TypeDescriptor};

#[test]
fn test_metadata_annotations_are_merged() {
    let descriptor = TypeDescriptor::of::<Customer>().unwrap();

    assert_eq!(descriptor.metadata, Some("CustomerMetadata"));
    assert_eq!(descriptor.key_members, vec!["id"]);
    assert!(descriptor.member("name").unwrap().is_ignored());
    assert!(!descriptor.member("email").unwrap().is_ignored());
    assert!(!descriptor.ignored);

    assert_eq!(
        effective_annotations(Customer::type_shape(), "name"),
        Some(AnnotationSet {
            key: false,
            ignore: true
        })
    );
    assert_eq!(effective_annotations(Customer::type_shape(), "phone"), None);
}

#[test]
fn test_member_ignored_through_metadata() {
    let a = customer(1, "Foo", "foo@example.com");
    let b = customer(1, "Bar", "foo@example.com");
    assert!(compare(&a, &b).unwrap().is_empty());

    let c = customer(1, "Foo", "bar@example.com");
    let variances = compare(&a, &c).unwrap();
    assert_eq!(variances.len(), 1);
    assert_eq!(variances[0].path(), "email");
}

#[test]
fn test_key_declared_through_metadata() {
    let l1 = vec![
        customer(1, "Foo", "foo@example.com"),
        customer(2, "Bar", "bar@example.com"),
    ];
    let l2 = vec![
        customer(2, "Bar", "bar@example.com"),
        customer(3, "Baz", "baz@example.com"),
        customer(1, "Renamed", "foo@example.com"),
    ];

    let variances = compare(&l1, &l2).unwrap();
    let labels: Vec<&str> = variances.iter().filter_map(|v| v.label()).collect();

    assert_eq!(
        labels,
        vec!["Extra object in right sequence with key {id=3}"]
    );
    assert!(variances[0].right().is(&l2[1]));
}
