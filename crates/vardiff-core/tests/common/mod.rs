//! Shared fixtures for integration tests.
//!
//! Each test binary uses a different subset; unused items are expected.
#![allow(dead_code)]

use std::cell::OnceCell;
use std::rc::Rc;
use vardiff_core::{describe, record, Inspect};

pub struct ImmutableClass {
    int1: i32,
    string1: String,
}

impl ImmutableClass {
    pub fn new(int1: i32, string1: &str) -> Self {
        Self {
            int1,
            string1: string1.to_string(),
        }
    }
}

record! { ImmutableClass { int1, string1 } }

#[derive(Default)]
pub struct MutableClass {
    pub int1: i32,
    pub string1: Option<String>,
    pub immutable1: Option<ImmutableClass>,
}

record! { MutableClass { int1, string1, immutable1 } }

/// User with a back-linkable role
pub struct User {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub role: OnceCell<Rc<Role>>,
}

record! {
    User {
        #[key] id,
        name,
        #[ignore] age,
        role,
    }
}

pub struct Role {
    pub id: u32,
    pub name: String,
    pub user: OnceCell<Rc<User>>,
}

record! { Role { #[key] id, name, user } }

pub fn user(id: u32, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        age: 0,
        role: OnceCell::new(),
    }
}

pub fn role(id: u32, name: &str) -> Role {
    Role {
        id,
        name: name.to_string(),
        user: OnceCell::new(),
    }
}

pub fn users(entries: &[(u32, &str)]) -> Vec<User> {
    entries.iter().map(|(id, name)| user(*id, name)).collect()
}

pub struct UserWithRoles {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub roles: OnceCell<Vec<Rc<RoleWithUsers>>>,
}

record! { UserWithRoles { #[key] id, name, age, roles } }

pub struct RoleWithUsers {
    pub id: u32,
    pub name: String,
    pub users: OnceCell<Vec<Rc<UserWithRoles>>>,
}

record! { RoleWithUsers { #[key] id, name, users } }

#[derive(Default)]
pub struct CollectionClass {
    pub ints: Vec<i32>,
    pub immutable_classes: Vec<ImmutableClass>,
    pub users: Vec<User>,
}

record! { CollectionClass { ints, immutable_classes, users } }

pub struct IgnoredClass {
    pub id: u32,
    pub name: String,
    pub is_happy: bool,
}

record! {
    #[ignore]
    IgnoredClass { id, name, is_happy }
}

pub struct ClassWithTwoKeys {
    pub id: u32,
    pub name: String,
    pub note: String,
}

record! { ClassWithTwoKeys { #[key] id, #[key] name, note } }

pub fn two_keys(id: u32, name: &str, note: &str) -> ClassWithTwoKeys {
    ClassWithTwoKeys {
        id,
        name: name.to_string(),
        note: note.to_string(),
    }
}

/// Stand-in for a generated type that cannot carry markers itself
pub struct Customer {
    pub id: u32,
    pub name: String,
    pub email: String,
}

pub struct CustomerMetadata;

describe! {
    CustomerMetadata {
        #[key] id,
        #[ignore] name,
    }
}

record! {
    #[metadata(CustomerMetadata)]
    Customer { id, name, email }
}

pub fn customer(id: u32, name: &str, email: &str) -> Customer {
    Customer {
        id,
        name: name.to_string(),
        email: email.to_string(),
    }
}

/// Line keyed by a type-level composite key block
pub struct OrderLine {
    pub order: u32,
    pub line: u16,
    pub qty: u32,
}

record! {
    #[key(order, line)]
    OrderLine { order, line, qty }
}

pub struct DoubleKeyed {
    pub a: u32,
    pub b: u32,
}

record! {
    #[key(a)]
    #[key(b)]
    DoubleKeyed { a, b }
}

/// Holder whose payload type is only known at runtime
pub struct Envelope {
    pub payload: Box<dyn Inspect>,
}

record! { Envelope { payload } }

pub fn envelope(payload: impl Inspect) -> Envelope {
    Envelope {
        payload: Box::new(payload),
    }
}
