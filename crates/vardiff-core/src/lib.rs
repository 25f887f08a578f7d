//! vardiff Core - Structural variance engine
//!
//! This crate compares two arbitrary values of matching shape and reports
//! every field-level, element-level and nested-object-level discrepancy as
//! a [`Variance`]. Each variance links to the variance of the enclosing pair,
//! so the full path that produced it can be read by walking `parent()` from
//! leaf to root.
//!
//! The crate provides:
//! - The introspection boundary ([`Inspect`], [`Record`], [`Sequence`]) and
//!   the `record!` / `describe!` macros that declare member shapes and
//!   annotations (key members, ignore markers, metadata indirection)
//! - The type descriptor resolver with a per-type descriptor cache
//! - Terminal value classification
//! - Positional and key-based collection reconciliation
//! - The variance tree builder, exposed eagerly ([`compare`]) and lazily
//!   ([`variances`]), guarded against reference cycles per comparison
//!
//! # Example
//!
//! ```
//! use vardiff_core::{compare, record};
//!
//! struct User {
//!     id: i32,
//!     name: String,
//! }
//!
//! record! {
//!     User {
//!         #[key] id,
//!         name,
//!     }
//! }
//!
//! let a = User { id: 1, name: "Foo".to_string() };
//! let b = User { id: 2, name: "Bar".to_string() };
//!
//! let found = compare(&a, &b).unwrap();
//! assert_eq!(found.len(), 2);
//! assert_eq!(found[0].label(), Some("id"));
//! assert_eq!(found[1].path(), "name");
//! ```

pub mod config;
pub mod descriptor;
pub mod diff;
pub mod errors;
pub mod inspect;
pub mod logging_facility;
pub mod terminal;

pub use vardiff_core_types as core_types;

// Re-export commonly used types
pub use config::{ComparerConfig, SequenceMode};
pub use descriptor::{AnnotationSet, MemberDescriptor, TypeDescriptor};
pub use diff::{
    compare, render_human_summary, variances, Comparer, CycleGuard, Operand, Side, Variance,
    Variances,
};
pub use errors::{DiffError, ExError, ExErrorKind, Result};
pub use inspect::{
    Annotation, AsAny, Decimal, Described, Inspect, MemberShape, Record, Scalar, Sequence,
    TypeShape, View,
};
pub use terminal::is_terminal;
