//! Structural variance engine.
//!
//! ## Entry points
//!
//! - [`compare`] collects every variance between two values.
//! - [`variances`] yields them lazily.
//! - [`Comparer`] does either with a non-default [`ComparerConfig`].
//!
//! ## Guarantees
//!
//! - **Reflexivity**: comparing a value with itself yields nothing.
//! - **Termination**: each pair of composite values is decomposed at most
//!   once per comparison, so reference cycles end.
//! - **Isolation**: cycle state lives in the comparison, never in the process.
//! - **Ordering**: members in declaration order; for keyed sequences, extras
//!   on the left, then extras on the right, then matched elements.
//!
//! [`ComparerConfig`]: crate::config::ComparerConfig

pub mod cycle_guard;
pub mod engine;
pub mod human_summary;
pub mod model;
mod reconcile;

pub use cycle_guard::CycleGuard;
pub use engine::{compare, variances, Comparer, Variances};
pub use human_summary::render_human_summary;
pub use model::{Operand, Side, Variance};
