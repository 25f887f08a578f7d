//! Terminal classification.
//!
//! Wrappers are resolved first: a value is classified by what it forwards
//! to, so `Some(5)`, `Box::new(5)` and `5` are all terminal.

use crate::errors::{DiffError, Result};
use crate::inspect::{Inspect, View};

/// Maximum number of wrapper hops followed before a value is rejected.
pub const FORWARDING_LIMIT: usize = 64;

/// Shape class of a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Terminal,
    Composite,
    Sequence,
}

/// Follow wrappers down to the value they hold.
///
/// Returns `Ok(None)` when the chain ends in an absent value.
///
/// # Errors
///
/// Returns `InvalidShape` if the chain is longer than [`FORWARDING_LIMIT`].
pub fn resolve<'a>(value: &'a dyn Inspect) -> Result<Option<&'a dyn Inspect>> {
    let mut current = value;
    for _ in 0..=FORWARDING_LIMIT {
        match current.view() {
            View::Forward(inner) => current = inner,
            View::Absent => return Ok(None),
            _ => return Ok(Some(current)),
        }
    }
    Err(DiffError::invalid_shape(
        value.type_name(),
        format!("more than {} nested wrappers", FORWARDING_LIMIT),
    ))
}

/// Class of an already resolved value, `None` if it is absent or a wrapper.
pub fn classify(value: &dyn Inspect) -> Option<Class> {
    match value.view() {
        View::Scalar(_) => Some(Class::Terminal),
        View::Record(_) => Some(Class::Composite),
        View::Sequence(_) => Some(Class::Sequence),
        View::Absent | View::Forward(_) => None,
    }
}

/// Whether `value` is compared by equality only, looking through wrappers.
pub fn is_terminal(value: &dyn Inspect) -> bool {
    matches!(
        resolve(value).ok().flatten().and_then(classify),
        Some(Class::Terminal)
    )
}
