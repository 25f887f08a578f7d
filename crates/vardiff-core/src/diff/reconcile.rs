//! Collection reconciliation.
//!
//! Aligns the elements of two sequences either by position or, when the
//! element type declares key members, by key. Alignment yields the variances
//! found while aligning (length mismatch, orphaned keys) plus the element
//! pairs the engine still has to descend into.

use crate::config::SequenceMode;
use crate::descriptor::{self, TypeDescriptor};
use crate::diff::model::{Operand, Side, Variance};
use crate::errors::{DiffError, Result};
use crate::inspect::{Inspect, Scalar, Sequence, View};
use crate::terminal::resolve;
use std::borrow::Cow;
use std::collections::HashMap;

/// Element pair still to be compared: label, left element, right element.
pub(crate) type ElementPair<'a> = (Cow<'static, str>, &'a dyn Inspect, &'a dyn Inspect);

pub(crate) struct Reconciled<'a> {
    /// Variances produced by alignment itself, in emission order
    pub extras: Vec<Variance<'a>>,
    /// Aligned pairs, in left order
    pub pairs: Vec<ElementPair<'a>>,
}

type Key<'a> = Vec<Option<Scalar<'a>>>;

/// Align two sequences under `node`, the variance of the sequence pair.
pub(crate) fn reconcile<'a>(
    left: &'a dyn Sequence,
    right: &'a dyn Sequence,
    mode: SequenceMode,
    node: &Variance<'a>,
) -> Result<Reconciled<'a>> {
    let keyed = match (mode, left.element_shape()) {
        (SequenceMode::Auto, Some(shape)) => {
            Some(descriptor::resolve(Some(shape))?).filter(|d| d.has_key())
        }
        _ => None,
    };

    tracing::debug!(
        mode = if keyed.is_some() { "keyed" } else { "positional" },
        left_len = left.len(),
        right_len = right.len(),
        path = %node.path(),
        "reconciling sequence"
    );

    match keyed {
        Some(descriptor) => by_key(left, right, &descriptor, node),
        None => Ok(by_position(left, right, node)),
    }
}

fn by_position<'a>(
    left: &'a dyn Sequence,
    right: &'a dyn Sequence,
    node: &Variance<'a>,
) -> Reconciled<'a> {
    if left.len() != right.len() {
        let label = format!("{}.Count()", node.label().unwrap_or("this"));
        return Reconciled {
            extras: vec![Variance::new(
                Some(Cow::Owned(label)),
                Operand::Count(left.len()),
                Operand::Count(right.len()),
                Some(node.clone()),
            )],
            pairs: Vec::new(),
        };
    }

    let pairs = in_alignment_order(left)
        .into_iter()
        .zip(in_alignment_order(right))
        .enumerate()
        .map(|(i, (l, r))| (Cow::Owned(format!("this[{}]", i)), l, r))
        .collect();
    Reconciled {
        extras: Vec::new(),
        pairs,
    }
}

/// Elements in the order positional alignment uses.
///
/// Unordered sequences of terminal values are sorted canonically so equal
/// sets line up; anything else keeps iteration order.
fn in_alignment_order<'a>(sequence: &'a dyn Sequence) -> Vec<&'a dyn Inspect> {
    let elements: Vec<&'a dyn Inspect> = sequence.elements().collect();
    if sequence.is_ordered() {
        return elements;
    }
    let scalars: Option<Vec<Scalar<'a>>> = elements
        .iter()
        .map(|element| match resolve(*element).ok().flatten()?.view() {
            View::Scalar(scalar) => Some(scalar),
            _ => None,
        })
        .collect();
    let Some(scalars) = scalars else {
        return elements;
    };
    let mut sorted: Vec<(Scalar<'a>, &'a dyn Inspect)> =
        scalars.into_iter().zip(elements).collect();
    sorted.sort_by(|(a, _), (b, _)| a.canonical_cmp(b));
    sorted.into_iter().map(|(_, element)| element).collect()
}

struct Keyed<'a> {
    order: Vec<(Key<'a>, &'a dyn Inspect)>,
    index: HashMap<Key<'a>, usize>,
}

fn by_key<'a>(
    left: &'a dyn Sequence,
    right: &'a dyn Sequence,
    descriptor: &TypeDescriptor,
    node: &Variance<'a>,
) -> Result<Reconciled<'a>> {
    let lefts = group(left, descriptor, Side::Left)?;
    let rights = group(right, descriptor, Side::Right)?;

    let mut extras = Vec::new();
    for (side, own, other) in [(Side::Left, &lefts, &rights), (Side::Right, &rights, &lefts)] {
        let place = match node.label() {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => format!("{} sequence", side),
        };
        for (key, element) in own.order.iter() {
            if other.index.contains_key(key) {
                continue;
            }
            let label = format!(
                "Extra object in {} with key {}",
                place,
                render_key(&descriptor.key_members, key)
            );
            let (l, r) = match side {
                Side::Left => (Operand::Value(*element), Operand::Absent),
                Side::Right => (Operand::Absent, Operand::Value(*element)),
            };
            extras.push(Variance::new(
                Some(Cow::Owned(label)),
                l,
                r,
                Some(node.clone()),
            ));
        }
    }

    let pairs = lefts
        .order
        .iter()
        .filter_map(|(key, l)| {
            let r = rights.order[*rights.index.get(key)?].1;
            let label = format!("this[{}]", render_key(&descriptor.key_members, key));
            Some((Cow::Owned(label), *l, r))
        })
        .collect();

    Ok(Reconciled { extras, pairs })
}

fn group<'a>(
    sequence: &'a dyn Sequence,
    descriptor: &TypeDescriptor,
    side: Side,
) -> Result<Keyed<'a>> {
    let mut keyed = Keyed {
        order: Vec::with_capacity(sequence.len()),
        index: HashMap::with_capacity(sequence.len()),
    };
    for element in sequence.elements() {
        let element = resolve(element)?.ok_or_else(|| {
            DiffError::invalid_shape(descriptor.name, "keyed sequence contains an absent element")
        })?;
        let key = key_of(element, descriptor)?;
        if keyed.index.contains_key(&key) {
            return Err(DiffError::DuplicateKey {
                type_name: descriptor.name.to_string(),
                key: render_key(&descriptor.key_members, &key),
                side,
            });
        }
        keyed.index.insert(key.clone(), keyed.order.len());
        keyed.order.push((key, element));
    }
    Ok(keyed)
}

fn key_of<'a>(element: &'a dyn Inspect, descriptor: &TypeDescriptor) -> Result<Key<'a>> {
    let View::Record(record) = element.view() else {
        return Err(DiffError::invalid_shape(
            descriptor.name,
            format!("keyed element {} is not a record", element.type_name()),
        ));
    };
    descriptor
        .key_members
        .iter()
        .map(|name| {
            let value = record.member(name).ok_or_else(|| {
                DiffError::invalid_member(
                    descriptor.name,
                    *name,
                    format!("key member {} is not exposed", name),
                )
            })?;
            match resolve(value)? {
                None => Ok(None),
                Some(resolved) => match resolved.view() {
                    View::Scalar(scalar) => Ok(Some(scalar)),
                    _ => Err(DiffError::invalid_member(
                        descriptor.name,
                        *name,
                        format!("key member {} is not terminal", name),
                    )),
                },
            }
        })
        .collect()
}

/// Render a key as `{id=1,name=Foo}`; absent parts render as `null`.
pub(crate) fn render_key(members: &[&str], key: &[Option<Scalar<'_>>]) -> String {
    let parts: Vec<String> = members
        .iter()
        .zip(key)
        .map(|(name, part)| match part {
            Some(scalar) => format!("{}={}", name, scalar),
            None => format!("{}=null", name),
        })
        .collect();
    format!("{{{}}}", parts.join(","))
}
