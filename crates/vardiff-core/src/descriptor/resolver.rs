use super::{AnnotationSet, MemberDescriptor, TypeDescriptor};
use crate::errors::{DiffError, Result};
use crate::inspect::{Annotation, MemberShape, TypeShape};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock, RwLock};

type Cache = RwLock<HashMap<usize, Arc<TypeDescriptor>>>;

static CACHE: OnceLock<Cache> = OnceLock::new();

fn cache() -> &'static Cache {
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

fn cache_key(shape: &'static TypeShape) -> usize {
    shape as *const TypeShape as usize
}

/// Resolve the descriptor for a declared shape.
///
/// Results are cached per shape; a poisoned cache is bypassed, never trusted.
///
/// # Errors
///
/// - `NullType` when no shape is supplied
/// - `MultipleKeyDeclarations` when more than one key block applies, or a key
///   block is combined with member-level key markers
/// - `InvalidShape` when member names repeat or a key block names a member
///   the type does not declare
pub fn resolve(shape: Option<&'static TypeShape>) -> Result<Arc<TypeDescriptor>> {
    let shape = shape.ok_or_else(|| DiffError::NullType {
        op: "resolve_descriptor".to_string(),
    })?;
    let key = cache_key(shape);

    if let Some(found) = cache()
        .read()
        .ok()
        .and_then(|entries| entries.get(&key).cloned())
    {
        return Ok(found);
    }

    let descriptor = Arc::new(build(shape)?);
    tracing::debug!(
        type_name = shape.name,
        members = descriptor.members.len(),
        keyed = descriptor.has_key(),
        ignored = descriptor.ignored,
        "descriptor resolved"
    );

    match cache().write() {
        Ok(mut entries) => Ok(entries.entry(key).or_insert(descriptor).clone()),
        Err(_) => Ok(descriptor),
    }
}

/// Annotations that apply to `member` of `shape`.
///
/// Direct markers are merged with the markers of the same-named member on
/// the metadata type, if the shape links one. Returns `None` when the shape
/// declares no such member.
pub fn effective_annotations(shape: &TypeShape, member: &str) -> Option<AnnotationSet> {
    let direct = shape.member(member)?;
    let indirect = shape
        .metadata_shape()
        .and_then(|meta| meta.member(member))
        .map(|m| m.annotations)
        .unwrap_or(&[]);
    Some(merge(direct, indirect))
}

fn merge(direct: &MemberShape, indirect: &[Annotation]) -> AnnotationSet {
    let mut set = AnnotationSet::default();
    for annotation in direct.annotations.iter().chain(indirect) {
        match annotation {
            Annotation::Key => set.key = true,
            Annotation::IgnoreVariance => set.ignore = true,
            Annotation::KeyBlock(_) => {}
        }
    }
    set
}

fn build(shape: &'static TypeShape) -> Result<TypeDescriptor> {
    let metadata = shape.metadata_shape();

    let mut seen = HashSet::new();
    for member in shape.members {
        if !seen.insert(member.name) {
            return Err(DiffError::invalid_member(
                shape.name,
                member.name,
                format!("member {} is declared more than once", member.name),
            ));
        }
    }

    let mut members: Vec<MemberDescriptor> = shape
        .members
        .iter()
        .enumerate()
        .map(|(ordinal, member)| MemberDescriptor {
            name: member.name,
            ordinal,
            annotations: effective_annotations(shape, member.name).unwrap_or_default(),
        })
        .collect();

    let blocks: Vec<&'static [&'static str]> = shape
        .key_blocks()
        .chain(metadata.into_iter().flat_map(|meta| meta.key_blocks()))
        .collect();
    let member_keys: Vec<&'static str> = members
        .iter()
        .filter(|m| m.is_key())
        .map(|m| m.name)
        .collect();

    let key_members = match blocks.as_slice() {
        [] => member_keys,
        [block] if member_keys.is_empty() => {
            let mut named = HashSet::new();
            for name in block.iter() {
                if !named.insert(*name) {
                    return Err(DiffError::invalid_member(
                        shape.name,
                        *name,
                        format!("key block names member {} twice", name),
                    ));
                }
                if shape.member(name).is_none() {
                    return Err(DiffError::invalid_member(
                        shape.name,
                        *name,
                        format!("key block names unknown member {}", name),
                    ));
                }
            }
            for member in members.iter_mut() {
                if named.contains(member.name) {
                    member.annotations.key = true;
                }
            }
            block.to_vec()
        }
        _ => {
            let count = blocks.len() + usize::from(!member_keys.is_empty());
            return Err(DiffError::MultipleKeyDeclarations {
                type_name: shape.name.to_string(),
                count,
            });
        }
    };

    let ignored = shape.has(Annotation::IgnoreVariance)
        || metadata.is_some_and(|meta| meta.has(Annotation::IgnoreVariance));

    Ok(TypeDescriptor {
        name: shape.name,
        members,
        key_members,
        ignored,
        metadata: metadata.map(|meta| meta.name),
    })
}
