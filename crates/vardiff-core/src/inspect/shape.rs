//! Static type shapes and their annotations.
//!
//! A `TypeShape` is the declaration the descriptor resolver reads: the ordered
//! member list, the markers attached to each member and to the type, and an
//! optional link to a metadata type whose markers apply by member name.

/// A declarative marker attached to a type or a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    /// Member participates in the element key used for reconciliation
    Key,
    /// Suppress variances for the annotated member, or for the whole type
    IgnoreVariance,
    /// Type-level composite key naming its members in order
    KeyBlock(&'static [&'static str]),
}

/// Declared shape of one comparable member.
#[derive(Debug, Clone, Copy)]
pub struct MemberShape {
    pub name: &'static str,
    pub annotations: &'static [Annotation],
}

impl MemberShape {
    pub const fn new(name: &'static str, annotations: &'static [Annotation]) -> Self {
        Self { name, annotations }
    }

    pub fn has(&self, annotation: Annotation) -> bool {
        self.annotations.contains(&annotation)
    }
}

/// Declared shape of a composite type.
///
/// Members are listed in declaration order; that order is the order in which
/// the engine compares them and reports their variances.
#[derive(Debug, Clone, Copy)]
pub struct TypeShape {
    pub name: &'static str,
    pub members: &'static [MemberShape],
    pub annotations: &'static [Annotation],
    /// Link to the auxiliary type whose member markers apply to this one
    pub metadata: Option<fn() -> &'static TypeShape>,
}

impl TypeShape {
    pub fn member(&self, name: &str) -> Option<&'static MemberShape> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn has(&self, annotation: Annotation) -> bool {
        self.annotations.contains(&annotation)
    }

    /// Every key block declared directly on this type
    pub fn key_blocks(&self) -> impl Iterator<Item = &'static [&'static str]> + '_ {
        self.annotations.iter().filter_map(|a| match a {
            Annotation::KeyBlock(members) => Some(*members),
            _ => None,
        })
    }

    pub fn metadata_shape(&self) -> Option<&'static TypeShape> {
        self.metadata.map(|link| link())
    }
}

/// Types that carry a static shape without ever being compared themselves.
///
/// Metadata types implement this through `describe!`; records get it from
/// `record!`.
pub trait Described {
    fn type_shape() -> &'static TypeShape;
}

#[cfg(test)]
mod tests {
    use super::*;

    static MEMBERS: [MemberShape; 2] = [
        MemberShape::new("id", &[Annotation::Key]),
        MemberShape::new("name", &[]),
    ];

    static META: TypeShape = TypeShape {
        name: "ThingMetadata",
        members: &[],
        annotations: &[Annotation::IgnoreVariance],
        metadata: None,
    };

    fn meta() -> &'static TypeShape {
        &META
    }

    static THING: TypeShape = TypeShape {
        name: "Thing",
        members: &MEMBERS,
        annotations: &[Annotation::KeyBlock(&["id", "name"])],
        metadata: Some(meta),
    };

    #[test]
    fn test_member_lookup_by_name() {
        assert!(THING.member("id").is_some_and(|m| m.has(Annotation::Key)));
        assert!(THING.member("name").is_some_and(|m| !m.has(Annotation::Key)));
        assert!(THING.member("missing").is_none());
    }

    #[test]
    fn test_key_blocks_and_metadata_link() {
        let blocks: Vec<_> = THING.key_blocks().collect();
        assert_eq!(blocks, vec![&["id", "name"][..]]);
        assert_eq!(THING.metadata_shape().map(|s| s.name), Some("ThingMetadata"));
        assert!(THING.metadata_shape().is_some_and(|s| s.has(Annotation::IgnoreVariance)));
    }
}
