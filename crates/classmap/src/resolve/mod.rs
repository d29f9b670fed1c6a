//! Relationship resolution
//!
//! A resolver reads one file's text against the set of class names known
//! in the batch and reports edges from that file's class. Names outside
//! the set are dropped, which is what keeps library types, primitives and
//! generic parameters out of the diagram.

mod csharp;
mod java;

pub use csharp::CSharpResolver;
pub use java::JavaResolver;

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::core::{RelationshipKind, Variant};
use crate::extract::patterns::{self, Declaration, PreparedSource, TypedMember};
use crate::model::Relationship;

/// Per-variant relationship detection
pub trait RelationshipResolver: Send + Sync {
    /// Edges from `owner`, in source order, to names in `known`
    fn resolve(&self, source: &str, owner: &str, known: &HashSet<String>) -> Vec<Relationship>;

    /// The variant this resolver reads
    fn variant(&self) -> Variant;
}

/// Create the resolver for a variant
pub fn resolver_for(variant: Variant) -> Box<dyn RelationshipResolver> {
    match variant {
        Variant::Java => Box::new(JavaResolver::new()),
        Variant::CSharp => Box::new(CSharpResolver::new()),
    }
}

/// Resolve with the resolver for `variant`
pub fn resolve(
    source: &str,
    owner: &str,
    known: &HashSet<String>,
    variant: Variant,
) -> Vec<Relationship> {
    resolver_for(variant).resolve(source, owner, known)
}

/// Locate the owner's declaration in prepared text
fn owner_declaration(
    prepared: &PreparedSource,
    owner: &str,
    variant: Variant,
) -> Option<Declaration> {
    let decl = patterns::class_declaration(prepared, variant)?;
    if decl.name != owner {
        debug!(owner, found = %decl.name, "declaration does not match owner");
        return None;
    }
    Some(decl)
}

/// Candidate edges collected with their source offset
struct Edges<'a> {
    owner: &'a str,
    known: &'a HashSet<String>,
    found: Vec<(usize, Relationship)>,
}

impl<'a> Edges<'a> {
    fn new(owner: &'a str, known: &'a HashSet<String>) -> Self {
        Self {
            owner,
            known,
            found: Vec::new(),
        }
    }

    fn push(&mut self, offset: usize, target: &str, kind: RelationshipKind) {
        if !self.known.contains(target) {
            debug!(owner = self.owner, target, %kind, "dropping edge to unknown type");
            return;
        }
        trace!(owner = self.owner, target, %kind, offset, "edge");
        self.found
            .push((offset, Relationship::new(self.owner, target, kind)));
    }

    /// Association, or composition when the member builds its own type
    fn push_member(&mut self, member: &TypedMember) {
        let kind = if member.constructed.as_deref() == Some(member.type_name.as_str()) {
            RelationshipKind::Composition
        } else {
            RelationshipKind::Association
        };
        self.push(member.offset, &member.type_name, kind);
    }

    fn finish(mut self) -> Vec<Relationship> {
        self.found.sort_by_key(|(offset, _)| *offset);
        debug!(owner = self.owner, count = self.found.len(), "resolved");
        self.found.into_iter().map(|(_, rel)| rel).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolver_for_variant() {
        assert_eq!(resolver_for(Variant::Java).variant(), Variant::Java);
        assert_eq!(resolver_for(Variant::CSharp).variant(), Variant::CSharp);
    }

    #[test]
    fn test_resolve_dispatch() {
        let rels = resolve(
            "class Dog : Animal { }",
            "Dog",
            &known(&["Dog", "Animal"]),
            Variant::CSharp,
        );
        assert_eq!(
            rels,
            vec![Relationship::new("Dog", "Animal", RelationshipKind::Inheritance)]
        );
    }

    #[test]
    fn test_owner_mismatch_yields_nothing() {
        let rels = resolve(
            "class Dog extends Animal { }",
            "Cat",
            &known(&["Dog", "Cat", "Animal"]),
            Variant::Java,
        );
        assert!(rels.is_empty());
    }

    #[test]
    fn test_edges_sorted_by_offset() {
        let names = known(&["B", "C"]);
        let mut edges = Edges::new("A", &names);
        edges.push(30, "C", RelationshipKind::Association);
        edges.push(10, "B", RelationshipKind::Inheritance);
        edges.push(20, "Z", RelationshipKind::Association);
        let rels = edges.finish();
        assert_eq!(rels.len(), 2);
        assert_eq!(rels[0].to, "B");
        assert_eq!(rels[1].to, "C");
    }
}
