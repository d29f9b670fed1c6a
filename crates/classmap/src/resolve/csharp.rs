//! C# relationship resolver
//!
//! The base list does not say which entries are interfaces. Names
//! starting with `I` are classified as implementations and everything
//! else as inheritance, so a base class such as `Item` is misread as an
//! interface.

use std::collections::HashSet;

use super::{owner_declaration, Edges, RelationshipResolver};
use crate::core::{RelationshipKind, Variant};
use crate::extract::patterns;
use crate::model::Relationship;

/// Reads `: BaseList` clauses, auto-properties and private fields
pub struct CSharpResolver;

impl CSharpResolver {
    pub fn new() -> Self {
        Self
    }

    fn base_kind(name: &str) -> RelationshipKind {
        if name.starts_with('I') {
            RelationshipKind::Implementation
        } else {
            RelationshipKind::Inheritance
        }
    }
}

impl Default for CSharpResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationshipResolver for CSharpResolver {
    fn resolve(&self, source: &str, owner: &str, known: &HashSet<String>) -> Vec<Relationship> {
        let prepared = patterns::prepare(source);
        let Some(decl) = owner_declaration(&prepared, owner, Variant::CSharp) else {
            return Vec::new();
        };
        let mut edges = Edges::new(owner, known);

        let header = &prepared.skeleton()[decl.header.clone()];
        if let Some(bases) = patterns::csharp_base_list(header) {
            for item in &bases.items {
                let name = patterns::simple_type_name(item);
                edges.push(decl.header.start + bases.offset, &name, Self::base_kind(&name));
            }
        }

        let members = patterns::auto_properties(&prepared, decl.body.clone(), Variant::CSharp)
            .into_iter()
            .chain(patterns::private_fields(&prepared, decl.body, Variant::CSharp));
        for member in members {
            edges.push_member(&member);
        }
        edges.finish()
    }

    fn variant(&self) -> Variant {
        Variant::CSharp
    }
}
