//! Java relationship resolver

use std::collections::HashSet;

use super::{owner_declaration, Edges, RelationshipResolver};
use crate::core::{RelationshipKind, Variant};
use crate::extract::patterns;
use crate::model::Relationship;

/// Reads `extends`/`implements` clauses and private fields
pub struct JavaResolver;

impl JavaResolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JavaResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationshipResolver for JavaResolver {
    fn resolve(&self, source: &str, owner: &str, known: &HashSet<String>) -> Vec<Relationship> {
        let prepared = patterns::prepare(source);
        let Some(decl) = owner_declaration(&prepared, owner, Variant::Java) else {
            return Vec::new();
        };
        let mut edges = Edges::new(owner, known);

        let header = &prepared.skeleton()[decl.header.clone()];
        for clause in patterns::java_header_clauses(header) {
            let kind = match clause.keyword {
                "extends" => RelationshipKind::Inheritance,
                _ => RelationshipKind::Implementation,
            };
            for item in &clause.items {
                let name = patterns::simple_type_name(item);
                edges.push(decl.header.start + clause.offset, &name, kind);
            }
        }

        for field in patterns::private_fields(&prepared, decl.body, Variant::Java) {
            edges.push_member(&field);
        }
        edges.finish()
    }

    fn variant(&self) -> Variant {
        Variant::Java
    }
}
