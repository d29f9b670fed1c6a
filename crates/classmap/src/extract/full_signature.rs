//! Full-signature member extraction
//!
//! Keeps the visibility marker and the whole declaration (modifiers,
//! types, parameters), minus initializers and bodies.

use std::collections::HashSet;

use tracing::trace;

use super::patterns::{self, FieldDecl, PropertyDecl};
use crate::core::{ExtractMode, MemberExtractor, Variant, Visibility};
use crate::model::ClassRecord;

/// Extractor storing `<marker><signature>` members, deduplicated by name
pub struct FullSignatureExtractor;

impl FullSignatureExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FullSignatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// An attribute candidate, either a field or a C# property
struct Attribute {
    offset: usize,
    name: String,
    visibility: Visibility,
    signature: String,
}

impl From<FieldDecl> for Attribute {
    fn from(field: FieldDecl) -> Self {
        Self {
            offset: field.offset,
            name: field.name,
            visibility: field.visibility,
            signature: field.signature,
        }
    }
}

impl From<PropertyDecl> for Attribute {
    fn from(prop: PropertyDecl) -> Self {
        Self {
            offset: prop.offset,
            signature: format!("{} {}", prop.type_name, prop.name),
            name: prop.name,
            visibility: prop.visibility,
        }
    }
}

impl MemberExtractor for FullSignatureExtractor {
    fn extract(&self, source: &str, variant: Variant) -> ClassRecord {
        let prepared = patterns::prepare(source);
        let Some(decl) = patterns::class_declaration(&prepared, variant) else {
            return ClassRecord::unnamed();
        };
        let mut record = ClassRecord::new(decl.name);

        let mut attributes: Vec<Attribute> =
            patterns::field_declarations(&prepared, decl.body.clone(), variant)
                .into_iter()
                .map(Attribute::from)
                .collect();
        if variant == Variant::CSharp {
            attributes.extend(
                patterns::property_declarations(&prepared, decl.body.clone(), variant)
                    .into_iter()
                    .map(Attribute::from),
            );
            attributes.sort_by_key(|a| a.offset);
        }

        let mut seen = HashSet::new();
        for attr in attributes {
            if seen.insert(attr.name.clone()) {
                trace!(class = %record.name, attribute = %attr.name, "attribute");
                record.add_attribute(format!("{}{}", attr.visibility.to_char(), attr.signature));
            }
        }

        seen.clear();
        for method in patterns::method_declarations(&prepared, decl.body, variant) {
            if seen.insert(method.name.clone()) {
                trace!(class = %record.name, method = %method.name, "method");
                record.add_method(format!("{}{}", method.visibility.to_char(), method.signature));
            }
        }
        record
    }

    fn mode(&self) -> ExtractMode {
        ExtractMode::FullSignature
    }
}
