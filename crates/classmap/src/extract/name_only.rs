//! Name-only member extraction
//!
//! Keeps attribute types and names and method names, nothing else.

use tracing::trace;

use super::patterns;
use crate::core::{ExtractMode, MemberExtractor, Variant};
use crate::model::ClassRecord;

/// Extractor storing `"<type> <name>"` attributes and `"<name>()"` methods
///
/// No visibility marker is stored and repeated names are all kept, in
/// source order.
pub struct NameOnlyExtractor;

impl NameOnlyExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NameOnlyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MemberExtractor for NameOnlyExtractor {
    fn extract(&self, source: &str, variant: Variant) -> ClassRecord {
        let prepared = patterns::prepare(source);
        let Some(decl) = patterns::class_declaration(&prepared, variant) else {
            return ClassRecord::unnamed();
        };

        let mut record = ClassRecord::new(decl.name);
        for field in patterns::field_declarations(&prepared, decl.body.clone(), variant) {
            trace!(class = %record.name, field = %field.name, "attribute");
            record.add_attribute(format!("{} {}", field.type_name, field.name));
        }
        for method in patterns::method_declarations(&prepared, decl.body, variant) {
            trace!(class = %record.name, method = %method.name, "method");
            record.add_method(format!("{}()", method.name));
        }
        record
    }

    fn mode(&self) -> ExtractMode {
        ExtractMode::NameOnly
    }
}
