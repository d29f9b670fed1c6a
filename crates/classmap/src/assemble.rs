//! Batch assembly
//!
//! The assembler drives the pipeline over a batch of source files:
//! extract one class record per file, index the accepted names, then
//! resolve relationships file by file against that index.
//!
//! Problems with individual files never abort the batch. They are
//! collected as [`BatchWarning`]s next to the model and mirrored as
//! `tracing` warnings.

use std::collections::HashMap;

use anyhow::Result;
use tracing::{debug, info, span, warn, Level};

use crate::core::{AssemblerConfig, BatchWarning, MemberExtractor, Variant};
use crate::extract::extractor_for;
use crate::model::ClassModel;
use crate::resolve::resolver_for;

/// Text of a source file, or the reason it could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceContent {
    Loaded(String),
    Unavailable(String),
}

/// One input of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Display identifier, usually the path; its extension picks the variant
    pub id: String,
    pub content: SourceContent,
    /// Explicit variant, wins over the extension
    pub variant: Option<Variant>,
}

impl SourceFile {
    pub fn loaded(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: SourceContent::Loaded(text.into()),
            variant: None,
        }
    }

    pub fn unavailable(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: SourceContent::Unavailable(reason.into()),
            variant: None,
        }
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Effective variant: the override, else the id's extension
    pub fn effective_variant(&self) -> Option<Variant> {
        self.variant.or_else(|| Variant::from_path(&self.id))
    }
}

/// Result of one batch
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub model: ClassModel,
    pub warnings: Vec<BatchWarning>,
}

impl Assembly {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Name of the first accepted class, if any
    pub fn first_class(&self) -> Option<&str> {
        self.model.classes().first().map(|c| c.name.as_str())
    }
}

/// A file that produced a usable, unique class
struct Accepted<'a> {
    text: &'a str,
    variant: Variant,
    name: String,
}

/// Batch driver: extractor selection, size limits and warning policy
pub struct Assembler {
    config: AssemblerConfig,
    extractor: Box<dyn MemberExtractor>,
}

impl Assembler {
    /// Assembler with the default configuration (full signatures, 1 MiB cap)
    pub fn new() -> Self {
        Self::with_config(AssemblerConfig::default())
    }

    pub fn with_config(config: AssemblerConfig) -> Self {
        Self {
            extractor: extractor_for(config.mode),
            config,
        }
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Build the model for a batch
    ///
    /// Fails only when the configuration is invalid.
    pub fn assemble(&self, files: &[SourceFile]) -> Result<Assembly> {
        let assemble_span = span!(Level::INFO, "assemble", files = files.len());
        let _enter = assemble_span.enter();

        self.config.validate()?;
        info!(mode = %self.config.mode, "Starting batch assembly");

        let mut assembly = Assembly::default();
        let mut origins: HashMap<String, &str> = HashMap::new();
        let mut accepted = Vec::new();

        // Step 1: one class record per file
        let extract_span = span!(Level::DEBUG, "assemble_extract");
        let _extract_enter = extract_span.enter();
        for file in files {
            let text = match &file.content {
                SourceContent::Loaded(text) => text.as_str(),
                SourceContent::Unavailable(reason) => {
                    report(
                        &mut assembly.warnings,
                        BatchWarning::Unavailable {
                            id: file.id.clone(),
                            reason: reason.clone(),
                        },
                    );
                    continue;
                }
            };
            let Some(variant) = file.effective_variant() else {
                report(
                    &mut assembly.warnings,
                    BatchWarning::UnsupportedExtension {
                        id: file.id.clone(),
                    },
                );
                continue;
            };
            if text.len() > self.config.max_source_bytes {
                report(
                    &mut assembly.warnings,
                    BatchWarning::TooLarge {
                        id: file.id.clone(),
                        bytes: text.len(),
                        limit: self.config.max_source_bytes,
                    },
                );
                continue;
            }

            let record = self.extractor.extract(text, variant);
            if !record.is_usable() {
                report(
                    &mut assembly.warnings,
                    BatchWarning::NoClassFound {
                        id: file.id.clone(),
                    },
                );
                continue;
            }
            if let Some(first) = origins.get(&record.name) {
                report(
                    &mut assembly.warnings,
                    BatchWarning::DuplicateClass {
                        id: file.id.clone(),
                        name: record.name.clone(),
                        first: first.to_string(),
                    },
                );
                continue;
            }

            debug!(
                id = %file.id,
                class = %record.name,
                attributes = record.attributes.len(),
                methods = record.methods.len(),
                "Extracted class"
            );
            origins.insert(record.name.clone(), &file.id);
            accepted.push(Accepted {
                text,
                variant,
                name: record.name.clone(),
            });
            assembly.model.add_class(record);
        }
        drop(_extract_enter);

        // Step 2: resolve against every accepted name
        let resolve_span = span!(Level::DEBUG, "assemble_resolve");
        let _resolve_enter = resolve_span.enter();
        let known = assembly.model.class_names();
        for file in &accepted {
            let resolver = resolver_for(file.variant);
            for rel in resolver.resolve(file.text, &file.name, &known) {
                assembly.model.add_relationship(rel);
            }
        }
        drop(_resolve_enter);

        info!(
            classes = assembly.model.class_count(),
            relationships = assembly.model.relationship_count(),
            warnings = assembly.warnings.len(),
            "Batch assembled"
        );
        Ok(assembly)
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

fn report(warnings: &mut Vec<BatchWarning>, warning: BatchWarning) {
    warn!(source = warning.source_id(), "{}", warning);
    warnings.push(warning);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExtractMode, RelationshipKind};
    use crate::model::Relationship;

    #[test]
    fn test_end_to_end_batch() {
        let files = vec![
            SourceFile::loaded("A.java", "class A extends B { private C c; }"),
            SourceFile::loaded("B.java", "class B { }"),
            SourceFile::loaded("C.java", "class C { }"),
        ];
        let assembly = Assembler::new().assemble(&files).unwrap();

        assert_eq!(assembly.model.class_count(), 3);
        assert_eq!(
            assembly.model.relationships(),
            &[
                Relationship::new("A", "B", RelationshipKind::Inheritance),
                Relationship::new("A", "C", RelationshipKind::Association),
            ]
        );
        assert!(!assembly.has_warnings());
        assert_eq!(assembly.first_class(), Some("A"));
    }

    #[test]
    fn test_warnings_do_not_abort() {
        let files = vec![
            SourceFile::unavailable("Gone.java", "permission denied"),
            SourceFile::loaded("notes.txt", "class Notes {}"),
            SourceFile::loaded("Empty.cs", "// nothing here"),
            SourceFile::loaded("Dog.cs", "class Dog : Animal { }"),
            SourceFile::loaded("other/Dog.cs", "class Dog { }"),
            SourceFile::loaded("Animal.cs", "class Animal { }"),
        ];
        let assembly = Assembler::new().assemble(&files).unwrap();

        let ids: Vec<_> = assembly.warnings.iter().map(|w| w.source_id()).collect();
        assert_eq!(ids, vec!["Gone.java", "notes.txt", "Empty.cs", "other/Dog.cs"]);
        assert!(matches!(
            &assembly.warnings[3],
            BatchWarning::DuplicateClass { first, .. } if first == "Dog.cs"
        ));
        assert_eq!(assembly.model.class_count(), 2);
        assert_eq!(assembly.model.relationship_count(), 1);
    }

    #[test]
    fn test_variant_override_beats_extension() {
        let files = vec![
            SourceFile::loaded("snippet.txt", "class Dog : Animal { }").with_variant(Variant::CSharp),
            SourceFile::loaded("Animal", "class Animal { }").with_variant(Variant::CSharp),
        ];
        let assembly = Assembler::new().assemble(&files).unwrap();
        assert_eq!(assembly.model.relationship_count(), 1);
    }

    #[test]
    fn test_size_limit() {
        let config = AssemblerConfig::new(ExtractMode::NameOnly).with_max_source_bytes(16);
        let files = vec![SourceFile::loaded(
            "Big.java",
            "public class Big { private int a; private int b; }",
        )];
        let assembly = Assembler::with_config(config).assemble(&files).unwrap();
        assert_eq!(assembly.model.class_count(), 0);
        assert!(matches!(
            assembly.warnings[0],
            BatchWarning::TooLarge { limit: 16, .. }
        ));
    }

    #[test]
    fn test_invalid_config_fails() {
        let config = AssemblerConfig::default().with_max_source_bytes(0);
        assert!(Assembler::with_config(config).assemble(&[]).is_err());
    }

    #[test]
    fn test_empty_batch() {
        let assembly = Assembler::new().assemble(&[]).unwrap();
        assert_eq!(assembly.model.class_count(), 0);
        assert_eq!(assembly.first_class(), None);
    }
}
