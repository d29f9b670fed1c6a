//! classmap - Recover class diagrams from Java and C# sources
//!
//! A library that extracts classes, members and relationships from loose
//! source text using lexical recognizers, and lays them out as a draw.io
//! document or a JSON geometry payload.
//!
//! # Quick Start
//!
//! ```rust
//! use classmap::{assemble_sources, SourceFile};
//!
//! let files = vec![
//!     SourceFile::loaded("Dog.java", "class Dog extends Animal { private Bone bone; }"),
//!     SourceFile::loaded("Animal.java", "class Animal { }"),
//!     SourceFile::loaded("Bone.java", "class Bone { }"),
//! ];
//! let assembly = assemble_sources(&files).unwrap();
//! assert_eq!(assembly.model.class_count(), 3);
//! assert_eq!(assembly.model.relationship_count(), 2);
//! ```
//!
//! # Advanced Usage
//!
//! Each stage can be driven on its own:
//!
//! ```rust
//! use classmap::prelude::*;
//!
//! let assembler = Assembler::with_config(AssemblerConfig::new(ExtractMode::NameOnly));
//! let assembly = assembler
//!     .assemble(&[SourceFile::loaded("Point.cs", "class Point { public int X; }")])
//!     .unwrap();
//!
//! let layout = GridLayout::with_config(LayoutConfig::new().with_columns(4))
//!     .layout(&assembly.model)
//!     .unwrap();
//! assert_eq!(layout.classes[0].rows[0].text, "- int X");
//!
//! let xml = DrawioRenderer::new().render(&layout).unwrap();
//! assert!(xml.contains(r#"value="Point""#));
//! ```

pub mod assemble;
pub mod core;
pub mod extract;
pub mod layout;
pub mod model;
pub mod render;
pub mod resolve;

pub use assemble::{Assembler, Assembly, SourceContent, SourceFile};
pub use core::*;
pub use model::{ClassModel, ClassRecord, Relationship};
pub use render::OutputFormat;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::assemble::{Assembler, Assembly, SourceContent, SourceFile};
    pub use crate::core::{
        AssemblerConfig, BatchWarning, ClassmapError, ExtractMode, LayoutAlgorithm, LayoutConfig,
        MemberExtractor, RelationshipKind, Renderer, Variant, Visibility,
    };
    pub use crate::extract::{extractor_for, FullSignatureExtractor, NameOnlyExtractor};
    pub use crate::layout::{ClassBox, DiagramLayout, EdgeGeometry, GridLayout};
    pub use crate::model::{ClassModel, ClassRecord, Relationship};
    pub use crate::render::{DrawioRenderer, OutputFormat, PayloadRenderer, SummaryRenderer};
    pub use crate::resolve::{resolver_for, CSharpResolver, JavaResolver, RelationshipResolver};
}

/// Assemble a batch with the default configuration
///
/// # Example
/// ```rust
/// use classmap::{assemble_sources, SourceFile};
///
/// let assembly = assemble_sources(&[SourceFile::loaded("notes.md", "# nothing")]).unwrap();
/// assert_eq!(assembly.model.class_count(), 0);
/// assert_eq!(assembly.warnings.len(), 1);
/// ```
pub fn assemble_sources(files: &[SourceFile]) -> anyhow::Result<Assembly> {
    Assembler::new().assemble(files)
}

/// Lay out a model with the default grid and render it as draw.io XML
///
/// # Example
/// ```rust
/// use classmap::{generate_drawio, ClassModel, ClassRecord};
///
/// let model = ClassModel::from_parts(vec![ClassRecord::new("Order")], vec![]);
/// let xml = generate_drawio(&model).unwrap();
/// assert!(xml.contains(r#"<mxCell id="class0" value="Order""#));
/// ```
pub fn generate_drawio(model: &ClassModel) -> anyhow::Result<String> {
    generate(model, OutputFormat::Drawio, &LayoutConfig::default(), false)
}

/// Lay out a model with the default grid and serialize the geometry
pub fn generate_payload(model: &ClassModel, compact: bool) -> anyhow::Result<String> {
    generate(model, OutputFormat::Json, &LayoutConfig::default(), compact)
}

/// Lay out a model and render it in any output format
pub fn generate(
    model: &ClassModel,
    format: OutputFormat,
    config: &LayoutConfig,
    compact: bool,
) -> anyhow::Result<String> {
    use crate::layout::GridLayout;

    let layout = GridLayout::with_config(*config).layout(model)?;
    format.render(&layout, compact)
}
