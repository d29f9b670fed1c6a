//! Integration tests for the public API

use classmap::prelude::*;
use classmap::{assemble_sources, generate, generate_drawio, generate_payload};

fn batch() -> Vec<SourceFile> {
    vec![
        SourceFile::loaded("A.java", "class A extends B { private C c; }"),
        SourceFile::loaded("B.java", "class B { }"),
        SourceFile::loaded("C.java", "class C { }"),
    ]
}

#[test]
fn test_end_to_end_scenario() {
    let assembly = assemble_sources(&batch()).unwrap();
    let names: Vec<_> = assembly
        .model
        .classes()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    assert_eq!(
        assembly.model.relationships(),
        &[
            Relationship::new("A", "B", RelationshipKind::Inheritance),
            Relationship::new("A", "C", RelationshipKind::Association),
        ]
    );
}

#[test]
fn test_model_json_shape() {
    let assembly = assemble_sources(&batch()).unwrap();
    let json = serde_json::to_value(&assembly.model).unwrap();
    assert_eq!(json["classes"][0]["name"], "A");
    assert_eq!(json["classes"][0]["attributes"][0], "-C c");
    assert_eq!(json["relationships"][0]["from"], "A");
    assert_eq!(json["relationships"][0]["to"], "B");
    assert_eq!(json["relationships"][0]["type"], "inheritance");
}

#[test]
fn test_generate_drawio_is_idempotent() {
    let assembly = assemble_sources(&batch()).unwrap();
    let first = generate_drawio(&assembly.model).unwrap();
    let second = generate_drawio(&assembly.model).unwrap();
    assert_eq!(first, second);
    assert!(first.contains(r#"source="class0" target="class1""#));
}

#[test]
fn test_generate_payload_is_idempotent() {
    let assembly = assemble_sources(&batch()).unwrap();
    assert_eq!(
        generate_payload(&assembly.model, true).unwrap(),
        generate_payload(&assembly.model, true).unwrap()
    );
}

#[test]
fn test_reassembly_is_stable() {
    let first = assemble_sources(&batch()).unwrap();
    let second = assemble_sources(&batch()).unwrap();
    assert_eq!(first.model, second.model);
}

#[test]
fn test_generate_with_custom_grid() {
    let assembly = assemble_sources(&batch()).unwrap();
    let config = LayoutConfig::new().with_columns(1);
    let json = generate(&assembly.model, OutputFormat::Json, &config, true).unwrap();
    let layout: DiagramLayout = serde_json::from_str(&json).unwrap();
    let xs: Vec<_> = layout.classes.iter().map(|b| b.x).collect();
    assert_eq!(xs, vec![100, 100, 100]);
}

#[test]
fn test_summary_output() {
    let assembly = assemble_sources(&batch()).unwrap();
    let text = generate(
        &assembly.model,
        OutputFormat::Summary,
        &LayoutConfig::default(),
        false,
    )
    .unwrap();
    assert_eq!(text, "A --[inheritance]--> B\nA --[association]--> C\n");
}

#[test]
fn test_name_only_pipeline() {
    let assembler = Assembler::with_config(AssemblerConfig::new(ExtractMode::NameOnly));
    let assembly = assembler
        .assemble(&[SourceFile::loaded(
            "Shape.java",
            "public abstract class Shape { protected double area; public abstract double area(); }",
        )])
        .unwrap();
    let shape = assembly.model.get_class("Shape").unwrap();
    assert_eq!(shape.attributes, vec!["double area"]);
    assert_eq!(shape.methods, vec!["area()"]);
}

#[test]
fn test_mixed_language_batch() {
    let files = vec![
        SourceFile::loaded("Repo.cs", "public class Repo : IRepo { }"),
        SourceFile::loaded("IRepo.cs", "public interface IRepo { }"),
        SourceFile::loaded("Service.java", "public class Service { private Repo repo; }"),
    ];
    let assembly = assemble_sources(&files).unwrap();
    assert_eq!(
        assembly.model.relationships(),
        &[
            Relationship::new("Repo", "IRepo", RelationshipKind::Implementation),
            Relationship::new("Service", "Repo", RelationshipKind::Association),
        ]
    );
}
