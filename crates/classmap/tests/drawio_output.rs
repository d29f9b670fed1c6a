//! draw.io document structure

use classmap::prelude::*;
use classmap::render::escape_xml;

fn sample_model() -> ClassModel {
    ClassModel::from_parts(
        vec![
            ClassRecord::new("Animal")
                .with_attribute("#String name")
                .with_method("+speak()"),
            ClassRecord::new("Dog").with_method("+fetch(Ball<Red> ball)"),
            ClassRecord::new("Ball"),
        ],
        vec![
            Relationship::new("Dog", "Animal", RelationshipKind::Inheritance),
            Relationship::new("Dog", "Ball", RelationshipKind::Aggregation),
        ],
    )
}

fn render(model: &ClassModel) -> String {
    let layout = GridLayout::new().layout(model).unwrap();
    DrawioRenderer::new().render(&layout).unwrap()
}

#[test]
fn test_document_envelope() {
    let xml = render(&sample_model());
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains(r#"<diagram name="Page-1" id="class-diagram">"#));
    // three columns reach x = 940, wider than the default page
    assert!(xml.contains(r#"pageWidth="1040" pageHeight="1100""#));
    assert_eq!(xml.matches("<mxfile").count(), 1);
    assert_eq!(xml.matches("</mxfile>").count(), 1);
}

#[test]
fn test_cell_ids() {
    let xml = render(&sample_model());
    for id in [
        "class0",
        "class0_attr0",
        "class0_separator",
        "class0_method0",
        "class1",
        "class1_method0",
        "class2",
        "rel0",
        "rel1",
    ] {
        assert!(xml.contains(&format!(r#"id="{}""#, id)), "missing {}", id);
    }
    assert!(!xml.contains("class1_separator"));
}

#[test]
fn test_edges_reference_class_cells() {
    let xml = render(&sample_model());
    assert!(xml.contains(r#"edge="1" parent="1" source="class1" target="class0""#));
    assert!(xml.contains(r#"edge="1" parent="1" source="class1" target="class2""#));
    assert!(xml.contains("startArrow=diamondThin;startFill=0;"));
}

#[test]
fn test_values_are_escaped() {
    let xml = render(&sample_model());
    assert!(xml.contains(r#"value="+ fetch(Ball&lt;Red&gt; ball)""#));
    assert!(!xml.contains("Ball<Red>"));
}

#[test]
fn test_edge_styles_differ_per_kind() {
    let styles: Vec<_> = [
        RelationshipKind::Inheritance,
        RelationshipKind::Implementation,
        RelationshipKind::Association,
        RelationshipKind::Composition,
        RelationshipKind::Aggregation,
    ]
    .into_iter()
    .map(classmap::render::edge_style)
    .collect();
    for (i, a) in styles.iter().enumerate() {
        for b in &styles[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_identical_models_render_identically() {
    assert_eq!(render(&sample_model()), render(&sample_model()));
}

#[test]
fn test_escape_helper() {
    assert_eq!(escape_xml("a & b"), "a &amp; b");
}

#[test]
fn test_large_layout_grows_page() {
    let classes = (0..12).map(|i| ClassRecord::new(format!("K{}", i))).collect();
    let xml = render(&ClassModel::from_parts(classes, vec![]));
    // four grid rows reach y = 1300
    assert!(xml.contains(r#"pageHeight="1426""#));
}
