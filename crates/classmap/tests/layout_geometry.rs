//! Diagram geometry

use classmap::prelude::*;

fn class_with(attrs: usize, methods: usize) -> ClassRecord {
    let mut class = ClassRecord::new(format!("C{}x{}", attrs, methods));
    for i in 0..attrs {
        class.add_attribute(format!("+int a{}", i));
    }
    for i in 0..methods {
        class.add_method(format!("+m{}()", i));
    }
    class
}

fn layout(model: &ClassModel) -> DiagramLayout {
    GridLayout::new().layout(model).unwrap()
}

#[test]
fn test_box_heights() {
    let model = ClassModel::from_parts(
        vec![
            class_with(0, 0),
            class_with(3, 0),
            class_with(0, 2),
            class_with(4, 5),
        ],
        vec![],
    );
    let heights: Vec<_> = layout(&model).classes.iter().map(|b| b.height).collect();
    assert_eq!(heights, vec![26, 104, 78, 268]);
}

#[test]
fn test_seven_classes_on_three_columns() {
    let classes = (0..7).map(|i| ClassRecord::new(format!("K{}", i))).collect();
    let result = layout(&ClassModel::from_parts(classes, vec![]));
    let positions: Vec<_> = result.classes.iter().map(|b| (b.x, b.y)).collect();
    assert_eq!(
        positions,
        vec![
            (100, 100),
            (400, 100),
            (700, 100),
            (100, 500),
            (400, 500),
            (700, 500),
            (100, 900),
        ]
    );
}

#[test]
fn test_rows_never_overlap_next_grid_row() {
    let classes = vec![class_with(6, 7), class_with(1, 1), class_with(0, 0), class_with(2, 2)];
    let result = layout(&ClassModel::from_parts(classes, vec![]));
    let first = &result.classes[0];
    let below = &result.classes[3];
    assert!(first.bottom() <= below.y);
}

#[test]
fn test_member_rows_follow_header_and_separator() {
    let result = layout(&ClassModel::from_parts(vec![class_with(2, 2)], vec![]));
    let b = &result.classes[0];
    let ys: Vec<_> = b.rows.iter().map(|r| r.y).collect();
    assert_eq!(ys, vec![26, 52, 86, 112]);
    assert_eq!(b.rows[0].text, "+ int a0");
    assert_eq!(b.rows.last().unwrap().y + 26, b.height);
}

#[test]
fn test_unmarked_members_render_private() {
    let class = ClassRecord::new("Legacy").with_attribute("String name").with_method("run()");
    let result = layout(&ClassModel::from_parts(vec![class], vec![]));
    let texts: Vec<_> = result.classes[0].rows.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["- String name", "- run()"]);
}

#[test]
fn test_edge_ids_follow_relationship_index() {
    let model = ClassModel::from_parts(
        vec![ClassRecord::new("A"), ClassRecord::new("B"), ClassRecord::new("C")],
        vec![
            Relationship::new("A", "B", RelationshipKind::Inheritance),
            Relationship::new("B", "C", RelationshipKind::Aggregation),
        ],
    );
    let result = layout(&model);
    let ids: Vec<_> = result.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["rel0", "rel1"]);
    assert_eq!(result.edges[1].source, "class1");
    assert_eq!(result.edges[1].target, "class2");
}

#[test]
fn test_vertical_edge_runs_bottom_to_top() {
    let classes = (0..4).map(|i| ClassRecord::new(format!("K{}", i))).collect();
    let model = ClassModel::from_parts(
        classes,
        vec![Relationship::new("K0", "K3", RelationshipKind::Association)],
    );
    let edge = &layout(&model).edges[0];
    assert_eq!((edge.from_point.x, edge.from_point.y), (220, 126));
    assert_eq!((edge.to_point.x, edge.to_point.y), (220, 500));
}

#[test]
fn test_total_size_covers_boxes() {
    let model = ClassModel::from_parts(vec![class_with(1, 1), class_with(0, 0)], vec![]);
    let result = layout(&model);
    for b in &result.classes {
        assert!(b.right() <= result.width);
        assert!(b.bottom() <= result.height);
    }
}
