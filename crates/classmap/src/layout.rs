//! Grid layout for class diagrams
//!
//! Places one box per class on a fixed grid, in model order, and routes
//! one straight edge per relationship between box sides.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, span, trace, Level};

use crate::core::{LayoutAlgorithm, LayoutConfig, RelationshipKind, Visibility};
use crate::model::{ClassModel, ClassRecord};

/// A point in diagram coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Attribute,
    Method,
}

/// One member line inside a class box
///
/// `y` is relative to the top of the box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRow {
    pub id: String,
    pub kind: RowKind,
    pub visibility: Visibility,
    /// Normalized glyph followed by the bare signature
    pub text: String,
    pub y: usize,
    pub height: usize,
}

/// Divider between the attribute and method sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Separator {
    pub id: String,
    pub y: usize,
    pub height: usize,
}

/// A positioned class box
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassBox {
    pub id: String,
    pub name: String,
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub header_height: usize,
    pub rows: Vec<MemberRow>,
    /// Present only when the box has both attributes and methods
    pub separator: Option<Separator>,
}

impl ClassBox {
    pub fn center_x(&self) -> usize {
        self.x + self.width / 2
    }

    pub fn middle_y(&self) -> usize {
        self.y + self.height / 2
    }

    pub fn right(&self) -> usize {
        self.x + self.width
    }

    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    pub fn attributes(&self) -> impl Iterator<Item = &MemberRow> {
        self.rows.iter().filter(|r| r.kind == RowKind::Attribute)
    }

    pub fn methods(&self) -> impl Iterator<Item = &MemberRow> {
        self.rows.iter().filter(|r| r.kind == RowKind::Method)
    }
}

/// Arrow head hint for layout consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowHint {
    /// Hollow triangle (inheritance, implementation)
    Triangle,
    /// Plain line end
    Line,
}

impl From<RelationshipKind> for ArrowHint {
    fn from(kind: RelationshipKind) -> Self {
        if kind.is_inheritance_like() {
            ArrowHint::Triangle
        } else {
            ArrowHint::Line
        }
    }
}

/// A routed relationship between two placed boxes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeGeometry {
    pub id: String,
    /// Cell id of the source box
    pub source: String,
    /// Cell id of the target box
    pub target: String,
    pub from: String,
    pub to: String,
    pub kind: RelationshipKind,
    pub from_point: Point,
    pub to_point: Point,
    pub arrow: ArrowHint,
}

/// Complete diagram geometry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramLayout {
    pub classes: Vec<ClassBox>,
    pub edges: Vec<EdgeGeometry>,
    pub width: usize,
    pub height: usize,
}

fn member_row(id: String, kind: RowKind, signature: &str, y: usize, height: usize) -> MemberRow {
    let (visibility, _) = Visibility::split(signature);
    MemberRow {
        id,
        kind,
        visibility,
        text: Visibility::normalize(signature),
        y,
        height,
    }
}

/// Fixed-grid layout, `columns` boxes per row
pub struct GridLayout {
    config: LayoutConfig,
}

impl GridLayout {
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    fn place(&self, index: usize, class: &ClassRecord) -> ClassBox {
        let c = &self.config;
        let id = format!("class{}", index);
        let attr_count = class.attributes.len();
        let method_count = class.methods.len();

        let mut rows = Vec::with_capacity(attr_count + method_count);
        let mut offset = c.header_height;
        for (k, signature) in class.attributes.iter().enumerate() {
            let row_id = format!("{}_attr{}", id, k);
            rows.push(member_row(row_id, RowKind::Attribute, signature, offset, c.member_height));
            offset += c.member_height;
        }

        let separator = if attr_count > 0 && method_count > 0 {
            let separator = Separator {
                id: format!("{}_separator", id),
                y: offset,
                height: c.separator_height,
            };
            offset += c.separator_height;
            Some(separator)
        } else {
            None
        };

        for (k, signature) in class.methods.iter().enumerate() {
            let row_id = format!("{}_method{}", id, k);
            rows.push(member_row(row_id, RowKind::Method, signature, offset, c.member_height));
            offset += c.member_height;
        }

        ClassBox {
            id,
            name: class.name.clone(),
            x: c.margin + (index % c.columns) * c.column_width,
            y: c.margin + (index / c.columns) * c.row_height,
            width: c.box_width,
            height: c.box_height(attr_count, method_count),
            header_height: c.header_height,
            rows,
            separator,
        }
    }

    /// Endpoints for an edge from `from` to `to`
    fn route(from: &ClassBox, to: &ClassBox) -> (Point, Point) {
        if from.id == to.id {
            // Self edge: right side to top
            return (
                Point::new(from.right(), from.middle_y()),
                Point::new(from.center_x(), from.y),
            );
        }
        if from.y == to.y {
            // Same grid row: facing vertical sides
            if from.x < to.x {
                (
                    Point::new(from.right(), from.middle_y()),
                    Point::new(to.x, to.middle_y()),
                )
            } else {
                (
                    Point::new(from.x, from.middle_y()),
                    Point::new(to.right(), to.middle_y()),
                )
            }
        } else if from.y < to.y {
            (
                Point::new(from.center_x(), from.bottom()),
                Point::new(to.center_x(), to.y),
            )
        } else {
            (
                Point::new(from.center_x(), from.y),
                Point::new(to.center_x(), to.bottom()),
            )
        }
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutAlgorithm for GridLayout {
    type Output = DiagramLayout;

    fn layout(&self, model: &ClassModel) -> Result<DiagramLayout> {
        let layout_span = span!(
            Level::INFO,
            "grid_layout",
            classes = model.class_count(),
            relationships = model.relationship_count()
        );
        let _enter = layout_span.enter();

        self.config.validate()?;

        let classes: Vec<ClassBox> = model
            .classes()
            .iter()
            .enumerate()
            .map(|(i, class)| self.place(i, class))
            .collect();

        let mut edges = Vec::new();
        for (r, rel) in model.relationships().iter().enumerate() {
            let endpoints = model
                .class_index(&rel.from)
                .zip(model.class_index(&rel.to))
                .and_then(|(f, t)| classes.get(f).zip(classes.get(t)));
            let Some((from, to)) = endpoints else {
                debug!(from = %rel.from, to = %rel.to, "Skipping edge without placed endpoints");
                continue;
            };

            let (from_point, to_point) = Self::route(from, to);
            trace!(id = r, from = %rel.from, to = %rel.to, kind = %rel.kind, "Routed edge");
            edges.push(EdgeGeometry {
                id: format!("rel{}", r),
                source: from.id.clone(),
                target: to.id.clone(),
                from: rel.from.clone(),
                to: rel.to.clone(),
                kind: rel.kind,
                from_point,
                to_point,
                arrow: rel.kind.into(),
            });
        }

        let (width, height) = if classes.is_empty() {
            (0, 0)
        } else {
            let right = classes.iter().map(ClassBox::right).max().unwrap_or(0);
            let bottom = classes.iter().map(ClassBox::bottom).max().unwrap_or(0);
            (right + self.config.margin, bottom + self.config.margin)
        };

        debug!(boxes = classes.len(), edges = edges.len(), width, height, "Layout computed");
        Ok(DiagramLayout {
            classes,
            edges,
            width,
            height,
        })
    }

    fn name(&self) -> &'static str {
        "grid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Relationship;

    fn model(classes: Vec<ClassRecord>, rels: Vec<Relationship>) -> ClassModel {
        ClassModel::from_parts(classes, rels)
    }

    #[test]
    fn test_empty_layout() {
        let result = GridLayout::new().layout(&ClassModel::new()).unwrap();
        assert!(result.classes.is_empty());
        assert!(result.edges.is_empty());
        assert_eq!((result.width, result.height), (0, 0));
    }

    #[test]
    fn test_grid_positions() {
        let names = ["A", "B", "C", "D"];
        let m = model(names.iter().map(|n| ClassRecord::new(*n)).collect(), vec![]);
        let result = GridLayout::new().layout(&m).unwrap();

        let positions: Vec<_> = result.classes.iter().map(|b| (b.x, b.y)).collect();
        assert_eq!(positions, vec![(100, 100), (400, 100), (700, 100), (100, 500)]);
        assert_eq!(result.classes[3].id, "class3");
        assert_eq!(result.width, 700 + 240 + 100);
        assert_eq!(result.height, 500 + 26 + 100);
    }

    #[test]
    fn test_row_offsets() {
        let class = ClassRecord::new("Person")
            .with_attribute("-String name")
            .with_attribute("+int age")
            .with_method("#greet()");
        let result = GridLayout::new().layout(&model(vec![class], vec![])).unwrap();
        let b = &result.classes[0];

        assert_eq!(b.height, 26 + 3 * 26 + 8);
        let separator = b.separator.as_ref().unwrap();
        assert_eq!(separator.id, "class0_separator");
        assert_eq!((separator.y, separator.height), (26 + 2 * 26, 8));
        let rows: Vec<_> = b.rows.iter().map(|r| (r.id.as_str(), r.y, r.text.as_str())).collect();
        assert_eq!(
            rows,
            vec![
                ("class0_attr0", 26, "- String name"),
                ("class0_attr1", 52, "+ int age"),
                ("class0_method0", 86, "# greet()"),
            ]
        );
    }

    #[test]
    fn test_no_separator_without_both_sections() {
        let class = ClassRecord::new("Util").with_method("+run()");
        let result = GridLayout::new().layout(&model(vec![class], vec![])).unwrap();
        assert_eq!(result.classes[0].separator, None);
        assert_eq!(result.classes[0].rows[0].y, 26);
    }

    #[test]
    fn test_edge_routing() {
        let classes = vec![
            ClassRecord::new("A"),
            ClassRecord::new("B"),
            ClassRecord::new("C"),
            ClassRecord::new("D"),
        ];
        let rels = vec![
            Relationship::new("B", "A", RelationshipKind::Inheritance),
            Relationship::new("D", "A", RelationshipKind::Association),
            Relationship::new("A", "A", RelationshipKind::Association),
        ];
        let result = GridLayout::new().layout(&model(classes, rels)).unwrap();

        let same_row = &result.edges[0];
        assert_eq!(same_row.id, "rel0");
        assert_eq!((same_row.source.as_str(), same_row.target.as_str()), ("class1", "class0"));
        assert_eq!(same_row.from_point, Point::new(400, 113));
        assert_eq!(same_row.to_point, Point::new(340, 113));
        assert_eq!(same_row.arrow, ArrowHint::Triangle);

        let upward = &result.edges[1];
        assert_eq!(upward.from_point, Point::new(220, 500));
        assert_eq!(upward.to_point, Point::new(220, 126));
        assert_eq!(upward.arrow, ArrowHint::Line);

        let self_edge = &result.edges[2];
        assert_eq!(self_edge.from_point, Point::new(340, 113));
        assert_eq!(self_edge.to_point, Point::new(220, 100));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let layout = GridLayout::with_config(LayoutConfig::new().with_columns(0));
        assert!(layout.layout(&ClassModel::new()).is_err());
    }

    #[test]
    fn test_layout_is_deterministic() {
        let classes = vec![ClassRecord::new("A").with_attribute("+int x"), ClassRecord::new("B")];
        let rels = vec![Relationship::new("A", "B", RelationshipKind::Composition)];
        let m = model(classes, rels);
        let layout = GridLayout::new();
        assert_eq!(layout.layout(&m).unwrap(), layout.layout(&m).unwrap());
        assert_eq!(layout.name(), "grid");
    }
}
