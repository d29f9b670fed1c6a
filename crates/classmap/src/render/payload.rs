//! JSON layout payload renderer

use anyhow::Result;

use crate::core::{ClassmapError, Renderer};
use crate::layout::DiagramLayout;

/// Serializes the computed geometry for external visual surfaces
pub struct PayloadRenderer {
    pretty: bool,
}

impl PayloadRenderer {
    /// Pretty-printed output
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Single-line output
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for PayloadRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PayloadRenderer {
    type Output = String;

    fn render(&self, layout: &DiagramLayout) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(layout)
        } else {
            serde_json::to_string(layout)
        }
        .map_err(|e| ClassmapError::render_error(e.to_string()))?;
        Ok(json)
    }

    fn name(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LayoutAlgorithm, RelationshipKind};
    use crate::layout::GridLayout;
    use crate::model::{ClassModel, ClassRecord, Relationship};

    fn layout() -> DiagramLayout {
        let model = ClassModel::from_parts(
            vec![ClassRecord::new("Dog").with_method("+bark()"), ClassRecord::new("Animal")],
            vec![Relationship::new("Dog", "Animal", RelationshipKind::Inheritance)],
        );
        GridLayout::new().layout(&model).unwrap()
    }

    #[test]
    fn test_payload_shape() {
        let json = PayloadRenderer::new().render(&layout()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["classes"][0]["name"], "Dog");
        assert_eq!(value["classes"][0]["rows"][0]["text"], "+ bark()");
        assert_eq!(value["classes"][0]["rows"][0]["kind"], "method");
        assert_eq!(value["edges"][0]["kind"], "inheritance");
        assert_eq!(value["edges"][0]["arrow"], "triangle");
        assert_eq!(value["edges"][0]["source"], "class0");
    }

    #[test]
    fn test_compact_is_single_line() {
        let compact = PayloadRenderer::compact().render(&layout()).unwrap();
        assert!(!compact.contains('\n'));
        let pretty = PayloadRenderer::new().render(&layout()).unwrap();
        assert!(pretty.contains('\n'));

        let a: serde_json::Value = serde_json::from_str(&compact).unwrap();
        let b: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_payload_round_trips() {
        let original = layout();
        let json = PayloadRenderer::compact().render(&original).unwrap();
        let parsed: DiagramLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}
