//! Plain-text relationship summary

use anyhow::Result;
use unicode_width::UnicodeWidthStr;

use crate::core::Renderer;
use crate::layout::DiagramLayout;

pub const NO_CLASSES: &str = "No classes recognized";
pub const NO_RELATIONSHIPS: &str = "No relationships found";

/// Lists every placed relationship as `From --[kind]--> To`
///
/// Source names are padded to a common display width so the arrows line
/// up, even for names with wide characters.
pub struct SummaryRenderer;

impl SummaryRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SummaryRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for SummaryRenderer {
    type Output = String;

    fn render(&self, layout: &DiagramLayout) -> Result<String> {
        if layout.classes.is_empty() {
            return Ok(format!("{}\n", NO_CLASSES));
        }
        if layout.edges.is_empty() {
            return Ok(format!("{}\n", NO_RELATIONSHIPS));
        }

        let column = layout
            .edges
            .iter()
            .map(|e| UnicodeWidthStr::width(e.from.as_str()))
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        for edge in &layout.edges {
            let pad = column - UnicodeWidthStr::width(edge.from.as_str());
            out.push_str(&format!(
                "{}{} --[{}]--> {}\n",
                edge.from,
                " ".repeat(pad),
                edge.kind,
                edge.to
            ));
        }
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "summary"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}
