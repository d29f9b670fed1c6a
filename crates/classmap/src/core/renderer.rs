//! Renderer trait for diagram output

use anyhow::Result;

use crate::layout::DiagramLayout;

/// Turns computed geometry into a concrete output format
///
/// # Example
/// ```
/// use classmap::core::{LayoutAlgorithm, Renderer};
/// use classmap::layout::GridLayout;
/// use classmap::model::ClassModel;
/// use classmap::render::DrawioRenderer;
///
/// let layout = GridLayout::new().layout(&ClassModel::new()).unwrap();
/// let xml = DrawioRenderer::new().render(&layout).unwrap();
/// assert!(xml.starts_with("<?xml"));
/// ```
pub trait Renderer: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render positioned classes and edges
    fn render(&self, layout: &DiagramLayout) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// File extension used when the output is saved
    fn extension(&self) -> &'static str;
}
