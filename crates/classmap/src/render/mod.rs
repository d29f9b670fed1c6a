//! Output renderers
//!
//! - [`DrawioRenderer`]: draw.io XML document
//! - [`PayloadRenderer`]: JSON geometry for external visual surfaces
//! - [`SummaryRenderer`]: one line per relationship

mod drawio;
mod payload;
mod summary;

pub use drawio::{edge_style, escape_xml, DrawioRenderer};
pub use payload::PayloadRenderer;
pub use summary::{SummaryRenderer, NO_CLASSES, NO_RELATIONSHIPS};

use std::fmt;
use std::str::FromStr;

use anyhow::Result;

use crate::core::{ClassmapError, Renderer};
use crate::layout::DiagramLayout;

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    #[default]
    Drawio,
    Json,
    Summary,
}

impl OutputFormat {
    pub fn variants() -> &'static [&'static str] {
        &["drawio", "json", "summary"]
    }

    pub fn description(&self) -> &'static str {
        match self {
            OutputFormat::Drawio => "draw.io diagram document (XML)",
            OutputFormat::Json => "layout payload with box and edge geometry (JSON)",
            OutputFormat::Summary => "relationship list (text)",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Drawio => "drawio",
            OutputFormat::Json => "json",
            OutputFormat::Summary => "txt",
        }
    }

    pub fn all() -> [OutputFormat; 3] {
        [OutputFormat::Drawio, OutputFormat::Json, OutputFormat::Summary]
    }

    /// Render `layout` in this format; `compact` only affects JSON
    pub fn render(&self, layout: &DiagramLayout, compact: bool) -> Result<String> {
        match self {
            OutputFormat::Drawio => DrawioRenderer::new().render(layout),
            OutputFormat::Json if compact => PayloadRenderer::compact().render(layout),
            OutputFormat::Json => PayloadRenderer::new().render(layout),
            OutputFormat::Summary => SummaryRenderer::new().render(layout),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Drawio => write!(f, "drawio"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Summary => write!(f, "summary"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ClassmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drawio" | "xml" => Ok(OutputFormat::Drawio),
            "json" | "payload" => Ok(OutputFormat::Json),
            "summary" | "text" | "txt" => Ok(OutputFormat::Summary),
            other => Err(ClassmapError::UnknownFormat {
                format: other.to_string(),
            }),
        }
    }
}
