//! draw.io (`mxfile`) renderer
//!
//! Emits an uncompressed diagram document that the draw.io editor opens
//! directly. Each class is a swimlane whose member rows are child cells;
//! child geometry is relative to the swimlane.

use std::borrow::Cow;
use std::fmt::Write;

use anyhow::Result;

use crate::core::{RelationshipKind, Renderer};
use crate::layout::{ClassBox, DiagramLayout, EdgeGeometry};

const CLASS_STYLE: &str = "swimlane;fontStyle=1;align=center;verticalAlign=top;childLayout=stackLayout;horizontal=1;startSize=26;horizontalStack=0;resizeParent=1;resizeParentMax=0;resizeLast=0;collapsible=1;marginBottom=0;";
const MEMBER_STYLE: &str = "text;strokeColor=none;fillColor=none;align=left;verticalAlign=top;spacingLeft=4;spacingRight=4;overflow=hidden;rotatable=0;points=[[0,0.5],[1,0.5]];portConstraint=eastwest;";
const SEPARATOR_STYLE: &str = "line;strokeWidth=1;fillColor=none;align=left;verticalAlign=middle;spacingTop=-1;spacingLeft=3;spacingRight=3;rotatable=0;labelPosition=right;points=[];portConstraint=eastwest;strokeColor=inherit;";

const PAGE_WIDTH: usize = 850;
const PAGE_HEIGHT: usize = 1100;

/// Edge style for a relationship kind
pub fn edge_style(kind: RelationshipKind) -> &'static str {
    match kind {
        RelationshipKind::Inheritance => "endArrow=block;endFill=0;endSize=12;html=1;rounded=0;",
        RelationshipKind::Implementation => {
            "endArrow=block;endFill=0;endSize=12;dashed=1;html=1;rounded=0;"
        }
        RelationshipKind::Association => "endArrow=open;endFill=0;endSize=12;html=1;rounded=0;",
        RelationshipKind::Composition => {
            "startArrow=diamondThin;startFill=1;startSize=14;endArrow=none;html=1;rounded=0;"
        }
        RelationshipKind::Aggregation => {
            "startArrow=diamondThin;startFill=0;startSize=14;endArrow=none;html=1;rounded=0;"
        }
    }
}

/// Escape text for use in an XML attribute value
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'', '\n', '\r', '\t']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Renderer producing a draw.io XML document
pub struct DrawioRenderer;

impl DrawioRenderer {
    pub fn new() -> Self {
        Self
    }

    fn write_class(out: &mut String, class: &ClassBox) -> Result<()> {
        writeln!(
            out,
            r#"        <mxCell id="{}" value="{}" style="{}" vertex="1" parent="1">"#,
            escape_xml(&class.id),
            escape_xml(&class.name),
            CLASS_STYLE
        )?;
        writeln!(
            out,
            r#"          <mxGeometry x="{}" y="{}" width="{}" height="{}" as="geometry"/>"#,
            class.x, class.y, class.width, class.height
        )?;
        writeln!(out, "        </mxCell>")?;

        for row in class.attributes() {
            Self::write_child(out, &row.id, &row.text, MEMBER_STYLE, class, row.y, row.height)?;
        }
        if let Some(sep) = &class.separator {
            Self::write_child(out, &sep.id, "", SEPARATOR_STYLE, class, sep.y, sep.height)?;
        }
        for row in class.methods() {
            Self::write_child(out, &row.id, &row.text, MEMBER_STYLE, class, row.y, row.height)?;
        }
        Ok(())
    }

    fn write_child(
        out: &mut String,
        id: &str,
        value: &str,
        style: &str,
        parent: &ClassBox,
        y: usize,
        height: usize,
    ) -> Result<()> {
        writeln!(
            out,
            r#"        <mxCell id="{}" value="{}" style="{}" vertex="1" parent="{}">"#,
            escape_xml(id),
            escape_xml(value),
            style,
            escape_xml(&parent.id)
        )?;
        writeln!(
            out,
            r#"          <mxGeometry y="{}" width="{}" height="{}" as="geometry"/>"#,
            y, parent.width, height
        )?;
        writeln!(out, "        </mxCell>")?;
        Ok(())
    }

    fn write_edge(out: &mut String, edge: &EdgeGeometry) -> Result<()> {
        writeln!(
            out,
            r#"        <mxCell id="{}" value="" style="{}" edge="1" parent="1" source="{}" target="{}">"#,
            escape_xml(&edge.id),
            edge_style(edge.kind),
            escape_xml(&edge.source),
            escape_xml(&edge.target)
        )?;
        writeln!(out, r#"          <mxGeometry width="160" relative="1" as="geometry">"#)?;
        writeln!(
            out,
            r#"            <mxPoint x="{}" y="{}" as="sourcePoint"/>"#,
            edge.from_point.x, edge.from_point.y
        )?;
        writeln!(
            out,
            r#"            <mxPoint x="{}" y="{}" as="targetPoint"/>"#,
            edge.to_point.x, edge.to_point.y
        )?;
        writeln!(out, "          </mxGeometry>")?;
        writeln!(out, "        </mxCell>")?;
        Ok(())
    }
}

impl Default for DrawioRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for DrawioRenderer {
    type Output = String;

    fn render(&self, layout: &DiagramLayout) -> Result<String> {
        let mut out = String::new();
        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(out, r#"<mxfile host="classmap" version="{}">"#, env!("CARGO_PKG_VERSION"))?;
        writeln!(out, r#"  <diagram name="Page-1" id="class-diagram">"#)?;
        writeln!(
            out,
            r#"    <mxGraphModel dx="1422" dy="798" grid="1" gridSize="10" guides="1" tooltips="1" connect="1" arrows="1" fold="1" page="1" pageScale="1" pageWidth="{}" pageHeight="{}" math="0" shadow="0">"#,
            layout.width.max(PAGE_WIDTH),
            layout.height.max(PAGE_HEIGHT)
        )?;
        writeln!(out, "      <root>")?;
        writeln!(out, r#"        <mxCell id="0"/>"#)?;
        writeln!(out, r#"        <mxCell id="1" parent="0"/>"#)?;

        for class in &layout.classes {
            Self::write_class(&mut out, class)?;
        }
        for edge in &layout.edges {
            Self::write_edge(&mut out, edge)?;
        }

        writeln!(out, "      </root>")?;
        writeln!(out, "    </mxGraphModel>")?;
        writeln!(out, "  </diagram>")?;
        writeln!(out, "</mxfile>")?;
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "drawio"
    }

    fn extension(&self) -> &'static str {
        "drawio"
    }
}
