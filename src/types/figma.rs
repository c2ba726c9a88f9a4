//! Figma design document types.
//!
//! These types mirror the subset of the Figma REST API node structure that
//! token extraction reads. Every attribute is optional or defaulted so a
//! node with missing or unexpected fields still deserializes.

use serde::{Deserialize, Serialize};

/// A node of the Figma document tree (DOCUMENT, CANVAS, FRAME, TEXT, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaNode {
    /// Unique node ID
    #[serde(default)]
    pub id: String,
    /// Node name in Figma
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Figma node type (FRAME, TEXT, RECTANGLE, etc.)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    /// Fill paints applied to this node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fills: Option<Vec<FigmaPaint>>,
    /// Typography properties (for TEXT nodes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<FigmaTypeStyle>,
    /// Text content (for TEXT nodes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
    /// Position and size in canvas space
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_bounding_box: Option<FigmaRect>,
    /// Auto-layout direction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_mode: Option<LayoutMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<f64>,
    /// Gap between auto-layout children
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_axis_align_items: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter_axis_align_items: Option<String>,
    /// Child nodes, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FigmaNode>,
}

impl FigmaNode {
    /// The node name, treating an empty string as no name.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn is_type(&self, kind: &str) -> bool {
        self.node_type.as_deref() == Some(kind)
    }
}

/// A Figma paint/fill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaPaint {
    /// Paint type (SOLID, GRADIENT_LINEAR, IMAGE, ...)
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Linear RGBA color (for solid fills)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<FigmaColor>,
}

impl FigmaPaint {
    pub fn is_solid(&self) -> bool {
        self.kind == "SOLID"
    }
}

/// A color with channels in the 0.0 - 1.0 range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FigmaColor {
    #[serde(default)]
    pub r: f64,
    #[serde(default)]
    pub g: f64,
    #[serde(default)]
    pub b: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FigmaRect {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

/// Text style block of a TEXT node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaTypeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height_px: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(
        default,
        alias = "textAlignHorizontal",
        skip_serializing_if = "Option::is_none"
    )]
    pub text_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_case: Option<String>,
}

/// Auto-layout mode declared on a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    None,
    Horizontal,
    Vertical,
    #[serde(other)]
    Other,
}

impl LayoutMode {
    /// Whether this mode switches auto-layout on.
    pub fn is_auto_layout(self) -> bool {
        matches!(self, LayoutMode::Horizontal | LayoutMode::Vertical)
    }
}
