//! Design token types produced by extraction.
//!
//! A [`TokenSet`] is a plain value: built once per extraction, then only
//! read. It serializes to the JSON shape embedded in generation prompts.

use serde::{Deserialize, Serialize};

use super::figma::LayoutMode;

/// Everything extracted from one design document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSet {
    /// Unique solid colors, first occurrence first
    pub colors: Vec<ColorToken>,
    /// Unique font families, first occurrence first
    pub fonts: Vec<String>,
    /// One entry per styled text node
    pub text_styles: Vec<TextStyleToken>,
    /// Sizes of named nodes
    pub spacing: Vec<SpacingToken>,
    /// Components and instances
    pub components: Vec<ComponentToken>,
    /// Last auto-layout declaration seen in document order
    pub layout: Option<LayoutDescriptor>,
}

impl TokenSet {
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
            && self.fonts.is_empty()
            && self.text_styles.is_empty()
            && self.spacing.is_empty()
            && self.components.is_empty()
            && self.layout.is_none()
    }

    pub fn summary(&self) -> TokenCounts {
        TokenCounts {
            colors: self.colors.len(),
            fonts: self.fonts.len(),
            text_styles: self.text_styles.len(),
            spacing: self.spacing.len(),
            components: self.components.len(),
            has_layout: self.layout.is_some(),
        }
    }
}

/// Sizes of each token container, for summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCounts {
    pub colors: usize,
    pub fonts: usize,
    pub text_styles: usize,
    pub spacing: usize,
    pub components: usize,
    pub has_layout: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorToken {
    /// `rgba(R, G, B, A)`
    pub rgba: String,
    /// `#rrggbb` or `#rrggbbaa`
    pub hex: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyleToken {
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub font_weight: u32,
    pub line_height: String,
    pub letter_spacing: String,
    pub text_align: String,
    pub text_case: String,
    pub text: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacingToken {
    pub name: String,
    pub width: String,
    pub height: String,
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentKind {
    Component,
    Instance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentToken {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDescriptor {
    #[serde(rename = "type")]
    pub mode: LayoutMode,
    pub properties: LayoutProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutProperties {
    /// Present only when at least one side is non-zero
    pub padding: Option<Padding>,
    pub item_spacing: Option<f64>,
    pub layout_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_axis_align_items: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter_axis_align_items: Option<String>,
    pub path: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Padding {
    pub fn is_zero(&self) -> bool {
        self.left == 0.0 && self.right == 0.0 && self.top == 0.0 && self.bottom == 0.0
    }
}
