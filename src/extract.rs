//! Design token extraction.
//!
//! Walks a Figma document tree once, depth-first in pre-order, and collects
//! colors, fonts, text styles, sizes, components and the last auto-layout
//! declaration into a [`TokenSet`]. Visitation order matters: colors and
//! fonts keep their first occurrence, the layout slot keeps the last one.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::color::to_css_color;
use crate::types::{
    ColorToken, ComponentKind, ComponentToken, FigmaNode, LayoutDescriptor, LayoutProperties,
    Padding, SpacingToken, TextStyleToken, TokenSet,
};

/// Separator between ancestor names in token paths.
pub const PATH_SEPARATOR: &str = " > ";

/// Extracts a [`TokenSet`] from a document tree.
///
/// Never fails: missing optional attributes fall back to defaults.
pub fn extract_tokens(document: &FigmaNode) -> TokenSet {
    let mut extractor = TokenExtractor::default();
    extractor.visit(document, "");
    let tokens = extractor.tokens;
    let counts = tokens.summary();
    info!(
        colors = counts.colors,
        fonts = counts.fonts,
        text_styles = counts.text_styles,
        spacing = counts.spacing,
        components = counts.components,
        has_layout = counts.has_layout,
        "extracted design tokens"
    );
    tokens
}

#[derive(Debug, Default)]
struct TokenExtractor {
    tokens: TokenSet,
    seen_colors: HashSet<String>,
    seen_fonts: HashSet<String>,
}

impl TokenExtractor {
    fn visit(&mut self, node: &FigmaNode, parent_path: &str) {
        let path = match node.display_name() {
            Some(name) => join_path(parent_path, name),
            None => parent_path.to_string(),
        };

        self.collect_colors(node, &path);
        self.collect_text_style(node, &path);
        self.collect_spacing(node, &path);
        self.collect_layout(node, &path);
        self.collect_component(node, &path);

        for child in &node.children {
            self.visit(child, &path);
        }
    }

    fn collect_colors(&mut self, node: &FigmaNode, path: &str) {
        let Some(fills) = &node.fills else {
            return;
        };
        for fill in fills.iter().filter(|fill| fill.is_solid()) {
            let Some(color) = &fill.color else {
                continue;
            };
            let css = to_css_color(color);
            if self.seen_colors.insert(css.rgba.clone()) {
                self.tokens.colors.push(ColorToken {
                    rgba: css.rgba,
                    hex: css.hex,
                    path: path.to_string(),
                });
            }
        }
    }

    fn collect_text_style(&mut self, node: &FigmaNode, path: &str) {
        if !node.is_type("TEXT") {
            return;
        }
        let Some(style) = &node.style else {
            return;
        };

        self.tokens.text_styles.push(TextStyleToken {
            font_family: style.font_family.clone(),
            font_size: style.font_size.map(px),
            font_weight: style
                .font_weight
                .filter(|weight| *weight != 0.0)
                .map(|weight| weight.round() as u32)
                .unwrap_or(400),
            line_height: px_or_normal(style.line_height_px),
            letter_spacing: px_or_normal(style.letter_spacing),
            text_align: non_empty_or(style.text_align.as_deref(), "left"),
            text_case: non_empty_or(style.text_case.as_deref(), "normal"),
            text: node.characters.clone().unwrap_or_default(),
            path: path.to_string(),
        });

        if let Some(family) = style.font_family.as_deref().filter(|f| !f.is_empty()) {
            if self.seen_fonts.insert(family.to_string()) {
                self.tokens.fonts.push(family.to_string());
            }
        }
    }

    fn collect_spacing(&mut self, node: &FigmaNode, path: &str) {
        let Some(bbox) = &node.absolute_bounding_box else {
            return;
        };
        let (Some(width), Some(height)) = (bbox.width, bbox.height) else {
            return;
        };
        let Some(name) = node.display_name() else {
            return;
        };
        if width == 0.0 || height == 0.0 {
            return;
        }

        self.tokens.spacing.push(SpacingToken {
            name: name.to_string(),
            width: format!("{}px", round_half_up(width)),
            height: format!("{}px", round_half_up(height)),
            path: path.to_string(),
        });
    }

    fn collect_layout(&mut self, node: &FigmaNode, path: &str) {
        let Some(mode) = node.layout_mode.filter(|mode| mode.is_auto_layout()) else {
            return;
        };

        let padding = Padding {
            left: node.padding_left.unwrap_or(0.0),
            right: node.padding_right.unwrap_or(0.0),
            top: node.padding_top.unwrap_or(0.0),
            bottom: node.padding_bottom.unwrap_or(0.0),
        };

        if self.tokens.layout.is_some() {
            debug!(path, "auto-layout declaration replaces an earlier one");
        }
        self.tokens.layout = Some(LayoutDescriptor {
            mode,
            properties: LayoutProperties {
                padding: (!padding.is_zero()).then_some(padding),
                item_spacing: node.item_spacing,
                layout_align: node.layout_align.clone(),
                primary_axis_align_items: node.primary_axis_align_items.clone(),
                counter_axis_align_items: node.counter_axis_align_items.clone(),
                path: path.to_string(),
            },
        });
    }

    fn collect_component(&mut self, node: &FigmaNode, path: &str) {
        let kind = if node.is_type("COMPONENT") {
            ComponentKind::Component
        } else if node.is_type("INSTANCE") {
            ComponentKind::Instance
        } else {
            return;
        };

        self.tokens.components.push(ComponentToken {
            name: node.name.clone().unwrap_or_default(),
            kind,
            path: path.to_string(),
        });
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}{PATH_SEPARATOR}{name}")
    }
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn px(value: f64) -> String {
    format!("{value}px")
}

fn px_or_normal(value: Option<f64>) -> String {
    value
        .filter(|v| *v != 0.0)
        .map(px)
        .unwrap_or_else(|| "normal".to_string())
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}
