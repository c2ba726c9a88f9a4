//! Data types used throughout the f2c library.
//!
//! This module is organized by domain:
//! - [`figma`] - Figma document tree types as returned by the REST API
//! - [`tokens`] - Design tokens extracted from a document tree

pub mod figma;
pub mod tokens;

pub use figma::{FigmaColor, FigmaNode, FigmaPaint, FigmaRect, FigmaTypeStyle, LayoutMode};

pub use tokens::{
    ColorToken, ComponentKind, ComponentToken, LayoutDescriptor, LayoutProperties, Padding,
    SpacingToken, TextStyleToken, TokenCounts, TokenSet,
};
