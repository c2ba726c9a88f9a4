//! Conversion of Figma linear colors into CSS color strings.

use std::fmt::Write as _;

use palette::Srgb;

use crate::types::FigmaColor;

/// CSS strings for one solid color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssColor {
    pub rgba: String,
    pub hex: String,
}

/// Scales a 0.0 - 1.0 channel to a byte, rounding halves up.
pub fn channel_to_byte(value: f64) -> u8 {
    (value * 255.0 + 0.5).floor().clamp(0.0, 255.0) as u8
}

/// Formats a Figma color as `rgba(R, G, B, A)` and `#rrggbb[aa]`.
///
/// Alpha defaults to 1 and is appended to the hex form only when it is
/// below 1.
pub fn to_css_color(color: &FigmaColor) -> CssColor {
    let rgb: Srgb<u8> = Srgb::new(
        channel_to_byte(color.r),
        channel_to_byte(color.g),
        channel_to_byte(color.b),
    );
    let alpha = color.a.unwrap_or(1.0);

    let rgba = format!(
        "rgba({}, {}, {}, {})",
        rgb.red, rgb.green, rgb.blue, alpha
    );
    let mut hex = format!("#{:x}", rgb);
    if alpha < 1.0 {
        let _ = write!(hex, "{:02x}", channel_to_byte(alpha));
    }

    CssColor { rgba, hex }
}
