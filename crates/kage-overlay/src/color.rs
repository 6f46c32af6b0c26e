//! CSS color resolution for overlay fills.
//!
//! Mask fill colors arrive as CSS color strings from the curation
//! view's theme. This module defines the [`ColorResolver`] trait for
//! pluggable resolution strategies and the [`ColorResolverKind`] enum
//! for selecting one at runtime.
//!
//! Resolution is total: hex forms, `rgb()`/`rgba()` functional forms,
//! and a static named-color table are recognized, and anything else
//! falls back to opaque black so the raster path never fails on a bad
//! color specification.

use serde::{Deserialize, Serialize};

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black, the background of rasterized masks.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Opaque black, the fallback for unresolvable color specs.
    pub const OPAQUE_BLACK: Self = Self::new(0, 0, 0, 255);

    /// Create a color from channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color.
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

/// Selects which color resolution strategy to use.
///
/// MVP ships with [`BuiltinTable`](Self::BuiltinTable) only. Additional
/// variants (e.g. a resolver backed by a real CSS engine) can be added
/// without changing the `OverlayConfig` struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorResolverKind {
    /// Pure string parsing plus a static named-color table.
    #[default]
    BuiltinTable,
}

/// Trait for color resolution strategies.
///
/// Resolution is total: implementations map every input to some color,
/// falling back to [`Rgba::OPAQUE_BLACK`] rather than failing, so the
/// visual path stays panic- and error-free.
pub trait ColorResolver {
    /// Resolve a CSS color specification to RGBA channels.
    fn resolve(&self, spec: &str) -> Rgba;
}

impl ColorResolver for ColorResolverKind {
    fn resolve(&self, spec: &str) -> Rgba {
        match *self {
            Self::BuiltinTable => resolve_builtin(spec),
        }
    }
}

/// Builtin resolver: hex forms, then functional forms, then the named
/// color table, then the opaque-black fallback.
fn resolve_builtin(spec: &str) -> Rgba {
    let spec = spec.trim();
    if let Some(hex) = spec.strip_prefix('#') {
        return parse_hex(hex).unwrap_or(Rgba::OPAQUE_BLACK);
    }

    let lower = spec.to_ascii_lowercase();
    if let Some(args) = lower.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
        return parse_rgb_args(args, true).unwrap_or(Rgba::OPAQUE_BLACK);
    }
    if let Some(args) = lower.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
        return parse_rgb_args(args, false).unwrap_or(Rgba::OPAQUE_BLACK);
    }

    named_color(&lower).unwrap_or(Rgba::OPAQUE_BLACK)
}

/// Parse the digits of a hex color (`rgb`, `rgba`, `rrggbb`, or
/// `rrggbbaa`, without the leading `#`). Missing alpha means opaque.
fn parse_hex(hex: &str) -> Option<Rgba> {
    match hex.len() {
        3 | 4 => {
            let mut channels = [0, 0, 0, 255];
            for (i, ch) in hex.chars().enumerate() {
                let n = ch.to_digit(16)?;
                // Short-form digits expand by repetition: 0xf → 0xff.
                #[expect(clippy::cast_possible_truncation)]
                {
                    channels[i] = (n * 17) as u8;
                }
            }
            Some(Rgba::new(channels[0], channels[1], channels[2], channels[3]))
        }
        6 | 8 => {
            let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
            let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
            let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
            let a = match hex.get(6..8) {
                Some(alpha) => u8::from_str_radix(alpha, 16).ok()?,
                None => 255,
            };
            Some(Rgba::new(r, g, b, a))
        }
        _ => None,
    }
}

/// Parse the comma-separated arguments of `rgb()` / `rgba()`.
fn parse_rgb_args(args: &str, with_alpha: bool) -> Option<Rgba> {
    let mut parts = args.split(',').map(str::trim);
    let r = parse_channel(parts.next()?)?;
    let g = parse_channel(parts.next()?)?;
    let b = parse_channel(parts.next()?)?;
    let a = if with_alpha {
        parse_alpha(parts.next()?)?
    } else {
        255
    };
    if parts.next().is_some() {
        return None;
    }
    Some(Rgba::new(r, g, b, a))
}

/// Parse one integer channel, clamping to 0–255 as browsers do.
fn parse_channel(part: &str) -> Option<u8> {
    let value: i64 = part.parse().ok()?;
    u8::try_from(value.clamp(0, 255)).ok()
}

/// Parse a 0.0–1.0 alpha value, scaling to 0–255 by rounding.
fn parse_alpha(part: &str) -> Option<u8> {
    let value: f64 = part.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scaled = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    Some(scaled)
}

/// Static named-color table: the CSS Level 1 keywords plus the handful
/// of extended names overlay themes use. Deliberately partial; misses
/// resolve to the opaque-black fallback, not an error.
fn named_color(name: &str) -> Option<Rgba> {
    let color = match name {
        "black" => Rgba::opaque(0, 0, 0),
        "silver" => Rgba::opaque(192, 192, 192),
        "gray" | "grey" => Rgba::opaque(128, 128, 128),
        "white" => Rgba::opaque(255, 255, 255),
        "maroon" => Rgba::opaque(128, 0, 0),
        "red" => Rgba::opaque(255, 0, 0),
        "purple" => Rgba::opaque(128, 0, 128),
        "fuchsia" | "magenta" => Rgba::opaque(255, 0, 255),
        "green" => Rgba::opaque(0, 128, 0),
        "lime" => Rgba::opaque(0, 255, 0),
        "olive" => Rgba::opaque(128, 128, 0),
        "yellow" => Rgba::opaque(255, 255, 0),
        "navy" => Rgba::opaque(0, 0, 128),
        "blue" => Rgba::opaque(0, 0, 255),
        "teal" => Rgba::opaque(0, 128, 128),
        "aqua" | "cyan" => Rgba::opaque(0, 255, 255),
        "orange" => Rgba::opaque(255, 165, 0),
        "transparent" => Rgba::TRANSPARENT,
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Shorthand for resolving through the builtin table.
    fn resolve(spec: &str) -> Rgba {
        ColorResolverKind::BuiltinTable.resolve(spec)
    }

    // --- named color tests ---

    #[test]
    fn named_red_is_opaque_red() {
        assert_eq!(resolve("red"), Rgba::opaque(255, 0, 0));
    }

    #[test]
    fn named_colors_are_case_insensitive() {
        assert_eq!(resolve("RED"), Rgba::opaque(255, 0, 0));
        assert_eq!(resolve(" Orange "), Rgba::opaque(255, 165, 0));
    }

    #[test]
    fn transparent_keyword_has_zero_alpha() {
        assert_eq!(resolve("transparent"), Rgba::TRANSPARENT);
    }

    // --- hex tests ---

    #[test]
    fn six_digit_hex() {
        assert_eq!(resolve("#1a2b3c"), Rgba::opaque(0x1a, 0x2b, 0x3c));
    }

    #[test]
    fn three_digit_hex_expands_by_repetition() {
        assert_eq!(resolve("#f80"), Rgba::opaque(255, 136, 0));
        assert_eq!(resolve("#fff"), Rgba::opaque(255, 255, 255));
    }

    #[test]
    fn hex_with_alpha_digits() {
        assert_eq!(resolve("#f008"), Rgba::new(255, 0, 0, 136));
        assert_eq!(resolve("#ff000080"), Rgba::new(255, 0, 0, 0x80));
    }

    #[test]
    fn hex_is_whitespace_tolerant() {
        assert_eq!(resolve(" #fff "), Rgba::opaque(255, 255, 255));
    }

    // --- functional form tests ---

    #[test]
    fn rgb_functional_form() {
        assert_eq!(resolve("rgb(12, 34, 56)"), Rgba::opaque(12, 34, 56));
        assert_eq!(resolve("RGB(1,2,3)"), Rgba::opaque(1, 2, 3));
    }

    #[test]
    fn rgba_alpha_scales_by_rounding() {
        // 0.5 * 255 = 127.5 rounds away from zero to 128.
        assert_eq!(resolve("rgba(255, 0, 0, 0.5)"), Rgba::new(255, 0, 0, 128));
        assert_eq!(resolve("rgba(0, 0, 0, 1)"), Rgba::new(0, 0, 0, 255));
        assert_eq!(resolve("rgba(0, 0, 0, 0)"), Rgba::new(0, 0, 0, 0));
    }

    #[test]
    fn rgba_alpha_clamps_out_of_range() {
        assert_eq!(resolve("rgba(10, 20, 30, 1.5)"), Rgba::new(10, 20, 30, 255));
        assert_eq!(resolve("rgba(10, 20, 30, -0.2)"), Rgba::new(10, 20, 30, 0));
    }

    #[test]
    fn channels_clamp_out_of_range() {
        assert_eq!(resolve("rgb(300, -20, 0)"), Rgba::opaque(255, 0, 0));
    }

    // --- fallback tests ---

    #[test]
    fn unresolvable_specs_fall_back_to_opaque_black() {
        for spec in [
            "",
            "not-a-color",
            "#12",
            "#12345",
            "rgb(1, 2)",
            "rgb(1, 2, 3, 4, 5)",
            "rgba(1, 2, 3, banana)",
            "hsl(120, 50%, 50%)",
            "rebeccapurple",
        ] {
            assert_eq!(resolve(spec), Rgba::OPAQUE_BLACK, "spec {spec:?}");
        }
    }

    #[test]
    fn malformed_utf8_boundaries_do_not_panic() {
        // Multi-byte characters land on non-ASCII slice boundaries.
        assert_eq!(resolve("#ééé"), Rgba::OPAQUE_BLACK);
        assert_eq!(resolve("rgb(é, 2, 3)"), Rgba::OPAQUE_BLACK);
    }

    // --- strategy selection tests ---

    #[test]
    fn default_kind_is_builtin_table() {
        assert_eq!(ColorResolverKind::default(), ColorResolverKind::BuiltinTable);
    }
}
