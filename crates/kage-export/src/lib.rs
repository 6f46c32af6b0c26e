//! kage-export: Pure format serializers (sans-IO)
//!
//! Converts rasterized mask overlays into output formats. Currently
//! supports PNG. Future formats: WebP, SVG.

pub mod png;

pub use png::{ExportError, to_png};
