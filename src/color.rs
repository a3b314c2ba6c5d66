//! Colour normalization.
//!
//! Colour pickers hand out `#RRGGBBAA` strings, which not every consumer
//! understands, so they are rewritten into an explicit `rgba(...)` value.
//! Everything else is assumed to already be a valid CSS colour.

use std::fmt;

use crate::error::{RenderError, RenderResult};

/// A colour ready for the drawing surface.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedColor {
	/// Decomposed `#RRGGBBAA`; alpha is rounded to two decimals.
	Rgba { r: u8, g: u8, b: u8, a: f32 },
	/// Passed through untouched.
	Css(String),
}

impl ResolvedColor {
	pub const BLACK: &'static str = "#000000";

	/// Convert into a tiny-skia colour.
	pub fn to_skia(&self) -> RenderResult<tiny_skia::Color> {
		match self {
			Self::Rgba { r, g, b, a } => {
				let mut color = tiny_skia::Color::from_rgba8(*r, *g, *b, 255);
				color.set_alpha(a.clamp(0.0, 1.0));
				Ok(color)
			}
			Self::Css(css) => parse_css_color(css).map_err(RenderError::Color),
		}
	}
}

impl fmt::Display for ResolvedColor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Rgba { r, g, b, a } => write!(f, "rgba({r}, {g}, {b}, {a:.2})"),
			Self::Css(css) => f.write_str(css),
		}
	}
}

/// Resolve a user-supplied colour string. Never fails: empty input is opaque black.
pub fn resolve_color(input: &str) -> ResolvedColor {
	if input.is_empty() {
		return ResolvedColor::Css(ResolvedColor::BLACK.to_owned());
	}
	match split_hex_rgba(input) {
		Some([r, g, b, alpha]) => ResolvedColor::Rgba {
			r,
			g,
			b,
			a: (alpha as f32 / 255.0 * 100.0).round() / 100.0,
		},
		None => ResolvedColor::Css(input.to_owned()),
	}
}

/// Parse any CSS colour string into a tiny-skia colour.
pub fn parse_css_color(css: &str) -> Result<tiny_skia::Color, String> {
	let parsed = csscolorparser::parse(css).map_err(|e| format!("{css}: {e}"))?;
	let [r, g, b, a] = parsed.to_array();
	tiny_skia::Color::from_rgba(r, g, b, a).ok_or_else(|| format!("{css}: components out of range"))
}

fn split_hex_rgba(input: &str) -> Option<[u8; 4]> {
	let hex = input.strip_prefix('#')?;
	if hex.len() != 8 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
		return None;
	}
	let mut channels = [0u8; 4];
	for (i, channel) in channels.iter_mut().enumerate() {
		*channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
	}
	Some(channels)
}
