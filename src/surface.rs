//! The drawing capabilities the composers depend on.
//!
//! Layout code only ever talks to [`RenderTarget`] (and its measuring half,
//! [`TextMetrics`]), so wrapping and placement are computed against whatever
//! backend actually rasterizes the glyphs.

use std::fmt;

use crate::{assets::RasterImage, color::ResolvedColor, error::RenderResult};

/// A concrete font selection: family, numeric weight, pixel size.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
	pub family: String,
	pub weight: u16,
	pub size_px: f32,
}

impl FontSpec {
	pub fn new(family: impl Into<String>, weight: u16, size_px: f32) -> Self {
		Self {
			family: family.into(),
			weight,
			size_px,
		}
	}
}

impl Default for FontSpec {
	fn default() -> Self {
		Self::new("sans-serif", 400, 10.0)
	}
}

impl fmt::Display for FontSpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}px '{}'", self.weight, self.size_px, self.family)
	}
}

/// Horizontal anchor of `fill_text` relative to its x coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
	#[default]
	Left,
	Center,
	Right,
}

/// Vertical anchor of `fill_text` relative to its y coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
	#[default]
	Alphabetic,
	Top,
	Middle,
	Bottom,
}

/// Axis-aligned rectangle in canvas pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	pub x: f32,
	pub y: f32,
	pub width: f32,
	pub height: f32,
}

impl Rect {
	pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
		Self { x, y, width, height }
	}
}

/// Two-stop linear gradient between `(x0, y0)` and `(x1, y1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
	pub x0: f32,
	pub y0: f32,
	pub x1: f32,
	pub y1: f32,
	pub stops: Vec<(f32, ResolvedColor)>,
}

impl LinearGradient {
	pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
		Self { x0, y0, x1, y1, stops: Vec::new() }
	}

	pub fn add_color_stop(&mut self, offset: f32, color: ResolvedColor) {
		self.stops.push((offset, color));
		self.stops.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum Fill {
	Color(ResolvedColor),
	Linear(LinearGradient),
}

impl Default for Fill {
	fn default() -> Self {
		Fill::Color(ResolvedColor::Css(ResolvedColor::BLACK.to_owned()))
	}
}

/// Width measurement with the current font.
pub trait TextMetrics {
	fn set_font(&mut self, font: &FontSpec);

	/// Rendered advance width of `text` in pixels.
	fn measure_text(&mut self, text: &str) -> RenderResult<f32>;
}

/// A raster surface with a canvas-style drawing cursor.
pub trait RenderTarget: TextMetrics {
	fn width(&self) -> u32;
	fn height(&self) -> u32;

	/// Wipe all pixels and reset the drawing state.
	fn clear(&mut self);

	fn set_fill(&mut self, fill: Fill);
	fn fill(&self) -> &Fill;
	fn set_global_alpha(&mut self, alpha: f32);
	fn global_alpha(&self) -> f32;
	fn set_text_align(&mut self, align: TextAlign);
	fn set_text_baseline(&mut self, baseline: TextBaseline);

	fn fill_rect(&mut self, rect: Rect) -> RenderResult<()>;
	fn fill_text(&mut self, text: &str, x: f32, y: f32) -> RenderResult<()>;

	/// Draw the `src` region of `image` stretched over `dst`.
	fn draw_image(&mut self, image: &RasterImage, src: Rect, dst: Rect);

	fn save(&mut self);
	fn restore(&mut self);

	/// Intersect the clip region with a circle.
	fn clip_circle(&mut self, cx: f32, cy: f32, radius: f32);
}
