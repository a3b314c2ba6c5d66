//! [`RenderTarget`] backed by tiny-skia, with cosmic-text for shaping.
//!
//! Glyphs are drawn as vector outlines so text and shapes share the same
//! anti-aliasing and clip handling.

use cosmic_text::{Attrs, Buffer, CacheKeyFlags, Command, Family, FontSystem, Metrics, Shaping, SwashCache, Weight};
use tiny_skia::{FillRule, FilterQuality, GradientStop, Mask, Paint, PathBuilder, Pixmap, PixmapPaint, Point, PremultipliedColorU8, Shader, SpreadMode, Transform};
use tracing::debug;

use crate::{
	assets::RasterImage,
	error::{RenderError, RenderResult},
	surface::{Fill, FontSpec, Rect, RenderTarget, TextAlign, TextBaseline, TextMetrics},
};

/// Largest edge tiny-skia is asked to allocate.
const MAX_DIMENSION: u32 = 16384;

/// Cursor state covered by `save`/`restore`.
#[derive(Clone, Debug)]
struct DrawingState {
	fill: Fill,
	font: FontSpec,
	text_align: TextAlign,
	text_baseline: TextBaseline,
	global_alpha: f32,
	clips: Vec<tiny_skia::Path>,
}

impl Default for DrawingState {
	fn default() -> Self {
		Self {
			fill: Fill::default(),
			font: FontSpec::default(),
			text_align: TextAlign::default(),
			text_baseline: TextBaseline::default(),
			global_alpha: 1.0,
			clips: Vec::new(),
		}
	}
}

/// An in-memory RGBA canvas.
pub struct Canvas {
	width: u32,
	height: u32,
	pixmap: Pixmap,
	font_system: FontSystem,
	swash_cache: SwashCache,
	state: DrawingState,
	state_stack: Vec<DrawingState>,
}

impl Canvas {
	pub fn new(width: u32, height: u32, fonts: fontdb::Database) -> RenderResult<Self> {
		if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
			return Err(RenderError::InvalidDimensions { width, height });
		}
		let pixmap = Pixmap::new(width, height).ok_or(RenderError::InvalidDimensions { width, height })?;
		let font_system = FontSystem::new_with_locale_and_db("en".to_string(), fonts);

		Ok(Self {
			width,
			height,
			pixmap,
			font_system,
			swash_cache: SwashCache::new(),
			state: DrawingState::default(),
			state_stack: Vec::new(),
		})
	}

	pub fn pixmap(&self) -> &Pixmap {
		&self.pixmap
	}

	pub fn pixel(&self, x: u32, y: u32) -> Option<PremultipliedColorU8> {
		self.pixmap.pixel(x, y)
	}

	pub fn to_png(&self) -> RenderResult<Vec<u8>> {
		self.pixmap.encode_png().map_err(|e| RenderError::Png(e.to_string()))
	}

	fn shape(&mut self, text: &str) -> RenderResult<Buffer> {
		let font = &self.state.font;
		if !font.size_px.is_finite() || font.size_px <= 0.0 {
			return Err(RenderError::Measure {
				font: font.to_string(),
				reason: "font size must be a positive number".into(),
			});
		}
		if !text.is_empty() && self.font_system.db().faces().next().is_none() {
			return Err(RenderError::Measure {
				font: font.to_string(),
				reason: "no font faces are loaded".into(),
			});
		}

		let metrics = Metrics::new(font.size_px, font.size_px * 1.2);
		let mut buffer = Buffer::new(&mut self.font_system, metrics);
		let family = match font.family.as_str() {
			"sans-serif" => Family::SansSerif,
			"serif" => Family::Serif,
			"monospace" => Family::Monospace,
			name => Family::Name(name),
		};
		let attrs = Attrs::new().family(family).weight(Weight(font.weight)).cache_key_flags(CacheKeyFlags::DISABLE_HINTING);
		buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
		buffer.shape_until_scroll(&mut self.font_system, false);
		Ok(buffer)
	}

	fn clip_mask(&self) -> Option<Mask> {
		let (first, rest) = self.state.clips.split_first()?;
		let mut mask = Mask::new(self.width, self.height)?;
		mask.fill_path(first, FillRule::Winding, true, Transform::identity());
		for path in rest {
			mask.intersect_path(path, FillRule::Winding, true, Transform::identity());
		}
		Some(mask)
	}

	fn fill_paint(&self) -> RenderResult<Paint<'static>> {
		let alpha = self.state.global_alpha;
		let with_alpha = |mut color: tiny_skia::Color| {
			color.set_alpha((color.alpha() * alpha).clamp(0.0, 1.0));
			color
		};

		let mut paint = Paint {
			anti_alias: true,
			..Default::default()
		};
		match &self.state.fill {
			Fill::Color(color) => paint.set_color(with_alpha(color.to_skia()?)),
			Fill::Linear(gradient) => {
				let stops = gradient
					.stops
					.iter()
					.map(|(offset, color)| Ok(GradientStop::new(*offset, with_alpha(color.to_skia()?))))
					.collect::<RenderResult<Vec<_>>>()?;
				let fallback = match gradient.stops.first() {
					Some((_, color)) => color.to_skia()?,
					None => tiny_skia::Color::BLACK,
				};
				paint.shader = tiny_skia::LinearGradient::new(
					Point::from_xy(gradient.x0, gradient.y0),
					Point::from_xy(gradient.x1, gradient.y1),
					stops,
					SpreadMode::Pad,
					Transform::identity(),
				)
				.unwrap_or(Shader::SolidColor(with_alpha(fallback)));
			}
		}
		Ok(paint)
	}
}

impl TextMetrics for Canvas {
	fn set_font(&mut self, font: &FontSpec) {
		debug!(target: "canvas", %font, "font");
		self.state.font = font.clone();
	}

	fn measure_text(&mut self, text: &str) -> RenderResult<f32> {
		let buffer = self.shape(text)?;
		Ok(buffer.layout_runs().map(|run| run.line_w).fold(0.0, f32::max))
	}
}

impl RenderTarget for Canvas {
	fn width(&self) -> u32 {
		self.width
	}

	fn height(&self) -> u32 {
		self.height
	}

	fn clear(&mut self) {
		debug!(target: "canvas", "clear");
		self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
		self.state = DrawingState::default();
		self.state_stack.clear();
	}

	fn set_fill(&mut self, fill: Fill) {
		self.state.fill = fill;
	}

	fn fill(&self) -> &Fill {
		&self.state.fill
	}

	fn set_global_alpha(&mut self, alpha: f32) {
		self.state.global_alpha = alpha.clamp(0.0, 1.0);
	}

	fn global_alpha(&self) -> f32 {
		self.state.global_alpha
	}

	fn set_text_align(&mut self, align: TextAlign) {
		self.state.text_align = align;
	}

	fn set_text_baseline(&mut self, baseline: TextBaseline) {
		self.state.text_baseline = baseline;
	}

	fn fill_rect(&mut self, rect: Rect) -> RenderResult<()> {
		debug!(target: "canvas", x = rect.x, y = rect.y, w = rect.width, h = rect.height, "fillRect");
		let Some(bounds) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) else {
			return Ok(());
		};
		let paint = self.fill_paint()?;
		let mask = self.clip_mask();
		self.pixmap.fill_path(&PathBuilder::from_rect(bounds), &paint, FillRule::Winding, Transform::identity(), mask.as_ref());
		Ok(())
	}

	fn fill_text(&mut self, text: &str, x: f32, y: f32) -> RenderResult<()> {
		debug!(target: "canvas", text, x, y, "fillText");
		let font_size = self.state.font.size_px;
		let buffer = self.shape(text)?;

		let (mut width, mut ascent, mut descent) = (0.0f32, 0.0f32, 0.0f32);
		for run in buffer.layout_runs() {
			width = width.max(run.line_w);
			ascent = ascent.max(run.line_y - run.line_top);
			descent = descent.max(run.line_top + run.line_height - run.line_y);
		}
		if ascent == 0.0 && descent == 0.0 {
			ascent = font_size * 0.8;
			descent = font_size * 0.2;
		}

		let x_offset = match self.state.text_align {
			TextAlign::Left => 0.0,
			TextAlign::Center => -width / 2.0,
			TextAlign::Right => -width,
		};
		let y_offset = match self.state.text_baseline {
			TextBaseline::Alphabetic => 0.0,
			TextBaseline::Top => ascent,
			TextBaseline::Middle => (ascent - descent) / 2.0,
			TextBaseline::Bottom => -descent,
		};
		let (base_x, base_y) = (x + x_offset, y + y_offset);

		let paint = self.fill_paint()?;
		let mask = self.clip_mask();
		for run in buffer.layout_runs() {
			for glyph in run.glyphs.iter() {
				let physical = glyph.physical((base_x, base_y), 1.0);
				let Some(commands) = self.swash_cache.get_outline_commands(&mut self.font_system, physical.cache_key) else {
					continue;
				};

				// Outlines are y-up, the canvas is y-down
				let mut builder = PathBuilder::new();
				for command in commands {
					match command {
						Command::MoveTo(p) => builder.move_to(p.x, -p.y),
						Command::LineTo(p) => builder.line_to(p.x, -p.y),
						Command::QuadTo(c, p) => builder.quad_to(c.x, -c.y, p.x, -p.y),
						Command::CurveTo(c1, c2, p) => builder.cubic_to(c1.x, -c1.y, c2.x, -c2.y, p.x, -p.y),
						Command::Close => builder.close(),
					}
				}
				let Some(path) = builder.finish() else {
					continue;
				};

				let glyph_x = base_x + glyph.x + glyph.font_size * glyph.x_offset;
				let glyph_y = base_y + glyph.y - glyph.font_size * glyph.y_offset;
				self.pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::from_translate(glyph_x, glyph_y), mask.as_ref());
			}
		}
		Ok(())
	}

	fn draw_image(&mut self, image: &RasterImage, src: Rect, dst: Rect) {
		debug!(target: "canvas", ?src, ?dst, "drawImage");
		let (image_w, image_h) = (image.width() as f32, image.height() as f32);
		let sx = src.x.max(0.0).floor();
		let sy = src.y.max(0.0).floor();
		let sw = src.width.min(image_w - sx).ceil();
		let sh = src.height.min(image_h - sy).ceil();
		if sw <= 0.0 || sh <= 0.0 || dst.width <= 0.0 || dst.height <= 0.0 {
			return;
		}

		let cropped;
		let source = if sx == 0.0 && sy == 0.0 && sw == image_w && sh == image_h {
			image.pixmap()
		} else {
			let Some(mut sub) = Pixmap::new(sw as u32, sh as u32) else {
				return;
			};
			sub.draw_pixmap(0, 0, image.pixmap(), &PixmapPaint::default(), Transform::from_translate(-sx, -sy), None);
			cropped = sub;
			cropped.as_ref()
		};

		let paint = PixmapPaint {
			opacity: self.state.global_alpha,
			quality: FilterQuality::Bilinear,
			..Default::default()
		};
		let transform = Transform::from_translate(dst.x, dst.y).pre_scale(dst.width / sw, dst.height / sh);
		let mask = self.clip_mask();
		self.pixmap.draw_pixmap(0, 0, source, &paint, transform, mask.as_ref());
	}

	fn save(&mut self) {
		debug!(target: "canvas", "save");
		self.state_stack.push(self.state.clone());
	}

	fn restore(&mut self) {
		debug!(target: "canvas", "restore");
		if let Some(state) = self.state_stack.pop() {
			self.state = state;
		}
	}

	fn clip_circle(&mut self, cx: f32, cy: f32, radius: f32) {
		debug!(target: "canvas", cx, cy, radius, "clip");
		if let Some(path) = PathBuilder::from_circle(cx, cy, radius) {
			self.state.clips.push(path);
		}
	}
}
