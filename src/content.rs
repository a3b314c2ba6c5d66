//! Quote, footer and logo placement.
//!
//! The quote block and the footer are stacked and centered vertically as one
//! unit. All text is drawn on a middle baseline, so every y coordinate below is
//! the vertical center of its line.

use tracing::debug;

use crate::{
	assets::RasterImage,
	color::resolve_color,
	error::RenderResult,
	justify::draw_justified_line,
	lines::{LineRecord, break_lines},
	style::{Align, StyleConfig},
	surface::{Fill, FontSpec, Rect, RenderTarget, TextAlign, TextBaseline, TextMetrics},
};

const FOOTER_MIN_FONT_SIZE: f32 = 24.0;
const FOOTER_FONT_SCALE: f32 = 0.8;
const FOOTER_LINE_HEIGHT: f32 = 1.5;
const FOOTER_SEPARATOR: &str = " | ";

/// Distance from the right and bottom edges to the logo's bounding box.
const LOGO_MARGIN: f32 = 60.0;
const LOGO_ALPHA: f32 = 0.8;

/// Vertical metrics of the quote and footer blocks.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentLayout {
	pub lines: Vec<LineRecord>,
	pub indent_width: f32,
	pub line_height: f32,
	pub quote_block_height: f32,
	pub has_footer: bool,
	/// Gap between the quote block and the footer.
	pub spacing: f32,
	pub footer_font_size: f32,
	/// Zero without a footer.
	pub footer_line_height: f32,
	/// Top edge of the centered content.
	pub top: f32,
}

impl ContentLayout {
	/// Wrap the quote with the body font and center the result in a `width` x `height` canvas.
	///
	/// Leaves the body font selected on `metrics`.
	pub fn compute<M: TextMetrics + ?Sized>(metrics: &mut M, width: f32, height: f32, style: &StyleConfig) -> RenderResult<Self> {
		let font_size = style.font_size;
		metrics.set_font(&FontSpec::new(&style.font_family, style.font_weight(), font_size));

		let indent_width = if style.indentation { font_size } else { 0.0 };
		let content_width = width - 2.0 * style.padding;
		let lines = break_lines(metrics, &style.text.quote, content_width, style.line_break, indent_width)?;

		let line_height = font_size * style.line_height;
		let paragraph_breaks = lines.iter().take(lines.len().saturating_sub(1)).filter(|line| !line.is_soft_break).count();
		let quote_block_height = lines.len() as f32 * line_height + paragraph_breaks as f32 * style.paragraph_spacing;

		let has_footer = !(style.text.author.is_empty() && style.text.title.is_empty());
		let footer_font_size = FOOTER_MIN_FONT_SIZE.max(font_size * FOOTER_FONT_SCALE);
		let (spacing, footer_line_height) = if has_footer { (font_size, footer_font_size * FOOTER_LINE_HEIGHT) } else { (0.0, 0.0) };

		let total = quote_block_height + spacing + footer_line_height;
		Ok(Self {
			lines,
			indent_width,
			line_height,
			quote_block_height,
			has_footer,
			spacing,
			footer_font_size,
			footer_line_height,
			top: (height - total) / 2.0,
		})
	}

	pub fn total_height(&self) -> f32 {
		self.quote_block_height + self.spacing + self.footer_line_height
	}

	pub fn first_line_center(&self) -> f32 {
		self.top + self.line_height / 2.0
	}

	pub fn footer_center(&self) -> f32 {
		self.top + self.quote_block_height + self.spacing + self.footer_line_height / 2.0
	}
}

/// Draw the quote, the author/title footer and the platform logo.
pub fn paint_content<T: RenderTarget + ?Sized>(surface: &mut T, width: f32, height: f32, style: &StyleConfig, logo: Option<&RasterImage>) -> RenderResult<()> {
	surface.set_fill(Fill::Color(resolve_color(&style.text_color)));
	surface.set_text_baseline(TextBaseline::Middle);

	let layout = ContentLayout::compute(surface, width, height, style)?;
	debug!(lines = layout.lines.len(), top = layout.top, height = layout.total_height(), "content layout");

	paint_quote(surface, width, style, &layout)?;
	if layout.has_footer {
		paint_footer(surface, width, style, &layout)?;
	}
	if let Some(logo) = logo.filter(|logo| style.logo.platform.is_some() && logo.is_ready()) {
		paint_logo(surface, width, height, style.logo.size, logo);
	}
	Ok(())
}

fn paint_quote<T: RenderTarget + ?Sized>(surface: &mut T, width: f32, style: &StyleConfig, layout: &ContentLayout) -> RenderResult<()> {
	let content_width = width - 2.0 * style.padding;
	let last = layout.lines.len().saturating_sub(1);
	let mut y = layout.first_line_center();

	for (i, line) in layout.lines.iter().enumerate() {
		let (mut left, mut available) = (style.padding, content_width);
		if line.is_para_start && style.indentation {
			left += layout.indent_width;
			available -= layout.indent_width;
		}

		match style.align {
			Align::Justify if line.is_soft_break => draw_justified_line(surface, &line.text, left, y, available)?,
			Align::Justify | Align::Left => {
				surface.set_text_align(TextAlign::Left);
				surface.fill_text(&line.text, left, y)?;
			}
			Align::Center => {
				surface.set_text_align(TextAlign::Center);
				surface.fill_text(&line.text, width / 2.0, y)?;
			}
			Align::Right => {
				surface.set_text_align(TextAlign::Right);
				surface.fill_text(&line.text, width - style.padding, y)?;
			}
		}

		y += layout.line_height;
		if !line.is_soft_break && i < last {
			y += style.paragraph_spacing;
		}
	}
	Ok(())
}

fn paint_footer<T: RenderTarget + ?Sized>(surface: &mut T, width: f32, style: &StyleConfig, layout: &ContentLayout) -> RenderResult<()> {
	let footer = &style.footer;
	let regular = FontSpec::new(&footer.family, footer.regular_weight, layout.footer_font_size);
	let bold = FontSpec::new(&footer.family, footer.bold_weight, layout.footer_font_size);

	let (author, title) = (style.text.author.as_str(), style.text.title.as_str());
	let separator = if author.is_empty() || title.is_empty() { "" } else { FOOTER_SEPARATOR };
	let mut segments = Vec::with_capacity(3);
	for (text, font) in [(author, &regular), (separator, &regular), (title, &bold)] {
		if text.is_empty() {
			continue;
		}
		surface.set_font(font);
		segments.push((text, font, surface.measure_text(text)?));
	}
	let total: f32 = segments.iter().map(|(_, _, w)| w).sum();

	let mut x = match style.align {
		Align::Left | Align::Justify => style.padding,
		Align::Center => (width - total) / 2.0,
		Align::Right => width - style.padding - total,
	};
	let y = layout.footer_center();

	surface.set_text_align(TextAlign::Left);
	for (text, font, advance) in segments {
		surface.set_font(font);
		surface.fill_text(text, x, y)?;
		x += advance;
	}
	Ok(())
}

/// Centered square crop of the logo, clipped to a circle in the bottom-right corner.
fn paint_logo<T: RenderTarget + ?Sized>(surface: &mut T, width: f32, height: f32, diameter: f32, logo: &RasterImage) {
	let radius = diameter / 2.0;
	let cx = width - LOGO_MARGIN - radius;
	let cy = height - LOGO_MARGIN - radius;

	let (w, h) = (logo.width() as f32, logo.height() as f32);
	let side = w.min(h);
	let src = Rect::new((w - side) / 2.0, (h - side) / 2.0, side, side);

	surface.save();
	surface.set_global_alpha(LOGO_ALPHA);
	surface.clip_circle(cx, cy, radius);
	surface.draw_image(logo, src, Rect::new(cx - radius, cy - radius, diameter, diameter));
	surface.restore();
}
