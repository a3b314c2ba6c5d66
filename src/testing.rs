//! A [`RenderTarget`] that records draw calls instead of rasterizing them.
//!
//! Every character advances half an em, so with the default 20px font a
//! string is exactly 10px per char wide.

use crate::{
	assets::RasterImage,
	error::RenderResult,
	surface::{Fill, FontSpec, Rect, RenderTarget, TextAlign, TextBaseline, TextMetrics},
};

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
	Clear,
	FillRect { rect: Rect, fill: Fill, alpha: f32 },
	FillText { text: String, x: f32, y: f32, align: TextAlign, baseline: TextBaseline, font: FontSpec, fill: Fill },
	DrawImage { src: Rect, dst: Rect, alpha: f32 },
	Save,
	Restore,
	Clip { cx: f32, cy: f32, radius: f32 },
}

#[derive(Clone, Debug)]
struct State {
	fill: Fill,
	font: FontSpec,
	align: TextAlign,
	baseline: TextBaseline,
	alpha: f32,
}

impl Default for State {
	fn default() -> Self {
		Self {
			fill: Fill::default(),
			font: FontSpec::new("test", 400, 20.0),
			align: TextAlign::default(),
			baseline: TextBaseline::default(),
			alpha: 1.0,
		}
	}
}

pub struct RecordingSurface {
	width: u32,
	height: u32,
	state: State,
	stack: Vec<State>,
	pub ops: Vec<Op>,
}

impl RecordingSurface {
	pub fn new(width: u32, height: u32) -> Self {
		Self {
			width,
			height,
			state: State::default(),
			stack: Vec::new(),
			ops: Vec::new(),
		}
	}

	/// `(text, x, y)` of every `fill_text`, in draw order.
	pub fn texts(&self) -> Vec<(&str, f32, f32)> {
		self.ops
			.iter()
			.filter_map(|op| match op {
				Op::FillText { text, x, y, .. } => Some((text.as_str(), *x, *y)),
				_ => None,
			})
			.collect()
	}

	pub fn text_ops(&self) -> Vec<&Op> {
		self.ops.iter().filter(|op| matches!(op, Op::FillText { .. })).collect()
	}
}

impl TextMetrics for RecordingSurface {
	fn set_font(&mut self, font: &FontSpec) {
		self.state.font = font.clone();
	}

	fn measure_text(&mut self, text: &str) -> RenderResult<f32> {
		Ok(text.chars().count() as f32 * self.state.font.size_px / 2.0)
	}
}

impl RenderTarget for RecordingSurface {
	fn width(&self) -> u32 {
		self.width
	}

	fn height(&self) -> u32 {
		self.height
	}

	fn clear(&mut self) {
		self.state = State::default();
		self.stack.clear();
		self.ops.clear();
		self.ops.push(Op::Clear);
	}

	fn set_fill(&mut self, fill: Fill) {
		self.state.fill = fill;
	}

	fn fill(&self) -> &Fill {
		&self.state.fill
	}

	fn set_global_alpha(&mut self, alpha: f32) {
		self.state.alpha = alpha;
	}

	fn global_alpha(&self) -> f32 {
		self.state.alpha
	}

	fn set_text_align(&mut self, align: TextAlign) {
		self.state.align = align;
	}

	fn set_text_baseline(&mut self, baseline: TextBaseline) {
		self.state.baseline = baseline;
	}

	fn fill_rect(&mut self, rect: Rect) -> RenderResult<()> {
		self.ops.push(Op::FillRect {
			rect,
			fill: self.state.fill.clone(),
			alpha: self.state.alpha,
		});
		Ok(())
	}

	fn fill_text(&mut self, text: &str, x: f32, y: f32) -> RenderResult<()> {
		self.ops.push(Op::FillText {
			text: text.to_owned(),
			x,
			y,
			align: self.state.align,
			baseline: self.state.baseline,
			font: self.state.font.clone(),
			fill: self.state.fill.clone(),
		});
		Ok(())
	}

	fn draw_image(&mut self, _image: &RasterImage, src: Rect, dst: Rect) {
		self.ops.push(Op::DrawImage { src, dst, alpha: self.state.alpha });
	}

	fn save(&mut self) {
		self.stack.push(self.state.clone());
		self.ops.push(Op::Save);
	}

	fn restore(&mut self) {
		if let Some(state) = self.stack.pop() {
			self.state = state;
		}
		self.ops.push(Op::Restore);
	}

	fn clip_circle(&mut self, cx: f32, cy: f32, radius: f32) {
		self.ops.push(Op::Clip { cx, cy, radius });
	}
}
