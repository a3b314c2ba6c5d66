//! Full-width justification of a single wrapped line.

use crate::{
	error::RenderResult,
	surface::{RenderTarget, TextAlign},
};

/// Draw `text` so that its first word starts at `x` and its last word ends at `x + target_width`.
///
/// The leftover width is split evenly between the words. If the words are already wider than the
/// target the gap goes negative and they overlap; that is left to the caller. A line with a single
/// word is drawn as-is.
pub fn draw_justified_line<T: RenderTarget + ?Sized>(surface: &mut T, text: &str, x: f32, y: f32, target_width: f32) -> RenderResult<()> {
	surface.set_text_align(TextAlign::Left);
	let words: Vec<&str> = text.split(' ').collect();
	if words.len() <= 1 {
		return surface.fill_text(text, x, y);
	}

	let widths = words.iter().map(|word| surface.measure_text(word)).collect::<RenderResult<Vec<f32>>>()?;
	let gap = (target_width - widths.iter().sum::<f32>()) / (words.len() - 1) as f32;

	let mut cursor = x;
	for (word, width) in words.iter().zip(&widths) {
		surface.fill_text(word, cursor, y)?;
		cursor += width + gap;
	}
	Ok(())
}
