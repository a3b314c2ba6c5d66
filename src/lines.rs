//! Greedy line breaking against measured text widths.

use derive_new::new;

use crate::{error::RenderResult, style::BreakMode, surface::TextMetrics};

/// One visual line of the quote.
#[derive(Clone, Debug, PartialEq, Eq, new)]
pub struct LineRecord {
	pub text: String,
	/// The line ended because the next unit did not fit, not because the paragraph did.
	pub is_soft_break: bool,
	pub is_para_start: bool,
}

/// Wrap `text` into lines no wider than `max_width`, measured with the current font.
///
/// Paragraphs are separated by `\n` and wrapped independently. The first line of each
/// paragraph is given `max_width - indent_width`; continuation lines get the full width.
/// A unit joins the current line only while the joined width stays strictly below the
/// limit. Word mode never splits a word, so a single overlong word overflows its line.
pub fn break_lines<M: TextMetrics + ?Sized>(metrics: &mut M, text: &str, max_width: f32, mode: BreakMode, indent_width: f32) -> RenderResult<Vec<LineRecord>> {
	let mut lines = Vec::new();
	if text.is_empty() {
		return Ok(lines);
	}

	for paragraph in text.split('\n') {
		let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
		match mode {
			BreakMode::Word => wrap_paragraph(metrics, paragraph.split(' '), " ", max_width, indent_width, &mut lines)?,
			BreakMode::Char => {
				let chars = paragraph.char_indices().map(|(i, c)| &paragraph[i..i + c.len_utf8()]);
				wrap_paragraph(metrics, chars, "", max_width, indent_width, &mut lines)?
			}
		}
	}
	Ok(lines)
}

fn wrap_paragraph<'a, M: TextMetrics + ?Sized>(
	metrics: &mut M,
	mut units: impl Iterator<Item = &'a str>,
	separator: &str,
	max_width: f32,
	indent_width: f32,
	lines: &mut Vec<LineRecord>,
) -> RenderResult<()> {
	let mut is_para_start = true;
	let mut limit = max_width - indent_width;
	let mut current = units.next().unwrap_or_default().to_owned();

	for unit in units {
		let candidate = format!("{current}{separator}{unit}");
		if metrics.measure_text(&candidate)? < limit {
			current = candidate;
		} else {
			lines.push(LineRecord::new(std::mem::replace(&mut current, unit.to_owned()), true, is_para_start));
			is_para_start = false;
			limit = max_width;
		}
	}
	lines.push(LineRecord::new(current, false, is_para_start));
	Ok(())
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;
	use crate::testing::RecordingSurface;

	fn records(lines: &[LineRecord]) -> Vec<(&str, bool, bool)> {
		lines.iter().map(|l| (l.text.as_str(), l.is_soft_break, l.is_para_start)).collect()
	}

	#[test]
	fn empty_text_has_no_lines() {
		let mut surface = RecordingSurface::new(100, 100);
		assert!(break_lines(&mut surface, "", 50.0, BreakMode::Word, 0.0).unwrap().is_empty());
	}

	#[test]
	fn short_quote_fits_on_one_line() {
		let mut surface = RecordingSurface::new(1080, 1080);
		let lines = break_lines(&mut surface, "Hello world", 880.0, BreakMode::Word, 0.0).unwrap();
		assert_eq!(lines, vec![LineRecord::new("Hello world".into(), false, true)]);
	}

	#[test]
	fn blank_paragraph_is_kept() {
		let mut surface = RecordingSurface::new(1080, 1080);
		let lines = break_lines(&mut surface, "A\n\nB", 880.0, BreakMode::Word, 0.0).unwrap();
		assert_eq!(records(&lines), vec![("A", false, true), ("", false, true), ("B", false, true)]);
	}

	#[test]
	fn words_wrap_greedily() {
		// 10px per char
		let mut surface = RecordingSurface::new(100, 100);
		let lines = break_lines(&mut surface, "aaa bbb ccc ddd", 80.0, BreakMode::Word, 0.0).unwrap();
		assert_eq!(records(&lines), vec![("aaa bbb", true, true), ("ccc ddd", false, false)]);
	}

	#[test]
	fn exact_fit_is_deferred() {
		let mut surface = RecordingSurface::new(100, 100);
		// "aaa bbb" is 70px: equal to the limit, so it must not join
		let lines = break_lines(&mut surface, "aaa bbb", 70.0, BreakMode::Word, 0.0).unwrap();
		assert_eq!(records(&lines), vec![("aaa", true, true), ("bbb", false, false)]);

		let lines = break_lines(&mut surface, "aaa bbb", 70.5, BreakMode::Word, 0.0).unwrap();
		assert_eq!(records(&lines), vec![("aaa bbb", false, true)]);
	}

	#[test]
	fn overlong_word_overflows() {
		let mut surface = RecordingSurface::new(100, 100);
		let lines = break_lines(&mut surface, "a incomprehensibilities b", 50.0, BreakMode::Word, 0.0).unwrap();
		assert_eq!(records(&lines), vec![("a", true, true), ("incomprehensibilities", true, false), ("b", false, false)]);
	}

	#[test]
	fn indent_shrinks_only_first_line() {
		let mut surface = RecordingSurface::new(100, 100);
		// first line limit 60: "aa bb" (50) fits, "aa bb cc" (80) doesn't;
		// later lines limit 90: "cc dd ee" (80) fits
		let lines = break_lines(&mut surface, "aa bb cc dd ee ff gg", 90.0, BreakMode::Word, 30.0).unwrap();
		assert_eq!(records(&lines), vec![("aa bb", true, true), ("cc dd ee", true, false), ("ff gg", false, false)]);

		// the indent applies again to the next paragraph's first line
		let lines = break_lines(&mut surface, "aa bb cc\naa bb cc", 90.0, BreakMode::Word, 30.0).unwrap();
		assert_eq!(records(&lines), vec![("aa bb", true, true), ("cc", false, false), ("aa bb", true, true), ("cc", false, false)]);
	}

	#[test]
	fn char_mode_breaks_anywhere() {
		let mut surface = RecordingSurface::new(100, 100);
		let lines = break_lines(&mut surface, "abcdefg", 35.0, BreakMode::Char, 0.0).unwrap();
		assert_eq!(records(&lines), vec![("abc", true, true), ("def", true, false), ("g", false, false)]);
	}

	#[test]
	fn char_mode_handles_multibyte_text() {
		let mut surface = RecordingSurface::new(100, 100);
		let lines = break_lines(&mut surface, "가나다라", 25.0, BreakMode::Char, 0.0).unwrap();
		assert_eq!(records(&lines), vec![("가나", true, true), ("다라", false, false)]);
	}

	#[test]
	fn consecutive_spaces_survive_as_empty_words() {
		let mut surface = RecordingSurface::new(100, 100);
		let lines = break_lines(&mut surface, "a  b", 100.0, BreakMode::Word, 0.0).unwrap();
		assert_eq!(records(&lines), vec![("a  b", false, true)]);
	}

	#[test]
	fn crlf_input_wraps_like_lf() {
		let mut surface = RecordingSurface::new(100, 100);
		let lines = break_lines(&mut surface, "a\r\nb", 100.0, BreakMode::Word, 0.0).unwrap();
		assert_eq!(records(&lines), vec![("a", false, true), ("b", false, true)]);
	}

	#[rstest]
	#[case(BreakMode::Word, "one two three four five six seven eight nine ten\n\nsecond paragraph here", 0.0)]
	#[case(BreakMode::Word, "one two three four five six seven eight nine ten\nmore words follow in this one", 20.0)]
	#[case(BreakMode::Char, "character mode wraps this sentence\nand this one", 20.0)]
	fn wrap_invariants_hold(#[case] mode: BreakMode, #[case] text: &str, #[case] indent: f32) {
		let max_width = 120.0;
		let mut surface = RecordingSurface::new(200, 200);
		let lines = break_lines(&mut surface, text, max_width, mode, indent).unwrap();

		let paragraphs = text.split('\n').count();
		assert_eq!(lines.iter().filter(|l| l.is_para_start).count(), paragraphs);
		assert_eq!(lines.iter().filter(|l| !l.is_soft_break).count(), paragraphs);

		let separator = if mode == BreakMode::Word { " " } else { "" };
		for (i, line) in lines.iter().enumerate() {
			if !line.is_soft_break {
				continue;
			}
			let limit = if line.is_para_start { max_width - indent } else { max_width };
			let next = &lines[i + 1];
			let next_unit = match mode {
				BreakMode::Word => next.text.split(' ').next().unwrap().to_owned(),
				BreakMode::Char => next.text.chars().next().unwrap().to_string(),
			};
			assert!(surface.measure_text(&line.text).unwrap() < limit || !line.text.contains(separator));
			assert!(surface.measure_text(&format!("{}{separator}{next_unit}", line.text)).unwrap() >= limit);
			assert!(!next.is_para_start);
		}
	}
}
