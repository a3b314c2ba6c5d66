//! Straight/curly quotation mark conversion.

fn opens_quote(prev: Option<char>) -> bool {
	match prev {
		None => true,
		Some(c) => c.is_whitespace() || matches!(c, '(' | '[' | '{'),
	}
}

/// Replace straight `"` and `'` with typographic ones.
///
/// A quote at the start of the text or right after whitespace or an opening bracket opens;
/// every other one closes, so apostrophes come out as `’`.
pub fn to_curly_quotes(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	let mut prev = None;
	for c in text.chars() {
		out.push(match c {
			'"' if opens_quote(prev) => '“',
			'"' => '”',
			'\'' if opens_quote(prev) => '‘',
			'\'' => '’',
			other => other,
		});
		prev = Some(c);
	}
	out
}

pub fn to_straight_quotes(text: &str) -> String {
	text.chars()
		.map(|c| match c {
			'“' | '”' => '"',
			'‘' | '’' => '\'',
			other => other,
		})
		.collect()
}
