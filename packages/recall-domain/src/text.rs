//! Text cleanup applied before chunking and prompt assembly.

/// Normalizes raw extracted text: CRLF/CR become LF, trailing whitespace is
/// stripped per line, runs of three or more newlines collapse to one blank
/// line, and the whole text is trimmed.
pub fn normalize(text: &str) -> String {
	if text.is_empty() {
		return String::new();
	}

	let unified = text.replace("\r\n", "\n").replace('\r', "\n");
	let mut out = String::with_capacity(unified.len());
	let mut blank_lines = 0_usize;

	for line in unified.split('\n') {
		let line = line.trim_end();

		if line.is_empty() {
			blank_lines += 1;

			continue;
		}
		if !out.is_empty() {
			// One blank line survives; longer runs collapse to it.
			out.push_str(if blank_lines > 0 { "\n\n" } else { "\n" });
		}

		blank_lines = 0;

		out.push_str(line);
	}

	out
}

/// Truncates to at most `max` characters on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> &str {
	match text.char_indices().nth(max) {
		Some((idx, _)) => &text[..idx],
		None => text,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unifies_line_endings() {
		assert_eq!(normalize("a\r\nb\rc"), "a\nb\nc");
	}

	#[test]
	fn collapses_blank_line_runs() {
		assert_eq!(normalize("a\n\n\n\n\nb"), "a\n\nb");
		assert_eq!(normalize("a\n\nb"), "a\n\nb");
		assert_eq!(normalize("a\nb"), "a\nb");
	}

	#[test]
	fn strips_trailing_whitespace_per_line() {
		assert_eq!(normalize("a   \nb\t\n"), "a\nb");
	}

	#[test]
	fn empty_and_whitespace_collapse_to_empty() {
		assert_eq!(normalize(""), "");
		assert_eq!(normalize(" \n \r\n\t "), "");
	}

	#[test]
	fn truncates_on_char_boundaries() {
		assert_eq!(truncate_chars("héllo", 2), "hé");
		assert_eq!(truncate_chars("hi", 10), "hi");
	}
}
