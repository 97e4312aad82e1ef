//! Best-effort local text extraction for uploaded documents.
//!
//! Plain-text formats are decoded in place; binary document formats are a
//! commodity concern handled upstream, so anything unreadable here collapses
//! to a sentinel string instead of an error.

const TEXT_EXTENSIONS: [&str; 10] =
	["txt", "md", "markdown", "csv", "tsv", "json", "yaml", "yml", "log", "xml"];

pub fn extract_text(bytes: &[u8], filename: &str) -> String {
	let extension = filename.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();

	if TEXT_EXTENSIONS.contains(&extension.as_str())
		&& let Ok(text) = std::str::from_utf8(bytes)
	{
		return text.to_string();
	}

	// Unknown extension but valid UTF-8 without control noise is still worth
	// keeping; everything else gets the sentinel.
	if let Ok(text) = std::str::from_utf8(bytes)
		&& looks_like_text(text)
	{
		return text.to_string();
	}

	unable_to_extract(filename)
}

pub fn unable_to_extract(filename: &str) -> String {
	format!("[unable to extract text from {filename}]")
}

fn looks_like_text(text: &str) -> bool {
	let control =
		text.chars().filter(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t')).count();

	control * 50 < text.chars().count().max(1)
}
