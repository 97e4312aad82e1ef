//! Character-window chunking for bulk ingestion.
//!
//! Long extracted text is split into consecutive windows of at most
//! `max_chars` characters; neighboring windows share `overlap` characters so
//! a fact straddling a boundary still lands whole in at least one chunk.

use crate::{Error, Result};

pub fn chunk(text: &str, max_chars: usize, overlap: usize) -> Result<Vec<String>> {
	if max_chars == 0 {
		return Err(Error::InvalidChunking {
			message: "max_chars must be greater than zero.".to_string(),
		});
	}
	if overlap >= max_chars {
		return Err(Error::InvalidChunking {
			message: format!("overlap ({overlap}) must be less than max_chars ({max_chars})."),
		});
	}

	let text = text.trim();

	if text.is_empty() {
		return Ok(Vec::new());
	}

	// Byte offset of every char boundary, including the end of the text, so
	// windows never split a multi-byte character.
	let boundaries: Vec<usize> =
		text.char_indices().map(|(idx, _)| idx).chain(std::iter::once(text.len())).collect();
	let total_chars = boundaries.len() - 1;
	let mut chunks = Vec::new();
	let mut start = 0_usize;

	loop {
		let end = (start + max_chars).min(total_chars);
		let piece = text[boundaries[start]..boundaries[end]].trim();

		if !piece.is_empty() {
			chunks.push(piece.to_string());
		}
		if end == total_chars {
			break;
		}

		// end == start + max_chars here and overlap < max_chars, so the
		// window always advances.
		start = end - overlap;
	}

	Ok(chunks)
}
