//! Fixed-size overlapping chunking.
//!
//! A sliding window of `chunk_size` characters walks each document,
//! advancing by `chunk_size - overlap` per step. The final chunk may be
//! shorter than `chunk_size`. For fixed input and parameters the output
//! sequence is exactly reproducible.

use crate::error::{Error, Result};
use crate::types::{Chunk, Document};

/// Validate `(chunk_size, overlap)` before any chunking work starts.
///
/// `overlap >= chunk_size` would make the window advance by zero or a
/// negative amount; it is a configuration error, not an edge case.
pub fn validate_params(chunk_size: usize, overlap: usize) -> Result<()> {
    if chunk_size == 0 {
        return Err(Error::InvalidConfig("chunk_size must be positive".to_string()));
    }
    if overlap >= chunk_size {
        return Err(Error::InvalidConfig(format!(
            "overlap ({overlap}) must be smaller than chunk_size ({chunk_size})"
        )));
    }
    Ok(())
}

/// Split every document into overlapping character-window chunks.
///
/// Sizes count Unicode scalar values, not bytes, so multi-byte text never
/// splits inside a character. An empty document yields no chunks.
pub fn split(documents: &[Document], chunk_size: usize, overlap: usize) -> Result<Vec<Chunk>> {
    validate_params(chunk_size, overlap)?;
    let step = chunk_size - overlap;

    let mut chunks = Vec::new();
    for doc in documents {
        // Byte offset of every char boundary, plus the end sentinel.
        let mut bounds: Vec<usize> = doc.text.char_indices().map(|(i, _)| i).collect();
        bounds.push(doc.text.len());
        let n_chars = bounds.len() - 1;

        let mut start = 0usize;
        let mut chunk_index = 0usize;
        while start < n_chars {
            let end = (start + chunk_size).min(n_chars);
            let text = doc.text[bounds[start]..bounds[end]].to_string();
            chunks.push(Chunk::from_document(doc, text, chunk_index));
            chunk_index += 1;
            start += step;
        }
    }
    Ok(chunks)
}
