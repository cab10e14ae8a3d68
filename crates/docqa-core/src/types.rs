//! Domain types shared by the loader, chunker, index and resolver.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A raw text unit read from one allow-listed source file.
///
/// Immutable once loaded; consumed by the chunker and discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    pub source_file: String,
}

impl Document {
    pub fn new(text: impl Into<String>, source_file: impl Into<String>) -> Self {
        Self { text: text.into(), source_file: source_file.into() }
    }
}

/// A bounded substring of a source document, carrying provenance.
///
/// `chunk_index` is the chunk's position within its parent document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub source_file: String,
    pub chunk_index: usize,
}

impl Chunk {
    /// Construct a chunk from a slice of `parent`, copying only the
    /// defined metadata (source attribution) across.
    pub fn from_document(parent: &Document, text: String, chunk_index: usize) -> Self {
        Self { text, source_file: parent.source_file.clone(), chunk_index }
    }
}

/// One search result: a chunk and its similarity score (higher is better).
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

/// The assembled answer payload for one query.
///
/// `context` is the retrieved chunk text joined in rank order. `sources`
/// is the deduplicated set of source filenames; its order carries no
/// ranking information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub context: String,
    pub sources: BTreeSet<String>,
}
