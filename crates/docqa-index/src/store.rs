//! The nearest-neighbor store: embed once at build, scan at query time.
//!
//! Entries are immutable after `build`, so `search` takes `&self` and is
//! safe for shared read access; rebuilds replace the whole store.

use serde::{Deserialize, Serialize};
use tracing::info;

use docqa_core::error::{Error, Result};
use docqa_core::traits::Embedder;
use docqa_core::types::{Chunk, ScoredChunk};

/// One indexed (embedding, chunk) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    pub vector: Vec<f32>,
    pub chunk: Chunk,
}

#[derive(Debug)]
pub struct VectorStore {
    dim: usize,
    entries: Vec<IndexEntry>,
}

impl VectorStore {
    /// Embed every chunk once and index the results.
    ///
    /// Atomic: an embedding failure aborts the whole build and no partial
    /// store exists afterwards.
    pub fn build(embedder: &dyn Embedder, chunks: Vec<Chunk>) -> Result<Self> {
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = embedder
            .embed_batch(&texts)
            .map_err(|e| Error::Embedding(e.to_string()))?;
        debug_assert_eq!(vectors.len(), chunks.len());
        for v in &vectors {
            if v.len() != embedder.dim() {
                return Err(Error::Embedding(format!(
                    "backend returned {}-dim vector, expected {}",
                    v.len(),
                    embedder.dim()
                )));
            }
        }
        let entries: Vec<IndexEntry> = vectors
            .into_iter()
            .zip(chunks)
            .map(|(vector, chunk)| IndexEntry { vector, chunk })
            .collect();
        info!(entries = entries.len(), dim = embedder.dim(), "vector index built");
        Ok(Self { dim: embedder.dim(), entries })
    }

    /// Reassemble a store from persisted entries. `persist::load` has
    /// already verified integrity by the time this runs.
    pub(crate) fn from_entries(dim: usize, entries: Vec<IndexEntry>) -> Self {
        Self { dim, entries }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Embed `query` and return the `k` most similar chunks, best first.
    ///
    /// `k` is clamped to the entry count. Equal scores keep insertion
    /// order (stable sort), so results are reproducible for a
    /// deterministic backend.
    pub fn search(&self, embedder: &dyn Embedder, query: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        let q = embedder
            .embed(query)
            .map_err(|e| Error::Embedding(e.to_string()))?;
        if q.len() != self.dim {
            return Err(Error::Embedding(format!(
                "query vector dim {} does not match index dim {}",
                q.len(),
                self.dim
            )));
        }
        Ok(self.search_vec(&q, k))
    }

    pub fn search_vec(&self, query_vec: &[f32], k: usize) -> Vec<ScoredChunk> {
        let mut hits: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|e| ScoredChunk { chunk: e.chunk.clone(), score: cosine(&e.vector, query_vec) })
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k.min(self.entries.len()));
        hits
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na * nb)
}
