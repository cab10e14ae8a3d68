//! Query resolution: retrieve top-k chunks and assemble the payload.
//!
//! There is no generation step. The "answer" is the retrieved context
//! itself, joined in rank order, plus the deduplicated source set. A
//! generation model would replace this module only, not the pipeline.

use std::collections::BTreeSet;

use docqa_core::traits::Embedder;
use docqa_core::types::QueryResult;
use docqa_index::VectorStore;

pub const DEFAULT_TOP_K: usize = 3;

const CONTEXT_SEPARATOR: &str = "\n";

/// Answer `query` from the index.
///
/// An empty or whitespace-only query returns `Ok(None)` without touching
/// the index, so "no query" is never confused with "no matches".
pub fn answer(
    store: &VectorStore,
    embedder: &dyn Embedder,
    query: &str,
    k: usize,
) -> anyhow::Result<Option<QueryResult>> {
    if query.trim().is_empty() {
        return Ok(None);
    }
    let hits = store.search(embedder, query, k)?;
    let context = hits
        .iter()
        .map(|h| h.chunk.text.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR);
    let sources: BTreeSet<String> = hits.iter().map(|h| h.chunk.source_file.clone()).collect();
    Ok(Some(QueryResult { context, sources }))
}
