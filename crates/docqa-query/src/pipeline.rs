//! Corpus assembly and the index open-or-build policy.
//!
//! The corpus carries a blake3 fingerprint over the loaded documents and
//! the chunking/embedding parameters. A persisted index is reused only
//! when its stored fingerprint matches; a stale index is rebuilt and
//! re-persisted. A corrupt index file is a hard failure either way —
//! rebuilds never paper over integrity violations.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use docqa_core::chunker;
use docqa_core::loader::{load_documents, LoadWarning};
use docqa_core::traits::Embedder;
use docqa_core::types::{Chunk, Document};
use docqa_index::{load, save, VectorStore};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub docs_dir: PathBuf,
    pub allowed_files: Vec<String>,
    pub chunk_size: usize,
    pub overlap: usize,
    pub index_path: PathBuf,
}

/// One corpus snapshot: the chunk sequence the index will be keyed to,
/// its fingerprint, and any per-file load warnings.
#[derive(Debug)]
pub struct Corpus {
    pub chunks: Vec<Chunk>,
    pub fingerprint: String,
    pub warnings: Vec<LoadWarning>,
}

/// Load the allow-listed files and chunk them.
///
/// Chunking parameters are validated before any file is read, so a bad
/// configuration fails at pipeline entry.
pub fn build_corpus(cfg: &PipelineConfig, embedding_dim: usize) -> anyhow::Result<Corpus> {
    if embedding_dim == 0 {
        return Err(
            docqa_core::error::Error::InvalidConfig("embedding dim must be positive".to_string())
                .into(),
        );
    }
    chunker::validate_params(cfg.chunk_size, cfg.overlap)?;
    let outcome = load_documents(&cfg.docs_dir, &cfg.allowed_files)?;
    for w in &outcome.warnings {
        warn!(file = %w.file, reason = %w.reason, "document skipped during load");
    }
    let fingerprint = corpus_fingerprint(&outcome.documents, cfg.chunk_size, cfg.overlap, embedding_dim);
    let chunks = chunker::split(&outcome.documents, cfg.chunk_size, cfg.overlap)?;
    info!(
        documents = outcome.documents.len(),
        chunks = chunks.len(),
        "corpus assembled"
    );
    Ok(Corpus { chunks, fingerprint, warnings: outcome.warnings })
}

/// Fingerprint of everything the persisted index depends on: the ordered
/// document set and the parameters that shape chunk boundaries and
/// vectors. Fields are length-prefixed so no two corpora collide by
/// concatenation.
pub fn corpus_fingerprint(
    documents: &[Document],
    chunk_size: usize,
    overlap: usize,
    embedding_dim: usize,
) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(chunk_size as u64).to_le_bytes());
    hasher.update(&(overlap as u64).to_le_bytes());
    hasher.update(&(embedding_dim as u64).to_le_bytes());
    for doc in documents {
        hasher.update(&(doc.source_file.len() as u64).to_le_bytes());
        hasher.update(doc.source_file.as_bytes());
        hasher.update(&(doc.text.len() as u64).to_le_bytes());
        hasher.update(doc.text.as_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

/// Load the persisted index if it exists and was built from a corpus
/// with this fingerprint.
///
/// `Ok(None)` means absent or stale — a rebuild is needed. A corrupt
/// index file is an error, never a silent rebuild.
pub fn try_open(
    index_path: &Path,
    expected_dim: usize,
    fingerprint: &str,
) -> anyhow::Result<Option<VectorStore>> {
    if !index_path.exists() {
        return Ok(None);
    }
    let (store, stored_fingerprint) = load(index_path, expected_dim)?;
    if stored_fingerprint == fingerprint {
        info!(path = %index_path.display(), "reusing persisted index");
        return Ok(Some(store));
    }
    info!(path = %index_path.display(), "persisted index is stale");
    Ok(None)
}

/// Reuse the persisted index when it matches the current corpus,
/// otherwise build and persist a fresh one.
pub fn open_or_build(
    embedder: &dyn Embedder,
    index_path: &Path,
    corpus: Corpus,
) -> anyhow::Result<VectorStore> {
    if let Some(store) = try_open(index_path, embedder.dim(), &corpus.fingerprint)? {
        return Ok(store);
    }
    let store = VectorStore::build(embedder, corpus.chunks)?;
    save(&store, index_path, &corpus.fingerprint)?;
    Ok(store)
}
