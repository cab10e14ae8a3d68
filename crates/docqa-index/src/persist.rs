//! Index persistence with an explicit integrity check.
//!
//! Loading a serialized index executes deserialization logic, so it is
//! only done for trusted self-produced artifacts and still verified on
//! every load: a version tag plus a blake3 checksum over the serialized
//! entries. Any mismatch is a hard `CorruptIndex` failure, not a warning.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use docqa_core::error::{Error, Result};

use crate::store::{IndexEntry, VectorStore};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Envelope {
    format_version: u32,
    dim: usize,
    built_at: String,
    corpus_fingerprint: String,
    checksum: String,
    entries: Vec<IndexEntry>,
}

fn entries_checksum(entries: &[IndexEntry]) -> Result<String> {
    let bytes = serde_json::to_vec(entries)
        .map_err(|e| Error::Operation(format!("serialize index entries: {e}")))?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}

/// Persist `store` at `path`, tagged with the fingerprint of the corpus
/// it was built from. Writes a sibling temp file and renames so a crash
/// never leaves a partially-written index behind.
pub fn save(store: &VectorStore, path: &Path, corpus_fingerprint: &str) -> Result<()> {
    let envelope = Envelope {
        format_version: FORMAT_VERSION,
        dim: store.dim(),
        built_at: chrono::Utc::now().to_rfc3339(),
        corpus_fingerprint: corpus_fingerprint.to_string(),
        checksum: entries_checksum(store.entries())?,
        entries: store.entries().to_vec(),
    };
    let json = serde_json::to_string(&envelope)
        .map_err(|e| Error::Operation(format!("serialize index: {e}")))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Operation(format!("create {}: {e}", parent.display())))?;
        }
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|e| Error::Operation(format!("write {}: {e}", tmp.display())))?;
    fs::rename(&tmp, path)
        .map_err(|e| Error::Operation(format!("rename into {}: {e}", path.display())))?;
    info!(path = %path.display(), entries = store.len(), "index persisted");
    Ok(())
}

/// Load a persisted index, verifying version, checksum and dimension.
///
/// Returns the store together with the corpus fingerprint it was built
/// from, so the caller can decide whether the index is stale.
pub fn load(path: &Path, expected_dim: usize) -> Result<(VectorStore, String)> {
    let json = fs::read_to_string(path)
        .map_err(|e| Error::CorruptIndex(format!("read {}: {e}", path.display())))?;
    let envelope: Envelope = serde_json::from_str(&json)
        .map_err(|e| Error::CorruptIndex(format!("parse {}: {e}", path.display())))?;

    if envelope.format_version != FORMAT_VERSION {
        return Err(Error::CorruptIndex(format!(
            "format version {} (expected {})",
            envelope.format_version, FORMAT_VERSION
        )));
    }
    let checksum = entries_checksum(&envelope.entries)?;
    if checksum != envelope.checksum {
        return Err(Error::CorruptIndex("entry checksum mismatch".to_string()));
    }
    if envelope.dim != expected_dim {
        return Err(Error::CorruptIndex(format!(
            "index dim {} does not match configured embedding dim {}",
            envelope.dim, expected_dim
        )));
    }
    for e in &envelope.entries {
        if e.vector.len() != envelope.dim {
            return Err(Error::CorruptIndex(format!(
                "entry vector dim {} does not match index dim {}",
                e.vector.len(),
                envelope.dim
            )));
        }
    }
    info!(path = %path.display(), entries = envelope.entries.len(), "index loaded");
    Ok((
        VectorStore::from_entries(envelope.dim, envelope.entries),
        envelope.corpus_fingerprint,
    ))
}
