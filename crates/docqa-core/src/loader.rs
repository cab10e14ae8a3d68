//! Allow-listed document loading.
//!
//! Only files whose names appear on the allow-list are read; anything else
//! in the directory is ignored. A file that cannot be read or is not valid
//! UTF-8 is skipped with a per-file warning — partial results are normal.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::Result;
use crate::types::Document;

/// A non-fatal per-file load failure.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    pub file: String,
    pub reason: String,
}

/// The outcome of one load pass: the documents that were readable plus a
/// warning for every allow-listed file that was not.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub documents: Vec<Document>,
    pub warnings: Vec<LoadWarning>,
}

/// Load every allow-listed file found directly under `dir`.
///
/// Files are visited in sorted name order so the document sequence is
/// reproducible; the persisted index is keyed to that sequence.
pub fn load_documents(dir: &Path, allowed: &[String]) -> Result<LoadOutcome> {
    let mut outcome = LoadOutcome::default();
    for path in list_allowed_files(dir, allowed) {
        let name = file_name(&path);
        match read_utf8(&path) {
            Ok(text) => outcome.documents.push(Document::new(text, name)),
            Err(reason) => {
                warn!(file = %name, %reason, "skipping unreadable document");
                outcome.warnings.push(LoadWarning { file: name, reason });
            }
        }
    }
    Ok(outcome)
}

fn read_utf8(path: &Path) -> std::result::Result<String, String> {
    let bytes = fs::read(path).map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|_| "not valid UTF-8".to_string())
}

fn file_name(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()
}

fn list_allowed_files(root: &Path, allowed: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if allowed.iter().any(|a| Some(a.as_str()) == path.file_name().and_then(|n| n.to_str())) {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    files
}
