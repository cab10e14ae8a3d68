//! Config keys shared by both binaries, with reference-deployment defaults.

use docqa_core::config::{expand_path, Config};
use docqa_query::PipelineConfig;

pub const DEFAULT_CHUNK_SIZE: usize = 500;
pub const DEFAULT_OVERLAP: usize = 50;
pub const DEFAULT_EMBEDDING_DIM: usize = 1536;
pub const DEFAULT_TOP_K: usize = docqa_query::DEFAULT_TOP_K;

/// The reference deployment serves exactly these five files.
fn default_allowed_files() -> Vec<String> {
    [
        "refund_and_safety_policy.txt",
        "services_and_features.txt",
        "account_kyc_security.txt",
        "careers_and_work_with_us.txt",
        "company_overview.txt",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub struct Settings {
    pub pipeline: PipelineConfig,
    pub embedding_dim: usize,
    pub top_k: usize,
}

pub fn load_settings() -> anyhow::Result<Settings> {
    let config = Config::load()?;

    let docs_dir: String = config.get("data.docs_dir").unwrap_or_else(|_| "./docs".to_string());
    let index_path: String = config
        .get("data.index_path")
        .unwrap_or_else(|_| "./docqa_index.json".to_string());
    let allowed_files: Vec<String> =
        config.get("data.allowed_files").unwrap_or_else(|_| default_allowed_files());
    let chunk_size: usize = config.get("chunking.chunk_size").unwrap_or(DEFAULT_CHUNK_SIZE);
    let overlap: usize = config.get("chunking.overlap").unwrap_or(DEFAULT_OVERLAP);
    let embedding_dim: usize = config.get("embedding.dim").unwrap_or(DEFAULT_EMBEDDING_DIM);
    let top_k: usize = config.get("search.top_k").unwrap_or(DEFAULT_TOP_K);

    Ok(Settings {
        pipeline: PipelineConfig {
            docs_dir: expand_path(&docs_dir),
            allowed_files,
            chunk_size,
            overlap,
            index_path: expand_path(&index_path),
        },
        embedding_dim,
        top_k,
    })
}
