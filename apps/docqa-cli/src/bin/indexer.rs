use std::env;
use std::fs;

use indicatif::{ProgressBar, ProgressStyle};

use docqa_cli::settings::load_settings;
use docqa_core::traits::Embedder;
use docqa_embed::HashEmbedder;
use docqa_index::{save, VectorStore};
use docqa_query::{build_corpus, try_open};

/// Wraps the configured embedder so the progress bar ticks once per
/// embedded chunk during the build.
struct ProgressEmbedder<'a> {
    inner: &'a dyn Embedder,
    bar: ProgressBar,
}

impl Embedder for ProgressEmbedder<'_> {
    fn dim(&self) -> usize {
        self.inner.dim()
    }

    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let v = self.inner.embed(text)?;
        self.bar.inc(1);
        Ok(v)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let force = env::args().any(|a| a == "--force" || a == "-f");

    println!("🛠️  docqa-indexer");
    println!("================");

    let settings = load_settings()?;
    let embedder = HashEmbedder::new(settings.embedding_dim);

    if force && settings.pipeline.index_path.exists() {
        fs::remove_file(&settings.pipeline.index_path)?;
        println!("🗑️  Removed existing index (--force)");
    }

    let corpus = build_corpus(&settings.pipeline, settings.embedding_dim)?;
    println!(
        "📂 {} chunks from {} (allow-list: {} files)",
        corpus.chunks.len(),
        settings.pipeline.docs_dir.display(),
        settings.pipeline.allowed_files.len()
    );
    for w in &corpus.warnings {
        println!("⚠️  Skipped {}: {}", w.file, w.reason);
    }

    let index_path = &settings.pipeline.index_path;
    let store = match try_open(index_path, embedder.dim(), &corpus.fingerprint)? {
        Some(store) => {
            println!("♻️  Reusing persisted index at {}", index_path.display());
            store
        }
        None => {
            let bar = ProgressBar::new(corpus.chunks.len() as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%)")?
                    .progress_chars("#>-"),
            );
            let progress = ProgressEmbedder { inner: &embedder, bar: bar.clone() };
            let store = VectorStore::build(&progress, corpus.chunks)?;
            save(&store, index_path, &corpus.fingerprint)?;
            bar.finish_and_clear();
            store
        }
    };

    println!("✅ Index ready: {} entries at {}", store.len(), index_path.display());
    Ok(())
}
