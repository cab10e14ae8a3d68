//! Pipeline assembly and query resolution on top of the vector index.

pub mod pipeline;
pub mod resolver;

pub use pipeline::{build_corpus, open_or_build, try_open, Corpus, PipelineConfig};
pub use resolver::{answer, DEFAULT_TOP_K};
