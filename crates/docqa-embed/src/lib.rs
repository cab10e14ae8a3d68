//! Deterministic hash-based embedding backend.
//!
//! The demo pipeline has no model inference: text is mapped into a
//! fixed-length vector by hashing whitespace tokens into buckets and
//! L2-normalising the result. Identical text always produces an identical
//! vector, which the persisted index relies on. A model-backed embedder is
//! a drop-in replacement implementing the same [`Embedder`] trait.

use std::hash::{Hash, Hasher};

use twox_hash::XxHash64;

pub use docqa_core::traits::Embedder;

/// Dimension of the reference deployment's embedding space.
pub const DEFAULT_DIM: usize = 1536;

const HASH_SEED: u64 = 0;

pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIM)
    }
}

impl Embedder for HashEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        anyhow::ensure!(self.dim > 0, "embedding dimension must be positive");
        let mut v = vec![0f32; self.dim];
        for (i, token) in text.split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(HASH_SEED);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        let norm = (v.iter().map(|x| x * x).sum::<f32>()).sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        Ok(v)
    }
}

/// The embedder used when nothing else is configured.
pub fn default_embedder(dim: usize) -> Box<dyn Embedder> {
    Box::new(HashEmbedder::new(dim))
}
