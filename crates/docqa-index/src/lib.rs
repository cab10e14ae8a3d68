//! In-memory vector index with checksummed on-disk persistence.

pub mod persist;
pub mod store;

pub use persist::{load, save, FORMAT_VERSION};
pub use store::{IndexEntry, VectorStore};
