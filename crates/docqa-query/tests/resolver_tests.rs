use docqa_core::types::{Chunk, Document};
use docqa_embed::HashEmbedder;
use docqa_index::VectorStore;
use docqa_query::{answer, DEFAULT_TOP_K};

fn sample_store(embedder: &HashEmbedder) -> VectorStore {
    let policy = Document::new("", "refund_policy.txt");
    let services = Document::new("", "services.txt");
    let chunks = vec![
        Chunk::from_document(&policy, "Refunds are processed within five business days.".to_string(), 0),
        Chunk::from_document(&policy, "Refund requests need the original transaction id.".to_string(), 1),
        Chunk::from_document(&services, "Instant transfers are available around the clock.".to_string(), 0),
    ];
    VectorStore::build(embedder, chunks).expect("build")
}

#[test]
fn empty_query_returns_none_without_searching() {
    let embedder = HashEmbedder::new(64);
    let store = sample_store(&embedder);
    assert!(answer(&store, &embedder, "", DEFAULT_TOP_K).expect("answer").is_none());
    assert!(answer(&store, &embedder, "   \t\n", DEFAULT_TOP_K).expect("answer").is_none());

    // Also holds for an empty index.
    let empty = VectorStore::build(&embedder, vec![]).expect("build");
    assert!(answer(&empty, &embedder, "  ", DEFAULT_TOP_K).expect("answer").is_none());
}

#[test]
fn context_joins_hits_in_rank_order() {
    let embedder = HashEmbedder::new(64);
    let store = sample_store(&embedder);
    let result = answer(&store, &embedder, "refund processed business days", 2)
        .expect("answer")
        .expect("some result");
    let parts: Vec<&str> = result.context.split('\n').collect();
    assert_eq!(parts.len(), 2);
    let hits = store.search(&embedder, "refund processed business days", 2).expect("search");
    assert_eq!(parts[0], hits[0].chunk.text);
    assert_eq!(parts[1], hits[1].chunk.text);
}

#[test]
fn sources_are_deduplicated() {
    let embedder = HashEmbedder::new(64);
    let store = sample_store(&embedder);
    // k=3 pulls both refund_policy chunks; the source set must list the
    // file once.
    let result = answer(&store, &embedder, "refund transaction", 3)
        .expect("answer")
        .expect("some result");
    assert!(result.sources.len() <= 2);
    assert!(result.sources.contains("refund_policy.txt"));
    let listed: Vec<&String> = result.sources.iter().collect();
    let mut deduped = listed.clone();
    deduped.dedup();
    assert_eq!(listed, deduped);
}

#[test]
fn answer_on_empty_index_returns_empty_context() {
    let embedder = HashEmbedder::new(64);
    let store = VectorStore::build(&embedder, vec![]).expect("build");
    let result = answer(&store, &embedder, "anything", DEFAULT_TOP_K)
        .expect("answer")
        .expect("some result");
    assert!(result.context.is_empty());
    assert!(result.sources.is_empty());
}
