use std::fs;
use std::path::PathBuf;

use docqa_core::error::Error;
use docqa_embed::HashEmbedder;
use docqa_query::{build_corpus, open_or_build, try_open, PipelineConfig};

fn write_fixture(dir: &std::path::Path) -> PipelineConfig {
    fs::write(dir.join("a.txt"), "Refunds are processed within five business days.").unwrap();
    fs::write(dir.join("b.txt"), "We are hiring engineers in the payments team.").unwrap();
    fs::write(dir.join("ignored.txt"), "This file is not on the allow-list.").unwrap();
    PipelineConfig {
        docs_dir: dir.to_path_buf(),
        allowed_files: vec!["a.txt".to_string(), "b.txt".to_string()],
        chunk_size: 500,
        overlap: 50,
        index_path: dir.join("index.json"),
    }
}

#[test]
fn corpus_only_contains_allow_listed_files() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = write_fixture(tmp.path());
    let corpus = build_corpus(&cfg, 64).expect("corpus");
    let sources: std::collections::BTreeSet<_> =
        corpus.chunks.iter().map(|c| c.source_file.clone()).collect();
    assert_eq!(sources.len(), 2);
    assert!(!sources.contains("ignored.txt"));
}

#[test]
fn invalid_chunk_params_fail_before_loading() {
    let cfg = PipelineConfig {
        docs_dir: PathBuf::from("/nonexistent"),
        allowed_files: vec![],
        chunk_size: 100,
        overlap: 100,
        index_path: PathBuf::from("/nonexistent/index.json"),
    };
    let err = build_corpus(&cfg, 64).expect_err("must reject overlap >= chunk_size");
    match err.downcast_ref::<Error>() {
        Some(Error::InvalidConfig(_)) => {}
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn zero_embedding_dim_is_a_config_error() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = write_fixture(tmp.path());
    let err = build_corpus(&cfg, 0).expect_err("must reject dim 0");
    match err.downcast_ref::<Error>() {
        Some(Error::InvalidConfig(_)) => {}
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn open_or_build_persists_then_reuses() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = write_fixture(tmp.path());
    let embedder = HashEmbedder::new(64);

    let corpus = build_corpus(&cfg, 64).expect("corpus");
    let n = corpus.chunks.len();
    let store = open_or_build(&embedder, &cfg.index_path, corpus).expect("first build");
    assert_eq!(store.len(), n);
    assert!(cfg.index_path.exists());
    let saved = fs::read_to_string(&cfg.index_path).unwrap();

    // Second run with an unchanged corpus must load, not rebuild: the
    // persisted file stays byte-identical.
    let corpus = build_corpus(&cfg, 64).expect("corpus");
    let reopened = open_or_build(&embedder, &cfg.index_path, corpus).expect("reuse");
    assert_eq!(reopened.len(), n);
    assert_eq!(fs::read_to_string(&cfg.index_path).unwrap(), saved);
}

#[test]
fn stale_fingerprint_triggers_rebuild() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = write_fixture(tmp.path());
    let embedder = HashEmbedder::new(64);

    let corpus = build_corpus(&cfg, 64).expect("corpus");
    open_or_build(&embedder, &cfg.index_path, corpus).expect("first build");

    // Change a source document; the fingerprint no longer matches.
    fs::write(
        tmp.path().join("b.txt"),
        "We are hiring engineers in the payments team. Remote roles are open too.",
    )
    .unwrap();
    let corpus = build_corpus(&cfg, 64).expect("corpus");
    let fresh_fingerprint = corpus.fingerprint.clone();
    let store = open_or_build(&embedder, &cfg.index_path, corpus).expect("rebuild");
    assert!(store.len() >= 2);

    let (_, stored) = docqa_index::load(&cfg.index_path, 64).expect("load");
    assert_eq!(stored, fresh_fingerprint, "rebuilt index carries the new fingerprint");
}

#[test]
fn try_open_reports_absent_fresh_and_stale_indices() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = write_fixture(tmp.path());
    let embedder = HashEmbedder::new(64);
    let corpus = build_corpus(&cfg, 64).expect("corpus");
    let fingerprint = corpus.fingerprint.clone();

    // Nothing persisted yet.
    assert!(try_open(&cfg.index_path, 64, &fingerprint).expect("try_open").is_none());

    open_or_build(&embedder, &cfg.index_path, corpus).expect("build");

    // Matching fingerprint opens the persisted index.
    let reopened = try_open(&cfg.index_path, 64, &fingerprint).expect("try_open");
    assert!(reopened.is_some());

    // A different fingerprint means stale: no store, no error.
    assert!(try_open(&cfg.index_path, 64, "other-fingerprint").expect("try_open").is_none());
}

#[test]
fn corrupt_index_is_a_hard_failure_not_a_rebuild() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = write_fixture(tmp.path());
    let embedder = HashEmbedder::new(64);

    let corpus = build_corpus(&cfg, 64).expect("corpus");
    open_or_build(&embedder, &cfg.index_path, corpus).expect("first build");
    fs::write(&cfg.index_path, "{ definitely not an index").unwrap();

    let corpus = build_corpus(&cfg, 64).expect("corpus");
    let err = open_or_build(&embedder, &cfg.index_path, corpus).expect_err("must fail");
    match err.downcast_ref::<Error>() {
        Some(Error::CorruptIndex(_)) => {}
        other => panic!("expected CorruptIndex, got {other:?}"),
    }
}
