use std::io::{self, Write};

use docqa_cli::session::SessionHistory;
use docqa_cli::settings::load_settings;
use docqa_embed::HashEmbedder;
use docqa_query::{answer, build_corpus, open_or_build};

/// Interactive document Q&A shell: one query at a time, answered from the
/// persisted vector index, with an in-session history.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("💬 docqa interactive shell");
    println!("==========================");

    let settings = load_settings()?;
    let embedder = HashEmbedder::new(settings.embedding_dim);

    let corpus = build_corpus(&settings.pipeline, settings.embedding_dim)?;
    println!(
        "📂 Loaded {} chunks from {}",
        corpus.chunks.len(),
        settings.pipeline.docs_dir.display()
    );
    for w in &corpus.warnings {
        println!("⚠️  Skipped {}: {}", w.file, w.reason);
    }

    let store = open_or_build(&embedder, &settings.pipeline.index_path, corpus)?;
    println!("✅ Index ready: {} entries", store.len());
    println!();
    show_help();

    let mut history = SessionHistory::new();
    loop {
        print!("ask> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "/help" | "/h" => show_help(),
            "/history" => show_history(&history),
            "/clear" => {
                history.clear();
                println!("🧹 History cleared");
            }
            "/quit" | "/q" | "quit" | "exit" => {
                println!("👋 Goodbye!");
                break;
            }
            query => {
                match answer(&store, &embedder, query, settings.top_k)? {
                    Some(result) => {
                        println!();
                        println!("{}", result.context);
                        println!();
                        println!("🗂️  Source file(s):");
                        for src in &result.sources {
                            println!("  - {src}");
                        }
                        history.append(query.to_string(), result.context, result.sources);
                    }
                    None => println!("❌ Empty query"),
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_help() {
    println!("🎯 Commands:");
    println!("  /help      Show this help");
    println!("  /history   Show past answers in this session");
    println!("  /clear     Clear the session history");
    println!("  /quit      Exit");
    println!("  <query>    Ask a question about the documents");
}

fn show_history(history: &SessionHistory) {
    if history.is_empty() {
        println!("📭 No questions asked yet");
        return;
    }
    println!("📜 Session history ({} entries, newest first):", history.len());
    for entry in history.iter_newest_first() {
        println!();
        println!("💬 {}", entry.query);
        println!("{}", entry.context);
        let sources: Vec<&str> = entry.sources.iter().map(|s| s.as_str()).collect();
        println!("   sources: {}", sources.join(", "));
    }
}
