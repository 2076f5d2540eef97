use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use sift_core::{build, source, Document, QueryEngine, QueryMode, StemTable, StopWordSet};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Build an in-memory inverted index and query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Document input: a JSON/JSONL file or a directory of them
    #[arg(long)]
    docs: String,
    /// JSON array of stop words
    #[arg(long)]
    stopwords: Option<String>,
    /// JSON object mapping surface forms to stems
    #[arg(long)]
    stems: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and run one query against it
    Query {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Query mode: single, or, phrase
        #[arg(long, default_value = "or")]
        mode: String,
        /// Query terms (joined by spaces in phrase mode)
        terms: Vec<String>,
        /// Include document texts in the output
        #[arg(long, default_value_t = false)]
        texts: bool,
    },
    /// Build the index and print corpus statistics
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
}

#[derive(Serialize)]
struct Hit<'a> {
    doc_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[derive(Serialize)]
struct QueryOutput<'a> {
    mode: QueryMode,
    terms: &'a [String],
    total_hits: usize,
    hits: Vec<Hit<'a>>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Query { corpus, mode, terms, texts } => run_query(corpus, &mode, terms, texts),
        Commands::Stats { corpus } => run_stats(corpus),
    }
}

fn load_corpus(args: &CorpusArgs) -> Result<(Vec<Document>, StopWordSet, StemTable)> {
    let docs = collect_documents(Path::new(&args.docs))?;
    let stopwords = match &args.stopwords {
        Some(path) => StopWordSet::from_json_reader(File::open(path)?)?,
        None => StopWordSet::default(),
    };
    let stems = match &args.stems {
        Some(path) => StemTable::from_json_reader(File::open(path)?)?,
        None => StemTable::default(),
    };
    Ok((docs, stopwords, stems))
}

fn collect_documents(input: &Path) -> Result<Vec<Document>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
        files.sort();
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        bail!("input path not found: {}", input.display());
    }

    let mut docs = Vec::new();
    for file in files {
        docs.extend(source::read_documents(&file)?);
    }
    Ok(docs)
}

fn run_query(corpus: CorpusArgs, mode: &str, terms: Vec<String>, texts: bool) -> Result<()> {
    let mode: QueryMode = mode.parse()?;
    let (docs, stopwords, stems) = load_corpus(&corpus)?;
    let index = build(docs, &stopwords, &stems)?;
    tracing::info!(
        num_docs = index.num_docs(),
        num_tokens = index.num_tokens(),
        "index built"
    );

    let engine = QueryEngine::new(&index, &stopwords, &stems);
    let ids: BTreeSet<u32> = engine.query(mode, &terms);
    let hits: Vec<Hit> = if texts {
        engine
            .fetch_texts(&ids)?
            .into_iter()
            .map(|(doc_id, text)| Hit { doc_id, text: Some(text) })
            .collect()
    } else {
        ids.iter().map(|&doc_id| Hit { doc_id, text: None }).collect()
    };

    let out = QueryOutput { mode, terms: &terms, total_hits: hits.len(), hits };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn run_stats(corpus: CorpusArgs) -> Result<()> {
    let (docs, stopwords, stems) = load_corpus(&corpus)?;
    let index = build(docs, &stopwords, &stems)?;

    let mut by_df: Vec<(&str, usize)> = index
        .tokens()
        .map(|t| (t, index.postings(t).len()))
        .collect();
    by_df.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    println!("documents:  {}", index.num_docs());
    println!("tokens:     {}", index.num_tokens());
    println!("stop words: {}", stopwords.len());
    println!("stem rules: {}", stems.len());
    for (token, df) in by_df.iter().take(20) {
        println!("  {token:<24} {df}");
    }
    Ok(())
}
