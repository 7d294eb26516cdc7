//! postpool — build and query a few-shot post corpus.

use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::EnvFilter;

use postpool_core::{DataPaths, Language, LengthBucket};
use postpool_ingest::CorpusBuilder;
use postpool_llm::{LLMConfig, LlmClient};
use postpool_retrieve::{format_examples, FewShotRetriever};

fn print_help() {
    println!("postpool — few-shot example pool for style-guided post generation");
    println!();
    println!("Usage: postpool <command> [args]");
    println!();
    println!("Commands:");
    println!("  build [raw-file] [out-file]        Enrich and normalize the raw corpus");
    println!("  tags [corpus-file]                 List distinct canonical tags");
    println!("  query <tag> <length> <language> [corpus-file]");
    println!("                                     Print matching few-shot examples");
    println!();
    println!("Lengths: Short, Medium, Long. Languages: English, Hinglish, Tanglish.");
    println!();
    println!("Data directory defaults to ./data, override with POSTPOOL_DATA_DIR.");
    println!("LLM keys come from data/llm-config.json or GROQ_API_KEY /");
    println!("ANTHROPIC_API_KEY / OPENAI_API_KEY.");
}

async fn run_build(paths: &DataPaths, args: &[String]) -> anyhow::Result<()> {
    let raw_path = args
        .first()
        .map(PathBuf::from)
        .unwrap_or_else(|| paths.raw_file.clone());
    let out_path = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| paths.processed_file.clone());

    let config = LLMConfig::load(&paths.llm_config_file);
    let client = LlmClient::from_config(&config)?;
    info!("Using provider {} with model {}", client.provider(), client.model());

    let count = CorpusBuilder::new(&client)
        .build_file(&raw_path, &out_path)
        .await?;
    println!("Done. Saved {} posts to {}", count, out_path.display());
    Ok(())
}

fn run_tags(paths: &DataPaths, args: &[String]) -> anyhow::Result<()> {
    let corpus_path = args
        .first()
        .map(PathBuf::from)
        .unwrap_or_else(|| paths.processed_file.clone());
    let retriever = FewShotRetriever::load(&corpus_path)?;
    for tag in retriever.get_tags() {
        println!("{tag}");
    }
    Ok(())
}

fn run_query(paths: &DataPaths, args: &[String]) -> anyhow::Result<()> {
    let [tag, length, language, rest @ ..] = args else {
        bail!("Usage: postpool query <tag> <length> <language> [corpus-file]");
    };
    let length: LengthBucket = length.parse().map_err(anyhow::Error::msg)?;
    let language: Language = language.parse().map_err(anyhow::Error::msg)?;
    let corpus_path = rest
        .first()
        .map(PathBuf::from)
        .unwrap_or_else(|| paths.processed_file.clone());

    let retriever = FewShotRetriever::load(&corpus_path)?;
    let posts = retriever.get_filtered_posts(tag, length, language);
    if posts.is_empty() {
        println!("No examples match {tag} / {length} / {language}.");
    } else {
        println!("{}", format_examples(posts));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let paths = DataPaths::from_env().context("resolving data directory")?;

    match args.first().map(String::as_str) {
        Some("build") => run_build(&paths, &args[1..]).await,
        Some("tags") => run_tags(&paths, &args[1..]),
        Some("query") => run_query(&paths, &args[1..]),
        Some("--help" | "-h" | "help") | None => {
            print_help();
            Ok(())
        }
        Some(other) => {
            eprintln!("Unknown command: {other}");
            print_help();
            std::process::exit(1);
        }
    }
}
