/// Replay Binary - Feeds a file of notes through the mind map store and prints the graph
///
/// Usage:
///   cargo run --bin mindmap-replay -- --input <path> [--config <path>] [--mode exact|bucketed] [--pretty]
///
/// Options:
///   --input: `.json` file with an array of notes, or a text file with one note per line
///   --config: JSON config file (defaults to $MINDMAP_CONFIG, then built-in tables)
///   --mode: Override the similarity mode from the config
///   --pretty: Pretty-print the JSON snapshot

use anyhow::{Context, Result};
use clap::Parser;
use mindmap_inference::{InferenceConfig, MindMapStore, SimilarityMode};
use mindmap_schemas::Note;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mindmap-replay")]
#[command(about = "Replay notes through the mind map engine and print the graph as JSON")]
struct Args {
    /// Notes file: JSON array of notes, or plain text with one note per line
    #[arg(long, short)]
    input: PathBuf,

    /// Path to a JSON config file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Similarity mode override (exact or bucketed)
    #[arg(long, short)]
    mode: Option<SimilarityMode>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Mind Map - Note Replay Tool v0.1.0");

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => InferenceConfig::from_json_file(path)?,
        None => InferenceConfig::from_env()?,
    };
    if let Some(mode) = args.mode {
        config = config.with_mode(mode);
    }
    info!("Similarity mode: {}", config.mode.as_str());

    let mut store = MindMapStore::new(&config);
    replay(&mut store, &args.input)?;

    let graph = store.graph();
    info!("Notes:              {}", store.len());
    info!("Nodes:              {}", graph.nodes.len());
    info!("Hierarchical links: {}", graph.hierarchical_links().count());
    info!("Similarity links:   {}", graph.similarity_links().count());

    let snapshot = store.snapshot();
    let json = if args.pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{}", json);

    Ok(())
}

fn replay(store: &mut MindMapStore, input: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read notes from {}", input.display()))?;

    let is_json = input
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        let notes: Vec<Note> = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a JSON array of notes", input.display()))?;
        info!("Importing {} notes from {}", notes.len(), input.display());
        store.import_notes(notes)?;
    } else {
        for line in raw.lines().map(str::trim).filter(|line| !line.is_empty()) {
            store.add_note(line);
        }
        info!("Added {} notes from {}", store.len(), input.display());
    }

    Ok(())
}
