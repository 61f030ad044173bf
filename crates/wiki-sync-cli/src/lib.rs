use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use wiki_sync_config::{Config, LoadOptions};
use wiki_sync_core::{SyncOutcome, Synchronizer};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Mirror a Markdown documentation tree into a wiki tree"
)]
struct Cli {
    /// Root of the documentation tree (overrides the configured source root).
    #[arg(value_name = "SOURCE_ROOT")]
    source_root: Option<PathBuf>,

    /// Root of the wiki tree (overrides the configured wiki root).
    #[arg(value_name = "WIKI_ROOT")]
    wiki_root: Option<PathBuf>,
}

/// Entry point for CLI execution. Returns the desired exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    let mut config = Config::load(LoadOptions::default())?;
    if let Some(root) = cli.source_root {
        config.source.root = root;
    }
    if let Some(root) = cli.wiki_root {
        config.wiki.root = root;
    }

    println!("Starting wiki sync...");
    let source_root = config.source.root.clone();
    let outcome = Synchronizer::new(config).run()?;
    report(&source_root.display().to_string(), &outcome);

    Ok(0)
}

fn report(source_root: &str, outcome: &SyncOutcome) {
    for path in &outcome.copied {
        println!("Copied: {}", path.display());
    }

    for missing in &outcome.navigation_missing {
        eprintln!("Warning: {} not found", missing.path.display());
    }

    if outcome.source_missing {
        eprintln!("Docs directory {source_root} does not exist!");
        return;
    }

    for name in &outcome.written_navigation {
        println!("Created: {name}");
    }
    println!("Wiki sync completed successfully!");
}
