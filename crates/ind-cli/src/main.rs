//! indscan CLI

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ind_engine::Database;

#[derive(Parser)]
#[command(name = "indscan")]
#[command(about = "indscan - unary inclusion-dependency discovery over TSV tables")]
#[command(version)]
struct Cli {
    /// Directory containing mapping.tsv and the table files it references
    data_dir: PathBuf,
}

fn main() -> Result<()> {
    // Progress goes to stdout (the result lines bypass the logger), and
    // RUST_LOG can silence it.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    let cli = Cli::parse();

    let mut db = Database::load(&cli.data_dir)
        .with_context(|| format!("load table mapping from {}", cli.data_dir.display()))?;
    let discovery = ind_engine::discover(&mut db)
        .with_context(|| format!("discover inclusions under {}", cli.data_dir.display()))?;
    discovery.graph.print(&db);
    Ok(())
}
