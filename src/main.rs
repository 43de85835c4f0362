use clap::Parser;
use tedlium_segments::utils::config::get_config;
use tedlium_segments::{CorpusLoader, HfRowsSource};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Retrieves TEDLIUM3 speech segments for hallucination analysis.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Standard corpus split to load (ignored with --held-back)
    #[arg(long, default_value = "test")]
    split: String,

    /// Load the held-back training subset instead of a standard split
    #[arg(long)]
    held_back: bool,

    /// Informational logging (warnings only otherwise)
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = get_config()?;

    // Set up tracing; RUST_LOG still takes precedence over the flag.
    let default_level = if cli.verbose || config.verbose { "info" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .try_init()
        .ok();

    let loader = CorpusLoader::new(HfRowsSource::new(&config), &config);
    let snapshot = loader.load(&cli.split, cli.held_back).await?;

    info!(segments = snapshot.len(), "Corpus snapshot ready");
    println!("{} segments loaded", snapshot.len());

    Ok(())
}
