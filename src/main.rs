//! `game-producer` CLI - compose a match video from a match manifest

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "game-producer")]
#[command(about = "Read a match manifest and compose the four team videos with score captions")]
#[command(version)]
struct Cli {
    /// Match manifest (YAML)
    manifest: PathBuf,

    /// Output file; "-" streams to stdout for preview (`| ffplay -`)
    output: String,

    /// Validate and print the ffmpeg command without running it
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Config file (default: ~/.config/game-producer/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    cmd::produce::cmd_produce(&cli.manifest, &cli.output, cli.dry_run, cli.config.as_deref())
        .await
}
