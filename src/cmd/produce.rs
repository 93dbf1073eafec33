use std::path::Path;

use anyhow::{Context, Result};

use game_producer::{produce, FfmpegEngine, ProducerConfig, ProducerError, Production};

pub async fn cmd_produce(
    manifest: &Path,
    output: &str,
    dry_run: bool,
    config: Option<&Path>,
) -> Result<()> {
    let config = ProducerConfig::load(config).context("failed to load configuration")?;
    let settings = config.compose_settings();

    let production = Production::prepare(manifest, output, &settings)
        .with_context(|| format!("invalid match manifest {}", manifest.display()))?;

    eprintln!("🎬 {}", production.game.name);
    for stream in &production.plan.streams {
        eprintln!(
            "   {} #{} {} (skip {}s)",
            stream.alliance, stream.team_number, stream.team_name, stream.seek
        );
    }

    if dry_run {
        println!("{}", production.plan.to_command_line());
        return Ok(());
    }

    if !FfmpegEngine::check_available(&production.plan.program).await {
        return Err(ProducerError::CompositionEngine(format!(
            "cannot start {}; set `ffmpeg` in the config or install ffmpeg",
            production.plan.program
        ))
        .into());
    }

    eprintln!("{}", production.plan.to_command_line());

    let report = produce(&production, &FfmpegEngine::new())
        .await
        .context("match video production failed")?;

    eprintln!("🏁 Blue {} - Red {}", report.blue, report.red);
    Ok(())
}
