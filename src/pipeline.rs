//! End-to-end production of one match video
//!
//! [`Production::prepare`] does everything that has no side effects: load and
//! validate the manifests, align the clocks, synthesize the caption tracks
//! and plan the ffmpeg call. [`produce`] then writes the caption files, runs
//! the engine and removes the captions again however the run ends.

use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::captions::{synthesize_track, Cue, SrtGenerator};
use crate::compose::{ComposeSettings, CompositionEngine, CompositionPlan};
use crate::error::{ProducerError, Result};
use crate::manifest::{load_match, Alliance, Match};
use crate::timeline::Timeline;

/// A validated match with its caption tracks and ffmpeg plan
#[derive(Debug, Clone)]
pub struct Production {
    pub game: Match,
    pub timeline: Timeline,
    pub plan: CompositionPlan,
    /// Caption tracks in stream order
    tracks: Vec<Vec<Cue>>,
}

impl Production {
    /// Load `manifest` and plan its composition into `output`.
    pub fn prepare(manifest: &Path, output: &str, settings: &ComposeSettings) -> Result<Self> {
        let game = load_match(manifest)?;
        Ok(Self::from_match(game, output, settings))
    }

    /// Plan the composition of an already validated match.
    #[must_use]
    pub fn from_match(game: Match, output: &str, settings: &ComposeSettings) -> Self {
        let timeline = Timeline::align(&game);
        debug!("Match '{}' starts at {}s", game.name, timeline.global_start);

        let plan = CompositionPlan::build(&game, &timeline, output, settings);
        let tracks = plan
            .streams
            .iter()
            .map(|stream| synthesize_track(&game, stream.team_index, &timeline))
            .collect();

        Self {
            game,
            timeline,
            plan,
            tracks,
        }
    }

    /// Caption tracks in stream order
    #[must_use]
    pub fn tracks(&self) -> &[Vec<Cue>] {
        &self.tracks
    }

    /// Rendered caption files as `(path, text)`, in stream order
    pub fn caption_files(&self) -> Result<Vec<(PathBuf, String)>> {
        let generator = SrtGenerator::new();
        self.plan
            .captions()
            .zip(&self.tracks)
            .map(|(path, cues)| Ok::<_, ProducerError>((path.to_path_buf(), generator.generate(cues)?)))
            .collect()
    }

    /// Final points per alliance and per team
    #[must_use]
    pub fn report(&self) -> ProductionReport {
        ProductionReport {
            blue: self.game.alliance_points(Alliance::Blue),
            red: self.game.alliance_points(Alliance::Red),
            teams: self
                .plan
                .streams
                .iter()
                .zip(&self.tracks)
                .map(|(stream, cues)| TeamScore {
                    number: stream.team_number.clone(),
                    name: stream.team_name.clone(),
                    alliance: stream.alliance,
                    points: cues.last().map_or(0, |c| c.score),
                })
                .collect(),
        }
    }
}

/// Points of one team as shown at the end of its caption track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamScore {
    pub number: String,
    pub name: String,
    pub alliance: Alliance,
    pub points: i64,
}

/// Score summary of a produced match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionReport {
    pub blue: i64,
    pub red: i64,
    /// In stream order
    pub teams: Vec<TeamScore>,
}

/// Caption files that are removed when dropped.
#[derive(Debug)]
pub struct CaptionFiles {
    paths: Vec<PathBuf>,
}

impl CaptionFiles {
    /// Write every caption file concurrently.
    ///
    /// Files already written are removed again if any write fails.
    pub async fn write(files: Vec<(PathBuf, String)>) -> Result<Self> {
        let guard = Self {
            paths: files.iter().map(|(path, _)| path.clone()).collect(),
        };

        try_join_all(files.into_iter().map(|(path, text)| async move {
            tokio::fs::write(&path, text).await?;
            debug!("Wrote captions {}", path.display());
            Ok::<_, ProducerError>(())
        }))
        .await?;

        Ok(guard)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl Drop for CaptionFiles {
    fn drop(&mut self) {
        for path in &self.paths {
            match std::fs::remove_file(path) {
                Ok(()) => debug!("Removed captions {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!("Failed to remove {}: {e}", path.display()),
            }
        }
    }
}

/// Write the captions, run the engine and clean up.
pub async fn produce(
    production: &Production,
    engine: &dyn CompositionEngine,
) -> Result<ProductionReport> {
    for stream in &production.plan.streams {
        if !stream.video.is_file() {
            return Err(ProducerError::MissingMedia(stream.video.clone()));
        }
    }

    let captions = CaptionFiles::write(production.caption_files()?).await?;
    for (stream, path) in production.plan.streams.iter().zip(captions.paths()) {
        if !path.is_file() {
            return Err(ProducerError::MissingMedia(path.clone()));
        }
        info!(
            "Generated captions {} for [#{}, {}]",
            path.display(),
            stream.team_number,
            stream.team_name
        );
    }

    engine.run(&production.plan).await?;
    drop(captions);

    let report = production.report();
    for team in &report.teams {
        info!("#{} {} ({}): {} points", team.number, team.name, team.alliance, team.points);
    }
    info!("Final score: Blue {} - Red {}", report.blue, report.red);
    Ok(report)
}
