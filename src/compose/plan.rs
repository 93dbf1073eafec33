//! The ffmpeg invocation for one match

use std::path::{Path, PathBuf};

use super::filter::{build_filter_graph, FilterStyle, StreamLabels};
use crate::manifest::{Alliance, Match};
use crate::timeline::Timeline;

/// Output target meaning "write to stdout"
pub const STDOUT: &str = "-";

/// Settings for building a composition plan
#[derive(Debug, Clone)]
pub struct ComposeSettings {
    /// Path to ffmpeg binary
    pub ffmpeg_path: String,
    pub style: FilterStyle,
    /// ffmpeg container format name
    pub format: String,
    /// Directory caption files are written to
    pub caption_dir: PathBuf,
    /// Pass `-y` when writing to a file
    pub overwrite: bool,
}

impl Default for ComposeSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: which::which("ffmpeg").map_or_else(
                |_| "ffmpeg".to_string(),
                |p| p.to_string_lossy().to_string(),
            ),
            style: FilterStyle::default(),
            format: "matroska".to_string(),
            caption_dir: PathBuf::new(),
            overwrite: true,
        }
    }
}

impl ComposeSettings {
    #[must_use]
    pub fn with_ffmpeg_path(mut self, path: impl Into<String>) -> Self {
        self.ffmpeg_path = path.into();
        self
    }

    #[must_use]
    pub fn with_caption_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.caption_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: FilterStyle) -> Self {
        self.style = style;
        self
    }
}

/// One input of the composition, in stream order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStream {
    /// Index into [`Match::teams`]
    pub team_index: usize,
    pub team_number: String,
    pub team_name: String,
    pub alliance: Alliance,
    pub video: PathBuf,
    /// Seconds skipped at the head of the video
    pub seek: u64,
    /// Caption file burned into this stream
    pub caption: PathBuf,
}

/// A fully determined ffmpeg invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionPlan {
    pub program: String,
    pub streams: Vec<PlannedStream>,
    pub output: String,
    args: Vec<String>,
}

/// Caption file name for stream `index` of a match.
#[must_use]
pub fn caption_path(dir: &Path, base_name: &str, index: usize) -> PathBuf {
    dir.join(format!("{base_name}_{index}.srt"))
}

impl CompositionPlan {
    /// Plan the composition of a validated match.
    ///
    /// Streams are ordered Blue, Blue, Red, Red; the Blue pair fills the left
    /// pane and the Red pair the right.
    #[must_use]
    pub fn build(game: &Match, timeline: &Timeline, output: &str, settings: &ComposeSettings) -> Self {
        let streams: Vec<PlannedStream> = game
            .stream_order()
            .into_iter()
            .enumerate()
            .map(|(i, team_index)| {
                let team = &game.teams[team_index];
                PlannedStream {
                    team_index,
                    team_number: team.number.clone(),
                    team_name: team.name.clone(),
                    alliance: team.alliance,
                    video: team.video.clone(),
                    seek: timeline.play_start_offset(team_index),
                    caption: caption_path(&settings.caption_dir, &game.base_name, i),
                }
            })
            .collect();

        let args = build_args(&streams, output, settings);

        Self {
            program: settings.ffmpeg_path.clone(),
            streams,
            output: output.to_string(),
            args,
        }
    }

    /// Arguments passed to the program
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether the composition streams to stdout
    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.output == STDOUT
    }

    /// Caption files referenced by the filtergraph, in stream order
    pub fn captions(&self) -> impl Iterator<Item = &Path> {
        self.streams.iter().map(|s| s.caption.as_path())
    }

    /// The invocation as one shell-quoted line
    #[must_use]
    pub fn to_command_line(&self) -> String {
        shell_words::join(std::iter::once(&self.program).chain(&self.args))
    }
}

fn build_args(streams: &[PlannedStream], output: &str, settings: &ComposeSettings) -> Vec<String> {
    let mut args = vec!["-hide_banner".to_string()];

    if settings.overwrite && output != STDOUT {
        args.push("-y".to_string());
    }

    for stream in streams {
        args.push("-ss".to_string());
        args.push(stream.seek.to_string());
        args.push("-i".to_string());
        args.push(stream.video.to_string_lossy().to_string());
    }

    let labels: Vec<StreamLabels<'_>> = streams
        .iter()
        .map(|s| StreamLabels {
            team_number: &s.team_number,
            team_name: &s.team_name,
            alliance: s.alliance,
            caption: &s.caption,
        })
        .collect();
    args.push("-filter_complex".to_string());
    args.push(build_filter_graph(&labels, &settings.style));

    args.extend(
        ["-map", "[v]", "-map", "[a]", "-f"]
            .iter()
            .map(std::string::ToString::to_string),
    );
    args.push(settings.format.clone());
    args.push(output.to_string());

    args
}
