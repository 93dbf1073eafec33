//! Four-pane match composition
//!
//! Builds the ffmpeg invocation that trims each team's video onto the global
//! match clock, burns in its score captions and team labels, stacks the two
//! alliances side by side and merges all four audio tracks.

mod engine;
mod filter;
mod plan;

pub use engine::{CompositionEngine, FfmpegEngine};
pub use filter::{build_filter_graph, escape, FilterStyle, StreamLabels};
pub use plan::{caption_path, ComposeSettings, CompositionPlan, PlannedStream, STDOUT};
