//! `game-producer` - four-camera match videos with live score captions
//!
//! Each of the four teams in a robotics match records its own video and tags
//! scoring events in it. This crate lines the four recordings up on one match
//! clock, turns each team's events into a caption track with a running score,
//! and drives ffmpeg to compose a two-by-two view with the Blue alliance on
//! the left and the Red alliance on the right.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use game_producer::{produce, ComposeSettings, FfmpegEngine, Production};
//!
//! #[tokio::main]
//! async fn main() -> game_producer::Result<()> {
//!     let settings = ComposeSettings::default();
//!     let production = Production::prepare(Path::new("match12.yml"), "match12.mkv", &settings)?;
//!     println!("{}", production.plan.to_command_line());
//!     let report = produce(&production, &FfmpegEngine::new()).await?;
//!     println!("Blue {} - Red {}", report.blue, report.red);
//!     Ok(())
//! }
//! ```

pub mod captions;
pub mod compose;
pub mod config;
pub mod error;
pub mod manifest;
pub mod phase;
pub mod pipeline;
pub mod rules;
pub mod timeline;

pub use captions::{synthesize_track, Cue, CueSynthesizer, SrtGenerator};
pub use compose::{ComposeSettings, CompositionEngine, CompositionPlan, FfmpegEngine};
pub use config::ProducerConfig;
pub use error::{ProducerError, Result};
pub use manifest::{load_match, Alliance, Event, Match, Team, VideoManifest};
pub use pipeline::{produce, CaptionFiles, Production, ProductionReport, TeamScore};
pub use timeline::Timeline;

/// Version of game-producer
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
