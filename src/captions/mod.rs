//! Score caption tracks
//!
//! One track per team: timed cues with the latest event text and the team's
//! running score, serialized as `SubRip` for burn-in.

mod cue;
mod srt;

pub use cue::{synthesize_track, Cue, CueSynthesizer, GAME_START, WINDOW};
pub use srt::SrtGenerator;
