//! `SubRip` serialization of caption tracks

use std::fmt::Write as FmtWrite;

use super::cue::Cue;
use crate::error::Result;
use crate::manifest::timestamp::format_caption_time;

/// SRT writer for score caption tracks
#[derive(Debug, Clone)]
pub struct SrtGenerator {
    /// Label written before the running score
    pub score_label: String,
}

impl Default for SrtGenerator {
    fn default() -> Self {
        Self {
            score_label: "Score".to_string(),
        }
    }
}

impl SrtGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render cues as SRT text.
    pub fn generate(&self, cues: &[Cue]) -> Result<String> {
        let mut output = String::new();

        for (i, cue) in cues.iter().enumerate() {
            writeln!(output, "{}", i + 1)?;
            writeln!(
                output,
                "{} --> {}",
                format_caption_time(cue.from),
                format_caption_time(cue.to)
            )?;
            for line in &cue.lines {
                writeln!(output, "{line}")?;
            }
            writeln!(output, "{}: {}", self.score_label, cue.score)?;
            writeln!(output)?;
        }

        Ok(output)
    }
}
