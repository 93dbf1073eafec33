//! Global match clock
//!
//! Each team's recording starts at a different moment relative to the match.
//! The composed output is trimmed so every stream shows the match starting at
//! the same instant: the earliest recording is left untouched and the others
//! are seeked forward by their lead.

use crate::manifest::Match;

/// Per-team alignment onto the composed output clock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    /// Output-clock second at which the match starts (smallest team offset)
    pub global_start: u64,
    /// Seek offset per team, parallel to [`Match::teams`]
    offsets: Vec<u64>,
}

impl Timeline {
    /// Align all teams of a match.
    #[must_use]
    pub fn align(game: &Match) -> Self {
        let global_start = game
            .teams
            .iter()
            .map(|t| t.manifest.game_start_offset)
            .min()
            .unwrap_or(0);

        let offsets = game
            .teams
            .iter()
            .map(|t| t.manifest.game_start_offset - global_start)
            .collect();

        Self {
            global_start,
            offsets,
        }
    }

    /// Seconds to skip at the head of the video of team `index`
    #[must_use]
    pub fn play_start_offset(&self, index: usize) -> u64 {
        self.offsets.get(index).copied().unwrap_or(0)
    }

    /// Map a source-video time of team `index` onto the composed output clock.
    ///
    /// Times before the seek point clamp to zero.
    #[must_use]
    pub fn to_output(&self, index: usize, source_seconds: u64) -> u64 {
        source_seconds.saturating_sub(self.play_start_offset(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{Alliance, Team, VideoManifest};
    use std::path::PathBuf;

    fn team(number: &str, alliance: Alliance, offset: u64) -> Team {
        Team {
            number: number.to_string(),
            name: format!("Team {number}"),
            alliance,
            video: PathBuf::from(format!("{number}.mp4")),
            manifest: VideoManifest {
                game_start_offset: offset,
                events: Vec::new(),
            },
        }
    }

    fn game(offsets: [u64; 4]) -> Match {
        Match {
            name: "Match 1".to_string(),
            base_name: "match1".to_string(),
            teams: vec![
                team("100", Alliance::Red, offsets[0]),
                team("200", Alliance::Red, offsets[1]),
                team("300", Alliance::Blue, offsets[2]),
                team("400", Alliance::Blue, offsets[3]),
            ],
        }
    }

    #[test]
    fn test_global_start_is_minimum() {
        let m = game([60, 50, 75, 52]);
        let timeline = Timeline::align(&m);
        assert_eq!(timeline.global_start, 50);
        let offsets: Vec<u64> = (0..4).map(|i| timeline.play_start_offset(i)).collect();
        assert_eq!(offsets, vec![10, 0, 25, 2]);
    }

    #[test]
    fn test_equal_offsets_need_no_trim() {
        let timeline = Timeline::align(&game([30, 30, 30, 30]));
        assert_eq!(timeline.global_start, 30);
        assert!((0..4).all(|i| timeline.play_start_offset(i) == 0));
    }

    #[test]
    fn test_shared_team_number_keeps_own_offset() {
        let mut m = game([50, 80, 50, 50]);
        m.teams[1].number = "100".to_string();
        let timeline = Timeline::align(&m);
        assert_eq!(timeline.play_start_offset(0), 0);
        assert_eq!(timeline.play_start_offset(1), 30);
        assert_eq!(timeline.to_output(1, 90), 60);
    }

    #[test]
    fn test_to_output() {
        let timeline = Timeline::align(&game([60, 50, 50, 50]));
        // 01:10 in a video whose match starts at 01:00 is ten seconds into
        // the match, which begins at 50 on the output clock.
        assert_eq!(timeline.to_output(0, 70), 60);
        assert_eq!(timeline.to_output(1, 70), 70);
        assert_eq!(timeline.to_output(0, 5), 0);
    }
}
