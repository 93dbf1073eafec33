//! Caption cue synthesis
//!
//! Events are folded into non-overlapping cues. A cue shows the text of the
//! event that opened it plus any scoring events from the preceding ten
//! seconds, and the running score. A cue opened by a marker (an event without
//! points) does not carry its text into the next cue.

use crate::manifest::{Match, MAX_OFFSET};
use crate::timeline::Timeline;

/// Seconds an event stays on screen
pub const WINDOW: u64 = 10;

/// Text of the marker injected at the start of every track
pub const GAME_START: &str = "Game Start!";

/// A timed caption: visible event lines and the running score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    /// Start, inclusive, on the output clock
    pub from: u64,
    /// End, exclusive
    pub to: u64,
    pub lines: Vec<String>,
    pub score: i64,
}

impl Cue {
    /// Whether this cue only carries the score
    #[must_use]
    pub fn is_score_only(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug)]
struct Pending {
    instant: u64,
    lines: Vec<(u64, String)>,
    point: Option<i64>,
}

/// Incremental cue builder for a single track.
///
/// Feed events in non-decreasing time order with [`push`](Self::push), then
/// call [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct CueSynthesizer {
    pending: Option<Pending>,
    total: i64,
    cues: Vec<Cue>,
}

impl CueSynthesizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Running score, counting only closed cues
    #[must_use]
    pub fn total(&self) -> i64 {
        self.total
    }

    /// Add the next event at output-clock second `at`.
    pub fn push(&mut self, at: u64, text: impl Into<String>, point: Option<i64>) {
        let text = text.into();

        let Some(previous) = self.pending.take() else {
            self.pending = Some(Pending {
                instant: at,
                lines: vec![(at, text)],
                point,
            });
            return;
        };

        let mut carried = self.close(previous.instant, previous.lines, previous.point, at);
        if at.saturating_sub(previous.instant) > WINDOW {
            self.cues.push(Cue {
                from: previous.instant.saturating_add(WINDOW),
                to: at,
                lines: Vec::new(),
                score: self.total,
            });
            carried.clear();
        }
        if previous.point.is_none() {
            carried.clear();
        }

        carried.push((at, text));
        self.pending = Some(Pending {
            instant: at,
            lines: carried,
            point,
        });
    }

    /// Close the last cue and emit the trailing score-only cue up to the
    /// track ceiling.
    #[must_use]
    pub fn finish(mut self) -> Vec<Cue> {
        if let Some(last) = self.pending.take() {
            let end = last.instant.saturating_add(WINDOW);
            self.close(last.instant, last.lines, last.point, end);
            if end < MAX_OFFSET {
                self.cues.push(Cue {
                    from: end,
                    to: MAX_OFFSET,
                    lines: Vec::new(),
                    score: self.total,
                });
            }
        }
        self.cues
    }

    /// Emit the pending cue ending at `next` (or after the window, whichever
    /// comes first) and hand back its lines.
    fn close(
        &mut self,
        instant: u64,
        lines: Vec<(u64, String)>,
        point: Option<i64>,
        next: u64,
    ) -> Vec<(u64, String)> {
        if let Some(point) = point {
            self.total += point;
        }

        let visible = lines
            .iter()
            .filter(|(time, _)| instant.saturating_sub(*time) <= WINDOW)
            .map(|(_, text)| text.clone())
            .collect();

        self.cues.push(Cue {
            from: instant,
            to: next.min(instant.saturating_add(WINDOW)),
            lines: visible,
            score: self.total,
        });
        lines
    }
}

/// Build the caption track of team `index`.
///
/// The track opens with a game-start marker at the global match start; each
/// event is shifted onto the output clock by the team's seek offset.
#[must_use]
pub fn synthesize_track(game: &Match, index: usize, timeline: &Timeline) -> Vec<Cue> {
    let mut synth = CueSynthesizer::new();
    synth.push(timeline.global_start, GAME_START, None);
    if let Some(team) = game.teams.get(index) {
        for event in &team.manifest.events {
            synth.push(
                timeline.to_output(index, event.time),
                event.caption_text(),
                event.point,
            );
        }
    }
    synth.finish()
}
