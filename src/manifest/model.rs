//! Typed, validated match data.

use std::fmt;
use std::path::PathBuf;

/// One of the two competing sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alliance {
    Red,
    Blue,
}

impl Alliance {
    /// Lowercase color name, as used by ffmpeg color options
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
        }
    }

    /// Display label for the alliance pane
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Red => "Red Alliance",
            Self::Blue => "Blue Alliance",
        }
    }

    /// Parse the manifest spelling (`Red` / `Blue`)
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "Red" => Some(Self::Red),
            "Blue" => Some(Self::Blue),
            _ => None,
        }
    }
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Red => "Red",
            Self::Blue => "Blue",
        })
    }
}

/// A single tagged moment in a team's video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Seconds from the start of the team's own video
    pub time: u64,
    pub description: String,
    /// Points scored; `None` marks a narrative event such as "Game Start"
    pub point: Option<i64>,
}

impl Event {
    #[must_use]
    pub fn new(time: u64, description: impl Into<String>, point: Option<i64>) -> Self {
        Self {
            time,
            description: description.into(),
            point,
        }
    }

    /// Caption line for this event
    #[must_use]
    pub fn caption_text(&self) -> String {
        match self.point {
            Some(point) => format!("{}: {point} points", self.description),
            None => self.description.clone(),
        }
    }
}

/// One team's timeline of a match, as tagged from its own recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoManifest {
    /// Second within the video at which the match began
    pub game_start_offset: u64,
    /// Events in non-decreasing time order
    pub events: Vec<Event>,
}

impl VideoManifest {
    /// Sum of all point values
    #[must_use]
    pub fn total_points(&self) -> i64 {
        self.events.iter().filter_map(|e| e.point).sum()
    }
}

/// A team and its recording of the match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub number: String,
    pub name: String,
    pub alliance: Alliance,
    /// Resolved path of the source video
    pub video: PathBuf,
    pub manifest: VideoManifest,
}

/// Four teams, two per alliance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub name: String,
    /// Stem of the match manifest file; caption files are named after it
    pub base_name: String,
    pub teams: Vec<Team>,
}

impl Match {
    /// Indices into [`teams`](Self::teams) in composition order: both Blue
    /// teams, then both Red teams.
    ///
    /// Within an alliance the manifest order is kept.
    #[must_use]
    pub fn stream_order(&self) -> Vec<usize> {
        [Alliance::Blue, Alliance::Red]
            .into_iter()
            .flat_map(|alliance| {
                self.teams
                    .iter()
                    .enumerate()
                    .filter(move |(_, t)| t.alliance == alliance)
                    .map(|(i, _)| i)
            })
            .collect()
    }

    /// Teams of one alliance in manifest order
    pub fn alliance(&self, alliance: Alliance) -> impl Iterator<Item = &Team> + '_ {
        self.teams.iter().filter(move |t| t.alliance == alliance)
    }

    /// Combined points of an alliance
    #[must_use]
    pub fn alliance_points(&self, alliance: Alliance) -> i64 {
        self.alliance(alliance)
            .map(|t| t.manifest.total_points())
            .sum()
    }
}
