//! Scoring rules of the tagged season
//!
//! The tagging tool writes each event's description and point value from a
//! fixed table. [`audit`] checks a manifest event against that table so a
//! hand-edited manifest with a mistyped point value or an event tagged in
//! the wrong period is reported before the video is produced.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ProducerError, Result};
use crate::manifest::Event;
use crate::phase::{phase, Period};

static RING_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(high|medium|low) \(([0-9]+)\)").expect("valid ring count pattern"));

const RING_GOALS: &str = "Launched Rings into Goals";

/// An event with a fixed point value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    GameStart,
    PowerShot,
    WobbleGoalTargetZone,
    WobbleGoalStartLine,
    WobbleGoalDropZone,
    RobotParked,
    MinorPenalty,
    MajorPenalty,
}

impl EventKind {
    pub const ALL: [Self; 8] = [
        Self::GameStart,
        Self::PowerShot,
        Self::WobbleGoalTargetZone,
        Self::WobbleGoalStartLine,
        Self::WobbleGoalDropZone,
        Self::RobotParked,
        Self::MinorPenalty,
        Self::MajorPenalty,
    ];

    /// Description as written by the tagging tool
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::GameStart => "Game Start",
            Self::PowerShot => "Power Shot Target Knocked",
            Self::WobbleGoalTargetZone => "Wobble Goal Delivered to Target Zone",
            Self::WobbleGoalStartLine => "Wobble Goal Delivered to Start Line",
            Self::WobbleGoalDropZone => "Wobble Goal Delivered to Drop Zone",
            Self::RobotParked => "Robot Parked",
            Self::MinorPenalty => "Minor Penalty",
            Self::MajorPenalty => "Major Penalty",
        }
    }

    #[must_use]
    pub fn points(&self) -> i64 {
        match self {
            Self::GameStart => 0,
            Self::PowerShot | Self::WobbleGoalTargetZone => 15,
            Self::WobbleGoalStartLine | Self::RobotParked => 5,
            Self::WobbleGoalDropZone => 20,
            Self::MinorPenalty => -10,
            Self::MajorPenalty => -30,
        }
    }

    /// Periods in which this event can be tagged; empty for the game start
    #[must_use]
    pub fn periods(&self) -> &'static [Period] {
        match self {
            Self::GameStart => &[],
            Self::PowerShot => &[Period::Autonomous, Period::EndGame],
            Self::WobbleGoalTargetZone | Self::RobotParked => &[Period::Autonomous],
            Self::WobbleGoalStartLine | Self::WobbleGoalDropZone => &[Period::EndGame],
            Self::MinorPenalty | Self::MajorPenalty => &[Period::Penalty],
        }
    }

    #[must_use]
    pub fn is_penalty(&self) -> bool {
        matches!(self, Self::MinorPenalty | Self::MajorPenalty)
    }

    /// Match a tagged description, ignoring a penalty's trailing reason
    #[must_use]
    pub fn from_description(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| {
            let name = kind.description();
            if kind.is_penalty() {
                text == name || text.starts_with(&format!("{name},"))
            } else {
                text == name
            }
        })
    }
}

/// Per-ring points of the low, medium and high goals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingValues {
    pub low: i64,
    pub medium: i64,
    pub high: i64,
}

/// Ring values for a period; teleop values also apply in the end game
#[must_use]
pub fn ring_values(period: Period) -> Option<RingValues> {
    match period {
        Period::Autonomous => Some(RingValues {
            low: 3,
            medium: 6,
            high: 12,
        }),
        Period::Teleop | Period::EndGame => Some(RingValues {
            low: 2,
            medium: 4,
            high: 6,
        }),
        Period::Penalty => None,
    }
}

/// Rings launched into each goal in one volley
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RingCount {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl RingCount {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.high + self.medium + self.low
    }

    #[must_use]
    pub fn points(&self, values: RingValues) -> i64 {
        i64::from(self.high) * values.high
            + i64::from(self.medium) * values.medium
            + i64::from(self.low) * values.low
    }

    /// Read the counts back out of a ring goal description
    #[must_use]
    pub fn from_description(text: &str) -> Option<Self> {
        let rest = text.strip_prefix(RING_GOALS)?.strip_prefix(',')?;
        let mut count = Self::default();
        for caps in RING_COUNT.captures_iter(rest) {
            let n: u32 = caps[2].parse().ok()?;
            match &caps[1] {
                "high" => count.high = n,
                "medium" => count.medium = n,
                _ => count.low = n,
            }
        }
        Some(count)
    }
}

/// A description and point value ready to be tagged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scored {
    pub description: String,
    pub point: i64,
}

impl Scored {
    /// Attach a video time
    #[must_use]
    pub fn at(self, time: u64) -> Event {
        Event::new(time, self.description, Some(self.point))
    }
}

/// Score a fixed-value event. Penalties need a reason.
pub fn fixed(kind: EventKind, reason: Option<&str>) -> Result<Scored> {
    let description = match (kind.is_penalty(), reason.map(str::trim)) {
        (true, Some(reason)) if !reason.is_empty() => format!("{}, {reason}", kind.description()),
        (true, _) => {
            return Err(ProducerError::InvalidEvent(
                "a penalty needs a reason".to_string(),
            ))
        }
        (false, _) => kind.description().to_string(),
    };
    Ok(Scored {
        description,
        point: kind.points(),
    })
}

/// Score a ring volley. At least one ring is required.
pub fn ring_goal(period: Period, rings: RingCount) -> Result<Scored> {
    let values = ring_values(period).ok_or_else(|| {
        ProducerError::InvalidEvent("rings cannot be scored in the penalty period".to_string())
    })?;
    if rings.total() == 0 {
        return Err(ProducerError::InvalidEvent(
            "number of rings launched into goals is missing".to_string(),
        ));
    }

    let mut description = format!("{RING_GOALS},");
    for (label, n) in [("high", rings.high), ("medium", rings.medium), ("low", rings.low)] {
        if n > 0 {
            description.push_str(&format!(" {label} ({n})"));
        }
    }

    Ok(Scored {
        description,
        point: rings.points(values),
    })
}

/// Check a tagged event against the rules table.
///
/// `elapsed` is seconds since game start. Returns a description of the
/// problem, or `None` when the event is consistent or not a rules event.
#[must_use]
pub fn audit(event: &Event, elapsed: i64) -> Option<String> {
    let open = phase(elapsed).open_periods();

    if let Some(kind) = EventKind::from_description(&event.description) {
        if let Some(point) = event.point {
            if point != kind.points() {
                return Some(format!(
                    "'{}' is worth {} points, tagged as {point}",
                    event.description,
                    kind.points()
                ));
            }
        }
        if !kind.periods().is_empty() && !kind.periods().iter().any(|p| open.contains(p)) {
            return Some(format!(
                "'{}' tagged {elapsed}s after game start, outside its period",
                event.description
            ));
        }
        return None;
    }

    let rings = RingCount::from_description(&event.description)?;
    let point = event.point?;
    let candidates: Vec<Period> = if open.is_empty() {
        vec![Period::Autonomous, Period::Teleop]
    } else {
        open.to_vec()
    };
    let allowed = candidates
        .into_iter()
        .filter_map(ring_values)
        .any(|values| rings.points(values) == point);

    (!allowed).then(|| {
        format!(
            "'{}' does not add up to {point} points",
            event.description
        )
    })
}
