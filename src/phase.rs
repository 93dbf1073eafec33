//! Match phases on the elapsed-time clock
//!
//! Tagging periods overlap by a few seconds at each transition so an event
//! logged slightly late still lands in the period it belongs to:
//!
//! ```text
//! Autonomous  [  0,  30)
//! Teleop      [ 25, 125)
//! End Game    [122, 170)
//! Penalty     [  0, 170)
//! ```

/// Seconds after game start at which tagging closes
pub const MATCH_END: i64 = 170;

const AUTONOMOUS: (i64, i64) = (0, 30);
const TELEOP: (i64, i64) = (25, 125);
const END_GAME: (i64, i64) = (122, MATCH_END);

/// A scoring period events can be tagged in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Autonomous,
    Teleop,
    EndGame,
    Penalty,
}

/// Where a moment falls relative to the match periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    PreMatch,
    Autonomous,
    AutonomousToTeleop,
    Teleop,
    TeleopToEndGame,
    EndGame,
    PostMatch,
}

impl Phase {
    /// Periods accepting events during this phase
    #[must_use]
    pub fn open_periods(&self) -> &'static [Period] {
        match self {
            Self::PreMatch | Self::PostMatch => &[],
            Self::Autonomous => &[Period::Autonomous, Period::Penalty],
            Self::AutonomousToTeleop => &[Period::Autonomous, Period::Teleop, Period::Penalty],
            Self::Teleop => &[Period::Teleop, Period::Penalty],
            Self::TeleopToEndGame => &[Period::Teleop, Period::EndGame, Period::Penalty],
            Self::EndGame => &[Period::EndGame, Period::Penalty],
        }
    }

    /// Whether the match is running
    #[must_use]
    pub fn in_match(&self) -> bool {
        !self.open_periods().is_empty()
    }
}

/// Classify seconds elapsed since game start.
#[must_use]
pub fn phase(elapsed_seconds: i64) -> Phase {
    let within = |(start, end): (i64, i64)| (start..end).contains(&elapsed_seconds);

    match (within(AUTONOMOUS), within(TELEOP), within(END_GAME)) {
        (true, false, _) => Phase::Autonomous,
        (true, true, _) => Phase::AutonomousToTeleop,
        (false, true, false) => Phase::Teleop,
        (false, true, true) => Phase::TeleopToEndGame,
        (false, false, true) => Phase::EndGame,
        (false, false, false) if elapsed_seconds < 0 => Phase::PreMatch,
        (false, false, false) => Phase::PostMatch,
    }
}
