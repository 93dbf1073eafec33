//! YAML manifest loading and validation
//!
//! The match manifest names four teams; each team points at a source video
//! and at the video manifest produced by the tagging tool. Referenced paths
//! are tried as given first, then relative to the match manifest's folder,
//! so a match folder can be moved around as a unit.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::Value;
use tracing::{debug, warn};

use super::model::{Alliance, Event, Match, Team, VideoManifest};
use super::timestamp::{format_mmss, parse_time};
use super::MAX_OFFSET;
use crate::error::{ProducerError, Result};
use crate::phase::phase;
use crate::rules;

#[derive(Debug, Deserialize)]
struct MatchDocument {
    #[serde(rename = "VirtualGame")]
    virtual_game: VirtualGame,
}

#[derive(Debug, Deserialize)]
struct VirtualGame {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Teams")]
    teams: Vec<TeamEntry>,
}

#[derive(Debug, Deserialize)]
struct TeamEntry {
    #[serde(rename = "TeamName")]
    team_name: String,
    #[serde(rename = "TeamNumber")]
    team_number: Value,
    #[serde(rename = "Alliance")]
    alliance: String,
    #[serde(rename = "GameVideo")]
    game_video: GameVideoEntry,
}

#[derive(Debug, Deserialize)]
struct GameVideoEntry {
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "VideoManifest")]
    video_manifest: String,
}

#[derive(Debug, Deserialize)]
struct VideoDocument {
    #[serde(rename = "GameStartOffset")]
    game_start_offset: Value,
    #[serde(rename = "GameEvents")]
    game_events: Vec<EventEntry>,
}

#[derive(Debug, Deserialize)]
struct EventEntry {
    #[serde(rename = "Time")]
    time: Value,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Point", default)]
    point: Value,
}

/// Load and validate a match manifest and the four video manifests it references.
pub fn load_match(path: &Path) -> Result<Match> {
    let text = std::fs::read_to_string(path)?;
    let document: MatchDocument = serde_yaml::from_str(&text)
        .map_err(|e| ProducerError::manifest(path, e.to_string()))?;
    let game = document.virtual_game;

    if game.teams.len() != 4 {
        return Err(ProducerError::manifest(
            path,
            format!("expected 4 teams, found {}", game.teams.len()),
        ));
    }

    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let base_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| ProducerError::manifest(path, "manifest path has no file name"))?;

    let mut teams = Vec::with_capacity(4);
    for entry in game.teams {
        teams.push(load_team(path, base_dir, entry)?);
    }

    for alliance in [Alliance::Red, Alliance::Blue] {
        let count = teams.iter().filter(|t| t.alliance == alliance).count();
        if count != 2 {
            return Err(ProducerError::manifest(
                path,
                format!("expected 2 {alliance} teams, found {count}"),
            ));
        }
    }

    debug!("Loaded match '{}' from {}", game.name, path.display());

    Ok(Match {
        name: game.name,
        base_name,
        teams,
    })
}

fn load_team(path: &Path, base_dir: &Path, entry: TeamEntry) -> Result<Team> {
    let number = team_number(&entry.team_number)
        .ok_or_else(|| ProducerError::manifest(path, "TeamNumber must be a number or text"))?;

    let alliance = Alliance::parse(&entry.alliance).ok_or_else(|| {
        ProducerError::manifest(
            path,
            format!(
                "team #{number}: Alliance must be Red or Blue, got '{}'",
                entry.alliance
            ),
        )
    })?;

    let video = resolve_path("Location", &entry.game_video.location, base_dir)?;
    let manifest_path = resolve_path("VideoManifest", &entry.game_video.video_manifest, base_dir)?;
    let manifest = load_video_manifest(&manifest_path)?;

    Ok(Team {
        number,
        name: entry.team_name,
        alliance,
        video,
        manifest,
    })
}

/// Load and validate one team's video manifest.
pub fn load_video_manifest(path: &Path) -> Result<VideoManifest> {
    let text = std::fs::read_to_string(path)?;
    parse_video_manifest(&text, path)
}

/// Validate video manifest text; `path` is only used for error reporting.
pub fn parse_video_manifest(text: &str, path: &Path) -> Result<VideoManifest> {
    let document: VideoDocument = serde_yaml::from_str(text)
        .map_err(|e| ProducerError::manifest(path, e.to_string()))?;

    let game_start_offset = parse_time(&document.game_start_offset)?;
    if game_start_offset >= MAX_OFFSET {
        return Err(ProducerError::manifest(
            path,
            format!(
                "GameStartOffset {game_start_offset}s exceeds the {MAX_OFFSET}s ceiling \
                 (minutes and seconds swapped?)"
            ),
        ));
    }

    let mut events = Vec::with_capacity(document.game_events.len());
    let mut previous = game_start_offset;
    for (index, entry) in document.game_events.into_iter().enumerate() {
        let time = parse_time(&entry.time)?;
        if time < previous {
            let message = if events.is_empty() {
                format!(
                    "event #{} '{}' at {} precedes GameStartOffset {}",
                    index + 1,
                    entry.description,
                    format_mmss(time),
                    format_mmss(game_start_offset)
                )
            } else {
                format!(
                    "event #{} '{}' at {} is earlier than the previous event at {}",
                    index + 1,
                    entry.description,
                    format_mmss(time),
                    format_mmss(previous)
                )
            };
            return Err(ProducerError::ordering(path, message));
        }
        previous = time;

        let point = coerce_point(&entry.point, path).ok_or_else(|| {
            ProducerError::manifest(
                path,
                format!(
                    "event #{} '{}': Point must be an integer",
                    index + 1,
                    entry.description
                ),
            )
        })?;

        let elapsed = i64::try_from(time - game_start_offset).unwrap_or(i64::MAX);
        if !phase(elapsed).in_match() {
            warn!(
                "{}: '{}' tagged {}s after game start, outside the match",
                path.display(),
                entry.description,
                elapsed
            );
        }

        let event = Event::new(time, entry.description, point);
        if let Some(problem) = rules::audit(&event, elapsed) {
            warn!("{}: {problem}", path.display());
        }
        events.push(event);
    }

    Ok(VideoManifest {
        game_start_offset,
        events,
    })
}

/// Resolve a referenced file: as given first, then relative to the manifest folder.
fn resolve_path(field: &'static str, given: &str, base_dir: &Path) -> Result<PathBuf> {
    let as_given = PathBuf::from(given);
    if as_given.is_file() {
        return Ok(as_given);
    }

    let relative = base_dir.join(given);
    if relative.is_file() {
        return Ok(relative);
    }

    Err(ProducerError::PathResolution {
        field,
        given: given.to_string(),
        base: base_dir.to_path_buf(),
    })
}

fn team_number(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Coerce a point value to an integer.
///
/// `Some(None)` is a marker event (null or absent point); `None` means the
/// value cannot be read as an integer. Fractional numbers are truncated
/// toward zero.
#[allow(clippy::option_option, clippy::cast_possible_truncation)]
fn coerce_point(value: &Value, path: &Path) -> Option<Option<i64>> {
    match value {
        Value::Null => Some(None),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(Some(i));
            }
            let f = n.as_f64()?;
            if !f.is_finite() || f.abs() >= 9.0e15 {
                return None;
            }
            let truncated = f.trunc() as i64;
            if f.fract() != 0.0 {
                warn!(
                    "{}: Point {f} is not a whole number, using {truncated}",
                    path.display()
                );
            }
            Some(Some(truncated))
        }
        Value::String(s) => s.trim().parse::<i64>().ok().map(Some),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<VideoManifest> {
        parse_video_manifest(text, Path::new("team.yml"))
    }

    #[test]
    fn test_parse_video_manifest() {
        let manifest = parse(
            r#"
GameStartOffset: "01:00"
GameEvents:
  - Time: "01:10"
    Description: Robot Parked
    Point: 5
  - Time: 95
    Description: Minor Penalty, contact
    Point: "-10"
"#,
        )
        .unwrap();

        assert_eq!(manifest.game_start_offset, 60);
        assert_eq!(manifest.events.len(), 2);
        assert_eq!(manifest.events[0], Event::new(70, "Robot Parked", Some(5)));
        assert_eq!(manifest.events[1].time, 95);
        assert_eq!(manifest.events[1].point, Some(-10));
        assert_eq!(manifest.total_points(), -5);
    }

    #[test]
    fn test_null_and_missing_points_are_markers() {
        let manifest = parse(
            r#"
GameStartOffset: 10
GameEvents:
  - Time: "00:15"
    Description: Driver switch
    Point: null
  - Time: "00:16"
    Description: Note
"#,
        )
        .unwrap();
        assert_eq!(manifest.events[0].point, None);
        assert_eq!(manifest.events[1].point, None);
    }

    #[test]
    fn test_integral_float_point_is_accepted() {
        let manifest = parse(
            r#"
GameStartOffset: 0
GameEvents:
  - Time: 3
    Description: Power Shot Target Knocked
    Point: 15.0
"#,
        )
        .unwrap();
        assert_eq!(manifest.events[0].point, Some(15));
    }

    #[test]
    fn test_fractional_point_is_truncated() {
        let manifest = parse(
            r#"
GameStartOffset: 0
GameEvents:
  - Time: 3
    Description: Partial Park
    Point: 5.7
  - Time: 4
    Description: Partial Penalty
    Point: -9.5
"#,
        )
        .unwrap();
        assert_eq!(manifest.events[0].point, Some(5));
        assert_eq!(manifest.events[1].point, Some(-9));
    }

    #[test]
    fn test_huge_event_time_is_post_match() {
        let manifest = parse(
            "GameStartOffset: 0\nGameEvents:\n  - Time: 18446744073709551610\n    Description: Late\n    Point: 5\n",
        )
        .unwrap();
        assert_eq!(manifest.events[0].time, 18_446_744_073_709_551_610);
    }

    #[test]
    fn test_non_integer_point_rejected() {
        let err = parse(
            r#"
GameStartOffset: 0
GameEvents:
  - Time: 3
    Description: Bad
    Point: lots
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ProducerError::Manifest { .. }));
    }

    #[test]
    fn test_decreasing_times_rejected() {
        let err = parse(
            r#"
GameStartOffset: "00:10"
GameEvents:
  - Time: "00:40"
    Description: A
    Point: 5
  - Time: "00:30"
    Description: B
    Point: 5
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ProducerError::OrderingViolation { .. }));
        assert!(err.to_string().contains("earlier than the previous event"));
    }

    #[test]
    fn test_event_before_game_start_rejected() {
        let err = parse(
            r#"
GameStartOffset: "00:30"
GameEvents:
  - Time: "00:20"
    Description: Early
    Point: 5
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ProducerError::OrderingViolation { .. }));
        assert!(err.to_string().contains("precedes GameStartOffset"));
    }

    #[test]
    fn test_equal_times_allowed() {
        let manifest = parse(
            r#"
GameStartOffset: "00:30"
GameEvents:
  - Time: "00:30"
    Description: A
    Point: 5
  - Time: "00:30"
    Description: B
    Point: 6
"#,
        )
        .unwrap();
        assert_eq!(manifest.events.len(), 2);
    }

    #[test]
    fn test_offset_ceiling() {
        let err = parse("GameStartOffset: \"60:00\"\nGameEvents: []\n").unwrap_err();
        assert!(matches!(err, ProducerError::Manifest { .. }));
        assert!(parse("GameStartOffset: \"59:59\"\nGameEvents: []\n").is_ok());
    }

    #[test]
    fn test_bad_timestamp_text() {
        let err = parse("GameStartOffset: \"1m30s\"\nGameEvents: []\n").unwrap_err();
        assert!(matches!(err, ProducerError::TimestampFormat { .. }));
    }

    #[test]
    fn test_missing_field_is_manifest_error() {
        let err = parse("GameEvents: []\n").unwrap_err();
        assert!(matches!(err, ProducerError::Manifest { .. }));
        assert!(err.to_string().contains("GameStartOffset"));
    }

    #[test]
    fn test_team_number_forms() {
        assert_eq!(team_number(&Value::from(16031u64)), Some("16031".to_string()));
        assert_eq!(team_number(&Value::from(" 8565 ")), Some("8565".to_string()));
        assert_eq!(team_number(&Value::Null), None);
    }

    #[test]
    fn test_resolve_path_prefers_as_given() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("red1.mp4");
        std::fs::write(&file, b"").unwrap();

        let absolute = file.to_string_lossy().into_owned();
        assert_eq!(
            resolve_path("Location", &absolute, Path::new("/nonexistent")).unwrap(),
            file
        );
        assert_eq!(resolve_path("Location", "red1.mp4", dir.path()).unwrap(), file);
        assert!(matches!(
            resolve_path("Location", "blue1.mp4", dir.path()),
            Err(ProducerError::PathResolution { .. })
        ));
    }
}
