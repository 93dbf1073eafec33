//! Match clock helpers: `MM:SS` parsing and caption timestamp formatting.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::Value;

use crate::error::{ProducerError, Result};

static MMSS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+):([0-9]+)$").expect("valid MM:SS pattern"));

/// Parse `MM:SS` text into whole seconds.
///
/// Seconds above 59 are accepted as written (`"00:75"` is 75 seconds), the
/// same way the tagging tool's files have always been read.
pub fn parse_mmss(text: &str) -> Result<u64> {
    let caps = MMSS_PATTERN
        .captures(text.trim())
        .ok_or_else(|| ProducerError::TimestampFormat {
            value: text.to_string(),
        })?;

    let overflow = || ProducerError::TimestampFormat {
        value: text.to_string(),
    };
    let minutes: u64 = caps[1].parse().map_err(|_| overflow())?;
    let seconds: u64 = caps[2].parse().map_err(|_| overflow())?;

    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(overflow)
}

/// Parse a manifest time value: `MM:SS` text or a pre-parsed number of seconds.
pub fn parse_time(value: &Value) -> Result<u64> {
    match value {
        Value::String(text) => parse_mmss(text),
        Value::Number(n) => n.as_u64().ok_or_else(|| ProducerError::TimestampFormat {
            value: n.to_string(),
        }),
        other => Err(ProducerError::TimestampFormat {
            value: describe(other),
        }),
    }
}

/// Format seconds as a caption timestamp (`HH:MM:SS.000`).
///
/// Hours are not wrapped; the millisecond field is always `000`.
pub fn format_caption_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}.000")
}

/// Format seconds as `MM:SS`, the form manifests are authored in.
pub fn format_mmss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn describe(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| format!("{value:?}"))
}
