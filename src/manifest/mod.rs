//! Match and video manifests
//!
//! A match manifest lists four teams; each team's video manifest records when
//! the match began in that team's recording and the events tagged in it.
//!
//! ```yaml
//! VirtualGame:
//!   Name: Match 12
//!   Teams:
//!     - TeamName: Gearheads
//!       TeamNumber: 16031
//!       Alliance: Red
//!       GameVideo:
//!         Location: red1.mp4
//!         VideoManifest: red1.yml
//! ```

mod loader;
mod model;
pub mod timestamp;

pub use loader::{load_match, load_video_manifest, parse_video_manifest};
pub use model::{Alliance, Event, Match, Team, VideoManifest};

/// Sanity ceiling for offsets and caption tracks, in seconds.
///
/// Offsets at or past this are almost always minutes and seconds swapped.
pub const MAX_OFFSET: u64 = 3600;
