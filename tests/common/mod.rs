//! Match folder fixtures shared by the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// `(number, name, alliance, GameStartOffset, events)` for each team
pub const TEAMS: [(&str, &str, &str, &str, &str); 4] = [
    (
        "16031",
        "Parabellum",
        "Red",
        "01:00",
        r#"
  - Time: "01:00"
    Description: Game Start
    Point: 0
  - Time: "01:10"
    Description: Robot Parked
    Point: 5
"#,
    ),
    (
        "8565",
        "TechnicBots",
        "Blue",
        "00:50",
        r#"
  - Time: "00:55"
    Description: Wobble Goal Delivered to Target Zone
    Point: 15
  - Time: "00:58"
    Description: Driver Switch
    Point: null
"#,
    ),
    (
        "11115",
        "Gluten Free",
        "Red",
        "00:52",
        r#"
  - Time: 80
    Description: Minor Penalty, contact
    Point: -10
"#,
    ),
    (
        "7244",
        "Out of the Box",
        "Blue",
        "00:57",
        " []\n",
    ),
];

/// A match folder with four empty "videos" and their manifests.
pub struct MatchFolder {
    pub dir: TempDir,
    pub manifest: PathBuf,
}

impl MatchFolder {
    pub fn new() -> Self {
        Self::with_teams(&TEAMS)
    }

    pub fn with_teams(teams: &[(&str, &str, &str, &str, &str)]) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut manifest = String::from("VirtualGame:\n  Name: Qualification 12\n  Teams:\n");

        for (i, (number, name, alliance, offset, events)) in teams.iter().enumerate() {
            let video = format!("team{i}.mp4");
            let video_manifest = format!("team{i}.yml");
            fs::write(dir.path().join(&video), b"").expect("write video");
            fs::write(
                dir.path().join(&video_manifest),
                format!("GameStartOffset: \"{offset}\"\nGameEvents:{events}"),
            )
            .expect("write video manifest");

            manifest.push_str(&format!(
                "    - TeamName: {name}\n      TeamNumber: {number}\n      Alliance: {alliance}\n      \
                 GameVideo:\n        Location: {video}\n        VideoManifest: {video_manifest}\n"
            ));
        }

        let path = dir.path().join("qual12.yml");
        fs::write(&path, manifest).expect("write match manifest");
        Self {
            dir,
            manifest: path,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
