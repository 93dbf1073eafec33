//! Integration tests for producing a match from the command line.
//!
//! ffmpeg is replaced through the config file: `--dry-run` never starts it,
//! and the end-to-end runs use `true` / `false` as stand-ins.

#![allow(deprecated)] // cargo_bin deprecation, replacement not yet stable

mod common;

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

use common::MatchFolder;

fn producer() -> Command {
    Command::cargo_bin("game-producer").expect("binary 'game-producer' should be built")
}

/// Write a config file pointing ffmpeg at `program` and captions into the
/// match folder.
fn config(folder: &MatchFolder, program: &str) -> PathBuf {
    let path = folder.file("config.toml");
    fs::write(
        &path,
        format!(
            "ffmpeg = \"{program}\"\ncaption_dir = \"{}\"\n",
            folder.path().display()
        ),
    )
    .expect("write config");
    path
}

// ─── Dry run ─────────────────────────────────────────────────────────────────

#[test]
fn dry_run_prints_command() {
    let folder = MatchFolder::new();
    let config = config(&folder, "ffmpeg");

    producer()
        .arg(&folder.manifest)
        .arg("out.mkv")
        .arg("--dry-run")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ffmpeg -hide_banner -y -ss 0 -i "))
        .stdout(predicate::str::contains("amerge=inputs=4[a]"))
        .stdout(predicate::str::contains("FTC #8565"))
        .stdout(predicate::str::ends_with("-f matroska out.mkv\n"))
        .stderr(predicate::str::contains("Qualification 12"));

    assert!(!folder.file("qual12_0.srt").exists());
}

#[test]
fn dry_run_is_deterministic() {
    let folder = MatchFolder::new();
    let config = config(&folder, "ffmpeg");
    let run = || {
        producer()
            .arg(&folder.manifest)
            .arg("-")
            .arg("--dry-run")
            .arg("--config")
            .arg(&config)
            .output()
            .expect("run game-producer")
            .stdout
    };

    let first = run();
    assert!(!first.is_empty());
    assert_eq!(first, run());
}

#[test]
fn stdout_output_has_no_overwrite_flag() {
    let folder = MatchFolder::new();
    let config = config(&folder, "ffmpeg");

    producer()
        .arg(&folder.manifest)
        .arg("-")
        .arg("--dry-run")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains(" -y ").not())
        .stdout(predicate::str::ends_with(" -f matroska -\n"));
}

// ─── Validation failures ─────────────────────────────────────────────────────

#[test]
fn bad_timestamp_fails() {
    let mut teams = common::TEAMS;
    teams[2].3 = "1m30s";
    let folder = MatchFolder::with_teams(&teams);
    let config = config(&folder, "ffmpeg");

    producer()
        .arg(&folder.manifest)
        .arg("out.mkv")
        .arg("--dry-run")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("'1m30s' is not MM:SS"));
}

#[test]
fn missing_config_file_fails() {
    let folder = MatchFolder::new();

    producer()
        .arg(&folder.manifest)
        .arg("out.mkv")
        .arg("--dry-run")
        .arg("--config")
        .arg(folder.file("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

// ─── Full run ────────────────────────────────────────────────────────────────

#[cfg(unix)]
#[test]
fn successful_run_removes_captions() {
    let folder = MatchFolder::new();
    let config = config(&folder, "true");

    producer()
        .arg(&folder.manifest)
        .arg(folder.file("out.mkv"))
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stderr(predicate::str::contains("Blue 15 - Red -5"));

    for i in 0..4 {
        assert!(!folder.file(&format!("qual12_{i}.srt")).exists());
    }
}

#[cfg(unix)]
#[test]
fn engine_failure_is_reported_and_captions_removed() {
    let folder = MatchFolder::new();
    let config = config(&folder, "false");

    producer()
        .arg(&folder.manifest)
        .arg(folder.file("out.mkv"))
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("ffmpeg exited with status"));

    for i in 0..4 {
        assert!(!folder.file(&format!("qual12_{i}.srt")).exists());
    }
}

#[test]
fn unavailable_engine_fails_before_writing_captions() {
    let folder = MatchFolder::new();
    let config = config(&folder, "/nonexistent/ffmpeg");

    producer()
        .arg(&folder.manifest)
        .arg(folder.file("out.mkv"))
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot start /nonexistent/ffmpeg"));

    assert!(!folder.file("qual12_0.srt").exists());
}
