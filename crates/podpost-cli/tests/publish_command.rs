use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn get_podpost_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("podpost")
}

const ENV_VARS: &[&str] = &[
    "EPISODE_FILE",
    "AUDIO_FILE",
    "LOAD_THUMBNAIL",
    "THUMBNAIL_FILE",
    "ANCHOR_EMAIL",
    "ANCHOR_PASSWORD",
    "SAVE_AS_DRAFT",
    "SET_PUBLISH_DATE",
    "IS_EXPLICIT",
    "URL_IN_DESCRIPTION",
    "PUPETEER_HEADLESS",
    "UPLOAD_TIMEOUT",
    "PODPOST_CONSOLE_URL",
];

/// podpost command isolated from the caller's environment
fn podpost() -> Command {
    let mut cmd = Command::new(get_podpost_bin());
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn episode_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

const SCENARIO_A: &str = r#"{
    "title": "Ep 1",
    "description": "Hello",
    "url": "http://x",
    "uploadDate": {"year": 2023, "month": "March", "day": "05"}
}"#;

#[test]
fn test_publish_command_help() {
    let mut cmd = podpost();
    cmd.arg("publish").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Upload and publish one episode"))
        .stdout(predicate::str::contains("--audio-file"))
        .stdout(predicate::str::contains("--draft"))
        .stdout(predicate::str::contains("--set-publish-date"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("ANCHOR_EMAIL"));
}

#[test]
fn test_dry_run_publish_now() {
    let episode = episode_file(SCENARIO_A);

    let mut cmd = podpost();
    cmd.arg("publish")
        .arg("--episode")
        .arg(episode.path())
        .arg("--audio-file")
        .arg("a.mp3")
        .arg("--url-in-description")
        .arg("--dry-run");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Disposition: publish now"))
        .stdout(predicate::str::contains("    Hello\n    http://x"))
        .stdout(predicate::str::contains("set publish date").not())
        .stdout(predicate::str::contains("upload artwork").not())
        .stdout(predicate::str::contains("Dry run"));
}

#[test]
fn test_dry_run_scheduled_from_env() {
    let episode = episode_file(SCENARIO_A);

    let mut cmd = podpost();
    cmd.env("EPISODE_FILE", episode.path())
        .env("AUDIO_FILE", "a.mp3")
        .env("SET_PUBLISH_DATE", "true")
        .arg("publish")
        .arg("--dry-run");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Disposition: scheduled"))
        .stdout(predicate::str::contains("Publish on:  5 March 2023"))
        .stdout(predicate::str::contains("set publish date"));
}

#[test]
fn test_dry_run_draft_overrides_schedule() {
    let episode = episode_file(SCENARIO_A);

    let mut cmd = podpost();
    cmd.arg("publish")
        .arg("--episode")
        .arg(episode.path())
        .arg("--audio-file")
        .arg("a.mp3")
        .arg("--set-publish-date")
        .arg("--publish-date")
        .arg("2024-01-09")
        .arg("--draft")
        .arg("--dry-run");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Disposition: draft"))
        .stdout(predicate::str::contains("Publish on:  9 January 2024"));
}

#[test]
fn test_missing_audio_file_fails() {
    let episode = episode_file(SCENARIO_A);

    let mut cmd = podpost();
    cmd.arg("publish")
        .arg("--episode")
        .arg(episode.path())
        .arg("--dry-run");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No audio file given"));
}

#[test]
fn test_invalid_episode_file_fails() {
    let episode = episode_file(r#"{"description": "no title"}"#);

    let mut cmd = podpost();
    cmd.arg("publish")
        .arg("--episode")
        .arg(episode.path())
        .arg("--audio-file")
        .arg("a.mp3")
        .arg("--dry-run");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Could not load"));
}

#[test]
fn test_missing_credentials_fail_before_browser() {
    let episode = episode_file(SCENARIO_A);

    let mut cmd = podpost();
    cmd.arg("publish")
        .arg("--episode")
        .arg(episode.path())
        .arg("--audio-file")
        .arg("a.mp3");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("email is empty"));
}
