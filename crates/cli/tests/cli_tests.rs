use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn picturedb(file: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_picturedb"))
        .arg("--file")
        .arg(file)
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run picturedb")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn insert(file: &Path, id: &str, lon: &str, lat: &str, title: &str) -> Output {
    picturedb(
        file,
        &[
            "insert",
            "--id",
            id,
            "--timestamp",
            "2020-05-12 19:29:05",
            "--lon",
            lon,
            "--lat",
            lat,
            "--title",
            title,
            "--url",
            "https://static.example.org/pic.jpg",
        ],
    )
}

#[test]
fn test_missing_file_exit_code() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("missing.csv");
    let out = picturedb(&file, &["count"]);
    assert_eq!(out.status.code(), Some(4));
    assert!(!file.exists());
}

#[test]
fn test_create_flag_and_crud() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("db").join("picture-data.csv");

    let out = picturedb(&file, &["--create", "count"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out).trim(), "0");

    assert!(insert(&file, "1", "0.0", "0.0", "Great Bori").status.success());
    assert!(insert(&file, "2", "-8.5", "47.25", "Lake").status.success());

    let raw = fs::read_to_string(&file).unwrap();
    assert!(raw.starts_with(
        "1; 2020-05-12 19:29:05; 0.0; 0.0; Great Bori; https://static.example.org/pic.jpg"
    ));

    let out = picturedb(&file, &["get", "2"]);
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_str(stdout(&out).trim()).unwrap();
    assert_eq!(json["title"], "Lake");
    assert_eq!(json["longitude"], -8.5);

    let out = picturedb(&file, &["near", "--lon", "-8", "--lat", "47", "--deviation", "1"]);
    assert_eq!(stdout(&out).lines().count(), 1);

    let out = picturedb(&file, &["delete", "--id", "1"]);
    assert!(out.status.success());
    let out = picturedb(&file, &["list"]);
    assert_eq!(stdout(&out).lines().count(), 1);
}

#[test]
fn test_not_found_exit_code() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("picture-data.csv");
    fs::write(&file, "").unwrap();

    assert_eq!(picturedb(&file, &["get", "nope"]).status.code(), Some(2));
    assert_eq!(picturedb(&file, &["delete", "--id", "nope"]).status.code(), Some(2));
    let out = insert(&file, "x", "1", "1", "t");
    assert!(out.status.success());
    let out = picturedb(
        &file,
        &[
            "update", "--id", "y", "--lon", "1", "--lat", "1", "--title", "t", "--url",
            "https://example.org/",
        ],
    );
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_parse_error_exit_code() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("picture-data.csv");
    fs::write(&file, "this is not a record\n").unwrap();
    assert_eq!(picturedb(&file, &["list"]).status.code(), Some(3));
    // count does not decode
    let out = picturedb(&file, &["count"]);
    assert_eq!(stdout(&out).trim(), "1");
}

#[test]
fn test_delete_ignores_malformed_lines() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("picture-data.csv");
    fs::write(&file, "garbage\n").unwrap();
    assert!(insert(&file, "1", "0.0", "0.0", "Great Bori").status.success());

    // Reads fail on the first line, delete only looks at ids.
    assert_eq!(picturedb(&file, &["get", "1"]).status.code(), Some(3));
    let out = picturedb(&file, &["delete", "--id", "1"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read_to_string(&file).unwrap().trim_end(), "garbage");

    let out = picturedb(&file, &["delete", "--id", "1"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_rejects_unpadded_timestamp() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("picture-data.csv");
    fs::write(&file, "").unwrap();
    let out = picturedb(
        &file,
        &[
            "insert", "--id", "1", "--timestamp", "2020-5-1 1:2:3", "--lon", "0", "--lat", "0",
            "--title", "t", "--url", "https://example.org/",
        ],
    );
    assert!(!out.status.success());
    assert_eq!(fs::read_to_string(&file).unwrap(), "");
}
