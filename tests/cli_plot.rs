//! End-to-end tests of the `yoda-plot` binary.
//!
//! Every run passes `--no-show` so no image viewer is launched; stdin is
//! closed, so the exit prompt returns immediately.

use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn yoda_plot() -> Command {
    Command::cargo_bin("yoda-plot").expect("binary should be built")
}

/// Copy a fixture into a fresh directory so outputs written next to it are isolated
fn staged_fixture(name: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    std::fs::copy(fixture_path(name), &path).expect("Failed to copy fixture");
    (dir, path)
}

fn run_json(input: &Path, extra: &[&str]) -> serde_json::Value {
    let output = yoda_plot()
        .arg(input)
        .args(["--no-show", "--format", "json"])
        .args(extra)
        .output()
        .expect("Failed to run yoda-plot");
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
}

#[test]
fn test_default_prefix_selected() {
    yoda_plot()
        .arg(fixture_path("default.yoda"))
        .arg("--no-show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Prefix: (none)"))
        .stdout(predicate::str::contains("Title: 1000 events\n"));
}

#[test]
fn test_raw_selected_when_default_is_empty() {
    yoda_plot()
        .arg(fixture_path("raw_only.yoda"))
        .arg("--no-show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: 2000 events (/RAW)"))
        .stdout(predicate::str::contains("(none): only 0.000 effective entries"));
}

#[test]
fn test_reference_selected_when_only_reference_has_data() {
    let summary = run_json(&fixture_path("ref_only.yoda"), &[]);
    assert_eq!(summary["prefix"], "/REF");
    assert_eq!(summary["title"], "300 events (/REF)");
    assert_eq!(summary["rejected"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_raw_flag_prefers_raw() {
    let summary = run_json(&fixture_path("default.yoda"), &["--raw"]);
    assert_eq!(summary["prefix"], "/RAW");
    assert_eq!(summary["events"], 2000.0);
    assert_eq!(
        summary["histogram"],
        "/RAW/ALICE_YYYY_I1234567/d01-x01-y01"
    );
}

#[test]
fn test_no_flags_prefer_finalized() {
    let summary = run_json(&fixture_path("all_prefixes.yoda"), &[]);
    assert_eq!(summary["prefix"], "");
    assert_eq!(summary["title"], "1000 events");
    assert_eq!(summary["rejected"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_reference_flag_prefers_reference() {
    let summary = run_json(&fixture_path("all_prefixes.yoda"), &["-R"]);
    assert_eq!(summary["prefix"], "/REF");
    assert_eq!(summary["title"], "300 events (/REF)");
    assert_eq!(
        summary["histogram"],
        "/REF/ALICE_YYYY_I1234567/d01-x01-y01"
    );
}

#[test]
fn test_both_flags_prefer_raw() {
    let summary = run_json(&fixture_path("all_prefixes.yoda"), &["-r", "-R"]);
    assert_eq!(summary["prefix"], "/RAW");
    assert_eq!(summary["title"], "2000 events (/RAW)");
}

#[test]
fn test_histogram_title_in_summary() {
    let summary = run_json(&fixture_path("all_prefixes.yoda"), &[]);
    assert_eq!(
        summary["histogram_title"],
        "Charged-particle pseudorapidity density"
    );
    assert_eq!(summary["events_err"].as_f64().map(f64::round), Some(32.0));
    assert_eq!(summary["event_entries"], 1000.0);

    yoda_plot()
        .arg(fixture_path("all_prefixes.yoda"))
        .arg("--no-show")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Histogram title: Charged-particle pseudorapidity density",
        ))
        .stdout(predicate::str::contains("Events: 1000 ± 31.62 (1000 entries)"));
}

#[test]
fn test_histogram_not_found_is_reported() {
    yoda_plot()
        .arg(fixture_path("no_match.yoda"))
        .arg("--no-show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Histogram not found in"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_other_histogram_by_name() {
    let summary = run_json(
        &fixture_path("no_match.yoda"),
        &["--histogram", "/ALICE_YYYY_I1234567/d02-x01-y01"],
    );
    assert_eq!(summary["prefix"], "");
    assert_eq!(summary["bins"], 10);
}

#[test]
fn test_no_data_is_reported() {
    yoda_plot()
        .arg(fixture_path("empty.yoda"))
        .arg("--no-show")
        .assert()
        .success()
        .stdout(predicate::str::contains("No analysis objects read from"));
}

#[test]
fn test_malformed_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.yoda");
    std::fs::write(&path, "BEGIN YODA_COUNTER_V2 /_EVTCOUNT\n---\n1 1 1\n").unwrap();

    yoda_plot()
        .arg(&path)
        .arg("--no-show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed to read"))
        .stdout(predicate::str::contains("Unterminated block"));
}

#[test]
fn test_yoda2_file() {
    let summary = run_json(&fixture_path("yoda2.yoda"), &[]);
    assert_eq!(summary["title"], "500 events");
    assert_eq!(summary["bins"], 4);
}

#[test]
fn test_gzip_input() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Rivet.yoda.gz");
    let text = std::fs::read(fixture_path("raw_only.yoda")).unwrap();

    let file = std::fs::File::create(&path).unwrap();
    let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    encoder.write_all(&text).unwrap();
    encoder.finish().unwrap();

    let summary = run_json(&path, &[]);
    assert_eq!(summary["prefix"], "/RAW");
}

#[test]
fn test_save_writes_png_with_input_stem() {
    let (dir, input) = staged_fixture("default.yoda");

    yoda_plot()
        .arg(&input)
        .args(["--no-show", "--save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved:"));

    let png = dir.path().join("default.png");
    assert!(png.exists(), "expected {}", png.display());
    let bytes = std::fs::read(&png).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
}

#[test]
fn test_no_png_without_save() {
    let (dir, input) = staged_fixture("default.yoda");

    yoda_plot()
        .arg(&input)
        .arg("--no-show")
        .assert()
        .success();

    assert!(!dir.path().join("default.png").exists());
}

#[test]
fn test_list_objects() {
    yoda_plot()
        .arg(fixture_path("ref_only.yoda"))
        .args(["--list", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("type\tpath"))
        .stdout(predicate::str::contains(
            "Histo1D\t/REF/ALICE_YYYY_I1234567/d01-x01-y01",
        ))
        .stdout(predicate::str::contains("Counter\t/REF/_EVTCOUNT"))
        .stdout(predicate::str::contains("Estimate\t/REF/_XSEC"));
}

#[test]
fn test_exit_hint_on_stderr() {
    yoda_plot()
        .arg(fixture_path("default.yoda"))
        .arg("--no-show")
        .assert()
        .success()
        .stderr(predicate::str::contains("Type Ctrl-D or press Enter to end"));
}

#[test]
fn test_missing_input_is_usage_error() {
    yoda_plot()
        .arg("/nonexistent/AO2D.yoda")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such file"));
}
