//! End-to-end tests of the `covreport` binary.

use assert_cmd::Command;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn covreport(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_covreport"));
    cmd.current_dir(dir)
        .env_remove("COVREPORT_MAX_COLS")
        .env_remove("COVREPORT_LOG")
        .env_remove("RUST_LOG");
    cmd
}

fn write_resultset(dir: &Path) -> std::path::PathBuf {
    let mut coverage = serde_json::Map::new();
    coverage.insert(
        dir.join("lib/user.rb").display().to_string(),
        json!({ "lines": [1, 0, null, 1] }),
    );
    coverage.insert(
        dir.join("lib/order.rb").display().to_string(),
        json!({ "lines": [1, 1] }),
    );
    let content = json!({ "RSpec": { "coverage": coverage } });
    let path = dir.join(".resultset.json");
    fs::write(&path, content.to_string()).unwrap();
    path
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_prints_plain_table() {
    let dir = TempDir::new().unwrap();
    let coverage = write_resultset(dir.path());

    let stdout = stdout_of(
        covreport(dir.path())
            .arg("--color")
            .arg("never")
            .arg("--root")
            .arg(dir.path())
            .arg(&coverage),
    );

    let expected = [
        "",
        "----------|---------|----------|---------|---------|-------------------",
        "File      | % Stmts | % Branch | % Funcs | % Lines | Uncovered Line #s ",
        "----------|---------|----------|---------|---------|-------------------",
        "lib       |   66.67 |      100 |     100 |   66.67 |                   ",
        " order.rb |   100.0 |      100 |     100 |   100.0 |                   ",
        " user.rb  |   66.67 |      100 |     100 |   66.67 | 2                 ",
        "----------|---------|----------|---------|---------|-------------------",
        "All files |    80.0 |      100 |     100 |    80.0 |                   ",
        "----------|---------|----------|---------|---------|-------------------",
        "",
    ]
    .join("\n");
    assert_eq!(stdout, expected);
}

#[test]
fn test_relative_root_is_resolved_against_current_dir() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().canonicalize().unwrap();
    let coverage = write_resultset(&base);

    let stdout = stdout_of(
        covreport(&base)
            .args(["--color", "never", "--root", "."])
            .arg(&coverage),
    );
    let names: Vec<&str> = stdout
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('-'))
        .map(|line| line.split(" | ").next().unwrap_or("").trim_end())
        .collect();

    assert_eq!(names, vec!["File", "lib", " order.rb", " user.rb", "All files"]);
}

#[test]
fn test_config_file_settings_are_used() {
    let dir = TempDir::new().unwrap();
    let coverage = write_resultset(dir.path());
    fs::write(
        dir.path().join(".covreport.toml"),
        format!(
            "root = {:?}\n\n[report]\nskip_full = true\n",
            dir.path().display().to_string()
        ),
    )
    .unwrap();

    let stdout = stdout_of(covreport(dir.path()).args(["--color", "never"]).arg(&coverage));

    assert!(stdout.contains("\n user.rb "), "{stdout}");
    assert!(!stdout.contains("order.rb"), "{stdout}");
    assert!(stdout.contains("All files"));
}

#[test]
fn test_color_always_emits_ansi_codes() {
    let dir = TempDir::new().unwrap();
    let coverage = write_resultset(dir.path());

    let stdout = stdout_of(
        covreport(dir.path())
            .args(["--color", "always", "--root"])
            .arg(dir.path())
            .arg(&coverage),
    );

    assert!(stdout.contains("\x1b[33mlib      \x1b[0m"), "{stdout}");
    assert!(stdout.contains("\x1b[32m order.rb\x1b[0m"), "{stdout}");
}

#[test]
fn test_missing_coverage_file_prints_nothing() {
    let dir = TempDir::new().unwrap();

    let stdout = stdout_of(covreport(dir.path()).arg("coverage/.resultset.json"));
    assert_eq!(stdout, "");
}

#[test]
fn test_empty_tracefile_prints_nothing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("lcov.info"), "").unwrap();

    let stdout = stdout_of(covreport(dir.path()).arg("lcov.info"));
    assert_eq!(stdout, "");
}

#[test]
fn test_malformed_coverage_file_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("coverage.json"), "{ not json").unwrap();

    covreport(dir.path())
        .arg("coverage.json")
        .assert()
        .failure();
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();
    let coverage = write_resultset(dir.path());

    covreport(dir.path())
        .args(["--config", "missing.toml"])
        .arg(&coverage)
        .assert()
        .failure();
}
