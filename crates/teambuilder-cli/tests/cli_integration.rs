//! CLI Integration Tests
//!
//! These tests verify the CLI commands work correctly end-to-end.
//! They test the "wiring" between the CLI and the core library.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// `{"n":"Test","d":"","m":"mode1","t":[["c1",null,null,null]]}` as the browser encodes it
const TEST_TOKEN: &str = "JTdCJTIybiUyMiUzQSUyMlRlc3QlMjIlMkMlMjJkJTIyJTNBJTIyJTIyJTJDJTIybSUyMiUzQSUyMm1vZGUxJTIyJTJDJTIydCUyMiUzQSU1QiU1QiUyMmMxJTIyJTJDbnVsbCUyQ251bGwlMkNudWxsJTVEJTVEJTdE";

/// Create a CLI command with a temporary data directory
fn cli_cmd(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("teambuilder").expect("Failed to find teambuilder binary");
    cmd.arg("--data-dir").arg(data_dir.path());
    cmd
}

/// Write a small roster next to the data directory
fn write_catalog(data_dir: &TempDir) -> PathBuf {
    let path = data_dir.path().join("characters.json");
    let roster = serde_json::json!([
        {"id": "3003", "name": "Sonetto", "rarity": 6, "attribute": "Star",
         "damageType": "Mental", "specialties": ["Buff"], "tags": ["Support"]},
        {"id": "3004", "name": "Regulus", "rarity": 6, "attribute": "Star",
         "damageType": "Reality", "specialties": ["Attack"], "tags": ["Carry"]},
        {"id": 3010, "name": "Eternity", "rarity": 6, "attribute": "Beast",
         "damageType": "Mental", "specialties": ["Attack", "Buff"], "tags": ["Carry"]}
    ]);
    std::fs::write(&path, roster.to_string()).unwrap();
    path
}

/// Extract team ID from CLI output (assumes format: "ID: <id>")
fn extract_team_id(output: &str) -> Option<String> {
    for line in output.lines() {
        if let Some(id_part) = line.strip_prefix("  ID: ") {
            return Some(id_part.trim().to_string());
        }
    }
    None
}

/// Encode a team and return the bare token
fn encode(data_dir: &TempDir, args: &[&str]) -> String {
    let output = cli_cmd(data_dir)
        .arg("encode")
        .args(args)
        .output()
        .expect("Failed to run encode");
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Save a token under a name and return the new team id
fn save_team(data_dir: &TempDir, name: &str, token: &str) -> String {
    let output = cli_cmd(data_dir)
        .args(["team", "save", name, token])
        .output()
        .expect("Failed to save team");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    extract_team_id(&stdout).expect("Failed to extract team ID")
}

// ============================================================================
// Layout Command Tests
// ============================================================================

#[test]
fn test_layout_limbo() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["layout", "limbo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parties: 2"))
        .stdout(predicate::str::contains("Total slots: 8"))
        .stdout(predicate::str::contains("Party B: slots 4-7"));
}

#[test]
fn test_layout_unknown_mode_fails() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["layout", "mode2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid mode"));
}

// ============================================================================
// Encode / Decode Command Tests
// ============================================================================

#[test]
fn test_encode_matches_browser_token() {
    let data_dir = TempDir::new().unwrap();

    let token = encode(&data_dir, &["--name", "Test", "--slot", "c1"]);
    assert_eq!(token, TEST_TOKEN);
}

#[test]
fn test_encode_with_base_prints_link() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["encode", "--name", "Test", "--slot", "c1"])
        .args(["--base", "https://example.com/builder/#old"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("https://example.com/builder/#{}\n", TEST_TOKEN)));
}

#[test]
fn test_encode_too_many_slots_fails() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["encode", "--mode", "mode1"])
        .args(["--slot", "a", "--slot", "b", "--slot", "c", "--slot", "d", "--slot", "e"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Too many slots"));
}

#[test]
fn test_decode_without_catalog_prints_raw_ids() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["decode", TEST_TOKEN])
        .assert()
        .success()
        .stdout(predicate::str::contains("Team: Test"))
        .stdout(predicate::str::contains("Mode: mode1"))
        .stdout(predicate::str::contains("Team #1"))
        .stdout(predicate::str::contains("c1"));
}

#[test]
fn test_decode_link_with_catalog_resolves_and_clears() {
    let data_dir = TempDir::new().unwrap();
    let catalog = write_catalog(&data_dir);

    let link = encode(
        &data_dir,
        &[
            "--mode", "limbo", "--name", "Mixed", "--slot", "3003", "--slot", "9999", "--slot",
            "-", "--slot", "-", "--slot", "3010", "--base", "https://example.com/",
        ],
    );

    cli_cmd(&data_dir)
        .arg("--catalog")
        .arg(&catalog)
        .args(["decode", &link])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sonetto (3003)"))
        .stdout(predicate::str::contains("- (unknown: 9999)"))
        .stdout(predicate::str::contains("Eternity (3010)"))
        .stdout(predicate::str::contains("Party B #1"))
        .stdout(predicate::str::contains("Characters: 3"));
}

#[test]
fn test_decode_malformed_fails() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["decode", "definitely not a code"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed"));
}

#[test]
fn test_decode_link_without_fragment_fails() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["decode", "https://example.com/#"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No team code"));
}

// ============================================================================
// Characters Command Tests
// ============================================================================

#[test]
fn test_characters_requires_catalog() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .arg("characters")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--catalog"));
}

#[test]
fn test_characters_filters() {
    let data_dir = TempDir::new().unwrap();
    let catalog = write_catalog(&data_dir);

    cli_cmd(&data_dir)
        .arg("--catalog")
        .arg(&catalog)
        .args(["characters", "--attribute", "star", "--specialty", "Attack"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Characters (1):"))
        .stdout(predicate::str::contains("Regulus"))
        .stdout(predicate::str::contains("Sonetto").not());

    cli_cmd(&data_dir)
        .arg("--catalog")
        .arg(&catalog)
        .args(["characters", "--search", "nobody"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No characters found."));
}

// ============================================================================
// Team Command Tests
// ============================================================================

#[test]
fn test_team_list_empty() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["team", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved teams."));
}

#[test]
fn test_team_save_and_list() {
    let data_dir = TempDir::new().unwrap();

    let id = save_team(&data_dir, "First", TEST_TOKEN);

    cli_cmd(&data_dir)
        .args(["team", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved teams (1):"))
        .stdout(predicate::str::contains(&id))
        .stdout(predicate::str::contains("First [mode1] 1 characters"));
}

#[test]
fn test_team_save_blank_name_fails() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["team", "save", "   ", TEST_TOKEN])
        .assert()
        .failure();

    cli_cmd(&data_dir)
        .args(["team", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved teams."));
}

#[test]
fn test_team_ids_are_distinct() {
    let data_dir = TempDir::new().unwrap();

    let first = save_team(&data_dir, "One", TEST_TOKEN);
    let second = save_team(&data_dir, "Two", TEST_TOKEN);
    assert_ne!(first, second);
}

#[test]
fn test_team_rename_keeps_description() {
    let data_dir = TempDir::new().unwrap();

    let output = cli_cmd(&data_dir)
        .args(["team", "save", "Old", TEST_TOKEN, "--description", "keep me"])
        .output()
        .unwrap();
    let id = extract_team_id(&String::from_utf8_lossy(&output.stdout)).unwrap();

    cli_cmd(&data_dir)
        .args(["team", "rename", &id, "New"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed team: New"));

    cli_cmd(&data_dir)
        .args(["team", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Team: New"))
        .stdout(predicate::str::contains("Description: keep me"));
}

#[test]
fn test_team_describe() {
    let data_dir = TempDir::new().unwrap();
    let id = save_team(&data_dir, "Notes", TEST_TOKEN);

    cli_cmd(&data_dir)
        .args(["team", "describe", &id, "rotation notes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved description."));

    cli_cmd(&data_dir)
        .args(["team", "describe", &id, "rotation notes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Description unchanged."));
}

#[test]
fn test_team_share_roundtrips_token() {
    let data_dir = TempDir::new().unwrap();
    let id = save_team(&data_dir, "Test", TEST_TOKEN);

    cli_cmd(&data_dir)
        .args(["team", "share", &id])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", TEST_TOKEN)));
}

#[test]
fn test_team_delete() {
    let data_dir = TempDir::new().unwrap();
    let id = save_team(&data_dir, "Doomed", TEST_TOKEN);

    cli_cmd(&data_dir)
        .args(["team", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted team"));

    cli_cmd(&data_dir)
        .args(["team", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("No team with id"));
}

#[test]
fn test_team_show_unknown_fails() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["team", "show", "12345"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Team not found"));
}

// ============================================================================
// QR Command Tests
// ============================================================================

#[test]
fn test_qr_writes_svg() {
    let data_dir = TempDir::new().unwrap();
    let output = data_dir.path().join("team.svg");

    cli_cmd(&data_dir)
        .args(["qr", "https://example.com/#abc", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote QR code"));

    let svg = std::fs::read_to_string(&output).unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn test_qr_terminal() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["qr", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}
