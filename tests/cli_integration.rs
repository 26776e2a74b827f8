// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Integration tests for the dappcanvas CLI commands

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// dappcanvas with an isolated data directory and no colors
fn dappcanvas(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dappcanvas").unwrap();
    cmd.env("DAPPCANVAS_DATA_DIR", data_dir.path())
        .env_remove("DAPPCANVAS_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

/// Run a command that must succeed and return its stdout
fn run_ok(data_dir: &TempDir, args: &[&str]) -> String {
    let output = dappcanvas(data_dir).args(args).assert().success();
    String::from_utf8_lossy(&output.get_output().stdout).to_string()
}

/// ID printed by `node add`
fn created_node_id(stdout: &str) -> String {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Created node: "))
        .and_then(|rest| rest.split_whitespace().next())
        .expect("node id in output")
        .to_string()
}

/// Current blueprint as exported JSON
fn exported(data_dir: &TempDir) -> Value {
    serde_json::from_str(&run_ok(data_dir, &["export", "--format", "json"])).unwrap()
}

#[test]
fn test_new_from_template() {
    let data_dir = TempDir::new().unwrap();

    dappcanvas(&data_dir)
        .args(["new", "--template", "token-launch", "--name", "gov-token"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gov-token"))
        .stdout(predicate::str::contains("suggestions: 3"));

    let doc = exported(&data_dir);
    assert_eq!(doc["nodes"].as_array().unwrap().len(), 4);
    assert_eq!(doc["edges"].as_array().unwrap().len(), 4);
    assert_eq!(doc["config"]["project"]["name"], "gov-token");
    assert_eq!(doc["config"]["network"]["chainId"], 421_614);
    assert_eq!(doc["status"], "draft");
}

#[test]
fn test_unknown_template_fails() {
    let data_dir = TempDir::new().unwrap();

    dappcanvas(&data_dir)
        .args(["new", "--template", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist"));
}

#[test]
fn test_node_and_edge_lifecycle() {
    let data_dir = TempDir::new().unwrap();
    run_ok(&data_dir, &["new"]);

    let token = created_node_id(&run_ok(
        &data_dir,
        &["node", "add", "erc20-stylus", "--json", r#"{"symbol":"CLI"}"#],
    ));
    let site = created_node_id(&run_ok(&data_dir, &["node", "add", "frontend-scaffold"]));

    dappcanvas(&data_dir)
        .args(["edge", "add", "--from", &token, "--to", &site])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created edge"));

    // Second add is a no-op
    dappcanvas(&data_dir)
        .args(["edge", "add", "--from", &token, "--to", &site])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    dappcanvas(&data_dir)
        .args(["edge", "add", "--from", &token, "--to", &token])
        .assert()
        .failure();

    let doc = exported(&data_dir);
    assert_eq!(doc["edges"].as_array().unwrap().len(), 1);
    assert_eq!(doc["nodes"][0]["config"]["symbol"], "CLI");
    assert_eq!(doc["nodes"][0]["config"]["decimals"], 18);

    // Removing the source cascades to the edge
    run_ok(&data_dir, &["node", "remove", &token]);
    let doc = exported(&data_dir);
    assert_eq!(doc["nodes"].as_array().unwrap().len(), 1);
    assert!(doc["edges"].as_array().unwrap().is_empty());
}

#[test]
fn test_node_prefix_resolution() {
    let data_dir = TempDir::new().unwrap();
    run_ok(&data_dir, &["new"]);
    let id = created_node_id(&run_ok(&data_dir, &["node", "add", "staking"]));

    dappcanvas(&data_dir)
        .args(["node", "move", &id[..8], "--x", "-120", "--y", "45"])
        .assert()
        .success();

    let doc = exported(&data_dir);
    assert_eq!(doc["nodes"][0]["position"]["x"], -120.0);
    assert_eq!(doc["nodes"][0]["position"]["y"], 45.0);
}

#[test]
fn test_layout_reflows_positions() {
    let data_dir = TempDir::new().unwrap();
    run_ok(&data_dir, &["new"]);
    let a = created_node_id(&run_ok(&data_dir, &["node", "add", "erc20-stylus", "--x", "999"]));
    let b = created_node_id(&run_ok(&data_dir, &["node", "add", "staking", "--y", "999"]));
    run_ok(&data_dir, &["edge", "add", "--from", &a, "--to", &b]);

    run_ok(&data_dir, &["layout"]);

    let doc = exported(&data_dir);
    assert_eq!(doc["nodes"][0]["position"]["x"], 0.0);
    assert_eq!(doc["nodes"][1]["position"]["x"], 300.0);
    assert_eq!(doc["nodes"][1]["position"]["y"], 0.0);
}

#[test]
fn test_export_dot() {
    let data_dir = TempDir::new().unwrap();
    run_ok(&data_dir, &["new", "--template", "dao"]);

    dappcanvas(&data_dir)
        .args(["export", "--format", "dot"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph blueprint {"))
        .stdout(predicate::str::contains("dao-governor"));
}

#[test]
fn test_export_unknown_format_fails() {
    let data_dir = TempDir::new().unwrap();
    run_ok(&data_dir, &["new"]);

    dappcanvas(&data_dir)
        .args(["export", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown export format"));
}

#[test]
fn test_import_round_trip() {
    let source_dir = TempDir::new().unwrap();
    run_ok(&source_dir, &["new", "--template", "nft-drop"]);
    let file = source_dir.path().join("exported.json");
    run_ok(
        &source_dir,
        &["export", "--format", "json", "--output", file.to_str().unwrap()],
    );

    let target_dir = TempDir::new().unwrap();
    dappcanvas(&target_dir)
        .args(["import", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 nodes, 4 edges"));

    let original = exported(&source_dir);
    let imported = exported(&target_dir);
    assert_eq!(imported["id"], original["id"]);
    assert_eq!(imported["nodes"], original["nodes"]);
    assert_eq!(imported["edges"], original["edges"]);
}

#[test]
fn test_malformed_import_keeps_blueprint() {
    let data_dir = TempDir::new().unwrap();
    run_ok(&data_dir, &["new", "--template", "token-launch"]);
    let before = exported(&data_dir);

    let bad = data_dir.path().join("bad.json");
    fs::write(&bad, r#"{"nodes": [{"id": "a"}], "edges": [], "config": {}}"#).unwrap();

    dappcanvas(&data_dir)
        .args(["import", bad.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to import"));

    let after = exported(&data_dir);
    assert_eq!(after["id"], before["id"]);
    assert_eq!(after["nodes"], before["nodes"]);
}

#[test]
fn test_ghost_activation() {
    let data_dir = TempDir::new().unwrap();
    run_ok(&data_dir, &["new", "--template", "token-launch"]);

    dappcanvas(&data_dir)
        .args(["ghost", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("multisig"))
        .stdout(predicate::str::contains("pending"));

    dappcanvas(&data_dir)
        .args(["ghost", "activate", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Activated multisig"));

    dappcanvas(&data_dir)
        .args(["ghost", "activate", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already active"));

    let doc = exported(&data_dir);
    assert_eq!(doc["nodes"].as_array().unwrap().len(), 5);
    assert_eq!(doc["edges"].as_array().unwrap().len(), 5);

    dappcanvas(&data_dir)
        .args(["ghost", "activate", "7"])
        .assert()
        .failure();
}

#[test]
fn test_reset_clears_everything() {
    let data_dir = TempDir::new().unwrap();
    run_ok(&data_dir, &["new", "--template", "dao"]);
    run_ok(&data_dir, &["reset"]);

    let doc = exported(&data_dir);
    assert!(doc["nodes"].as_array().unwrap().is_empty());
    assert!(doc["edges"].as_array().unwrap().is_empty());

    dappcanvas(&data_dir)
        .args(["ghost", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No suggestions"));
}

#[test]
fn test_templates_listing() {
    let data_dir = TempDir::new().unwrap();

    dappcanvas(&data_dir)
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("token-launch"))
        .stdout(predicate::str::contains("nft-drop"))
        .stdout(predicate::str::contains("price-feed-vault"))
        .stdout(predicate::str::contains("dao"));

    dappcanvas(&data_dir)
        .args(["templates", "price-feed-vault"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chainlink-price-feed"))
        .stdout(predicate::str::contains("Suggested:"));
}

#[test]
fn test_config_network_override() {
    let data_dir = TempDir::new().unwrap();
    let config_file = data_dir.path().join("dappcanvas.toml");
    fs::write(&config_file, "network = \"arbitrum-one\"\n").unwrap();

    dappcanvas(&data_dir)
        .args(["--config", config_file.to_str().unwrap(), "new"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Arbitrum One"));

    let doc = exported(&data_dir);
    assert_eq!(doc["config"]["network"]["chainId"], 42_161);
    assert_eq!(doc["config"]["network"]["isTestnet"], false);
}

#[test]
fn test_first_edit_uses_configured_network() {
    let data_dir = TempDir::new().unwrap();
    let config_file = data_dir.path().join("dappcanvas.toml");
    fs::write(&config_file, "network = \"localhost\"\n").unwrap();
    let config = config_file.to_str().unwrap();

    // No `new` first: the blueprint is created on demand
    dappcanvas(&data_dir)
        .args(["--config", config, "node", "add", "indexer"])
        .assert()
        .success();

    let doc = exported(&data_dir);
    assert_eq!(doc["config"]["network"]["chainId"], 412_346);
    assert_eq!(doc["nodes"].as_array().unwrap().len(), 1);
}

#[test]
fn test_reset_uses_configured_network() {
    let data_dir = TempDir::new().unwrap();
    let config_file = data_dir.path().join("dappcanvas.toml");
    fs::write(&config_file, "network = \"arbitrum-one\"\n").unwrap();
    let config = config_file.to_str().unwrap();

    run_ok(&data_dir, &["new", "--template", "dao"]);
    dappcanvas(&data_dir)
        .args(["--config", config, "reset"])
        .assert()
        .success();

    let doc = exported(&data_dir);
    assert!(doc["nodes"].as_array().unwrap().is_empty());
    assert_eq!(doc["config"]["network"]["chainId"], 42_161);
}

#[test]
fn test_completions() {
    let data_dir = TempDir::new().unwrap();

    dappcanvas(&data_dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dappcanvas"));
}
