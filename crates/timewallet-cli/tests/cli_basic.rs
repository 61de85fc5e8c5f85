//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Every test
//! runs against its own temporary data directory so tests can run in
//! parallel without sharing state.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against an isolated data directory and return output.
fn run_cli_in(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "timewallet-cli", "--quiet", "--"])
        .args(args)
        .env("TIMEWALLET_DATA_DIR", dir)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Add a card and return its id, parsed from the confirmation line.
fn add_card(dir: &Path, name: &str, package: &str) -> String {
    let output = run_cli_in(dir, &["card", "add", name, package]);
    assert_eq!(output.2, 0, "Card add failed: {}", output.1);
    output
        .0
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("Card added: "))
        .expect("missing confirmation line")
        .to_string()
}

#[test]
fn test_card_add() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli_in(dir.path(), &["card", "add", "Instagram", "com.instagram.android"]);
    assert_eq!(output.2, 0, "Card add failed: {}", output.1);
    assert!(output.0.contains("Card added:"));
    assert!(output.0.contains("com.instagram.android"));
}

#[test]
fn test_card_add_rejects_empty_name() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli_in(dir.path(), &["card", "add", "", "com.x"]);
    assert_eq!(output.2, 1);
    assert!(output.1.contains("error:"));
}

#[test]
fn test_card_list_json() {
    let dir = tempfile::tempdir().unwrap();
    add_card(dir.path(), "Instagram", "com.instagram.android");
    add_card(dir.path(), "Facebook", "com.facebook.android");

    let output = run_cli_in(dir.path(), &["card", "list", "--json"]);
    assert_eq!(output.2, 0, "Card list failed: {}", output.1);
    let cards: serde_json::Value = serde_json::from_str(&output.0).unwrap();
    let cards = cards.as_array().unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0]["name"], "Instagram");
    assert_eq!(cards[1]["package_name"], "com.facebook.android");
    assert_eq!(cards[0]["wallet"], "default");
}

#[test]
fn test_card_show_unknown() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli_in(dir.path(), &["card", "show", "missing"]);
    assert_eq!(output.2, 0);
    assert!(output.0.contains("Card not found: missing"));
}

#[test]
fn test_card_remove() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_card(dir.path(), "Instagram", "com.instagram.android");

    let output = run_cli_in(dir.path(), &["card", "remove", &id]);
    assert_eq!(output.2, 0);
    assert!(output.0.contains("Card removed:"));

    let output = run_cli_in(dir.path(), &["card", "list", "--json"]);
    let cards: serde_json::Value = serde_json::from_str(&output.0).unwrap();
    assert!(cards.as_array().unwrap().is_empty());
}

#[test]
fn test_card_limit_set_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_card(dir.path(), "Instagram", "com.instagram.android");

    let output = run_cli_in(dir.path(), &["card", "limit", &id, "daily", "1h30m"]);
    assert_eq!(output.2, 0, "Limit set failed: {}", output.1);
    assert!(output.0.contains("Limit set: daily 1h 30m"));

    let output = run_cli_in(dir.path(), &["card", "show", &id]);
    assert!(output.0.contains("\"daily\": 5400"));

    let output = run_cli_in(dir.path(), &["card", "limit", &id, "daily", "--clear"]);
    assert_eq!(output.2, 0);
    assert!(output.0.contains("Limit cleared: daily"));
}

#[test]
fn test_card_limit_rejects_annual() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_card(dir.path(), "Instagram", "com.instagram.android");

    let output = run_cli_in(dir.path(), &["card", "limit", &id, "annually", "1h"]);
    assert_eq!(output.2, 1);
    assert!(output.1.contains("error:"));
}

#[test]
fn test_category_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let add_output = run_cli_in(dir.path(), &["category", "add", "Social"]);
    assert_eq!(add_output.2, 0, "Category add failed: {}", add_output.1);
    let cat_id = add_output
        .0
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("Category added: "))
        .expect("missing confirmation line")
        .to_string();

    let card_id = add_card(dir.path(), "Instagram", "com.instagram.android");
    let output = run_cli_in(dir.path(), &["card", "move", &card_id, &cat_id]);
    assert_eq!(output.2, 0);
    assert!(output.0.contains(&format!("moved to {cat_id}")));

    // Removing the category re-parents its card to the default category.
    let output = run_cli_in(dir.path(), &["category", "remove", &cat_id]);
    assert_eq!(output.2, 0);
    assert!(output.0.contains("Category removed:"));
    assert!(output.0.contains("1 cards moved to Uncategorized"));

    let output = run_cli_in(
        dir.path(),
        &["card", "list", "--category", "default", "--json"],
    );
    let cards: serde_json::Value = serde_json::from_str(&output.0).unwrap();
    assert_eq!(cards.as_array().unwrap().len(), 1);
}

#[test]
fn test_category_default_protected() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli_in(dir.path(), &["category", "remove", "default"]);
    assert_eq!(output.2, 0);
    assert!(output.0.contains("The default category cannot be removed"));
}

#[test]
fn test_wallet_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let add_output = run_cli_in(dir.path(), &["wallet", "add", "Work"]);
    assert_eq!(add_output.2, 0, "Wallet add failed: {}", add_output.1);
    let wallet_id = add_output
        .0
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("Wallet added: "))
        .expect("missing confirmation line")
        .to_string();

    let output = run_cli_in(dir.path(), &["wallet", "use", &wallet_id]);
    assert_eq!(output.2, 0);

    let output = run_cli_in(dir.path(), &["wallet", "list"]);
    assert!(output.0.contains("Work"));
    assert!(output.0.contains(&format!("* Work [{wallet_id}]")));

    // Removing the active wallet resets the active wallet to default.
    let output = run_cli_in(dir.path(), &["wallet", "remove", &wallet_id]);
    assert_eq!(output.2, 0);
    assert!(output.0.contains("Active wallet reset to default"));

    let output = run_cli_in(dir.path(), &["status", "--json"]);
    let status: serde_json::Value = serde_json::from_str(&output.0).unwrap();
    assert_eq!(status["active_wallet"], "default");
}

#[test]
fn test_wallet_use_unregistered_warns() {
    let dir = tempfile::tempdir().unwrap();
    // Consume the first-launch greeting so stderr is predictable.
    let _ = run_cli_in(dir.path(), &["status"]);

    let output = run_cli_in(dir.path(), &["wallet", "use", "ghost"]);
    assert_eq!(output.2, 0);
    assert!(output.1.contains("not registered"));
    assert!(output.0.contains("Active wallet: ghost"));
}

#[test]
fn test_settings_update_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli_in(dir.path(), &["settings", "update", "--fab-position", "left"]);
    assert_eq!(output.2, 0, "Settings update failed: {}", output.1);
    assert!(output.0.contains("Settings updated: fab_position"));

    let output = run_cli_in(dir.path(), &["settings", "show", "--json"]);
    let settings: serde_json::Value = serde_json::from_str(&output.0).unwrap();
    assert_eq!(settings["fab_position"], "left");
    assert_eq!(settings["swipe_direction"], "normal");
}

#[test]
fn test_settings_update_empty() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli_in(dir.path(), &["settings", "update"]);
    assert_eq!(output.2, 0);
    assert!(output.0.contains("nothing to update"));
}

#[test]
fn test_config_set_get() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli_in(dir.path(), &["config", "set", "ui.dark_mode", "true"]);
    assert_eq!(output.2, 0, "Config set failed: {}", output.1);
    assert!(output.0.contains("Set ui.dark_mode = true"));

    let output = run_cli_in(dir.path(), &["config", "get", "ui.dark_mode"]);
    assert_eq!(output.2, 0);
    assert_eq!(output.0.trim(), "true");
}

#[test]
fn test_config_get_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli_in(dir.path(), &["config", "get", "no.such.key"]);
    assert_eq!(output.2, 1);
    assert!(output.1.contains("Unknown config key"));
}

#[test]
fn test_config_list() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli_in(dir.path(), &["config", "list"]);
    assert_eq!(output.2, 0);
    assert!(output.0.contains("[notifications]"));
    assert!(output.0.contains("[privacy]"));
}

#[test]
fn test_stats_today_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli_in(dir.path(), &["stats", "today", "--json"]);
    assert_eq!(output.2, 0);
    let stats: serde_json::Value = serde_json::from_str(&output.0).unwrap();
    assert_eq!(stats["total_screen_time_minutes"], 180);
    assert_eq!(stats["most_used_app"], "Instagram");
    assert_eq!(stats["productivity_score"], 75);
}

#[test]
fn test_stats_screens() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli_in(dir.path(), &["stats", "usage"]);
    assert_eq!(output.2, 0);
    assert!(output.0.contains("Instagram: 45m of 1h 0m (75%)"));

    let output = run_cli_in(dir.path(), &["stats", "week"]);
    assert_eq!(output.2, 0);
    assert!(output.0.contains("Most productive day: Wednesday"));

    let output = run_cli_in(dir.path(), &["stats", "insights"]);
    assert_eq!(output.2, 0);
    assert!(output.0.contains("most productive between 9 AM and 11 AM"));
}

#[test]
fn test_stats_summary_reflects_cards() {
    let dir = tempfile::tempdir().unwrap();
    add_card(dir.path(), "Instagram", "com.instagram.android");

    let output = run_cli_in(dir.path(), &["stats", "summary", "--json"]);
    assert_eq!(output.2, 0);
    let summary: serde_json::Value = serde_json::from_str(&output.0).unwrap();
    assert_eq!(summary["apps_monitored"], 1);
    assert_eq!(summary["total_screen_time_minutes"], 0);
}

#[test]
fn test_workspace_list_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli_in(dir.path(), &["workspace", "list"]);
    assert_eq!(output.2, 0);
    assert!(output.0.contains("Project Alpha"));
    assert!(output.0.contains("Project Beta"));

    let output = run_cli_in(dir.path(), &["workspace", "show", "1"]);
    assert_eq!(output.2, 0);
    assert!(output.0.contains("Development"));
    assert!(output.0.contains("Over allocation"));
}

#[test]
fn test_status_records_last_screen() {
    let dir = tempfile::tempdir().unwrap();
    add_card(dir.path(), "Instagram", "com.instagram.android");

    let output = run_cli_in(dir.path(), &["status"]);
    assert_eq!(output.2, 0);
    assert!(output.0.contains("Active wallet: Default [default]"));
    assert!(output.0.contains("Cards: 1"));
    assert!(output.0.contains("First launch: false"));
    assert!(output.0.contains("Last screen: cards"));
}

#[test]
fn test_status_reports_first_launch_flag() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli_in(dir.path(), &["status", "--json"]);
    assert_eq!(output.2, 0);

    // The greeting marks the launch before the command body reads the
    // flag, so even the very first status reports false.
    let status: serde_json::Value = serde_json::from_str(&output.0).unwrap();
    assert_eq!(status["first_launch"], false);
}

#[test]
fn test_first_launch_greeting_only_once() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli_in(dir.path(), &["status"]);
    assert!(output.1.contains("Welcome to Timewallet"));

    let output = run_cli_in(dir.path(), &["status"]);
    assert!(!output.1.contains("Welcome to Timewallet"));
}

#[test]
fn test_greeting_waits_for_a_valid_command() {
    let dir = tempfile::tempdir().unwrap();

    // Neither help nor a mistyped command counts as the first launch.
    let output = run_cli_in(dir.path(), &["--help"]);
    assert_eq!(output.2, 0);
    assert!(!output.1.contains("Welcome to Timewallet"));

    let output = run_cli_in(dir.path(), &["frobnicate"]);
    assert_ne!(output.2, 0);
    assert!(!output.1.contains("Welcome to Timewallet"));

    let output = run_cli_in(dir.path(), &["status"]);
    assert!(output.1.contains("Welcome to Timewallet"));
}

#[test]
fn test_state_persists_across_invocations() {
    let dir = tempfile::tempdir().unwrap();
    add_card(dir.path(), "Instagram", "com.instagram.android");

    let output = run_cli_in(dir.path(), &["card", "list", "--json"]);
    let cards: serde_json::Value = serde_json::from_str(&output.0).unwrap();
    assert_eq!(cards.as_array().unwrap().len(), 1);
    assert_eq!(cards[0]["name"], "Instagram");
}

#[test]
fn test_completions_generate() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli_in(dir.path(), &["completions", "bash"]);
    assert_eq!(output.2, 0);
    assert!(output.0.contains("timewallet-cli"));
}
