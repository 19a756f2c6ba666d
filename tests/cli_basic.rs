//! Integration tests for basic CLI behavior.
//!
//! Tests that the binary exists, accepts standard flags, and each
//! subcommand validates its arguments. Nothing here touches the network:
//! extraction against live sites is exercised through the library's unit
//! tests with fixture markup.

#![allow(deprecated)] // cargo_bin deprecation — replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: get a Command for the `magpie` binary.
fn magpie() -> Command {
    Command::cargo_bin("magpie").expect("binary 'magpie' should be built")
}

// ─── Top-level flags ─────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    magpie()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: magpie"))
        .stdout(predicate::str::contains("posts"))
        .stdout(predicate::str::contains("page"))
        .stdout(predicate::str::contains("provider"))
        .stdout(predicate::str::contains("logo"))
        .stdout(predicate::str::contains("all"));
}

#[test]
fn version_flag_shows_semver() {
    magpie()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^magpie \d+\.\d+\.\d+\n$").unwrap());
}

#[test]
fn no_args_shows_error_and_usage() {
    magpie()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: magpie"));
}

#[test]
fn invalid_subcommand_fails() {
    magpie()
        .arg("this-is-not-a-real-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// ─── Subcommand help ─────────────────────────────────────────────────────────

#[test]
fn posts_help() {
    magpie()
        .args(["posts", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("latest posts"))
        .stdout(predicate::str::contains("<PROVIDER>"))
        .stdout(predicate::str::contains("<PATH>"))
        .stdout(predicate::str::contains("--limit"));
}

#[test]
fn page_help() {
    magpie()
        .args(["page", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page metadata"))
        .stdout(predicate::str::contains("<PROVIDER>"))
        .stdout(predicate::str::contains("<PATH>"));
}

#[test]
fn logo_help() {
    magpie()
        .args(["logo", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("logo"))
        .stdout(predicate::str::contains("--size"));
}

#[test]
fn all_help() {
    magpie()
        .args(["all", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("every provider"))
        .stdout(predicate::str::contains("<PATH>"));
}

// ─── Subcommand argument validation ──────────────────────────────────────────

#[test]
fn posts_missing_args_fails() {
    magpie()
        .arg("posts")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<PROVIDER>"));
}

#[test]
fn page_missing_path_fails() {
    magpie()
        .args(["page", "facebook"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("<PATH>"));
}

#[test]
fn provider_missing_name_fails() {
    magpie()
        .arg("provider")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<PROVIDER>"));
}

#[test]
fn logo_invalid_size_fails() {
    magpie()
        .args(["logo", "facebook", "somepage", "--size", "enormous"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn posts_invalid_limit_fails() {
    magpie()
        .args(["posts", "facebook", "somepage", "--limit", "many"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// ─── Provider resolution ─────────────────────────────────────────────────────

#[test]
fn unknown_provider_fails_with_available_list() {
    magpie()
        .args(["provider", "myspace"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown provider 'myspace'"))
        .stderr(predicate::str::contains("facebook"))
        .stderr(predicate::str::contains("9gag"));
}

#[test]
fn provider_metadata_needs_no_network() {
    // provider_info is built from static URLs, so this succeeds offline.
    magpie()
        .args(["provider", "facebook"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"facebook\""))
        .stdout(predicate::str::contains("graph.facebook.com"));
}

#[test]
fn facebook_logo_is_built_without_a_fetch() {
    magpie()
        .args(["logo", "facebook", "somepage", "--size", "small"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://graph.facebook.com/somepage/picture?type=small",
        ));
}
