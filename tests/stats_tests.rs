//! Stats and track command tests

mod common;

use predicates::prelude::*;

#[test]
fn test_track_records_outcomes() {
    let catalog = common::TestCatalog::new();
    catalog.write_source("gizmodo.yaml", "name: Gizmodo\n");

    common::feedsweep_cmd(&catalog)
        .args(["track", "gizmodo", "--success"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded success"));

    common::feedsweep_cmd(&catalog)
        .args(["track", "gizmodo", "--failure", "--error-kind", "timeout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 attempts tracked"));
}

#[test]
fn test_track_requires_an_outcome_flag() {
    let catalog = common::TestCatalog::new();

    common::feedsweep_cmd(&catalog)
        .args(["track", "gizmodo"])
        .assert()
        .failure();
}

#[test]
fn test_stats_single_source() {
    let catalog = common::TestCatalog::new();
    catalog.write_source("gizmodo.yaml", "name: Gizmodo\ncategory: tech\n");

    common::feedsweep_cmd(&catalog)
        .args(["track", "gizmodo", "--success"])
        .assert()
        .success();
    common::feedsweep_cmd(&catalog)
        .args(["track", "gizmodo", "--failure", "--error-kind", "timeout"])
        .assert()
        .success();

    common::feedsweep_cmd(&catalog)
        .args(["stats", "gizmodo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("attempts: 2"))
        .stdout(predicate::str::contains("success rate: 50%"));
}

#[test]
fn test_stats_unknown_source_fails() {
    let catalog = common::TestCatalog::new();

    common::feedsweep_cmd(&catalog)
        .args(["stats", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_stats_never_used_verdict() {
    let catalog = common::TestCatalog::new();
    catalog.write_source("gizmodo.yaml", "name: Gizmodo\n");

    // Zero recorded fetch attempts always yields never-used.
    common::feedsweep_cmd(&catalog)
        .args(["stats", "gizmodo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("never-used"));
}

#[test]
fn test_stats_unused_scan() {
    let catalog = common::TestCatalog::new();
    catalog.write_source("used.yaml", "name: Used\n");
    catalog.write_source("never.yaml", "name: Never\n");

    common::feedsweep_cmd(&catalog)
        .args(["track", "used", "--success"])
        .assert()
        .success();

    // Listing lines are indented; the heading alone must not match.
    common::feedsweep_cmd(&catalog)
        .args(["stats", "--unused"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  never"))
        .stdout(predicate::str::contains("  used").not());
}

#[test]
fn test_stats_low_success_scan() {
    let catalog = common::TestCatalog::new();
    catalog.write_source("flaky.yaml", "name: Flaky\n");
    catalog.write_source("solid.yaml", "name: Solid\n");

    for _ in 0..6 {
        common::feedsweep_cmd(&catalog)
            .args(["track", "flaky", "--failure", "--error-kind", "timeout"])
            .assert()
            .success();
        common::feedsweep_cmd(&catalog)
            .args(["track", "solid", "--success"])
            .assert()
            .success();
    }

    common::feedsweep_cmd(&catalog)
        .args(["stats", "--low-success"])
        .assert()
        .success()
        .stdout(predicate::str::contains("flaky"))
        .stdout(predicate::str::contains("solid").not());
}

#[test]
fn test_stats_table_for_all_sources() {
    let catalog = common::TestCatalog::new();
    catalog.write_source("gizmodo.yaml", "name: Gizmodo\n");
    catalog.write_source("ars.yaml", "name: Ars\n");

    common::feedsweep_cmd(&catalog)
        .args(["track", "gizmodo", "--success"])
        .assert()
        .success();

    common::feedsweep_cmd(&catalog)
        .args(["stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gizmodo"))
        .stdout(predicate::str::contains("active"))
        .stdout(predicate::str::contains("ars"))
        .stdout(predicate::str::contains("never-used"));
}
