//! Remove command tests

mod common;

use predicates::prelude::*;

#[test]
fn test_remove_single_source() {
    let catalog = common::TestCatalog::new();
    catalog.write_source("gizmodo.yaml", "name: Gizmodo\ncategory: tech\n");

    common::feedsweep_cmd(&catalog)
        .args(["remove", "gizmodo", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed"));

    assert!(!catalog.file_exists("sources/gizmodo.yaml"));
}

#[test]
fn test_remove_deletes_via_actual_extension() {
    let catalog = common::TestCatalog::new();
    catalog.write_source("gizmodo.yaml", "name: Gizmodo\n");
    catalog.write_source("techcrunch.yml", "name: TechCrunch\n");

    common::feedsweep_cmd(&catalog)
        .args(["remove", "gizmodo", "techcrunch", "-y"])
        .assert()
        .success();

    assert!(!catalog.file_exists("sources/gizmodo.yaml"));
    assert!(!catalog.file_exists("sources/techcrunch.yml"));
}

#[test]
fn test_remove_detaches_from_bundles_preserving_comments() {
    let catalog = common::TestCatalog::new();
    catalog.write_source("gizmodo.yaml", "name: Gizmodo\n");
    catalog.write_bundle(
        "tech",
        "# Morning digest\ndescription: Tech roundup\nsources:\n  - gizmodo\n  - ars\n",
    );

    common::feedsweep_cmd(&catalog)
        .args(["remove", "gizmodo", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("detached from: tech"));

    let bundle = catalog.read_file("bundles/tech.yaml");
    assert!(bundle.contains("# Morning digest"));
    assert!(bundle.contains("- ars"));
    assert!(!bundle.contains("gizmodo"));
}

#[test]
fn test_remove_unknown_id_reports_not_found() {
    let catalog = common::TestCatalog::new();
    catalog.write_source("gizmodo.yaml", "name: Gizmodo\n");

    common::feedsweep_cmd(&catalog)
        .args(["remove", "gizmodo", "tyop", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not-found"));

    assert!(!catalog.file_exists("sources/gizmodo.yaml"));
}

#[test]
fn test_remove_with_yes_and_no_sources_fails() {
    let catalog = common::TestCatalog::new();

    common::feedsweep_cmd(&catalog)
        .args(["remove", "-y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No sources selected"));
}

#[test]
fn test_remove_dry_run_changes_nothing() {
    let catalog = common::TestCatalog::new();
    catalog.write_source("gizmodo.yaml", "name: Gizmodo\n");

    common::feedsweep_cmd(&catalog)
        .args(["remove", "gizmodo", "-y", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(catalog.file_exists("sources/gizmodo.yaml"));
    assert!(catalog.backup_ids().is_empty());
}

#[test]
fn test_remove_creates_backup_and_prints_restore_hint() {
    let catalog = common::TestCatalog::new();
    catalog.write_source("gizmodo.yaml", "name: Gizmodo\n");

    common::feedsweep_cmd(&catalog)
        .args(["remove", "gizmodo", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("feedsweep restore"));

    assert_eq!(catalog.backup_ids().len(), 1);
}

#[test]
fn test_remove_no_backup_skips_checkpoint() {
    let catalog = common::TestCatalog::new();
    catalog.write_source("gizmodo.yaml", "name: Gizmodo\n");

    common::feedsweep_cmd(&catalog)
        .args(["remove", "gizmodo", "-y", "--no-backup"])
        .assert()
        .success();

    assert!(!catalog.file_exists("sources/gizmodo.yaml"));
    assert!(catalog.backup_ids().is_empty());
}

#[test]
fn test_remove_purge_output() {
    let catalog = common::TestCatalog::new();
    catalog.write_source("gizmodo.yaml", "name: Gizmodo\n");
    catalog.write_output("gizmodo-2026-08-01", "index.html", "<html></html>");
    catalog.write_output("techcrunch", "index.html", "<html></html>");

    common::feedsweep_cmd(&catalog)
        .args(["remove", "gizmodo", "-y", "--purge-output"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Purged 1 output directory"));

    assert!(!catalog.file_exists("output/gizmodo-2026-08-01"));
    // Output of other sources is untouched.
    assert!(catalog.file_exists("output/techcrunch/index.html"));
}

#[test]
fn test_remove_without_purge_keeps_output() {
    let catalog = common::TestCatalog::new();
    catalog.write_source("gizmodo.yaml", "name: Gizmodo\n");
    catalog.write_output("gizmodo", "index.html", "<html></html>");

    common::feedsweep_cmd(&catalog)
        .args(["remove", "gizmodo", "-y"])
        .assert()
        .success();

    assert!(catalog.file_exists("output/gizmodo/index.html"));
}

#[test]
fn test_remove_last_member_keeps_empty_bundle() {
    let catalog = common::TestCatalog::new();
    catalog.write_source("gizmodo.yaml", "name: Gizmodo\n");
    catalog.write_bundle("solo", "description: One feed\nsources:\n  - gizmodo\n");

    common::feedsweep_cmd(&catalog)
        .args(["remove", "gizmodo", "-y"])
        .assert()
        .success();

    assert!(catalog.file_exists("bundles/solo.yaml"));
    let bundle = catalog.read_file("bundles/solo.yaml");
    assert!(bundle.contains("description: One feed"));
    assert!(!bundle.contains("gizmodo"));
}
