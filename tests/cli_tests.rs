//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, bytes: usize) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, "x".repeat(bytes)).expect("write file");
}

fn cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("index-plan"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Workspace with two configured collections, one of them not cloned.
fn workspace() -> TempDir {
    let ws = TempDir::new().expect("temp workspace");
    fs::write(
        ws.path().join("index-plan.toml"),
        r#"
baseline_path = "state/baseline.json"

[thresholds]
warning_bytes = 1000
error_bytes = 5000
warning_count = 2
error_count = 5

[[collections]]
id = "web"

[[collections]]
id = "docs"
"#,
    )
    .expect("write config");

    let web = ws.path().join("repos/web");
    write(&web, "src/index.ts", 2000);
    write(&web, "src/app.tsx", 2000);
    write(&web, "src/util.ts", 2000);
    write(&web, "node_modules/react/index.js", 500);
    write(&web, ".env", 10);
    ws
}

#[test]
fn test_cli_version() {
    cmd().arg("--version").assert().success().stdout(predicate::str::contains("index-plan"));
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("rules"))
        .stdout(predicate::str::contains("baseline"));
}

#[test]
fn test_plan_reports_levels_and_not_cloned() {
    let ws = workspace();
    cmd()
        .args(["plan", "--workspace", ws.path().to_str().expect("utf8")])
        .assert()
        .success()
        .stdout(predicate::str::contains("web [RED]"))
        .stdout(predicate::str::contains("error threshold"))
        .stdout(predicate::str::contains("docs [GREEN]"))
        .stdout(predicate::str::contains("Not cloned"))
        .stdout(predicate::str::contains("Total: 2 collections, 3 files"))
        .stdout(predicate::str::contains("No baseline found"));
}

#[test]
fn test_plan_fail_on_red() {
    let ws = workspace();
    cmd()
        .args(["plan", "--fail-on-red", "--workspace", ws.path().to_str().expect("utf8")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plan exceeds error thresholds"));
}

#[test]
fn test_plan_json_output() {
    let ws = workspace();
    let output = cmd()
        .args(["plan", "--json", "--workspace", ws.path().to_str().expect("utf8")])
        .output()
        .expect("run plan");
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).expect("plan json");
    assert_eq!(doc["collectionCount"], serde_json::json!(2));
    assert_eq!(doc["includedFileCount"], serde_json::json!(3));
    assert_eq!(doc["includedTotalBytes"], serde_json::json!(6000));
    assert_eq!(doc["warningLevel"], serde_json::json!("red"));
    assert_eq!(doc["changes"]["hasChanges"], serde_json::json!(true));
    assert!(doc["changes"]["baselineDate"].is_null());
}

#[test]
fn test_baseline_then_plan_has_no_changes() {
    let ws = workspace();
    let ws_path = ws.path().to_str().expect("utf8");

    cmd()
        .args(["baseline", "--workspace", ws_path])
        .assert()
        .success()
        .stdout(predicate::str::contains("Baseline saved: 3 files"));

    let saved = fs::read_to_string(ws.path().join("state/baseline.json")).expect("baseline file");
    let doc: serde_json::Value = serde_json::from_str(&saved).expect("baseline json");
    assert_eq!(doc["fileCount"], serde_json::json!(3));
    assert_eq!(doc["files"][0], serde_json::json!("web/src/app.tsx"));

    cmd()
        .args(["plan", "--workspace", ws_path])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes since baseline"));

    write(&ws.path().join("repos/web"), "src/new.ts", 10);
    fs::remove_file(ws.path().join("repos/web/src/util.ts")).expect("remove");

    let changes_path = ws.path().join("changes.json");
    cmd()
        .args([
            "plan",
            "--workspace",
            ws_path,
            "--changes-out",
            changes_path.to_str().expect("utf8"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("+1 new, -1 removed"))
        .stdout(predicate::str::contains("+ web/src/new.ts"))
        .stdout(predicate::str::contains("- web/src/util.ts"));

    let changes: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(changes_path).expect("changes file"))
            .expect("changes json");
    assert_eq!(changes["newFiles"], serde_json::json!(["web/src/new.ts"]));
    assert_eq!(changes["removedFiles"], serde_json::json!(["web/src/util.ts"]));
    assert_eq!(changes["totalFiles"], serde_json::json!(3));
}

#[test]
fn test_corrupt_baseline_is_treated_as_missing() {
    let ws = workspace();
    write(ws.path(), "state/baseline.json", 0);
    fs::write(ws.path().join("state/baseline.json"), "not json").expect("corrupt baseline");

    cmd()
        .args(["plan", "--workspace", ws.path().to_str().expect("utf8")])
        .assert()
        .success()
        .stdout(predicate::str::contains("No baseline found"));
}

#[test]
fn test_plan_adhoc_path() {
    let repo = TempDir::new().expect("temp repo");
    write(repo.path(), "src/index.ts", 2000);
    write(repo.path(), "assets/logo.png", 300);
    write(repo.path(), "App.vue", 300);
    let baseline = repo.path().join("none/baseline.json");

    cmd()
        .args([
            "plan",
            "--path",
            repo.path().to_str().expect("utf8"),
            "--baseline",
            baseline.to_str().expect("utf8"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files: 1"))
        .stdout(predicate::str::contains("Largest: src/index.ts"));
}

#[test]
fn test_plan_without_collections_fails() {
    let ws = TempDir::new().expect("temp workspace");
    cmd()
        .args(["plan", "--workspace", ws.path().to_str().expect("utf8")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No collections to plan"));
}

#[test]
fn test_invalid_thresholds_rejected() {
    let ws = TempDir::new().expect("temp workspace");
    fs::write(
        ws.path().join("index-plan.toml"),
        "[thresholds]\nwarning_count = 10\nerror_count = 10\n\n[[collections]]\nid = \"a\"\n",
    )
    .expect("write config");

    cmd()
        .args(["plan", "--workspace", ws.path().to_str().expect("utf8")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error_count (10) must exceed warning_count (10)"));
}

#[test]
fn test_rules_render_collection_section() {
    cmd()
        .args(["rules", "vercel-ai"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**/node_modules/\n"))
        .stdout(predicate::str::contains("!**/.env.example\n"))
        .stdout(predicate::str::contains(
            "# Collection-specific excludes: vercel-ai\npackages/vue/\n",
        ));
}

#[test]
fn test_rules_check_paths() {
    cmd()
        .args(["rules", "vercel-ai", "--check", "packages/vue/index.ts,src\\index.ts,.env.example"])
        .assert()
        .success()
        .stdout(predicate::str::contains("excluded\tpackages/vue/index.ts"))
        .stdout(predicate::str::contains("included\tsrc\\index.ts"))
        .stdout(predicate::str::contains("excluded\t.env.example"));
}

#[test]
fn test_rust_log_overrides_default_level() {
    let ws = workspace();
    cmd()
        .env("RUST_LOG", "info")
        .args(["baseline", "--workspace", ws.path().to_str().expect("utf8")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved baseline with 3 files"));
}

#[test]
fn test_default_log_level_is_quiet() {
    let ws = workspace();
    cmd()
        .env_remove("RUST_LOG")
        .args(["baseline", "--workspace", ws.path().to_str().expect("utf8")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved baseline").not());
}

#[test]
fn test_rules_check_trailing_slash_means_directory() {
    cmd()
        .args(["rules", "vercel-ai", "--check", "packages/vue/,packages/vue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("excluded\tpackages/vue/\n"))
        .stdout(predicate::str::contains("included\tpackages/vue\n"));
}
