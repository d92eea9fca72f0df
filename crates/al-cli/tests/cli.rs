//! Integration tests for top-level CLI behavior.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run_apilens(args: &[&str], cwd: &Path) -> Output {
    let bin = env!("CARGO_BIN_EXE_apilens");
    Command::new(bin)
        .args(args)
        .current_dir(cwd)
        .env_remove("APILENS_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run apilens binary")
}

fn spring_project() -> tempfile::TempDir {
    let tmp = tempfile::TempDir::new().unwrap();
    let dir = tmp.path().join("src/main/java/com/acme");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("HealthController.java"),
        r#"package com.acme;

@RestController
public class HealthController {
    /** Liveness probe. */
    @GetMapping("/health")
    public Status health() {
        return Status.up();
    }
}
"#,
    )
    .unwrap();
    fs::write(
        dir.join("Status.java"),
        "package com.acme;\n\npublic class Status {\n    private String state;\n\n    public static Status up() { return new Status(); }\n}\n",
    )
    .unwrap();
    tmp
}

const CONTROLLER: &str = "src/main/java/com/acme/HealthController.java";

#[test]
fn dry_run_prints_context() {
    let tmp = spring_project();
    let output = run_apilens(&["analyze", CONTROLLER, "--line", "8", "--dry-run"], tmp.path());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.starts_with("### Analysis request: HTTP endpoint\n"));
    assert!(stdout.contains("Full route: /health\n"));
    assert!(stdout.contains("Doc comment: Liveness probe."));
    assert!(stdout.contains("Return type (Status):\n    * field: state, type: String\n"));
    assert!(stdout.contains("/* declared in: Status */"));
}

#[test]
fn dry_run_json() {
    let tmp = spring_project();
    let output = run_apilens(&["analyze", CONTROLLER, "--line", "8", "--dry-run", "--json"], tmp.path());
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["method_name"], "health");
    assert_eq!(value["verb"], "GET");
}

#[test]
fn caret_outside_method_prints_hint() {
    let tmp = spring_project();
    let output = run_apilens(&["analyze", CONTROLLER, "--line", "1", "--dry-run"], tmp.path());
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Place the cursor inside a controller method."));
}

#[test]
fn analyze_without_key_fails() {
    let tmp = spring_project();
    let output = run_apilens(&["analyze", CONTROLLER, "--line", "8"], tmp.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("APILENS_API_KEY"));
}

#[test]
fn config_set_then_show() {
    let tmp = spring_project();
    let output = run_apilens(&["config", "set", "--provider", "glm", "--api-key", "sk-abcdefgh12345678"], tmp.path());
    assert!(output.status.success());
    assert!(tmp.path().join(".apilens.json").exists());

    let output = run_apilens(&["config", "show"], tmp.path());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("GLM (Zhipu AI)"));
    assert!(stdout.contains("sk-a...5678"));
}

#[test]
fn providers_lists_presets() {
    let tmp = tempfile::TempDir::new().unwrap();
    let output = run_apilens(&["providers"], tmp.path());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    for id in ["DEEPSEEK", "GLM", "QWEN"] {
        assert!(stdout.contains(id));
    }
}
