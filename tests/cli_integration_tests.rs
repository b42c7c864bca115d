use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

// End-to-end tests for the rufix binary. External tools are disabled so the
// runs stay hermetic regardless of what is installed on the host.

fn rufix() -> Command {
    Command::cargo_bin("rufix").unwrap()
}

#[test]
fn fixes_python_file_and_reports_issues() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("broken.py");
    fs::write(&file, "if x > 0\n    print 'positive'\n").unwrap();

    rufix()
        .arg("--no-tools")
        .arg(file.to_str().unwrap())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Missing colon"))
        .stdout(predicate::str::contains("Fixed missing_colon on line 1"))
        .stdout(predicate::str::contains("Print statement needs parentheses"));
}

#[test]
fn clean_file_exits_zero() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("clean.py");
    fs::write(&file, "x = 1\n").unwrap();

    rufix()
        .arg("--no-tools")
        .arg(file.to_str().unwrap())
        .assert()
        .success();
}

#[test]
fn missing_path_yields_sentinel_and_nonzero_exit() {
    rufix()
        .arg("--no-tools")
        .arg("/definitely/not/a/real/path")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Path does not exist"));
}

#[test]
fn no_paths_is_a_usage_error() {
    rufix()
        .arg("--no-tools")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no paths given"));
}

#[test]
fn json_output_is_parseable() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("broken.js");
    fs::write(&file, "var x = 5\n").unwrap();

    let output = rufix()
        .arg("--no-tools")
        .arg("--output")
        .arg("json")
        .arg(file.to_str().unwrap())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let results = parsed.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["language"], "javascript");
    assert_eq!(results[0]["success"], true);
    assert!(
        results[0]["fixes_applied"]
            .as_array()
            .unwrap()
            .iter()
            .any(|fix| fix.as_str().unwrap().contains("var_to_const"))
    );
}

#[test]
fn unknown_output_format_is_a_tool_error() {
    rufix()
        .arg("--output")
        .arg("yaml")
        .arg(".")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown output format"));
}

#[test]
fn write_mode_persists_fixes_and_exits_zero() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("app.js");
    fs::write(&file, "var x = 5\n").unwrap();

    rufix()
        .arg("--no-tools")
        .arg("--write")
        .arg(file.to_str().unwrap())
        .assert()
        .success();

    let rewritten = fs::read_to_string(&file).unwrap();
    assert_eq!(rewritten, "const x = 5\n");
}

#[test]
fn report_flag_appends_a_summary() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "if x > 0\n").unwrap();
    fs::write(dir.path().join("b.py"), "if y > 1\n").unwrap();

    rufix()
        .arg("--no-tools")
        .arg("--report")
        .arg(dir.path().to_str().unwrap())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Summary"))
        .stdout(predicate::str::contains("By language"))
        .stdout(predicate::str::contains("Top issues"))
        .stdout(predicate::str::contains("Missing colon"));
}

#[test]
fn stats_flag_prints_running_statistics() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "x = 1\n").unwrap();

    rufix()
        .arg("--no-tools")
        .arg("--stats")
        .arg(dir.path().to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("files processed: 1"));
}

#[test]
fn list_rules_names_every_rule() {
    rufix()
        .arg("--list-rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("python/missing_colon"))
        .stdout(predicate::str::contains("javascript/var_to_const"))
        .stdout(predicate::str::contains("go/brace_spacing"));
}

#[test]
fn init_writes_config_once() {
    let dir = tempdir().unwrap();

    rufix()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created rufix.toml"));
    assert!(dir.path().join("rufix.toml").exists());

    rufix().current_dir(dir.path()).arg("init").assert().code(2);
}

#[test]
fn version_subcommand_prints_version() {
    rufix()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_disable_removes_a_rule() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("rufix.toml"),
        "[global]\ndisable = [\"missing_colon\"]\n",
    )
    .unwrap();
    fs::write(dir.path().join("a.py"), "if x > 0\n").unwrap();

    rufix()
        .current_dir(dir.path())
        .arg("--no-tools")
        .arg("a.py")
        .assert()
        .success()
        .stdout(predicate::str::contains("Missing colon").not());
}

#[test]
fn exclude_patterns_skip_files() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("generated")).unwrap();
    fs::write(dir.path().join("generated").join("gen.py"), "if x > 0\n").unwrap();
    fs::write(dir.path().join("main.py"), "x = 1\n").unwrap();

    rufix()
        .current_dir(dir.path())
        .arg("--no-tools")
        .arg("--exclude")
        .arg("generated/**")
        .arg(".")
        .assert()
        .success()
        .stdout(predicate::str::contains("gen.py").not());
}
