use super::fixture_path;
use std::io::Write;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shadow-query"))
        .arg("--no-color")
        .args(args)
        .output()
        .expect("run shadow-query")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_find_help() {
    let output = run(&["find", "--help"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Find elements matching a selector"));
}

#[test]
fn test_find_reaches_nested_shadow_roots() {
    let fixture = fixture_path("components.xhtml");
    let output = run(&["find", &fixture, "button"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        "html > body > my-element#host > #shadow-root(open) > \
         nested-el#nested > #shadow-root(open) > button#deep.primary"
    );
}

#[test]
fn test_find_first_with_depth() {
    let fixture = fixture_path("components.xhtml");

    let output = run(&["find", &fixture, "button", "--first", "--depth", "1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("(no match)"));

    let output = run(&["find", &fixture, "slot", "--first", "--depth", "1"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("slot[name=\"blah\"]"));
}

#[test]
fn test_config_file_and_depth_override() {
    let fixture = fixture_path("components.xhtml");
    let mut config = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("tempfile");
    config.write_all(b"depth = 1\n").expect("write config");
    config.flush().expect("flush config");
    let config_path = config.path().to_str().expect("utf-8 path");

    let output = run(&["find", &fixture, "button", "--config", config_path]);
    assert!(output.status.success());
    assert!(stdout(&output).trim().is_empty());

    let output = run(&[
        "find",
        &fixture,
        "button",
        "--config",
        config_path,
        "--depth",
        "unbounded",
    ]);
    assert!(stdout(&output).contains("button#deep"));
}

#[test]
fn test_closed_shadow_root_is_skipped() {
    let fixture = fixture_path("components.xhtml");
    let output = run(&["flatten", &fixture]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("#shadow-root(open)"));
    assert!(!out.contains("#shadow-root(closed)"));
    assert!(!out.contains("input#hidden"));
}

#[test]
fn test_invalid_selector_fails() {
    let fixture = fixture_path("components.xhtml");
    let output = run(&["find", &fixture, "li >"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid selector"));
}

#[test]
fn test_invalid_depth_is_rejected() {
    let fixture = fixture_path("components.xhtml");
    let output = run(&["find", &fixture, "li", "--depth", "0"]);
    assert!(!output.status.success());
}

#[test]
fn test_missing_file_fails() {
    let output = run(&["find", "/no/such/file.xhtml", "div"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read"));
}
