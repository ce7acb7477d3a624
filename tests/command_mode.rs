//! Integration tests for the `sheet` CLI, driven as a subprocess the same
//! way `gridline`'s `tests/command_mode.rs` drives `cargo run`.

use std::io::Write;
use std::process::{Command, Stdio};

fn run_command(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .arg("run")
        .arg("-q")
        .arg("--")
        .args(args)
        .output()
        .expect("failed to execute sheet binary");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn run_repl(commands: &[&str]) -> (String, i32) {
    let mut child = Command::new("cargo")
        .arg("run")
        .arg("-q")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn sheet binary");

    {
        let stdin = child.stdin.as_mut().expect("stdin was piped");
        for line in commands {
            writeln!(stdin, "{line}").unwrap();
        }
    }

    let output = child.wait_with_output().expect("failed to wait on child");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let exit_code = output.status.code().unwrap_or(-1);
    (stdout, exit_code)
}

#[test]
fn test_basic_arithmetic() {
    let (stdout, _, code) = run_command(&["-c", "5+3"]);
    assert_eq!(stdout.trim(), "8");
    assert_eq!(code, 0);
}

#[test]
fn test_auto_prepend_equals() {
    let (stdout1, _, _) = run_command(&["-c", "10+5"]);
    let (stdout2, _, _) = run_command(&["-c", "=10+5"]);
    assert_eq!(stdout1, stdout2);
}

#[test]
fn test_division_by_zero_exits_nonzero() {
    let (stdout, _, code) = run_command(&["-c", "1/0"]);
    assert_eq!(stdout.trim(), "#DIV/0!");
    assert_eq!(code, 1);
}

#[test]
fn test_parse_error_exits_nonzero() {
    let (_, _, code) = run_command(&["-c", "1+"]);
    assert_eq!(code, 1);
}

#[test]
fn test_plain_number() {
    let (stdout, _, code) = run_command(&["-c", "42"]);
    assert_eq!(stdout.trim(), "42");
    assert_eq!(code, 0);
}

#[test]
fn test_repl_set_and_get() {
    let (stdout, code) = run_repl(&["set A1 7", "set B1 =A1+3", "get B1", "quit"]);
    assert_eq!(stdout.trim(), "10");
    assert_eq!(code, 0);
}

#[test]
fn test_repl_circular_dependency_reported_on_stderr() {
    let mut child = Command::new("cargo")
        .arg("run")
        .arg("-q")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn sheet binary");

    {
        let stdin = child.stdin.as_mut().expect("stdin was piped");
        writeln!(stdin, "set A1 =A1").unwrap();
        writeln!(stdin, "get A1").unwrap();
        writeln!(stdin, "quit").unwrap();
    }

    let output = child.wait_with_output().expect("failed to wait on child");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    assert!(stderr.contains("circular"));
    // The rejected edit must leave A1 empty.
    assert_eq!(stdout.trim(), "");
}

#[test]
fn test_repl_print_and_clear() {
    let (stdout, code) = run_repl(&["set A1 hi", "set C1 =1+1", "print", "quit"]);
    assert_eq!(stdout.trim(), "hi\t\t2");
    assert_eq!(code, 0);
}
