//! End-to-end tests for the `demangle_dump` binary.

use std::io::Write;
use std::process::{Command, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_demangle_dump");

const DUMP: &str = "var x N5_int64 = foo123\n\tcall FpzVzVee (Mz__z)\n";
const EXPECTED: &str = "var x int64 = foo123\n\tcall func{(string, string)...} (map[string]string)\n";

#[test]
fn filters_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("dump.txt");
    let output = dir.path().join("out.txt");
    std::fs::write(&input, DUMP).expect("write input");
    // Existing longer content must not survive.
    std::fs::write(&output, "x".repeat(500)).expect("write output");

    let status = Command::new(BIN)
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .status()
        .expect("run");
    assert!(status.success());
    assert_eq!(std::fs::read_to_string(&output).expect("read"), EXPECTED);
}

#[test]
fn filters_stdin_to_stdout() {
    let mut child = Command::new(BIN)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(DUMP.as_bytes())
        .expect("write stdin");
    let out = child.wait_with_output().expect("wait");
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).expect("utf8"), EXPECTED);
    // Default level is warn: nothing logged for a clean run.
    assert!(out.stderr.is_empty());
}

#[test]
fn verbose_logs_to_stderr_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("dump.txt");
    std::fs::write(&input, DUMP).expect("write input");

    let out = Command::new(BIN)
        .env_remove("RUST_LOG")
        .args(["-v", "2", "-i"])
        .arg(&input)
        .output()
        .expect("run");
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).expect("utf8"), EXPECTED);
    let log = String::from_utf8(out.stderr).expect("utf8");
    assert!(log.contains("substituted"), "log: {}", log);
}

#[test]
fn missing_input_file_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = Command::new(BIN)
        .arg("-i")
        .arg(dir.path().join("nope.txt"))
        .output()
        .expect("run");
    assert!(!out.status.success());
    let err = String::from_utf8(out.stderr).expect("utf8");
    assert!(err.contains("nope.txt"), "stderr: {}", err);
}

#[test]
fn extra_arguments_are_rejected() {
    let out = Command::new(BIN).arg("stray").output().expect("run");
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn non_utf8_and_deep_lines_do_not_stop_the_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("dump.bin");
    let output = dir.path().join("out.txt");
    let deep = "p".repeat(500_000) + "z";
    let mut dump = b"var x N5_int64\nbad \xff byte\n".to_vec();
    dump.extend_from_slice(deep.as_bytes());
    dump.extend_from_slice(b"\nlast Mz__z\n");
    std::fs::write(&input, &dump).expect("write input");

    let out = Command::new(BIN)
        .env_remove("RUST_LOG")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .output()
        .expect("run");
    assert!(out.status.success());
    let mut expected = b"var x int64\nbad \xff byte\n".to_vec();
    expected.extend_from_slice(deep.as_bytes());
    expected.extend_from_slice(b"\nlast map[string]string\n");
    assert_eq!(std::fs::read(&output).expect("read"), expected);
}
