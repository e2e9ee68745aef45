use std::{
    io::Write,
    path::PathBuf,
    process::{Command, Output, Stdio},
};

fn run_bin(input: &str) -> Output {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_array-mean"));

    let mut child = Command::new(bin)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn binary");

    child
        .stdin
        .take()
        .expect("failed to open stdin")
        .write_all(input.as_bytes())
        .expect("failed to write stdin");

    child.wait_with_output().expect("failed to wait for binary")
}

fn stdout_str(output: &Output) -> &str {
    std::str::from_utf8(&output.stdout).expect("failed to convert stdout to string")
}

fn stderr_str(output: &Output) -> &str {
    std::str::from_utf8(&output.stderr).expect("failed to convert stderr to string")
}

#[test]
fn basic_session() {
    let output = run_bin("2\n1.0\n3.0\n");

    assert!(
        output.status.success(),
        "failed to run binary\nstdout:\n{}\nstderr:\n{}\n",
        stdout_str(&output),
        stderr_str(&output)
    );
    assert_eq!(
        stdout_str(&output),
        "Array size: Element 1: Element 2: Mean: 2\n"
    );
    assert_eq!(stderr_str(&output), "");
}

#[test]
fn invalid_input_is_reported_and_retried() {
    let output = run_bin("0\n-1\n3\nabc\n2\n4\n6\n");

    assert!(output.status.success());
    assert_eq!(
        stdout_str(&output),
        "Array size: Array size: Array size: Element 1: Element 1: Element 2: Element 3: Mean: 4\n"
    );
    assert_eq!(
        stderr_str(&output),
        "Invalid array size\nInvalid array size\nInvalid input\n"
    );
}

#[test]
fn end_of_input_exits_with_distinct_code() {
    let output = run_bin("3\n1\n");

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout_str(&output), "Array size: Element 1: Element 2: ");
    assert!(stderr_str(&output).contains("unexpected end of input"));
}

#[test]
fn empty_input_exits_with_distinct_code() {
    let output = run_bin("");

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout_str(&output), "Array size: ");
}
