use std::{
    ffi::OsStr,
    fs,
    path::Path,
    process::{Command, Output},
};

use tempfile::TempDir;

const MEALY: &str = ";A;B\n0;B/x;A/y\n1;A/y;B/x\n";

fn canon<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_canon"))
        .args(args)
        .output()
        .expect("the canon binary can be started")
}

fn workspace_with(table: &str) -> (TempDir, String, String) {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.csv");
    fs::write(&input, table).unwrap();
    let output = dir.path().join("output.csv");
    (
        dir,
        input.to_string_lossy().into_owned(),
        output.to_string_lossy().into_owned(),
    )
}

#[test]
fn minimizes_a_mealy_table() {
    let (_dir, input, output) = workspace_with(MEALY);
    let result = canon(["mealy", input.as_str(), output.as_str()]);

    assert!(result.status.success());
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        ";a1;a2\n0;a2/x;a1/y\n1;a1/y;a2/x\n"
    );
}

#[test]
fn converts_with_a_custom_delimiter() {
    let (_dir, input, output) = workspace_with(&MEALY.replace(';', ","));
    let result = canon(["-d", ",", "mealy-to-moore", input.as_str(), output.as_str()]);

    assert!(result.status.success());
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        ",y,x\n,q0,q1\n0,q1,q0\n1,q0,q1\n"
    );
}

#[test]
fn malformed_tables_fail_without_output() {
    let (_dir, input, output) = workspace_with(";A;B\n0;B/x;Ax\n");
    let result = canon(["mealy", input.as_str(), output.as_str()]);

    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).starts_with("canon: "));
    assert!(!Path::new(&output).exists());
}

#[test]
fn missing_input_fails_without_output() {
    let (dir, _input, output) = workspace_with(MEALY);
    let missing = dir.path().join("missing.csv");
    let result = canon([OsStr::new("moore"), missing.as_os_str(), OsStr::new(&output)]);

    assert_eq!(result.status.code(), Some(1));
    assert!(!Path::new(&output).exists());
}

#[test]
fn usage_errors_are_reported_by_clap() {
    let (_dir, input, output) = workspace_with(MEALY);

    let unknown = canon(["foo", input.as_str(), output.as_str()]);
    assert_eq!(unknown.status.code(), Some(2));

    let missing_argument = canon(["mealy", input.as_str()]);
    assert_eq!(missing_argument.status.code(), Some(2));

    let wide_delimiter = canon(["-d", "§", "mealy", input.as_str(), output.as_str()]);
    assert_eq!(wide_delimiter.status.code(), Some(2));

    assert!(!Path::new(&output).exists());
}
