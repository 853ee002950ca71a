use std::fs;

use indoc::indoc;

use super::CliError;
use super::input::load_files;

const A: &str = indoc! {r#"
    {"path": "a.idl", "definitions": [
      {"kind": "Function", "name": "foo", "type": "void"}
    ]}
"#};

const SET: &str = indoc! {r#"
    {"files": [
      {"path": "b.idl", "definitions": []},
      {"path": "c.idl", "definitions": []}
    ]}
"#};

#[test]
fn concatenates_inputs_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let set = dir.path().join("set.json");
    let a = dir.path().join("a.json");
    fs::write(&set, SET).unwrap();
    fs::write(&a, A).unwrap();

    let files = load_files(&[set, a]).unwrap();
    let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, ["b.idl", "c.idl", "a.idl"]);
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    let err = load_files(&[missing.clone()]).unwrap_err();
    match err {
        CliError::Read { path, .. } => assert_eq!(path, missing),
        other => panic!("expected read error, got {other:?}"),
    }
}

#[test]
fn malformed_json_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.json");
    fs::write(&bad, "{not json").unwrap();

    let err = load_files(&[bad.clone()]).unwrap_err();
    assert!(matches!(&err, CliError::Parse { path, .. } if *path == bad));
    assert!(err.to_string().contains("bad.json"));
}

#[test]
fn same_source_path_across_inputs_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");
    fs::write(&first, A).unwrap();
    fs::write(&second, A).unwrap();

    let err = load_files(&[first, second]).unwrap_err();
    assert!(err.to_string().contains("`a.idl` appears more than once"));
}
