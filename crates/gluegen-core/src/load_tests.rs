use indoc::indoc;

use crate::load::{LoadError, parse_file_set, parse_source_file};
use crate::{DefKind, Definition};

#[test]
fn single_file_object() {
    let file = parse_source_file(indoc! {r#"
        {
          "path": "idl/plugin.idl",
          "definitions": [
            {"kind": "Function", "name": "ping", "type": "void"}
          ]
        }
    "#})
    .unwrap();

    assert_eq!(file.basename(), "plugin");
    assert_eq!(file.glue_header(), "plugin_glue.h");
    assert_eq!(file.glue_cpp(), "plugin_glue.cc");
    assert_eq!(file.header(), "plugin.h");
    assert_eq!(file.definitions.len(), 1);
    assert_eq!(file.definitions[0].kind(), DefKind::Function);
}

#[test]
fn explicit_file_names_win() {
    let file = parse_source_file(indoc! {r#"
        {
          "path": "a.idl",
          "basename": "alpha",
          "header": "include/alpha.h",
          "glue_header": "alpha_bindings.h"
        }
    "#})
    .unwrap();

    assert_eq!(file.basename(), "alpha");
    assert_eq!(file.header(), "include/alpha.h");
    assert_eq!(file.glue_header(), "alpha_bindings.h");
    assert_eq!(file.glue_cpp(), "alpha_glue.cc");
    assert_eq!(file.documentation("_docs.idl"), "alpha_docs.idl");
}

#[test]
fn file_set_shapes() {
    let wrapped = parse_file_set(r#"{"files": [{"path": "a.idl"}, {"path": "b.idl"}]}"#).unwrap();
    let bare = parse_file_set(r#"[{"path": "a.idl"}, {"path": "b.idl"}]"#).unwrap();
    let single = parse_file_set(r#"{"path": "a.idl"}"#).unwrap();

    assert_eq!(wrapped, bare);
    assert_eq!(wrapped[1].path, "b.idl");
    assert_eq!(single.len(), 1);
}

#[test]
fn duplicate_paths_rejected() {
    let err = parse_file_set(r#"[{"path": "a.idl"}, {"path": "a.idl"}]"#).unwrap_err();
    assert!(matches!(err, LoadError::DuplicatePath(p) if p == "a.idl"));
}

#[test]
fn empty_path_rejected() {
    let err = parse_file_set(r#"[{"path": "a.idl"}, {"path": " "}]"#).unwrap_err();
    assert!(matches!(err, LoadError::EmptyPath(1)));
}

#[test]
fn unknown_kind_is_a_json_error() {
    let err = parse_source_file(r#"{"path": "a.idl", "definitions": [{"kind": "Module"}]}"#)
        .unwrap_err();
    assert!(matches!(err, LoadError::Json(_)));
}

#[test]
fn nested_members_load() {
    let file = parse_source_file(indoc! {r#"
        {
          "path": "a.idl",
          "definitions": [
            {"kind": "Namespace", "name": "media", "members": [
              {"kind": "Class", "name": "Player", "base": "Node", "members": [
                {"kind": "Function", "name": "Player", "params": [{"name": "url", "type": "string"}]},
                {"kind": "Variable", "name": "volume", "type": "float", "attributes": {"getter": true, "setter": true}}
              ]}
            ]}
          ]
        }
    "#})
    .unwrap();

    let Definition::Namespace(ns) = &file.definitions[0] else {
        panic!("expected namespace");
    };
    let Definition::Class(class) = &ns.members[0] else {
        panic!("expected class");
    };
    assert_eq!(class.base.as_deref(), Some("Node"));
    let Definition::Function(ctor) = &class.members[0] else {
        panic!("expected function");
    };
    assert_eq!(ctor.return_type, None);
    assert_eq!(ctor.params[0].type_name, "string");
    assert!(class.members[1].attributes().has("setter"));
}
