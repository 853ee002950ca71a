use indexmap::IndexMap;

use crate::{Attributes, DefKind, Definition, Enum, EnumValue, RawAttribute, SourceFile, walk_all};

fn defs(json: &str) -> Vec<Definition> {
    serde_json::from_str(json).unwrap()
}

#[test]
fn attribute_flags_and_values() {
    let mut raw = IndexMap::new();
    raw.insert("static".to_string(), RawAttribute::Flag(true));
    raw.insert("nojs".to_string(), RawAttribute::Flag(false));
    raw.insert("getter".to_string(), RawAttribute::Text(String::new()));
    raw.insert("setter".to_string(), RawAttribute::Text("put_value".to_string()));
    raw.insert("id".to_string(), RawAttribute::Number(7));
    let attrs = Attributes::from(raw);

    assert!(attrs.has("static"));
    assert!(!attrs.has("nojs"));
    assert_eq!(attrs.get("getter"), Some(""));
    assert_eq!(attrs.value("getter"), None);
    assert_eq!(attrs.value("setter"), Some("put_value"));
    assert_eq!(attrs.value("id"), Some("7"));
}

#[test]
fn hidden_members() {
    assert!(Attributes::new().with("private", "").is_hidden());
    assert!(Attributes::new().with("protected", "").is_hidden());
    assert!(!Attributes::new().with("static", "").is_hidden());
}

#[test]
fn kind_names_roundtrip() {
    for kind in [
        DefKind::Namespace,
        DefKind::Class,
        DefKind::Function,
        DefKind::Variable,
        DefKind::Enum,
        DefKind::Typedef,
        DefKind::Typename,
        DefKind::Callback,
        DefKind::Verbatim,
    ] {
        assert_eq!(DefKind::from_name(kind.as_str()), Some(kind));
    }
    assert_eq!(DefKind::from_name("Module"), None);
}

#[test]
fn enum_values_number_like_c() {
    let e = Enum {
        name: Some("Color".into()),
        attributes: Attributes::new(),
        values: vec![
            EnumValue { name: "RED".into(), value: None },
            EnumValue { name: "GREEN".into(), value: Some(5) },
            EnumValue { name: "BLUE".into(), value: None },
        ],
    };
    assert_eq!(e.resolved_values(), [("RED", 0), ("GREEN", 5), ("BLUE", 6)]);
}

#[test]
fn walk_is_preorder_in_declaration_order() {
    let list = defs(r#"[
        {"kind": "Namespace", "name": "a", "members": [
            {"kind": "Function", "name": "f", "type": "void"},
            {"kind": "Class", "name": "C", "members": [
                {"kind": "Variable", "name": "v", "type": "int"}
            ]}
        ]},
        {"kind": "Typename", "name": "T"}
    ]"#);

    let names: Vec<_> = walk_all(&list).map(|d| d.name().unwrap_or("?")).collect();
    assert_eq!(names, ["a", "f", "C", "v", "T"]);
}

#[test]
fn callback_defaults_to_void() {
    let list = defs(r#"[{"kind": "Callback", "name": "OnDone"}]"#);
    let Definition::Callback(cb) = &list[0] else {
        panic!("expected callback");
    };
    assert_eq!(cb.return_type, "void");
    assert!(cb.params.is_empty());
}

#[test]
fn basename_from_path() {
    assert_eq!(SourceFile::new("dir/sub/thing.idl", vec![]).basename(), "thing");
    assert_eq!(SourceFile::new("noext", vec![]).basename(), "noext");
    assert_eq!(SourceFile::new("c:\\idl\\x.idl", vec![]).basename(), "x");
}
