use crate::utils::{split_words, to_lower_camel, to_pascal_case, to_snake_case, to_upper_snake};

#[test]
fn split_on_separators() {
    assert_eq!(split_words("foo_bar"), ["foo", "bar"]);
    assert_eq!(split_words("foo-bar.baz"), ["foo", "bar", "baz"]);
    assert_eq!(split_words("__foo__"), ["foo"]);
    assert!(split_words("").is_empty());
}

#[test]
fn split_on_case_changes() {
    assert_eq!(split_words("fooBar"), ["foo", "bar"]);
    assert_eq!(split_words("FooBar"), ["foo", "bar"]);
    assert_eq!(split_words("HTTPServer"), ["http", "server"]);
    assert_eq!(split_words("Vec3D"), ["vec3", "d"]);
}

#[test]
fn pascal_case_normalizes() {
    assert_eq!(to_pascal_case("foo_bar"), "FooBar");
    assert_eq!(to_pascal_case("FOO_BAR"), "FooBar");
    assert_eq!(to_pascal_case("foo"), "Foo");
}

#[test]
fn pascal_case_idempotent() {
    assert_eq!(to_pascal_case("FooBar"), "FooBar");
    assert_eq!(to_pascal_case("QRow"), "QRow");
    assert_eq!(to_pascal_case("Q"), "Q");
}

#[test]
fn lower_camel_for_host_names() {
    assert_eq!(to_lower_camel("GetValue"), "getValue");
    assert_eq!(to_lower_camel("get_value"), "getValue");
    assert_eq!(to_lower_camel("update"), "update");
    assert_eq!(to_lower_camel("X"), "x");
}

#[test]
fn snake_and_upper_snake() {
    assert_eq!(to_snake_case("FooBar"), "foo_bar");
    assert_eq!(to_snake_case("fooBarBaz"), "foo_bar_baz");
    assert_eq!(to_upper_snake("getValue"), "GET_VALUE");
    assert_eq!(to_upper_snake("RED"), "RED");
}

#[test]
fn conversions_compose() {
    for name in ["getHTTPServer", "set_value", "Alpha", "a_b_c"] {
        assert_eq!(to_upper_snake(&to_lower_camel(name)), to_upper_snake(name));
    }
}
