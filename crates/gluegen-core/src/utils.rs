//! Identifier normalization.
//!
//! Every converter splits its input into words first, so the conversions
//! compose: `to_upper_snake(to_lower_camel(x)) == to_upper_snake(x)`.

/// Split an identifier into lowercase words.
///
/// Words break at `_`, `-`, `.`, at lower→upper transitions, and before the
/// last capital of an acronym run (`HTTPServer` → `http`, `server`).
/// Digits stay attached to the preceding word.
///
/// # Examples
/// ```
/// use gluegen_core::utils::split_words;
/// assert_eq!(split_words("getHTTPServer"), ["get", "http", "server"]);
/// assert_eq!(split_words("set_value2"), ["set", "value2"]);
/// ```
pub fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '_' | '-' | '.' | ' ') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_ascii_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c.to_ascii_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Convert any identifier to PascalCase.
///
/// # Examples
/// ```
/// use gluegen_core::utils::to_pascal_case;
/// assert_eq!(to_pascal_case("foo_bar"), "FooBar");
/// assert_eq!(to_pascal_case("FOO_BAR"), "FooBar");
/// assert_eq!(to_pascal_case("FooBar"), "FooBar");  // idempotent
/// ```
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert any identifier to lowerCamelCase (the host-facing member style).
///
/// # Examples
/// ```
/// use gluegen_core::utils::to_lower_camel;
/// assert_eq!(to_lower_camel("GetValue"), "getValue");
/// assert_eq!(to_lower_camel("set_value"), "setValue");
/// ```
pub fn to_lower_camel(s: &str) -> String {
    let words = split_words(s);
    let mut out = String::with_capacity(s.len());
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Convert any identifier to snake_case.
///
/// # Examples
/// ```
/// use gluegen_core::utils::to_snake_case;
/// assert_eq!(to_snake_case("FooBar"), "foo_bar");
/// assert_eq!(to_snake_case("fooBar"), "foo_bar");
/// ```
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Convert any identifier to UPPER_SNAKE_CASE (used for generated id tags).
///
/// # Examples
/// ```
/// use gluegen_core::utils::to_upper_snake;
/// assert_eq!(to_upper_snake("getValue"), "GET_VALUE");
/// ```
pub fn to_upper_snake(s: &str) -> String {
    to_snake_case(s).to_ascii_uppercase()
}
