//! Slot markers and `${Key}` placeholder substitution.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::{Captures, Regex};

/// A line holding only `${#Name}`, surrounding whitespace allowed.
static SLOT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\$\{#([_A-Za-z0-9]+)\}\s*$").expect("slot marker regex is valid")
});

/// `${Key}` where `Key` is an identifier. `${#Slot}` never matches.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([_A-Za-z][_A-Za-z0-9]*)\}").expect("placeholder regex is valid")
});

/// Name of the slot referenced by `line`, if the line is a slot marker.
pub fn slot_reference(line: &str) -> Option<&str> {
    SLOT_MARKER
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Ordered placeholder values for [`substitute`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vars(IndexMap<String, String>);

impl Vars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Add every entry of `other`, overwriting existing keys.
    pub fn extend(&mut self, other: Vars) {
        self.0.extend(other.0);
    }
}

/// Replace each known `${Key}` in `text` with its value.
///
/// Unknown keys and slot markers are left as they are, so a template can be
/// filled in several rounds. Substituted values are not scanned again.
pub fn substitute(text: &str, vars: &Vars) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures<'_>| match vars.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
