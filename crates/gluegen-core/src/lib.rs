#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for gluegen definition trees.
//!
//! Two layers:
//! - **Input layer**: serde mapping of already-parsed definition files (JSON)
//! - **Model layer**: the closed [`Definition`] enum the generator matches on
//!
//! Parsing of the interface description language itself happens upstream;
//! this crate only describes its output.

use std::fmt;

use indexmap::IndexMap;

pub mod colors;
pub mod load;
pub mod utils;

#[cfg(test)]
mod lib_tests;
#[cfg(test)]
mod load_tests;
#[cfg(test)]
mod utils_tests;

pub use colors::Colors;
pub use load::{LoadError, parse_file_set, parse_source_file};

// ============================================================================
// Attributes
// ============================================================================

/// Raw attribute value as written in the input.
///
/// Flags may be spelled `true`, `""` or any string; `false` drops the key.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(untagged)]
pub enum RawAttribute {
    Flag(bool),
    Number(i64),
    Text(String),
}

/// String-keyed attributes attached to a definition.
///
/// Insertion order is preserved so that anything derived from attributes stays
/// deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(from = "IndexMap<String, RawAttribute>")]
pub struct Attributes(IndexMap<String, String>);

impl From<IndexMap<String, RawAttribute>> for Attributes {
    fn from(raw: IndexMap<String, RawAttribute>) -> Self {
        let map = raw
            .into_iter()
            .filter_map(|(key, value)| match value {
                RawAttribute::Flag(false) => None,
                RawAttribute::Flag(true) => Some((key, String::new())),
                RawAttribute::Number(n) => Some((key, n.to_string())),
                RawAttribute::Text(s) => Some((key, s)),
            })
            .collect();
        Self(map)
    }
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, returning `self` for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Raw value for `key`, including empty flag values.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value for `key` only when it carries text (flags yield `None`).
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// `private` or `protected` members never get glue.
    pub fn is_hidden(&self) -> bool {
        self.has("private") || self.has("protected")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// ============================================================================
// Definitions
// ============================================================================

/// Discriminant of a [`Definition`], used for display and documentation matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DefKind {
    Namespace,
    Class,
    Function,
    Variable,
    Enum,
    Typedef,
    Typename,
    Callback,
    Verbatim,
}

impl DefKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DefKind::Namespace => "Namespace",
            DefKind::Class => "Class",
            DefKind::Function => "Function",
            DefKind::Variable => "Variable",
            DefKind::Enum => "Enum",
            DefKind::Typedef => "Typedef",
            DefKind::Typename => "Typename",
            DefKind::Callback => "Callback",
            DefKind::Verbatim => "Verbatim",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "Namespace" => DefKind::Namespace,
            "Class" => DefKind::Class,
            "Function" => DefKind::Function,
            "Variable" => DefKind::Variable,
            "Enum" => DefKind::Enum,
            "Typedef" => DefKind::Typedef,
            "Typename" => DefKind::Typename,
            "Callback" => DefKind::Callback,
            "Verbatim" => DefKind::Verbatim,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for DefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed parameter of a function or callback.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Param {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Namespace {
    pub name: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub members: Vec<Definition>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Class {
    pub name: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
    /// Base class name, resolved from the class's enclosing scope.
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub members: Vec<Definition>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Function {
    pub name: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
    /// Return type. Absent for constructors and destructors.
    #[serde(rename = "type", default)]
    pub return_type: Option<String>,
    #[serde(default)]
    pub params: Vec<Param>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Variable {
    pub name: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct EnumValue {
    pub name: String,
    #[serde(default)]
    pub value: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Enum {
    pub name: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

impl Enum {
    /// Values with implicit numbering resolved (C rules: previous + 1, from 0).
    pub fn resolved_values(&self) -> Vec<(&str, i64)> {
        let mut next = 0;
        self.values
            .iter()
            .map(|v| {
                let value = v.value.unwrap_or(next);
                next = value + 1;
                (v.name.as_str(), value)
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Typedef {
    pub name: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Typename {
    pub name: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Callback {
    pub name: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(rename = "type", default = "void_type")]
    pub return_type: String,
    #[serde(default)]
    pub params: Vec<Param>,
}

fn void_type() -> String {
    "void".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Verbatim {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub text: String,
}

/// One node of a parsed definition tree.
///
/// The set of kinds is closed: consumers match exhaustively, so a new kind is
/// a compile error everywhere it needs handling.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "kind")]
pub enum Definition {
    Namespace(Namespace),
    Class(Class),
    Function(Function),
    Variable(Variable),
    Enum(Enum),
    Typedef(Typedef),
    Typename(Typename),
    Callback(Callback),
    Verbatim(Verbatim),
}

impl Definition {
    pub fn kind(&self) -> DefKind {
        match self {
            Definition::Namespace(_) => DefKind::Namespace,
            Definition::Class(_) => DefKind::Class,
            Definition::Function(_) => DefKind::Function,
            Definition::Variable(_) => DefKind::Variable,
            Definition::Enum(_) => DefKind::Enum,
            Definition::Typedef(_) => DefKind::Typedef,
            Definition::Typename(_) => DefKind::Typename,
            Definition::Callback(_) => DefKind::Callback,
            Definition::Verbatim(_) => DefKind::Verbatim,
        }
    }

    pub fn name(&self) -> Option<&str> {
        let name = match self {
            Definition::Namespace(d) => &d.name,
            Definition::Class(d) => &d.name,
            Definition::Function(d) => &d.name,
            Definition::Variable(d) => &d.name,
            Definition::Enum(d) => &d.name,
            Definition::Typedef(d) => &d.name,
            Definition::Typename(d) => &d.name,
            Definition::Callback(d) => &d.name,
            Definition::Verbatim(d) => &d.name,
        };
        name.as_deref()
    }

    pub fn attributes(&self) -> &Attributes {
        match self {
            Definition::Namespace(d) => &d.attributes,
            Definition::Class(d) => &d.attributes,
            Definition::Function(d) => &d.attributes,
            Definition::Variable(d) => &d.attributes,
            Definition::Enum(d) => &d.attributes,
            Definition::Typedef(d) => &d.attributes,
            Definition::Typename(d) => &d.attributes,
            Definition::Callback(d) => &d.attributes,
            Definition::Verbatim(d) => &d.attributes,
        }
    }

    /// Child definitions of a container; empty for every other kind.
    pub fn members(&self) -> &[Definition] {
        match self {
            Definition::Namespace(d) => &d.members,
            Definition::Class(d) => &d.members,
            _ => &[],
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Definition::Namespace(_) | Definition::Class(_))
    }

    /// Depth-first, pre-order walk over this definition and all descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Iterator returned by [`Definition::walk`] and [`walk_all`].
pub struct Walk<'a> {
    stack: Vec<&'a Definition>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Definition;

    fn next(&mut self) -> Option<Self::Item> {
        let defn = self.stack.pop()?;
        self.stack.extend(defn.members().iter().rev());
        Some(defn)
    }
}

/// Walk every definition of a list, recursively, in declaration order.
pub fn walk_all(defns: &[Definition]) -> Walk<'_> {
    Walk {
        stack: defns.iter().rev().collect(),
    }
}

// ============================================================================
// Source Files
// ============================================================================

/// One independently-processed input file and its top-level definitions.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct SourceFile {
    /// Path of the IDL file the definitions were parsed from.
    pub path: String,
    #[serde(default)]
    basename: Option<String>,
    /// C++ header declaring the bound types.
    #[serde(default)]
    header: Option<String>,
    #[serde(default)]
    glue_header: Option<String>,
    #[serde(default)]
    glue_cpp: Option<String>,
    #[serde(default)]
    documentation: Option<String>,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, definitions: Vec<Definition>) -> Self {
        Self {
            path: path.into(),
            basename: None,
            header: None,
            glue_header: None,
            glue_cpp: None,
            documentation: None,
            definitions,
        }
    }

    /// File stem used to derive every generated file name.
    pub fn basename(&self) -> String {
        if let Some(basename) = &self.basename {
            return basename.clone();
        }
        let file = self.path.rsplit(['/', '\\']).next().unwrap_or(&self.path);
        match file.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem.to_string(),
            _ => file.to_string(),
        }
    }

    pub fn header(&self) -> String {
        self.header
            .clone()
            .unwrap_or_else(|| format!("{}.h", self.basename()))
    }

    pub fn glue_header(&self) -> String {
        self.glue_header
            .clone()
            .unwrap_or_else(|| format!("{}_glue.h", self.basename()))
    }

    pub fn glue_cpp(&self) -> String {
        self.glue_cpp
            .clone()
            .unwrap_or_else(|| format!("{}_glue.cc", self.basename()))
    }

    /// Name of the documentation stub file, given the configured suffix.
    pub fn documentation(&self, suffix: &str) -> String {
        self.documentation
            .clone()
            .unwrap_or_else(|| format!("{}{}", self.basename(), suffix))
    }
}
