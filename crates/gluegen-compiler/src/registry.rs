//! Ordered identifier tables for generated dispatch code.
//!
//! Each category is an append-only list of (tag, display name) pairs. The
//! n-th entry of a category always gets the same tag within one run, so tags
//! can serve as enum constants in the generated code. Duplicates are kept:
//! two overloads of one method are two entries.

use gluegen_core::utils::{to_lower_camel, to_upper_snake};

use crate::section::Vars;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdCategory {
    Method,
    StaticMethod,
    Property,
    StaticProperty,
    Namespace,
}

impl IdCategory {
    pub const ALL: [IdCategory; 5] = [
        IdCategory::Method,
        IdCategory::StaticMethod,
        IdCategory::Property,
        IdCategory::StaticProperty,
        IdCategory::Namespace,
    ];

    /// Tag prefix of generated constants.
    pub fn prefix(self) -> &'static str {
        match self {
            IdCategory::Method => "METHOD",
            IdCategory::StaticMethod => "STATIC_METHOD",
            IdCategory::Property => "PROPERTY",
            IdCategory::StaticProperty => "STATIC_PROPERTY",
            IdCategory::Namespace => "SCOPE",
        }
    }

    /// Stem of the `${<Stem>Ids}` / `${<Stem>Names}` placeholders.
    pub fn stem(self) -> &'static str {
        match self {
            IdCategory::Method => "Method",
            IdCategory::StaticMethod => "StaticMethod",
            IdCategory::Property => "Property",
            IdCategory::StaticProperty => "StaticProperty",
            IdCategory::Namespace => "Namespace",
        }
    }

    fn index(self) -> usize {
        match self {
            IdCategory::Method => 0,
            IdCategory::StaticMethod => 1,
            IdCategory::Property => 2,
            IdCategory::StaticProperty => 3,
            IdCategory::Namespace => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdEntry {
    pub tag: String,
    /// Host-visible name, unquoted.
    pub name: String,
}

impl IdEntry {
    pub fn new(tag: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            name: name.into(),
        }
    }

    /// The display name as a C++ string literal.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    lists: [Vec<IdEntry>; 5],
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a member under its normalized names.
    ///
    /// Methods and properties display in lowerCamel; scopes keep their name.
    pub fn register(&mut self, category: IdCategory, source_name: &str) -> IdEntry {
        let display = match category {
            IdCategory::Namespace => source_name.to_string(),
            _ => to_lower_camel(source_name),
        };
        let tag = format!("{}_{}", category.prefix(), to_upper_snake(source_name));
        let entry = IdEntry::new(tag, display);
        self.register_entry(category, entry.clone());
        entry
    }

    /// Enum values are static properties tagged `ENUM_<NAME>`, displayed upper-case.
    pub fn register_enum_value(&mut self, value_name: &str) -> IdEntry {
        let upper = to_upper_snake(value_name);
        let entry = IdEntry::new(format!("ENUM_{upper}"), upper);
        self.register_entry(IdCategory::StaticProperty, entry.clone());
        entry
    }

    pub fn register_entry(&mut self, category: IdCategory, entry: IdEntry) {
        self.lists[category.index()].push(entry);
    }

    pub fn entries(&self, category: IdCategory) -> &[IdEntry] {
        &self.lists[category.index()]
    }

    pub fn len(&self, category: IdCategory) -> usize {
        self.entries(category).len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(Vec::is_empty)
    }

    pub fn table(&self, category: IdCategory) -> IdTable<'_> {
        IdTable {
            category,
            entries: self.entries(category),
        }
    }

    /// Placeholder values for the given categories.
    pub fn vars(&self, categories: &[IdCategory]) -> Vars {
        let mut vars = Vars::new();
        for &category in categories {
            vars.extend(self.table(category).vars());
        }
        vars
    }
}

/// Rendered view of one category: an enum of tags plus a parallel name array.
pub struct IdTable<'a> {
    category: IdCategory,
    entries: &'a [IdEntry],
}

impl IdTable<'_> {
    /// Entries with duplicate tags removed; the first occurrence wins.
    fn unique(&self) -> Vec<&IdEntry> {
        let mut seen = std::collections::HashSet::new();
        self.entries
            .iter()
            .filter(|entry| seen.insert(entry.tag.as_str()))
            .collect()
    }

    fn count_constant(&self) -> String {
        format!("NUM_{}_IDS", self.category.prefix())
    }

    pub fn render_ids(&self) -> String {
        let mut out = format!("enum {}Id {{\n", self.category.stem());
        for entry in self.unique() {
            out.push_str(&format!("  {},\n", entry.tag));
        }
        out.push_str(&format!("  {}\n}};", self.count_constant()));
        out
    }

    /// Empty when the category has no entries (zero-length arrays are not C++).
    pub fn render_names(&self) -> String {
        let unique = self.unique();
        if unique.is_empty() {
            return String::new();
        }
        let mut out = format!(
            "static const char* const k{}Names[{}] = {{\n",
            self.category.stem(),
            self.count_constant()
        );
        for entry in unique {
            out.push_str(&format!("  {},\n", entry.quoted()));
        }
        out.push_str("};");
        out
    }

    pub fn vars(&self) -> Vars {
        let stem = self.category.stem();
        Vars::new()
            .with(format!("{stem}Ids"), self.render_ids())
            .with(format!("{stem}Names"), self.render_names())
    }
}
