//! Hierarchical code buffer with lazy scope brackets and named slots.
//!
//! A [`Section`] is an ordered list of entries, each a literal line or a
//! nested section. Scope brackets (`namespace X {` / `}  // namespace X`) are
//! not written when a scope is pushed or popped; they are reconciled against
//! what has actually been written right before the next emission, link or
//! flatten. Pushing, popping and re-pushing the same scope chain with nothing
//! emitted in between therefore costs zero output lines.
//!
//! Sections are shared handles: cloning a `Section` aliases the same buffer,
//! which is what lets one slot be filled from several emission sites and be
//! linked at several positions.

pub mod template;


use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::invariants;

pub use template::{Vars, slot_reference, substitute};

/// How a section writes the open and close marker of a scope.
///
/// `{}` in either pattern is replaced by the scope name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeSyntax {
    pub open: &'static str,
    pub close: &'static str,
}

impl ScopeSyntax {
    pub const CPP: Self = Self {
        open: "namespace {} {",
        close: "}  // namespace {}",
    };

    fn open_line(&self, name: &str) -> String {
        self.open.replace("{}", name)
    }

    fn close_line(&self, name: &str) -> String {
        self.close.replace("{}", name)
    }
}

impl Default for ScopeSyntax {
    fn default() -> Self {
        Self::CPP
    }
}

#[derive(Clone)]
enum Entry {
    Line(String),
    Section(Section),
}

struct SectionInner {
    name: String,
    syntax: ScopeSyntax,
    entries: Vec<Entry>,
    /// Scopes callers asked for.
    requested: Vec<String>,
    /// Scopes whose open marker is actually in `entries`.
    emitted: Vec<String>,
    slots: IndexMap<String, Section>,
}

/// Shared handle to a code buffer. Clones alias the same buffer.
#[derive(Clone)]
pub struct Section {
    inner: Rc<RefCell<SectionInner>>,
}

impl fmt::Debug for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Section")
            .field("name", &inner.name)
            .field("entries", &inner.entries.len())
            .field("slots", &inner.slots.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_syntax(name, ScopeSyntax::default())
    }

    pub fn with_syntax(name: impl Into<String>, syntax: ScopeSyntax) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SectionInner {
                name: name.into(),
                syntax,
                entries: Vec::new(),
                requested: Vec::new(),
                emitted: Vec::new(),
                slots: IndexMap::new(),
            })),
        }
    }

    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    /// Whether two handles point at the same buffer.
    pub fn ptr_eq(a: &Section, b: &Section) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }

    /// Append text at the current position, one entry per line.
    ///
    /// Inner empty lines are kept, a trailing line break adds nothing, and
    /// `\r\n` counts as one break. Emitting `""` records one empty line.
    pub fn emit(&self, text: &str) {
        self.validate();
        let mut inner = self.inner.borrow_mut();
        if text.is_empty() {
            inner.entries.push(Entry::Line(String::new()));
            return;
        }
        inner
            .entries
            .extend(text.lines().map(|line| Entry::Line(line.to_string())));
    }

    /// Get or create the slot `name` and link it at the current position.
    pub fn create_slot(&self, name: &str) -> Section {
        let slot = self.create_detached_slot(name);
        self.link(&slot);
        slot
    }

    /// Get or create the slot `name` without linking it anywhere.
    pub fn create_detached_slot(&self, name: &str) -> Section {
        if let Some(existing) = self.slot(name) {
            return existing;
        }
        let syntax = self.inner.borrow().syntax;
        let slot = Section::with_syntax(name, syntax);
        self.inner
            .borrow_mut()
            .slots
            .insert(name.to_string(), slot.clone());
        slot
    }

    pub fn slot(&self, name: &str) -> Option<Section> {
        self.inner.borrow().slots.get(name).cloned()
    }

    /// Insert `section` at the current position.
    ///
    /// A section may be linked at any number of positions, in any number of
    /// parents. Linking a section into itself (directly or through its
    /// descendants) panics.
    pub fn link(&self, section: &Section) {
        if Section::ptr_eq(self, section) || section.reaches(self) {
            invariants::section_cycle(&self.name(), &section.name());
        }
        self.validate();
        self.inner
            .borrow_mut()
            .entries
            .push(Entry::Section(section.clone()));
    }

    /// Request a nested scope. Nothing is written until the next emission.
    pub fn push_scope(&self, name: impl Into<String>) {
        self.inner.borrow_mut().requested.push(name.into());
    }

    /// Drop the innermost requested scope. Nothing is written until the next emission.
    pub fn pop_scope(&self) -> Option<String> {
        self.inner.borrow_mut().requested.pop()
    }

    /// Emit `template` line by line, turning `${#Name}` lines into slot links.
    ///
    /// The first reference to a name creates the slot; later references (or a
    /// slot created earlier through [`Section::create_detached_slot`]) re-link
    /// the same buffer.
    pub fn emit_template(&self, template: &str) {
        for line in template.split('\n') {
            match slot_reference(line) {
                Some(name) => {
                    self.create_slot(name);
                }
                None => self.emit(line),
            }
        }
    }

    /// True when nothing, not even an empty line or a linked slot, was written.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Prepend one line, ahead of everything written so far.
    pub fn add_prefix(&self, line: impl Into<String>) {
        self.inner
            .borrow_mut()
            .entries
            .insert(0, Entry::Line(line.into()));
    }

    /// Flatten into lines, closing every still-open scope first.
    ///
    /// Nested sections expand depth-first, in insertion order. Calling this
    /// again yields the same lines. Requested scopes survive: the next
    /// emission reopens them.
    pub fn lines(&self) -> Vec<String> {
        self.reconcile(&[]);

        let entries = self.inner.borrow().entries.clone();
        let mut out = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry {
                Entry::Line(line) => out.push(line),
                Entry::Section(section) => out.extend(section.lines()),
            }
        }
        out
    }

    /// Reconcile emitted scopes with requested ones.
    fn validate(&self) {
        let requested = self.inner.borrow().requested.clone();
        self.reconcile(&requested);
    }

    /// Bring the emitted scope stack to `target`.
    ///
    /// Closes emitted scopes beyond the common prefix (deepest first), then
    /// opens the remaining target ones (shallowest first).
    fn reconcile(&self, target: &[String]) {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        let common = target
            .iter()
            .zip(&inner.emitted)
            .take_while(|(r, e)| r == e)
            .count();

        while inner.emitted.len() > common {
            let Some(name) = inner.emitted.pop() else {
                break;
            };
            let line = inner.syntax.close_line(&name);
            inner.entries.push(Entry::Line(line));
        }
        for name in &target[common..] {
            let line = inner.syntax.open_line(name);
            inner.entries.push(Entry::Line(line));
            inner.emitted.push(name.clone());
        }
    }

    /// Whether `target` is linked anywhere below `self`.
    fn reaches(&self, target: &Section) -> bool {
        let children: Vec<Section> = self
            .inner
            .borrow()
            .entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::Section(section) => Some(section.clone()),
                Entry::Line(_) => None,
            })
            .collect();
        children
            .iter()
            .any(|child| Section::ptr_eq(child, target) || child.reaches(target))
    }
}
