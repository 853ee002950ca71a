//! Per-member emission recipes and consolidated container glue.
//!
//! Every callable and property becomes a *guarded block*: a
//! `do { ... } while (false)` body that clears `success` when a conversion
//! fails and then breaks out, so control falls through to the next candidate
//! block and eventually to the base class or "not found" tail of the
//! dispatcher.

mod callback;
mod container;
mod enums;
mod field;
mod function;
pub mod templates;
mod verbatim;

#[cfg(test)]
mod container_tests;
#[cfg(test)]
mod emit_tests;

pub use container::{class_glue, global_glue, namespace_glue};

use gluegen_core::SourceFile;

use crate::GlueConfig;
use crate::binding::MarshalEnv;
use crate::context::GenContext;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::registry::IdCategory;
use crate::types::{TypeDefn, TypeKind, TypeTable};

/// Statement ending a guarded block when a conversion failed.
pub const FALLTHROUGH: &str = "if (!success) break;";

/// Indentation of code inside a dispatcher function body.
const BODY_INDENT: usize = 2;

/// Shared inputs of the member recipes for one source file.
pub struct Emitter<'a> {
    pub(crate) types: &'a TypeTable,
    pub(crate) config: &'a GlueConfig,
    pub(crate) file: &'a SourceFile,
    pub(crate) diagnostics: &'a mut Diagnostics,
}

impl<'a> Emitter<'a> {
    pub fn new(
        types: &'a TypeTable,
        config: &'a GlueConfig,
        file: &'a SourceFile,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            types,
            config,
            file,
            diagnostics,
        }
    }

    fn env(&self) -> MarshalEnv<'a> {
        MarshalEnv {
            success: "success",
            exception_macro: &self.config.exception_macro,
        }
    }

    /// Bracket `code` with the exception context macro naming `what`.
    fn in_context(&self, what: &str, code: &str) -> String {
        if code.is_empty() {
            return String::new();
        }
        let name = &self.config.exception_macro;
        format!("#define {name} \"{what}\"\n{code}\n#undef {name}")
    }

    /// Warn when `ctx` already holds a callable with this name and arity.
    fn check_overload(&mut self, ctx: &GenContext, category: IdCategory, name: &str, arity: usize) {
        if ctx.record_signature(category, name, arity) {
            let member = crate::types::join_path(ctx.scope(), name);
            self.diagnostics
                .report(DiagnosticKind::AmbiguousOverload, member)
                .message(name)
                .file(self.file.path.clone())
                .hint(format!("both blocks test `{arity}` arguments; only the first can match"))
                .emit();
        }
    }

    /// Record what the slot owner's implementation needs to use `ty`.
    fn note_slot_use(&self, ctx: &GenContext, ty: &TypeDefn) {
        if ty.kind == TypeKind::Builtin {
            return;
        }
        let mut needs = ctx.slot_needs();
        if ty.glue_namespace.is_some() {
            needs.cpp_glue.insert(ty.path.clone());
        }
        if let Some(include) = &ty.definition_include {
            needs.cpp_includes.insert(include.clone());
        }
    }

    /// Record what this file's glue header needs to declare something using `ty`.
    fn note_header_use(&self, ctx: &GenContext, ty: &TypeDefn) {
        if ty.kind == TypeKind::Builtin {
            return;
        }
        let mut needs = ctx.file_needs();
        needs.definition.insert(ty.path.clone());
        if let Some(include) = ty.binding.model().extra_include(ty) {
            needs.header_includes.insert(include);
        }
    }

    /// The slot owner calls into this file's declarations.
    fn note_call_site(&self, ctx: &GenContext, userglue: bool) {
        let mut needs = ctx.slot_needs();
        needs.cpp_includes.insert(self.file.header());
        if userglue {
            needs.cpp_includes.insert(self.file.glue_header());
        }
    }
}

/// A guarded dispatch block under construction.
pub(crate) struct GuardedBlock {
    condition: String,
    body: Vec<String>,
}

impl GuardedBlock {
    pub(crate) fn new(condition: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            body: Vec::new(),
        }
    }

    /// Append statements that cannot fail.
    pub(crate) fn code(&mut self, code: &str) {
        if !code.is_empty() {
            self.body.push(code.to_string());
        }
    }

    /// Append statements that may clear `success`, followed by the fallthrough.
    pub(crate) fn checked(&mut self, code: &str) {
        if !code.is_empty() {
            self.body.push(code.to_string());
            self.body.push(FALLTHROUGH.to_string());
        }
    }

    pub(crate) fn render(self) -> String {
        let mut inner = vec!["bool success = true;".to_string()];
        inner.extend(self.body);
        inner.push("return true;".to_string());
        let block = format!(
            "if ({}) do {{\n{}\n}} while (false);",
            self.condition,
            indent(&inner.join("\n"), 2)
        );
        indent(&block, BODY_INDENT)
    }
}

/// Indent every line by `depth` spaces. Blank lines and preprocessor
/// directives stay in column 0; lines that are already indented further
/// keep their relative indentation.
pub(crate) fn indent(code: &str, depth: usize) -> String {
    let pad = " ".repeat(depth);
    code.split('\n')
        .map(|line| {
            if line.is_empty() || line.starts_with('#') {
                line.to_string()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Membership probe answering "does this name exist" without marshaling.
pub(crate) fn probe(category: IdCategory, tag: &str) -> String {
    format!(
        "  if (name == k{}Names[{tag}]) return true;",
        category.stem()
    )
}

/// Name comparison against a registered id.
pub(crate) fn name_matches(category: IdCategory, tag: &str) -> String {
    format!("name == k{}Names[{tag}]", category.stem())
}
