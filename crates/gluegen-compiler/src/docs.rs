//! Documentation stub generation.
//!
//! Documentation lives in `verbatim=docs` blocks next to the definitions.
//! For every named definition without a matching block a stub is produced,
//! to be filled in by hand; blocks matching nothing are reported.

use gluegen_core::{DefKind, Definition, SourceFile, walk_all};

use crate::GlueConfig;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::output::RenderedFile;
use crate::section::Section;

/// Stubs for every file that needs some, plus findings about existing blocks.
#[derive(Debug, Clone, Default)]
pub struct DocsOutput {
    pub files: Vec<RenderedFile>,
    pub diagnostics: Diagnostics,
}

/// One `verbatim=docs` block.
#[derive(Debug)]
struct DocBlock {
    name: String,
    kind: String,
    id: Option<String>,
    matched: bool,
}

fn collect_blocks(file: &SourceFile, diagnostics: &mut Diagnostics) -> Vec<DocBlock> {
    let mut blocks = Vec::new();
    for defn in walk_all(&file.definitions) {
        let Definition::Verbatim(block) = defn else {
            continue;
        };
        let attrs = &block.attributes;
        if attrs.value("verbatim") != Some("docs") {
            continue;
        }
        let name = attrs
            .value("name")
            .or(block.name.as_deref())
            .unwrap_or_default()
            .to_string();
        let kind = attrs.value("type").unwrap_or_default().to_string();
        let id = attrs.value("id").map(str::to_string);

        if kind.is_empty() && id.is_none() {
            diagnostics
                .report(DiagnosticKind::DocumentationWithoutTypeOrId, name.as_str())
                .file(file.path.clone())
                .emit();
        }
        if block.text.trim().is_empty() {
            diagnostics
                .report(DiagnosticKind::EmptyDocumentation, name.as_str())
                .file(file.path.clone())
                .emit();
        }
        blocks.push(DocBlock {
            name,
            kind,
            id,
            matched: false,
        });
    }
    blocks
}

fn stub(kind: DefKind, name: &str, id: Option<&str>) -> String {
    let id = id.map(|id| format!(",id={id}")).unwrap_or_default();
    format!("[verbatim=docs,name={name},type={kind}{id}] %{{\n\t{kind} {name}\n%}}")
}

/// Generate stubs for one file into `section`.
fn document_file(file: &SourceFile, section: &Section, diagnostics: &mut Diagnostics) {
    let mut blocks = collect_blocks(file, diagnostics);

    for defn in walk_all(&file.definitions) {
        let kind = defn.kind();
        if matches!(kind, DefKind::Namespace | DefKind::Verbatim) {
            continue;
        }
        let Some(name) = defn.name() else {
            continue;
        };
        let id = defn.attributes().value("id");

        let mut found = false;
        for block in blocks
            .iter_mut()
            .filter(|b| b.name == name && b.kind == kind.as_str())
        {
            if id.is_none() || block.id.as_deref() == id {
                block.matched = true;
                found = true;
            }
        }
        if !found {
            diagnostics
                .report(DiagnosticKind::MissingDocumentation, name)
                .message(format!("{kind} {name}"))
                .file(file.path.clone())
                .emit();
            section.emit(&stub(kind, name, id));
        }
    }

    for block in blocks.iter().filter(|b| !b.matched) {
        let mut report = diagnostics
            .report(DiagnosticKind::DanglingDocumentation, block.name.as_str())
            .message(format!("{} {}", block.kind, block.name))
            .file(file.path.clone());
        if let Some(id) = &block.id {
            report = report.hint(format!("expected a definition with id `{id}`"));
        }
        report.emit();
    }
}

/// Documentation stubs for every file, in input order.
///
/// Files whose members are all documented produce no output.
pub fn generate_docs(files: &[SourceFile], config: &GlueConfig) -> DocsOutput {
    let mut output = DocsOutput::default();
    for file in files {
        let path = file.documentation(&config.docs_suffix);
        let section = Section::new(path.clone());
        document_file(file, &section, &mut output.diagnostics);
        if section.is_empty() {
            tracing::debug!(file = %file.path, "documentation complete");
            continue;
        }
        let mut text = section.lines().join("\n");
        text.push('\n');
        output.files.push(RenderedFile { path, text });
    }
    output
}
