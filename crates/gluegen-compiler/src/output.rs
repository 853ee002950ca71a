//! Composite output buffers and their final text.
//!
//! A buffer pairs the declaration section (glue header) and the definition
//! section (glue implementation) of one output file with the include
//! bookkeeping collected while generating it. Nothing is flattened before
//! [`OutputBuffer::render`], so prefixes can still be added until then.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use gluegen_core::SourceFile;
use gluegen_core::utils::to_upper_snake;
use indexmap::IndexMap;

use crate::GlueConfig;
use crate::context::{FileNeeds, SharedNeeds};
use crate::section::Section;
use crate::types::TypeTable;

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: String,
    pub text: String,
}

/// File names of one output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNames {
    pub basename: String,
    pub header: String,
    pub cpp: String,
    /// Header declaring the bound types; absent for the synthetic globals output.
    pub definition_header: Option<String>,
}

impl OutputNames {
    pub fn for_source(file: &SourceFile) -> Self {
        Self {
            basename: file.basename(),
            header: file.glue_header(),
            cpp: file.glue_cpp(),
            definition_header: Some(file.header()),
        }
    }

    pub fn synthetic(basename: &str) -> Self {
        Self {
            basename: basename.to_string(),
            header: format!("{basename}_glue.h"),
            cpp: format!("{basename}_glue.cc"),
            definition_header: None,
        }
    }
}

#[derive(Debug)]
pub struct OutputBuffer {
    names: OutputNames,
    header: Section,
    cpp: Section,
    needs: SharedNeeds,
    /// Scopes pushed on both sections for the glue namespace.
    glue_depth: usize,
    include_guards: bool,
}

/// Maps the needs of a buffer to include lines.
pub(crate) struct IncludeResolver<'a> {
    pub(crate) types: &'a TypeTable,
    pub(crate) files: &'a [SourceFile],
    /// Glue header holding the consolidated glue of each container scope.
    pub(crate) scope_headers: &'a IndexMap<String, String>,
}

impl IncludeResolver<'_> {
    fn glue_header(&self, path: &str) -> Option<String> {
        if let Some(header) = self.scope_headers.get(path) {
            return Some(header.clone());
        }
        let file = self.types.get(path)?.file?;
        self.files.get(file).map(SourceFile::glue_header)
    }

    fn definition(&self, path: &str) -> Option<String> {
        self.types.get(path)?.definition_include.clone()
    }
}

impl OutputBuffer {
    pub fn new(names: OutputNames, config: &GlueConfig) -> Self {
        let header = Section::new(names.header.clone());
        let cpp = Section::new(names.cpp.clone());
        let segments: Vec<&str> = config
            .glue_namespace
            .split("::")
            .filter(|s| !s.is_empty())
            .collect();
        for segment in &segments {
            header.push_scope(*segment);
            cpp.push_scope(*segment);
        }
        Self {
            names,
            header,
            cpp,
            needs: Rc::new(RefCell::new(FileNeeds::default())),
            glue_depth: segments.len(),
            include_guards: config.include_guards,
        }
    }

    pub fn names(&self) -> &OutputNames {
        &self.names
    }

    pub fn basename(&self) -> &str {
        &self.names.basename
    }

    /// Declaration surface, inside the glue namespace.
    pub fn header(&self) -> &Section {
        &self.header
    }

    /// Definition surface, inside the glue namespace.
    pub fn cpp(&self) -> &Section {
        &self.cpp
    }

    pub fn needs(&self) -> SharedNeeds {
        Rc::clone(&self.needs)
    }

    /// Sorted, deduplicated includes of both surfaces, defaults first.
    pub(crate) fn includes(&self, config: &GlueConfig, resolver: &IncludeResolver<'_>) -> (Vec<String>, Vec<String>) {
        let needs = self.needs.borrow();

        let mut header = BTreeSet::new();
        header.extend(needs.definition.iter().filter_map(|p| resolver.definition(p)));
        header.extend(needs.header_glue.iter().filter_map(|p| resolver.glue_header(p)));
        header.extend(needs.header_includes.iter().cloned());
        header.remove(&self.names.header);

        let mut cpp = BTreeSet::new();
        cpp.insert(self.names.header.clone());
        cpp.extend(needs.cpp_glue.iter().filter_map(|p| resolver.glue_header(p)));
        cpp.extend(needs.cpp_includes.iter().cloned());

        (
            with_defaults(&config.header_includes, header),
            with_defaults(&config.cpp_includes, cpp),
        )
    }

    /// Prepend include lines to both surfaces.
    pub(crate) fn add_includes(&self, header: &[String], cpp: &[String]) {
        prefix_includes(&self.header, header);
        prefix_includes(&self.cpp, cpp);
    }

    /// Flatten both surfaces. The header gets its include guard here.
    pub fn render(self) -> [RenderedFile; 2] {
        for _ in 0..self.glue_depth {
            self.header.pop_scope();
            self.cpp.pop_scope();
        }

        if self.include_guards {
            let guard = guard_name(&self.names.header);
            self.header.add_prefix("");
            self.header.add_prefix(format!("#define {guard}"));
            self.header.add_prefix(format!("#ifndef {guard}"));
            self.header.emit("");
            self.header.emit(&format!("#endif  // {guard}"));
        }

        [
            RenderedFile {
                path: self.names.header.clone(),
                text: join_lines(&self.header),
            },
            RenderedFile {
                path: self.names.cpp.clone(),
                text: join_lines(&self.cpp),
            },
        ]
    }
}

fn with_defaults(defaults: &[String], computed: BTreeSet<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(defaults.len() + computed.len());
    for include in defaults {
        if !out.contains(include) {
            out.push(include.clone());
        }
    }
    out.extend(computed.into_iter().filter(|i| !defaults.contains(i)));
    out
}

fn prefix_includes(section: &Section, includes: &[String]) {
    if includes.is_empty() {
        return;
    }
    section.add_prefix("");
    for include in includes.iter().rev() {
        section.add_prefix(format!("#include \"{include}\""));
    }
}

/// `media/player_glue.h` → `GLUE_MEDIA_PLAYER_GLUE_H_`.
pub fn guard_name(file_name: &str) -> String {
    let flat: String = file_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("GLUE_{}_", to_upper_snake(&flat))
}

fn join_lines(section: &Section) -> String {
    let mut text = section.lines().join("\n");
    text.push('\n');
    text
}
