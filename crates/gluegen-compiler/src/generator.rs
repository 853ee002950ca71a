//! Two-pass orchestration over an ordered set of source files.
//!
//! Pass 1 walks every file in order. Each container visit gets a
//! [`GenContext`]: the first visit of a namespace creates the owning
//! context (and queues a [`Finalizer`] for it), every later visit, from the
//! same file or another one, shares it. Members write into whatever context
//! is active, so a namespace's dispatch code accumulates in the buffer of
//! the file that opened it first.
//!
//! Pass 2 runs the finalizers in the order they were queued, then emits the
//! global glue and resolves includes.

use std::rc::Rc;

use gluegen_core::{Class, Definition, Namespace, SourceFile, load};
use indexmap::IndexMap;

use crate::binding::BindingKind;
use crate::context::{ContainerInfo, ContainerKind, GenContext, NestedContainer};
use crate::diagnostics::Diagnostics;
use crate::emit::{self, Emitter};
use crate::output::{IncludeResolver, OutputBuffer, OutputNames, RenderedFile};
use crate::types::{TypeTable, cpp_qualified, join_path};
use crate::{GlueConfig, Result, invariants};

/// Output of a successful run.
#[derive(Debug)]
pub struct Generated {
    /// The globals output first, then one buffer per source file in input order.
    pub buffers: Vec<OutputBuffer>,
    pub diagnostics: Diagnostics,
    /// Namespace scopes in the order their consolidated glue was emitted.
    pub finalized: Vec<String>,
}

impl Generated {
    /// Flatten every buffer, header before implementation.
    pub fn render(self) -> Vec<RenderedFile> {
        self.buffers.into_iter().flat_map(OutputBuffer::render).collect()
    }
}

/// Deferred emission of one namespace's consolidated glue.
struct Finalizer {
    scope: String,
    context: Rc<GenContext>,
}

/// Run both passes over `files`, in the given order.
///
/// Structural input errors abort the run: no buffers are returned.
pub fn generate(files: &[SourceFile], config: &GlueConfig) -> Result<Generated> {
    load::validate_file_set(files)?;
    let types = TypeTable::build(files, &config.glue_namespace)?;
    Generator::new(files, config, types).run()
}

struct Generator<'a> {
    files: &'a [SourceFile],
    config: &'a GlueConfig,
    types: TypeTable,
    diagnostics: Diagnostics,
    /// Canonical context of every namespace scope seen so far.
    namespaces: IndexMap<String, Rc<GenContext>>,
    finalizers: Vec<Finalizer>,
    scope_headers: IndexMap<String, String>,
    globals: OutputBuffer,
    global: Rc<GenContext>,
}

impl<'a> Generator<'a> {
    fn new(files: &'a [SourceFile], config: &'a GlueConfig, types: TypeTable) -> Self {
        let globals = OutputBuffer::new(OutputNames::synthetic(&config.globals_basename), config);
        let info = ContainerInfo {
            scope: String::new(),
            name: config.globals_basename.clone(),
            kind: ContainerKind::Global,
            glue_namespace: config.glue_namespace.clone(),
            qualifier: String::new(),
        };
        let global = Rc::new(GenContext::new(
            info,
            BindingKind::Globals.model(),
            globals.header().clone(),
            globals.cpp().clone(),
            globals.needs(),
        ));
        Self {
            files,
            config,
            types,
            diagnostics: Diagnostics::new(),
            namespaces: IndexMap::new(),
            finalizers: Vec::new(),
            scope_headers: IndexMap::new(),
            globals,
            global,
        }
    }

    fn run(mut self) -> Result<Generated> {
        let files = self.files;
        let mut buffers = Vec::with_capacity(files.len() + 1);
        for (index, file) in files.iter().enumerate() {
            let _span = tracing::debug_span!("pass1", file = %file.path).entered();
            let buffer = OutputBuffer::new(OutputNames::for_source(file), self.config);
            let file_ctx = Rc::new(GenContext::share(
                &self.global,
                buffer.header().clone(),
                buffer.cpp().clone(),
                buffer.needs(),
            ));
            self.generate_list(&file.definitions, &file_ctx, index)?;
            buffers.push(buffer);
        }

        let finalized = self.finish();

        let Generator {
            config,
            types,
            diagnostics,
            scope_headers,
            globals,
            ..
        } = self;
        buffers.insert(0, globals);

        let resolver = IncludeResolver {
            types: &types,
            files,
            scope_headers: &scope_headers,
        };
        for buffer in &buffers {
            let (header, cpp) = buffer.includes(config, &resolver);
            buffer.add_includes(&header, &cpp);
        }

        tracing::debug!(
            buffers = buffers.len(),
            diagnostics = diagnostics.len(),
            "generation finished"
        );
        Ok(Generated {
            buffers,
            diagnostics,
            finalized,
        })
    }

    /// Pass 2: consolidated namespace glue in registration order, then the root.
    fn finish(&mut self) -> Vec<String> {
        let _span = tracing::debug_span!("pass2", finalizers = self.finalizers.len()).entered();
        let mut finalized = Vec::with_capacity(self.finalizers.len());
        for finalizer in self.finalizers.drain(..) {
            tracing::trace!(scope = %finalizer.scope, "running finalizer");
            emit::namespace_glue(&finalizer.context);
            finalized.push(finalizer.scope);
        }
        emit::global_glue(&self.global);
        finalized
    }

    fn emitter(&mut self, file: usize) -> Emitter<'_> {
        Emitter::new(&self.types, self.config, &self.files[file], &mut self.diagnostics)
    }

    fn generate_list(&mut self, defs: &[Definition], ctx: &Rc<GenContext>, file: usize) -> Result<()> {
        for defn in defs {
            let attrs = defn.attributes();
            if attrs.has("nojs") {
                tracing::trace!(name = ?defn.name(), "nojs member skipped");
                continue;
            }
            if attrs.has("include") {
                if let Some(name) = defn.name() {
                    ctx.file_needs()
                        .definition
                        .insert(join_path(ctx.scope(), name));
                }
            }
            let hidden = attrs.is_hidden();

            match defn {
                Definition::Namespace(ns) => self.namespace(ns, ctx, file)?,
                Definition::Class(_) if hidden => {}
                Definition::Class(class) => self.class(class, ctx, file)?,
                Definition::Function(_)
                | Definition::Variable(_)
                | Definition::Enum(_)
                | Definition::Callback(_)
                    if hidden => {}
                Definition::Function(func) => self.emitter(file).function(ctx, func)?,
                Definition::Variable(var) => self.emitter(file).field(ctx, var)?,
                Definition::Enum(defn) => self.emitter(file).enumeration(ctx, defn),
                Definition::Callback(defn) => self.emitter(file).callback(ctx, defn)?,
                Definition::Verbatim(block) => self.emitter(file).verbatim(ctx, block),
                Definition::Typedef(_) | Definition::Typename(_) => {}
            }
        }
        Ok(())
    }

    fn namespace(&mut self, ns: &Namespace, parent: &Rc<GenContext>, file: usize) -> Result<()> {
        let Some(name) = ns.name.as_deref() else {
            tracing::debug!(scope = %parent.scope(), "anonymous namespace skipped");
            return Ok(());
        };
        let path = join_path(parent.scope(), name);
        let segment = format!("namespace_{name}");
        let header = parent.header().clone();
        let cpp = parent.cpp().clone();
        header.push_scope(segment.as_str());
        cpp.push_scope(segment.as_str());

        let ctx = match self.namespaces.get(&path) {
            Some(canonical) => Rc::new(GenContext::share(
                canonical,
                header.clone(),
                cpp.clone(),
                parent.file_needs_handle(),
            )),
            None => {
                let glue_namespace = format!("{}::{segment}", parent.info().glue_namespace);
                parent.add_nested(NestedContainer {
                    name: name.to_string(),
                    path: path.clone(),
                    kind: ContainerKind::Namespace,
                    glue_namespace: glue_namespace.clone(),
                    base_glue_namespace: None,
                });
                parent.slot_needs().cpp_glue.insert(path.clone());

                let info = ContainerInfo {
                    scope: path.clone(),
                    name: name.to_string(),
                    kind: ContainerKind::Namespace,
                    glue_namespace,
                    qualifier: cpp_qualified(&path),
                };
                let ctx = Rc::new(GenContext::new(
                    info,
                    BindingKind::Globals.model(),
                    header.clone(),
                    cpp.clone(),
                    parent.file_needs_handle(),
                ));
                self.namespaces.insert(path.clone(), Rc::clone(&ctx));
                let glue_header = self.files[file].glue_header();
                self.scope_headers.insert(path.clone(), glue_header);
                self.finalizers.push(Finalizer {
                    scope: path,
                    context: Rc::clone(&ctx),
                });
                ctx
            }
        };

        let result = self.generate_list(&ns.members, &ctx, file);
        header.pop_scope();
        cpp.pop_scope();
        result
    }

    fn class(&mut self, class: &Class, parent: &Rc<GenContext>, file: usize) -> Result<()> {
        let Some(name) = class.name.as_deref() else {
            tracing::debug!(scope = %parent.scope(), "anonymous class skipped");
            return Ok(());
        };
        let path = join_path(parent.scope(), name);
        let ty = self
            .types
            .get(&path)
            .cloned()
            .unwrap_or_else(|| invariants::missing_type(&path));
        let base = ty.base.as_deref().and_then(|b| self.types.get(b)).cloned();

        let segment = format!("class_{name}");
        let glue_namespace = format!("{}::{segment}", parent.info().glue_namespace);
        let header = parent.header().clone();
        let cpp = parent.cpp().clone();
        header.push_scope(segment.as_str());
        cpp.push_scope(segment.as_str());

        parent.add_nested(NestedContainer {
            name: name.to_string(),
            path: path.clone(),
            kind: ContainerKind::Class,
            glue_namespace: glue_namespace.clone(),
            base_glue_namespace: base.as_ref().and_then(|b| b.glue_namespace.clone()),
        });
        parent.slot_needs().cpp_glue.insert(path.clone());
        if let Some(base) = &base {
            parent.slot_needs().cpp_glue.insert(base.path.clone());
        }

        let binding = ty.binding.model();
        let info = ContainerInfo {
            scope: path.clone(),
            name: name.to_string(),
            kind: ContainerKind::Class,
            glue_namespace,
            qualifier: ty.cpp_name.clone(),
        };
        let ctx = Rc::new(GenContext::new(
            info,
            binding,
            header.clone(),
            cpp.clone(),
            parent.file_needs_handle(),
        ));
        let glue_header = self.files[file].glue_header();
        self.scope_headers.insert(path.clone(), glue_header);
        {
            let mut needs = ctx.file_needs();
            needs.definition.insert(path);
            if let Some(include) = binding.extra_include(&ty) {
                needs.header_includes.insert(include);
            }
            if let Some(base) = &base {
                needs.header_glue.insert(base.path.clone());
            }
        }

        let result = self.generate_list(&class.members, &ctx, file);
        if result.is_ok() {
            emit::class_glue(&ctx, &ty, base.as_ref());
        }
        header.pop_scope();
        cpp.pop_scope();
        result
    }
}
