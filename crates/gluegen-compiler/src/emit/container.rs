//! Consolidated glue of namespaces, classes and the global scope.
//!
//! Run once per container, after every member has been emitted: the
//! identifier tables and nested-container registration only make sense
//! once all contributions, from all files, are in.

use super::templates::{
    BASE_FALLBACKS, CREATE_NESTED, GET_ROOT_OBJECT, GET_STATIC_OBJECT, ID_TABLES, INIT_CLASS_GLUE,
    OBJECT_WRAPPER_CPP, OBJECT_WRAPPER_HEADER, REGISTER_BASE, REGISTER_NO_BASE, REGISTER_WRAPPERS,
    ROOT_FALLBACKS, STATIC_OBJECT_CPP, STATIC_OBJECT_HEADER,
};
use crate::binding::RUNTIME_NAMESPACE;
use crate::context::{ContainerKind, GenContext, Slot};
use crate::registry::IdCategory;
use crate::section::{Vars, substitute};
use crate::types::TypeDefn;

fn emit_to(ctx: &GenContext, slot: Slot, template: &str, vars: &Vars) {
    if let Some(section) = ctx.slot(slot) {
        section.emit(&substitute(template, vars));
    }
}

/// Registration of every nested namespace and class in the parent's slots.
fn register_nested(ctx: &GenContext) {
    let nested = ctx.nested().clone();
    let tags: Vec<String> = ctx
        .registry()
        .entries(IdCategory::Namespace)
        .iter()
        .map(|e| e.tag.clone())
        .collect();

    let parent_lookup = match ctx.kind() {
        ContainerKind::Global => "root_object".to_string(),
        _ => format!(
            "::{}::StaticObject::GetStaticObject(root_object)",
            ctx.info().glue_namespace
        ),
    };

    let parent = format!("::{}", ctx.info().glue_namespace);

    for (container, tag) in nested.iter().zip(&tags) {
        let vars = Vars::new()
            .with("Runtime", RUNTIME_NAMESPACE)
            .with("Parent", parent.as_str())
            .with("Segment", container.glue_segment())
            .with("Tag", tag.as_str())
            .with("ParentLookup", parent_lookup.as_str())
            .with(
                "BaseNamespace",
                container.base_glue_namespace.clone().unwrap_or_default(),
            );

        emit_to(ctx, Slot::CreateNamespaces, CREATE_NESTED, &vars);
        if container.base_glue_namespace.is_some() {
            emit_to(ctx, Slot::RegisterBases, REGISTER_BASE, &vars);
        }
        emit_to(ctx, Slot::RegisterBases, REGISTER_NO_BASE, &vars);
        emit_to(ctx, Slot::RegisterObjectWrappers, REGISTER_WRAPPERS, &vars);
        if container.kind == ContainerKind::Class {
            emit_to(ctx, Slot::InitNamespaceGlues, INIT_CLASS_GLUE, &vars);
        }
        if let Some(section) = ctx.slot(Slot::GetStaticObjects) {
            section.push_scope(container.glue_segment());
            section.emit(&substitute(GET_STATIC_OBJECT, &vars));
            section.pop_scope();
        }
    }
}

fn emit_static_object(ctx: &GenContext) {
    register_nested(ctx);
    let mut vars = ctx.registry().vars(&IdCategory::ALL);
    vars.set("Runtime", RUNTIME_NAMESPACE);

    ctx.glue_header().emit(&substitute(STATIC_OBJECT_HEADER, &vars));
    ctx.glue_cpp().emit(&substitute(ID_TABLES, &vars));
    ctx.glue_cpp()
        .emit_template(&substitute(STATIC_OBJECT_CPP, &vars));
}

/// Consolidated glue of a namespace: its static object.
pub fn namespace_glue(ctx: &GenContext) {
    tracing::debug!(scope = %ctx.scope(), ownership = ?ctx.ownership(), "namespace glue");
    emit_static_object(ctx);
}

/// Glue of the global scope: the root static object and its lookup.
pub fn global_glue(ctx: &GenContext) {
    tracing::debug!(nested = ctx.nested().len(), "global glue");
    emit_static_object(ctx);
    ctx.glue_cpp()
        .emit(&substitute(GET_ROOT_OBJECT, &Vars::new().with("Runtime", RUNTIME_NAMESPACE)));
}

/// Glue of a class: its static object plus the instance wrapper.
pub fn class_glue(ctx: &GenContext, class: &TypeDefn, base: Option<&TypeDefn>) {
    tracing::debug!(class = %class.path, base = ?base.map(|b| &b.path), "class glue");
    emit_static_object(ctx);

    let binding = ctx.binding();
    let base_wrapper = base
        .and_then(|b| b.glue_namespace.as_ref())
        .map(|ns| format!("{ns}::ObjectWrapper"));
    let wrapper_base = base_wrapper
        .clone()
        .unwrap_or_else(|| binding.glue_base_class(class));

    let mut vars = Vars::new()
        .with("Runtime", RUNTIME_NAMESPACE)
        .with("WrapperBase", wrapper_base)
        .with("BindingGlueHeader", binding.glue_header_extra(class))
        .with("BindingGlueCpp", binding.glue_cpp_extra(class));
    match &base_wrapper {
        Some(base) => {
            let base_vars = Vars::new().with("Base", base.as_str());
            for (key, tail) in BASE_FALLBACKS {
                vars.set(key, substitute(tail, &base_vars));
            }
        }
        None => {
            for (key, tail) in ROOT_FALLBACKS {
                vars.set(key, tail);
            }
        }
    }

    ctx.glue_header().emit("");
    ctx.glue_header()
        .emit(&substitute(OBJECT_WRAPPER_HEADER, &vars));
    ctx.glue_cpp()
        .emit_template(&substitute(OBJECT_WRAPPER_CPP, &vars));
}
