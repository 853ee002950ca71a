//! Methods, static functions and constructors.

use gluegen_core::Function;
use gluegen_core::utils::to_snake_case;

use super::{Emitter, GuardedBlock, name_matches, probe};
use crate::context::{ContainerKind, GenContext, Slot};
use crate::registry::IdCategory;
use crate::types::{TypeDefn, join_path};
use crate::{Error, Result, invariants};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallKind {
    Method,
    Static,
    Constructor,
}

impl CallKind {
    fn userglue_prefix(self) -> &'static str {
        match self {
            CallKind::Method => "method",
            CallKind::Static => "static",
            CallKind::Constructor => "construct",
        }
    }
}

/// Whether `tag` was registered exactly once so far.
pub(super) fn is_first(ctx: &GenContext, category: IdCategory, tag: &str) -> bool {
    ctx.registry()
        .entries(category)
        .iter()
        .filter(|e| e.tag == tag)
        .count()
        == 1
}

/// Type of the class a context generates for.
pub(super) fn class_type<'t>(emitter: &Emitter<'t>, ctx: &GenContext) -> &'t TypeDefn {
    emitter
        .types
        .get(ctx.scope())
        .unwrap_or_else(|| invariants::missing_type(ctx.scope()))
}

impl Emitter<'_> {
    /// Emit the dispatch block of one function.
    ///
    /// Everything that can fail is checked before the first write, so a
    /// rejected function leaves no trace in any buffer.
    pub fn function(&mut self, ctx: &GenContext, func: &Function) -> Result<()> {
        let Some(name) = func.name.as_deref() else {
            return Ok(());
        };
        let member = join_path(ctx.scope(), name);
        let container = &ctx.info().name;
        let is_class = ctx.kind() == ContainerKind::Class;

        let kind = match &func.return_type {
            Some(_) if func.attributes.has("static") || ctx.is_static_only() => CallKind::Static,
            Some(_) => CallKind::Method,
            None if is_class && name == container => CallKind::Constructor,
            None if name.strip_prefix('~') == Some(container.as_str()) => {
                tracing::trace!(member = %member, "destructor skipped");
                return Ok(());
            }
            None => {
                return Err(Error::MissingReturnType {
                    member,
                    container: container.clone(),
                });
            }
        };

        let scope = ctx.scope();
        let params = func
            .params
            .iter()
            .map(|p| Ok((p, self.types.resolve(scope, &p.type_name, &member)?)))
            .collect::<Result<Vec<_>>>()?;
        let class = (kind != CallKind::Static || is_class).then(|| class_type(self, ctx));
        let ret = match (&func.return_type, class) {
            (Some(ty), _) => self.types.resolve(scope, ty, &member)?,
            (None, Some(class)) => class,
            (None, None) => invariants::missing_type(scope),
        };

        let arity = params.len();
        let userglue = func.attributes.has("userglue");
        let plugin_data = func.attributes.has("plugin_data");
        let env = self.env();

        let (category, slot, probe_slot) = match kind {
            CallKind::Method => (IdCategory::Method, Slot::InvokeCode, Some(Slot::HasMethodCode)),
            CallKind::Static => (
                IdCategory::StaticMethod,
                Slot::StaticInvokeCode,
                Some(Slot::StaticHasMethodCode),
            ),
            CallKind::Constructor => (IdCategory::StaticMethod, Slot::StaticInvokeDefaultCode, None),
        };
        self.check_overload(ctx, category, name, arity);

        let condition = match probe_slot {
            Some(probe_slot) => {
                let registered = ctx.registry_mut().register(category, name);
                if is_first(ctx, category, &registered.tag) {
                    if let Some(section) = ctx.slot(probe_slot) {
                        section.emit(&probe(category, &registered.tag));
                    }
                }
                format!("{} && args.size() == {arity}", name_matches(category, &registered.tag))
            }
            None => format!("args.size() == {arity}"),
        };

        let mut block = GuardedBlock::new(condition);
        let mut args = Vec::new();
        let mut object = String::new();
        if kind == CallKind::Method {
            if let Some(class) = class {
                let header = ctx.binding().dispatch_header(class, "object", env.success);
                block.checked(&header.code);
                object = header.object_access;
            }
        }
        if plugin_data {
            args.push("instance".to_string());
        }
        if userglue && kind == CallKind::Method {
            args.push(object.clone());
        }
        for (index, (param, ty)) in params.iter().enumerate() {
            let output = format!("param_{}", to_snake_case(&param.name));
            let marshal = ty
                .binding
                .model()
                .from_host(ty, &format!("args[{index}]"), &output, env);
            block.checked(&self.in_context(&format!("parameter '{}'", param.name), &marshal.code));
            args.push(marshal.access);
        }

        let call = if userglue {
            format!("userglue_{}_{name}({})", kind.userglue_prefix(), args.join(", "))
        } else {
            match (kind, class) {
                (CallKind::Method, _) => ctx.binding().call_method(&object, name, &args),
                (CallKind::Constructor, Some(class)) => ctx.binding().call_constructor(class, &args),
                _ => ctx.binding().call_static(&ctx.info().qualifier, name, &args),
            }
        };
        let returned = ret.binding.model().to_host(ret, "retval", &call, "result", env);
        block.checked(&returned.pre);
        block.code(&returned.post);

        if let Some(section) = ctx.slot(slot) {
            section.emit(&block.render());
        }

        for (_, ty) in &params {
            self.note_slot_use(ctx, ty);
        }
        self.note_slot_use(ctx, ret);
        self.note_call_site(ctx, userglue);

        if userglue {
            let mut decls = Vec::new();
            if plugin_data {
                decls.push("void* plugin_data".to_string());
            }
            if let (CallKind::Method, Some(class)) = (kind, class) {
                decls.push(format!("{} _this", ctx.binding().parameter_type(class)));
                self.note_header_use(ctx, class);
            }
            for (param, ty) in &params {
                decls.push(format!("{} {}", ty.binding.model().parameter_type(ty), param.name));
                self.note_header_use(ctx, ty);
            }
            self.note_header_use(ctx, ret);
            ctx.header().emit(&format!(
                "{} userglue_{}_{name}({});",
                ret.binding.model().return_type(ret),
                kind.userglue_prefix(),
                decls.join(", ")
            ));
        }
        Ok(())
    }
}
