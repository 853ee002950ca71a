//! Fields exposed as host properties.

use gluegen_core::Variable;
use gluegen_core::utils::to_lower_camel;

use super::function::{class_type, is_first};
use super::{Emitter, GuardedBlock, name_matches, probe};
use crate::context::{GenContext, Slot};
use crate::registry::IdCategory;
use crate::types::join_path;
use crate::Result;

impl Emitter<'_> {
    /// Emit the getter block and, when a setter is declared, the setter block
    /// of a field. Without `getter` (or `userglue_getter`) the getter block
    /// answers `pp::Var()`, whatever the container.
    pub fn field(&mut self, ctx: &GenContext, var: &Variable) -> Result<()> {
        let Some(name) = var.name.as_deref() else {
            return Ok(());
        };
        let member = join_path(ctx.scope(), name);
        let ty = self.types.resolve(ctx.scope(), &var.type_name, &member)?;
        let attrs = &var.attributes;
        let is_static = attrs.has("static") || ctx.is_static_only();
        let class = (!is_static).then(|| class_type(self, ctx));
        let plugin_data = attrs.has("plugin_data");
        let env = self.env();

        let (category, get_slot, set_slot, has_slot, names_slot) = if is_static {
            (
                IdCategory::StaticProperty,
                Slot::StaticGetPropertyCode,
                Slot::StaticSetPropertyCode,
                Slot::StaticHasPropertyCode,
                Slot::StaticGetAllPropertyNamesCode,
            )
        } else {
            (
                IdCategory::Property,
                Slot::GetPropertyCode,
                Slot::SetPropertyCode,
                Slot::HasPropertyCode,
                Slot::GetAllPropertyNamesCode,
            )
        };
        self.check_overload(ctx, category, name, 0);
        let entry = ctx.registry_mut().register(category, name);
        if is_first(ctx, category, &entry.tag) {
            if let Some(section) = ctx.slot(has_slot) {
                section.emit(&probe(category, &entry.tag));
            }
            if let Some(section) = ctx.slot(names_slot) {
                section.emit(&format!(
                    "  names->push_back(pp::Var(k{}Names[{}]));",
                    category.stem(),
                    entry.tag
                ));
            }
        }
        let condition = name_matches(category, &entry.tag);

        // Leading arguments of userglue accessors.
        let mut object = String::new();
        let mut lead = Vec::new();
        let mut lead_decls = Vec::new();
        if plugin_data {
            lead.push("instance".to_string());
            lead_decls.push("void* plugin_data".to_string());
        }

        let mut getter = GuardedBlock::new(condition.clone());
        let mut setter = GuardedBlock::new(condition);
        if let Some(class) = class {
            let header = ctx.binding().dispatch_header(class, "object", env.success);
            getter.checked(&header.code);
            setter.checked(&header.code);
            object = header.object_access;
            lead.push(object.clone());
            lead_decls.push(format!("{} _this", ctx.binding().parameter_type(class)));
        }

        let userglue_getter = attrs.has("userglue_getter");
        let readable = attrs.has("getter") || userglue_getter;
        if readable {
            let getter_name = attrs
                .value("getter")
                .map(str::to_string)
                .unwrap_or_else(|| to_lower_camel(name));
            let read = if userglue_getter {
                format!("userglue_getter_{name}({})", lead.join(", "))
            } else if is_static {
                ctx.binding().get_static(&ctx.info().qualifier, name, &getter_name)
            } else {
                ctx.binding().get_field(&object, &getter_name)
            };
            let returned = ty.binding.model().to_host(ty, "retval", &read, "result", env);
            getter.checked(&returned.pre);
            getter.code(&returned.post);
        } else {
            getter.code("*result = pp::Var();");
        }
        if let Some(section) = ctx.slot(get_slot) {
            section.emit(&getter.render());
        }

        let userglue_setter = attrs.has("userglue_setter");
        if attrs.has("setter") || userglue_setter {
            let setter_name = attrs
                .value("setter")
                .map(str::to_string)
                .unwrap_or_else(|| format!("set_{}", to_lower_camel(name)));
            let marshal = ty.binding.model().from_host(ty, "value", "param_value", env);
            setter.checked(&self.in_context(&format!("field '{name}'"), &marshal.code));
            let write = if userglue_setter {
                let mut args = lead.clone();
                args.push(marshal.access);
                format!("userglue_setter_{name}({})", args.join(", "))
            } else if is_static {
                ctx.binding()
                    .set_static(&ctx.info().qualifier, name, &setter_name, &marshal.access)
            } else {
                ctx.binding().set_field(&object, &setter_name, &marshal.access)
            };
            setter.code(&format!("{write};"));
            if let Some(section) = ctx.slot(set_slot) {
                section.emit(&setter.render());
            }
        }

        self.note_slot_use(ctx, ty);
        self.note_call_site(ctx, userglue_getter || userglue_setter);

        let model = ty.binding.model();
        if userglue_getter {
            ctx.header().emit(&format!(
                "{} userglue_getter_{name}({});",
                model.return_type(ty),
                lead_decls.join(", ")
            ));
        }
        if userglue_setter {
            let mut decls = lead_decls.clone();
            decls.push(format!("{} value", model.parameter_type(ty)));
            ctx.header()
                .emit(&format!("void userglue_setter_{name}({});", decls.join(", ")));
        }
        if userglue_getter || userglue_setter {
            self.note_header_use(ctx, ty);
            if let Some(class) = class {
                self.note_header_use(ctx, class);
            }
        }
        Ok(())
    }
}
