//! Trampolines calling host functions handed to native code.

use gluegen_core::Callback;
use gluegen_core::utils::to_snake_case;

use super::{Emitter, indent};
use crate::Result;
use crate::context::GenContext;
use crate::types::join_path;

impl Emitter<'_> {
    /// Emit `RunCallback` for a callback type, inside its own glue namespace,
    /// followed by whatever glue the callback's binding model adds.
    ///
    /// Arguments travel the reverse way of call glue: native values are
    /// converted to host values, and the host result is converted back.
    pub fn callback(&mut self, ctx: &GenContext, defn: &Callback) -> Result<()> {
        let Some(name) = defn.name.as_deref() else {
            return Ok(());
        };
        let member = join_path(ctx.scope(), name);
        let scope = ctx.scope();
        let ret = self.types.resolve(scope, &defn.return_type, &member)?;
        let params = defn
            .params
            .iter()
            .map(|p| Ok((p, self.types.resolve(scope, &p.type_name, &member)?)))
            .collect::<Result<Vec<_>>>()?;
        let env = self.env();

        let mut decls = vec![
            "pp::InstancePrivate* instance".to_string(),
            "const pp::Var& callback".to_string(),
        ];
        decls.extend(
            params
                .iter()
                .map(|(p, ty)| format!("{} {}", ty.binding.model().parameter_type(ty), p.name)),
        );
        let prototype = format!(
            "{} RunCallback({})",
            ret.binding.model().return_type(ret),
            decls.join(", ")
        );

        let mut body = vec![
            "bool success = true;".to_string(),
            "pp::Var exception_value;".to_string(),
            "pp::Var* exception = &exception_value;".to_string(),
        ];
        if params.is_empty() {
            body.push("std::vector<pp::Var> args;".to_string());
        } else {
            body.push(format!("std::vector<pp::Var> args({});", params.len()));
            for (index, (param, ty)) in params.iter().enumerate() {
                let output = format!("native_{}", to_snake_case(&param.name));
                let converted = ty.binding.model().to_host(ty, &output, &param.name, "arg", env);
                let inner = [format!("pp::Var* arg = &args[{index}];"), converted.pre, converted.post];
                body.push(format!("{{\n{}\n}}", indent(&inner.join("\n"), 2)));
            }
        }
        body.push("pp::Var result;".to_string());
        body.push(
            "if (success) {\n  result = pp::VarPrivate(callback).Call(pp::Var(), args, exception);\n}"
                .to_string(),
        );
        let marshal = ret.binding.model().from_host(ret, "result", "retval", env);
        if !marshal.code.is_empty() {
            body.push(self.in_context("callback return value '<no name>'", &marshal.code));
            body.push(format!("return {};", marshal.access));
        }

        let own = self.types.resolve(scope, name, &member)?;
        let model = own.binding.model();
        let header_extra = model.glue_header_extra(own);
        let cpp_extra = model.glue_cpp_extra(own);

        let segment = format!("callback_{name}");
        ctx.header().push_scope(segment.as_str());
        ctx.header().emit(&format!("{prototype};"));
        if !header_extra.is_empty() {
            ctx.header().emit(&header_extra);
        }
        ctx.header().pop_scope();

        ctx.cpp().push_scope(segment.as_str());
        ctx.cpp()
            .emit(&format!("{prototype} {{\n{}\n}}", indent(&body.join("\n"), 2)));
        if !cpp_extra.is_empty() {
            ctx.cpp().emit(&cpp_extra);
        }
        ctx.cpp().pop_scope();

        for ty in params.iter().map(|(_, ty)| *ty).chain(std::iter::once(ret)) {
            self.note_header_use(ctx, ty);
            if ty.glue_namespace.is_some() {
                ctx.file_needs().cpp_glue.insert(ty.path.clone());
            }
        }
        Ok(())
    }
}
