//! Class instances handed to the host as wrapped pointers.

use super::{BindingModel, DispatchHeader, Marshal, MarshalEnv, RUNTIME_NAMESPACE, ReturnCode, fail};
use crate::types::TypeDefn;

pub struct ByPointerBinding;

fn wrapper(ty: &TypeDefn) -> String {
    match &ty.glue_namespace {
        Some(ns) => format!("{ns}::ObjectWrapper"),
        None => "ObjectWrapper".to_string(),
    }
}

impl BindingModel for ByPointerBinding {
    fn name(&self) -> &'static str {
        "by_pointer"
    }

    fn from_host(&self, ty: &TypeDefn, input: &str, output: &str, env: MarshalEnv<'_>) -> Marshal {
        let cpp = &ty.cpp_name;
        let code = format!(
            "{cpp}* {output} = {}::GetObject(instance, {input});\nif (!{output}) {{\n{}\n}}",
            wrapper(ty),
            fail(env, &format!("a {}", ty.name))
        );
        Marshal {
            code,
            access: output.to_string(),
        }
    }

    fn to_host(
        &self,
        ty: &TypeDefn,
        output: &str,
        expression: &str,
        result: &str,
        _env: MarshalEnv<'_>,
    ) -> ReturnCode {
        ReturnCode {
            pre: format!("{}* {output} = {expression};", ty.cpp_name),
            post: format!("*{result} = {}::Wrap(instance, {output});", wrapper(ty)),
        }
    }

    fn parameter_type(&self, ty: &TypeDefn) -> String {
        format!("{}*", ty.cpp_name)
    }

    fn return_type(&self, ty: &TypeDefn) -> String {
        format!("{}*", ty.cpp_name)
    }

    fn call_constructor(&self, ty: &TypeDefn, args: &[String]) -> String {
        format!("new {}({})", ty.cpp_name, args.join(", "))
    }

    fn dispatch_header(&self, ty: &TypeDefn, object: &str, success: &str) -> DispatchHeader {
        DispatchHeader {
            code: format!(
                "{}* {object} = native_object();\nif (!{object}) {success} = false;",
                ty.cpp_name
            ),
            object_access: object.to_string(),
        }
    }

    fn glue_base_class(&self, ty: &TypeDefn) -> String {
        format!("{RUNTIME_NAMESPACE}::PointerWrapper<{}>", ty.cpp_name)
    }

    fn glue_header_extra(&self, ty: &TypeDefn) -> String {
        let cpp = &ty.cpp_name;
        format!(
            "  static pp::Var Wrap(pp::InstancePrivate* instance, {cpp}* object);\n\
             \x20 static {cpp}* GetObject(pp::InstancePrivate* instance, const pp::Var& var);\n\
             \x20 {cpp}* native_object();"
        )
    }

    fn glue_cpp_extra(&self, ty: &TypeDefn) -> String {
        let cpp = &ty.cpp_name;
        format!(
            "pp::Var ObjectWrapper::Wrap(pp::InstancePrivate* instance, {cpp}* object) {{\n  \
             return {RUNTIME_NAMESPACE}::WrapPointer<ObjectWrapper>(instance, object);\n}}\n\
             \n\
             {cpp}* ObjectWrapper::GetObject(pp::InstancePrivate* instance, const pp::Var& var) {{\n  \
             return {RUNTIME_NAMESPACE}::UnwrapPointer<ObjectWrapper, {cpp}>(instance, var);\n}}\n\
             \n\
             {cpp}* ObjectWrapper::native_object() {{\n  \
             return static_cast<{cpp}*>(pointer());\n}}"
        )
    }

    fn extra_include(&self, _ty: &TypeDefn) -> Option<String> {
        Some("pointer_wrapper.h".to_string())
    }
}
