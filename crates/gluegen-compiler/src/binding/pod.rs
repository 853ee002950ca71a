//! Plain values copied in and out of `pp::Var`.

use super::{BindingModel, Marshal, MarshalEnv, ReturnCode, fail};
use crate::types::TypeDefn;

/// How one pod type reads from and writes to a `pp::Var`.
struct PodShape {
    /// `pp::Var` predicate accepting the value.
    check: &'static str,
    /// Conversion from the checked `pp::Var`, `{}` standing for the input.
    read: &'static str,
    /// Conversion to a `pp::Var` constructor argument, `{}` standing for the value.
    write: &'static str,
    expected: &'static str,
}

fn shape(name: &str) -> Option<PodShape> {
    let shape = match name {
        "bool" => PodShape {
            check: "is_bool",
            read: "{}.AsBool()",
            write: "{}",
            expected: "a boolean",
        },
        "int" => PodShape {
            check: "is_number",
            read: "static_cast<int32_t>({}.AsDouble())",
            write: "{}",
            expected: "a number",
        },
        "size_t" => PodShape {
            check: "is_number",
            read: "static_cast<size_t>({}.AsDouble())",
            write: "static_cast<double>({})",
            expected: "a number",
        },
        "float" => PodShape {
            check: "is_number",
            read: "static_cast<float>({}.AsDouble())",
            write: "static_cast<double>({})",
            expected: "a number",
        },
        "double" => PodShape {
            check: "is_number",
            read: "{}.AsDouble()",
            write: "{}",
            expected: "a number",
        },
        "string" => PodShape {
            check: "is_string",
            read: "{}.AsString()",
            write: "{}",
            expected: "a string",
        },
        _ => return None,
    };
    Some(shape)
}

pub struct PodBinding;

impl BindingModel for PodBinding {
    fn name(&self) -> &'static str {
        "pod"
    }

    fn from_host(&self, ty: &TypeDefn, input: &str, output: &str, env: MarshalEnv<'_>) -> Marshal {
        if ty.is_void() {
            return Marshal {
                code: String::new(),
                access: String::new(),
            };
        }
        let cpp = &ty.cpp_name;
        let code = match shape(&ty.name) {
            Some(shape) => format!(
                "{cpp} {output} = {cpp}();\nif ({input}.{}()) {{\n  {output} = {};\n}} else {{\n{}\n}}",
                shape.check,
                shape.read.replace("{}", input),
                fail(env, shape.expected)
            ),
            // `Var` and opaque typenames pass through untouched.
            None => format!("{cpp} {output} = {input};"),
        };
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
        if ty.is_void() {
            return ReturnCode {
                pre: format!("{expression};"),
                post: format!("*{result} = pp::Var();"),
            };
        }
        let write = shape(&ty.name).map_or("{}", |s| s.write);
        ReturnCode {
            pre: format!("{} {output} = {expression};", ty.cpp_name),
            post: format!("*{result} = pp::Var({});", write.replace("{}", output)),
        }
    }

    fn parameter_type(&self, ty: &TypeDefn) -> String {
        match ty.name.as_str() {
            "string" | "Var" => format!("const {}&", ty.cpp_name),
            _ => ty.cpp_name.clone(),
        }
    }
}
