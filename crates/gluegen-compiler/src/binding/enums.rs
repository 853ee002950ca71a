//! Enum values travel as numbers.

use super::{BindingModel, Marshal, MarshalEnv, ReturnCode, fail};
use crate::types::TypeDefn;

pub struct EnumBinding;

impl BindingModel for EnumBinding {
    fn name(&self) -> &'static str {
        "enum"
    }

    fn from_host(&self, ty: &TypeDefn, input: &str, output: &str, env: MarshalEnv<'_>) -> Marshal {
        let cpp = &ty.cpp_name;
        let code = format!(
            "{cpp} {output} = {cpp}();\nif ({input}.is_number()) {{\n  \
             {output} = static_cast<{cpp}>(static_cast<int32_t>({input}.AsDouble()));\n\
             }} else {{\n{}\n}}",
            fail(env, "a number")
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
            pre: format!("{} {output} = {expression};", ty.cpp_name),
            post: format!("*{result} = pp::Var(static_cast<int32_t>({output}));"),
        }
    }
}
