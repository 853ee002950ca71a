//! Host functions held as `pp::Var` objects and invoked through `RunCallback`.

use super::{BindingModel, Marshal, MarshalEnv, ReturnCode, fail};
use crate::types::TypeDefn;

pub struct CallbackBinding;

impl BindingModel for CallbackBinding {
    fn name(&self) -> &'static str {
        "callback"
    }

    fn from_host(&self, _ty: &TypeDefn, input: &str, output: &str, env: MarshalEnv<'_>) -> Marshal {
        let code = format!(
            "pp::Var {output} = {input};\nif (!{input}.is_object()) {{\n{}\n}}",
            fail(env, "a function")
        );
        Marshal {
            code,
            access: output.to_string(),
        }
    }

    fn to_host(
        &self,
        _ty: &TypeDefn,
        output: &str,
        expression: &str,
        result: &str,
        _env: MarshalEnv<'_>,
    ) -> ReturnCode {
        ReturnCode {
            pre: format!("pp::Var {output} = {expression};"),
            post: format!("*{result} = {output};"),
        }
    }

    fn parameter_type(&self, _ty: &TypeDefn) -> String {
        "pp::Var&".to_string()
    }

    fn return_type(&self, _ty: &TypeDefn) -> String {
        "pp::Var".to_string()
    }
}
