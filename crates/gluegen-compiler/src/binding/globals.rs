//! Namespaces and the global scope: static members only, no instances.

use super::{BindingModel, Marshal, MarshalEnv, RUNTIME_NAMESPACE, ReturnCode};
use crate::types::TypeDefn;

pub struct GlobalsBinding;

impl BindingModel for GlobalsBinding {
    fn name(&self) -> &'static str {
        "globals"
    }

    fn from_host(&self, _ty: &TypeDefn, input: &str, output: &str, _env: MarshalEnv<'_>) -> Marshal {
        Marshal {
            code: format!("pp::Var {output} = {input};"),
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

    /// Namespace variables are read directly.
    fn get_static(&self, qualifier: &str, field: &str, _getter: &str) -> String {
        format!("{qualifier}::{field}")
    }

    fn set_static(&self, qualifier: &str, field: &str, _setter: &str, value: &str) -> String {
        format!("{qualifier}::{field} = {value}")
    }

    fn glue_base_class(&self, _ty: &TypeDefn) -> String {
        format!("{RUNTIME_NAMESPACE}::StaticObject")
    }
}
