//! Binding models: how values of a type cross between `pp::Var` and C++.
//!
//! Each type carries a [`BindingKind`]; [`BindingKind::model`] hands out the
//! stateless implementation. Marshaling snippets are plain C++ text and may
//! fail at run time by clearing the `success` flag they are given, never at
//! generation time.

mod by_pointer;
mod callback;
mod enums;
mod globals;
mod pod;


pub use by_pointer::ByPointerBinding;
pub use callback::CallbackBinding;
pub use enums::EnumBinding;
pub use globals::GlobalsBinding;
pub use pod::PodBinding;

use crate::types::TypeDefn;

/// Namespace of the hand-written runtime every generated object builds on.
pub const RUNTIME_NAMESPACE: &str = "glue::globals";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Pod,
    ByPointer,
    Enum,
    Callback,
    Globals,
}

impl BindingKind {
    /// Parse the `binding_model` attribute value.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "pod" => BindingKind::Pod,
            "by_pointer" => BindingKind::ByPointer,
            "enum" => BindingKind::Enum,
            "callback" => BindingKind::Callback,
            "globals" => BindingKind::Globals,
            _ => return None,
        };
        Some(kind)
    }

    pub fn model(self) -> &'static dyn BindingModel {
        match self {
            BindingKind::Pod => &PodBinding,
            BindingKind::ByPointer => &ByPointerBinding,
            BindingKind::Enum => &EnumBinding,
            BindingKind::Callback => &CallbackBinding,
            BindingKind::Globals => &GlobalsBinding,
        }
    }
}

/// Names shared by every marshaling snippet of one guarded block.
#[derive(Debug, Clone, Copy)]
pub struct MarshalEnv<'a> {
    /// `bool` cleared on failure.
    pub success: &'a str,
    /// Macro naming the value being converted, for error text.
    pub exception_macro: &'a str,
}

/// Conversion from `pp::Var` into a native value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marshal {
    /// Statements declaring and filling the native value. May clear `success`.
    pub code: String,
    /// Expression reading the converted value.
    pub access: String,
}

/// Conversion of a native expression back into a `pp::Var`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnCode {
    /// Evaluates the expression; may clear `success`.
    pub pre: String,
    /// Stores the host value; runs only once `success` is known to hold.
    pub post: String,
}

/// Code to fetch the native object behind an instance wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchHeader {
    pub code: String,
    pub object_access: String,
}

pub trait BindingModel {
    fn name(&self) -> &'static str;

    /// Convert `input` (a `pp::Var` expression) into a native value named `output`.
    fn from_host(&self, ty: &TypeDefn, input: &str, output: &str, env: MarshalEnv<'_>) -> Marshal;

    /// Evaluate `expression` into `output`, then store it through the `pp::Var*` `result`.
    fn to_host(
        &self,
        ty: &TypeDefn,
        output: &str,
        expression: &str,
        result: &str,
        env: MarshalEnv<'_>,
    ) -> ReturnCode;

    /// C++ type of a parameter of this type in a prototype.
    fn parameter_type(&self, ty: &TypeDefn) -> String {
        ty.cpp_name.clone()
    }

    fn return_type(&self, ty: &TypeDefn) -> String {
        ty.cpp_name.clone()
    }

    fn call_method(&self, object: &str, method: &str, args: &[String]) -> String {
        format!("{object}->{method}({})", args.join(", "))
    }

    /// Call a function scoped under `qualifier` (`::media`, or empty for global).
    fn call_static(&self, qualifier: &str, function: &str, args: &[String]) -> String {
        format!("{qualifier}::{function}({})", args.join(", "))
    }

    fn call_constructor(&self, ty: &TypeDefn, args: &[String]) -> String {
        format!("{}({})", ty.cpp_name, args.join(", "))
    }

    fn get_field(&self, object: &str, getter: &str) -> String {
        format!("{object}->{getter}()")
    }

    fn set_field(&self, object: &str, setter: &str, value: &str) -> String {
        format!("{object}->{setter}({value})")
    }

    /// Read a static field. `field` is the declared name, `getter` the accessor name.
    fn get_static(&self, qualifier: &str, _field: &str, getter: &str) -> String {
        format!("{qualifier}::{getter}()")
    }

    fn set_static(&self, qualifier: &str, _field: &str, setter: &str, value: &str) -> String {
        format!("{qualifier}::{setter}({value})")
    }

    /// Fetch the native object of an instance wrapper into `object`.
    fn dispatch_header(&self, _ty: &TypeDefn, object: &str, _success: &str) -> DispatchHeader {
        DispatchHeader {
            code: String::new(),
            object_access: object.to_string(),
        }
    }

    /// Base class of the generated instance wrapper.
    fn glue_base_class(&self, _ty: &TypeDefn) -> String {
        "pp::deprecated::ScriptableObject".to_string()
    }

    /// Extra members of the generated instance wrapper declaration.
    fn glue_header_extra(&self, _ty: &TypeDefn) -> String {
        String::new()
    }

    /// Extra definitions of the generated instance wrapper.
    fn glue_cpp_extra(&self, _ty: &TypeDefn) -> String {
        String::new()
    }

    /// Header the glue header needs for this type, beyond its definition.
    fn extra_include(&self, _ty: &TypeDefn) -> Option<String> {
        None
    }
}

/// Failure branch shared by the checked conversions.
pub(crate) fn fail(env: MarshalEnv<'_>, expected: &str) -> String {
    format!(
        "  {} = false;\n  *exception = pp::Var(\"expected {expected} for \" {});",
        env.success, env.exception_macro
    )
}
