//! Generation settings.

/// Configuration for glue generation.
#[derive(Clone, Debug)]
pub struct GlueConfig {
    /// Namespace wrapping every generated declaration
    pub(crate) glue_namespace: String,
    /// Includes every glue header starts with
    pub(crate) header_includes: Vec<String>,
    /// Includes every glue implementation starts with
    pub(crate) cpp_includes: Vec<String>,
    /// Basename of the synthetic output holding the root static object
    pub(crate) globals_basename: String,
    /// Macro carrying the "what was being converted" text of marshaling errors
    pub(crate) exception_macro: String,
    /// Whether glue headers get `#ifndef` guards
    pub(crate) include_guards: bool,
    /// Suffix of documentation stub files
    pub(crate) docs_suffix: String,
}

impl Default for GlueConfig {
    fn default() -> Self {
        Self {
            glue_namespace: "glue".to_string(),
            header_includes: vec!["common.h".to_string(), "static_object.h".to_string()],
            cpp_includes: vec![
                "plugin_main.h".to_string(),
                "ppapi/cpp/private/var_private.h".to_string(),
            ],
            globals_basename: "globals".to_string(),
            exception_macro: "PPAPI_GLUE_EXCEPTION_CONTEXT".to_string(),
            include_guards: true,
            docs_suffix: "_docs.idl".to_string(),
        }
    }
}

impl GlueConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the namespace wrapping all generated code.
    pub fn glue_namespace(mut self, value: impl Into<String>) -> Self {
        self.glue_namespace = value.into();
        self
    }

    /// Replace the default header includes.
    pub fn header_includes(mut self, value: Vec<String>) -> Self {
        self.header_includes = value;
        self
    }

    /// Replace the default implementation includes.
    pub fn cpp_includes(mut self, value: Vec<String>) -> Self {
        self.cpp_includes = value;
        self
    }

    pub fn globals_basename(mut self, value: impl Into<String>) -> Self {
        self.globals_basename = value.into();
        self
    }

    pub fn exception_macro(mut self, value: impl Into<String>) -> Self {
        self.exception_macro = value.into();
        self
    }

    pub fn include_guards(mut self, value: bool) -> Self {
        self.include_guards = value;
        self
    }

    pub fn docs_suffix(mut self, value: impl Into<String>) -> Self {
        self.docs_suffix = value.into();
        self
    }

    pub fn get_glue_namespace(&self) -> &str {
        &self.glue_namespace
    }

    pub fn get_globals_basename(&self) -> &str {
        &self.globals_basename
    }

    pub fn get_docs_suffix(&self) -> &str {
        &self.docs_suffix
    }

    pub fn get_include_guards(&self) -> bool {
        self.include_guards
    }
}
