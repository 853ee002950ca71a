//! Member recipes, driven against a single container context.

use std::cell::RefCell;
use std::rc::Rc;

use gluegen_core::{Definition, SourceFile};
use indoc::indoc;

use super::{Emitter, indent};
use crate::binding::BindingKind;
use crate::context::{ContainerInfo, ContainerKind, FileNeeds, GenContext, Slot};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::registry::IdCategory;
use crate::section::Section;
use crate::test_utils::files;
use crate::types::{TypeTable, cpp_qualified};
use crate::{Error, GlueConfig, Result};

struct Run {
    ctx: GenContext,
    header: Section,
    cpp: Section,
    diagnostics: Diagnostics,
    result: Result<()>,
}

impl Run {
    fn slot(&self, slot: Slot) -> String {
        self.ctx.slot(slot).expect("slot exists").lines().join("\n")
    }
}

/// Emit every member of the first container of a single-file fixture.
fn run(json: &str) -> Run {
    let files: Vec<SourceFile> = files(json);
    let config = GlueConfig::default();
    let types = TypeTable::build(&files, "glue").unwrap();
    let container = &files[0].definitions[0];
    let name = container.name().unwrap().to_string();

    let (kind, binding, glue_namespace, qualifier) = match container {
        Definition::Namespace(_) => (
            ContainerKind::Namespace,
            BindingKind::Globals,
            format!("glue::namespace_{name}"),
            cpp_qualified(&name),
        ),
        Definition::Class(_) => {
            let ty = types.get(&name).unwrap();
            (
                ContainerKind::Class,
                ty.binding,
                ty.glue_namespace.clone().unwrap(),
                ty.cpp_name.clone(),
            )
        }
        _ => panic!("fixture must start with a container"),
    };
    let info = ContainerInfo {
        scope: name.clone(),
        name,
        kind,
        glue_namespace,
        qualifier,
    };
    let (header, cpp) = (Section::new("h"), Section::new("cc"));
    let ctx = GenContext::new(
        info,
        binding.model(),
        header.clone(),
        cpp.clone(),
        Rc::new(RefCell::new(FileNeeds::default())),
    );

    let mut diagnostics = Diagnostics::new();
    let mut emitter = Emitter::new(&types, &config, &files[0], &mut diagnostics);
    let mut result = Ok(());
    for member in container.members() {
        let step = match member {
            Definition::Function(f) => emitter.function(&ctx, f),
            Definition::Variable(v) => emitter.field(&ctx, v),
            Definition::Enum(e) => {
                emitter.enumeration(&ctx, e);
                Ok(())
            }
            Definition::Callback(c) => emitter.callback(&ctx, c),
            Definition::Verbatim(v) => {
                emitter.verbatim(&ctx, v);
                Ok(())
            }
            _ => Ok(()),
        };
        if step.is_err() {
            result = step;
            break;
        }
    }
    Run {
        ctx,
        header,
        cpp,
        diagnostics,
        result,
    }
}

#[test]
fn static_function_block() {
    let run = run(indoc! {r#"
        {"path": "media.idl", "definitions": [
          {"kind": "Namespace", "name": "media", "members": [
            {"kind": "Function", "name": "reset", "type": "void"}
          ]}
        ]}
    "#});

    assert!(run.result.is_ok());
    assert_eq!(
        run.slot(Slot::StaticInvokeCode),
        indent(
            indoc! {"
              if (name == kStaticMethodNames[STATIC_METHOD_RESET] && args.size() == 0) do {
                bool success = true;
                ::media::reset();
                if (!success) break;
                *result = pp::Var();
                return true;
              } while (false);"},
            2
        )
    );
    assert_eq!(
        run.slot(Slot::StaticHasMethodCode),
        "  if (name == kStaticMethodNames[STATIC_METHOD_RESET]) return true;"
    );
}

#[test]
fn parameters_are_converted_in_their_own_context() {
    let run = run(indoc! {r#"
        {"path": "media.idl", "definitions": [
          {"kind": "Namespace", "name": "media", "members": [
            {"kind": "Function", "name": "scale", "type": "int",
             "params": [{"name": "factor", "type": "double"}]}
          ]}
        ]}
    "#});

    assert_eq!(
        run.slot(Slot::StaticInvokeCode),
        indoc! {r#"
              if (name == kStaticMethodNames[STATIC_METHOD_SCALE] && args.size() == 1) do {
                bool success = true;
            #define PPAPI_GLUE_EXCEPTION_CONTEXT "parameter 'factor'"
                double param_factor = double();
                if (args[0].is_number()) {
                  param_factor = args[0].AsDouble();
                } else {
                  success = false;
                  *exception = pp::Var("expected a number for " PPAPI_GLUE_EXCEPTION_CONTEXT);
                }
            #undef PPAPI_GLUE_EXCEPTION_CONTEXT
                if (!success) break;
                int32_t retval = ::media::scale(param_factor);
                if (!success) break;
                *result = pp::Var(retval);
                return true;
              } while (false);"#}
    );
}

#[test]
fn overloads_share_one_id_and_one_probe() {
    let run = run(indoc! {r#"
        {"path": "media.idl", "definitions": [
          {"kind": "Namespace", "name": "media", "members": [
            {"kind": "Function", "name": "update", "type": "void",
             "params": [{"name": "a", "type": "int"}]},
            {"kind": "Function", "name": "update", "type": "void",
             "params": [{"name": "a", "type": "int"}, {"name": "b", "type": "int"}]}
          ]}
        ]}
    "#});

    let invoke = run.slot(Slot::StaticInvokeCode);
    assert!(invoke.contains("STATIC_METHOD_UPDATE] && args.size() == 1) do {"));
    assert!(invoke.contains("STATIC_METHOD_UPDATE] && args.size() == 2) do {"));
    assert_eq!(run.slot(Slot::StaticHasMethodCode).lines().count(), 1);
    assert_eq!(run.ctx.registry().len(IdCategory::StaticMethod), 2);
    assert!(run.diagnostics.is_empty());
}

#[test]
fn same_arity_overloads_warn() {
    let run = run(indoc! {r#"
        {"path": "media.idl", "definitions": [
          {"kind": "Namespace", "name": "media", "members": [
            {"kind": "Function", "name": "seek", "type": "void",
             "params": [{"name": "t", "type": "int"}]},
            {"kind": "Function", "name": "seek", "type": "void",
             "params": [{"name": "t", "type": "double"}]}
          ]}
        ]}
    "#});

    assert_eq!(run.diagnostics.kinds(), [DiagnosticKind::AmbiguousOverload]);
    let message = run.diagnostics.iter().next().unwrap();
    assert_eq!(message.member(), "media.seek");
    assert_eq!(message.file(), Some("media.idl"));
}

#[test]
fn methods_fetch_the_native_object_first() {
    let run = run(indoc! {r#"
        {"path": "player.idl", "definitions": [
          {"kind": "Class", "name": "Player", "members": [
            {"kind": "Function", "name": "Play", "type": "bool"}
          ]}
        ]}
    "#});

    assert_eq!(
        run.slot(Slot::InvokeCode),
        indent(
            indoc! {"
              if (name == kMethodNames[METHOD_PLAY] && args.size() == 0) do {
                bool success = true;
                ::Player* object = native_object();
                if (!object) success = false;
                if (!success) break;
                bool retval = object->Play();
                if (!success) break;
                *result = pp::Var(retval);
                return true;
              } while (false);"},
            2
        )
    );
    assert_eq!(
        run.slot(Slot::HasMethodCode),
        "  if (name == kMethodNames[METHOD_PLAY]) return true;"
    );
    assert!(run.slot(Slot::StaticInvokeCode).is_empty());
}

#[test]
fn static_class_methods_use_static_dispatch() {
    let run = run(indoc! {r#"
        {"path": "player.idl", "definitions": [
          {"kind": "Class", "name": "Player", "members": [
            {"kind": "Function", "name": "Count", "type": "int",
             "attributes": {"static": true}}
          ]}
        ]}
    "#});

    assert_eq!(
        run.slot(Slot::StaticInvokeCode),
        indent(
            indoc! {"
              if (name == kStaticMethodNames[STATIC_METHOD_COUNT] && args.size() == 0) do {
                bool success = true;
                int32_t retval = ::Player::Count();
                if (!success) break;
                *result = pp::Var(retval);
                return true;
              } while (false);"},
            2
        )
    );
    assert!(run.slot(Slot::InvokeCode).is_empty());
    assert!(run.slot(Slot::HasMethodCode).is_empty());
    assert_eq!(run.ctx.registry().len(IdCategory::StaticMethod), 1);
    assert_eq!(run.ctx.registry().len(IdCategory::Method), 0);
}

#[test]
fn constructors_go_to_the_default_invoke_slot() {
    let run = run(indoc! {r#"
        {"path": "player.idl", "definitions": [
          {"kind": "Class", "name": "Player", "members": [
            {"kind": "Function", "name": "Player"},
            {"kind": "Function", "name": "~Player"}
          ]}
        ]}
    "#});

    assert!(run.result.is_ok());
    let construct = run.slot(Slot::StaticInvokeDefaultCode);
    assert!(construct.starts_with("  if (args.size() == 0) do {"));
    assert!(construct.contains("::Player* retval = new ::Player();"));
    assert!(construct.contains("*result = glue::class_Player::ObjectWrapper::Wrap(instance, retval);"));
    assert!(run.slot(Slot::StaticHasMethodCode).is_empty());
    assert!(run.ctx.registry().entries(IdCategory::StaticMethod).is_empty());
}

#[test]
fn missing_return_type_is_rejected_before_any_write() {
    let run = run(indoc! {r#"
        {"path": "player.idl", "definitions": [
          {"kind": "Class", "name": "Player", "members": [
            {"kind": "Function", "name": "Stop"}
          ]}
        ]}
    "#});

    assert!(matches!(
        run.result,
        Err(Error::MissingReturnType { ref member, ref container })
            if member == "Player.Stop" && container == "Player"
    ));
    assert!(run.ctx.registry().is_empty());
    assert!(run.slot(Slot::InvokeCode).is_empty());
}

#[test]
fn userglue_methods_get_a_prototype() {
    let run = run(indoc! {r#"
        {"path": "player.idl", "definitions": [
          {"kind": "Class", "name": "Player", "members": [
            {"kind": "Function", "name": "Load", "type": "void",
             "attributes": {"userglue": true, "plugin_data": true},
             "params": [{"name": "url", "type": "string"}]}
          ]}
        ]}
    "#});

    assert!(
        run.slot(Slot::InvokeCode)
            .contains("userglue_method_Load(instance, object, param_url);")
    );
    assert_eq!(
        run.header.lines(),
        ["void userglue_method_Load(void* plugin_data, ::Player* _this, const std::string& url);"]
    );
}

#[test]
fn fields_without_getter_read_as_undefined() {
    let run = run(indoc! {r#"
        {"path": "player.idl", "definitions": [
          {"kind": "Class", "name": "Player", "members": [
            {"kind": "Variable", "name": "secret", "type": "int"}
          ]}
        ]}
    "#});

    assert_eq!(
        run.slot(Slot::GetPropertyCode),
        indent(
            indoc! {"
              if (name == kPropertyNames[PROPERTY_SECRET]) do {
                bool success = true;
                ::Player* object = native_object();
                if (!object) success = false;
                if (!success) break;
                *result = pp::Var();
                return true;
              } while (false);"},
            2
        )
    );
    assert!(run.slot(Slot::SetPropertyCode).is_empty());
    assert_eq!(
        run.slot(Slot::GetAllPropertyNamesCode),
        "  names->push_back(pp::Var(kPropertyNames[PROPERTY_SECRET]));"
    );
}

#[test]
fn fields_with_accessors() {
    let run = run(indoc! {r#"
        {"path": "player.idl", "definitions": [
          {"kind": "Class", "name": "Player", "members": [
            {"kind": "Variable", "name": "volume", "type": "float",
             "attributes": {"getter": true, "setter": true}}
          ]}
        ]}
    "#});

    let get = run.slot(Slot::GetPropertyCode);
    assert!(get.contains("float retval = object->volume();"));
    assert!(get.contains("*result = pp::Var(static_cast<double>(retval));"));

    let set = run.slot(Slot::SetPropertyCode);
    assert!(set.contains("#define PPAPI_GLUE_EXCEPTION_CONTEXT \"field 'volume'\""));
    assert!(set.contains("param_value = static_cast<float>(value.AsDouble());"));
    assert!(set.contains("object->set_volume(param_value);"));
}

#[test]
fn userglue_accessors_get_prototypes() {
    let run = run(indoc! {r#"
        {"path": "player.idl", "definitions": [
          {"kind": "Class", "name": "Player", "members": [
            {"kind": "Variable", "name": "volume", "type": "int",
             "attributes": {"getter": true, "userglue_getter": true,
                            "setter": true, "userglue_setter": true,
                            "plugin_data": true}}
          ]}
        ]}
    "#});

    assert!(
        run.slot(Slot::GetPropertyCode)
            .contains("int32_t retval = userglue_getter_volume(instance, object);")
    );
    assert!(
        run.slot(Slot::SetPropertyCode)
            .contains("userglue_setter_volume(instance, object, param_value);")
    );
    assert_eq!(
        run.header.lines(),
        [
            "int32_t userglue_getter_volume(void* plugin_data, ::Player* _this);",
            "void userglue_setter_volume(void* plugin_data, ::Player* _this, int32_t value);",
        ]
    );
}

#[test]
fn static_userglue_accessors_have_no_this() {
    let run = run(indoc! {r#"
        {"path": "media.idl", "definitions": [
          {"kind": "Namespace", "name": "media", "members": [
            {"kind": "Variable", "name": "count", "type": "int",
             "attributes": {"userglue_getter": true}}
          ]}
        ]}
    "#});

    assert!(
        run.slot(Slot::StaticGetPropertyCode)
            .contains("int32_t retval = userglue_getter_count();")
    );
    assert_eq!(run.header.lines(), ["int32_t userglue_getter_count();"]);
    assert!(run.slot(Slot::StaticSetPropertyCode).is_empty());
}

#[test]
fn namespace_variables_without_getter_read_as_undefined() {
    let run = run(indoc! {r#"
        {"path": "media.idl", "definitions": [
          {"kind": "Namespace", "name": "media", "members": [
            {"kind": "Variable", "name": "count", "type": "int"}
          ]}
        ]}
    "#});

    assert_eq!(
        run.slot(Slot::StaticGetPropertyCode),
        indent(
            indoc! {"
              if (name == kStaticPropertyNames[STATIC_PROPERTY_COUNT]) do {
                bool success = true;
                *result = pp::Var();
                return true;
              } while (false);"},
            2
        )
    );
    assert!(run.slot(Slot::StaticSetPropertyCode).is_empty());
}

#[test]
fn namespace_variables_with_getter_are_read_directly() {
    let run = run(indoc! {r#"
        {"path": "media.idl", "definitions": [
          {"kind": "Namespace", "name": "media", "members": [
            {"kind": "Variable", "name": "count", "type": "int",
             "attributes": {"getter": true, "setter": true}}
          ]}
        ]}
    "#});

    let get = run.slot(Slot::StaticGetPropertyCode);
    assert!(get.starts_with("  if (name == kStaticPropertyNames[STATIC_PROPERTY_COUNT]) do {"));
    assert!(get.contains("int32_t retval = ::media::count;"));
    assert!(run.slot(Slot::StaticSetPropertyCode).contains("::media::count = param_value;"));
}

#[test]
fn static_class_fields_follow_the_namespace_rule() {
    let run = run(indoc! {r#"
        {"path": "player.idl", "definitions": [
          {"kind": "Class", "name": "Player", "members": [
            {"kind": "Variable", "name": "level", "type": "int",
             "attributes": {"static": true}},
            {"kind": "Variable", "name": "limit", "type": "int",
             "attributes": {"static": true, "getter": "GetLimit"}}
          ]}
        ]}
    "#});

    let get = run.slot(Slot::StaticGetPropertyCode);
    assert!(get.contains(indoc! {"
        if (name == kStaticPropertyNames[STATIC_PROPERTY_LEVEL]) do {
            bool success = true;
            *result = pp::Var();"}));
    assert!(get.contains("int32_t retval = ::Player::GetLimit();"));
    assert!(run.slot(Slot::GetPropertyCode).is_empty());
}

#[test]
fn enum_values_answer_their_number() {
    let run = run(indoc! {r#"
        {"path": "media.idl", "definitions": [
          {"kind": "Namespace", "name": "media", "members": [
            {"kind": "Enum", "name": "State", "values": [
              {"name": "idle"}, {"name": "playing", "value": 4}, {"name": "done"}
            ]}
          ]}
        ]}
    "#});

    assert_eq!(
        run.slot(Slot::StaticGetPropertyCode),
        indent(
            indoc! {"
              if (name == kStaticPropertyNames[ENUM_IDLE]) {
                *result = pp::Var(0);
                return true;
              }
              if (name == kStaticPropertyNames[ENUM_PLAYING]) {
                *result = pp::Var(4);
                return true;
              }
              if (name == kStaticPropertyNames[ENUM_DONE]) {
                *result = pp::Var(5);
                return true;
              }"},
            2
        )
    );
    assert_eq!(run.slot(Slot::StaticHasPropertyCode).lines().count(), 3);
    assert!(run.slot(Slot::StaticSetPropertyCode).is_empty());
}

#[test]
fn callbacks_get_a_trampoline() {
    let run = run(indoc! {r#"
        {"path": "media.idl", "definitions": [
          {"kind": "Namespace", "name": "media", "members": [
            {"kind": "Callback", "name": "OnProgress", "type": "bool",
             "params": [{"name": "percent", "type": "int"}]}
          ]}
        ]}
    "#});

    assert_eq!(
        run.header.lines(),
        [
            "namespace callback_OnProgress {",
            "bool RunCallback(pp::InstancePrivate* instance, const pp::Var& callback, int32_t percent);",
            "}  // namespace callback_OnProgress",
        ]
    );
    let cpp = run.cpp.lines().join("\n");
    assert!(cpp.contains("  std::vector<pp::Var> args(1);"));
    assert!(cpp.contains("    pp::Var* arg = &args[0];\n    int32_t native_percent = percent;\n    *arg = pp::Var(native_percent);"));
    assert!(cpp.contains("#define PPAPI_GLUE_EXCEPTION_CONTEXT \"callback return value '<no name>'\""));
    assert!(cpp.contains("  return retval;\n}"));
}

#[test]
fn callbacks_carry_their_binding_model_glue() {
    let run = run(indoc! {r#"
        {"path": "media.idl", "definitions": [
          {"kind": "Namespace", "name": "media", "members": [
            {"kind": "Callback", "name": "Done", "type": "void",
             "attributes": {"binding_model": "by_pointer"}}
          ]}
        ]}
    "#});

    let header = run.header.lines();
    assert_eq!(header.first().map(String::as_str), Some("namespace callback_Done {"));
    assert_eq!(
        header[1],
        "void RunCallback(pp::InstancePrivate* instance, const pp::Var& callback);"
    );
    assert_eq!(
        header[2],
        "  static pp::Var Wrap(pp::InstancePrivate* instance, ::media::Done* object);"
    );
    assert_eq!(header.last().map(String::as_str), Some("}  // namespace callback_Done"));

    let cpp = run.cpp.lines().join("\n");
    let trampoline = cpp.find("RunCallback(").unwrap();
    let extra = cpp.find("::media::Done* ObjectWrapper::native_object() {").unwrap();
    assert!(trampoline < extra);
    assert!(cpp.ends_with("}\n}  // namespace callback_Done"));
}

#[test]
fn callbacks_without_model_glue_emit_only_the_trampoline() {
    let run = run(indoc! {r#"
        {"path": "media.idl", "definitions": [
          {"kind": "Namespace", "name": "media", "members": [
            {"kind": "Callback", "name": "Done", "type": "void"}
          ]}
        ]}
    "#});

    assert_eq!(run.header.lines().len(), 3);
    assert!(!run.cpp.lines().join("\n").contains("ObjectWrapper"));
}

#[test]
fn verbatim_blocks_are_copied() {
    let run = run(indoc! {r#"
        {"path": "media.idl", "definitions": [
          {"kind": "Namespace", "name": "media", "members": [
            {"kind": "Verbatim", "attributes": {"verbatim": "cpp_glue"}, "text": "\nint helper();\n"},
            {"kind": "Verbatim", "attributes": {"verbatim": "header_glue"}, "text": "struct Aux;"},
            {"kind": "Verbatim", "attributes": {"verbatim": "docs"}, "text": "ignored"}
          ]}
        ]}
    "#});

    assert_eq!(run.cpp.lines(), ["int helper();"]);
    assert_eq!(run.header.lines(), ["struct Aux;"]);
}
