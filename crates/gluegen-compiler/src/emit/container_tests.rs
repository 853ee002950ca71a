//! Consolidated container glue.

use std::cell::RefCell;
use std::rc::Rc;

use indoc::indoc;

use super::{class_glue, global_glue, namespace_glue};
use crate::binding::BindingKind;
use crate::context::{ContainerInfo, ContainerKind, FileNeeds, GenContext, NestedContainer, Slot};
use crate::section::Section;
use crate::test_utils::files;
use crate::types::TypeTable;

fn context(kind: ContainerKind, scope: &str, glue_namespace: &str) -> (GenContext, Section, Section) {
    let (header, cpp) = (Section::new("h"), Section::new("cc"));
    let binding = match kind {
        ContainerKind::Class => BindingKind::ByPointer,
        _ => BindingKind::Globals,
    };
    let info = ContainerInfo {
        scope: scope.to_string(),
        name: scope.rsplit('.').next().unwrap_or(scope).to_string(),
        kind,
        glue_namespace: glue_namespace.to_string(),
        qualifier: String::new(),
    };
    let ctx = GenContext::new(
        info,
        binding.model(),
        header.clone(),
        cpp.clone(),
        Rc::new(RefCell::new(FileNeeds::default())),
    );
    (ctx, header, cpp)
}

fn text(section: &Section) -> String {
    section.lines().join("\n")
}

#[test]
fn empty_namespace_has_no_name_arrays() {
    let (ctx, header, cpp) = context(ContainerKind::Namespace, "media", "glue::namespace_media");
    namespace_glue(&ctx);

    assert!(text(&header).starts_with("class StaticObject : public glue::globals::StaticObject {"));
    let cpp = text(&cpp);
    assert!(cpp.starts_with(indoc! {"
        namespace {
        enum StaticMethodId {
          NUM_STATIC_METHOD_IDS
        };
    "}));
    assert!(!cpp.contains("kStaticMethodNames"));
    assert!(cpp.contains("StaticObject::StaticObject() : glue::globals::StaticObject() {\n}"));
    assert!(cpp.contains("  *exception = pp::Var(\"missing constructor\");"));
}

#[test]
fn registered_names_fill_the_tables() {
    let (ctx, _, cpp) = context(ContainerKind::Namespace, "media", "glue::namespace_media");
    ctx.registry_mut()
        .register(crate::registry::IdCategory::StaticMethod, "play");
    ctx.slot(Slot::StaticHasMethodCode)
        .unwrap()
        .emit("  if (name == kStaticMethodNames[STATIC_METHOD_PLAY]) return true;");
    namespace_glue(&ctx);

    let cpp = text(&cpp);
    assert!(cpp.contains(indoc! {r#"
        static const char* const kStaticMethodNames[NUM_STATIC_METHOD_IDS] = {
          "play",
        };
    "#}));
    assert!(cpp.contains(indoc! {"
        bool StaticObject::HasMethodInner(const std::string name) {
          if (name == kStaticMethodNames[STATIC_METHOD_PLAY]) return true;
          return glue::globals::StaticObject::HasMethodInner(name);
        }
    "}));
}

#[test]
fn nested_containers_are_created_and_looked_up() {
    let (ctx, _, cpp) = context(ContainerKind::Namespace, "media", "glue::namespace_media");
    ctx.add_nested(NestedContainer {
        name: "Player".to_string(),
        path: "media.Player".to_string(),
        kind: ContainerKind::Class,
        glue_namespace: "glue::namespace_media::class_Player".to_string(),
        base_glue_namespace: Some("glue::class_Source".to_string()),
    });
    namespace_glue(&ctx);

    let slot = |slot| text(&ctx.slot(slot).unwrap());
    assert_eq!(
        slot(Slot::CreateNamespaces),
        indoc! {"
            glue::globals::StaticObject* class_Player = new class_Player::StaticObject();
            AddNamespaceObject(kNamespaceNames[SCOPE_PLAYER], class_Player);"}
        .lines()
        .map(|l| format!("  {l}"))
        .collect::<Vec<_>>()
        .join("\n")
    );
    let bases = slot(Slot::RegisterBases);
    assert!(bases.contains("        glue::class_Source::StaticObject::GetStaticObject(root_object);"));
    assert!(bases.contains("    GetNamespaceObject(kNamespaceNames[SCOPE_PLAYER])->SetBaseClass(base);"));
    assert!(bases.ends_with(
        "  GetNamespaceObject(kNamespaceNames[SCOPE_PLAYER])->RegisterObjectBases(root_object);"
    ));
    assert_eq!(
        slot(Slot::InitNamespaceGlues),
        "  class_Player::ObjectWrapper::RegisterWrapper(instance);"
    );

    let lookups = slot(Slot::GetStaticObjects);
    assert!(lookups.starts_with("namespace class_Player {"));
    assert!(lookups.contains(
        "  glue::globals::StaticObject* parent = ::glue::namespace_media::StaticObject::GetStaticObject(root_object);"
    ));
    assert!(lookups.contains(
        "      ::glue::namespace_media::kNamespaceNames[::glue::namespace_media::SCOPE_PLAYER]);"
    ));
    assert!(lookups.ends_with("}  // namespace class_Player"));

    assert!(text(&cpp).contains("static const char* const kNamespaceNames[NUM_SCOPE_IDS] = {\n  \"Player\",\n};"));
}

#[test]
fn global_glue_returns_the_root() {
    let (ctx, _, cpp) = context(ContainerKind::Global, "", "glue");
    ctx.add_nested(NestedContainer {
        name: "media".to_string(),
        path: "media".to_string(),
        kind: ContainerKind::Namespace,
        glue_namespace: "glue::namespace_media".to_string(),
        base_glue_namespace: None,
    });
    global_glue(&ctx);

    let cpp = text(&cpp);
    assert!(cpp.contains("  glue::globals::StaticObject* parent = root_object;"));
    assert!(cpp.ends_with(indoc! {"
        glue::globals::StaticObject* StaticObject::GetStaticObject(
            glue::globals::StaticObject* root_object) {
          return root_object;
        }"}));
    assert!(!text(&ctx.slot(Slot::InitNamespaceGlues).unwrap()).contains("RegisterWrapper"));
}

#[test]
fn class_wrappers_fall_back_to_their_base() {
    let files = files(indoc! {r#"
        {"path": "player.idl", "definitions": [
          {"kind": "Class", "name": "Source"},
          {"kind": "Class", "name": "Player", "base": "Source"}
        ]}
    "#});
    let types = TypeTable::build(&files, "glue").unwrap();
    let player = types.get("Player").unwrap();
    let source = types.get("Source").unwrap();

    let (ctx, header, cpp) = context(ContainerKind::Class, "Player", "glue::class_Player");
    class_glue(&ctx, player, Some(source));

    let header = text(&header);
    assert!(header.contains("class ObjectWrapper : public glue::class_Source::ObjectWrapper {"));
    let cpp = text(&cpp);
    assert!(cpp.contains("    : glue::class_Source::ObjectWrapper(instance) {}"));
    assert!(cpp.contains("  return glue::class_Source::ObjectWrapper::CallInner(name, args, exception, result);"));
    assert!(cpp.contains("  glue::globals::RegisterWrapper<ObjectWrapper>(instance);"));
}

#[test]
fn root_class_wrappers_report_missing_members() {
    let files = files(r#"{"path": "player.idl", "definitions": [{"kind": "Class", "name": "Player"}]}"#);
    let types = TypeTable::build(&files, "glue").unwrap();
    let player = types.get("Player").unwrap();

    let (ctx, header, cpp) = context(ContainerKind::Class, "Player", "glue::class_Player");
    class_glue(&ctx, player, None);

    assert!(text(&header).contains("class ObjectWrapper : public glue::globals::PointerWrapper<::Player> {"));
    let cpp = text(&cpp);
    assert!(cpp.contains("    *exception = pp::Var(\"method does not exist\");"));
    assert!(cpp.contains("  return false;\n}"));
    assert!(cpp.contains("ObjectWrapper::Wrap"));
}
