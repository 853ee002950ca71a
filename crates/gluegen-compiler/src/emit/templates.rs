//! C++ text of the container glue.
//!
//! `${Key}` placeholders are filled through [`crate::section::substitute`];
//! lines holding only `${#Slot}` become links to the container's slots when
//! the filled template is emitted with [`crate::section::Section::emit_template`].

/// Declaration of a container's static object. Shared by namespaces, the
/// global scope and classes.
pub const STATIC_OBJECT_HEADER: &str = "\
class StaticObject : public ${Runtime}::StaticObject {
 public:
  StaticObject();
  virtual void RegisterObjectBases(${Runtime}::StaticObject* root_object);
  virtual void RegisterObjectWrappers(pp::InstancePrivate* instance);
  virtual bool HasMethodInner(const std::string name);
  virtual bool HasPropertyInner(const std::string name);
  virtual bool GetPropertyInner(pp::InstancePrivate* instance,
                                const std::string name,
                                pp::Var* exception,
                                pp::Var* result);
  virtual void GetAllPropertyNames(std::vector<pp::Var>* names,
                                   pp::Var* exception);
  virtual bool SetPropertyInner(pp::InstancePrivate* instance,
                                const std::string name,
                                const pp::Var& value,
                                pp::Var* exception);
  virtual bool CallInner(pp::InstancePrivate* instance,
                         const std::string name,
                         const std::vector<pp::Var>& args,
                         pp::Var* exception,
                         pp::Var* result);
  virtual bool ConstructInner(pp::InstancePrivate* instance,
                              const std::vector<pp::Var>& args,
                              pp::Var* exception,
                              pp::Var* result);
  static ${Runtime}::StaticObject* GetStaticObject(
      ${Runtime}::StaticObject* root_object);
};";

/// Declaration of a class's instance wrapper.
pub const OBJECT_WRAPPER_HEADER: &str = "\
class ObjectWrapper : public ${WrapperBase} {
 public:
  explicit ObjectWrapper(pp::InstancePrivate* instance);
  virtual ~ObjectWrapper();
  virtual bool HasMethodInner(const std::string name);
  virtual bool HasPropertyInner(const std::string name);
  virtual bool GetPropertyInner(const std::string name,
                                pp::Var* exception,
                                pp::Var* result);
  virtual void GetAllPropertyNames(std::vector<pp::Var>* names,
                                   pp::Var* exception);
  virtual bool SetPropertyInner(const std::string name,
                                const pp::Var& value,
                                pp::Var* exception);
  virtual bool CallInner(const std::string name,
                         const std::vector<pp::Var>& args,
                         pp::Var* exception,
                         pp::Var* result);
  static void RegisterWrapper(pp::InstancePrivate* instance);
${BindingGlueHeader}
};";

/// Identifier tables, private to the container's glue namespace.
pub const ID_TABLES: &str = "\
namespace {
${StaticMethodIds}
${StaticMethodNames}
${StaticPropertyIds}
${StaticPropertyNames}
${NamespaceIds}
${NamespaceNames}
${MethodIds}
${MethodNames}
${PropertyIds}
${PropertyNames}
}  // namespace";

/// Definition of a container's static object.
pub const STATIC_OBJECT_CPP: &str = "
StaticObject::StaticObject() : ${Runtime}::StaticObject() {
${#CreateNamespaces}
}

void StaticObject::RegisterObjectBases(
    ${Runtime}::StaticObject* root_object) {
${#RegisterBases}
}

void StaticObject::RegisterObjectWrappers(pp::InstancePrivate* instance) {
${#InitNamespaceGlues}
${#RegisterObjectWrappers}
}

bool StaticObject::HasMethodInner(const std::string name) {
${#StaticHasMethodCode}
  return ${Runtime}::StaticObject::HasMethodInner(name);
}

bool StaticObject::HasPropertyInner(const std::string name) {
${#StaticHasPropertyCode}
  return ${Runtime}::StaticObject::HasPropertyInner(name);
}

bool StaticObject::GetPropertyInner(pp::InstancePrivate* instance,
                                    const std::string name,
                                    pp::Var* exception,
                                    pp::Var* result) {
${#StaticGetPropertyCode}
  return ${Runtime}::StaticObject::GetPropertyInner(instance, name,
                                                    exception, result);
}

void StaticObject::GetAllPropertyNames(std::vector<pp::Var>* names,
                                       pp::Var* exception) {
${#StaticGetAllPropertyNamesCode}
  ${Runtime}::StaticObject::GetAllPropertyNames(names, exception);
}

bool StaticObject::SetPropertyInner(pp::InstancePrivate* instance,
                                    const std::string name,
                                    const pp::Var& value,
                                    pp::Var* exception) {
${#StaticSetPropertyCode}
  return ${Runtime}::StaticObject::SetPropertyInner(instance, name, value,
                                                    exception);
}

bool StaticObject::CallInner(pp::InstancePrivate* instance,
                             const std::string name,
                             const std::vector<pp::Var>& args,
                             pp::Var* exception,
                             pp::Var* result) {
${#StaticInvokeCode}
  return ${Runtime}::StaticObject::CallInner(instance, name, args,
                                             exception, result);
}

bool StaticObject::ConstructInner(pp::InstancePrivate* instance,
                                  const std::vector<pp::Var>& args,
                                  pp::Var* exception,
                                  pp::Var* result) {
${#StaticInvokeDefaultCode}
  if (!exception->is_string())
    *exception = pp::Var(\"missing constructor\");
  return false;
}
${#GetStaticObjects}";

/// Definition of a class's instance wrapper. The `*Fallback` keys hold the
/// tail of each dispatcher: the base class call, or the "not found" result.
pub const OBJECT_WRAPPER_CPP: &str = "
ObjectWrapper::ObjectWrapper(pp::InstancePrivate* instance)
    : ${WrapperBase}(instance) {}

ObjectWrapper::~ObjectWrapper() {}

void ObjectWrapper::RegisterWrapper(pp::InstancePrivate* instance) {
  ${Runtime}::RegisterWrapper<ObjectWrapper>(instance);
}

bool ObjectWrapper::HasMethodInner(const std::string name) {
${#HasMethodCode}
  ${HasMethodFallback}
}

bool ObjectWrapper::HasPropertyInner(const std::string name) {
${#HasPropertyCode}
  ${HasPropertyFallback}
}

bool ObjectWrapper::GetPropertyInner(const std::string name,
                                     pp::Var* exception,
                                     pp::Var* result) {
  pp::InstancePrivate* instance = plugin_instance();
${#GetPropertyCode}
  ${GetPropertyFallback}
}

void ObjectWrapper::GetAllPropertyNames(std::vector<pp::Var>* names,
                                        pp::Var* exception) {
${#GetAllPropertyNamesCode}
  ${GetAllPropertyNamesFallback}
}

bool ObjectWrapper::SetPropertyInner(const std::string name,
                                     const pp::Var& value,
                                     pp::Var* exception) {
  pp::InstancePrivate* instance = plugin_instance();
${#SetPropertyCode}
  ${SetPropertyFallback}
}

bool ObjectWrapper::CallInner(const std::string name,
                              const std::vector<pp::Var>& args,
                              pp::Var* exception,
                              pp::Var* result) {
  pp::InstancePrivate* instance = plugin_instance();
${#InvokeCode}
  ${CallFallback}
}
${BindingGlueCpp}";

/// Dispatcher tails of a wrapper whose class has a base class.
pub const BASE_FALLBACKS: [(&str, &str); 6] = [
    ("HasMethodFallback", "return ${Base}::HasMethodInner(name);"),
    ("HasPropertyFallback", "return ${Base}::HasPropertyInner(name);"),
    (
        "GetPropertyFallback",
        "return ${Base}::GetPropertyInner(name, exception, result);",
    ),
    (
        "GetAllPropertyNamesFallback",
        "${Base}::GetAllPropertyNames(names, exception);",
    ),
    (
        "SetPropertyFallback",
        "return ${Base}::SetPropertyInner(name, value, exception);",
    ),
    (
        "CallFallback",
        "return ${Base}::CallInner(name, args, exception, result);",
    ),
];

/// Dispatcher tails of a wrapper without base class.
pub const ROOT_FALLBACKS: [(&str, &str); 6] = [
    ("HasMethodFallback", "return false;"),
    ("HasPropertyFallback", "return false;"),
    (
        "GetPropertyFallback",
        "if (exception->is_null())\n    *exception = pp::Var(\"property does not exist\");\n  return false;",
    ),
    (
        "GetAllPropertyNamesFallback",
        "pp::deprecated::ScriptableObject::GetAllPropertyNames(names, exception);",
    ),
    (
        "SetPropertyFallback",
        "if (exception->is_null())\n    *exception = pp::Var(\"property can not be set\");\n  return false;",
    ),
    (
        "CallFallback",
        "if (exception->is_null())\n    *exception = pp::Var(\"method does not exist\");\n  return false;",
    ),
];

/// Nested container creation, in the parent's static object constructor.
pub const CREATE_NESTED: &str = "\
  ${Runtime}::StaticObject* ${Segment} = new ${Segment}::StaticObject();
  AddNamespaceObject(kNamespaceNames[${Tag}], ${Segment});";

/// Base class hookup of a nested class, in the parent's `RegisterObjectBases`.
pub const REGISTER_BASE: &str = "\
  {
    ${Runtime}::StaticObject* base =
        ${BaseNamespace}::StaticObject::GetStaticObject(root_object);
    GetNamespaceObject(kNamespaceNames[${Tag}])->SetBaseClass(base);
  }";

/// Recursion into a nested container without base, in `RegisterObjectBases`.
pub const REGISTER_NO_BASE: &str = "\
  GetNamespaceObject(kNamespaceNames[${Tag}])->RegisterObjectBases(root_object);";

pub const REGISTER_WRAPPERS: &str = "\
  GetNamespaceObject(kNamespaceNames[${Tag}])->RegisterObjectWrappers(instance);";

/// Instance wrapper registration of a nested class.
pub const INIT_CLASS_GLUE: &str = "  ${Segment}::ObjectWrapper::RegisterWrapper(instance);";

/// Lookup of a nested container's static object through its parent.
///
/// Defined inside the nested container's namespace, so the parent's id
/// table is named through the parent's namespace.
pub const GET_STATIC_OBJECT: &str = "\
${Runtime}::StaticObject* StaticObject::GetStaticObject(
    ${Runtime}::StaticObject* root_object) {
  ${Runtime}::StaticObject* parent = ${ParentLookup};
  return parent->GetNamespaceObject(
      ${Parent}::kNamespaceNames[${Parent}::${Tag}]);
}";

/// Lookup of the root static object, defined with the global glue.
pub const GET_ROOT_OBJECT: &str = "
${Runtime}::StaticObject* StaticObject::GetStaticObject(
    ${Runtime}::StaticObject* root_object) {
  return root_object;
}";
