//! Type table: every named type the definitions can refer to.
//!
//! Built once from all input files before generation starts. Lookups resolve
//! a (possibly qualified) name from the innermost scope outwards, the way C++
//! name lookup would, and follow typedefs to their final type.

use gluegen_core::{Definition, SourceFile};
use indexmap::IndexMap;

use crate::binding::BindingKind;
use crate::{Error, Result};

const MAX_TYPEDEF_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Builtin,
    Class,
    Enum,
    Callback,
    Typename,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefn {
    /// Dotted path, `media.Player`. Builtins use their bare name.
    pub path: String,
    pub name: String,
    pub kind: TypeKind,
    pub binding: BindingKind,
    /// Fully qualified C++ spelling.
    pub cpp_name: String,
    /// Index of the defining input file; `None` for builtins.
    pub file: Option<usize>,
    /// Header to include for the full definition.
    pub definition_include: Option<String>,
    /// Full glue namespace for types that get their own glue (classes, callbacks).
    pub glue_namespace: Option<String>,
    /// Resolved base class path.
    pub base: Option<String>,
}

impl TypeDefn {
    fn builtin(name: &str, cpp_name: &str) -> Self {
        Self {
            path: name.to_string(),
            name: name.to_string(),
            kind: TypeKind::Builtin,
            binding: BindingKind::Pod,
            cpp_name: cpp_name.to_string(),
            file: None,
            definition_include: None,
            glue_namespace: None,
            base: None,
        }
    }

    pub fn is_void(&self) -> bool {
        self.kind == TypeKind::Builtin && self.name == "void"
    }
}

const BUILTINS: &[(&str, &str)] = &[
    ("void", "void"),
    ("bool", "bool"),
    ("int", "int32_t"),
    ("float", "float"),
    ("double", "double"),
    ("string", "std::string"),
    ("size_t", "size_t"),
    ("Var", "pp::Var"),
];

/// Glue namespace segment of a container or callback, `namespace_media`.
pub fn glue_segment(defn: &Definition) -> Option<String> {
    let prefix = match defn {
        Definition::Namespace(_) => "namespace",
        Definition::Class(_) => "class",
        Definition::Callback(_) => "callback",
        _ => return None,
    };
    Some(format!("{prefix}_{}", defn.name()?))
}

/// Join a dotted scope and a name.
pub fn join_path(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}.{name}")
    }
}

/// `media.Player` → `::media::Player`.
pub fn cpp_qualified(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    path.split('.').map(|seg| format!("::{seg}")).collect()
}

#[derive(Debug, Clone)]
struct Alias {
    target: String,
    /// Scope the typedef was declared in, where its target is looked up.
    scope: String,
}

#[derive(Debug, Clone)]
pub struct TypeTable {
    types: IndexMap<String, TypeDefn>,
    aliases: IndexMap<String, Alias>,
    builtins: IndexMap<String, TypeDefn>,
}

struct Walker<'a> {
    table: &'a mut TypeTable,
    file: usize,
    header: String,
    /// Unresolved base names, with the scope they are looked up from.
    bases: Vec<(String, String, String)>,
}

impl Walker<'_> {
    fn walk(&mut self, defs: &[Definition], scope: &str, glue_ns: &str) -> Result<()> {
        for defn in defs {
            let Some(name) = defn.name() else {
                continue;
            };
            let path = join_path(scope, name);
            let glue_here = glue_segment(defn).map(|seg| format!("{glue_ns}::{seg}"));

            let (kind, default_binding) = match defn {
                Definition::Namespace(ns) => {
                    let inner = glue_here.as_deref().unwrap_or(glue_ns);
                    self.walk(&ns.members, &path, inner)?;
                    continue;
                }
                Definition::Class(class) => {
                    if let Some(base) = &class.base {
                        self.bases.push((path.clone(), scope.to_string(), base.clone()));
                    }
                    let inner = glue_here.as_deref().unwrap_or(glue_ns);
                    self.walk(&class.members, &path, inner)?;
                    (TypeKind::Class, BindingKind::ByPointer)
                }
                Definition::Enum(_) => (TypeKind::Enum, BindingKind::Enum),
                Definition::Callback(_) => (TypeKind::Callback, BindingKind::Callback),
                Definition::Typename(_) => (TypeKind::Typename, BindingKind::Pod),
                Definition::Typedef(typedef) => {
                    self.table.aliases.insert(
                        path,
                        Alias {
                            target: typedef.type_name.clone(),
                            scope: scope.to_string(),
                        },
                    );
                    continue;
                }
                Definition::Function(_) | Definition::Variable(_) | Definition::Verbatim(_) => {
                    continue;
                }
            };

            let binding = match defn.attributes().value("binding_model") {
                Some(model) => {
                    BindingKind::from_name(model).ok_or_else(|| Error::UnknownBindingModel {
                        name: model.to_string(),
                        member: path.clone(),
                    })?
                }
                None => default_binding,
            };

            let cpp_name = match kind {
                // Typenames name an existing C++ type verbatim.
                TypeKind::Typename => name.to_string(),
                _ => cpp_qualified(&path),
            };

            let defn = TypeDefn {
                path: path.clone(),
                name: name.to_string(),
                kind,
                binding,
                cpp_name,
                file: Some(self.file),
                definition_include: Some(self.header.clone()),
                glue_namespace: glue_here,
                base: None,
            };
            self.table.types.insert(path, defn);
        }
        Ok(())
    }
}

impl TypeTable {
    /// Register every type of every file, then resolve base classes.
    pub fn build(files: &[SourceFile], glue_namespace: &str) -> Result<Self> {
        let mut table = TypeTable {
            types: IndexMap::new(),
            aliases: IndexMap::new(),
            builtins: BUILTINS
                .iter()
                .map(|&(name, cpp)| (name.to_string(), TypeDefn::builtin(name, cpp)))
                .collect(),
        };

        let mut bases = Vec::new();
        for (index, file) in files.iter().enumerate() {
            let mut walker = Walker {
                table: &mut table,
                file: index,
                header: file.header(),
                bases: Vec::new(),
            };
            walker.walk(&file.definitions, "", glue_namespace)?;
            bases.extend(walker.bases);
        }

        for (class_path, scope, base) in bases {
            let resolved = table
                .lookup(&scope, &base)
                .filter(|t| t.kind == TypeKind::Class)
                .map(|t| t.path.clone())
                .ok_or_else(|| Error::UnresolvedType {
                    name: base.clone(),
                    member: class_path.clone(),
                })?;
            if let Some(class) = table.types.get_mut(&class_path) {
                class.base = Some(resolved);
            }
        }

        tracing::debug!(types = table.types.len(), aliases = table.aliases.len(), "type table built");
        Ok(table)
    }

    /// Type registered at exactly `path`.
    pub fn get(&self, path: &str) -> Option<&TypeDefn> {
        self.types.get(path).or_else(|| self.builtins.get(path))
    }

    /// Resolve `name` as seen from `scope` (a dotted path, `""` for global).
    ///
    /// `name` may be qualified with `.` or `::`.
    pub fn lookup(&self, scope: &str, name: &str) -> Option<&TypeDefn> {
        self.lookup_at_depth(scope, name, 0)
    }

    /// [`TypeTable::lookup`], failing with [`Error::UnresolvedType`] on behalf of `member`.
    pub fn resolve(&self, scope: &str, name: &str, member: &str) -> Result<&TypeDefn> {
        self.lookup(scope, name).ok_or_else(|| Error::UnresolvedType {
            name: name.to_string(),
            member: member.to_string(),
        })
    }

    fn lookup_at_depth(&self, scope: &str, name: &str, depth: usize) -> Option<&TypeDefn> {
        if depth > MAX_TYPEDEF_DEPTH {
            return None;
        }
        let normalized = name.trim().replace("::", ".");
        let name = normalized.trim_start_matches('.');
        if name.is_empty() {
            return None;
        }

        let mut prefix = Some(scope);
        while let Some(current) = prefix {
            let path = join_path(current, name);
            if let Some(found) = self.types.get(&path) {
                return Some(found);
            }
            if let Some(alias) = self.aliases.get(&path) {
                return self.lookup_at_depth(&alias.scope, &alias.target, depth + 1);
            }
            prefix = match current.rsplit_once('.') {
                Some((parent, _)) => Some(parent),
                None if current.is_empty() => None,
                None => Some(""),
            };
        }
        self.builtins.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDefn> {
        self.types.values()
    }
}
