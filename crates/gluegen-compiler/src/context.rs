//! Per-container generation state.
//!
//! A [`GenContext`] is created for every container visit: the global scope,
//! each namespace block, each class. The first context of a scope *owns* the
//! slots and identifier lists that the container's consolidated glue is built
//! from; later contexts of the same scope (a namespace reopened in another
//! file) *alias* them through [`GenContext::share`]. Contexts are not `Clone`:
//! the only way to get a second context onto the same state is an explicit
//! share, which records [`Ownership::Aliases`].

use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeSet;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::binding::BindingModel;
use crate::registry::{IdCategory, Registry};
use crate::section::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Global,
    Namespace,
    Class,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    Owns,
    Aliases,
}

/// Named dispatch buffers of a container's glue.
///
/// Every container has the static slots; classes also have instance slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    InitNamespaceGlues,
    CreateNamespaces,
    RegisterBases,
    RegisterObjectWrappers,
    GetStaticObjects,
    StaticInvokeCode,
    StaticInvokeDefaultCode,
    StaticHasMethodCode,
    StaticGetPropertyCode,
    StaticHasPropertyCode,
    StaticGetAllPropertyNamesCode,
    StaticSetPropertyCode,
    InvokeCode,
    GetPropertyCode,
    GetAllPropertyNamesCode,
    SetPropertyCode,
    HasMethodCode,
    HasPropertyCode,
}

impl Slot {
    pub const STATIC: [Slot; 12] = [
        Slot::InitNamespaceGlues,
        Slot::CreateNamespaces,
        Slot::RegisterBases,
        Slot::RegisterObjectWrappers,
        Slot::GetStaticObjects,
        Slot::StaticInvokeCode,
        Slot::StaticInvokeDefaultCode,
        Slot::StaticHasMethodCode,
        Slot::StaticGetPropertyCode,
        Slot::StaticHasPropertyCode,
        Slot::StaticGetAllPropertyNamesCode,
        Slot::StaticSetPropertyCode,
    ];

    pub const INSTANCE: [Slot; 6] = [
        Slot::InvokeCode,
        Slot::GetPropertyCode,
        Slot::GetAllPropertyNamesCode,
        Slot::SetPropertyCode,
        Slot::HasMethodCode,
        Slot::HasPropertyCode,
    ];

    /// Marker name used in container templates (`${#StaticInvokeCode}`).
    pub fn template_name(self) -> &'static str {
        match self {
            Slot::InitNamespaceGlues => "InitNamespaceGlues",
            Slot::CreateNamespaces => "CreateNamespaces",
            Slot::RegisterBases => "RegisterBases",
            Slot::RegisterObjectWrappers => "RegisterObjectWrappers",
            Slot::GetStaticObjects => "GetStaticObjects",
            Slot::StaticInvokeCode => "StaticInvokeCode",
            Slot::StaticInvokeDefaultCode => "StaticInvokeDefaultCode",
            Slot::StaticHasMethodCode => "StaticHasMethodCode",
            Slot::StaticGetPropertyCode => "StaticGetPropertyCode",
            Slot::StaticHasPropertyCode => "StaticHasPropertyCode",
            Slot::StaticGetAllPropertyNamesCode => "StaticGetAllPropertyNamesCode",
            Slot::StaticSetPropertyCode => "StaticSetPropertyCode",
            Slot::InvokeCode => "InvokeCode",
            Slot::GetPropertyCode => "GetPropertyCode",
            Slot::GetAllPropertyNamesCode => "GetAllPropertyNamesCode",
            Slot::SetPropertyCode => "SetPropertyCode",
            Slot::HasMethodCode => "HasMethodCode",
            Slot::HasPropertyCode => "HasPropertyCode",
        }
    }
}

/// Include bookkeeping of one output file, by scope path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileNeeds {
    /// Types whose full definition the glue header needs.
    pub definition: BTreeSet<String>,
    /// Types and namespaces whose glue header the glue header needs.
    pub header_glue: BTreeSet<String>,
    /// Types and namespaces whose glue header the implementation needs.
    pub cpp_glue: BTreeSet<String>,
    /// Literal includes of the glue header, such as binding-model support headers.
    pub header_includes: BTreeSet<String>,
    /// Literal includes of the implementation, such as headers declaring called functions.
    pub cpp_includes: BTreeSet<String>,
}

pub type SharedNeeds = Rc<RefCell<FileNeeds>>;

/// A namespace or class registered in its parent's static object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedContainer {
    pub name: String,
    /// Scope path, also the type path for classes.
    pub path: String,
    pub kind: ContainerKind,
    /// Full glue namespace, `glue::namespace_media`.
    pub glue_namespace: String,
    /// Full glue namespace of the base class, for classes that have one.
    pub base_glue_namespace: Option<String>,
}

impl NestedContainer {
    /// Last segment of the glue namespace, `namespace_media`.
    pub fn glue_segment(&self) -> &str {
        self.glue_namespace
            .rsplit("::")
            .next()
            .unwrap_or(&self.glue_namespace)
    }
}

/// Identity of the container a context generates for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    /// Dotted scope path; empty for the global scope.
    pub scope: String,
    pub name: String,
    pub kind: ContainerKind,
    /// Full glue namespace the container's glue lives in.
    pub glue_namespace: String,
    /// C++ qualifier of the container's members (`::media`); empty for global.
    pub qualifier: String,
}

/// State every context of one scope sees.
struct SharedState {
    /// Where the consolidated declarations of the container go.
    glue_header: Section,
    /// Where the consolidated definitions go; holds the slots.
    glue_cpp: Section,
    slots: IndexMap<Slot, Section>,
    registry: RefCell<Registry>,
    nested: RefCell<Vec<NestedContainer>>,
    /// Callables seen so far, as (category, display name, arity).
    signatures: RefCell<Vec<(IdCategory, String, usize)>>,
    /// Needs of the file holding the slots.
    needs: SharedNeeds,
}

pub struct GenContext {
    info: ContainerInfo,
    binding: &'static dyn BindingModel,
    header: Section,
    cpp: Section,
    file_needs: SharedNeeds,
    shared: Rc<SharedState>,
    ownership: Ownership,
}

impl std::fmt::Debug for GenContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenContext")
            .field("scope", &self.info.scope)
            .field("kind", &self.info.kind)
            .field("binding", &self.binding.name())
            .field("ownership", &self.ownership)
            .finish()
    }
}

impl GenContext {
    /// Create an owning context.
    ///
    /// The container's consolidated glue gets its own sections, linked into
    /// `header` and `cpp` at their current position; the slots are detached
    /// sections of the definition one, linked when its template is emitted.
    pub fn new(
        info: ContainerInfo,
        binding: &'static dyn BindingModel,
        header: Section,
        cpp: Section,
        file_needs: SharedNeeds,
    ) -> Self {
        let instance: &[Slot] = match info.kind {
            ContainerKind::Class => &Slot::INSTANCE,
            ContainerKind::Global | ContainerKind::Namespace => &[],
        };
        let glue_header = header.create_slot(&format!("{}.header", info.glue_namespace));
        let glue_cpp = cpp.create_slot(&format!("{}.cpp", info.glue_namespace));
        let slots = Slot::STATIC
            .iter()
            .chain(instance)
            .map(|&slot| (slot, glue_cpp.create_detached_slot(slot.template_name())))
            .collect();

        tracing::trace!(scope = %info.scope, kind = ?info.kind, "context created");
        let shared = Rc::new(SharedState {
            glue_header,
            glue_cpp,
            slots,
            registry: RefCell::new(Registry::new()),
            nested: RefCell::new(Vec::new()),
            signatures: RefCell::new(Vec::new()),
            needs: Rc::clone(&file_needs),
        });
        Self {
            info,
            binding,
            header,
            cpp,
            file_needs,
            shared,
            ownership: Ownership::Owns,
        }
    }

    /// Create a context writing its own declarations to `header`/`cpp` while
    /// aliasing every slot and list of `canonical`.
    pub fn share(canonical: &GenContext, header: Section, cpp: Section, file_needs: SharedNeeds) -> Self {
        tracing::trace!(scope = %canonical.info.scope, "context shared");
        Self {
            info: canonical.info.clone(),
            binding: canonical.binding,
            header,
            cpp,
            file_needs,
            shared: Rc::clone(&canonical.shared),
            ownership: Ownership::Aliases,
        }
    }

    pub fn info(&self) -> &ContainerInfo {
        &self.info
    }

    pub fn scope(&self) -> &str {
        &self.info.scope
    }

    pub fn kind(&self) -> ContainerKind {
        self.info.kind
    }

    /// Namespaces and the global scope only dispatch statically.
    pub fn is_static_only(&self) -> bool {
        self.info.kind != ContainerKind::Class
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    pub fn binding(&self) -> &'static dyn BindingModel {
        self.binding
    }

    /// Declaration surface of the file this context was created in.
    pub fn header(&self) -> &Section {
        &self.header
    }

    /// Definition surface of the file this context was created in.
    pub fn cpp(&self) -> &Section {
        &self.cpp
    }

    /// Consolidated declaration section of the container.
    pub fn glue_header(&self) -> &Section {
        &self.shared.glue_header
    }

    /// Consolidated definition section of the container, owner of the slots.
    pub fn glue_cpp(&self) -> &Section {
        &self.shared.glue_cpp
    }

    /// Needs of the file this context was created in.
    pub fn file_needs(&self) -> RefMut<'_, FileNeeds> {
        self.file_needs.borrow_mut()
    }

    pub fn file_needs_handle(&self) -> SharedNeeds {
        Rc::clone(&self.file_needs)
    }

    /// Needs of the file holding the shared slots.
    pub fn slot_needs(&self) -> RefMut<'_, FileNeeds> {
        self.shared.needs.borrow_mut()
    }

    /// Shared dispatch buffer. Namespaces have no instance slots.
    pub fn slot(&self, slot: Slot) -> Option<Section> {
        self.shared.slots.get(&slot).cloned()
    }

    pub fn registry(&self) -> Ref<'_, Registry> {
        self.shared.registry.borrow()
    }

    pub fn registry_mut(&self) -> RefMut<'_, Registry> {
        self.shared.registry.borrow_mut()
    }

    pub fn nested(&self) -> Ref<'_, Vec<NestedContainer>> {
        self.shared.nested.borrow()
    }

    /// Register a nested namespace or class and its `SCOPE_` id.
    pub fn add_nested(&self, nested: NestedContainer) {
        self.registry_mut()
            .register(IdCategory::Namespace, &nested.name);
        self.shared.nested.borrow_mut().push(nested);
    }

    /// Record a callable; returns `true` when one with the same name and arity was seen.
    pub fn record_signature(&self, category: IdCategory, name: &str, arity: usize) -> bool {
        let mut signatures = self.shared.signatures.borrow_mut();
        let seen = signatures
            .iter()
            .any(|(c, n, a)| *c == category && n == name && *a == arity);
        signatures.push((category, name.to_string(), arity));
        seen
    }

    /// Whether both contexts write into the same slots and lists.
    pub fn shares_state_with(&self, other: &GenContext) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}
