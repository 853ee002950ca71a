//! Enum values as read-only static properties.

use gluegen_core::Enum;

use super::function::is_first;
use super::{Emitter, name_matches, probe};
use crate::context::{GenContext, Slot};
use crate::registry::IdCategory;

impl Emitter<'_> {
    /// Each value answers its literal number; there is no setter path.
    pub fn enumeration(&mut self, ctx: &GenContext, defn: &Enum) {
        let category = IdCategory::StaticProperty;
        for (value_name, value) in defn.resolved_values() {
            let entry = ctx.registry_mut().register_enum_value(value_name);
            if is_first(ctx, category, &entry.tag) {
                if let Some(section) = ctx.slot(Slot::StaticHasPropertyCode) {
                    section.emit(&probe(category, &entry.tag));
                }
                if let Some(section) = ctx.slot(Slot::StaticGetAllPropertyNamesCode) {
                    section.emit(&format!(
                        "  names->push_back(pp::Var(k{}Names[{}]));",
                        category.stem(),
                        entry.tag
                    ));
                }
            }
            if let Some(section) = ctx.slot(Slot::StaticGetPropertyCode) {
                section.emit(&format!(
                    "  if ({}) {{\n    *result = pp::Var({value});\n    return true;\n  }}",
                    name_matches(category, &entry.tag)
                ));
            }
        }
    }
}
