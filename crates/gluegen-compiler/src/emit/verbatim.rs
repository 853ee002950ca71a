//! Hand-written glue copied through unchanged.

use gluegen_core::Verbatim;

use super::Emitter;
use crate::context::GenContext;

impl Emitter<'_> {
    /// `verbatim=cpp_glue` goes to the implementation, `verbatim=header_glue`
    /// to the header. Other blocks (documentation) produce no glue.
    pub fn verbatim(&mut self, ctx: &GenContext, block: &Verbatim) {
        let text = block.text.trim_matches('\n');
        match block.attributes.value("verbatim") {
            Some("cpp_glue") => ctx.cpp().emit(text),
            Some("header_glue") => ctx.header().emit(text),
            _ => {}
        }
    }
}
