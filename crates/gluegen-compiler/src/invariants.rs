//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

/// A section that reaches itself would make flattening loop forever.
pub(crate) fn section_cycle(parent: &str, child: &str) -> ! {
    panic!("section `{child}` cannot be linked into itself (through `{parent}`)")
}

/// Every definition that reaches glue emission was registered in the type table.
pub(crate) fn missing_type(path: &str) -> ! {
    panic!("type `{path}` was not registered in the type table")
}
