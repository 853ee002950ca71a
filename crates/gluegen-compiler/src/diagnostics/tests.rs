use super::*;

#[test]
fn report_uses_fallback_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::EmptyDocumentation, "media.Player")
        .emit();

    let msg = diagnostics.iter().next().unwrap();
    assert_eq!(msg.message(), "documentation block is empty");
    assert_eq!(msg.member(), "media.Player");
    assert_eq!(msg.severity(), Severity::Warning);
}

#[test]
fn custom_message_fills_template() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::MissingDocumentation, "ping")
        .message("Function `ping`")
        .emit();
    diagnostics
        .report(DiagnosticKind::DocumentationWithoutTypeOrId, "x")
        .message("`x`")
        .emit();

    let messages: Vec<_> = diagnostics.iter().map(|m| m.message().to_string()).collect();
    assert_eq!(
        messages,
        [
            "missing documentation for Function `ping`",
            "documentation block has neither type nor id: `x`",
        ]
    );
}

#[test]
fn counts_by_severity() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(DiagnosticKind::AmbiguousOverload, "a").emit();
    diagnostics
        .report(DiagnosticKind::AmbiguousOverload, "b")
        .severity(Severity::Error)
        .emit();

    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(diagnostics.error_count(), 1);
    assert!(diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
}

#[test]
fn extend_keeps_order() {
    let mut first = Diagnostics::new();
    first.report(DiagnosticKind::EmptyDocumentation, "a").emit();
    let mut second = Diagnostics::new();
    second.report(DiagnosticKind::DanglingDocumentation, "b").emit();
    first.extend(second);

    assert_eq!(
        first.kinds(),
        [
            DiagnosticKind::EmptyDocumentation,
            DiagnosticKind::DanglingDocumentation
        ]
    );
}

#[test]
fn display_plain() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::MissingDocumentation, "media.ping")
        .message("Function `ping`")
        .file("media.idl")
        .hint("add a docs block")
        .emit();

    let msg = diagnostics.iter().next().unwrap();
    assert_eq!(
        msg.to_string(),
        "warning: missing documentation for Function `ping` (media.idl: media.ping) (hint: add a docs block)"
    );
}

#[test]
fn printer_plain() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::AmbiguousOverload, "media.Player.update")
        .message("update")
        .file("player.idl")
        .emit();
    diagnostics.report(DiagnosticKind::EmptyDocumentation, "").emit();

    insta::assert_snapshot!(diagnostics.printer().render(), @r"
    warning: `update` is declared more than once with the same arity; the first declaration wins
      --> player.idl: media.Player.update

    warning: documentation block is empty
    ");
}

#[test]
fn printer_colored_wraps_severity() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(DiagnosticKind::EmptyDocumentation, "x").emit();

    let out = diagnostics.printer().colored(true).render();
    assert!(out.starts_with("\x1b[33mwarning\x1b[0m: "));
    assert!(out.contains("\x1b[34mx\x1b[0m"));
}
