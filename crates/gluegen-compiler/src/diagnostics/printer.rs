//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use gluegen_core::Colors;

use super::Diagnostics;
use super::message::Severity;

/// Builder for rendering diagnostics with various options.
pub struct DiagnosticsPrinter<'d> {
    diagnostics: &'d Diagnostics,
    colored: bool,
}

impl<'d> DiagnosticsPrinter<'d> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            colored: false,
        }
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    /// One block per diagnostic:
    ///
    /// ```text
    /// warning: missing documentation for Function `ping`
    ///   --> plugin.idl: media.ping
    ///   = hint: ...
    /// ```
    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let c = Colors::new(self.colored);
        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            let level = match diag.severity() {
                Severity::Error => c.red,
                Severity::Warning => c.yellow,
            };
            writeln!(w, "{level}{}{}: {}", diag.severity(), c.reset, diag.message())?;

            match (diag.file(), diag.member()) {
                (Some(file), "") => writeln!(w, "  {}-->{} {file}", c.dim, c.reset)?,
                (Some(file), member) => {
                    writeln!(w, "  {}-->{} {file}: {}{member}{}", c.dim, c.reset, c.blue, c.reset)?
                }
                (None, "") => {}
                (None, member) => writeln!(w, "  {}-->{} {}{member}{}", c.dim, c.reset, c.blue, c.reset)?,
            }
            for hint in &diag.hints {
                writeln!(w, "  {}= hint:{} {hint}", c.dim, c.reset)?;
            }
        }
        Ok(())
    }
}
