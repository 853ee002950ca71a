/// What a diagnostic is about.
///
/// Every kind is recoverable: generation continues and still produces its
/// best-effort output. Structural input errors are [`crate::Error`]s instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Documentation stubs
    MissingDocumentation,
    DanglingDocumentation,
    DocumentationWithoutTypeOrId,
    EmptyDocumentation,

    // Dispatch generation
    AmbiguousOverload,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::MissingDocumentation => "missing documentation",
            Self::DanglingDocumentation => "documentation does not match any definition",
            Self::DocumentationWithoutTypeOrId => "documentation block has neither type nor id",
            Self::EmptyDocumentation => "documentation block is empty",
            Self::AmbiguousOverload => "ambiguous overload",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::MissingDocumentation => "missing documentation for {}".to_string(),
            Self::DanglingDocumentation => {
                "documentation for {} does not match any definition".to_string()
            }
            Self::AmbiguousOverload => {
                "`{}` is declared more than once with the same arity; the first declaration wins"
                    .to_string()
            }
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) severity: Severity,
    /// Dotted path of the definition the message is about.
    pub(crate) member: String,
    /// Input file the member comes from, when known.
    pub(crate) file: Option<String>,
    pub(crate) message: String,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(kind: DiagnosticKind, member: String) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            member,
            file: None,
            message: kind.fallback_message().to_string(),
            hints: Vec::new(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn member(&self) -> &str {
        &self.member
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        match (&self.file, self.member.is_empty()) {
            (Some(file), false) => write!(f, " ({file}: {})", self.member)?,
            (Some(file), true) => write!(f, " ({file})")?,
            (None, false) => write!(f, " ({})", self.member)?,
            (None, true) => {}
        }
        for hint in &self.hints {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}
