//! Validation diagnostics and the result that collects them.

use std::fmt;

use serde::Serialize;

use crate::types::EntityRef;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckKind {
    MissingMaterial,
    MissingSurface,
    SurfaceArity,
    EmptyMaterial,
    MalformedNuclide,
    UnknownKeyword,
    KeywordShape,
    DuplicateId,
    MissingCell,
    SelfComplement,
    MissingTransform,
    FacetOnPlainSurface,
    RepeatedSetting,
}

impl CheckKind {
    /// Machine-readable code, e.g. `mcdeck::validate::missing-surface`.
    pub fn code(&self) -> &'static str {
        match self {
            CheckKind::MissingMaterial => "mcdeck::validate::missing-material",
            CheckKind::MissingSurface => "mcdeck::validate::missing-surface",
            CheckKind::SurfaceArity => "mcdeck::validate::surface-arity",
            CheckKind::EmptyMaterial => "mcdeck::validate::empty-material",
            CheckKind::MalformedNuclide => "mcdeck::validate::malformed-nuclide",
            CheckKind::UnknownKeyword => "mcdeck::validate::unknown-keyword",
            CheckKind::KeywordShape => "mcdeck::validate::keyword-shape",
            CheckKind::DuplicateId => "mcdeck::validate::duplicate-id",
            CheckKind::MissingCell => "mcdeck::validate::missing-cell",
            CheckKind::SelfComplement => "mcdeck::validate::self-complement",
            CheckKind::MissingTransform => "mcdeck::validate::missing-transform",
            CheckKind::FacetOnPlainSurface => "mcdeck::validate::facet-on-plain-surface",
            CheckKind::RepeatedSetting => "mcdeck::validate::repeated-setting",
        }
    }
}

/// One problem found on one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: CheckKind,
    /// The entity the problem was found on.
    pub entity: EntityRef,
    /// The entity it points at, when the problem is a bad reference.
    pub reference: Option<EntityRef>,
    pub message: String,
    /// How to fix it, when there is an obvious fix.
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(kind: CheckKind, entity: EntityRef, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            entity,
            reference: None,
            message: message.into(),
            help: None,
        }
    }

    pub fn warning(kind: CheckKind, entity: EntityRef, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(kind, entity, message)
        }
    }

    /// Name the entity a bad reference points at.
    pub fn with_reference(mut self, reference: EntityRef) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code(), self.message)
    }
}

/// Everything one validation run found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.count(Severity::Warning) > 0
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// A deck is valid when it has no diagnostics at all, warnings included.
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Append the diagnostics of a later check.
    pub fn merge(&mut self, other: ValidationResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Diagnostics in the order the checks found them.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Diagnostics found on one entity.
    pub fn for_entity(&self, entity: EntityRef) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.entity == entity)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
