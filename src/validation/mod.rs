//! Deck validation.
//!
//! Runs a suite of checks against a parsed (or hand-built) deck and reports
//! every problem found. Validation never fails and never stops early; a deck
//! is valid when the result holds no diagnostics.

mod checks;
mod warning;

pub use warning::{CheckKind, Diagnostic, Severity, ValidationResult};

use tracing::{debug, instrument};

use crate::registry::KeywordRegistry;
use crate::types::Deck;

/// Validate a deck against the built-in keyword registry.
pub fn validate_deck(deck: &Deck) -> ValidationResult {
    validate_with(deck, &KeywordRegistry::builtin())
}

/// Run all validation checks, in order, against the deck.
#[instrument(skip_all, fields(title = %deck.title))]
pub fn validate_with(deck: &Deck, registry: &KeywordRegistry) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_material_refs(deck));
    result.merge(checks::check_surface_refs(deck));
    result.merge(checks::check_surface_arity(deck));
    result.merge(checks::check_materials(deck));
    result.merge(checks::check_settings(deck, registry));
    result.merge(checks::check_duplicate_ids(deck));
    result.merge(checks::check_cell_complements(deck));
    result.merge(checks::check_transforms(deck));
    result.merge(checks::check_facets(deck));
    result.merge(checks::check_repeated_settings(deck, registry));

    debug!(
        errors = result.error_count(),
        warnings = result.warning_count(),
        "validated deck"
    );
    result
}
