//! Validation checks for a deck.
//!
//! Each check takes a `&Deck` and returns a `ValidationResult`. Checks are
//! independent: none relies on another having passed.

use std::collections::BTreeMap;

use crate::registry::KeywordRegistry;
use crate::types::{CellMaterial, Deck, EntityRef, Identified};

use super::warning::{CheckKind, Diagnostic, ValidationResult};

/// Check that every filled cell names a defined material.
pub fn check_material_refs(deck: &Deck) -> ValidationResult {
    let mut result = ValidationResult::new();

    for cell in &deck.cells {
        let CellMaterial::Filled { id, .. } = cell.material else {
            continue;
        };
        if deck.material(id).is_none() {
            result.push(
                Diagnostic::error(
                    CheckKind::MissingMaterial,
                    EntityRef::cell(cell.id),
                    format!("cell {} references material {}, which is not defined", cell.id, id),
                )
                .with_reference(EntityRef::material(id))
                .with_help(format!("Add an m{} card, or make the cell void with material 0", id)),
            );
        }
    }

    result
}

/// Check that every surface in every cell's geometry is defined. One
/// diagnostic per cell and missing surface, however often it is referenced.
pub fn check_surface_refs(deck: &Deck) -> ValidationResult {
    let mut result = ValidationResult::new();

    for cell in &deck.cells {
        for surface in cell.geometry.surface_ids() {
            if deck.surface(surface).is_none() {
                result.push(
                    Diagnostic::error(
                        CheckKind::MissingSurface,
                        EntityRef::cell(cell.id),
                        format!(
                            "cell {} references surface {}, which is not defined",
                            cell.id, surface
                        ),
                    )
                    .with_reference(EntityRef::surface(surface))
                    .with_help(format!("Add a surface card numbered {}", surface)),
                );
            }
        }
    }

    result
}

/// Check coefficient counts against each surface kind's arity.
pub fn check_surface_arity(deck: &Deck) -> ValidationResult {
    let mut result = ValidationResult::new();

    for surface in &deck.surfaces {
        if !surface.has_valid_arity() {
            result.push(Diagnostic::error(
                CheckKind::SurfaceArity,
                EntityRef::surface(surface.id),
                format!(
                    "surface {} ({}) has {} coefficient(s), expected {}",
                    surface.id,
                    surface.kind,
                    surface.coefficients.len(),
                    surface.kind.arity_description()
                ),
            ));
        }
    }

    result
}

/// Check that materials list nuclides and that each nuclide is a
/// well-formed ZAID.
pub fn check_materials(deck: &Deck) -> ValidationResult {
    let mut result = ValidationResult::new();

    for material in deck.materials() {
        let entity = EntityRef::material(material.id);
        if material.is_empty() {
            result.push(
                Diagnostic::error(
                    CheckKind::EmptyMaterial,
                    entity,
                    format!("material {} has no nuclides", material.id),
                )
                .with_help("List at least one nuclide and fraction, e.g. 1001 1.0"),
            );
        }

        for entry in &material.entries {
            if let Some(defect) = entry.nuclide.defect() {
                result.push(Diagnostic::error(
                    CheckKind::MalformedNuclide,
                    entity,
                    format!("material {}: {}", material.id, defect),
                ));
            }
        }
    }

    result
}

/// Check setting keywords against the registry.
pub fn check_settings(deck: &Deck, registry: &KeywordRegistry) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (position, setting) in (1..).zip(deck.settings()) {
        let entity = EntityRef::setting(position);
        let Some(shape) = registry.lookup(setting) else {
            result.push(
                Diagnostic::error(
                    CheckKind::UnknownKeyword,
                    entity,
                    format!("setting #{}: unknown keyword '{}'", position, setting.keyword),
                )
                .with_help("Declare the keyword under `keywords:` in mcdeck.yaml"),
            );
            continue;
        };

        for problem in shape.mismatches(setting) {
            result.push(Diagnostic::error(
                CheckKind::KeywordShape,
                entity,
                format!("setting #{}: {}", position, problem),
            ));
        }
    }

    result
}

/// Re-check id uniqueness. Insertion enforces it, but ids can be edited
/// through the `_mut` accessors afterwards.
pub fn check_duplicate_ids(deck: &Deck) -> ValidationResult {
    let mut result = ValidationResult::new();

    duplicates(deck.cells.iter(), &mut result);
    duplicates(deck.surfaces.iter(), &mut result);
    duplicates(deck.materials().iter(), &mut result);

    result
}

fn duplicates<'a, T: Identified + 'a>(
    items: impl Iterator<Item = &'a T>,
    result: &mut ValidationResult,
) {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for item in items {
        *counts.entry(item.id()).or_default() += 1;
    }

    for (id, count) in counts.into_iter().filter(|&(_, count)| count > 1) {
        result.push(Diagnostic::error(
            CheckKind::DuplicateId,
            EntityRef::new(T::KIND, id),
            format!("{} {} is defined {} times", T::KIND, id, count),
        ));
    }
}

/// Check that `#n` cell complements name defined cells other than the
/// complementing cell itself.
pub fn check_cell_complements(deck: &Deck) -> ValidationResult {
    let mut result = ValidationResult::new();

    for cell in &deck.cells {
        for other in cell.geometry.complemented_cells() {
            let entity = EntityRef::cell(cell.id);
            if other == cell.id {
                result.push(Diagnostic::error(
                    CheckKind::SelfComplement,
                    entity,
                    format!("cell {} complements itself", cell.id),
                ));
            } else if deck.cell(other).is_none() {
                result.push(
                    Diagnostic::error(
                        CheckKind::MissingCell,
                        entity,
                        format!(
                            "cell {} complements cell {}, which is not defined",
                            cell.id, other
                        ),
                    )
                    .with_reference(EntityRef::cell(other)),
                );
            }
        }
    }

    result
}

/// Check that surface transforms have a matching `trN` card.
pub fn check_transforms(deck: &Deck) -> ValidationResult {
    let mut result = ValidationResult::new();

    for surface in &deck.surfaces {
        let Some(n) = surface.transform else {
            continue;
        };
        if deck.settings().transform(n).is_none() {
            result.push(
                Diagnostic::error(
                    CheckKind::MissingTransform,
                    EntityRef::surface(surface.id),
                    format!("surface {} uses transform {}, but there is no tr{} card", surface.id, n, n),
                )
                .with_help(format!("Add a tr{} card to the data section", n)),
            );
        }
    }

    result
}

/// Check that facet references (`-3.2`) name macrobody surfaces.
pub fn check_facets(deck: &Deck) -> ValidationResult {
    let mut result = ValidationResult::new();

    for cell in &deck.cells {
        let mut faceted = BTreeMap::new();
        cell.geometry.for_each_halfspace(&mut |h| {
            if let Some(facet) = h.facet {
                faceted.entry(h.surface).or_insert(facet);
            }
        });

        for (surface, facet) in faceted {
            let Some(kind) = deck.surface(surface).map(|s| s.kind) else {
                continue;
            };
            if kind.is_macrobody() {
                continue;
            }
            result.push(
                Diagnostic::error(
                    CheckKind::FacetOnPlainSurface,
                    EntityRef::cell(cell.id),
                    format!(
                        "cell {} uses facet {}.{}, but surface {} is a {} surface, not a macrobody",
                        cell.id, surface, facet, surface, kind
                    ),
                )
                .with_reference(EntityRef::surface(surface))
                .with_help(format!("Refer to surface {} without a facet", surface)),
            );
        }
    }

    result
}

/// Warn about keywords the registry marks unique appearing more than once.
pub fn check_repeated_settings(deck: &Deck, registry: &KeywordRegistry) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut first_seen: BTreeMap<&str, u32> = BTreeMap::new();

    for (position, setting) in (1..).zip(deck.settings()) {
        let unique = registry.lookup(setting).is_some_and(|shape| shape.unique);
        if !unique {
            continue;
        }

        match first_seen.get(setting.keyword.as_str()) {
            Some(first) => result.push(Diagnostic::warning(
                CheckKind::RepeatedSetting,
                EntityRef::setting(position),
                format!(
                    "setting #{}: '{}' already appears as setting #{}",
                    position, setting.keyword, first
                ),
            )),
            None => {
                first_seen.insert(setting.keyword.as_str(), position);
            }
        }
    }

    result
}
