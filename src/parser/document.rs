//! Deck assembly: text to `Deck`.
//!
//! Every stage keeps going after a failure so that a single call reports all
//! problems in the document: malformed lines, structural problems, and each
//! card that fails its grammar.

use tracing::{debug, instrument, trace};

use crate::error::{DeckError, ParseErrors};
use crate::types::{Collection, Deck, EntityKind, Identified};

use super::cell::parse_cell;
use super::lexer::{CardReader, LogicalCard, ReaderOptions};
use super::material::{material_number, parse_material};
use super::sections::classify;
use super::setting::parse_setting;
use super::surface::parse_surface;

/// Parse deck text with default reader options.
pub fn parse_deck(source: &str) -> Result<Deck, ParseErrors> {
    parse_with(source, None, &ReaderOptions::default())
}

/// Parse deck text, naming the document in the error summary.
pub fn parse_named(source: &str, name: &str) -> Result<Deck, ParseErrors> {
    parse_with(source, Some(name), &ReaderOptions::default())
}

/// Parse deck text.
#[instrument(skip_all, fields(document = name.unwrap_or("deck"), bytes = source.len()))]
pub fn parse_with(
    source: &str,
    name: Option<&str>,
    options: &ReaderOptions,
) -> Result<Deck, ParseErrors> {
    let fail = |errors: Vec<DeckError>| ParseErrors {
        document: name.map(str::to_string),
        errors,
    };

    let mut errors = Vec::new();
    let mut records = Vec::new();
    for record in CardReader::with_options(source, *options) {
        match record {
            Ok(record) => records.push(record),
            Err(err) => errors.push(err),
        }
    }
    debug!(records = records.len(), malformed = errors.len(), "read cards");

    let sections = match classify(records) {
        Ok(sections) => sections,
        Err(structural) => {
            errors.extend(structural);
            return Err(fail(errors));
        }
    };

    let mut deck = Deck::new(sections.title);

    for card in &sections.cells {
        trace!(line = card.line(), "cell card");
        add_parsed(card, parse_cell(card), &mut deck.cells, &mut errors);
    }

    for card in &sections.surfaces {
        trace!(line = card.line(), "surface card");
        add_parsed(card, parse_surface(card), &mut deck.surfaces, &mut errors);
    }

    for card in &sections.data {
        let is_material = card.first_word().and_then(material_number).is_some();
        if is_material {
            trace!(line = card.line(), "material card");
            add_parsed(card, parse_material(card), &mut deck.data.materials, &mut errors);
        } else {
            trace!(line = card.line(), "data card");
            match parse_setting(card) {
                Ok(setting) => deck.add_setting(setting),
                Err(err) => errors.push(err),
            }
        }
    }

    if !errors.is_empty() {
        debug!(errors = errors.len(), "deck failed to parse");
        return Err(fail(errors));
    }

    debug!(
        cells = deck.cells.len(),
        surfaces = deck.surfaces.len(),
        materials = deck.data.materials.len(),
        settings = deck.data.settings.len(),
        "parsed deck"
    );
    Ok(deck)
}

/// Insert a parsed entity, turning a clash with an earlier card into a
/// located parse error.
fn add_parsed<T: Identified>(
    card: &LogicalCard,
    parsed: Result<T, DeckError>,
    into: &mut Collection<T>,
    errors: &mut Vec<DeckError>,
) {
    let item = match parsed {
        Ok(item) => item,
        Err(err) => {
            errors.push(err);
            return;
        }
    };

    if let Err(DeckError::DuplicateId { kind, id }) = into.insert(item) {
        errors.push(duplicate(card, kind, id));
    }
}

fn duplicate(card: &LogicalCard, kind: EntityKind, id: u32) -> DeckError {
    DeckError::CardParse {
        kind,
        line: card.line(),
        token: card.first_word().unwrap_or_default().to_string(),
        message: format!("{} {} is already defined", kind, id),
    }
}
