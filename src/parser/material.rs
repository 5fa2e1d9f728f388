//! Material card parser.
//!
//! ```text
//! mN nuclide fraction [nuclide fraction]... [key=value]...
//! ```

use crate::error::DeckError;
use crate::types::{EntityKind, Material, MaterialEntry, Nuclide, Real};

use super::assign::split_assignments;
use super::lexer::{LogicalCard, Word};
use super::number::{parse_id, parse_real};
use super::{missing_field, word_error};

fn error(word: &Word, message: impl Into<String>) -> DeckError {
    word_error(EntityKind::Material, word, message)
}

/// Material number named by a data card's first word, if it is a material
/// card: `m12` (any case), or a bare positive integer.
pub fn material_number(first_word: &str) -> Option<u32> {
    match first_word.strip_prefix(|c| c == 'm' || c == 'M') {
        Some(digits) => parse_id(digits),
        None => parse_id(first_word),
    }
}

/// Parse a material card.
pub fn parse_material(card: &LogicalCard) -> Result<Material, DeckError> {
    let words = card.words();
    let (id_word, rest) = words
        .split_first()
        .ok_or_else(|| missing_field(EntityKind::Material, card, "material number"))?;
    let id = material_number(&id_word.text)
        .ok_or_else(|| error(id_word, "expected a material card such as m1"))?;

    let tokens = split_assignments(rest);
    let mut material = Material::new(id);
    let mut i = 0;

    while i < tokens.len() {
        let word = &tokens[i];
        if word.text == "=" {
            return Err(error(word, "unexpected '='"));
        }

        if tokens.get(i + 1).is_some_and(|t| t.text == "=") {
            let value = tokens
                .get(i + 2)
                .filter(|t| t.text != "=")
                .ok_or_else(|| error(word, "option has no value"))?;
            material
                .options
                .push((word.text.to_ascii_lowercase(), value.text.clone()));
            i += 3;
            continue;
        }

        let fraction = tokens
            .get(i + 1)
            .and_then(|t| parse_real(&t.text))
            .ok_or_else(|| error(word, "nuclide has no fraction"))?;
        material.entries.push(MaterialEntry {
            nuclide: Nuclide::new(word.text.as_str()),
            fraction: Real(fraction),
        });
        i += 2;
    }

    Ok(material)
}
