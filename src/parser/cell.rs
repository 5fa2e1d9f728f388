//! Cell card parser.
//!
//! ```text
//! id material [density] geometry... [name[:particles][=]value...]...
//! ```

use crate::error::DeckError;
use crate::types::{Cell, CellMaterial, CellParams, EntityKind, ParamValue, Real};

use super::assign::{split_assignments, starts_keyword};
use super::geometry::parse_geometry;
use super::lexer::{LogicalCard, Word};
use super::number::{parse_id, parse_real, parse_unsigned};
use super::{missing_field, word_error};

fn error(word: &Word, message: impl Into<String>) -> DeckError {
    word_error(EntityKind::Cell, word, message)
}

/// Parse a cell card.
pub fn parse_cell(card: &LogicalCard) -> Result<Cell, DeckError> {
    let words = card.words();
    let mut fields = words.iter();

    let id_word = fields
        .next()
        .ok_or_else(|| missing_field(EntityKind::Cell, card, "cell number"))?;
    let id = parse_id(&id_word.text)
        .ok_or_else(|| error(id_word, "cell number must be an integer from 1 to 99999999"))?;

    let material_word = fields
        .next()
        .ok_or_else(|| missing_field(EntityKind::Cell, card, "material number"))?;
    if material_word.text.eq_ignore_ascii_case("like") {
        return Err(error(material_word, "'like n but' cell cards are not supported"));
    }
    let material_id = parse_unsigned(&material_word.text)
        .ok_or_else(|| error(material_word, "material number must be an integer from 0 to 99999999"))?;

    let material = if material_id == 0 {
        CellMaterial::Void
    } else {
        let density_word = fields
            .next()
            .ok_or_else(|| missing_field(EntityKind::Cell, card, "density"))?;
        let density = parse_real(&density_word.text)
            .ok_or_else(|| error(density_word, "density must be a number"))?;
        CellMaterial::Filled {
            id: material_id,
            density: Real(density),
        }
    };

    let rest: Vec<Word> = fields.cloned().collect();
    let split = rest
        .iter()
        .position(|w| starts_keyword(&w.text))
        .unwrap_or(rest.len());
    let (geometry_words, param_words) = rest.split_at(split);

    if geometry_words.is_empty() {
        let at = param_words.first().unwrap_or(material_word);
        return Err(error(at, "cell has no geometry"));
    }
    let geometry = parse_geometry(geometry_words)?;
    let params = parse_params(param_words)?;

    Ok(Cell {
        id,
        material,
        geometry,
        params,
    })
}

/// Parse the keyword parameters that follow the geometry.
fn parse_params(words: &[Word]) -> Result<CellParams, DeckError> {
    let tokens = split_assignments(words);
    let mut params = CellParams::new();
    let mut i = 0;

    while i < tokens.len() {
        let name = &tokens[i];
        if !starts_keyword(&name.text) {
            return Err(error(name, "expected a keyword parameter"));
        }
        i += 1;

        let assigned = tokens.get(i).is_some_and(|t| t.text == "=");
        if assigned {
            i += 1;
        }

        let mut values = Vec::new();
        while let Some(token) = tokens.get(i) {
            if token.text == "=" {
                return Err(error(token, "unexpected '='"));
            }
            // After `=` the first value may be symbolic; any later word that
            // starts with a letter begins the next parameter.
            let first_after_assign = assigned && values.is_empty();
            if !first_after_assign && starts_keyword(&token.text) {
                break;
            }
            values.push(param_value(&token.text));
            i += 1;
        }

        if values.is_empty() {
            return Err(error(name, "parameter has no value"));
        }
        if params.contains(&name.text) {
            return Err(error(name, "parameter given twice"));
        }
        params.insert(name.text.as_str(), values);
    }

    Ok(params)
}

fn param_value(text: &str) -> ParamValue {
    match parse_real(text) {
        Some(v) => ParamValue::Number(Real(v)),
        None => ParamValue::Symbol(text.to_string()),
    }
}
