//! Surface card parser.
//!
//! ```text
//! [*|+]id [transform] mnemonic coefficient...
//! ```

use crate::error::DeckError;
use crate::types::{Boundary, EntityKind, Real, Surface, SurfaceKind};

use super::lexer::{LogicalCard, Word};
use super::number::{parse_id, parse_real};
use super::{missing_field, word_error};

fn error(word: &Word, message: impl Into<String>) -> DeckError {
    word_error(EntityKind::Surface, word, message)
}

/// Parse a surface card.
///
/// The mnemonic is resolved first; the coefficient count is then checked
/// against that kind's arity and reported at the mnemonic.
pub fn parse_surface(card: &LogicalCard) -> Result<Surface, DeckError> {
    let words = card.words();
    let mut fields = words.iter().peekable();

    let id_word = fields
        .next()
        .ok_or_else(|| missing_field(EntityKind::Surface, card, "surface number"))?;
    let (boundary, number) = match id_word.text.as_bytes().first() {
        Some(b'*') => (Boundary::Reflective, &id_word.text[1..]),
        Some(b'+') => (Boundary::White, &id_word.text[1..]),
        _ => (Boundary::Vacuum, id_word.text.as_str()),
    };
    let id = parse_id(number)
        .ok_or_else(|| error(id_word, "surface number must be an integer from 1 to 99999999"))?;

    let mut transform = None;
    if let Some(word) = fields.next_if(|w| starts_numeric(&w.text)) {
        if word.text.starts_with('-') {
            return Err(error(word, "periodic surfaces are not supported"));
        }
        transform = Some(
            parse_id(&word.text)
                .ok_or_else(|| error(word, "transform number must be an integer from 1 to 99999999"))?,
        );
    }

    let mnemonic_word = fields
        .next()
        .ok_or_else(|| missing_field(EntityKind::Surface, card, "surface mnemonic"))?;
    let kind = SurfaceKind::from_mnemonic(&mnemonic_word.text)
        .ok_or_else(|| error(mnemonic_word, "unknown surface mnemonic"))?;

    let coefficients = fields
        .map(|w| {
            parse_real(&w.text)
                .map(Real)
                .ok_or_else(|| error(w, "coefficient must be a number"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if !kind.accepts(coefficients.len()) {
        return Err(error(
            mnemonic_word,
            format!(
                "{} expects {} coefficients, found {}",
                kind,
                kind.arity_description(),
                coefficients.len()
            ),
        ));
    }

    Ok(Surface {
        id,
        kind,
        coefficients,
        transform,
        boundary,
    })
}

fn starts_numeric(text: &str) -> bool {
    text.bytes()
        .next()
        .is_some_and(|b| b.is_ascii_digit() || b == b'-' || b == b'+')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::{read_cards, Record};

    fn parse(text: &str) -> Result<Surface, DeckError> {
        let source = format!("title\n{text}\n");
        let card = read_cards(&source)
            .filter_map(|r| match r.unwrap() {
                Record::Card(c) => Some(c),
                Record::Blank { .. } => None,
            })
            .nth(1)
            .unwrap();
        parse_surface(&card)
    }

    #[test]
    fn test_sphere() {
        let surface = parse("1 so 5.0").unwrap();
        assert_eq!(surface, Surface::sphere_at_origin(1, 5.0));
    }

    #[test]
    fn test_transform_and_boundary() {
        let surface = parse("*10 3 PZ 2.0e1").unwrap();

        assert_eq!(surface.id, 10);
        assert_eq!(surface.kind, SurfaceKind::PlaneZ);
        assert_eq!(surface.transform, Some(3));
        assert_eq!(surface.boundary, Boundary::Reflective);
        assert_eq!(surface.coefficients, vec![Real(20.0)]);
    }

    #[test]
    fn test_macrobody_over_continuation() {
        let surface = parse("2 rpp -1 1\n     -2 2 -3 3").unwrap();
        assert_eq!(surface.kind, SurfaceKind::RectangularPrism);
        assert_eq!(surface.coefficients.len(), 6);
    }

    #[test]
    fn test_arity_mismatch_reported_at_mnemonic() {
        let err = parse("1 so 5 6").unwrap_err();
        match err {
            DeckError::CardParse { token, message, .. } => {
                assert_eq!(token, "so");
                assert_eq!(message, "SO expects 1 coefficients, found 2");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_errors() {
        let cases = [
            ("0 so 5", "0"),
            ("1 qq 5", "qq"),
            ("1 -2 pz 0", "-2"),
            ("1 px abc", "abc"),
            ("1 1.5 px 0", "1.5"),
        ];
        for (text, token) in cases {
            match parse(text) {
                Err(DeckError::CardParse { token: t, kind, .. }) => {
                    assert_eq!(t, token, "{text}");
                    assert_eq!(kind, EntityKind::Surface);
                }
                other => panic!("{text}: expected error, got {other:?}"),
            }
        }
    }
}
