//! Setting card parser: a keyword and its arguments.

use crate::error::DeckError;
use crate::types::{EntityKind, Real, Setting, SettingValue};

use super::assign::starts_keyword;
use super::lexer::{LogicalCard, Word};
use super::number::parse_real;
use super::{missing_field, word_error};

/// Parse a non-material data card.
///
/// Arguments that read as numbers become `Number`; everything else,
/// including repeat shorthands like `2r` and `key=value` words, is kept as
/// `Text`.
pub fn parse_setting(card: &LogicalCard) -> Result<Setting, DeckError> {
    let words = card.words();
    let (keyword, rest) = words
        .split_first()
        .ok_or_else(|| missing_field(EntityKind::Setting, card, "keyword"))?;

    if !starts_keyword(&keyword.text) || keyword.text.contains('=') {
        return Err(word_error(
            EntityKind::Setting,
            keyword,
            "data card must start with a keyword",
        ));
    }

    let args = rest.iter().map(|w: &Word| argument(&w.text)).collect();
    Ok(Setting::new(keyword.text.as_str(), args))
}

fn argument(text: &str) -> SettingValue {
    match parse_real(text) {
        Some(v) => SettingValue::Number(Real(v)),
        None => SettingValue::Text(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::{read_cards, Record};

    fn parse(text: &str) -> Result<Setting, DeckError> {
        let source = format!("title\n{text}\n");
        let card = read_cards(&source)
            .filter_map(|r| match r.unwrap() {
                Record::Card(c) => Some(c),
                Record::Blank { .. } => None,
            })
            .nth(1)
            .unwrap();
        parse_setting(&card)
    }

    #[test]
    fn test_kcode() {
        let setting = parse("KCODE 1000 1.0 10 50").unwrap();

        assert_eq!(setting.keyword, "kcode");
        assert_eq!(
            setting.args,
            vec![1000.0.into(), 1.0.into(), 10.0.into(), 50.0.into()]
        );
    }

    #[test]
    fn test_mixed_arguments() {
        let setting = parse("sdef pos=0 0 0 erg=14 par=n").unwrap();

        assert_eq!(setting.args[0], SettingValue::from("pos=0"));
        assert_eq!(setting.args[1], SettingValue::from(0.0));
        assert_eq!(setting.args[4], SettingValue::from("par=n"));
    }

    #[test]
    fn test_keyword_with_designator() {
        let setting = parse("f4:n 1 2").unwrap();
        assert_eq!(setting.stem(), "f");
        assert_eq!(setting.parts().number, Some(4));
    }

    #[test]
    fn test_numeric_keyword_rejected() {
        let err = parse("12 3").unwrap_err();
        assert!(matches!(err, DeckError::CardParse { kind: EntityKind::Setting, .. }));
    }
}
