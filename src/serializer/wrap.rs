//! Line wrapping for long cards.
//!
//! Fields are packed onto lines of at most `wrap_columns` characters.
//! Continuation lines are indented five spaces, which the reader treats as
//! part of the card above. A single field wider than the wrap width gets a
//! line to itself; it is an error only if that line exceeds `max_columns`.

use crate::error::{DeckError, Result};

use super::FormatOptions;

pub(crate) const CONTINUATION_INDENT: &str = "     ";

/// Append one card, wrapped, to `out`. Every line ends with `\n`.
pub(crate) fn write_card(out: &mut String, fields: &[String], options: &FormatOptions) -> Result<()> {
    let mut line = String::new();
    let mut width = 0;

    for field in fields {
        let field_width = field.chars().count();

        if width == 0 {
            line.push_str(field);
            width = field_width;
        } else if width + 1 + field_width <= options.wrap_columns {
            line.push(' ');
            line.push_str(field);
            width += 1 + field_width;
        } else {
            finish_line(out, &line, width, options)?;
            line.clear();
            line.push_str(CONTINUATION_INDENT);
            line.push_str(field);
            width = CONTINUATION_INDENT.len() + field_width;
        }
    }

    if width > 0 {
        finish_line(out, &line, width, options)?;
    }
    Ok(())
}

fn finish_line(out: &mut String, line: &str, width: usize, options: &FormatOptions) -> Result<()> {
    if width > options.max_columns {
        return Err(DeckError::serialization(format!(
            "'{}' does not fit within {} columns",
            line.trim_start(),
            options.max_columns
        )));
    }
    out.push_str(line);
    out.push('\n');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(fields: &[&str], wrap_columns: usize) -> Result<String> {
        let fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        let options = FormatOptions {
            wrap_columns,
            max_columns: 20,
        };
        let mut out = String::new();
        write_card(&mut out, &fields, &options)?;
        Ok(out)
    }

    #[test]
    fn test_short_card_on_one_line() {
        assert_eq!(wrap(&["1", "so", "5"], 80).unwrap(), "1 so 5\n");
    }

    #[test]
    fn test_wraps_at_word_boundaries() {
        let out = wrap(&["1", "rpp", "-10", "10", "-10", "10"], 12).unwrap();
        assert_eq!(out, "1 rpp -10 10\n     -10 10\n");
    }

    #[test]
    fn test_long_field_gets_own_line() {
        let out = wrap(&["m1", "92235.80c"], 8).unwrap();
        assert_eq!(out, "m1\n     92235.80c\n");
    }

    #[test]
    fn test_field_too_wide_for_any_line() {
        let err = wrap(&["m1", "x".repeat(30).as_str()], 10).unwrap_err();
        assert!(matches!(err, DeckError::Serialization { .. }));
    }
}
