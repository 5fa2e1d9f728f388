//! `name=value` splitting shared by cell parameters and material options.

use super::lexer::Word;

/// Split every `=` out into a word of its own, so `imp:n=1`, `imp:n= 1`
/// and `imp:n = 1` all read as `imp:n`, `=`, `1`.
pub(crate) fn split_assignments(words: &[Word]) -> Vec<Word> {
    let mut out = Vec::with_capacity(words.len());

    for word in words {
        let mut rest = word.text.as_str();
        while let Some(pos) = rest.find('=') {
            if pos > 0 {
                out.push(Word {
                    text: rest[..pos].to_string(),
                    line: word.line,
                });
            }
            out.push(Word {
                text: "=".to_string(),
                line: word.line,
            });
            rest = &rest[pos + 1..];
        }
        if !rest.is_empty() {
            out.push(Word {
                text: rest.to_string(),
                line: word.line,
            });
        }
    }

    out
}

/// Whether a word starts a keyword: a letter, or `*` then a letter.
pub(crate) fn starts_keyword(text: &str) -> bool {
    let body = text.strip_prefix('*').unwrap_or(text);
    body.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}
