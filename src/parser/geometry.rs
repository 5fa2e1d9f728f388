//! Cell geometry expressions.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! union   := inter (':' inter)*
//! inter   := unary+
//! unary   := '#' (int | '(' union ')') | primary
//! primary := signed-int ['.' facet] | '(' union ')'
//! ```
//!
//! Parentheses only group; they return the inner expression as is.

use crate::error::DeckError;
use crate::types::{EntityKind, Halfspace, Region, Sense};

use super::lexer::Word;
use super::number::{parse_id, parse_unsigned};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Open,
    Close,
    Hash,
    Colon,
    Atom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    kind: TokenKind,
    text: String,
    line: usize,
}

/// Split words into geometry tokens. Operators need no surrounding blanks,
/// so `-1:(2` is four tokens.
fn tokenize(words: &[Word]) -> Vec<Token> {
    let mut tokens = Vec::new();

    for word in words {
        let mut atom = String::new();
        for ch in word.text.chars() {
            let kind = match ch {
                '(' => TokenKind::Open,
                ')' => TokenKind::Close,
                '#' => TokenKind::Hash,
                ':' => TokenKind::Colon,
                _ => {
                    atom.push(ch);
                    continue;
                }
            };
            if !atom.is_empty() {
                tokens.push(Token {
                    kind: TokenKind::Atom,
                    text: std::mem::take(&mut atom),
                    line: word.line,
                });
            }
            tokens.push(Token {
                kind,
                text: ch.to_string(),
                line: word.line,
            });
        }
        if !atom.is_empty() {
            tokens.push(Token {
                kind: TokenKind::Atom,
                text: atom,
                line: word.line,
            });
        }
    }

    tokens
}

struct GeometryParser {
    tokens: Vec<Token>,
    pos: usize,
    /// Line reported when the expression ends early.
    end_line: usize,
}

impl GeometryParser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn error_at(&self, token: &Token, message: impl Into<String>) -> DeckError {
        DeckError::CardParse {
            kind: EntityKind::Cell,
            line: token.line,
            token: token.text.clone(),
            message: message.into(),
        }
    }

    fn error_at_end(&self, message: impl Into<String>) -> DeckError {
        DeckError::CardParse {
            kind: EntityKind::Cell,
            line: self.end_line,
            token: String::new(),
            message: message.into(),
        }
    }

    fn union(&mut self) -> Result<Region, DeckError> {
        let mut terms = vec![self.intersection()?];
        while self.peek().is_some_and(|t| t.kind == TokenKind::Colon) {
            self.advance();
            terms.push(self.intersection()?);
        }
        Ok(collapse(terms, Region::Union))
    }

    fn intersection(&mut self) -> Result<Region, DeckError> {
        let mut factors = vec![self.unary()?];
        while self
            .peek()
            .is_some_and(|t| matches!(t.kind, TokenKind::Atom | TokenKind::Hash | TokenKind::Open))
        {
            factors.push(self.unary()?);
        }
        Ok(collapse(factors, Region::Intersection))
    }

    fn unary(&mut self) -> Result<Region, DeckError> {
        if !self.peek().is_some_and(|t| t.kind == TokenKind::Hash) {
            return self.primary();
        }
        self.advance();

        match self.advance() {
            Some(token) if token.kind == TokenKind::Open => {
                let inner = self.group_body()?;
                Ok(Region::Complement(Box::new(inner)))
            }
            Some(token) if token.kind == TokenKind::Atom => parse_id(&token.text)
                .map(Region::CellComplement)
                .ok_or_else(|| self.error_at(&token, "'#' must be followed by a cell number or '('")),
            Some(token) => Err(self.error_at(&token, "'#' must be followed by a cell number or '('")),
            None => Err(self.error_at_end("geometry ends after '#'")),
        }
    }

    fn primary(&mut self) -> Result<Region, DeckError> {
        let Some(token) = self.advance() else {
            return Err(self.error_at_end("geometry ends where a surface was expected"));
        };

        match token.kind {
            TokenKind::Open => self.group_body(),
            TokenKind::Atom => parse_halfspace(&token.text)
                .map(Region::Halfspace)
                .ok_or_else(|| self.error_at(&token, "expected a signed surface number")),
            TokenKind::Close => Err(self.error_at(&token, "unbalanced ')'")),
            TokenKind::Colon => Err(self.error_at(&token, "':' needs an expression on both sides")),
            TokenKind::Hash => Err(self.error_at(&token, "unexpected '#'")),
        }
    }

    /// The rest of a parenthesized group, after its `(`.
    fn group_body(&mut self) -> Result<Region, DeckError> {
        let inner = self.union()?;
        match self.advance() {
            Some(token) if token.kind == TokenKind::Close => Ok(inner),
            Some(token) => Err(self.error_at(&token, "expected ')'")),
            None => Err(self.error_at_end("missing ')'")),
        }
    }
}

fn collapse(mut items: Vec<Region>, build: fn(Vec<Region>) -> Region) -> Region {
    if items.len() == 1 {
        items.remove(0)
    } else {
        build(items)
    }
}

/// `-3`, `+3`, `3` or a macrobody facet such as `-3.2`.
fn parse_halfspace(text: &str) -> Option<Halfspace> {
    let (sense, rest) = match text.as_bytes().first()? {
        b'-' => (Sense::Negative, &text[1..]),
        b'+' => (Sense::Positive, &text[1..]),
        _ => (Sense::Positive, text),
    };
    let (surface, facet) = match rest.split_once('.') {
        Some((surface, facet)) => {
            let facet = parse_unsigned(facet).filter(|&f| f > 0)?;
            (surface, Some(u8::try_from(facet).ok()?))
        }
        None => (rest, None),
    };

    Some(Halfspace {
        sense,
        surface: parse_id(surface)?,
        facet,
    })
}

/// Parse the geometry words of a cell card into a region.
pub fn parse_geometry(words: &[Word]) -> Result<Region, DeckError> {
    let end_line = words.last().map_or(0, |w| w.line);
    let mut parser = GeometryParser {
        tokens: tokenize(words),
        pos: 0,
        end_line,
    };

    if parser.tokens.is_empty() {
        return Err(parser.error_at_end("cell has no geometry"));
    }

    let region = parser.union()?;
    match parser.advance() {
        None => Ok(region),
        Some(token) if token.kind == TokenKind::Close => Err(parser.error_at(&token, "unbalanced ')'")),
        Some(token) => Err(parser.error_at(&token, "unexpected token in geometry")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<Word> {
        text.split_whitespace()
            .map(|w| Word {
                text: w.to_string(),
                line: 1,
            })
            .collect()
    }

    fn parse(text: &str) -> Result<Region, DeckError> {
        parse_geometry(&words(text))
    }

    #[test]
    fn test_single_halfspace() {
        assert_eq!(parse("1").unwrap(), Region::positive(1));
        assert_eq!(parse("-1").unwrap(), Region::negative(1));
        assert_eq!(parse("+7").unwrap(), Region::positive(7));
    }

    #[test]
    fn test_implicit_intersection() {
        assert_eq!(
            parse("-1 2 -3").unwrap(),
            Region::negative(1) & Region::positive(2) & Region::negative(3)
        );
    }

    #[test]
    fn test_union_binds_looser_than_intersection() {
        let expected = (Region::negative(1) & Region::positive(2)) | Region::negative(3);
        assert_eq!(parse("-1 2 : -3").unwrap(), expected);
        assert_eq!(parse("-1 2:-3").unwrap(), expected);
    }

    #[test]
    fn test_parentheses_group() {
        let expected = Region::Intersection(vec![
            Region::negative(1) | Region::positive(2),
            Region::negative(3),
        ]);
        assert_eq!(parse("(-1:2) -3").unwrap(), expected);
        assert_eq!(parse("(-1 : 2)-3").unwrap(), expected);
    }

    #[test]
    fn test_redundant_parentheses_vanish() {
        assert_eq!(parse("((-1))").unwrap(), Region::negative(1));
    }

    #[test]
    fn test_complements() {
        assert_eq!(
            parse("-1 #2").unwrap(),
            Region::negative(1) & Region::CellComplement(2)
        );
        assert_eq!(
            parse("#(-1 2)").unwrap(),
            Region::Complement(Box::new(Region::negative(1) & Region::positive(2)))
        );
    }

    #[test]
    fn test_macrobody_facet() {
        assert_eq!(parse("-3.2").unwrap(), Region::facet(Sense::Negative, 3, 2));
    }

    #[test]
    fn test_errors_name_the_token() {
        let cases = [
            ("-1 )", ")"),
            ("-1 : : 2", ":"),
            ("-1 x", "x"),
            ("#-2", "-2"),
            ("-0", "-0"),
        ];
        for (text, token) in cases {
            match parse(text) {
                Err(DeckError::CardParse { token: t, .. }) => assert_eq!(t, token, "{text}"),
                other => panic!("{text}: expected error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_unterminated_group() {
        let err = parse("(-1 2").unwrap_err();
        assert!(err.to_string().contains("missing ')'"));
    }

    #[test]
    fn test_empty_geometry() {
        assert!(parse("").is_err());
    }
}
