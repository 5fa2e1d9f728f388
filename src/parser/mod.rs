//! Deck text parsing.
//!
//! Parsing runs in stages:
//! - `lexer` turns text into logical cards and blank-line delimiters
//! - `sections` splits the card stream into title, cells, surfaces and data
//! - one card parser per entity kind turns a card into a typed entity
//! - `document` drives the stages and collects every error
//!
//! # Usage
//!
//! ```ignore
//! use mcdeck::parser::parse_named;
//!
//! let deck = parse_named(&source, "pincell.i")?;
//! println!("{} cells", deck.cells.len());
//! ```

pub(crate) mod assign;
mod document;
pub mod cell;
pub mod geometry;
pub mod lexer;
pub mod material;
pub mod number;
pub mod sections;
pub mod setting;
pub mod surface;

pub use cell::parse_cell;
pub use document::{parse_deck, parse_named, parse_with};
pub use geometry::parse_geometry;
pub use lexer::{read_cards, CardReader, LogicalCard, ReaderOptions, Record, Word};
pub use material::parse_material;
pub use number::parse_real;
pub use sections::{classify, Sections};
pub use setting::parse_setting;
pub use surface::parse_surface;

use crate::error::DeckError;
use crate::types::EntityKind;

/// A grammar error at one word of a card.
pub(crate) fn word_error(kind: EntityKind, word: &Word, message: impl Into<String>) -> DeckError {
    DeckError::CardParse {
        kind,
        line: word.line,
        token: word.text.clone(),
        message: message.into(),
    }
}

/// A card that ends before a required field.
pub(crate) fn missing_field(kind: EntityKind, card: &LogicalCard, field: &str) -> DeckError {
    DeckError::CardParse {
        kind,
        line: card.last_line(),
        token: String::new(),
        message: format!("missing {}", field),
    }
}
