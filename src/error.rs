use miette::Diagnostic;
use thiserror::Error;

use crate::types::EntityKind;

/// Main error type for deck operations
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum DeckError {
    #[error("line {line}: malformed card: {reason}")]
    #[diagnostic(code(mcdeck::malformed_card))]
    MalformedCard {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("Deck structure error: {message}")]
    #[diagnostic(code(mcdeck::structure))]
    DeckStructure {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("line {line}: invalid {kind} card at '{token}': {message}")]
    #[diagnostic(code(mcdeck::parse))]
    CardParse {
        kind: EntityKind,
        line: usize,
        token: String,
        message: String,
    },

    #[error("Duplicate {kind} id {id}")]
    #[diagnostic(
        code(mcdeck::duplicate_id),
        help("Ids must be unique among entities of the same kind")
    )]
    DuplicateId { kind: EntityKind, id: u32 },

    #[error("Serialization error: {message}")]
    #[diagnostic(code(mcdeck::serialize))]
    Serialization { message: String },

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(mcdeck::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(mcdeck::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl DeckError {
    /// Line number the error points at, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            DeckError::MalformedCard { line, .. } | DeckError::CardParse { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub(crate) fn serialization(message: impl Into<String>) -> Self {
        DeckError::Serialization {
            message: message.into(),
        }
    }
}

/// Every problem found while turning one document into a deck.
///
/// Parsing keeps going after the first failure wherever it cheaply can, so
/// `errors` is never empty and is ordered the way problems were found.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error(
    "{count} error(s) while parsing {name}",
    count = .errors.len(),
    name = .document.as_deref().unwrap_or("deck")
)]
#[diagnostic(code(mcdeck::parse))]
pub struct ParseErrors {
    /// Document identifier supplied by the caller, if any.
    pub document: Option<String>,
    #[related]
    pub errors: Vec<DeckError>,
}

impl ParseErrors {
    pub fn iter(&self) -> impl Iterator<Item = &DeckError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_parse_message() {
        let err = DeckError::CardParse {
            kind: EntityKind::Surface,
            line: 7,
            token: "qq".to_string(),
            message: "unknown surface mnemonic".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "line 7: invalid surface card at 'qq': unknown surface mnemonic"
        );
        assert_eq!(err.line(), Some(7));
    }

    #[test]
    fn test_parse_errors_summary() {
        let errors = ParseErrors {
            document: Some("pincell.i".to_string()),
            errors: vec![DeckError::DuplicateId {
                kind: EntityKind::Cell,
                id: 3,
            }],
        };

        assert_eq!(errors.to_string(), "1 error(s) while parsing pincell.i");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].line(), None);
    }
}
