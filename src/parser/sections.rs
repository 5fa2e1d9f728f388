//! Section classification.
//!
//! A deck is positional: the title card, then cell cards up to the first
//! blank line, surface cards up to the second, and data cards up to the end
//! or a third blank line. Anything after the third blank line is ignored.

use tracing::debug;

use crate::error::DeckError;

use super::lexer::{LogicalCard, Record};

/// The cards of a deck, split by section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    pub title: String,
    pub cells: Vec<LogicalCard>,
    pub surfaces: Vec<LogicalCard>,
    pub data: Vec<LogicalCard>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Section {
    Title,
    Cells,
    Surfaces,
    Data,
    Trailing,
}

impl Section {
    fn next(self) -> Self {
        match self {
            Section::Title => Section::Cells,
            Section::Cells => Section::Surfaces,
            Section::Surfaces => Section::Data,
            Section::Data | Section::Trailing => Section::Trailing,
        }
    }
}

fn structure(message: &str, help: &str) -> DeckError {
    DeckError::DeckStructure {
        message: message.to_string(),
        help: Some(help.to_string()),
    }
}

/// Partition a record stream into sections.
///
/// Every structural problem is reported, not just the first.
pub fn classify(records: impl IntoIterator<Item = Record>) -> Result<Sections, Vec<DeckError>> {
    let mut sections = Sections::default();
    let mut current = Section::Title;
    let mut delimiters = 0;
    let mut ignored = 0;

    for record in records {
        match record {
            Record::Blank { line } => {
                if current == Section::Title {
                    continue;
                }
                if current < Section::Trailing {
                    delimiters += 1;
                    if current == Section::Data {
                        debug!(line, "deck terminator");
                    }
                }
                current = current.next();
            }
            Record::Card(card) => match current {
                Section::Title => {
                    sections.title = card.text();
                    current = Section::Cells;
                }
                Section::Cells => sections.cells.push(card),
                Section::Surfaces => sections.surfaces.push(card),
                Section::Data => sections.data.push(card),
                Section::Trailing => ignored += 1,
            },
        }
    }

    if ignored > 0 {
        debug!(cards = ignored, "ignoring cards after the deck terminator");
    }

    let mut errors = Vec::new();

    if current == Section::Title {
        errors.push(structure(
            "deck has no title card",
            "the first non-blank line of a deck is its title",
        ));
        return Err(errors);
    }

    if sections.cells.is_empty() {
        errors.push(structure(
            "cell section is empty",
            "add at least one cell card after the title",
        ));
    }
    if delimiters >= 1 && sections.surfaces.is_empty() {
        errors.push(structure(
            "surface section is empty",
            "add at least one surface card after the first blank line",
        ));
    }
    if delimiters < 2 {
        errors.push(DeckError::DeckStructure {
            message: format!("expected 2 blank-line section delimiters, found {}", delimiters),
            help: Some(
                "end the cell cards and the surface cards with a blank line each".to_string(),
            ),
        });
    }

    if errors.is_empty() {
        debug!(
            cells = sections.cells.len(),
            surfaces = sections.surfaces.len(),
            data = sections.data.len(),
            "classified deck sections"
        );
        Ok(sections)
    } else {
        Err(errors)
    }
}
