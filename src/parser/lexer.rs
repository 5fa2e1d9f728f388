//! Card reader.
//!
//! Turns deck text into logical cards. A logical card is a primary line plus
//! its continuation lines; a line continues the previous card when that card
//! ended with `&` or when its first five columns are blank.
//!
//! - `$` starts an inline comment that runs to the end of the line.
//!   A line holding nothing but a `$` comment is dropped like a comment line.
//! - A `c` in columns 1-5 followed by a blank (or nothing) makes the whole
//!   line a comment. Comment lines are dropped, even between a card and its
//!   continuation.
//! - Blank lines are kept as [`Record::Blank`]: sections are positional.
//! - The first non-blank line is the title and is kept verbatim.

use std::collections::VecDeque;
use std::iter::{Enumerate, Peekable};
use std::str::Lines;

use crate::error::DeckError;

/// Default column limit for input lines.
pub const DEFAULT_MAX_COLUMNS: usize = 128;

/// Columns that must be blank for a line to continue the previous card.
const CONTINUATION_INDENT: usize = 5;

const TAB_WIDTH: usize = 8;

/// Reader settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Longest accepted line, in characters (trailing blanks excluded).
    pub max_columns: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            max_columns: DEFAULT_MAX_COLUMNS,
        }
    }
}

/// A whitespace-separated word and the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub line: usize,
}

/// One physical line's contribution to a logical card.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Fragment {
    line: usize,
    text: String,
}

/// A card assembled from one or more physical lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalCard {
    fragments: Vec<Fragment>,
}

impl LogicalCard {
    fn start(line: usize, text: &str) -> Self {
        Self {
            fragments: vec![Fragment {
                line,
                text: text.to_string(),
            }],
        }
    }

    fn push(&mut self, line: usize, text: &str) {
        self.fragments.push(Fragment {
            line,
            text: text.to_string(),
        });
    }

    /// Line number of the primary line.
    pub fn line(&self) -> usize {
        self.fragments.first().map_or(0, |f| f.line)
    }

    /// Last line the card occupies.
    pub fn last_line(&self) -> usize {
        self.fragments.last().map_or(0, |f| f.line)
    }

    /// Card text with continuation lines joined by single spaces.
    pub fn text(&self) -> String {
        let parts: Vec<&str> = self
            .fragments
            .iter()
            .map(|f| f.text.trim())
            .filter(|t| !t.is_empty())
            .collect();
        parts.join(" ")
    }

    /// Words of the card, each tagged with its physical line.
    pub fn words(&self) -> Vec<Word> {
        self.fragments
            .iter()
            .flat_map(|f| {
                f.text.split_whitespace().map(move |w| Word {
                    text: w.to_string(),
                    line: f.line,
                })
            })
            .collect()
    }

    /// First word, if any.
    pub fn first_word(&self) -> Option<&str> {
        self.fragments
            .iter()
            .flat_map(|f| f.text.split_whitespace())
            .next()
    }
}

/// An item of the card stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Card(LogicalCard),
    /// A blank line: section delimiter.
    Blank { line: usize },
}

/// Lazy reader over the logical cards of a deck.
///
/// The reader never fails outright: malformed lines are yielded as errors
/// and reading continues, so one pass reports every bad line. Clone the
/// reader to read the rest of the stream twice; create a new one to start
/// over.
#[derive(Debug, Clone)]
pub struct CardReader<'a> {
    lines: Peekable<Enumerate<Lines<'a>>>,
    options: ReaderOptions,
    seen_title: bool,
    /// Errors found inside the card just returned, reported next.
    pending: VecDeque<DeckError>,
}

impl<'a> CardReader<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, ReaderOptions::default())
    }

    pub fn with_options(source: &'a str, options: ReaderOptions) -> Self {
        Self {
            lines: source.lines().enumerate().peekable(),
            options,
            seen_title: false,
            pending: VecDeque::new(),
        }
    }

    fn too_wide(&self, line_no: usize, line: &str) -> Option<DeckError> {
        let width = line.chars().count();
        (width > self.options.max_columns).then(|| DeckError::MalformedCard {
            line: line_no,
            text: line.to_string(),
            reason: format!(
                "line is {} columns wide, limit is {}",
                width, self.options.max_columns
            ),
        })
    }

    /// Pull continuation lines onto `card`.
    fn extend(&mut self, card: &mut LogicalCard, mut continued: bool) {
        while let Some(&(idx, raw)) = self.lines.peek() {
            let line = raw.trim_end();
            if line.is_empty() {
                break;
            }
            if is_comment_line(line) {
                self.lines.next();
                continue;
            }
            if !continued && !is_continuation(line) {
                break;
            }

            self.lines.next();
            if let Some(err) = self.too_wide(idx + 1, line) {
                // Report after the card; its other lines still count.
                self.pending.push_back(err);
                continued = false;
                continue;
            }
            let (text, more) = strip_line(line);
            card.push(idx + 1, text.trim());
            continued = more;
        }
    }
}

impl<'a> Iterator for CardReader<'a> {
    type Item = Result<Record, DeckError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.pending.pop_front() {
            return Some(Err(err));
        }

        loop {
            let (idx, raw) = self.lines.next()?;
            let line_no = idx + 1;
            let line = raw.trim_end();

            if line.is_empty() {
                if !self.seen_title {
                    continue;
                }
                return Some(Ok(Record::Blank { line: line_no }));
            }

            if let Some(err) = self.too_wide(line_no, line) {
                self.seen_title = true;
                return Some(Err(err));
            }

            if !self.seen_title {
                self.seen_title = true;
                return Some(Ok(Record::Card(LogicalCard::start(line_no, line.trim()))));
            }

            if is_comment_line(line) {
                continue;
            }

            let (text, continued) = strip_line(line);
            if text.trim().is_empty() && !continued {
                // nothing but a `$` comment
                continue;
            }

            if is_continuation(line) {
                return Some(Err(DeckError::MalformedCard {
                    line: line_no,
                    text: line.to_string(),
                    reason: "continuation line without a preceding card".to_string(),
                }));
            }
            let mut card = LogicalCard::start(line_no, text.trim());
            self.extend(&mut card, continued);
            return Some(Ok(Record::Card(card)));
        }
    }
}

/// Read the logical cards of `source` with default options.
pub fn read_cards(source: &str) -> CardReader<'_> {
    CardReader::new(source)
}

/// Strip a `$` comment and a trailing `&`. Returns the remaining text and
/// whether the card continues on the next line.
fn strip_line(line: &str) -> (&str, bool) {
    let text = match line.find('$') {
        Some(pos) => &line[..pos],
        None => line,
    };
    let text = text.trim_end();
    match text.strip_suffix('&') {
        Some(rest) => (rest, true),
        None => (text, false),
    }
}

/// Display column of the first non-blank character (0-based).
fn indent_columns(line: &str) -> usize {
    let mut col = 0;
    for ch in line.chars() {
        match ch {
            ' ' => col += 1,
            '\t' => col = (col / TAB_WIDTH + 1) * TAB_WIDTH,
            _ => break,
        }
    }
    col
}

fn is_continuation(line: &str) -> bool {
    indent_columns(line) >= CONTINUATION_INDENT
}

/// `c` within columns 1-5, followed by a blank or end of line.
fn is_comment_line(line: &str) -> bool {
    if indent_columns(line) >= CONTINUATION_INDENT {
        return false;
    }
    let mut chars = line.trim_start().chars();
    matches!(chars.next(), Some('c' | 'C')) && chars.next().map_or(true, char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(source: &str) -> Vec<Record> {
        read_cards(source).map(|r| r.unwrap()).collect()
    }

    fn card_texts(source: &str) -> Vec<String> {
        cards(source)
            .into_iter()
            .map(|r| match r {
                Record::Card(c) => c.text(),
                Record::Blank { .. } => String::new(),
            })
            .collect()
    }

    #[test]
    fn test_title_and_blank_records() {
        let records = cards("my title $ kept\n1 0 -1\n\n1 so 5\n");

        assert_eq!(records.len(), 4);
        assert!(matches!(&records[0], Record::Card(c) if c.text() == "my title $ kept"));
        assert_eq!(records[2], Record::Blank { line: 3 });
    }

    #[test]
    fn test_leading_blank_lines_skipped() {
        let texts = card_texts("\n\ntitle\n1 0 -1\n");
        assert_eq!(texts, vec!["title", "1 0 -1"]);
    }

    #[test]
    fn test_indented_continuation() {
        let texts = card_texts("t\n1 1 -0.5 -1\n     2 -3\n     imp:n=1\n");
        assert_eq!(texts, vec!["t", "1 1 -0.5 -1 2 -3 imp:n=1"]);
    }

    #[test]
    fn test_ampersand_continuation() {
        let texts = card_texts("t\nm1 1001 2 &\n8016 1\nnps 10\n");
        assert_eq!(texts, vec!["t", "m1 1001 2 8016 1", "nps 10"]);
    }

    #[test]
    fn test_comments_are_stripped() {
        let source = "t\nc a comment line\n1 0 -1 $ inline\nC\n   c indented comment\n2 0 1\n";
        let texts = card_texts(source);
        assert_eq!(texts, vec!["t", "1 0 -1", "2 0 1"]);
    }

    #[test]
    fn test_comment_between_card_and_continuation() {
        let texts = card_texts("t\n1 0 -1\nc note\n     imp:n=1\n");
        assert_eq!(texts, vec!["t", "1 0 -1 imp:n=1"]);
    }

    #[test]
    fn test_keyword_starting_with_c_is_not_comment() {
        let texts = card_texts("t\nctme 10\ncut:n 1 0\n");
        assert_eq!(texts, vec!["t", "ctme 10", "cut:n 1 0"]);
    }

    #[test]
    fn test_word_lines() {
        let records = cards("t\n1 0 -1\n     imp:n=1\n");
        let Record::Card(card) = &records[1] else {
            panic!("expected card");
        };

        let words = card.words();
        assert_eq!(words.len(), 4);
        assert_eq!(words[0], Word { text: "1".into(), line: 2 });
        assert_eq!(words[3], Word { text: "imp:n=1".into(), line: 3 });
        assert_eq!(card.last_line(), 3);
    }

    #[test]
    fn test_tab_counts_as_continuation() {
        let texts = card_texts("t\n1 0 -1\n\timp:n=1\n");
        assert_eq!(texts, vec!["t", "1 0 -1 imp:n=1"]);
    }

    #[test]
    fn test_orphan_continuation_is_malformed() {
        let results: Vec<_> = read_cards("t\n1 0 -1\n\n     2 -3\n").collect();

        let err = results
            .iter()
            .find_map(|r| r.as_ref().err())
            .expect("expected an error");
        assert!(matches!(err, DeckError::MalformedCard { line: 4, .. }));
    }

    #[test]
    fn test_overlong_line_is_malformed_and_reading_continues() {
        let long = format!("2 0 {}", "-1 ".repeat(60));
        let source = format!("t\n1 0 -1\n{}\n3 0 1\n", long);
        let options = ReaderOptions { max_columns: 80 };

        let results: Vec<_> = CardReader::with_options(&source, options).collect();

        assert_eq!(results.len(), 4);
        assert!(matches!(results[2], Err(DeckError::MalformedCard { line: 3, .. })));
        assert!(matches!(&results[3], Ok(Record::Card(c)) if c.text() == "3 0 1"));
    }

    #[test]
    fn test_overlong_continuation_reported_after_card() {
        let source = format!("t\n1 0 -1\n     {}\n", "2 ".repeat(70));
        let options = ReaderOptions { max_columns: 80 };

        let results: Vec<_> = CardReader::with_options(&source, options).collect();

        assert!(matches!(&results[1], Ok(Record::Card(c)) if c.text() == "1 0 -1"));
        assert!(matches!(results[2], Err(DeckError::MalformedCard { line: 3, .. })));
    }

    #[test]
    fn test_every_overlong_continuation_reported() {
        let long = format!("     {}", "2 ".repeat(70));
        let source = format!("t\n1 0 -1\n{long}\n{long}\n3 0 1\n");
        let options = ReaderOptions { max_columns: 80 };

        let results: Vec<_> = CardReader::with_options(&source, options).collect();

        let lines: Vec<usize> = results
            .iter()
            .filter_map(|r| match r {
                Err(DeckError::MalformedCard { line, .. }) => Some(*line),
                _ => None,
            })
            .collect();
        assert_eq!(lines, vec![3, 4]);
        assert!(matches!(results.last(), Some(Ok(Record::Card(c))) if c.text() == "3 0 1"));
    }

    #[test]
    fn test_dollar_comment_line_is_skipped() {
        let texts = card_texts("t\n1 0 -1\n$ note in column 1\n   $ indented note\n\n      $ after a blank\n2 0 1\n");
        assert_eq!(texts, vec!["t", "1 0 -1", "", "2 0 1"]);
    }

    #[test]
    fn test_reader_is_restartable() {
        let reader = read_cards("t\n1 0 -1\n");
        let first: Vec<_> = reader.clone().collect();
        let second: Vec<_> = reader.collect();
        assert_eq!(first, second);
    }
}
