//! Deck serialization.
//!
//! This module turns a deck (or any part of one) back into card text that
//! the parser reads back to an equal deck. Cards longer than the wrap width
//! are continued on lines indented five columns.

pub mod fields;
mod wrap;

use tracing::{debug, instrument};

use crate::error::{DeckError, Result};
use crate::parser::lexer::DEFAULT_MAX_COLUMNS;
use crate::types::{Cell, Data, Deck, Material, Setting, Surface};

/// Column policy used when writing cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Width at which cards are continued on a new line.
    pub wrap_columns: usize,
    /// Longest line that may be written at all.
    pub max_columns: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            wrap_columns: 80,
            max_columns: DEFAULT_MAX_COLUMNS,
        }
    }
}

/// Writes decks and deck fragments as card text.
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    options: FormatOptions,
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Serialize a whole deck: title, cells, surfaces and data, with the
    /// two blank-line delimiters between them.
    #[instrument(skip_all, fields(title = %deck.title))]
    pub fn deck(&self, deck: &Deck) -> Result<String> {
        let mut out = self.title(&deck.title)?;
        out.push_str(&self.cells(deck.cells.iter())?);
        out.push('\n');
        out.push_str(&self.surfaces(deck.surfaces.iter())?);
        out.push('\n');
        out.push_str(&self.data(&deck.data)?);

        debug!(
            cells = deck.cells.len(),
            surfaces = deck.surfaces.len(),
            materials = deck.data.materials.len(),
            settings = deck.data.settings.len(),
            bytes = out.len(),
            "serialized deck"
        );
        Ok(out)
    }

    fn title(&self, title: &str) -> Result<String> {
        if title.trim().is_empty() {
            return Err(DeckError::serialization("deck title is blank"));
        }
        if title.contains(['\n', '\r']) {
            return Err(DeckError::serialization("deck title spans more than one line"));
        }
        if title.chars().count() > self.options.max_columns {
            return Err(DeckError::serialization(format!(
                "deck title is longer than {} columns",
                self.options.max_columns
            )));
        }
        Ok(format!("{}\n", title))
    }

    pub fn cell(&self, cell: &Cell) -> Result<String> {
        self.card(&fields::cell(cell)?)
    }

    pub fn surface(&self, surface: &Surface) -> Result<String> {
        self.card(&fields::surface(surface)?)
    }

    pub fn material(&self, material: &Material) -> Result<String> {
        self.card(&fields::material(material)?)
    }

    pub fn setting(&self, setting: &Setting) -> Result<String> {
        self.card(&fields::setting(setting)?)
    }

    pub fn cells<'a>(&self, cells: impl IntoIterator<Item = &'a Cell>) -> Result<String> {
        self.cards(cells, fields::cell)
    }

    pub fn surfaces<'a>(&self, surfaces: impl IntoIterator<Item = &'a Surface>) -> Result<String> {
        self.cards(surfaces, fields::surface)
    }

    pub fn materials<'a>(
        &self,
        materials: impl IntoIterator<Item = &'a Material>,
    ) -> Result<String> {
        self.cards(materials, fields::material)
    }

    pub fn settings<'a>(&self, settings: impl IntoIterator<Item = &'a Setting>) -> Result<String> {
        self.cards(settings, fields::setting)
    }

    /// The data section: settings first, then materials.
    pub fn data(&self, data: &Data) -> Result<String> {
        let mut out = self.settings(data.settings.iter())?;
        out.push_str(&self.materials(data.materials.iter())?);
        Ok(out)
    }

    fn card(&self, fields: &[String]) -> Result<String> {
        let mut out = String::new();
        wrap::write_card(&mut out, fields, &self.options)?;
        Ok(out)
    }

    fn cards<'a, T: 'a>(
        &self,
        items: impl IntoIterator<Item = &'a T>,
        to_fields: fn(&T) -> Result<Vec<String>>,
    ) -> Result<String> {
        let mut out = String::new();
        for item in items {
            wrap::write_card(&mut out, &to_fields(item)?, &self.options)?;
        }
        Ok(out)
    }
}

/// Serialize a deck with the default column policy.
pub fn serialize(deck: &Deck) -> Result<String> {
    Serializer::new().deck(deck)
}

pub fn serialize_with(deck: &Deck, options: &FormatOptions) -> Result<String> {
    Serializer::with_options(*options).deck(deck)
}

pub fn serialize_cells(deck: &Deck) -> Result<String> {
    Serializer::new().cells(deck.cells.iter())
}

pub fn serialize_surfaces(deck: &Deck) -> Result<String> {
    Serializer::new().surfaces(deck.surfaces.iter())
}

pub fn serialize_materials(deck: &Deck) -> Result<String> {
    Serializer::new().materials(deck.data.materials.iter())
}

pub fn serialize_settings(deck: &Deck) -> Result<String> {
    Serializer::new().settings(deck.data.settings.iter())
}

pub fn serialize_data(deck: &Deck) -> Result<String> {
    Serializer::new().data(&deck.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_deck;
    use crate::types::{Region, SurfaceKind};

    fn scenario() -> Deck {
        let mut deck = Deck::new("title");
        deck.add_cell(Cell::new(1, 1, -0.5, Region::positive(1)).with_param("imp:n", 1.0))
            .unwrap();
        deck.add_surface(Surface::sphere_at_origin(1, 5.0)).unwrap();
        deck.add_material(Material::new(1).with_entry("1001", 1.0)).unwrap();
        deck
    }

    #[test]
    fn test_serialize_scenario() {
        let text = serialize(&scenario()).unwrap();
        insta::assert_snapshot!(text.trim_end(), @r"
title
1 1 -0.5 1 imp:n=1

1 so 5

m1 1001 1
");
    }

    #[test]
    fn test_serialize_empty_data_section() {
        let mut deck = scenario();
        deck.remove_material(1);
        let text = serialize(&deck).unwrap();
        assert!(text.ends_with("1 so 5\n\n"));
    }

    #[test]
    fn test_settings_before_materials() {
        let mut deck = scenario();
        deck.add_setting(Setting::new("nps", vec![1000.0.into()]));
        let data = serialize_data(&deck).unwrap();
        assert_eq!(data, "nps 1000\nm1 1001 1\n");
    }

    #[test]
    fn test_serialize_round_trips() {
        let deck = scenario();
        let text = serialize(&deck).unwrap();
        let back = parse_deck(&text).unwrap();
        assert!(back.structurally_eq(&deck));
        assert_eq!(serialize(&back).unwrap(), text);
    }

    #[test]
    fn test_long_card_wraps_and_reads_back() {
        let mut deck = scenario();
        let coefficients: Vec<f64> = (0..30).map(|i| i as f64 * 1.25).collect();
        deck.add_surface(Surface::new(2, SurfaceKind::ArbitraryPolyhedron, coefficients))
            .unwrap();

        let options = FormatOptions {
            wrap_columns: 20,
            ..FormatOptions::default()
        };
        let text = serialize_with(&deck, &options).unwrap();
        assert!(text.lines().all(|l| l.chars().count() <= 20));
        assert!(text.lines().any(|l| l.starts_with("     ")));
        assert!(parse_deck(&text).unwrap().structurally_eq(&deck));
    }

    #[test]
    fn test_title_must_be_one_line() {
        let mut deck = scenario();
        deck.title = "two\nlines".into();
        assert!(matches!(
            serialize(&deck),
            Err(DeckError::Serialization { .. })
        ));

        deck.title = "   ".into();
        assert!(serialize(&deck).is_err());
    }

    #[test]
    fn test_single_cards() {
        let serializer = Serializer::new();
        assert_eq!(
            serializer.surface(&Surface::sphere_at_origin(3, 2.5)).unwrap(),
            "3 so 2.5\n"
        );
        assert_eq!(
            serializer.setting(&Setting::new("mode", vec!["n".into()])).unwrap(),
            "mode n\n"
        );
    }
}
