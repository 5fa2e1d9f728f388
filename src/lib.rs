//! mcdeck - MCNP-style input deck toolkit
//!
//! A library for reading card-image input decks into a typed model,
//! checking them for consistency, and writing them back out as text the
//! reader accepts again.

pub mod config;
pub mod error;
pub mod parser;
pub mod registry;
pub mod serializer;
pub mod types;
pub mod validation;

pub use config::DeckConfig;
pub use error::{DeckError, ParseErrors, Result};
pub use parser::{parse_deck, parse_named, parse_with, ReaderOptions};
pub use registry::{ArgKind, KeywordRegistry, KeywordShape, Presence};
pub use serializer::{
    serialize, serialize_cells, serialize_data, serialize_materials, serialize_settings,
    serialize_surfaces, serialize_with, FormatOptions, Serializer,
};
pub use types::{
    Boundary, Cell, CellMaterial, CellParams, Data, Deck, EntityKind, EntityRef, Halfspace,
    Material, MaterialEntry, Nuclide, ParamValue, Real, Region, Renumbering, Sense, Setting,
    SettingValue, Surface, SurfaceKind,
};
pub use validation::{validate_deck, validate_with, CheckKind, Diagnostic, Severity, ValidationResult};

/// Fully independent copy of a deck.
pub fn copy(deck: &Deck) -> Deck {
    deck.deep_copy()
}

/// Structural equality: same title and the same entities in the same order.
pub fn equals(a: &Deck, b: &Deck) -> bool {
    a.structurally_eq(b)
}
