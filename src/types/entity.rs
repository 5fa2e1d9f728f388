//! Entity kinds and references.
//!
//! Entities are identified by their kind and numeric id, so a cell and a
//! surface may share a number (cell 1 bounded by surface 1 is the norm).

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of deck entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Cell,
    Surface,
    Material,
    Setting,
}

impl EntityKind {
    /// Get the short name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Cell => "cell",
            EntityKind::Surface => "surface",
            EntityKind::Material => "material",
            EntityKind::Setting => "setting",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A reference to one entity of a deck.
///
/// Settings carry no id of their own; they are addressed by their 1-based
/// position in the settings list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: u32,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: u32) -> Self {
        Self { kind, id }
    }

    pub fn cell(id: u32) -> Self {
        Self::new(EntityKind::Cell, id)
    }

    pub fn surface(id: u32) -> Self {
        Self::new(EntityKind::Surface, id)
    }

    pub fn material(id: u32) -> Self {
        Self::new(EntityKind::Material, id)
    }

    /// Reference a setting by its 1-based position.
    pub fn setting(position: u32) -> Self {
        Self::new(EntityKind::Setting, position)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EntityKind::Setting => write!(f, "setting #{}", self.id),
            kind => write!(f, "{} {}", kind, self.id),
        }
    }
}

/// Largest id that fits an eight-digit card field.
pub const MAX_ID: u32 = 99_999_999;

/// An entity stored in an id-keyed collection.
pub trait Identified {
    /// Kind reported in duplicate-id errors and diagnostics.
    const KIND: EntityKind;

    fn id(&self) -> u32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ref_display() {
        assert_eq!(EntityRef::cell(10).to_string(), "cell 10");
        assert_eq!(EntityRef::surface(3).to_string(), "surface 3");
        assert_eq!(EntityRef::setting(2).to_string(), "setting #2");
    }

    #[test]
    fn test_refs_distinguish_kinds() {
        assert_ne!(EntityRef::cell(1), EntityRef::surface(1));
        assert_eq!(EntityRef::material(4), EntityRef::new(EntityKind::Material, 4));
    }
}
