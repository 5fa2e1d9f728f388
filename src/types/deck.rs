//! The deck aggregate.
//!
//! A `Deck` owns its surfaces, cells and data outright. Entities point at
//! each other by number only, so a deck is a plain tree of values: cloning it
//! yields an independent copy and comparing two decks compares values.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DeckError, Result};

use super::cell::Cell;
use super::entity::Identified;
use super::material::Material;
use super::setting::Setting;
use super::surface::Surface;

/// An ordered collection of entities with unique ids.
///
/// Order is insertion (card) order. Uniqueness is checked on insert; the
/// `_mut` accessors hand out entities whose id the caller could change, which
/// the validator re-checks. Deserializing goes through `insert`, so a
/// document with a repeated id is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<'de, T> Deserialize<'de> for Collection<T>
where
    T: Identified + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut collection = Collection::new();
        for item in Vec::<T>::deserialize(deserializer)? {
            collection.insert(item).map_err(serde::de::Error::custom)?;
        }
        Ok(collection)
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity. Fails with `DuplicateId` and leaves the collection
    /// untouched if the id is taken.
    pub fn insert(&mut self, item: T) -> Result<()> {
        if self.contains(item.id()) {
            return Err(DeckError::DuplicateId {
                kind: T::KIND,
                id: item.id(),
            });
        }
        self.items.push(item);
        Ok(())
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    /// Remove an entity, keeping the order of the rest.
    pub fn remove(&mut self, id: u32) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Ids in card order.
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.items.iter().map(|item| item.id())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

pub type Cells = Collection<Cell>;
pub type Surfaces = Collection<Surface>;
pub type Materials = Collection<Material>;

/// Settings in card order. Settings carry no id, so duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    items: Vec<Setting>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, setting: Setting) {
        self.items.push(setting);
    }

    /// First setting with exactly this keyword.
    pub fn get(&self, keyword: &str) -> Option<&Setting> {
        self.items
            .iter()
            .find(|s| s.keyword.eq_ignore_ascii_case(keyword))
    }

    /// The `trN` card for transformation `n`.
    pub fn transform(&self, n: u32) -> Option<&Setting> {
        self.items.iter().find(|s| s.transform_number() == Some(n))
    }

    pub fn remove(&mut self, index: usize) -> Option<Setting> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Setting> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Setting> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Settings {
    type Item = &'a Setting;
    type IntoIter = std::slice::Iter<'a, Setting>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// The data section: materials and settings, each in card order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Data {
    pub materials: Materials,
    pub settings: Settings,
}

impl Data {
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty() && self.settings.is_empty()
    }
}

/// One input deck.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Deck {
    /// Title card text.
    pub title: String,
    pub cells: Cells,
    pub surfaces: Surfaces,
    pub data: Data,
}

impl Deck {
    /// Create an empty deck.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn add_cell(&mut self, cell: Cell) -> Result<()> {
        self.cells.insert(cell)
    }

    pub fn add_surface(&mut self, surface: Surface) -> Result<()> {
        self.surfaces.insert(surface)
    }

    pub fn add_material(&mut self, material: Material) -> Result<()> {
        self.data.materials.insert(material)
    }

    pub fn add_setting(&mut self, setting: Setting) {
        self.data.settings.push(setting);
    }

    pub fn cell(&self, id: u32) -> Option<&Cell> {
        self.cells.get(id)
    }

    pub fn cell_mut(&mut self, id: u32) -> Option<&mut Cell> {
        self.cells.get_mut(id)
    }

    pub fn surface(&self, id: u32) -> Option<&Surface> {
        self.surfaces.get(id)
    }

    pub fn surface_mut(&mut self, id: u32) -> Option<&mut Surface> {
        self.surfaces.get_mut(id)
    }

    pub fn material(&self, id: u32) -> Option<&Material> {
        self.data.materials.get(id)
    }

    pub fn material_mut(&mut self, id: u32) -> Option<&mut Material> {
        self.data.materials.get_mut(id)
    }

    pub fn remove_cell(&mut self, id: u32) -> Option<Cell> {
        self.cells.remove(id)
    }

    pub fn remove_surface(&mut self, id: u32) -> Option<Surface> {
        self.surfaces.remove(id)
    }

    pub fn remove_material(&mut self, id: u32) -> Option<Material> {
        self.data.materials.remove(id)
    }

    pub fn materials(&self) -> &Materials {
        &self.data.materials
    }

    pub fn settings(&self) -> &Settings {
        &self.data.settings
    }

    /// Cells whose geometry references `surface`.
    pub fn cells_bounded_by(&self, surface: u32) -> impl Iterator<Item = &Cell> {
        self.cells
            .iter()
            .filter(move |c| c.geometry.surface_ids().contains(&surface))
    }

    /// Fully independent copy with the same ids.
    pub fn deep_copy(&self) -> Deck {
        self.clone()
    }

    /// Title, cells, surfaces, materials and settings equal element by
    /// element, in order.
    pub fn structurally_eq(&self, other: &Deck) -> bool {
        self == other
    }
}
