//! Deck model types.
//!
//! This module contains the in-memory deck:
//! - `Deck` - title plus cells, surfaces and data
//! - `Cell`, `Surface`, `Material`, `Setting` - one type per card kind
//! - `Region` - cell geometry expressions
//! - `Real` - card numbers with structural equality

mod cell;
mod deck;
mod entity;
mod material;
mod real;
mod region;
mod renumber;
mod setting;
mod surface;

pub use cell::{Cell, CellMaterial, CellParams, ParamValue};
pub use deck::{Cells, Collection, Data, Deck, Materials, Settings, Surfaces};
pub use entity::{EntityKind, EntityRef, Identified, MAX_ID};
pub use material::{FractionKind, Material, MaterialEntry, Nuclide};
pub use real::Real;
pub use region::{Halfspace, Region, Sense};
pub use renumber::Renumbering;
pub use setting::{KeywordParts, Setting, SettingValue};
pub use surface::{Boundary, Surface, SurfaceKind};
