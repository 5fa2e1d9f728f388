//! Sequential renumbering of cells, surfaces and materials.

use std::collections::{BTreeMap, BTreeSet};

use super::cell::CellMaterial;
use super::deck::Deck;
use super::setting::KeywordParts;

/// Old id to new id, per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Renumbering {
    pub cells: BTreeMap<u32, u32>,
    pub surfaces: BTreeMap<u32, u32>,
    pub materials: BTreeMap<u32, u32>,
}

fn sequential(ids: impl Iterator<Item = u32>) -> BTreeMap<u32, u32> {
    ids.zip(1..).collect()
}

/// Give ids that are referenced but not defined numbers past the end of the
/// new sequence, so they stay dangling.
fn extend_dangling(map: &mut BTreeMap<u32, u32>, referenced: BTreeSet<u32>) {
    let mut next = (1..).nth(map.len()).unwrap_or(u32::MAX);
    for id in referenced {
        if !map.contains_key(&id) {
            map.insert(id, next);
            next = next.saturating_add(1);
        }
    }
}

fn mt_material(keyword: &str) -> Option<u32> {
    let parts = KeywordParts::of(keyword);
    (parts.stem == "mt").then_some(parts.number).flatten()
}

impl Deck {
    /// Renumber cells, surfaces and materials 1, 2, 3... in card order and
    /// rewrite every reference to them: cell materials, geometry halfspaces,
    /// `#n` complements and material-numbered settings such as `mt1`.
    ///
    /// References to ids that do not exist are moved past the end of the new
    /// sequence, where they still point at nothing and the validator still
    /// reports them.
    pub fn renumber(&mut self) -> Renumbering {
        let mut map = Renumbering {
            cells: sequential(self.cells.ids()),
            surfaces: sequential(self.surfaces.ids()),
            materials: sequential(self.data.materials.ids()),
        };

        let mut cells = BTreeSet::new();
        let mut surfaces = BTreeSet::new();
        let mut materials = BTreeSet::new();
        for cell in &self.cells {
            cells.extend(cell.geometry.complemented_cells());
            surfaces.extend(cell.geometry.surface_ids());
            if let CellMaterial::Filled { id, .. } = cell.material {
                materials.insert(id);
            }
        }
        materials.extend(self.data.settings.iter().filter_map(|s| mt_material(&s.keyword)));

        extend_dangling(&mut map.cells, cells);
        extend_dangling(&mut map.surfaces, surfaces);
        extend_dangling(&mut map.materials, materials);

        let cell_id = |id: u32| map.cells.get(&id).copied().unwrap_or(id);
        let surface_id = |id: u32| map.surfaces.get(&id).copied().unwrap_or(id);
        let material_id = |id: u32| map.materials.get(&id).copied().unwrap_or(id);

        for cell in self.cells.iter_mut() {
            cell.id = cell_id(cell.id);
            if let CellMaterial::Filled { id, .. } = &mut cell.material {
                *id = material_id(*id);
            }
            cell.geometry.remap(&surface_id, &cell_id);
        }

        for surface in self.surfaces.iter_mut() {
            surface.id = surface_id(surface.id);
        }

        for material in self.data.materials.iter_mut() {
            material.id = material_id(material.id);
        }

        for setting in self.data.settings.iter_mut() {
            let parts = KeywordParts::of(&setting.keyword);
            if parts.stem != "mt" {
                continue;
            }
            if let Some(n) = parts.number {
                let renamed = format!(
                    "{}mt{}{}",
                    if parts.starred { "*" } else { "" },
                    material_id(n),
                    parts.particles.map(|p| format!(":{p}")).unwrap_or_default()
                );
                setting.keyword = renamed;
            }
        }

        map
    }
}
