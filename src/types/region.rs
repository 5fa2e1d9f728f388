//! Cell geometry expressions.
//!
//! A cell's region is a boolean combination of halfspaces: `-1` is the
//! inside of surface 1, `2` (or `+2`) the outside of surface 2. Whitespace
//! intersects, `:` unions, `#` complements and parentheses group.

use std::collections::BTreeSet;
use std::ops::{BitAnd, BitOr, Not};

use serde::{Deserialize, Serialize};

/// Which side of a surface a halfspace selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sense {
    Negative,
    Positive,
}

impl Sense {
    pub fn flip(self) -> Self {
        match self {
            Sense::Negative => Sense::Positive,
            Sense::Positive => Sense::Negative,
        }
    }
}

/// One signed surface reference, optionally naming a macrobody facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Halfspace {
    pub sense: Sense,
    pub surface: u32,
    #[serde(default)]
    pub facet: Option<u8>,
}

/// A geometry expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Halfspace(Halfspace),
    Intersection(Vec<Region>),
    Union(Vec<Region>),
    Complement(Box<Region>),
    /// `#n`: everything outside cell `n`.
    CellComplement(u32),
}

impl Region {
    /// Outside of `surface`.
    pub fn positive(surface: u32) -> Self {
        Region::Halfspace(Halfspace {
            sense: Sense::Positive,
            surface,
            facet: None,
        })
    }

    /// Inside of `surface`.
    pub fn negative(surface: u32) -> Self {
        Region::Halfspace(Halfspace {
            sense: Sense::Negative,
            surface,
            facet: None,
        })
    }

    /// Facet `facet` of macrobody `surface`.
    pub fn facet(sense: Sense, surface: u32, facet: u8) -> Self {
        Region::Halfspace(Halfspace {
            sense,
            surface,
            facet: Some(facet),
        })
    }

    /// Visit every halfspace, depth first, left to right.
    pub fn for_each_halfspace<'a>(&'a self, f: &mut impl FnMut(&'a Halfspace)) {
        match self {
            Region::Halfspace(h) => f(h),
            Region::Intersection(items) | Region::Union(items) => {
                items.iter().for_each(|r| r.for_each_halfspace(f))
            }
            Region::Complement(inner) => inner.for_each_halfspace(f),
            Region::CellComplement(_) => {}
        }
    }

    /// Distinct surface ids referenced by this region, ascending.
    pub fn surface_ids(&self) -> BTreeSet<u32> {
        let mut ids = BTreeSet::new();
        self.for_each_halfspace(&mut |h| {
            ids.insert(h.surface);
        });
        ids
    }

    /// Distinct cell ids referenced through `#n`, ascending.
    pub fn complemented_cells(&self) -> BTreeSet<u32> {
        let mut ids = BTreeSet::new();
        self.collect_cells(&mut ids);
        ids
    }

    fn collect_cells(&self, ids: &mut BTreeSet<u32>) {
        match self {
            Region::CellComplement(id) => {
                ids.insert(*id);
            }
            Region::Intersection(items) | Region::Union(items) => {
                items.iter().for_each(|r| r.collect_cells(ids))
            }
            Region::Complement(inner) => inner.collect_cells(ids),
            Region::Halfspace(_) => {}
        }
    }

    /// Rewrite surface and cell references in place.
    pub fn remap(&mut self, surface: &impl Fn(u32) -> u32, cell: &impl Fn(u32) -> u32) {
        match self {
            Region::Halfspace(h) => h.surface = surface(h.surface),
            Region::CellComplement(id) => *id = cell(*id),
            Region::Intersection(items) | Region::Union(items) => {
                items.iter_mut().for_each(|r| r.remap(surface, cell))
            }
            Region::Complement(inner) => inner.remap(surface, cell),
        }
    }
}

impl BitAnd for Region {
    type Output = Region;

    fn bitand(self, rhs: Region) -> Region {
        match self {
            Region::Intersection(mut items) => {
                items.push(rhs);
                Region::Intersection(items)
            }
            lhs => Region::Intersection(vec![lhs, rhs]),
        }
    }
}

impl BitOr for Region {
    type Output = Region;

    fn bitor(self, rhs: Region) -> Region {
        match self {
            Region::Union(mut items) => {
                items.push(rhs);
                Region::Union(items)
            }
            lhs => Region::Union(vec![lhs, rhs]),
        }
    }
}

/// Complement. A bare halfspace flips its sense instead of wrapping.
impl Not for Region {
    type Output = Region;

    fn not(self) -> Region {
        match self {
            Region::Halfspace(h) => Region::Halfspace(Halfspace {
                sense: h.sense.flip(),
                ..h
            }),
            other => Region::Complement(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operators_build_flat_trees() {
        let r = Region::negative(1) & Region::positive(2) & Region::negative(3);
        assert_eq!(
            r,
            Region::Intersection(vec![
                Region::negative(1),
                Region::positive(2),
                Region::negative(3)
            ])
        );

        let u = Region::negative(1) | Region::negative(2);
        assert!(matches!(u, Region::Union(ref items) if items.len() == 2));
    }

    #[test]
    fn test_not_flips_halfspace() {
        assert_eq!(!Region::negative(4), Region::positive(4));
        let group = Region::negative(1) & Region::positive(2);
        assert!(matches!(!group, Region::Complement(_)));
    }

    #[test]
    fn test_surface_ids_are_distinct() {
        let r = (Region::negative(3) & Region::positive(1)) | Region::negative(3);
        assert_eq!(r.surface_ids().into_iter().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_complemented_cells() {
        let r = Region::negative(1) & Region::CellComplement(7);
        assert_eq!(r.complemented_cells().into_iter().collect::<Vec<_>>(), vec![7]);
        assert!(r.surface_ids().contains(&1));
    }

    #[test]
    fn test_remap() {
        let mut r = Region::negative(10) & Region::CellComplement(20);
        r.remap(&|s| s / 10, &|c| c + 1);
        assert_eq!(r, Region::negative(1) & Region::CellComplement(21));
    }
}
