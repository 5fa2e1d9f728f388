//! Cell cards.
//!
//! ```text
//! 1 1 -0.5 -1 imp:n=1     cell 1, material 1 at 0.5 g/cc, inside surface 1
//! 2 0 1 imp:n=0           void cell outside surface 1
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entity::{EntityKind, Identified};
use super::real::Real;
use super::region::Region;

/// What fills a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellMaterial {
    /// Material number 0.
    Void,
    /// A material and its density. Negative densities are g/cm3, positive
    /// are atoms/b-cm; the sign is kept as written.
    Filled { id: u32, density: Real },
}

/// A keyword parameter value: a number, or anything else kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamValue {
    Number(Real),
    Symbol(String),
}

impl ParamValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(r) => Some(r.value()),
            ParamValue::Symbol(_) => None,
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(Real(value))
    }
}

/// Keyword parameters of a cell (`imp:n=1`, `u=2`, `vol=10.5`).
///
/// Keys are lower-case and include any particle designator (`imp:n,p`).
/// Iteration is in key order, which is also the order they serialize in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellParams(BTreeMap<String, Vec<ParamValue>>);

impl CellParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value. Returns the old value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        values: Vec<ParamValue>,
    ) -> Option<Vec<ParamValue>> {
        self.0.insert(name.into().to_ascii_lowercase(), values)
    }

    pub fn get(&self, name: &str) -> Option<&[ParamValue]> {
        self.0.get(&name.to_ascii_lowercase()).map(|v| v.as_slice())
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<ParamValue>> {
        self.0.remove(&name.to_ascii_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(&name.to_ascii_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ParamValue])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A cell definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Cell number (unique among cells).
    pub id: u32,
    pub material: CellMaterial,
    pub geometry: Region,
    #[serde(default)]
    pub params: CellParams,
}

impl Cell {
    /// Create a cell filled with material `material` at `density`.
    pub fn new(id: u32, material: u32, density: f64, geometry: Region) -> Self {
        let material = if material == 0 {
            CellMaterial::Void
        } else {
            CellMaterial::Filled {
                id: material,
                density: Real(density),
            }
        };
        Self {
            id,
            material,
            geometry,
            params: CellParams::new(),
        }
    }

    /// Create a void cell.
    pub fn void(id: u32, geometry: Region) -> Self {
        Self {
            id,
            material: CellMaterial::Void,
            geometry,
            params: CellParams::new(),
        }
    }

    /// Add a single-valued parameter.
    pub fn with_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name, vec![value.into()]);
        self
    }

    /// Material number, 0 for void.
    pub fn material_id(&self) -> u32 {
        match self.material {
            CellMaterial::Void => 0,
            CellMaterial::Filled { id, .. } => id,
        }
    }

    pub fn density(&self) -> Option<Real> {
        match self.material {
            CellMaterial::Void => None,
            CellMaterial::Filled { density, .. } => Some(density),
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self.material, CellMaterial::Void)
    }

    /// Importance for one particle type, looking through combined
    /// designators such as `imp:n,p`.
    pub fn importance(&self, particle: &str) -> Option<f64> {
        self.params.iter().find_map(|(name, values)| {
            let designators = name.strip_prefix("imp:")?;
            designators
                .split(',')
                .any(|p| p.eq_ignore_ascii_case(particle))
                .then(|| values.first().and_then(ParamValue::as_number))
                .flatten()
        })
    }
}

impl Identified for Cell {
    const KIND: EntityKind = EntityKind::Cell;

    fn id(&self) -> u32 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_with_material() {
        let cell = Cell::new(1, 1, -0.5, Region::positive(1)).with_param("imp:n", 1.0);

        assert_eq!(cell.material_id(), 1);
        assert_eq!(cell.density(), Some(Real(-0.5)));
        assert_eq!(cell.importance("n"), Some(1.0));
        assert!(!cell.is_void());
    }

    #[test]
    fn test_material_zero_is_void() {
        let cell = Cell::new(2, 0, 1.0, Region::negative(1));
        assert!(cell.is_void());
        assert_eq!(cell.density(), None);
    }

    #[test]
    fn test_importance_with_combined_designators() {
        let mut cell = Cell::void(3, Region::positive(1));
        cell.params.insert("IMP:N,P", vec![ParamValue::from(2.0)]);

        assert_eq!(cell.importance("p"), Some(2.0));
        assert_eq!(cell.importance("e"), None);
        assert!(cell.params.contains("imp:n,p"));
    }

    #[test]
    fn test_params_iterate_in_key_order() {
        let mut params = CellParams::new();
        params.insert("vol", vec![ParamValue::from(3.0)]);
        params.insert("imp:n", vec![ParamValue::from(1.0)]);

        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["imp:n", "vol"]);
    }
}
