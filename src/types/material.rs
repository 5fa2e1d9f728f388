//! Material cards.
//!
//! ```text
//! m1 1001.80c 2 8016.80c 1      water by atom fraction
//! m2 26000 -1.0 nlib=80c        iron by mass fraction
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::{EntityKind, Identified};
use super::real::Real;

/// Highest atomic number accepted in a ZAID.
const MAX_Z: u32 = 118;

/// A nuclide identifier as written on the card (`1001`, `92235.80c`).
///
/// The text is stored verbatim; whether it is a well-formed ZAID is a
/// validation question, not a parsing one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nuclide(String);

impl Nuclide {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric ZAID part, if it is all digits.
    pub fn zaid(&self) -> Option<u32> {
        let zaid = self.0.split('.').next()?;
        if zaid.is_empty() || !zaid.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        zaid.parse().ok()
    }

    /// Library suffix after the dot (`80c`), if present.
    pub fn library(&self) -> Option<&str> {
        self.0.split_once('.').map(|(_, lib)| lib)
    }

    /// Atomic number Z.
    pub fn z(&self) -> Option<u32> {
        self.zaid().map(|zaid| zaid / 1000)
    }

    /// Mass number A (0 for natural elements, offset for metastables).
    pub fn a(&self) -> Option<u32> {
        self.zaid().map(|zaid| zaid % 1000)
    }

    /// Explain why this is not a well-formed `ZZZAAA[.NNx]` identifier.
    pub fn defect(&self) -> Option<String> {
        let zaid_text = self.0.split('.').next().unwrap_or_default();
        if !(4..=6).contains(&zaid_text.len()) {
            return Some(format!(
                "'{}' is not a ZZZAAA identifier (expected 4 to 6 digits)",
                self.0
            ));
        }
        let Some(zaid) = self.zaid() else {
            return Some(format!("'{}' is not a numeric ZAID", self.0));
        };

        let (z, a) = (zaid / 1000, zaid % 1000);
        if z == 0 || z > MAX_Z {
            return Some(format!("'{}' has atomic number {} outside 1..={}", self.0, z, MAX_Z));
        }
        if a != 0 && a < z {
            return Some(format!(
                "'{}' has mass number {} below its atomic number {}",
                self.0, a, z
            ));
        }

        match self.library() {
            Some(lib) if !is_library_suffix(lib) => Some(format!(
                "'{}' has malformed library suffix '.{}' (expected e.g. .80c)",
                self.0, lib
            )),
            _ => None,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.defect().is_none()
    }
}

/// Library suffix: 2 or 3 digits then 1 or 2 letters (`80c`, `710nc`).
fn is_library_suffix(lib: &str) -> bool {
    let digits = lib.bytes().take_while(|b| b.is_ascii_digit()).count();
    let letters = &lib[digits..];
    (2..=3).contains(&digits)
        && (1..=2).contains(&letters.len())
        && letters.bytes().all(|b| b.is_ascii_alphabetic())
}

impl fmt::Display for Nuclide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a fraction is an atom or a mass fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FractionKind {
    Atom,
    Mass,
}

/// One nuclide of a material and its fraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialEntry {
    pub nuclide: Nuclide,
    /// Negative for mass fractions; the sign is kept as written.
    pub fraction: Real,
}

impl MaterialEntry {
    pub fn new(nuclide: impl Into<String>, fraction: f64) -> Self {
        Self {
            nuclide: Nuclide::new(nuclide),
            fraction: Real(fraction),
        }
    }

    pub fn fraction_kind(&self) -> FractionKind {
        if self.fraction.value().is_sign_negative() {
            FractionKind::Mass
        } else {
            FractionKind::Atom
        }
    }
}

/// A material definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    /// Material number (unique among materials).
    pub id: u32,
    pub entries: Vec<MaterialEntry>,
    /// Keyword options in card order (`nlib=80c`).
    #[serde(default)]
    pub options: Vec<(String, String)>,
}

impl Material {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            entries: Vec::new(),
            options: Vec::new(),
        }
    }

    pub fn with_entry(mut self, nuclide: impl Into<String>, fraction: f64) -> Self {
        self.entries.push(MaterialEntry::new(nuclide, fraction));
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options
            .push((key.into().to_ascii_lowercase(), value.into()));
        self
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Identified for Material {
    const KIND: EntityKind = EntityKind::Material;

    fn id(&self) -> u32 {
        self.id
    }
}
