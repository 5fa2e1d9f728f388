//! Run-control and physics data cards.
//!
//! Every data card that is not a material is a setting: a mnemonic followed
//! by arguments. The mnemonic may carry a `*` prefix, a card number and a
//! particle designator, e.g. `*tr2`, `f4:n`, `imp:n,p`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::real::Real;

/// A setting argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingValue {
    Number(Real),
    Text(String),
}

impl SettingValue {
    pub fn is_number(&self) -> bool {
        matches!(self, SettingValue::Number(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            SettingValue::Number(r) => Some(r.value()),
            SettingValue::Text(_) => None,
        }
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Number(Real(value))
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

/// The pieces of a setting mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordParts<'a> {
    /// `*` prefix.
    pub starred: bool,
    /// Alphabetic stem, used for registry lookups (`tr`, `f`, `kcode`).
    pub stem: &'a str,
    /// Card number suffix (`4` in `f4:n`).
    pub number: Option<u32>,
    /// Particle designator after `:` (`n,p`).
    pub particles: Option<&'a str>,
}

impl<'a> KeywordParts<'a> {
    /// Split a mnemonic into its parts. A suffix too large for `u32` is left
    /// on the stem so the registry lookup fails loudly instead.
    pub fn of(keyword: &'a str) -> Self {
        let (starred, rest) = match keyword.strip_prefix('*') {
            Some(rest) => (true, rest),
            None => (false, keyword),
        };
        let (head, particles) = match rest.split_once(':') {
            Some((head, particles)) => (head, Some(particles)),
            None => (rest, None),
        };

        let digits = head.bytes().rev().take_while(|b| b.is_ascii_digit()).count();
        let split = head.len() - digits;
        let (stem, number) = if digits > 0 && split > 0 {
            match head[split..].parse() {
                Ok(n) => (&head[..split], Some(n)),
                Err(_) => (head, None),
            }
        } else {
            (head, None)
        };

        Self {
            starred,
            stem,
            number,
            particles,
        }
    }
}

/// A data card other than a material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    /// Lower-case mnemonic as written, e.g. `kcode`, `tr1`, `f4:n`.
    pub keyword: String,
    pub args: Vec<SettingValue>,
}

impl Setting {
    pub fn new(keyword: impl Into<String>, args: Vec<SettingValue>) -> Self {
        Self {
            keyword: keyword.into().to_ascii_lowercase(),
            args,
        }
    }

    pub fn parts(&self) -> KeywordParts<'_> {
        KeywordParts::of(&self.keyword)
    }

    pub fn stem(&self) -> &str {
        self.parts().stem
    }

    /// Transformation number if this is a `trN` card.
    pub fn transform_number(&self) -> Option<u32> {
        let parts = self.parts();
        if parts.stem == "tr" {
            parts.number
        } else {
            None
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_parts_simple() {
        let parts = KeywordParts::of("kcode");
        assert_eq!(parts.stem, "kcode");
        assert_eq!(parts.number, None);
        assert_eq!(parts.particles, None);
        assert!(!parts.starred);
    }

    #[test]
    fn test_keyword_parts_full() {
        let parts = KeywordParts::of("*f14:n,p");
        assert!(parts.starred);
        assert_eq!(parts.stem, "f");
        assert_eq!(parts.number, Some(14));
        assert_eq!(parts.particles, Some("n,p"));
    }

    #[test]
    fn test_keyword_parts_particles_only() {
        let parts = KeywordParts::of("imp:n");
        assert_eq!(parts.stem, "imp");
        assert_eq!(parts.number, None);
        assert_eq!(parts.particles, Some("n"));
    }

    #[test]
    fn test_transform_number() {
        assert_eq!(Setting::new("TR3", vec![]).transform_number(), Some(3));
        assert_eq!(Setting::new("mt3", vec![]).transform_number(), None);
        assert_eq!(Setting::new("TR3", vec![]).keyword, "tr3");
    }
}
