//! Keyword registry for setting cards.
//!
//! The vocabulary of data-card keywords is open: decks in the wild use many
//! more than any fixed list knows about. The registry holds the shapes of the
//! keywords this crate can check, keyed by stem (`tr` for `tr1`, `f` for
//! `f4:n`), and can be extended or overridden from configuration.
//!
//! # Example
//!
//! ```ignore
//! use mcdeck::registry::{ArgKind, KeywordRegistry, KeywordShape};
//!
//! let mut registry = KeywordRegistry::builtin();
//! registry.insert(KeywordShape::new("dawwg").arg_count(1, None).args(ArgKind::Text));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Setting, SettingValue};

/// Whether part of a keyword (card number or particle designator) may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Presence {
    Forbidden,
    Optional,
    Required,
}

/// What arguments a keyword takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArgKind {
    /// Numbers, or repeat shorthands such as `2r`, `3i` and `j`.
    Number,
    /// Any words.
    Text,
    #[default]
    Any,
}

/// The declared shape of one setting keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KeywordShape {
    /// Keyword stem, lower-case.
    pub name: String,
    #[serde(default = "forbidden")]
    pub number: Presence,
    #[serde(default = "forbidden")]
    pub particles: Presence,
    #[serde(default)]
    pub min_args: usize,
    #[serde(default)]
    pub max_args: Option<usize>,
    #[serde(default)]
    pub args: ArgKind,
    /// At most one card with this exact keyword per deck.
    #[serde(default)]
    pub unique: bool,
}

fn forbidden() -> Presence {
    Presence::Forbidden
}

impl KeywordShape {
    /// A keyword with no card number or designator and any arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            number: Presence::Forbidden,
            particles: Presence::Forbidden,
            min_args: 0,
            max_args: None,
            args: ArgKind::Any,
            unique: false,
        }
    }

    pub fn number(mut self, presence: Presence) -> Self {
        self.number = presence;
        self
    }

    pub fn particles(mut self, presence: Presence) -> Self {
        self.particles = presence;
        self
    }

    pub fn arg_count(mut self, min: usize, max: Option<usize>) -> Self {
        self.min_args = min;
        self.max_args = max;
        self
    }

    pub fn args(mut self, kind: ArgKind) -> Self {
        self.args = kind;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Describe every way `setting` departs from this shape.
    pub fn mismatches(&self, setting: &Setting) -> Vec<String> {
        let parts = setting.parts();
        let mut problems = Vec::new();

        match (self.number, parts.number) {
            (Presence::Required, None) => {
                problems.push(format!("'{}' needs a card number", self.name))
            }
            (Presence::Forbidden, Some(n)) => {
                problems.push(format!("'{}' takes no card number, found {}", self.name, n))
            }
            _ => {}
        }

        match (self.particles, parts.particles) {
            (Presence::Required, None) => problems.push(format!(
                "'{}' needs a particle designator such as ':n'",
                self.name
            )),
            (Presence::Forbidden, Some(p)) => problems.push(format!(
                "'{}' takes no particle designator, found ':{}'",
                self.name, p
            )),
            _ => {}
        }

        let count = setting.args.len();
        if count < self.min_args {
            problems.push(format!(
                "'{}' needs at least {} argument(s), found {}",
                setting.keyword, self.min_args, count
            ));
        }
        if let Some(max) = self.max_args.filter(|&max| count > max) {
            problems.push(format!(
                "'{}' takes at most {} argument(s), found {}",
                setting.keyword, max, count
            ));
        }

        if self.args == ArgKind::Number {
            let bad = setting.args.iter().find_map(|arg| match arg {
                SettingValue::Text(text) if !is_repeat_shorthand(text) => Some(text),
                _ => None,
            });
            if let Some(text) = bad {
                problems.push(format!(
                    "'{}' takes numeric arguments, found '{}'",
                    setting.keyword, text
                ));
            }
        }

        problems
    }
}

/// `j`, `2j`, `3r`, `4i`, `2ilog`, `2log`, `0.5m` and the like.
fn is_repeat_shorthand(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    let suffix = lower.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.');
    matches!(suffix, "j" | "r" | "i" | "m" | "ilog" | "log")
}

/// The set of setting keywords this crate can check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordRegistry {
    shapes: BTreeMap<String, KeywordShape>,
}

impl KeywordRegistry {
    /// An empty registry: every keyword is unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table of common keywords.
    pub fn builtin() -> Self {
        use ArgKind::{Number, Text};
        use Presence::{Optional, Required};

        let shapes = [
            // problem control
            KeywordShape::new("mode").arg_count(1, None).args(Text).unique(),
            KeywordShape::new("nps").arg_count(1, Some(2)).args(Number).unique(),
            KeywordShape::new("ctme").arg_count(1, Some(1)).args(Number).unique(),
            KeywordShape::new("print").unique(),
            KeywordShape::new("prdmp").arg_count(0, Some(5)).args(Number).unique(),
            KeywordShape::new("rand").args(Text).unique(),
            KeywordShape::new("dbcn").args(Number).unique(),
            KeywordShape::new("lost").arg_count(0, Some(2)).args(Number).unique(),
            KeywordShape::new("void").unique(),
            // criticality and sources
            KeywordShape::new("kcode").arg_count(0, Some(8)).args(Number).unique(),
            KeywordShape::new("ksrc").arg_count(3, None).args(Number).unique(),
            KeywordShape::new("sdef").unique(),
            KeywordShape::new("si").number(Required).arg_count(1, None),
            KeywordShape::new("sp").number(Required).arg_count(1, None),
            KeywordShape::new("sb").number(Required).arg_count(1, None),
            KeywordShape::new("ds").number(Required).arg_count(1, None),
            // geometry
            KeywordShape::new("tr").number(Required).arg_count(3, Some(13)).args(Number),
            KeywordShape::new("vol").arg_count(1, None),
            KeywordShape::new("area").arg_count(1, None).args(Number),
            KeywordShape::new("u").arg_count(1, None).args(Number),
            KeywordShape::new("lat").arg_count(1, None).args(Number),
            KeywordShape::new("fill").arg_count(1, None),
            // tallies
            KeywordShape::new("f").number(Required).particles(Optional).arg_count(1, None),
            KeywordShape::new("e").number(Required).arg_count(1, None),
            KeywordShape::new("fm").number(Required).arg_count(1, None),
            KeywordShape::new("fc").number(Required),
            // variance reduction and physics
            KeywordShape::new("imp").particles(Required).arg_count(1, None).args(Number),
            KeywordShape::new("pwt").arg_count(1, None).args(Number),
            KeywordShape::new("phys").particles(Required),
            KeywordShape::new("cut").particles(Required).arg_count(1, Some(5)).args(Number),
            KeywordShape::new("tmp").number(Optional).arg_count(1, None).args(Number),
            KeywordShape::new("thtme").arg_count(1, None).args(Number).unique(),
            KeywordShape::new("totnu").arg_count(0, Some(1)).args(Text).unique(),
            KeywordShape::new("nonu").args(Number),
            // materials
            KeywordShape::new("m").number(Required).args(Text),
            KeywordShape::new("mt").number(Required).arg_count(1, None).args(Text),
        ];

        let mut registry = Self::new();
        for shape in shapes {
            registry.insert(shape);
        }
        registry
    }

    /// Add a shape, replacing any existing shape with the same name.
    pub fn insert(&mut self, shape: KeywordShape) -> Option<KeywordShape> {
        self.shapes.insert(shape.name.clone(), shape)
    }

    pub fn extend(&mut self, shapes: impl IntoIterator<Item = KeywordShape>) {
        for shape in shapes {
            self.insert(shape);
        }
    }

    /// Shape by stem.
    pub fn get(&self, name: &str) -> Option<&KeywordShape> {
        self.shapes.get(&name.to_ascii_lowercase())
    }

    /// Shape for a setting, found by its keyword stem.
    pub fn lookup(&self, setting: &Setting) -> Option<&KeywordShape> {
        self.get(setting.stem())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Shapes in name order.
    pub fn iter(&self) -> impl Iterator<Item = &KeywordShape> {
        self.shapes.values()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
