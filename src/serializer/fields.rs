//! Card fields: each entity rendered as the words its parser reads back.

use crate::error::{DeckError, Result};
use crate::parser::assign::starts_keyword;
use crate::parser::material::material_number;
use crate::types::{
    Cell, CellMaterial, EntityKind, Halfspace, Material, ParamValue, Real, Region, Sense,
    Setting, SettingValue, Surface, MAX_ID,
};

fn id(kind: EntityKind, id: u32) -> Result<String> {
    if id == 0 || id > MAX_ID {
        return Err(DeckError::serialization(format!(
            "{} number {} is outside 1..={}",
            kind, id, MAX_ID
        )));
    }
    Ok(id.to_string())
}

fn real(value: Real, what: impl FnOnce() -> String) -> Result<String> {
    if !value.is_finite() {
        return Err(DeckError::serialization(format!(
            "{} is {}, which has no card form",
            what(),
            value.value()
        )));
    }
    Ok(value.to_string())
}

/// Check a free-form word survives re-reading as one word.
fn word(text: &str, what: impl FnOnce() -> String) -> Result<String> {
    let problem = if text.is_empty() {
        Some("is empty")
    } else if text.chars().any(char::is_whitespace) {
        Some("contains whitespace")
    } else if text.contains('$') {
        Some("contains '$'")
    } else if text.contains('=') {
        Some("contains '='")
    } else if text.ends_with('&') {
        Some("ends with '&'")
    } else {
        None
    };

    match problem {
        Some(problem) => Err(DeckError::serialization(format!("{} {}", what(), problem))),
        None => Ok(text.to_string()),
    }
}

fn keyword(text: &str, what: impl FnOnce() -> String) -> Result<String> {
    let text = word(text, what)?;
    if !starts_keyword(&text) {
        return Err(DeckError::serialization(format!(
            "'{}' must start with a letter",
            text
        )));
    }
    Ok(text)
}

pub fn cell(cell: &Cell) -> Result<Vec<String>> {
    let mut fields = vec![id(EntityKind::Cell, cell.id)?];

    match cell.material {
        CellMaterial::Void => fields.push("0".to_string()),
        CellMaterial::Filled { id: material, density } => {
            fields.push(id(EntityKind::Material, material)?);
            fields.push(real(density, || format!("density of cell {}", cell.id))?);
        }
    }

    fields.extend(geometry(&cell.geometry)?.split(' ').map(str::to_string));

    for (name, values) in cell.params.iter() {
        let what = || format!("parameter '{}' of cell {}", name, cell.id);
        let name = keyword(name, what)?;
        let Some((first, rest)) = values.split_first() else {
            return Err(DeckError::serialization(format!("{} has no value", what())));
        };

        fields.push(format!("{}={}", name, param(first, what)?));
        for value in rest {
            let text = param(value, what)?;
            if starts_keyword(&text) {
                return Err(DeckError::serialization(format!(
                    "{}: value '{}' would read as a new parameter",
                    what(),
                    text
                )));
            }
            fields.push(text);
        }
    }

    Ok(fields)
}

fn param(value: &ParamValue, what: impl Fn() -> String) -> Result<String> {
    match value {
        ParamValue::Number(r) => real(*r, &what),
        ParamValue::Symbol(s) => word(s, &what),
    }
}

/// Render a geometry expression. Words are separated by single spaces.
pub fn geometry(region: &Region) -> Result<String> {
    match region {
        Region::Halfspace(h) => halfspace(h),
        Region::CellComplement(n) => Ok(format!("#{}", id(EntityKind::Cell, *n)?)),
        Region::Complement(inner) => Ok(format!("#({})", geometry(inner)?)),
        Region::Intersection(items) => {
            let parts = children(items, "intersection", |r| {
                matches!(r, Region::Intersection(_) | Region::Union(_))
            })?;
            Ok(parts.join(" "))
        }
        Region::Union(items) => {
            let parts = children(items, "union", |r| matches!(r, Region::Union(_)))?;
            Ok(parts.join(" : "))
        }
    }
}

fn children(items: &[Region], what: &str, needs_parens: fn(&Region) -> bool) -> Result<Vec<String>> {
    if items.is_empty() {
        return Err(DeckError::serialization(format!("empty {} in geometry", what)));
    }
    items
        .iter()
        .map(|item| {
            let text = geometry(item)?;
            Ok(if needs_parens(item) {
                format!("({})", text)
            } else {
                text
            })
        })
        .collect()
}

fn halfspace(h: &Halfspace) -> Result<String> {
    let sign = match h.sense {
        Sense::Negative => "-",
        Sense::Positive => "",
    };
    let surface = id(EntityKind::Surface, h.surface)?;
    match h.facet {
        Some(0) => Err(DeckError::serialization(format!(
            "facet 0 of surface {}",
            h.surface
        ))),
        Some(facet) => Ok(format!("{}{}.{}", sign, surface, facet)),
        None => Ok(format!("{}{}", sign, surface)),
    }
}

pub fn surface(surface: &Surface) -> Result<Vec<String>> {
    let mut fields = vec![format!(
        "{}{}",
        surface.boundary.prefix(),
        id(EntityKind::Surface, surface.id)?
    )];

    if let Some(transform) = surface.transform {
        if transform == 0 || transform > MAX_ID {
            return Err(DeckError::serialization(format!(
                "transform {} of surface {} is outside 1..={}",
                transform, surface.id, MAX_ID
            )));
        }
        fields.push(transform.to_string());
    }

    fields.push(surface.kind.mnemonic().to_string());
    for (i, c) in surface.coefficients.iter().enumerate() {
        fields.push(real(*c, || {
            format!("coefficient {} of surface {}", i + 1, surface.id)
        })?);
    }

    Ok(fields)
}

pub fn material(material: &Material) -> Result<Vec<String>> {
    let mut fields = vec![format!("m{}", id(EntityKind::Material, material.id)?)];

    for entry in &material.entries {
        fields.push(word(entry.nuclide.as_str(), || {
            format!("nuclide of material {}", material.id)
        })?);
        fields.push(real(entry.fraction, || {
            format!("fraction of {} in material {}", entry.nuclide, material.id)
        })?);
    }

    for (key, value) in &material.options {
        let what = || format!("option '{}' of material {}", key, material.id);
        fields.push(format!("{}={}", keyword(key, what)?, word(value, what)?));
    }

    Ok(fields)
}

pub fn setting(setting: &Setting) -> Result<Vec<String>> {
    let name = keyword(&setting.keyword, || format!("keyword '{}'", setting.keyword))?;
    if material_number(&name).is_some() || name.eq_ignore_ascii_case("c") {
        return Err(DeckError::serialization(format!(
            "setting keyword '{}' would read back as a different card",
            name
        )));
    }

    let mut fields = vec![name];
    for (i, arg) in setting.args.iter().enumerate() {
        let what = || format!("argument {} of '{}'", i + 1, setting.keyword);
        fields.push(match arg {
            SettingValue::Number(r) => real(*r, what)?,
            SettingValue::Text(t) if t.contains('=') => assignment(t, what)?,
            SettingValue::Text(t) => word(t, what)?,
        });
    }

    Ok(fields)
}

/// `key=value` words in settings (`pos=0`) are kept as one word.
fn assignment(text: &str, what: impl Fn() -> String) -> Result<String> {
    for part in text.split('=') {
        if !part.is_empty() {
            word(part, &what)?;
        }
    }
    if text.chars().any(char::is_whitespace) {
        return Err(DeckError::serialization(format!("{} contains whitespace", what())));
    }
    Ok(text.to_string())
}
