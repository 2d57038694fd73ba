use std::str::FromStr;

use anyhow::{anyhow, Context};
use serde::Serialize;
use serde_json::{Map, Value};

/// Elemental affinity columns, declared in the order they are displayed in the database.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::EnumIter,
    strum::AsRefStr,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Element {
    Strike,
    Slash,
    Pierce,
    Fire,
    Ice,
    Elec,
    Wind,
    Earth,
    Light,
    Dark,
    Mind,
    Nerve,
    Curse,
}

impl Element {
    pub const PHYSICAL: [Element; 3] = [Element::Strike, Element::Slash, Element::Pierce];

    /// Keys older databases used for a single physical column.
    pub const LEGACY_PHYSICAL_KEYS: [&'static str; 2] = ["Phys", "Physical"];

    pub fn is_physical(self) -> bool {
        Self::PHYSICAL.contains(&self)
    }
}

impl TryFrom<&String> for Element {
    type Error = anyhow::Error;

    fn try_from(value: &String) -> Result<Self, Self::Error> {
        match value.trim() {
            s if s.eq_ignore_ascii_case("Electric") => Ok(Self::Elec),
            s if s.eq_ignore_ascii_case("Darkness") => Ok(Self::Dark),
            other => {
                Ok(Self::from_str(other).with_context(|| anyhow!("Parsing element {}", value))?)
            }
        }
    }
}

/// How a demon reacts to an element.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::EnumIter,
    strum::AsRefStr,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum AffinityLevel {
    #[default]
    Normal,
    Weak,
    Resist,
    Null,
    Repel,
    Absorb,
}

impl TryFrom<&String> for AffinityLevel {
    type Error = anyhow::Error;

    fn try_from(value: &String) -> Result<Self, Self::Error> {
        match value.trim() {
            s if s.eq_ignore_ascii_case("Reflect") => Ok(Self::Repel),
            s if s.eq_ignore_ascii_case("Block") => Ok(Self::Null),
            other => {
                Ok(Self::from_str(other).with_context(|| anyhow!("Parsing affinity {}", value))?)
            }
        }
    }
}

/// Value given to a column that is being retrofitted into an existing mapping.
pub fn default_affinity() -> Value {
    Value::String(AffinityLevel::default().as_ref().to_string())
}

/// Returns a copy of `pairs` with `new_key` seated directly after `after_key`.
///
/// Falls back to seating it directly before `before_key`, then to appending it. When `new_key`
/// is already present the mapping is returned unchanged, so repeated application is a no-op.
pub fn insert_after_or_before(
    pairs: &Map<String, Value>,
    new_key: &str,
    new_value: Value,
    after_key: &str,
    before_key: &str,
) -> Map<String, Value> {
    if pairs.contains_key(new_key) {
        return pairs.clone();
    }

    let seat_after = pairs.contains_key(after_key);
    let seat_before = !seat_after && pairs.contains_key(before_key);

    let mut pending = Some(new_value);
    let mut seated = Map::with_capacity(pairs.len() + 1);
    for (key, value) in pairs {
        if seat_before && key == before_key {
            if let Some(new_value) = pending.take() {
                seated.insert(new_key.to_string(), new_value);
            }
        }

        seated.insert(key.clone(), value.clone());

        if seat_after && key == after_key {
            if let Some(new_value) = pending.take() {
                seated.insert(new_key.to_string(), new_value);
            }
        }
    }

    if let Some(new_value) = pending {
        seated.insert(new_key.to_string(), new_value);
    }

    seated
}

/// Retrofits the `Earth` column into a record's affinities, between `Wind` and `Light`.
///
/// Records without an `Affinities` mapping are returned untouched.
pub fn reorder_demon_affinities(mut demon: Value) -> Value {
    let Some(affinities) = demon.get_mut("Affinities") else {
        return demon;
    };

    match affinities {
        Value::Object(pairs) => {
            *pairs = insert_after_or_before(
                pairs,
                Element::Earth.as_ref(),
                default_affinity(),
                Element::Wind.as_ref(),
                Element::Light.as_ref(),
            );
        }
        other => {
            warn!("Leaving non-mapping affinities untouched: {}", other);
        }
    }

    demon
}
