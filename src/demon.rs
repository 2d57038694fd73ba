use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Map, Value};
use strum::IntoEnumIterator;

use crate::{affinities::Element, sorting::sort_by_level, stats::Stat};

/// A demon in the high-fidelity schema.
///
/// Field declaration order is the order fields are written to disk. Identity and skill fields
/// are carried as raw JSON so hand-edited data survives the migration untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Demon {
    pub id: Value,
    pub name: Value,
    pub race: Value,
    pub level: Value,
    pub stats: IndexMap<Stat, Value>,
    pub affinities: IndexMap<Element, Value>,
    pub base_skills: Value,
    pub learned_skills: Value,
}

impl Demon {
    pub const UNKNOWN_ID: &'static str = "unknown_id";
    pub const UNKNOWN_NAME: &'static str = "Unknown Name";
    pub const DEFAULT_LEVEL: i64 = 1;

    /// Upgrades a legacy persona entry. Every absent field gets a default, so this never fails.
    pub fn from_legacy(old: &Value) -> Self {
        let field = |key: &str| old.get(key).cloned();

        let race = field("Arcana")
            .or_else(|| field("Race"))
            .unwrap_or_else(|| json!(crate::sorting::UNKNOWN_RACE));

        Self {
            id: field("Id").unwrap_or_else(|| json!(Self::UNKNOWN_ID)),
            name: field("Name").unwrap_or_else(|| json!(Self::UNKNOWN_NAME)),
            race,
            level: field("Level").unwrap_or_else(|| json!(Self::DEFAULT_LEVEL)),
            stats: migrate_stats(mapping(old, "Stats")),
            affinities: migrate_affinities(mapping(old, "Affinities")),
            base_skills: field("BaseSkills").unwrap_or_else(|| json!([])),
            learned_skills: field("LearnedSkills").unwrap_or_else(|| json!({})),
        }
    }
}

fn mapping<'v>(value: &'v Value, key: &str) -> Option<&'v Map<String, Value>> {
    value.get(key).and_then(Value::as_object)
}

/// Rewrites long-form stat keys into the short set, preferring the long form when both exist.
pub fn migrate_stats(old: Option<&Map<String, Value>>) -> IndexMap<Stat, Value> {
    Stat::iter()
        .map(|stat| {
            let value = old
                .and_then(|old| old.get(stat.legacy_key()).or_else(|| old.get(stat.as_ref())))
                .cloned()
                .unwrap_or_else(Stat::default_value);

            (stat, value)
        })
        .collect()
}

/// Produces all thirteen affinity columns in display order.
///
/// A legacy single physical column is broadcast into Strike, Slash and Pierce unless those
/// columns are already present.
pub fn migrate_affinities(old: Option<&Map<String, Value>>) -> IndexMap<Element, Value> {
    let get = |key: &str| old.and_then(|old| old.get(key)).cloned();

    let physical = Element::LEGACY_PHYSICAL_KEYS
        .into_iter()
        .find_map(get)
        .unwrap_or_else(crate::affinities::default_affinity);

    Element::iter()
        .map(|element| {
            let value = get(element.as_ref()).unwrap_or_else(|| {
                if element.is_physical() {
                    physical.clone()
                } else {
                    crate::affinities::default_affinity()
                }
            });

            (element, value)
        })
        .collect()
}

/// Migrates every legacy entry and orders the result by level.
pub fn migrate_schema(old: &[Value]) -> Vec<Demon> {
    let mut demons = old.iter().map(Demon::from_legacy).collect::<Vec<_>>();
    debug!("Migrated {} demons", demons.len());

    sort_by_level(&mut demons);
    demons
}
