use std::cmp::Ordering;

use serde_json::Value;

use crate::demon::Demon;

pub const UNKNOWN_RACE: &str = "Unknown";

/// Level assumed for demons that never had one recorded, so they sink to the end of a race.
pub const MISSING_LEVEL: i64 = 999;

/// Numeric view of a `Level` value. Non-numeric levels are treated as missing.
pub fn level_of(level: Option<&Value>, default: i64) -> f64 {
    level
        .and_then(Value::as_f64)
        .unwrap_or(default as f64)
}

pub fn race_of(demon: &Value) -> &str {
    demon
        .get("Race")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_RACE)
}

fn compare_levels(left: f64, right: f64) -> Ordering {
    left.total_cmp(&right)
}

/// Orders freshly migrated demons by level. Ties keep their input order.
pub fn sort_by_level(demons: &mut [Demon]) {
    demons.sort_by(|left, right| {
        compare_levels(
            level_of(Some(&left.level), MISSING_LEVEL),
            level_of(Some(&right.level), MISSING_LEVEL),
        )
    });
}

/// Groups demons by race, then orders each race by level. Ties keep their input order.
pub fn sort_by_race_then_level(demons: &mut [Value]) {
    demons.sort_by(|left, right| {
        race_of(left).cmp(race_of(right)).then_with(|| {
            compare_levels(
                level_of(left.get("Level"), MISSING_LEVEL),
                level_of(right.get("Level"), MISSING_LEVEL),
            )
        })
    });
}
