use serde::Serialize;
use serde_json::Value;

/// Base stats in display order.
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
pub enum Stat {
    St,
    Ma,
    Vi,
    Ag,
    Lu,
}

impl Stat {
    pub const DEFAULT_VALUE: i64 = 2;

    /// The long-form key older persona databases stored this stat under.
    pub fn legacy_key(self) -> &'static str {
        match self {
            Stat::St => "STR",
            Stat::Ma => "MAG",
            Stat::Vi => "END",
            Stat::Ag => "AGI",
            Stat::Lu => "LUK",
        }
    }

    pub fn default_value() -> Value {
        Value::from(Self::DEFAULT_VALUE)
    }
}
