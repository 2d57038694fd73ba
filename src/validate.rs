use std::{fmt, path::Path};

use anyhow::bail;
use itertools::Itertools;
use serde_json::{Map, Value};
use strum::IntoEnumIterator;

use crate::{
    affinities::{AffinityLevel, Element},
    console::{announce, banner, Tag},
    database,
    stats::Stat,
};

/// The file the finished database is expected to live in.
pub const FINALIZED_DATABASE: &str = "sorted_formatted_persona_data.json";

const REQUIRED_FIELDS: [&str; 8] = [
    "Id",
    "Name",
    "Race",
    "Level",
    "Stats",
    "Affinities",
    "BaseSkills",
    "LearnedSkills",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    NotAMapping,
    MissingField(&'static str),
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    StatColumns(Vec<String>),
    StatValue {
        stat: Stat,
        value: Value,
    },
    AffinityColumns(Vec<String>),
    AliasedElement {
        key: String,
        element: Element,
    },
    UnknownAffinity {
        element: Element,
        value: Value,
    },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::NotAMapping => write!(f, "entry is not a mapping"),
            Problem::MissingField(field) => write!(f, "missing field {}", field),
            Problem::WrongType { field, expected } => {
                write!(f, "{} should be {}", field, expected)
            }
            Problem::StatColumns(keys) => write!(
                f,
                "stat columns are [{}], expected [{}]",
                keys.join(", "),
                Stat::iter().map(|s| s.as_ref().to_string()).join(", ")
            ),
            Problem::StatValue { stat, value } => {
                write!(f, "stat {} should be an integer, found {}", stat.as_ref(), value)
            }
            Problem::AffinityColumns(keys) => write!(
                f,
                "affinity columns are [{}], expected [{}]",
                keys.join(", "),
                Element::iter().map(|e| e.as_ref().to_string()).join(", ")
            ),
            Problem::AliasedElement { key, element } => {
                write!(f, "affinity column {} should be named {}", key, element.as_ref())
            }
            Problem::UnknownAffinity { element, value } => write!(
                f,
                "{} affinity {} is not one of [{}]",
                element.as_ref(),
                value,
                AffinityLevel::iter().map(|a| a.as_ref().to_string()).join(", ")
            ),
        }
    }
}

/// Checks one demon against the finalized schema.
pub fn validate_demon(demon: &Value) -> Vec<Problem> {
    let Value::Object(fields) = demon else {
        return vec![Problem::NotAMapping];
    };

    let mut problems = REQUIRED_FIELDS
        .iter()
        .filter(|field| !fields.contains_key(**field))
        .map(|field| Problem::MissingField(*field))
        .collect_vec();

    if fields.get("Race").is_some_and(|race| !race.is_string()) {
        problems.push(Problem::WrongType {
            field: "Race",
            expected: "a string",
        });
    }

    if fields
        .get("Level")
        .is_some_and(|level| !(level.is_i64() || level.is_u64()))
    {
        problems.push(Problem::WrongType {
            field: "Level",
            expected: "an integer",
        });
    }

    match fields.get("Stats") {
        Some(Value::Object(stats)) => problems.extend(validate_stats(stats)),
        Some(_) => problems.push(Problem::WrongType {
            field: "Stats",
            expected: "a mapping",
        }),
        None => {}
    }

    match fields.get("Affinities") {
        Some(Value::Object(affinities)) => problems.extend(validate_affinities(affinities)),
        Some(_) => problems.push(Problem::WrongType {
            field: "Affinities",
            expected: "a mapping",
        }),
        None => {}
    }

    match fields.get("BaseSkills") {
        Some(Value::Array(skills)) if skills.iter().all(Value::is_string) => {}
        Some(_) => problems.push(Problem::WrongType {
            field: "BaseSkills",
            expected: "a list of skill names",
        }),
        None => {}
    }

    if fields
        .get("LearnedSkills")
        .is_some_and(|skills| !skills.is_object())
    {
        problems.push(Problem::WrongType {
            field: "LearnedSkills",
            expected: "a mapping",
        });
    }

    problems
}

fn validate_stats(stats: &Map<String, Value>) -> Vec<Problem> {
    let mut problems = vec![];

    if !stats.keys().eq(Stat::iter().map(<&'static str>::from)) {
        problems.push(Problem::StatColumns(stats.keys().cloned().collect_vec()));
    }

    for stat in Stat::iter() {
        if let Some(value) = stats.get(stat.as_ref()) {
            if !(value.is_i64() || value.is_u64()) {
                problems.push(Problem::StatValue {
                    stat,
                    value: value.clone(),
                });
            }
        }
    }

    problems
}

fn validate_affinities(affinities: &Map<String, Value>) -> Vec<Problem> {
    let mut problems = vec![];

    if !affinities.keys().eq(Element::iter().map(<&'static str>::from)) {
        problems.push(Problem::AffinityColumns(
            affinities.keys().cloned().collect_vec(),
        ));
    }

    for key in affinities.keys() {
        if let Ok(element) = Element::try_from(key) {
            if element.as_ref() != key {
                problems.push(Problem::AliasedElement {
                    key: key.clone(),
                    element,
                });
            }
        }
    }

    for element in Element::iter() {
        let Some(value) = affinities.get(element.as_ref()) else {
            continue;
        };

        let recognized = match value {
            Value::String(level) => AffinityLevel::try_from(level).is_ok(),
            _ => false,
        };
        if !recognized {
            problems.push(Problem::UnknownAffinity {
                element,
                value: value.clone(),
            });
        }
    }

    problems
}

fn describe(index: usize, demon: &Value) -> String {
    match demon
        .get("Id")
        .and_then(Value::as_str)
        .or_else(|| demon.get("Name").and_then(Value::as_str))
    {
        Some(label) => format!("#{} ({})", index, label),
        None => format!("#{}", index),
    }
}

/// Checks every demon, pairing each problem with a description of the demon it was found on.
pub fn validate_database(demons: &[Value]) -> Vec<(String, Problem)> {
    demons
        .iter()
        .enumerate()
        .flat_map(|(index, demon)| {
            validate_demon(demon)
                .into_iter()
                .map(move |problem| (describe(index, demon), problem))
        })
        .collect_vec()
}

/// Validates the finalized database in `dir`. Fails if any demon breaks the schema.
pub fn run(dir: &Path) -> anyhow::Result<usize> {
    banner("JRPG ENGINE: DATABASE VALIDATION");

    let path = dir.join(FINALIZED_DATABASE);
    if !path.exists() {
        bail!("Source file '{}' not found.", FINALIZED_DATABASE);
    }

    let demons = database::load(&path)?;
    announce(Tag::System, format!("Validating {} demons...", demons.len()));

    let problems = validate_database(&demons);
    for (demon, problem) in problems.iter() {
        warn!("{}: {}", demon, problem);
    }

    if !problems.is_empty() {
        bail!(
            "Found {} problems across {} demons in {}",
            problems.len(),
            problems.iter().map(|(demon, _)| demon).unique().count(),
            FINALIZED_DATABASE
        );
    }

    announce(
        Tag::Success,
        format!("All {} demons match the finalized schema.", demons.len()),
    );

    Ok(demons.len())
}
