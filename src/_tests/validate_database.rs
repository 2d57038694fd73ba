use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{
    _tests::{init_tracing, write_database},
    stage::Stage,
    validate,
};

#[test]
fn migrated_then_sorted_database_validates() -> anyhow::Result<()> {
    init_tracing();

    let dir = tempfile::tempdir()?;
    write_database(
        dir.path(),
        "persona_data.json",
        json!([
            {"Id": "orpheus", "Name": "Orpheus", "Arcana": "Fool", "Level": 1,
             "Stats": {"STR": 2, "MAG": 2, "END": 2, "AGI": 2, "LUK": 2},
             "Affinities": {"Elec": "Weak", "Dark": "Weak"},
             "BaseSkills": ["Agi"], "LearnedSkills": {"3": "Bash"}},
            {"Id": "slime", "Name": "Slime", "Arcana": "Chariot", "Level": 3},
        ]),
    )?;

    Stage::TransformSchema.run(dir.path())?;
    Stage::Sort.run(dir.path())?;

    assert_eq!(validate::run(dir.path())?, 2);

    Ok(())
}

#[test]
fn problems_fail_the_run() -> anyhow::Result<()> {
    init_tracing();

    let dir = tempfile::tempdir()?;
    write_database(
        dir.path(),
        validate::FINALIZED_DATABASE,
        json!([
            {"Id": "pixie", "Name": "Pixie", "Race": "Fairy", "Level": 2,
             "Stats": {"St": 2, "Ma": 2, "Vi": 2, "Ag": 2, "Lu": 2},
             "Affinities": {"Fire": "Weak"},
             "BaseSkills": [], "LearnedSkills": {}},
        ]),
    )?;

    let err = validate::run(dir.path()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Found 1 problems across 1 demons in sorted_formatted_persona_data.json"
    );

    Ok(())
}
