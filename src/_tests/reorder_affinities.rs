use itertools::Itertools;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{
    _tests::{init_tracing, write_database},
    database,
    stage::Stage,
};

#[test]
fn seats_earth_in_saved_database() -> anyhow::Result<()> {
    init_tracing();

    let dir = tempfile::tempdir()?;
    write_database(
        dir.path(),
        "smtiii_demons.json",
        json!([
            {"Id": "pixie", "Affinities": {"Fire": "Weak", "Wind": "Normal", "Light": "Null"}},
            {"Id": "slime", "Level": 3},
            {"Id": "angel", "Affinities": {"Fire": "Normal", "Light": "Null", "Dark": "Weak"}},
            {"Id": "kodama", "Affinities": {"Fire": "Weak"}, "LearnedSkills": {"5": "Dia"}},
            {"Id": "setanta", "Affinities": {"Wind": "Weak", "Earth": "Resist", "Light": "Normal"}},
        ]),
    )?;

    assert_eq!(Stage::ReorderAffinities.run(dir.path())?, 5);

    let demons = database::load(&dir.path().join("smtiii_demons_reordered.json"))?;
    let columns = |index: usize| {
        demons[index]["Affinities"]
            .as_object()
            .map(|affinities| affinities.keys().cloned().collect_vec())
    };

    assert_eq!(
        demons[0]["Affinities"],
        json!({"Fire": "Weak", "Wind": "Normal", "Earth": "Normal", "Light": "Null"})
    );
    assert_eq!(columns(0).unwrap(), ["Fire", "Wind", "Earth", "Light"]);
    assert_eq!(demons[1], json!({"Id": "slime", "Level": 3}));
    assert_eq!(columns(2).unwrap(), ["Fire", "Earth", "Light", "Dark"]);
    assert_eq!(columns(3).unwrap(), ["Fire", "Earth"]);
    assert_eq!(demons[3]["LearnedSkills"], json!({"5": "Dia"}));
    assert_eq!(columns(4).unwrap(), ["Wind", "Earth", "Light"]);
    assert_eq!(demons[4]["Affinities"]["Earth"], json!("Resist"));

    Ok(())
}

#[test]
fn second_run_changes_nothing() -> anyhow::Result<()> {
    init_tracing();

    let dir = tempfile::tempdir()?;
    write_database(
        dir.path(),
        "smtiii_demons.json",
        json!([
            {"Id": "pixie", "Affinities": {"Strike": "Normal", "Wind": "Resist", "Light": "Null"}},
            {"Id": "mou-ryo", "Affinities": {"Dark": "Null"}},
        ]),
    )?;

    Stage::ReorderAffinities.run(dir.path())?;
    let once = std::fs::read_to_string(dir.path().join("smtiii_demons_reordered.json"))?;

    std::fs::rename(
        dir.path().join("smtiii_demons_reordered.json"),
        dir.path().join("smtiii_demons.json"),
    )?;
    Stage::ReorderAffinities.run(dir.path())?;
    let twice = std::fs::read_to_string(dir.path().join("smtiii_demons_reordered.json"))?;

    assert_eq!(once, twice);
    assert_eq!(once.matches("\"Earth\"").count(), 2);

    Ok(())
}
