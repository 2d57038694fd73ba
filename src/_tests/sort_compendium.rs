use itertools::Itertools;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{
    _tests::{init_tracing, write_database},
    database,
    sorting::{level_of, race_of, MISSING_LEVEL},
    stage::Stage,
};

#[test]
fn finalizes_transformed_database() -> anyhow::Result<()> {
    init_tracing();

    let dir = tempfile::tempdir()?;
    write_database(
        dir.path(),
        "persona_data.json",
        json!([
            {"Id": "jack_frost", "Race": "Fairy", "Level": 8},
            {"Id": "angel", "Arcana": "Divine", "Level": 11},
            {"Id": "pixie", "Race": "Fairy", "Level": 2},
            {"Id": "archangel", "Arcana": "Divine", "Level": 16},
            {"Name": "Nameless"},
        ]),
    )?;

    Stage::TransformSchema.run(dir.path())?;
    assert_eq!(Stage::Sort.run(dir.path())?, 5);

    let demons = database::load(&dir.path().join("sorted_formatted_persona_data.json"))?;
    assert_eq!(
        demons.iter().map(|d| d["Id"].as_str().unwrap()).collect_vec(),
        ["angel", "archangel", "pixie", "jack_frost", "unknown_id"]
    );

    for (a, b) in demons.iter().tuple_windows() {
        assert!(
            race_of(a) < race_of(b)
                || (race_of(a) == race_of(b)
                    && level_of(a.get("Level"), MISSING_LEVEL)
                        <= level_of(b.get("Level"), MISSING_LEVEL))
        );
    }

    Ok(())
}

#[test]
fn hand_edited_records_keep_their_fields() -> anyhow::Result<()> {
    init_tracing();

    let dir = tempfile::tempdir()?;
    write_database(
        dir.path(),
        "formatted_persona_data.json",
        json!([
            {"Name": "Cerberus", "Race": "Beast", "Notes": "boss only"},
            {"Name": "Inugami", "Race": "Beast", "Level": 24},
        ]),
    )?;

    Stage::Sort.run(dir.path())?;

    let demons = database::load(&dir.path().join("sorted_formatted_persona_data.json"))?;
    assert_eq!(
        demons,
        vec![
            json!({"Name": "Inugami", "Race": "Beast", "Level": 24}),
            json!({"Name": "Cerberus", "Race": "Beast", "Notes": "boss only"}),
        ]
    );
    assert_eq!(
        demons[1].as_object().unwrap().keys().collect_vec(),
        ["Name", "Race", "Notes"]
    );

    Ok(())
}

#[test]
fn missing_input_suggests_location() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let err = Stage::Sort.run(dir.path()).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Source file 'formatted_persona_data.json' not found. Ensure the file is in the same directory."
    );
}
