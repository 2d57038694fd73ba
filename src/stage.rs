use std::{path::Path, process::ExitCode};

use anyhow::{bail, Context};
use itertools::Itertools;

use crate::{
    affinities::reorder_demon_affinities,
    console::{announce, banner, Tag},
    database,
    demon::migrate_schema,
    sorting::sort_by_race_then_level,
};

/// One migration step over the demon database. Each step reads a fixed file and writes another,
/// both relative to the directory it is run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter, strum::AsRefStr)]
pub enum Stage {
    TransformSchema,
    ReorderAffinities,
    Sort,
}

impl Stage {
    pub fn input_file(self) -> &'static str {
        match self {
            Stage::TransformSchema => "persona_data.json",
            Stage::ReorderAffinities => "smtiii_demons.json",
            Stage::Sort => "formatted_persona_data.json",
        }
    }

    pub fn output_file(self) -> &'static str {
        match self {
            Stage::TransformSchema => "formatted_persona_data.json",
            Stage::ReorderAffinities => "smtiii_demons_reordered.json",
            Stage::Sort => "sorted_formatted_persona_data.json",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Stage::TransformSchema => "JRPG ENGINE: DATABASE SCHEMA TRANSFORMATION",
            Stage::ReorderAffinities => "JRPG ENGINE: DATABASE RESTRUCTURING",
            Stage::Sort => "JRPG ENGINE: DATABASE FINALIZATION & SORTING",
        }
    }

    fn progress(self, count: usize) -> String {
        match self {
            Stage::TransformSchema => format!(
                "Transforming {} entries to the High-Fidelity SMT III schema...",
                count
            ),
            Stage::ReorderAffinities => format!("Restructuring {} demons...", count),
            Stage::Sort => format!("Loaded {} demons for sorting.", count),
        }
    }

    fn missing_input(self) -> String {
        let hint = match self {
            Stage::Sort => " Ensure the file is in the same directory.",
            _ => "",
        };

        format!("Source file '{}' not found.{}", self.input_file(), hint)
    }

    fn read_failure(self) -> &'static str {
        "Failed to read source file"
    }

    fn parse_failure(self) -> &'static str {
        match self {
            Stage::Sort => "Failed to parse JSON data",
            _ => "Failed to parse JSON",
        }
    }

    fn save_failure(self) -> &'static str {
        match self {
            Stage::TransformSchema => "Failed to save transformed database",
            Stage::ReorderAffinities => "Failed to save restructured database",
            Stage::Sort => "Failed to save sorted database",
        }
    }

    fn report_success(self) {
        match self {
            Stage::TransformSchema => {
                println!();
                banner("TRANSFORMATION SUCCESSFUL");
                announce(Tag::Success, format!("File saved as: {}", self.output_file()));
                announce(Tag::Info, "Arcana has been mapped to Race.");
                announce(Tag::Info, "Stats have been mapped to St, Ma, Vi, Ag, Lu.");
                announce(Tag::Info, "Earth column is correctly seated between Wind and Light.");
                announce(Tag::Info, "All 13 affinity columns are now present for every entry.");
            }
            Stage::ReorderAffinities => {
                banner("RESTRUCTURE COMPLETE");
                announce(Tag::Success, format!("File saved as: {}", self.output_file()));
                announce(
                    Tag::Info,
                    "The 'Earth' column is now seated between 'Wind' and 'Light'.",
                );
                announce(
                    Tag::Info,
                    "All manual skills, levels, and stats have been preserved.",
                );
            }
            Stage::Sort => {
                println!();
                banner("SORTING COMPLETE");
                announce(
                    Tag::Success,
                    format!(
                        "Fully sorted and finalized database saved to: {}",
                        self.output_file()
                    ),
                );
                announce(
                    Tag::Info,
                    "All demons are now grouped by Race and ordered by Level.",
                );
            }
        }
    }

    /// Loads this stage's input from `dir`, migrates it, and writes the output next to it.
    ///
    /// Returns how many demons were written.
    pub fn run(self, dir: &Path) -> anyhow::Result<usize> {
        banner(self.title());

        let input = dir.join(self.input_file());
        if !input.exists() {
            bail!(self.missing_input());
        }

        let demons = database::load(&input).map_err(|e| {
            if e.root_cause().is::<std::io::Error>() {
                e.context(self.read_failure())
            } else {
                e.context(self.parse_failure())
            }
        })?;
        let count = demons.len();
        announce(Tag::System, self.progress(count));

        let output = dir.join(self.output_file());
        let _span = info_span!("stage", stage = self.as_ref()).entered();
        let written = match self {
            Stage::TransformSchema => {
                let demons = migrate_schema(&demons);
                database::save(&output, &demons).map(|_| demons.len())
            }
            Stage::ReorderAffinities => {
                let demons = demons
                    .into_iter()
                    .map(reorder_demon_affinities)
                    .collect_vec();
                database::save(&output, &demons).map(|_| demons.len())
            }
            Stage::Sort => {
                let mut demons = demons;
                sort_by_race_then_level(&mut demons);
                database::save(&output, &demons).map(|_| demons.len())
            }
        }
        .context(self.save_failure())?;

        debug_assert_eq!(written, count);
        self.report_success();

        Ok(written)
    }
}

/// Turns the outcome of a tool run into an exit code, reporting failures on the console.
pub fn finish<T>(result: anyhow::Result<T>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:?}", e);
            announce(Tag::Error, format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
