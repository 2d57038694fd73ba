use std::process::ExitCode;

use compendium::stage::{finish, Stage};

fn main() -> ExitCode {
    compendium::init_tracing();

    finish(Stage::ReorderAffinities.run(std::path::Path::new(".")))
}
