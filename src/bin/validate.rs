use std::process::ExitCode;

use compendium::{stage::finish, validate};

fn main() -> ExitCode {
    compendium::init_tracing();

    finish(validate::run(std::path::Path::new(".")))
}
