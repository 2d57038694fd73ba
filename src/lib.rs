#[macro_use]
extern crate tracing;


pub mod affinities;
pub mod console;
pub mod database;
pub mod demon;
pub mod sorting;
pub mod stage;
pub mod stats;
pub mod validate;

/// Sends diagnostics to stderr, keeping stdout for the operator's status lines.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_line_number(true)
        .with_file(true)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
