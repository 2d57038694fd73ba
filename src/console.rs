//! Operator-facing status lines. Diagnostics go through `tracing` on stderr; these go to
//! stdout so an operator can read the run at a glance.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Tag {
    Error,
    System,
    Success,
    Info,
}

pub fn tagged(tag: Tag, message: impl Display) -> String {
    format!("[{}] {}", tag.as_ref(), message)
}

pub fn announce(tag: Tag, message: impl Display) {
    println!("{}", tagged(tag, message));
}

pub fn banner(title: &str) {
    println!("--- {} ---", title);
}
