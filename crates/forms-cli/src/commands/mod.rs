//! Subcommand implementations

pub mod check;
pub mod fmt;
pub mod json;

use anyhow::Context;
use std::path::Path;

pub(crate) fn read_input(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
