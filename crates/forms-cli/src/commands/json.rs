//! `formkit json`

use super::read_input;
use anyhow::Context;
use forms_schema::FormDocument;
use std::io::Write;
use std::path::Path;

/// Print the decoded document in `path` as pretty JSON
pub fn run(path: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let text = read_input(path)?;
    let document =
        FormDocument::parse(&text).with_context(|| format!("decoding {}", path.display()))?;
    serde_json::to_writer_pretty(&mut *out, &document)?;
    writeln!(out)?;
    Ok(())
}
