//! `formkit fmt`

use super::read_input;
use anyhow::Context;
use forms_schema::FormDocument;
use std::io::Write;
use std::path::Path;

/// Print (or write back) the canonical encoding of the document in `path`
pub fn run(path: &Path, write: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let text = read_input(path)?;
    let document =
        FormDocument::parse(&text).with_context(|| format!("decoding {}", path.display()))?;
    let formatted = document.to_text();

    if write {
        if formatted != text {
            std::fs::write(path, &formatted)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "reformatted");
        }
    } else {
        out.write_all(formatted.as_bytes())?;
    }
    Ok(())
}
