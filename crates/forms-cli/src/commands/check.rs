//! `formkit check`

use super::read_input;
use anyhow::Context;
use forms_editor::{EditorConfig, FieldIssue, FormSession, InitialForm};
use forms_schema::decode;
use std::io::Write;
use std::path::Path;

/// Validate the form in `path`, writing one line per error
///
/// Returns whether the form is valid. A document that does not decode is an
/// error, not an invalid form.
pub fn run(
    path: &Path,
    payload: bool,
    config: EditorConfig,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let text = read_input(path)?;
    let initial = if payload {
        InitialForm::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
    } else {
        InitialForm::with_structure(text)
    };

    let questions = match initial.structure.as_deref() {
        Some(structure) => {
            decode(structure).with_context(|| format!("decoding {}", path.display()))?
        }
        None => Vec::new(),
    };

    let mut session = FormSession::from_decoded(&initial, questions, config);
    let valid = session.validate_questions();
    for issue in session.issues() {
        writeln!(out, "{}", describe(&issue))?;
    }
    tracing::info!(valid, errors = session.error_count(), "checked form");
    Ok(valid)
}

/// One-line description of an issue, numbered from 1
#[must_use]
pub fn describe(issue: &FieldIssue) -> String {
    match issue.option_index {
        Some(option) => format!(
            "question {} option {}: {}",
            issue.question_index + 1,
            option + 1,
            issue.error
        ),
        None => format!(
            "question {} ({}): {}",
            issue.question_index + 1,
            issue.question_id,
            issue.error
        ),
    }
}
