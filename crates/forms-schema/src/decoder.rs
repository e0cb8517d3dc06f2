//! Form document decoder
//!
//! Turns node-document text into questions. Structure is checked strictly
//! (the text must parse and contain a `form` node); fields are read
//! leniently, so anything absent stays unset.
//!
//! # Option identity
//!
//! Older documents have no option ids. An option takes its explicit `id` if
//! it has one, otherwise its `value` the first time that value appears as an
//! id in the question, otherwise a fresh ULID. Decisions are made in
//! encounter order against the options accumulated so far.

use crate::coerce::{coerce, coerce_integer, coerce_number, safe_string};
use crate::error::{DecodeError, DecodeResult};
use crate::model::{
    FileConstraints, FormDocument, FormOption, OptionId, Question, QuestionId, QuestionType,
    ValidationRules, FORMAT_VERSION,
};
use crate::syntax::{self, Node};

/// Decode text into questions
pub fn decode(text: &str) -> DecodeResult<Vec<Question>> {
    decode_document(text).map(|doc| doc.questions)
}

/// Decode text into a versioned document
pub fn decode_document(text: &str) -> DecodeResult<FormDocument> {
    let tree = syntax::parse(text)?;
    if tree.is_empty() {
        return Err(DecodeError::malformed(1, 1, "document contains no nodes"));
    }
    let form = tree.find("form").ok_or(DecodeError::MissingFormNode)?;

    let version = form
        .children_named("version")
        .next()
        .and_then(|v| coerce_integer(v.first_value()))
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(FORMAT_VERSION);

    let questions: Vec<Question> = form.children_named("question").map(decode_question).collect();

    tracing::debug!(version, questions = questions.len(), "decoded form document");
    Ok(FormDocument { version, questions })
}

fn decode_question(node: &Node) -> Question {
    let mut q = Question::new(QuestionId::default(), QuestionType::Input);

    if let Some(id) = node.property("id") {
        q.id = QuestionId::new(safe_string(Some(id)));
    }
    if let Some(kind) = node.property("type") {
        q.kind = QuestionType::resolve(&safe_string(Some(kind)));
        if let QuestionType::Other(name) = &q.kind {
            tracing::warn!(question = %q.id, kind = %name, "unknown question type kept as-is");
        }
    }
    q.required = node.has_flag("required");

    for child in &node.children {
        match child.name.as_str() {
            "title" => q.title = coerce(child.first_value()),
            "placeholder" => q.placeholder = Some(coerce(child.first_value())),
            "max-file-size" => {
                if let Some(size) = read_number(child, &q.id) {
                    file_mut(&mut q).max_file_size = Some(size);
                }
            }
            "max-files" => {
                if let Some(count) = read_integer(child, &q.id) {
                    file_mut(&mut q).max_files = Some(count);
                }
            }
            "allowed-types" => {
                file_mut(&mut q).allowed_types =
                    child.values.iter().map(|v| coerce(Some(v))).collect();
            }
            "option" => {
                let option = decode_option(child, &q.options);
                q.options.push(option);
            }
            "validations" => q.validations = Some(decode_validations(child, &q.id)),
            other => tracing::warn!(question = %q.id, node = other, "skipping unknown node"),
        }
    }

    q
}

fn decode_option(node: &Node, existing: &[FormOption]) -> FormOption {
    let id = safe_string(node.property("id"));
    let value = safe_string(node.property("value"));
    let label = safe_string(node.property("label"));

    let id = reconcile_option_id(id, &value, existing);
    FormOption::new(id, value, label)
}

/// Pick the identity of a decoded option
///
/// Explicit id first, then `value` if no accumulated option already uses it
/// as an id, then a fresh identifier.
#[must_use]
pub fn reconcile_option_id(explicit: String, value: &str, existing: &[FormOption]) -> OptionId {
    if !explicit.is_empty() {
        return OptionId::new(explicit);
    }
    if !value.is_empty() && !existing.iter().any(|o| o.id.as_str() == value) {
        return OptionId::new(value);
    }
    loop {
        let fresh = OptionId::generate();
        if !existing.iter().any(|o| o.id == fresh) {
            return fresh;
        }
    }
}

fn decode_validations(node: &Node, question: &QuestionId) -> ValidationRules {
    let mut rules = ValidationRules {
        email: node.has_flag("email"),
        ..ValidationRules::default()
    };

    for child in &node.children {
        match child.name.as_str() {
            "regex" => rules.regex = Some(coerce(child.first_value())),
            "min-chars" => rules.min_chars = read_count(child, question),
            "max-chars" => rules.max_chars = read_count(child, question),
            other => tracing::warn!(%question, node = other, "skipping unknown validation"),
        }
    }

    rules
}

fn file_mut(q: &mut Question) -> &mut FileConstraints {
    q.file.get_or_insert_with(FileConstraints::default)
}

fn read_number(node: &Node, question: &QuestionId) -> Option<f64> {
    let n = coerce_number(node.first_value());
    if n.is_none() {
        tracing::warn!(%question, node = %node.name, "ignoring non-numeric value");
    }
    n
}

fn read_integer(node: &Node, question: &QuestionId) -> Option<i64> {
    let n = coerce_integer(node.first_value());
    if n.is_none() {
        tracing::warn!(%question, node = %node.name, "ignoring non-integer value");
    }
    n
}

fn read_count(node: &Node, question: &QuestionId) -> Option<u32> {
    read_integer(node, question).and_then(|n| u32::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UNLIMITED_FILES;

    fn wrap(body: &str) -> String {
        format!("form {{\n  version 1\n{body}}}\n")
    }

    #[test]
    fn malformed_text() {
        let err = decode("form {").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedDocument { .. }));
    }

    #[test]
    fn empty_text_is_malformed() {
        let err = decode("  // nothing here\n").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedDocument { .. }));
    }

    #[test]
    fn missing_form_node() {
        assert_eq!(decode("survey { }").unwrap_err(), DecodeError::MissingFormNode);
    }

    #[test]
    fn defaults_for_bare_question() {
        let qs = decode(&wrap("  question\n")).unwrap();
        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].id.as_str(), "");
        assert_eq!(qs[0].kind, QuestionType::Input);
        assert_eq!(qs[0].title, "");
        assert!(!qs[0].required);
        assert!(qs[0].placeholder.is_none());
        assert!(qs[0].file.is_none());
        assert!(qs[0].validations.is_none());
    }

    #[test]
    fn legacy_type_aliases() {
        let qs = decode(&wrap(
            "  question id=\"a\" type=\"multiple_choice\"\n  question id=\"b\" type=\"text\"\n",
        ))
        .unwrap();
        assert_eq!(qs[0].kind, QuestionType::Radio);
        assert_eq!(qs[1].kind, QuestionType::Input);
    }

    #[test]
    fn required_only_from_flag() {
        let qs = decode(&wrap(
            "  question id=\"a\" required\n  question id=\"b\" required=#true\n",
        ))
        .unwrap();
        assert!(qs[0].required);
        assert!(!qs[1].required);
    }

    #[test]
    fn option_identity_reconciliation() {
        let body = r#"  question id="q" type="radio" {
    option value="x" label="First"
    option value="x" label="Second"
    option value="" label="Third"
    option id="explicit" value="y" label="Fourth"
  }
"#;
        let qs = decode(&wrap(body)).unwrap();
        let ids: Vec<&str> = qs[0].options.iter().map(|o| o.id.as_str()).collect();

        assert_eq!(ids[0], "x");
        assert_ne!(ids[1], "x");
        assert!(!ids[1].is_empty());
        assert!(!ids[2].is_empty());
        assert_ne!(ids[1], ids[2]);
        assert_eq!(ids[3], "explicit");
        assert_eq!(qs[0].options[1].label, "Second");
    }

    #[test]
    fn value_not_reused_when_explicit_id_taken() {
        let body = r#"  question id="q" type="select" {
    option id="x" value="a" label="A"
    option value="x" label="X"
  }
"#;
        let qs = decode(&wrap(body)).unwrap();
        assert_eq!(qs[0].options[0].id.as_str(), "x");
        assert_ne!(qs[0].options[1].id.as_str(), "x");
    }

    #[test]
    fn file_constraints() {
        let body = r#"  question id="f" type="file" {
    title "Upload"
    "max-file-size" 25 mb
    "max-files" 3
    "allowed-types" ".pdf" "image/*"
  }
"#;
        let qs = decode(&wrap(body)).unwrap();
        let file = qs[0].file.as_ref().unwrap();
        assert_eq!(file.max_file_size, Some(25.0));
        assert_eq!(file.max_files, Some(3));
        assert_eq!(file.allowed_types, vec![".pdf", "image/*"]);
    }

    #[test]
    fn missing_max_files_stays_unset() {
        let body = "  question id=\"f\" type=\"file\" {\n    \"max-file-size\" 10 mb\n  }\n";
        let qs = decode(&wrap(body)).unwrap();
        let file = qs[0].file.as_ref().unwrap();
        assert_eq!(file.max_files, None);
        assert_ne!(file.max_files, Some(UNLIMITED_FILES));
    }

    #[test]
    fn non_numeric_size_ignored() {
        let body = "  question id=\"f\" type=\"file\" {\n    \"max-file-size\" \"big\"\n  }\n";
        let qs = decode(&wrap(body)).unwrap();
        assert!(qs[0].file.is_none());
    }

    #[test]
    fn validations_with_email() {
        let body = r#"  question id="t" type="input" {
    validations email {
      regex "^\\d+$"
      "min-chars" 1
      "max-chars" 9
    }
  }
"#;
        let qs = decode(&wrap(body)).unwrap();
        let rules = qs[0].validations.as_ref().unwrap();
        assert!(rules.email);
        assert_eq!(rules.regex.as_deref(), Some(r"^\d+$"));
        assert_eq!(rules.min_chars, Some(1));
        assert_eq!(rules.max_chars, Some(9));
    }

    #[test]
    fn numeric_strings_coerced() {
        let body = "  question id=1 type=\"input\" {\n    title 42\n  }\n";
        let qs = decode(&wrap(body)).unwrap();
        assert_eq!(qs[0].id.as_str(), "1");
        assert_eq!(qs[0].title, "42");
    }

    #[test]
    fn version_read_from_document() {
        let doc = decode_document("form {\n  version 3\n}\n").unwrap();
        assert_eq!(doc.version, 3);

        let doc = decode_document("form { }").unwrap();
        assert_eq!(doc.version, FORMAT_VERSION);
    }

    #[test]
    fn unknown_nodes_skipped() {
        let body = "  note \"ignored\"\n  question id=\"a\" {\n    colour \"red\"\n    title \"A\"\n  }\n";
        let qs = decode(&wrap(body)).unwrap();
        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].title, "A");
    }

    #[test]
    fn deeply_nested_text_is_malformed() {
        let depth = 100_000;
        let text = format!("form {{ {}{} }}", "a {".repeat(depth), "}".repeat(depth));
        let err = decode(&text).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedDocument { line: 1, .. }));
    }
}
