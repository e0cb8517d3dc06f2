//! Form document encoder
//!
//! Serializes questions into the node-document text. Output is a pure
//! function of the question list: fields are written in a fixed order and
//! empty or default-valued fields are left out.

use crate::coerce::format_number;
use crate::escape::escape;
use crate::model::{FileConstraints, FormDocument, Question, ValidationRules, FORMAT_VERSION};

/// Encode questions as a document at the current format version
#[must_use]
pub fn encode(questions: &[Question]) -> String {
    write_document(FORMAT_VERSION, questions)
}

/// Encode a document, keeping its version tag
#[must_use]
pub fn encode_document(document: &FormDocument) -> String {
    write_document(document.version, &document.questions)
}

fn write_document(version: u32, questions: &[Question]) -> String {
    let mut out = String::from("form {\n");
    out.push_str(&format!("  version {version}\n"));
    for question in questions {
        write_question(&mut out, question);
    }
    out.push_str("}\n");

    tracing::debug!(questions = questions.len(), bytes = out.len(), "encoded form document");
    out
}

fn write_question(out: &mut String, q: &Question) {
    out.push_str(&format!(
        "  question id={} type={}{} {{\n",
        escape(q.id.as_str()),
        escape(q.kind.as_str()),
        if q.required { " required" } else { "" },
    ));
    out.push_str(&format!("    title {}\n", escape(&q.title)));

    if let Some(placeholder) = q.placeholder.as_deref().filter(|p| !p.is_empty()) {
        out.push_str(&format!("    placeholder {}\n", escape(placeholder)));
    }

    for option in &q.options {
        out.push_str(&format!(
            "    option value={} label={}\n",
            escape(&option.value),
            escape(&option.label),
        ));
    }

    if let Some(file) = q.file.as_ref().filter(|f| f.is_active()) {
        write_file_constraints(out, file);
    }

    if let Some(rules) = q.validations.as_ref().filter(|v| v.is_active()) {
        write_validations(out, rules);
    }

    out.push_str("  }\n");
}

fn write_file_constraints(out: &mut String, file: &FileConstraints) {
    if let Some(size) = file.effective_max_file_size() {
        out.push_str(&format!("    \"max-file-size\" {} mb\n", format_number(size)));
    }
    if let Some(count) = file.effective_max_files() {
        out.push_str(&format!("    \"max-files\" {count}\n"));
    }
    if !file.allowed_types.is_empty() {
        let types: Vec<String> = file.allowed_types.iter().map(|t| escape(t)).collect();
        out.push_str(&format!("    \"allowed-types\" {}\n", types.join(" ")));
    }
}

fn write_validations(out: &mut String, rules: &ValidationRules) {
    out.push_str("    validations ");
    if rules.email {
        out.push_str("email ");
    }
    out.push_str("{\n");

    if let Some(regex) = rules.regex.as_deref().filter(|r| !r.is_empty()) {
        out.push_str(&format!("      regex {}\n", escape(regex)));
    }
    if let Some(min) = rules.min_chars.filter(|n| *n != 0) {
        out.push_str(&format!("      \"min-chars\" {min}\n"));
    }
    if let Some(max) = rules.max_chars.filter(|n| *n != 0) {
        out.push_str(&format!("      \"max-chars\" {max}\n"));
    }

    out.push_str("    }\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FormOption, OptionId, QuestionId, QuestionType, UNLIMITED_FILES};

    #[test]
    fn empty_form() {
        assert_eq!(encode(&[]), "form {\n  version 1\n}\n");
    }

    #[test]
    fn choice_question_layout() {
        let q = Question::new(QuestionId::from("q1"), QuestionType::Radio)
            .with_title("Pick \"one\"")
            .with_required(true)
            .with_options(vec![
                FormOption::new(OptionId::from("a"), "a", "Alpha"),
                FormOption::new(OptionId::from("b"), "b", "Be\\ta"),
            ]);

        let expected = concat!(
            "form {\n",
            "  version 1\n",
            "  question id=\"q1\" type=\"radio\" required {\n",
            "    title \"Pick \\\"one\\\"\"\n",
            "    option value=\"a\" label=\"Alpha\"\n",
            "    option value=\"b\" label=\"Be\\\\ta\"\n",
            "  }\n",
            "}\n",
        );
        assert_eq!(encode(&[q]), expected);
    }

    #[test]
    fn empty_placeholder_omitted() {
        let q = Question::new(QuestionId::from("q"), QuestionType::Input).with_placeholder("");
        assert!(!encode(&[q]).contains("placeholder"));

        let q = Question::new(QuestionId::from("q"), QuestionType::Input).with_placeholder("Name");
        assert!(encode(&[q]).contains("    placeholder \"Name\"\n"));
    }

    #[test]
    fn unlimited_max_files_omitted() {
        let q = Question::new(QuestionId::from("f"), QuestionType::File)
            .with_file(FileConstraints::new(10.0, UNLIMITED_FILES, vec![]));
        let text = encode(&[q]);

        assert!(text.contains("    \"max-file-size\" 10 mb\n"));
        assert!(!text.contains("max-files"));
        assert!(!text.contains("allowed-types"));
    }

    #[test]
    fn file_constraints_written_in_order() {
        let q = Question::new(QuestionId::from("f"), QuestionType::File).with_file(
            FileConstraints::new(2.5, 3, vec![".pdf".to_string(), "image/*".to_string()]),
        );
        let text = encode(&[q]);

        let expected = concat!(
            "    \"max-file-size\" 2.5 mb\n",
            "    \"max-files\" 3\n",
            "    \"allowed-types\" \".pdf\" \"image/*\"\n",
        );
        assert!(text.contains(expected));
    }

    #[test]
    fn validations_block() {
        let rules = ValidationRules {
            max_chars: Some(100),
            min_chars: Some(2),
            regex: Some("^[a-z]+$".to_string()),
            email: true,
        };
        let q = Question::new(QuestionId::from("t"), QuestionType::Input).with_validations(rules);

        let expected = concat!(
            "    validations email {\n",
            "      regex \"^[a-z]+$\"\n",
            "      \"min-chars\" 2\n",
            "      \"max-chars\" 100\n",
            "    }\n",
        );
        assert!(encode(&[q]).contains(expected));
    }

    #[test]
    fn inactive_validations_omitted() {
        let q = Question::new(QuestionId::from("t"), QuestionType::Textarea)
            .with_validations(ValidationRules::default());
        assert!(!encode(&[q]).contains("validations"));
    }

    #[test]
    fn unknown_type_written_verbatim() {
        let q = Question::new(QuestionId::from("r"), QuestionType::resolve("rating"));
        assert!(encode(&[q]).contains("type=\"rating\""));
    }

    #[test]
    fn encoding_is_deterministic() {
        let qs = vec![
            Question::new(QuestionId::from("a"), QuestionType::Date).with_title("When"),
            Question::new(QuestionId::from("b"), QuestionType::Checkbox)
                .with_options(vec![FormOption::new(OptionId::from("x"), "x", "X")]),
        ];
        assert_eq!(encode(&qs), encode(&qs.clone()));
    }

    #[test]
    fn document_keeps_version() {
        let doc = FormDocument {
            version: 2,
            questions: Vec::new(),
        };
        assert_eq!(doc.to_text(), "form {\n  version 2\n}\n");
    }
}
