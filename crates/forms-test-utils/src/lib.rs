//! Testing utilities for the Formkit workspace
//!
//! Shared fixtures, proptest strategies and round-trip assertions.

#![allow(missing_docs)]

use forms_schema::{
    FileConstraints, FormOption, OptionId, Question, QuestionId, QuestionType, ValidationRules,
    UNLIMITED_FILES,
};
use proptest::prelude::*;

/// Document exercising every construct the encoder writes
pub const SAMPLE_DOCUMENT: &str = r#"form {
  version 1
  question id="name" type="input" required {
    title "Full name"
    placeholder "Jane \"JD\" Doe"
    validations {
      regex "^[A-Za-z \\-]+$"
      "min-chars" 2
      "max-chars" 80
    }
  }
  question id="contact" type="input" {
    title "Email"
    validations email {
    }
  }
  question id="colour" type="radio" required {
    title "Favourite colour"
    option value="red" label="Red"
    option value="blue" label="Blue"
  }
  question id="cv" type="file" {
    title "Upload CV"
    "max-file-size" 5 mb
    "max-files" 2
    "allowed-types" ".pdf" ".docx"
  }
  question id="when" type="date" {
    title "Start date"
  }
}
"#;

/// Legacy document: aliased types and options without ids
pub const LEGACY_DOCUMENT: &str = r#"form {
  version 1
  question id="q1" type="multiple_choice" {
    title "Pick one"
    option value="x" label="X"
    option value="x" label="X again"
    option value="" label="Blank value"
  }
  question id="q2" type="text" {
    title "Say something"
  }
}
"#;

pub fn option(value: &str, label: &str) -> FormOption {
    FormOption::new(OptionId::generate(), value, label)
}

pub fn choice_question(kind: QuestionType, title: &str, labels: &[&str]) -> Question {
    Question::new(QuestionId::generate(), kind)
        .with_title(title)
        .with_options(labels.iter().map(|l| option(&l.to_lowercase(), l)).collect())
}

pub fn text_question(title: &str) -> Question {
    Question::new(QuestionId::generate(), QuestionType::Input)
        .with_title(title)
        .with_placeholder("")
        .with_validations(ValidationRules::default())
}

pub fn file_question(title: &str) -> Question {
    Question::new(QuestionId::generate(), QuestionType::File)
        .with_title(title)
        .with_file(FileConstraints::new(10.0, UNLIMITED_FILES, Vec::new()))
}

/// Everything the document format preserves about a question
///
/// Identity and validation errors are not part of the shape; defaults the
/// encoder leaves out compare equal to their absence.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionShape {
    pub kind: QuestionType,
    pub title: String,
    pub required: bool,
    pub placeholder: Option<String>,
    pub options: Vec<(String, String)>,
    pub max_file_size: Option<f64>,
    pub max_files: Option<i64>,
    pub allowed_types: Vec<String>,
    pub validations: Option<ValidationRules>,
}

impl QuestionShape {
    pub fn of(q: &Question) -> Self {
        let file = q.file.clone().unwrap_or_default();
        Self {
            kind: q.kind.clone(),
            title: q.title.clone(),
            required: q.required,
            placeholder: q.placeholder.clone().filter(|p| !p.is_empty()),
            options: q
                .options
                .iter()
                .map(|o| (o.value.clone(), o.label.clone()))
                .collect(),
            max_file_size: file.effective_max_file_size(),
            max_files: file.effective_max_files(),
            allowed_types: file.allowed_types,
            validations: q
                .validations
                .clone()
                .filter(ValidationRules::is_active)
                .map(|v| ValidationRules {
                    max_chars: v.max_chars.filter(|n| *n != 0),
                    min_chars: v.min_chars.filter(|n| *n != 0),
                    regex: v.regex.filter(|r| !r.is_empty()),
                    email: v.email,
                }),
        }
    }
}

pub fn shapes(questions: &[Question]) -> Vec<QuestionShape> {
    questions.iter().map(QuestionShape::of).collect()
}

/// Assert two question lists agree on everything the format preserves
pub fn assert_same_form(left: &[Question], right: &[Question]) {
    pretty_assertions::assert_eq!(shapes(left), shapes(right));
}

/// Short text including the characters escaping has to handle
pub fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,12}",
        "[a-z\"\\\\ ]{0,12}",
        any::<String>(),
    ]
}

pub fn arb_question_type() -> impl Strategy<Value = QuestionType> {
    prop_oneof![
        Just(QuestionType::Input),
        Just(QuestionType::Textarea),
        Just(QuestionType::Radio),
        Just(QuestionType::Checkbox),
        Just(QuestionType::File),
        Just(QuestionType::Select),
        Just(QuestionType::Date),
    ]
}
