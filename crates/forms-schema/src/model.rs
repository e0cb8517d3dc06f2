//! Form definition model
//!
//! Defines the in-memory shape every document decodes into:
//! - Question and option identities
//! - Question types (with legacy aliases)
//! - Options, validation rules and file constraints
//! - The versioned form document

use crate::error::{DecodeError, FieldError};
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Format version written by the encoder
pub const FORMAT_VERSION: u32 = 1;

/// `max-files` value meaning "no limit"
pub const UNLIMITED_FILES: i64 = -1;

/// Question identifier, unique within a form
///
/// Opaque: documents may carry any string. Fresh identifiers are ULIDs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Wrap an existing identifier
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh identifier
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Borrow as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier absent from the source document
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Option identifier, unique within its question
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionId(String);

impl OptionId {
    /// Wrap an existing identifier
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh identifier
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Borrow as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OptionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Question type
///
/// Unknown type names survive decoding as [`QuestionType::Other`] and are
/// written back unchanged; rejecting them is left to the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    /// Single-line text
    #[default]
    Input,
    /// Multi-line text
    Textarea,
    /// Single choice
    Radio,
    /// Multiple choice
    Checkbox,
    /// File upload
    File,
    /// Dropdown choice
    Select,
    /// Date picker
    Date,
    /// Unrecognized type name, kept verbatim
    Other(String),
}

impl QuestionType {
    /// Resolve a type name, applying the legacy alias table
    ///
    /// `multiple_choice` → `radio`, `text` → `input`.
    #[must_use]
    pub fn resolve(name: &str) -> Self {
        match name {
            "input" | "text" => Self::Input,
            "textarea" => Self::Textarea,
            "radio" | "multiple_choice" => Self::Radio,
            "checkbox" => Self::Checkbox,
            "file" => Self::File,
            "select" => Self::Select,
            "date" => Self::Date,
            other => Self::Other(other.to_string()),
        }
    }

    /// Canonical type name
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Input => "input",
            Self::Textarea => "textarea",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::File => "file",
            Self::Select => "select",
            Self::Date => "date",
            Self::Other(name) => name,
        }
    }

    /// Choice types carry an option list
    #[inline]
    #[must_use]
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Radio | Self::Checkbox | Self::Select)
    }

    /// Free-text types carry a placeholder and character rules
    #[inline]
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Input | Self::Textarea)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for QuestionType {
    fn from(name: String) -> Self {
        Self::resolve(&name)
    }
}

impl From<QuestionType> for String {
    fn from(kind: QuestionType) -> Self {
        match kind {
            QuestionType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// One selectable choice of a choice question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormOption {
    /// Stable identity across edits
    pub id: OptionId,
    /// Machine-oriented discriminator
    pub value: String,
    /// User-facing text
    pub label: String,
    /// Error from the last validation pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<FieldError>,
}

impl FormOption {
    /// Create option
    #[inline]
    #[must_use]
    pub fn new(id: OptionId, value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
            label: label.into(),
            error: None,
        }
    }

    /// Blank option with a fresh identifier
    #[inline]
    #[must_use]
    pub fn blank() -> Self {
        Self::new(OptionId::generate(), "", "")
    }
}

/// Text-answer validation rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ValidationRules {
    /// Maximum answer length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_chars: Option<u32>,
    /// Minimum answer length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_chars: Option<u32>,
    /// Pattern the answer must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    /// Answer must be an email address
    #[serde(default)]
    pub email: bool,
}

impl ValidationRules {
    /// Whether any rule would be written to a document
    ///
    /// Zero counts and an empty pattern count as unset.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.max_chars.is_some_and(|n| n != 0)
            || self.min_chars.is_some_and(|n| n != 0)
            || self.regex.as_deref().is_some_and(|r| !r.is_empty())
            || self.email
    }
}

/// Upload constraints of a file question
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FileConstraints {
    /// Per-file limit in megabytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<f64>,
    /// File count limit, [`UNLIMITED_FILES`] for none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_files: Option<i64>,
    /// Accepted extensions or MIME patterns
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_types: Vec<String>,
}

impl FileConstraints {
    /// Create constraints
    #[inline]
    #[must_use]
    pub fn new(max_file_size: f64, max_files: i64, allowed_types: Vec<String>) -> Self {
        Self {
            max_file_size: Some(max_file_size),
            max_files: Some(max_files),
            allowed_types,
        }
    }

    /// Size limit, if it would be written
    #[must_use]
    pub fn effective_max_file_size(&self) -> Option<f64> {
        self.max_file_size.filter(|n| *n != 0.0 && n.is_finite())
    }

    /// Count limit, if it would be written
    ///
    /// The unlimited marker is implicit and never written.
    #[must_use]
    pub fn effective_max_files(&self) -> Option<i64> {
        self.max_files.filter(|n| *n != 0 && *n != UNLIMITED_FILES)
    }

    /// Whether any constraint would be written to a document
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.effective_max_file_size().is_some()
            || self.effective_max_files().is_some()
            || !self.allowed_types.is_empty()
    }
}

/// One form field definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Identity within the form
    pub id: QuestionId,
    /// Field type
    #[serde(rename = "type")]
    pub kind: QuestionType,
    /// Question text
    pub title: String,
    /// Answer is mandatory
    pub required: bool,
    /// Choices, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FormOption>,
    /// Hint shown in empty text fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Text-answer rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validations: Option<ValidationRules>,
    /// Upload constraints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileConstraints>,
    /// Error from the last validation pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<FieldError>,
}

impl Question {
    /// Create a bare question: empty title, not required
    #[must_use]
    pub fn new(id: QuestionId, kind: QuestionType) -> Self {
        Self {
            id,
            kind,
            title: String::new(),
            required: false,
            options: Vec::new(),
            placeholder: None,
            validations: None,
            file: None,
            error: None,
        }
    }

    /// With title
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// With required flag
    #[inline]
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// With options
    #[inline]
    #[must_use]
    pub fn with_options(mut self, options: Vec<FormOption>) -> Self {
        self.options = options;
        self
    }

    /// With placeholder
    #[inline]
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// With validation rules
    #[inline]
    #[must_use]
    pub fn with_validations(mut self, rules: ValidationRules) -> Self {
        self.validations = Some(rules);
        self
    }

    /// With file constraints
    #[inline]
    #[must_use]
    pub fn with_file(mut self, file: FileConstraints) -> Self {
        self.file = Some(file);
        self
    }

    /// Find option by id
    #[must_use]
    pub fn option(&self, id: &OptionId) -> Option<&FormOption> {
        self.options.iter().find(|o| &o.id == id)
    }

    /// Whether options may be added to this question
    #[inline]
    #[must_use]
    pub fn accepts_options(&self) -> bool {
        self.kind.is_choice() || !self.options.is_empty()
    }

    /// Question or any of its options carries an error
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error.is_some() || self.options.iter().any(|o| o.error.is_some())
    }
}

/// Versioned, ordered question list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDocument {
    /// Format version tag
    pub version: u32,
    /// Questions in display order
    pub questions: Vec<Question>,
}

impl FormDocument {
    /// Create document at the current format version
    #[inline]
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            version: FORMAT_VERSION,
            questions,
        }
    }

    /// Decode from text
    pub fn parse(text: &str) -> Result<Self, DecodeError> {
        crate::decoder::decode_document(text)
    }

    /// Encode to text
    #[must_use]
    pub fn to_text(&self) -> String {
        crate::encoder::encode_document(self)
    }
}

impl Default for FormDocument {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_aliases_resolve() {
        assert_eq!(QuestionType::resolve("multiple_choice"), QuestionType::Radio);
        assert_eq!(QuestionType::resolve("text"), QuestionType::Input);
        assert_eq!(QuestionType::resolve("textarea"), QuestionType::Textarea);
    }

    #[test]
    fn unknown_type_kept_verbatim() {
        let kind = QuestionType::resolve("rating");
        assert_eq!(kind, QuestionType::Other("rating".to_string()));
        assert_eq!(kind.as_str(), "rating");
        assert!(!kind.is_choice());
    }

    #[test]
    fn question_type_serde_uses_names() {
        let json = serde_json::to_string(&QuestionType::Checkbox).unwrap();
        assert_eq!(json, "\"checkbox\"");

        let kind: QuestionType = serde_json::from_str("\"multiple_choice\"").unwrap();
        assert_eq!(kind, QuestionType::Radio);
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(QuestionId::generate(), QuestionId::generate());
        assert_ne!(OptionId::generate(), OptionId::generate());
    }

    #[test]
    fn file_constraints_activity() {
        assert!(!FileConstraints::default().is_active());
        assert!(!FileConstraints::new(0.0, UNLIMITED_FILES, vec![]).is_active());
        assert!(FileConstraints::new(10.0, UNLIMITED_FILES, vec![]).is_active());

        let only_types = FileConstraints {
            allowed_types: vec![".pdf".to_string()],
            ..FileConstraints::default()
        };
        assert!(only_types.is_active());
        assert_eq!(only_types.effective_max_files(), None);
    }

    #[test]
    fn validation_rules_activity() {
        assert!(!ValidationRules::default().is_active());

        let zero = ValidationRules {
            min_chars: Some(0),
            regex: Some(String::new()),
            ..ValidationRules::default()
        };
        assert!(!zero.is_active());

        let email = ValidationRules {
            email: true,
            ..ValidationRules::default()
        };
        assert!(email.is_active());
    }

    #[test]
    fn question_errors_include_options() {
        let mut q = Question::new(QuestionId::from("q1"), QuestionType::Radio)
            .with_options(vec![FormOption::blank(), FormOption::blank()]);
        assert!(!q.has_errors());

        q.options[1].error = Some(FieldError::EmptyOptionLabel);
        assert!(q.has_errors());
    }

    #[test]
    fn accepts_options_for_choice_or_populated() {
        let radio = Question::new(QuestionId::generate(), QuestionType::Radio);
        assert!(radio.accepts_options());

        let input = Question::new(QuestionId::generate(), QuestionType::Input);
        assert!(!input.accepts_options());

        let legacy = input.with_options(vec![FormOption::blank()]);
        assert!(legacy.accepts_options());
    }
}
