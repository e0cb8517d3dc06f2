//! Partial updates of questions and options
//!
//! A patch names the fields it changes; everything else is kept. Applying a
//! patch that supplies a non-blank title (or label) also clears the error a
//! previous validation left on that question (or option).

use forms_schema::{FileConstraints, FormOption, Question, QuestionType, ValidationRules};

/// Partial update of a [`Question`]
///
/// Identity is not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionPatch {
    kind: Option<QuestionType>,
    title: Option<String>,
    required: Option<bool>,
    options: Option<Vec<FormOption>>,
    placeholder: Option<Option<String>>,
    validations: Option<Option<ValidationRules>>,
    file: Option<Option<FileConstraints>>,
}

impl QuestionPatch {
    /// Empty patch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the question type
    #[must_use]
    pub fn kind(mut self, kind: QuestionType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Change the title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Change whether an answer is required
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Replace the whole option list
    #[must_use]
    pub fn options(mut self, options: Vec<FormOption>) -> Self {
        self.options = Some(options);
        self
    }

    /// Set or clear the placeholder
    #[must_use]
    pub fn placeholder(mut self, placeholder: Option<String>) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Set or clear the validation rules
    #[must_use]
    pub fn validations(mut self, rules: Option<ValidationRules>) -> Self {
        self.validations = Some(rules);
        self
    }

    /// Set or clear the file constraints
    #[must_use]
    pub fn file(mut self, file: Option<FileConstraints>) -> Self {
        self.file = Some(file);
        self
    }

    /// Whether the patch changes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn apply(self, question: &mut Question) {
        if let Some(kind) = self.kind {
            question.kind = kind;
        }
        if let Some(title) = self.title {
            if !title.trim().is_empty() {
                question.error = None;
            }
            question.title = title;
        }
        if let Some(required) = self.required {
            question.required = required;
        }
        if let Some(options) = self.options {
            question.options = options;
        }
        if let Some(placeholder) = self.placeholder {
            question.placeholder = placeholder;
        }
        if let Some(rules) = self.validations {
            question.validations = rules;
        }
        if let Some(file) = self.file {
            question.file = file;
        }
    }
}

/// Partial update of a [`FormOption`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionPatch {
    value: Option<String>,
    label: Option<String>,
}

impl OptionPatch {
    /// Empty patch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the value
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Change the label
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub(crate) fn apply(self, option: &mut FormOption) {
        if let Some(value) = self.value {
            option.value = value;
        }
        if let Some(label) = self.label {
            if !label.trim().is_empty() {
                option.error = None;
            }
            option.label = label;
        }
    }
}
