//! Editing session
//!
//! [`FormSession`] owns the question list and metadata of one form while it
//! is edited. Mutations are total: an unknown id or an out-of-range index
//! leaves the state unchanged and returns `false` (or `None`).
//!
//! Option mutations rebuild the option list and go through
//! [`FormSession::update_question`], so they share its error-clearing rules.
//!
//! Observers registered with [`FormSession::subscribe`] are called whenever
//! the form's validity flips.

use crate::config::EditorConfig;
use crate::metadata::{FormMetadata, InitialForm, MetadataPatch, SavePayload};
use crate::patch::{OptionPatch, QuestionPatch};
use crate::validation::{self, FieldIssue};
use forms_schema::{
    decode, encode, FormOption, OptionId, Question, QuestionId, QuestionType, ValidationRules,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Session shared between host threads
pub type SharedSession = Arc<Mutex<FormSession>>;

/// Handle returned by [`FormSession::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(bool) + Send>;

/// Editing state of one form
pub struct FormSession {
    config: EditorConfig,
    metadata: FormMetadata,
    questions: Vec<Question>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    valid: bool,
}

impl FormSession {
    /// Empty form with configured defaults
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        let metadata = FormMetadata::from_config(&config);
        Self::with_parts(config, metadata, Vec::new())
    }

    /// Session over a stored form
    ///
    /// A structure that fails to decode is logged and the session starts
    /// with no questions.
    #[must_use]
    pub fn load(initial: &InitialForm, config: EditorConfig) -> Self {
        let questions = match initial.structure.as_deref() {
            Some(text) => decode(text).unwrap_or_else(|e| {
                tracing::error!(error = %e, "failed to decode form structure, starting empty");
                Vec::new()
            }),
            None => Vec::new(),
        };
        Self::from_decoded(initial, questions, config)
    }

    /// Session over a stored form whose structure the host already decoded
    ///
    /// `initial.structure` is ignored; `questions` are used as given.
    #[must_use]
    pub fn from_decoded(initial: &InitialForm, questions: Vec<Question>, config: EditorConfig) -> Self {
        let metadata = FormMetadata::from_initial(initial, &config);
        tracing::debug!(questions = questions.len(), "loaded form session");
        Self::with_parts(config, metadata, questions)
    }

    fn with_parts(config: EditorConfig, metadata: FormMetadata, questions: Vec<Question>) -> Self {
        let valid = validation::is_valid(&questions);
        Self {
            config,
            metadata,
            questions,
            observers: Vec::new(),
            next_subscription: 0,
            valid,
        }
    }

    /// Wrap for sharing across threads
    #[must_use]
    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    /// Editor configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Form metadata
    #[inline]
    #[must_use]
    pub fn metadata(&self) -> &FormMetadata {
        &self.metadata
    }

    /// Questions in form order
    #[inline]
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Question by id
    #[must_use]
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| &q.id == id)
    }

    fn position(&self, id: &QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| &q.id == id)
    }

    /// Append a question of the given type with its defaults
    pub fn add_question(&mut self, kind: QuestionType) -> QuestionId {
        let question = self.new_question(kind);
        let id = question.id.clone();
        tracing::debug!(question = %id, kind = %question.kind, "added question");
        self.questions.push(question);
        self.notify();
        id
    }

    fn new_question(&self, kind: QuestionType) -> Question {
        let mut question = Question::new(QuestionId::generate(), kind);
        if question.kind.is_choice() {
            question.options = (0..self.config.choice_option_count)
                .map(|_| FormOption::blank())
                .collect();
        } else if question.kind.is_text() {
            question.placeholder = Some(String::new());
            question.validations = Some(ValidationRules::default());
        } else if question.kind == QuestionType::File {
            question.file = Some(self.config.default_file_constraints());
        }
        question
    }

    /// Remove the first question with this id
    pub fn remove_question(&mut self, id: &QuestionId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.questions.remove(index);
        tracing::debug!(question = %id, index, "removed question");
        self.notify();
        true
    }

    /// Swap the question at `index` with the one before it
    pub fn move_question_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.questions.len() {
            return false;
        }
        self.questions.swap(index - 1, index);
        tracing::debug!(from = index, to = index - 1, "moved question");
        true
    }

    /// Swap the question at `index` with the one after it
    pub fn move_question_down(&mut self, index: usize) -> bool {
        if index >= self.questions.len().saturating_sub(1) {
            return false;
        }
        self.questions.swap(index, index + 1);
        tracing::debug!(from = index, to = index + 1, "moved question");
        true
    }

    /// Merge a patch into the first question with this id
    pub fn update_question(&mut self, id: &QuestionId, patch: QuestionPatch) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        patch.apply(&mut self.questions[index]);
        tracing::debug!(question = %id, "updated question");
        self.notify();
        true
    }

    /// Append a blank option to a question that takes options
    pub fn add_option(&mut self, question_id: &QuestionId) -> Option<OptionId> {
        let question = self.question(question_id).filter(|q| q.accepts_options())?;
        let option = FormOption::blank();
        let option_id = option.id.clone();

        let mut options = question.options.clone();
        options.push(option);
        self.update_question(question_id, QuestionPatch::new().options(options));
        Some(option_id)
    }

    /// Remove an option from a question
    pub fn remove_option(&mut self, question_id: &QuestionId, option_id: &OptionId) -> bool {
        let Some(question) = self.question(question_id) else {
            return false;
        };
        if question.option(option_id).is_none() {
            return false;
        }
        let options = question
            .options
            .iter()
            .filter(|o| &o.id != option_id)
            .cloned()
            .collect();
        self.update_question(question_id, QuestionPatch::new().options(options))
    }

    /// Merge a patch into every option of a question with this id
    pub fn update_option(
        &mut self,
        question_id: &QuestionId,
        option_id: &OptionId,
        patch: OptionPatch,
    ) -> bool {
        let Some(question) = self.question(question_id) else {
            return false;
        };
        if question.option(option_id).is_none() {
            return false;
        }
        let mut options = question.options.clone();
        for option in options.iter_mut().filter(|o| &o.id == option_id) {
            patch.clone().apply(option);
        }
        self.update_question(question_id, QuestionPatch::new().options(options))
    }

    /// Merge a patch into the form metadata
    pub fn update_form_data(&mut self, patch: MetadataPatch) {
        if patch.is_empty() {
            return;
        }
        self.metadata.apply(patch);
        tracing::debug!(title = %self.metadata.title, "updated form data");
    }

    /// Recompute every validation error; returns whether the form is valid
    pub fn validate_questions(&mut self) -> bool {
        validation::validate_all(&mut self.questions);
        tracing::debug!(errors = self.error_count(), "validated questions");
        self.notify();
        self.valid
    }

    /// No question or option carries an error
    #[must_use]
    pub fn is_form_valid(&self) -> bool {
        validation::is_valid(&self.questions)
    }

    /// Number of attached errors
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.issues().len()
    }

    /// Every attached error, in form order
    #[must_use]
    pub fn issues(&self) -> Vec<FieldIssue> {
        validation::issues(&self.questions)
    }

    /// Encoded question document
    #[must_use]
    pub fn encode_structure(&self) -> String {
        encode(&self.questions)
    }

    /// Metadata plus encoded structure, ready for the host
    #[must_use]
    pub fn save_payload(&self) -> SavePayload {
        SavePayload::new(&self.metadata, self.encode_structure())
    }

    /// Call `observer` with the new validity whenever it flips
    pub fn subscribe(&mut self, observer: impl FnMut(bool) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Drop an observer
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    fn notify(&mut self) {
        let valid = self.is_form_valid();
        if valid == self.valid {
            return;
        }
        self.valid = valid;
        for (_, observer) in &mut self.observers {
            observer(valid);
        }
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl std::fmt::Debug for FormSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSession")
            .field("metadata", &self.metadata)
            .field("questions", &self.questions.len())
            .field("observers", &self.observers.len())
            .field("valid", &self.valid)
            .finish()
    }
}
