//! Question validation
//!
//! A pass recomputes every error from scratch: stale errors are cleared
//! first, then titles, option labels and duplicate labels are checked.
//! Labels compare trimmed and case-insensitively; every member of a
//! duplicate group is flagged.

use forms_schema::{FieldError, Question, QuestionId};
use std::collections::HashMap;

/// Location of one validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Position of the question in the form
    pub question_index: usize,
    /// Identity of the question
    pub question_id: QuestionId,
    /// Position of the option, for option errors
    pub option_index: Option<usize>,
    /// The error
    pub error: FieldError,
}

/// Recompute errors of one question
pub fn validate_question(question: &mut Question) {
    question.error = question
        .title
        .trim()
        .is_empty()
        .then_some(FieldError::EmptyTitle);

    for option in &mut question.options {
        option.error = None;
    }
    if !question.kind.is_choice() {
        return;
    }

    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, option) in question.options.iter_mut().enumerate() {
        let label = option.label.trim();
        if label.is_empty() {
            option.error = Some(FieldError::EmptyOptionLabel);
        } else {
            groups.entry(label.to_lowercase()).or_default().push(i);
        }
    }

    for group in groups.values().filter(|g| g.len() > 1) {
        for &i in group {
            question.options[i].error = Some(FieldError::DuplicateOption);
        }
    }
}

/// Recompute errors of every question
pub fn validate_all(questions: &mut [Question]) {
    for question in questions {
        validate_question(question);
    }
}

/// No question or option carries an error
#[must_use]
pub fn is_valid(questions: &[Question]) -> bool {
    !questions.iter().any(Question::has_errors)
}

/// Every error currently attached, in form order
#[must_use]
pub fn issues(questions: &[Question]) -> Vec<FieldIssue> {
    let mut out = Vec::new();
    for (qi, q) in questions.iter().enumerate() {
        if let Some(error) = q.error {
            out.push(FieldIssue {
                question_index: qi,
                question_id: q.id.clone(),
                option_index: None,
                error,
            });
        }
        for (oi, o) in q.options.iter().enumerate() {
            if let Some(error) = o.error {
                out.push(FieldIssue {
                    question_index: qi,
                    question_id: q.id.clone(),
                    option_index: Some(oi),
                    error,
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use forms_schema::{FormOption, OptionId, QuestionType};

    fn radio(labels: &[&str]) -> Question {
        Question::new(QuestionId::from("q"), QuestionType::Radio)
            .with_title("Colour")
            .with_options(
                labels
                    .iter()
                    .enumerate()
                    .map(|(i, l)| FormOption::new(OptionId::new(i.to_string()), "", *l))
                    .collect(),
            )
    }

    fn errors(q: &Question) -> Vec<Option<FieldError>> {
        q.options.iter().map(|o| o.error).collect()
    }

    #[test]
    fn blank_title() {
        let mut q = radio(&["A"]).with_title("  \t");
        validate_question(&mut q);
        assert_eq!(q.error, Some(FieldError::EmptyTitle));
    }

    #[test]
    fn duplicates_flag_every_member() {
        let mut q = radio(&["Red", " red ", "Blue"]);
        validate_question(&mut q);
        assert_eq!(q.error, None);
        assert_eq!(
            errors(&q),
            vec![
                Some(FieldError::DuplicateOption),
                Some(FieldError::DuplicateOption),
                None
            ]
        );
    }

    #[test]
    fn blank_labels_are_not_duplicates() {
        let mut q = radio(&["", "  ", "x"]);
        validate_question(&mut q);
        assert_eq!(
            errors(&q),
            vec![
                Some(FieldError::EmptyOptionLabel),
                Some(FieldError::EmptyOptionLabel),
                None
            ]
        );
    }

    #[test]
    fn stale_errors_cleared() {
        let mut q = radio(&["A", "B"]);
        q.error = Some(FieldError::EmptyTitle);
        q.options[0].error = Some(FieldError::DuplicateOption);
        validate_question(&mut q);
        assert!(!q.has_errors());
    }

    #[test]
    fn options_ignored_on_text_questions() {
        let mut q = radio(&["", "dup", "dup"]);
        q.kind = QuestionType::Input;
        q.options[0].error = Some(FieldError::EmptyOptionLabel);
        validate_question(&mut q);
        assert!(!q.has_errors());
    }

    #[test]
    fn issues_in_form_order() {
        let mut qs = vec![radio(&["A", "a"]), radio(&["B"]).with_title("")];
        validate_all(&mut qs);
        assert!(!is_valid(&qs));

        let found = issues(&qs);
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].option_index, Some(0));
        assert_eq!(found[1].option_index, Some(1));
        assert_eq!((found[2].question_index, found[2].option_index), (1, None));
        assert_eq!(found[2].error, FieldError::EmptyTitle);
    }

    #[test]
    fn validation_is_idempotent() {
        let mut qs = vec![radio(&["x", "X", ""]), radio(&["ok"]).with_title(" ")];
        validate_all(&mut qs);
        let once = qs.clone();
        validate_all(&mut qs);
        assert_eq!(qs, once);
    }
}
