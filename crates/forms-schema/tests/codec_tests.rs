use forms_schema::syntax::{self, Value};
use forms_schema::{
    decode, encode, escape, FileConstraints, FormOption, OptionId, Question, QuestionId,
    QuestionType, ValidationRules, UNLIMITED_FILES,
};
use forms_test_utils::{
    arb_question_type, arb_text, assert_same_form, LEGACY_DOCUMENT, SAMPLE_DOCUMENT,
};
use proptest::prelude::*;

fn literal_roundtrip(s: &str) -> String {
    let doc = syntax::parse(&format!("title {}", escape(s))).unwrap();
    match doc.nodes[0].first_value() {
        Some(Value::String(out)) => out.clone(),
        other => panic!("expected string, got {other:?}"),
    }
}

#[test]
fn escape_inverse_on_tricky_strings() {
    for s in ["a\"b\\c", "\\", "\"", "\\\"", "\"\\", "", "ends with \\", "multi\nline"] {
        assert_eq!(literal_roundtrip(s), s);
    }
}

#[test]
fn sample_document_is_canonical() {
    let questions = decode(SAMPLE_DOCUMENT).unwrap();
    assert_eq!(questions.len(), 5);
    assert_eq!(encode(&questions), SAMPLE_DOCUMENT);
}

#[test]
fn sample_document_fields() {
    let questions = decode(SAMPLE_DOCUMENT).unwrap();

    let name = &questions[0];
    assert!(name.required);
    assert_eq!(name.placeholder.as_deref(), Some("Jane \"JD\" Doe"));
    let rules = name.validations.as_ref().unwrap();
    assert_eq!(rules.regex.as_deref(), Some("^[A-Za-z \\-]+$"));
    assert_eq!((rules.min_chars, rules.max_chars), (Some(2), Some(80)));

    assert!(questions[1].validations.as_ref().unwrap().email);

    let colour = &questions[2];
    let ids: Vec<&str> = colour.options.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["red", "blue"]);

    let cv = questions[3].file.as_ref().unwrap();
    assert_eq!(cv.max_file_size, Some(5.0));
    assert_eq!(cv.max_files, Some(2));
    assert_eq!(cv.allowed_types, vec![".pdf", ".docx"]);

    assert_eq!(questions[4].kind, QuestionType::Date);
}

#[test]
fn legacy_document_normalizes() {
    let questions = decode(LEGACY_DOCUMENT).unwrap();
    assert_eq!(questions[0].kind, QuestionType::Radio);
    assert_eq!(questions[1].kind, QuestionType::Input);

    let ids: Vec<&str> = questions[0].options.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids[0], "x");
    assert_ne!(ids[1], "x");
    assert_ne!(ids[2], "");
    assert_ne!(ids[1], ids[2]);

    let text = encode(&questions);
    assert!(text.contains("type=\"radio\""));
    assert!(text.contains("type=\"input\""));
}

#[test]
fn unlimited_files_roundtrip_drops_marker() {
    let q = Question::new(QuestionId::from("f"), QuestionType::File)
        .with_title("Attachments")
        .with_file(FileConstraints::new(10.0, UNLIMITED_FILES, Vec::new()));

    let text = encode(&[q.clone()]);
    assert!(!text.contains("\"max-files\""));

    let decoded = decode(&text).unwrap();
    assert_eq!(decoded[0].file.as_ref().unwrap().max_files, None);
    assert_same_form(&[q], &decoded);
}

fn arb_question() -> impl Strategy<Value = Question> {
    (
        arb_question_type(),
        arb_text(),
        any::<bool>(),
        arb_text(),
        prop::collection::vec((arb_text(), arb_text()), 0..4),
        prop::option::of(1u32..500),
        prop::option::of(arb_text()),
        any::<bool>(),
        prop::option::of((1u32..100, -1i64..20)),
        prop::collection::vec(arb_text(), 0..3),
    )
        .prop_map(
            |(kind, title, required, placeholder, opts, max_chars, regex, email, file, types)| {
                let mut q = Question::new(QuestionId::generate(), kind)
                    .with_title(title)
                    .with_required(required)
                    .with_placeholder(placeholder)
                    .with_options(
                        opts.into_iter()
                            .map(|(v, l)| FormOption::new(OptionId::generate(), v, l))
                            .collect(),
                    )
                    .with_validations(ValidationRules {
                        max_chars,
                        min_chars: None,
                        regex,
                        email,
                    });
                if let Some((size, count)) = file {
                    q = q.with_file(FileConstraints::new(f64::from(size), count, types));
                }
                q
            },
        )
}

proptest! {
    #[test]
    fn prop_escape_is_inverted_by_parser(s in arb_text()) {
        prop_assert_eq!(literal_roundtrip(&s), s);
    }

    #[test]
    fn prop_roundtrip_preserves_shape(questions in prop::collection::vec(arb_question(), 0..5)) {
        let decoded = decode(&encode(&questions)).unwrap();
        prop_assert_eq!(decoded.len(), questions.len());
        assert_same_form(&questions, &decoded);
        for (original, back) in questions.iter().zip(&decoded) {
            prop_assert_eq!(&original.id, &back.id);
        }
    }

    #[test]
    fn prop_encoding_is_deterministic(questions in prop::collection::vec(arb_question(), 0..5)) {
        prop_assert_eq!(encode(&questions), encode(&questions));
    }
}
