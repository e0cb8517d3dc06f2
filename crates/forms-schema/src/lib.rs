//! Form Schema
//!
//! The form definition model and the codec that persists it as a node
//! document.
//!
//! # Core Operations
//!
//! - **Decode**: Parse document text into an ordered list of [`Question`]s
//! - **Encode**: Serialize questions back to deterministic document text
//!
//! # Architecture
//!
//! ```text
//! text → syntax::parse → Document tree → decoder (coercion boundary) → Vec<Question>
//! Vec<Question> → encoder (escape) → text
//! ```
//!
//! # Example
//!
//! ```rust
//! use forms_schema::{decode, encode, QuestionType};
//!
//! let text = r#"form {
//!   version 1
//!   question id="q1" type="multiple_choice" required {
//!     title "Favourite colour"
//!     option value="red" label="Red"
//!   }
//! }
//! "#;
//!
//! let questions = decode(text)?;
//! assert_eq!(questions[0].kind, QuestionType::Radio);
//!
//! let again = encode(&questions);
//! assert!(again.contains("type=\"radio\" required"));
//! # Ok::<(), forms_schema::DecodeError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod coerce;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod escape;
pub mod model;
pub mod syntax;

// Re-exports for convenience
pub use decoder::{decode, decode_document, reconcile_option_id};
pub use encoder::{encode, encode_document};
pub use error::{DecodeError, DecodeResult, FieldError, SyntaxError};
pub use escape::escape;
pub use model::{
    FileConstraints, FormDocument, FormOption, OptionId, Question, QuestionId, QuestionType,
    ValidationRules, FORMAT_VERSION, UNLIMITED_FILES,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with form documents
    pub use crate::decoder::decode;
    pub use crate::encoder::encode;
    pub use crate::error::{DecodeError, FieldError};
    pub use crate::model::{
        FileConstraints, FormDocument, FormOption, OptionId, Question, QuestionId, QuestionType,
        ValidationRules,
    };
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn decode_then_encode_is_stable() {
        let text = concat!(
            "form {\n",
            "  version 1\n",
            "  question id=\"q1\" type=\"checkbox\" required {\n",
            "    title \"Toppings\"\n",
            "    option value=\"ham\" label=\"Ham\"\n",
            "    option value=\"egg\" label=\"Egg\"\n",
            "  }\n",
            "  question id=\"q2\" type=\"textarea\" {\n",
            "    title \"Comments\"\n",
            "    placeholder \"Say \\\"hi\\\"\"\n",
            "    validations {\n",
            "      \"max-chars\" 500\n",
            "    }\n",
            "  }\n",
            "}\n",
        );

        let questions = decode(text).unwrap();
        assert_eq!(encode(&questions), text);
    }

    #[test]
    fn document_roundtrip() {
        let doc = FormDocument::new(vec![Question::new(
            QuestionId::from("d"),
            QuestionType::Date,
        )
        .with_title("Birthday")]);

        let parsed = FormDocument::parse(&doc.to_text()).unwrap();
        assert_eq!(parsed, doc);
    }
}
