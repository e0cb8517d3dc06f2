//! Form Editor
//!
//! Editing-state engine for form definitions. A [`FormSession`] holds the
//! questions and metadata of one form and exposes the operations an editor
//! UI needs: add, remove, reorder and patch questions and options, validate,
//! and produce a save payload.
//!
//! # Example
//!
//! ```rust
//! use forms_editor::{EditorConfig, FormSession, OptionPatch, QuestionPatch};
//! use forms_schema::QuestionType;
//!
//! let mut session = FormSession::new(EditorConfig::default());
//! let q = session.add_question(QuestionType::Radio);
//! session.update_question(&q, QuestionPatch::new().title("Favourite colour"));
//!
//! let ids: Vec<_> = session.question(&q).unwrap().options.iter().map(|o| o.id.clone()).collect();
//! session.update_option(&q, &ids[0], OptionPatch::new().label("Red").value("red"));
//! session.update_option(&q, &ids[1], OptionPatch::new().label("Blue").value("blue"));
//!
//! assert!(session.validate_questions());
//! let payload = session.save_payload();
//! assert!(payload.structure.contains("label=\"Blue\""));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod metadata;
pub mod patch;
pub mod session;
pub mod validation;

pub use config::EditorConfig;
pub use error::{SessionError, SessionResult};
pub use metadata::{FormMetadata, InitialForm, MetadataPatch, SavePayload};
pub use patch::{OptionPatch, QuestionPatch};
pub use session::{FormSession, SharedSession, SubscriptionId};
pub use validation::FieldIssue;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for editing sessions
    pub use crate::config::EditorConfig;
    pub use crate::metadata::{InitialForm, MetadataPatch};
    pub use crate::patch::{OptionPatch, QuestionPatch};
    pub use crate::session::FormSession;
}
