//! # branchform
//!
//! The conditional question graph behind a form and quiz builder.
//!
//! Questions live in a flat, page-scoped list. A choice question can reveal
//! other questions when a given option is picked; the revealed question points
//! back at its parent. This crate keeps those links consistent while the list
//! is edited, validates them before a save, numbers questions hierarchically
//! for display, and evaluates them against a respondent's answers.
//!
//! ## Usage
//!
//! ```rust
//! use branchform::{QuestionEditor, QuestionKind, Question, numbering, validate};
//!
//! let editor = QuestionEditor::default();
//! let questions = vec![
//!     Question::new("Do you own a pet?", QuestionKind::single_choice(["yes", "no"])),
//!     Question::new("Email", QuestionKind::ShortAnswer),
//! ];
//!
//! // Picking "yes" reveals a follow-up question, inserted right after.
//! let questions = editor.add_condition(&questions, 0, 0).unwrap();
//! assert!(validate(&questions).is_valid());
//!
//! let labels = numbering::compute_labels(&questions, 0);
//! assert_eq!(labels, vec!["1", "1.1", "2"]);
//! ```
//!
//! ## Addressing
//!
//! Questions gain a persisted id only when first saved. Until then they are
//! addressed by position. [`QuestionRef`] covers both forms and every module
//! resolves references through [`resolver`], so saved and unsaved questions
//! can be mixed freely in one list.
//!
//! ## Modules
//!
//! - [`resolver`] - identity tokens and reference resolution
//! - [`validator`] - structural checks run before a save
//! - [`compat`] - snapshot comparison for autosave
//! - [`mutation`] - link-preserving edits
//! - [`numbering`] - dotted display labels
//! - [`visibility`] - which questions a respondent sees
//! - [`respondent`] - scripted answering for tests and previews
//! - [`scoring`] - quiz scoring
//! - [`persist`] - the storage payload boundary

// Re-export all types from branchform-types
pub use branchform_types::*;

pub mod compat;
pub mod mutation;
pub mod numbering;
pub mod persist;
pub mod resolver;
pub mod respondent;
pub mod scoring;
pub mod validator;
pub mod visibility;

pub use compat::{CompatError, CompatReport, compare};
pub use mutation::{QuestionEditor, RemovalMode};
pub use persist::PersistError;
pub use respondent::{RespondentError, ScriptedRespondent};
pub use scoring::{QuestionScore, ScoreOutcome, ScoreReport, score};
pub use validator::{StructureError, StructureWarning, ValidationReport, validate, validate_form};
pub use visibility::visible_questions;
