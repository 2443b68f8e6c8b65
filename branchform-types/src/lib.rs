//! Core types for the branchform crate.
//!
//! This crate provides the plain data types of a conditional question list:
//! - `Question`, `QuestionKind` and `ConditionalBranch`/`ParentLink` - the graph nodes and edges
//! - `QuestionRef` - dual addressing by persisted id or by position
//! - `FormDefinition` - pages of page-scoped question lists
//! - `Responses` and `ResponseValue` - answers submitted by a respondent
//! - `EditorConfig` - settings for questions created by structural edits

mod question_ref;
pub use question_ref::{QuestionId, QuestionRef};

mod response_value;
pub use response_value::ResponseValue;

mod responses;
pub use responses::{ResponseError, Responses};

mod question;
pub use question::{
    ChoiceQuestion, ConditionalBranch, NumberQuestion, ParentLink, Question, QuestionKind,
    QuestionOption,
};

mod form_definition;
pub use form_definition::{FormDefinition, FormPage};

mod editor_config;
pub use editor_config::EditorConfig;

mod error;
pub use error::MutationError;
