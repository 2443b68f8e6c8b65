use serde::{Deserialize, Serialize};

use crate::{Question, QuestionKind};

/// Settings for questions created by structural edits.
///
/// Fields missing from a deserialized config fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Kind of a question created by Append.
    pub new_question_kind: QuestionKind,

    /// Kind of a question created by Add-condition.
    pub condition_question_kind: QuestionKind,

    /// Title given to new questions.
    pub new_question_title: String,

    /// Whether new questions start out required.
    pub required_by_default: bool,
}

impl EditorConfig {
    /// A fresh question for Append.
    pub fn new_question(&self) -> Question {
        Question::new(self.new_question_title.clone(), self.new_question_kind.clone())
            .with_required(self.required_by_default)
    }

    /// A fresh question for Add-condition.
    pub fn new_condition_question(&self) -> Question {
        Question::new(
            self.new_question_title.clone(),
            self.condition_question_kind.clone(),
        )
        .with_required(self.required_by_default)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            new_question_kind: QuestionKind::ShortAnswer,
            condition_question_kind: QuestionKind::ShortAnswer,
            new_question_title: String::new(),
            required_by_default: false,
        }
    }
}
