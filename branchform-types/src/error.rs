use crate::QuestionRef;

/// Error type for structural edits of a question list.
///
/// These signal a caller contract violation (an edit that cannot apply to the
/// given list). The input list is left untouched whenever one is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MutationError {
    #[error("Question index {index} out of range (list has {len} questions)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Question {position} is a {kind} question and cannot carry conditions")]
    NotChoice { position: usize, kind: &'static str },

    #[error("Question {position} has no option with key {option}")]
    UnknownOption { position: usize, option: usize },

    #[error("Option {option} of question {position} already reveals question {target}")]
    ConditionExists {
        position: usize,
        option: usize,
        target: QuestionRef,
    },

    #[error("Option {option} of question {position} has no condition")]
    NoCondition { position: usize, option: usize },
}

impl MutationError {
    /// Create an out-of-range error.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Check if this error is about an index that does not exist.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }
}
