use std::collections::HashMap;

use crate::{QuestionRef, ResponseValue};

/// Error type for response access operations.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("Missing response for question: {0}")]
    MissingAnswer(QuestionRef),

    #[error("Type mismatch for question '{question}': expected {expected}, got {actual}")]
    TypeMismatch {
        question: QuestionRef,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Answers submitted by one respondent.
///
/// Keyed by the identity token of each question: its persisted id once saved,
/// its position otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Responses {
    values: HashMap<QuestionRef, ResponseValue>,
}

impl Responses {
    /// Create a new empty responses collection.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Insert an answer for the given question.
    pub fn insert(&mut self, question: impl Into<QuestionRef>, value: impl Into<ResponseValue>) {
        self.values.insert(question.into(), value.into());
    }

    /// Get the answer for the given question.
    pub fn get(&self, question: &QuestionRef) -> Option<&ResponseValue> {
        self.values.get(question)
    }

    /// Check if an answer exists for the given question.
    pub fn contains(&self, question: &QuestionRef) -> bool {
        self.values.contains_key(question)
    }

    /// Remove the answer for the given question.
    pub fn remove(&mut self, question: &QuestionRef) -> Option<ResponseValue> {
        self.values.remove(question)
    }

    /// Get an iterator over all question-answer pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionRef, &ResponseValue)> {
        self.values.iter()
    }

    /// Get the number of answers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no answers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merge another responses collection into this one.
    pub fn extend(&mut self, other: Responses) {
        self.values.extend(other.values);
    }

    /// Get a text answer.
    pub fn get_text(&self, question: &QuestionRef) -> Result<&str, ResponseError> {
        match self.get(question) {
            Some(ResponseValue::Text(s)) => Ok(s),
            Some(other) => Err(ResponseError::TypeMismatch {
                question: question.clone(),
                expected: "Text",
                actual: other.type_name(),
            }),
            None => Err(ResponseError::MissingAnswer(question.clone())),
        }
    }

    /// Get a numeric answer.
    pub fn get_number(&self, question: &QuestionRef) -> Result<f64, ResponseError> {
        match self.get(question) {
            Some(ResponseValue::Number(n)) => Ok(*n),
            Some(other) => Err(ResponseError::TypeMismatch {
                question: question.clone(),
                expected: "Number",
                actual: other.type_name(),
            }),
            None => Err(ResponseError::MissingAnswer(question.clone())),
        }
    }

    /// Get a single-choice answer.
    pub fn get_chosen_option(&self, question: &QuestionRef) -> Result<usize, ResponseError> {
        match self.get(question) {
            Some(ResponseValue::ChosenOption(idx)) => Ok(*idx),
            Some(other) => Err(ResponseError::TypeMismatch {
                question: question.clone(),
                expected: "ChosenOption",
                actual: other.type_name(),
            }),
            None => Err(ResponseError::MissingAnswer(question.clone())),
        }
    }

    /// Get a multiple-choice answer.
    pub fn get_chosen_options(&self, question: &QuestionRef) -> Result<&[usize], ResponseError> {
        match self.get(question) {
            Some(ResponseValue::ChosenOptions(indices)) => Ok(indices),
            Some(other) => Err(ResponseError::TypeMismatch {
                question: question.clone(),
                expected: "ChosenOptions",
                actual: other.type_name(),
            }),
            None => Err(ResponseError::MissingAnswer(question.clone())),
        }
    }

    /// Check if the given question has a non-blank answer.
    pub fn has_value(&self, question: &QuestionRef) -> bool {
        self.get(question).is_some_and(|value| !value.is_blank())
    }
}

impl FromIterator<(QuestionRef, ResponseValue)> for Responses {
    fn from_iter<I: IntoIterator<Item = (QuestionRef, ResponseValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Responses {
    type Item = (QuestionRef, ResponseValue);
    type IntoIter = std::collections::hash_map::IntoIter<QuestionRef, ResponseValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Responses {
    type Item = (&'a QuestionRef, &'a ResponseValue);
    type IntoIter = std::collections::hash_map::Iter<'a, QuestionRef, ResponseValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
