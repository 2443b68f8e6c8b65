//! Scripted respondent for filling in forms without user interaction.
//!
//! `ScriptedRespondent` holds pre-defined answers keyed by question identity
//! and replays them against a question list, the way a respondent would see
//! it: answers to hidden questions are dropped, and every visible required
//! question must be answered.
//!
//! # Example
//!
//! ```rust
//! use branchform::{Question, QuestionKind, ScriptedRespondent};
//!
//! let questions = vec![
//!     Question::new("Any pets?", QuestionKind::single_choice(["yes", "no"]))
//!         .with_branch(0, 1usize),
//!     Question::new("Pet name", QuestionKind::ShortAnswer)
//!         .with_parent(0usize, 0)
//!         .with_required(true),
//! ];
//!
//! let responses = ScriptedRespondent::new()
//!     .with_option(0usize, 1)
//!     .with_text(1usize, "Rex")
//!     .collect(&questions)
//!     .unwrap();
//!
//! // "no" hides the pet name question, so its answer is not kept.
//! assert_eq!(responses.len(), 1);
//! ```

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::resolver::identity;
use crate::visibility::visible_questions;
use crate::{NumberQuestion, Question, QuestionKind, QuestionRef, ResponseValue, Responses};

/// A respondent that answers from a pre-configured script.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRespondent {
    answers: HashMap<QuestionRef, ResponseValue>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RespondentError {
    #[error("Missing answer for required question {0}")]
    MissingAnswer(QuestionRef),

    #[error("Answer for question {question} has wrong type: expected {expected}, got {actual}")]
    TypeMismatch {
        question: QuestionRef,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Answer for question {question} selects unknown option {option}")]
    UnknownOption { question: QuestionRef, option: usize },

    #[error("Answer {value} for question {question} is outside the allowed bounds")]
    OutOfBounds { question: QuestionRef, value: f64 },

    #[error("Answer for question {question} has a range that ends before it starts")]
    InvalidRange { question: QuestionRef },
}

impl ScriptedRespondent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an answer for the question with the given identity.
    pub fn with_answer(
        mut self,
        question: impl Into<QuestionRef>,
        value: impl Into<ResponseValue>,
    ) -> Self {
        self.answers.insert(question.into(), value.into());
        self
    }

    pub fn with_text(self, question: impl Into<QuestionRef>, text: impl Into<String>) -> Self {
        self.with_answer(question, ResponseValue::Text(text.into()))
    }

    pub fn with_number(self, question: impl Into<QuestionRef>, value: f64) -> Self {
        self.with_answer(question, ResponseValue::Number(value))
    }

    /// Add a single-choice answer.
    pub fn with_option(self, question: impl Into<QuestionRef>, option: usize) -> Self {
        self.with_answer(question, ResponseValue::ChosenOption(option))
    }

    /// Add a multiple-choice answer.
    pub fn with_options(self, question: impl Into<QuestionRef>, options: Vec<usize>) -> Self {
        self.with_answer(question, ResponseValue::ChosenOptions(options))
    }

    /// Answer the visible questions of `questions` from the script.
    ///
    /// Answers are checked against the question kind. Answers to questions the
    /// respondent cannot see are left out of the result.
    #[instrument(level = "debug", skip_all, fields(questions = questions.len()))]
    pub fn collect(&self, questions: &[Question]) -> Result<Responses, RespondentError> {
        let mut scripted = Responses::new();
        for (index, question) in questions.iter().enumerate() {
            let reference = identity(question, index);
            if let Some(answer) = self.answers.get(&reference) {
                scripted.insert(reference, answer.clone());
            }
        }

        // Visibility depends on the answers themselves, so it is evaluated
        // against the full script before anything is dropped.
        let visible = visible_questions(questions, &scripted);
        let mut responses = Responses::new();

        for (index, question) in questions.iter().enumerate() {
            let reference = identity(question, index);
            if !visible[index] {
                if scripted.contains(&reference) {
                    debug!(question = %reference, "dropping answer to hidden question");
                }
                continue;
            }

            match scripted.remove(&reference) {
                Some(answer) if !answer.is_blank() => {
                    check_answer(question.kind(), &reference, &answer)?;
                    responses.insert(reference, answer);
                }
                _ if question.is_required() => {
                    return Err(RespondentError::MissingAnswer(reference));
                }
                Some(blank) => responses.insert(reference, blank),
                None => {}
            }
        }

        Ok(responses)
    }
}

fn check_answer(
    kind: &QuestionKind,
    question: &QuestionRef,
    answer: &ResponseValue,
) -> Result<(), RespondentError> {
    let mismatch = |expected| RespondentError::TypeMismatch {
        question: question.clone(),
        expected,
        actual: answer.type_name(),
    };

    match (kind, answer) {
        (QuestionKind::ShortAnswer | QuestionKind::Paragraph, ResponseValue::Text(_)) => Ok(()),
        (QuestionKind::ShortAnswer | QuestionKind::Paragraph, _) => Err(mismatch("Text")),

        (QuestionKind::Number(bounds), ResponseValue::Number(value)) => {
            check_bounds(bounds, question, *value)
        }
        (QuestionKind::Number(_), _) => Err(mismatch("Number")),

        (QuestionKind::NumberRange(bounds), ResponseValue::NumberRange(start, end)) => {
            check_bounds(bounds, question, *start)?;
            check_bounds(bounds, question, *end)?;
            if start > end {
                return Err(RespondentError::InvalidRange {
                    question: question.clone(),
                });
            }
            Ok(())
        }
        (QuestionKind::NumberRange(_), _) => Err(mismatch("NumberRange")),

        (QuestionKind::Date, ResponseValue::Date(_)) => Ok(()),
        (QuestionKind::Date, _) => Err(mismatch("Date")),

        // ISO-8601 dates order lexically.
        (QuestionKind::DateRange, ResponseValue::DateRange(start, end)) if start > end => {
            Err(RespondentError::InvalidRange {
                question: question.clone(),
            })
        }
        (QuestionKind::DateRange, ResponseValue::DateRange(..)) => Ok(()),
        (QuestionKind::DateRange, _) => Err(mismatch("DateRange")),

        (QuestionKind::SingleChoice(choice), ResponseValue::ChosenOption(option)) => {
            check_option(choice.has_option(*option), question, *option)
        }
        (QuestionKind::SingleChoice(_), _) => Err(mismatch("ChosenOption")),

        (QuestionKind::MultipleChoice(choice), ResponseValue::ChosenOptions(options)) => options
            .iter()
            .try_for_each(|option| check_option(choice.has_option(*option), question, *option)),
        (QuestionKind::MultipleChoice(_), _) => Err(mismatch("ChosenOptions")),
    }
}

fn check_bounds(
    bounds: &NumberQuestion,
    question: &QuestionRef,
    value: f64,
) -> Result<(), RespondentError> {
    if bounds.contains(value) {
        Ok(())
    } else {
        Err(RespondentError::OutOfBounds {
            question: question.clone(),
            value,
        })
    }
}

fn check_option(known: bool, question: &QuestionRef, option: usize) -> Result<(), RespondentError> {
    if known {
        Ok(())
    } else {
        Err(RespondentError::UnknownOption {
            question: question.clone(),
            option,
        })
    }
}
