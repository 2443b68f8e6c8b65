//! Quiz scoring over the questions a respondent actually saw.

use serde::Serialize;

use crate::resolver::identity;
use crate::visibility::visible_questions;
use crate::{Question, QuestionKind, QuestionRef, ResponseValue, Responses};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreOutcome {
    Correct,
    Incorrect,
    Unanswered,
}

/// Outcome for one scored question.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionScore {
    pub question: QuestionRef,
    pub position: usize,
    pub outcome: ScoreOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreReport {
    pub questions: Vec<QuestionScore>,
}

impl ScoreReport {
    /// Number of correctly answered questions.
    pub fn earned(&self) -> usize {
        self.questions
            .iter()
            .filter(|score| score.outcome == ScoreOutcome::Correct)
            .count()
    }

    /// Number of scored questions.
    pub fn possible(&self) -> usize {
        self.questions.len()
    }

    /// Fraction answered correctly, 0 when nothing was scored.
    pub fn ratio(&self) -> f32 {
        if self.questions.is_empty() {
            0.0
        } else {
            self.earned() as f32 / self.possible() as f32
        }
    }
}

/// Score the visible choice questions that have at least one correct option.
///
/// A single-choice answer is correct when the chosen option is marked correct.
/// A multiple-choice answer is correct when exactly the correct options are
/// chosen.
pub fn score(questions: &[Question], responses: &Responses) -> ScoreReport {
    let visible = visible_questions(questions, responses);
    let scores = questions
        .iter()
        .enumerate()
        .filter(|(index, _)| visible[*index])
        .filter_map(|(index, question)| {
            let choice = question.kind().choice()?;
            let correct = choice.correct_indices();
            if correct.is_empty() {
                return None;
            }
            let reference = identity(question, index);
            let outcome = match responses.get(&reference) {
                None => ScoreOutcome::Unanswered,
                Some(answer) if is_correct(question.kind(), answer, &correct) => {
                    ScoreOutcome::Correct
                }
                Some(_) => ScoreOutcome::Incorrect,
            };
            Some(QuestionScore {
                question: reference,
                position: index,
                outcome,
            })
        })
        .collect();

    ScoreReport { questions: scores }
}

fn is_correct(kind: &QuestionKind, answer: &ResponseValue, correct: &[usize]) -> bool {
    match (kind, answer) {
        (QuestionKind::SingleChoice(_), ResponseValue::ChosenOption(chosen)) => {
            correct.contains(chosen)
        }
        (QuestionKind::MultipleChoice(_), ResponseValue::ChosenOptions(chosen)) => {
            let mut chosen = chosen.clone();
            chosen.sort_unstable();
            chosen.dedup();
            let mut expected = correct.to_vec();
            expected.sort_unstable();
            chosen == expected
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChoiceQuestion;

    fn quiz() -> Vec<Question> {
        vec![
            Question::new(
                "2 + 2",
                QuestionKind::SingleChoice(ChoiceQuestion::from_labels(["3", "4"]).mark_correct(1)),
            ),
            Question::new(
                "primes",
                QuestionKind::MultipleChoice(
                    ChoiceQuestion::from_labels(["2", "4", "5"])
                        .mark_correct(0)
                        .mark_correct(2),
                ),
            ),
            Question::new("comments", QuestionKind::Paragraph),
        ]
    }

    #[test]
    fn scores_choice_questions() {
        let mut responses = Responses::new();
        responses.insert(0usize, ResponseValue::ChosenOption(1));
        responses.insert(1usize, ResponseValue::ChosenOptions(vec![2, 0]));
        let report = score(&quiz(), &responses);
        assert_eq!(report.possible(), 2);
        assert_eq!(report.earned(), 2);
        assert_eq!(report.ratio(), 1.0);
    }

    #[test]
    fn partial_multi_select_is_incorrect() {
        let mut responses = Responses::new();
        responses.insert(1usize, ResponseValue::ChosenOptions(vec![0]));
        let report = score(&quiz(), &responses);
        let outcomes: Vec<_> = report.questions.iter().map(|s| s.outcome).collect();
        assert_eq!(
            outcomes,
            vec![ScoreOutcome::Unanswered, ScoreOutcome::Incorrect]
        );
        assert_eq!(report.ratio(), 0.0);
    }

    #[test]
    fn empty_report() {
        assert_eq!(ScoreReport::default().ratio(), 0.0);
    }
}
