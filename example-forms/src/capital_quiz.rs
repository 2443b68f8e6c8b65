use branchform_types::{ChoiceQuestion, Question, QuestionKind};

/// A scored quiz. The bonus question appears after a correct first answer.
pub fn capital_quiz() -> Vec<Question> {
    vec![
        Question::new(
            "Capital of France?",
            QuestionKind::SingleChoice(
                ChoiceQuestion::from_labels(["Lyon", "Paris", "Nice"]).mark_correct(1),
            ),
        )
        .with_branch(1, 1usize),
        Question::new(
            "Bonus: capital of Australia?",
            QuestionKind::SingleChoice(
                ChoiceQuestion::from_labels(["Sydney", "Canberra"]).mark_correct(1),
            ),
        )
        .with_position(1)
        .with_parent(0usize, 1),
        Question::new(
            "Which are Nordic capitals?",
            QuestionKind::MultipleChoice(
                ChoiceQuestion::from_labels(["Oslo", "Berlin", "Helsinki"])
                    .mark_correct(0)
                    .mark_correct(2),
            ),
        )
        .with_position(2),
        Question::new("Feedback", QuestionKind::Paragraph).with_position(3),
    ]
}
