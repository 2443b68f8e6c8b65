//! A saved survey: every question carries a persisted id.

use branchform_types::{Question, QuestionKind, QuestionRef};

/// Two saved questions: picking "cat" reveals a follow-up.
pub fn pet_survey() -> Vec<Question> {
    vec![
        Question::new(
            "Which pets do you have?",
            QuestionKind::multiple_choice(["Cat", "Dog"]),
        )
        .with_id("q1")
        .with_required(true)
        .with_branch(0, QuestionRef::persisted("q2")),
        Question::new(
            "Does your cat go outside?",
            QuestionKind::multiple_choice(["Yes", "No"]),
        )
        .with_id("q2")
        .with_position(1)
        .with_parent(QuestionRef::persisted("q1"), 0),
    ]
}
