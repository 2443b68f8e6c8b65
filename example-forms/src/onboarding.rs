//! A two-page form mixing saved and unsaved questions.

use branchform_types::{FormDefinition, NumberQuestion, Question, QuestionKind, QuestionRef};

pub fn onboarding_form() -> FormDefinition {
    let about = vec![
        Question::new("Full name", QuestionKind::ShortAnswer)
            .with_id("name")
            .with_required(true),
        Question::new(
            "Employment status",
            QuestionKind::single_choice(["Employed", "Student", "Other"]),
        )
        .with_id("status")
        .with_position(1)
        .with_branch(0, QuestionRef::persisted("employer"))
        .with_branch(1, 3usize),
        Question::new("Employer", QuestionKind::ShortAnswer)
            .with_id("employer")
            .with_position(2)
            .with_parent(QuestionRef::persisted("status"), 0),
        // Added after the last save: still addressed by position.
        Question::new("School", QuestionKind::ShortAnswer)
            .with_position(3)
            .with_parent(QuestionRef::persisted("status"), 1),
    ];
    let preferences = vec![
        Question::new(
            "Weekly hours",
            QuestionKind::NumberRange(NumberQuestion::with_bounds(Some(0.0), Some(80.0))),
        ),
        Question::new("Start date", QuestionKind::Date).with_position(1),
    ];

    FormDefinition::new(about)
        .with_title("Onboarding")
        .with_page(preferences)
}
