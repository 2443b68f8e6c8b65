//! Unsaved lists whose conditional links are all positional.

use branchform_types::{Question, QuestionKind};

/// Number of linked questions in [`deep_chain`] after the intro.
pub const DEEP_CHAIN_LEN: usize = 6;

fn yes_no(title: &str) -> Question {
    Question::new(title, QuestionKind::single_choice(["Yes", "No"]))
}

/// Six questions: 0 reveals 1, 2 and 3 stand alone, 4 reveals 5.
pub fn branching_quiz() -> Vec<Question> {
    let mut questions = vec![
        yes_no("Have you travelled abroad?").with_branch(0, 1usize),
        Question::new("Where did you go?", QuestionKind::ShortAnswer).with_parent(0usize, 0),
        Question::new("Your age", QuestionKind::Number(Default::default())),
        Question::new("Anything else?", QuestionKind::Paragraph),
        yes_no("Do you speak a second language?").with_branch(0, 5usize),
        Question::new("Which one?", QuestionKind::ShortAnswer).with_parent(4usize, 0),
    ];
    for (index, question) in questions.iter_mut().enumerate() {
        question.set_position(index);
    }
    questions
}

/// An intro question followed by a chain of [`DEEP_CHAIN_LEN`] questions,
/// each revealed by answering "Yes" to the one before.
pub fn deep_chain() -> Vec<Question> {
    let mut questions = vec![Question::new("Name", QuestionKind::ShortAnswer)];
    for level in 1..=DEEP_CHAIN_LEN {
        let mut question = yes_no(&format!("Level {level}"));
        if level > 1 {
            question = question.with_parent(level - 1, 0);
        }
        if level < DEEP_CHAIN_LEN {
            question = question.with_branch(0, level + 1);
        }
        questions.push(question.with_position(level));
    }
    questions
}
