//! Which questions a respondent sees, given the answers so far.

use crate::resolver::{identity, is_branch_target, resolve};
use crate::{Question, QuestionRef, Responses};

/// Visibility of each question, index-aligned with `questions`.
///
/// Questions that no branch points at are always visible. A revealed question
/// is visible when a visible parent has a branch to it and the parent's
/// answer selects that branch's option.
pub fn visible_questions(questions: &[Question], responses: &Responses) -> Vec<bool> {
    let mut visible = vec![false; questions.len()];
    let mut stack: Vec<usize> = (0..questions.len())
        .filter(|&index| !is_branch_target(questions, index))
        .collect();
    for &root in &stack {
        visible[root] = true;
    }

    while let Some(index) = stack.pop() {
        let Some(answer) = responses.get(&identity(&questions[index], index)) else {
            continue;
        };
        for branch in questions[index].conditional_branches() {
            if !answer.selects(branch.option_index) {
                continue;
            }
            if let Some(target) = resolve(questions, &branch.target)
                && !visible[target]
            {
                visible[target] = true;
                stack.push(target);
            }
        }
    }

    visible
}

/// Identity tokens of the visible questions, in position order.
pub fn visible_refs(questions: &[Question], responses: &Responses) -> Vec<QuestionRef> {
    visible_questions(questions, responses)
        .into_iter()
        .enumerate()
        .filter(|(_, visible)| *visible)
        .map(|(index, _)| identity(&questions[index], index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{QuestionKind, ResponseValue};

    fn questions() -> Vec<Question> {
        vec![
            Question::new("pets", QuestionKind::multiple_choice(["cat", "dog"]))
                .with_branch(0, 1usize)
                .with_branch(1, 2usize),
            Question::new("cat name", QuestionKind::single_choice(["Tom", "Other"]))
                .with_parent(0usize, 0)
                .with_branch(1, 3usize),
            Question::new("dog name", QuestionKind::ShortAnswer).with_parent(0usize, 1),
            Question::new("other cat name", QuestionKind::ShortAnswer).with_parent(1usize, 1),
            Question::new("email", QuestionKind::ShortAnswer),
        ]
    }

    #[test]
    fn unanswered_shows_roots_only() {
        let visible = visible_questions(&questions(), &Responses::new());
        assert_eq!(visible, vec![true, false, false, false, true]);
    }

    #[test]
    fn selected_option_reveals_chain() {
        let mut responses = Responses::new();
        responses.insert(0usize, ResponseValue::ChosenOptions(vec![0]));
        responses.insert(1usize, ResponseValue::ChosenOption(1));
        let visible = visible_questions(&questions(), &responses);
        assert_eq!(visible, vec![true, true, false, true, true]);
    }

    #[test]
    fn hidden_parent_answers_do_not_count() {
        let mut responses = Responses::new();
        responses.insert(0usize, ResponseValue::ChosenOptions(vec![1]));
        responses.insert(1usize, ResponseValue::ChosenOption(1));
        let refs = visible_refs(&questions(), &responses);
        assert_eq!(
            refs,
            vec![
                QuestionRef::positional(0),
                QuestionRef::positional(2),
                QuestionRef::positional(4)
            ]
        );
    }

    #[test]
    fn cycles_without_entry_stay_hidden() {
        let questions = vec![
            Question::new("a", QuestionKind::single_choice(["x"])).with_branch(0, 1usize),
            Question::new("b", QuestionKind::single_choice(["x"])).with_branch(0, 0usize),
        ];
        let mut responses = Responses::new();
        responses.insert(0usize, ResponseValue::ChosenOption(0));
        assert_eq!(visible_questions(&questions, &responses), vec![false, false]);
    }
}
