//! Uniform addressing of questions by persisted id or by position.
//!
//! Unsaved questions have no id, so every other module goes through these
//! functions instead of comparing ids or indices directly. A missing id is a
//! normal state, never an error.

use std::collections::HashSet;

use crate::{Question, QuestionRef};

/// The identity token of a question: its persisted id if it has one, otherwise
/// its position in the list.
pub fn identity(question: &Question, position: usize) -> QuestionRef {
    match question.id() {
        Some(id) if !id.is_empty() => QuestionRef::Persisted(id.clone()),
        _ => QuestionRef::Positional(position),
    }
}

/// The identity token of the question at `index`, if it exists.
pub fn identity_at(questions: &[Question], index: usize) -> Option<QuestionRef> {
    questions
        .get(index)
        .map(|question| identity(question, index))
}

/// Find the list index a reference points at.
pub fn resolve(questions: &[Question], reference: &QuestionRef) -> Option<usize> {
    match reference {
        QuestionRef::Persisted(id) if id.is_empty() => None,
        QuestionRef::Persisted(id) => questions
            .iter()
            .position(|question| question.id() == Some(id)),
        QuestionRef::Positional(index) => (*index < questions.len()).then_some(*index),
    }
}

/// Normalize a reference to the identity token of the question it points at.
///
/// A positional reference to a question that has since been saved comes back
/// as the persisted id.
pub fn canonical(questions: &[Question], reference: &QuestionRef) -> Option<QuestionRef> {
    resolve(questions, reference).and_then(|index| identity_at(questions, index))
}

/// The identity token of a question's parent.
///
/// Prefers the identity of the resolved parent; falls back to the reference
/// recorded in the link when the parent is not in the list.
pub fn parent_identity(questions: &[Question], question: &Question) -> Option<QuestionRef> {
    let link = question.parent_link()?;
    Some(canonical(questions, &link.parent).unwrap_or_else(|| link.parent.clone()))
}

/// List index of a question's parent, if its parent link resolves.
pub fn parent_index(questions: &[Question], question: &Question) -> Option<usize> {
    question
        .parent_link()
        .and_then(|link| resolve(questions, &link.parent))
}

/// Indices of the questions revealed by the question at `index`, in branch order.
///
/// Branches whose target cannot be resolved are skipped.
pub fn children(questions: &[Question], index: usize) -> Vec<usize> {
    questions
        .get(index)
        .map(|question| {
            question
                .conditional_branches()
                .iter()
                .filter_map(|branch| resolve(questions, &branch.target))
                .collect()
        })
        .unwrap_or_default()
}

/// All questions reachable from `index` through conditional branches, in
/// position order. The root itself is not included.
pub fn descendants(questions: &[Question], index: usize) -> Vec<usize> {
    let mut seen = HashSet::from([index]);
    let mut stack = children(questions, index);
    let mut found = Vec::new();

    while let Some(next) = stack.pop() {
        if !seen.insert(next) {
            continue;
        }
        found.push(next);
        stack.extend(children(questions, next));
    }

    found.sort_unstable();
    found
}

/// Check whether any branch in the list points at the question at `index`.
pub fn is_branch_target(questions: &[Question], index: usize) -> bool {
    questions.iter().any(|question| {
        question
            .conditional_branches()
            .iter()
            .any(|branch| resolve(questions, &branch.target) == Some(index))
    })
}
