//! Structural checks of the conditional question graph.
//!
//! All checks run to completion and every violation is collected; nothing is
//! returned as `Err`. Run before a manual save and before an autosave commit.

use std::collections::HashSet;

use tracing::{instrument, warn};

use crate::resolver::{canonical, identity, resolve};
use crate::{FormDefinition, Question, QuestionRef};

/// A violation that blocks a save.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StructureError {
    #[error("Question {position}: Condition questions are only allowed for choice-type questions")]
    IneligibleKind { position: usize, kind: &'static str },

    #[error("Question {position}: Condition {condition} references non-existent option key: {key}")]
    UnknownOptionKey {
        position: usize,
        condition: usize,
        key: usize,
    },

    #[error("Question {position}: Option {option} has more than one condition")]
    DuplicateOptionBranch { position: usize, option: usize },

    #[error("Question {position}: Condition {condition} references missing question {target}")]
    MissingTarget {
        position: usize,
        condition: usize,
        target: QuestionRef,
    },

    #[error("Question {position}: Condition {condition} target {target} has no parent link")]
    MissingParentLink {
        position: usize,
        condition: usize,
        target: QuestionRef,
    },

    #[error(
        "Question {position}: Condition {condition} target {target} parent id mismatch (expected {expected}, found {found})"
    )]
    ParentMismatch {
        position: usize,
        condition: usize,
        target: QuestionRef,
        expected: QuestionRef,
        found: QuestionRef,
    },

    #[error(
        "Question {position}: Condition {condition} target {target} option index mismatch (expected {expected}, found {found})"
    )]
    OptionIndexMismatch {
        position: usize,
        condition: usize,
        target: QuestionRef,
        expected: usize,
        found: usize,
    },

    #[error("Circular dependency detected involving question {question}")]
    CircularDependency { question: QuestionRef },
}

/// An advisory finding that never blocks a save.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StructureWarning {
    #[error("Question {position} has a parent link with an empty parent reference")]
    OrphanedParentLink { position: usize },

    #[error("Question {position} has a parent link to question {parent}, which is not in the list")]
    DanglingParentLink { position: usize, parent: QuestionRef },
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub errors: Vec<StructureError>,
    pub warnings: Vec<StructureWarning>,
}

impl ValidationReport {
    /// Warnings never affect validity.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

/// Check a page-scoped question list for conditional-structure violations.
#[instrument(level = "debug", skip_all, fields(questions = questions.len()))]
pub fn validate(questions: &[Question]) -> ValidationReport {
    let mut report = ValidationReport::default();

    for (position, question) in questions.iter().enumerate() {
        check_branches(questions, position, question, &mut report.errors);
        check_parent_link(questions, position, question, &mut report.warnings);
    }
    detect_cycles(questions, &mut report.errors);

    if !report.is_valid() {
        warn!(
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "conditional structure is invalid"
        );
    }
    report
}

/// Validate every page of a form. Reports are returned in page order.
pub fn validate_form(form: &FormDefinition) -> Vec<ValidationReport> {
    form.pages()
        .iter()
        .map(|page| validate(page.questions()))
        .collect()
}

fn check_branches(
    questions: &[Question],
    position: usize,
    question: &Question,
    errors: &mut Vec<StructureError>,
) {
    if !question.has_branches() {
        return;
    }

    let eligible = question.kind().is_choice();
    if !eligible {
        errors.push(StructureError::IneligibleKind {
            position,
            kind: question.kind().name(),
        });
    }

    let own_identity = identity(question, position);
    let mut seen_options = HashSet::new();

    for (condition, branch) in question.conditional_branches().iter().enumerate() {
        if !seen_options.insert(branch.option_index) {
            errors.push(StructureError::DuplicateOptionBranch {
                position,
                option: branch.option_index,
            });
        }
        if eligible
            && !question
                .options()
                .iter()
                .any(|option| option.index == branch.option_index)
        {
            errors.push(StructureError::UnknownOptionKey {
                position,
                condition,
                key: branch.option_index,
            });
        }

        let Some(target_index) = resolve(questions, &branch.target) else {
            errors.push(StructureError::MissingTarget {
                position,
                condition,
                target: branch.target.clone(),
            });
            continue;
        };
        let target = &questions[target_index];

        let Some(link) = target.parent_link() else {
            errors.push(StructureError::MissingParentLink {
                position,
                condition,
                target: branch.target.clone(),
            });
            continue;
        };

        let found = canonical(questions, &link.parent).unwrap_or_else(|| link.parent.clone());
        if found != own_identity {
            errors.push(StructureError::ParentMismatch {
                position,
                condition,
                target: branch.target.clone(),
                expected: own_identity.clone(),
                found,
            });
        }
        if link.option_index != branch.option_index {
            errors.push(StructureError::OptionIndexMismatch {
                position,
                condition,
                target: branch.target.clone(),
                expected: branch.option_index,
                found: link.option_index,
            });
        }
    }
}

fn check_parent_link(
    questions: &[Question],
    position: usize,
    question: &Question,
    warnings: &mut Vec<StructureWarning>,
) {
    let Some(link) = question.parent_link() else {
        return;
    };
    if link.parent.is_blank() {
        warnings.push(StructureWarning::OrphanedParentLink { position });
    } else if resolve(questions, &link.parent).is_none() {
        warnings.push(StructureWarning::DanglingParentLink {
            position,
            parent: link.parent.clone(),
        });
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

fn detect_cycles(questions: &[Question], errors: &mut Vec<StructureError>) {
    let edges: Vec<Vec<usize>> = questions
        .iter()
        .map(|question| {
            question
                .conditional_branches()
                .iter()
                .filter_map(|branch| resolve(questions, &branch.target))
                .collect()
        })
        .collect();

    let mut marks = vec![Mark::Unvisited; questions.len()];
    let mut reported = vec![false; questions.len()];

    for start in 0..questions.len() {
        if marks[start] != Mark::Unvisited {
            continue;
        }
        // Each frame is a node and the index of its next outgoing edge.
        let mut stack = vec![(start, 0)];
        marks[start] = Mark::OnStack;

        while let Some((node, edge)) = stack.last_mut() {
            let Some(&next) = edges[*node].get(*edge) else {
                marks[*node] = Mark::Done;
                stack.pop();
                continue;
            };
            *edge += 1;
            match marks[next] {
                Mark::OnStack => reported[next] = true,
                Mark::Unvisited => {
                    marks[next] = Mark::OnStack;
                    stack.push((next, 0));
                }
                Mark::Done => {}
            }
        }
    }

    for (index, _) in reported.iter().enumerate().filter(|(_, hit)| **hit) {
        errors.push(StructureError::CircularDependency {
            question: identity(&questions[index], index),
        });
    }
}
