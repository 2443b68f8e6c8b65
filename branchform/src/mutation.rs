//! Structural edits of a page-scoped question list.
//!
//! Every edit takes the current list by reference and returns a new list, so
//! it either applies completely or not at all. Afterwards each question's
//! position equals its index and every positional reference has been moved
//! along with the question it points at.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::resolver::{canonical, descendants, identity, resolve};
use crate::{ConditionalBranch, EditorConfig, MutationError, ParentLink, Question, QuestionId};

/// What happens to the revealed question when its condition goes away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalMode {
    /// Keep the question as a top-level question.
    #[default]
    Unlink,

    /// Remove the question from the list.
    Delete,
}

/// Applies structural edits, creating new questions from its [`EditorConfig`].
#[derive(Debug, Clone, Default)]
pub struct QuestionEditor {
    config: EditorConfig,
}

impl QuestionEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Add a new question at the end of the list.
    pub fn append(&self, questions: &[Question]) -> Vec<Question> {
        let mut result = questions.to_vec();
        result.push(self.config.new_question());
        reindex(&mut result);
        debug!(position = result.len() - 1, "appended question");
        result
    }

    /// Remove the question at `position`.
    ///
    /// Branches targeting it are removed, references past it shift down by one,
    /// and questions it revealed lose their parent link.
    pub fn delete(
        &self,
        questions: &[Question],
        position: usize,
    ) -> Result<Vec<Question>, MutationError> {
        check_index(questions, position)?;

        let removed_ids: HashSet<QuestionId> =
            questions[position].id().cloned().into_iter().collect();
        let mut result = questions.to_vec();
        result.remove(position);
        remap_refs(
            &mut result,
            |index| match index.cmp(&position) {
                std::cmp::Ordering::Less => Some(index),
                std::cmp::Ordering::Equal => None,
                std::cmp::Ordering::Greater => Some(index - 1),
            },
            &removed_ids,
        );
        reindex(&mut result);

        debug!(position, remaining = result.len(), "deleted question");
        Ok(result)
    }

    /// Attach a new conditional question to option `option` of the question at
    /// `position`.
    ///
    /// The new question is inserted right after its parent and its branch is
    /// placed first among the parent's branches.
    pub fn add_condition(
        &self,
        questions: &[Question],
        position: usize,
        option: usize,
    ) -> Result<Vec<Question>, MutationError> {
        check_index(questions, position)?;
        let parent = &questions[position];
        if !parent.kind().is_choice() {
            return Err(MutationError::NotChoice {
                position,
                kind: parent.kind().name(),
            });
        }
        if !parent.options().iter().any(|o| o.index == option) {
            return Err(MutationError::UnknownOption { position, option });
        }
        if let Some(existing) = parent.branch_for_option(option) {
            return Err(MutationError::ConditionExists {
                position,
                option,
                target: existing.target.clone(),
            });
        }

        let insert_at = position + 1;
        let mut result = questions.to_vec();
        remap_refs(
            &mut result,
            |index| Some(if index >= insert_at { index + 1 } else { index }),
            &HashSet::new(),
        );

        let parent_ref = identity(&result[position], position);
        let child = self
            .config
            .new_condition_question()
            .with_parent(parent_ref, option);
        result.insert(insert_at, child);
        result[position]
            .conditional_branches_mut()
            .insert(0, ConditionalBranch::new(option, insert_at));
        reindex(&mut result);

        debug!(position, option, child = insert_at, "added condition");
        Ok(result)
    }

    /// Detach the condition on option `option` of the question at `position`.
    pub fn remove_condition(
        &self,
        questions: &[Question],
        position: usize,
        option: usize,
        mode: RemovalMode,
    ) -> Result<Vec<Question>, MutationError> {
        check_index(questions, position)?;
        let Some(branch) = questions[position].branch_for_option(option).cloned() else {
            return Err(MutationError::NoCondition { position, option });
        };

        let mut result = questions.to_vec();
        result[position]
            .conditional_branches_mut()
            .retain(|b| b.option_index != option);

        let Some(target) = resolve(&result, &branch.target) else {
            debug!(position, option, "removed condition with unresolved target");
            return Ok(result);
        };

        match mode {
            RemovalMode::Unlink => {
                let parent_ref = identity(&result[position], position);
                let points_back = result[target].parent_link().is_some_and(|link| {
                    link.option_index == option
                        && canonical(&result, &link.parent).as_ref() == Some(&parent_ref)
                });
                if points_back {
                    result[target].set_parent_link(None);
                }
                debug!(position, option, target, "unlinked condition");
                Ok(result)
            }
            RemovalMode::Delete => {
                debug!(position, option, target, "deleting condition question");
                self.delete(&result, target)
            }
        }
    }

    /// Remove option `option` from the choice question at `position`, along
    /// with any condition attached to it.
    pub fn remove_option(
        &self,
        questions: &[Question],
        position: usize,
        option: usize,
        mode: RemovalMode,
    ) -> Result<Vec<Question>, MutationError> {
        check_index(questions, position)?;
        let mut result = questions.to_vec();
        let question = &mut result[position];
        let kind = question.kind().name();
        let Some(choice) = question.kind_mut().choice_mut() else {
            return Err(MutationError::NotChoice { position, kind });
        };
        if !choice.remove_option(option) {
            return Err(MutationError::UnknownOption { position, option });
        }

        if result[position].branch_for_option(option).is_some() {
            return self.remove_condition(&result, position, option, mode);
        }
        debug!(position, option, "removed option");
        Ok(result)
    }

    /// Insert a copy of the question at `position` together with all the
    /// questions it reveals, directly or transitively.
    ///
    /// The copies follow the last question of the original subtree, keep the
    /// original relative order, and are linked among themselves. Copies have no
    /// persisted id, and the copied root has no parent link.
    pub fn duplicate(
        &self,
        questions: &[Question],
        position: usize,
    ) -> Result<Vec<Question>, MutationError> {
        check_index(questions, position)?;

        let mut members = vec![position];
        members.extend(descendants(questions, position));
        let insert_at = members.iter().max().map_or(position, |last| last + 1);
        let copy_index: HashMap<usize, usize> = members
            .iter()
            .enumerate()
            .map(|(rank, &original)| (original, insert_at + rank))
            .collect();

        let copies: Vec<Question> = members
            .iter()
            .map(|&original| copy_question(questions, original, position, &copy_index))
            .collect();

        let shift = copies.len();
        let mut result = questions.to_vec();
        remap_refs(
            &mut result,
            |index| Some(if index >= insert_at { index + shift } else { index }),
            &HashSet::new(),
        );
        result.splice(insert_at..insert_at, copies);
        reindex(&mut result);

        debug!(position, copied = shift, at = insert_at, "duplicated question");
        Ok(result)
    }

    /// Move the question at `from` so it ends up at index `to`.
    pub fn move_question(
        &self,
        questions: &[Question],
        from: usize,
        to: usize,
    ) -> Result<Vec<Question>, MutationError> {
        check_index(questions, from)?;
        check_index(questions, to)?;

        let mut order: Vec<usize> = (0..questions.len()).collect();
        let moved = order.remove(from);
        order.insert(to, moved);

        let mut new_index = vec![0; questions.len()];
        for (new, &old) in order.iter().enumerate() {
            new_index[old] = new;
        }

        let mut remapped = questions.to_vec();
        remap_refs(&mut remapped, |index| new_index.get(index).copied(), &HashSet::new());
        let mut result: Vec<Question> = order.iter().map(|&old| remapped[old].clone()).collect();
        reindex(&mut result);

        debug!(from, to, "moved question");
        Ok(result)
    }
}

fn check_index(questions: &[Question], index: usize) -> Result<(), MutationError> {
    if index < questions.len() {
        Ok(())
    } else {
        Err(MutationError::out_of_range(index, questions.len()))
    }
}

/// Set every position to the current index.
pub(crate) fn reindex(questions: &mut [Question]) {
    for (index, question) in questions.iter_mut().enumerate() {
        question.set_position(index);
    }
}

/// Rewrite positional references through `map` (old index to new index).
///
/// Branches whose target is dropped by the map or carries a removed id are
/// removed; parent links to a dropped parent are cleared.
fn remap_refs(
    questions: &mut [Question],
    map: impl Fn(usize) -> Option<usize>,
    removed_ids: &HashSet<QuestionId>,
) {
    let gone = |reference: &crate::QuestionRef| {
        reference
            .as_id()
            .is_some_and(|id| removed_ids.contains(id))
    };

    for question in questions.iter_mut() {
        let branches = std::mem::take(question.conditional_branches_mut());
        *question.conditional_branches_mut() = branches
            .into_iter()
            .filter(|branch| !gone(&branch.target))
            .filter_map(|branch| {
                branch.target.remap(&map).map(|target| ConditionalBranch {
                    option_index: branch.option_index,
                    target,
                })
            })
            .collect();

        let link = question
            .parent_link()
            .filter(|link| !gone(&link.parent))
            .and_then(|link| {
                link.parent
                    .remap(&map)
                    .map(|parent| ParentLink::new(parent, link.option_index))
            });
        question.set_parent_link(link);
    }
}

fn copy_question(
    questions: &[Question],
    original: usize,
    root: usize,
    copy_index: &HashMap<usize, usize>,
) -> Question {
    let mut copy = questions[original].clone();
    copy.set_id(None);
    copy.set_labels(None, None);

    let branches = questions[original]
        .conditional_branches()
        .iter()
        .filter_map(|branch| {
            let target = resolve(questions, &branch.target)?;
            copy_index
                .get(&target)
                .map(|&new| ConditionalBranch::new(branch.option_index, new))
        })
        .collect();
    *copy.conditional_branches_mut() = branches;

    let link = if original == root {
        None
    } else {
        questions[original].parent_link().and_then(|link| {
            let parent = resolve(questions, &link.parent)?;
            copy_index
                .get(&parent)
                .map(|&new| ParentLink::new(new, link.option_index))
        })
    };
    copy.set_parent_link(link);
    copy
}
