//! Detects conditional links dropped or altered between two snapshots.
//!
//! Used by autosave: the snapshot an in-flight save was built from is
//! compared against the current list. Mismatches are reported only; deciding
//! which side wins is left to the caller.

use tracing::{instrument, warn};

use crate::resolver::resolve;
use crate::{Question, QuestionRef};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompatError {
    #[error("Question {position} missing in updated questions")]
    Missing { position: usize },

    #[error("Conditional count mismatch ({before} vs {after}) for question {position}")]
    CountMismatch {
        position: usize,
        before: usize,
        after: usize,
    },

    #[error(
        "Option index mismatch ({before} vs {after}) for question {position}, condition {condition}"
    )]
    OptionIndexMismatch {
        position: usize,
        condition: usize,
        before: usize,
        after: usize,
    },

    #[error("Target mismatch ({before} vs {after}) for question {position}, condition {condition}")]
    TargetMismatch {
        position: usize,
        condition: usize,
        before: QuestionRef,
        after: QuestionRef,
    },
}

/// Outcome of [`compare`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompatReport {
    pub errors: Vec<CompatError>,
}

impl CompatReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Compare two snapshots index by index.
///
/// A target counts as unchanged when the stored reference is identical, or
/// when both references resolve to the same position in their snapshots (a
/// positional reference replaced by the id assigned on save).
#[instrument(level = "debug", skip_all, fields(before = before.len(), after = after.len()))]
pub fn compare(before: &[Question], after: &[Question]) -> CompatReport {
    let mut report = CompatReport::default();

    for (position, old) in before.iter().enumerate() {
        let Some(new) = after.get(position) else {
            report.errors.push(CompatError::Missing { position });
            continue;
        };

        let old_branches = old.conditional_branches();
        let new_branches = new.conditional_branches();
        if old_branches.len() != new_branches.len() {
            report.errors.push(CompatError::CountMismatch {
                position,
                before: old_branches.len(),
                after: new_branches.len(),
            });
            continue;
        }

        for (condition, (old_branch, new_branch)) in
            old_branches.iter().zip(new_branches).enumerate()
        {
            if old_branch.option_index != new_branch.option_index {
                report.errors.push(CompatError::OptionIndexMismatch {
                    position,
                    condition,
                    before: old_branch.option_index,
                    after: new_branch.option_index,
                });
            }
            if !same_target(before, &old_branch.target, after, &new_branch.target) {
                report.errors.push(CompatError::TargetMismatch {
                    position,
                    condition,
                    before: old_branch.target.clone(),
                    after: new_branch.target.clone(),
                });
            }
        }
    }

    if !report.is_valid() {
        warn!(
            mismatches = report.errors.len(),
            "conditional links diverged between snapshots"
        );
    }
    report
}

fn same_target(
    before: &[Question],
    old: &QuestionRef,
    after: &[Question],
    new: &QuestionRef,
) -> bool {
    if old == new {
        return true;
    }
    match (resolve(before, old), resolve(after, new)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
