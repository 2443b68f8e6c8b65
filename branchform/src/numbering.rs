//! Hierarchical display numbering (`1`, `2`, `2.1`, `2.1.3`, ...).
//!
//! Labels are a display artifact. They are recomputed on every load and must
//! be stripped before a question list goes to storage.

use std::collections::HashSet;

use crate::resolver::parent_index;
use crate::{FormDefinition, Question};

/// Compute the display label of every question in the list.
///
/// Top-level questions (no parent link, or a parent link that does not
/// resolve) are numbered `page_offset + 1, page_offset + 2, ...` in position
/// order. A revealed question is labeled `<parent label>.<rank>`, where rank
/// is its 1-based place among the questions linked to the same parent.
pub fn compute_labels(questions: &[Question], page_offset: usize) -> Vec<String> {
    let mut labeler = Labeler::new(questions, page_offset);
    (0..questions.len())
        .map(|index| labeler.label_of(index))
        .collect()
}

/// Return a copy of the list with `label` and `parent_label` filled in.
///
/// Persisted fields are left as they are.
pub fn label(questions: &[Question], page_offset: usize) -> Vec<Question> {
    let labels = compute_labels(questions, page_offset);
    questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let parent_label =
                parent_index(questions, question).map(|parent| labels[parent].clone());
            let mut labeled = question.clone();
            labeled.set_labels(Some(labels[index].clone()), parent_label);
            labeled
        })
        .collect()
}

/// Label every page of a form, continuing top-level numbering across pages.
pub fn label_form(form: &FormDefinition) -> FormDefinition {
    let mut labeled = form.clone();
    for (page, offset) in labeled.pages.iter_mut().zip(page_offsets(form)) {
        page.questions = label(&page.questions, offset);
    }
    labeled
}

/// Numbering offset of each page: the number of top-level questions on all
/// preceding pages.
///
/// Questions whose parent link does not resolve on their page count as
/// top-level, matching how they are labeled.
pub fn page_offsets(form: &FormDefinition) -> Vec<usize> {
    form.pages()
        .iter()
        .scan(0, |offset, page| {
            let current = *offset;
            *offset += resolved_parents(page.questions())
                .iter()
                .filter(|parent| parent.is_none())
                .count();
            Some(current)
        })
        .collect()
}

fn resolved_parents(questions: &[Question]) -> Vec<Option<usize>> {
    questions
        .iter()
        .map(|question| parent_index(questions, question))
        .collect()
}

/// Remove the derived display fields from one question.
pub fn strip(question: &Question) -> Question {
    let mut stripped = question.clone();
    stripped.set_labels(None, None);
    stripped
}

/// Remove the derived display fields from every question.
pub fn strip_labels(questions: &[Question]) -> Vec<Question> {
    questions.iter().map(strip).collect()
}

struct Labeler {
    page_offset: usize,
    parents: Vec<Option<usize>>,
    memo: Vec<Option<String>>,
}

impl Labeler {
    fn new(questions: &[Question], page_offset: usize) -> Self {
        Self {
            page_offset,
            parents: resolved_parents(questions),
            memo: vec![None; questions.len()],
        }
    }

    /// Walks up to the nearest labeled or top-level ancestor, then labels the
    /// chain on the way back down.
    fn label_of(&mut self, index: usize) -> String {
        let mut chain = Vec::new();
        let mut on_chain = HashSet::new();
        let mut current = index;

        let mut label = loop {
            if let Some(label) = &self.memo[current] {
                break label.clone();
            }
            match self.parents[current] {
                None => {
                    let label = self.top_level_number(current).to_string();
                    self.memo[current] = Some(label.clone());
                    break label;
                }
                Some(parent) => {
                    if !on_chain.insert(current) {
                        // Cycle; validation rejects these before save.
                        break (self.page_offset + current + 1).to_string();
                    }
                    chain.push(current);
                    current = parent;
                }
            }
        };

        for &child in chain.iter().rev() {
            if let Some(parent) = self.parents[child] {
                label = format!("{label}.{}", self.sibling_rank(child, parent));
            }
            self.memo[child] = Some(label.clone());
        }
        label
    }

    fn top_level_number(&self, index: usize) -> usize {
        let preceding = self.parents[..=index]
            .iter()
            .filter(|parent| parent.is_none())
            .count();
        self.page_offset + preceding
    }

    fn sibling_rank(&self, index: usize, parent: usize) -> usize {
        self.parents[..=index]
            .iter()
            .filter(|p| **p == Some(parent))
            .count()
    }
}
