use serde::{Deserialize, Serialize};

use crate::{QuestionId, QuestionRef};

/// A single question in a page-scoped question list.
///
/// Questions form a forest through their conditional branches: a choice
/// question may reveal another question when a given option is picked, and the
/// revealed question points back at its parent through its parent link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Persisted identifier, absent until the first successful save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<QuestionId>,

    /// Index of this question in its page-scoped list.
    #[serde(default)]
    position: usize,

    /// The prompt text shown to the respondent.
    #[serde(default)]
    title: String,

    /// The kind of question (determines input type and options).
    kind: QuestionKind,

    /// Whether a visible instance of this question must be answered.
    #[serde(default)]
    required: bool,

    /// Outgoing conditional branches, one per option at most.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    conditional_branches: Vec<ConditionalBranch>,

    /// Back-reference to the question and option that reveal this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_link: Option<ParentLink>,

    /// Derived display label such as `2.1.3`. Never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,

    /// Derived display label of the parent question. Never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_label: Option<String>,
}

impl Question {
    /// Create a new, unsaved question.
    pub fn new(title: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: None,
            position: 0,
            title: title.into(),
            kind,
            required: false,
            conditional_branches: Vec::new(),
            parent_link: None,
            label: None,
            parent_label: None,
        }
    }

    /// Set the persisted id.
    pub fn with_id(mut self, id: impl Into<QuestionId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the position.
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    /// Mark the question as required.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Append a conditional branch.
    pub fn with_branch(mut self, option_index: usize, target: impl Into<QuestionRef>) -> Self {
        self.conditional_branches
            .push(ConditionalBranch::new(option_index, target));
        self
    }

    /// Set the parent link.
    pub fn with_parent(mut self, parent: impl Into<QuestionRef>, option_index: usize) -> Self {
        self.parent_link = Some(ParentLink::new(parent, option_index));
        self
    }

    pub fn id(&self) -> Option<&QuestionId> {
        self.id.as_ref()
    }

    pub fn set_id(&mut self, id: Option<QuestionId>) {
        self.id = id;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut QuestionKind {
        &mut self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// Get the options of a choice question (empty for other kinds).
    pub fn options(&self) -> &[QuestionOption] {
        self.kind.options()
    }

    pub fn conditional_branches(&self) -> &[ConditionalBranch] {
        &self.conditional_branches
    }

    pub fn conditional_branches_mut(&mut self) -> &mut Vec<ConditionalBranch> {
        &mut self.conditional_branches
    }

    /// Get the branch attached to an option, if any.
    pub fn branch_for_option(&self, option_index: usize) -> Option<&ConditionalBranch> {
        self.conditional_branches
            .iter()
            .find(|branch| branch.option_index == option_index)
    }

    /// Check if this question reveals other questions.
    pub fn has_branches(&self) -> bool {
        !self.conditional_branches.is_empty()
    }

    pub fn parent_link(&self) -> Option<&ParentLink> {
        self.parent_link.as_ref()
    }

    pub fn set_parent_link(&mut self, link: Option<ParentLink>) {
        self.parent_link = link;
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn parent_label(&self) -> Option<&str> {
        self.parent_label.as_deref()
    }

    /// Set the derived display labels.
    pub fn set_labels(&mut self, label: Option<String>, parent_label: Option<String>) {
        self.label = label;
        self.parent_label = parent_label;
    }

    /// Check if any derived display field is present.
    pub fn has_labels(&self) -> bool {
        self.label.is_some() || self.parent_label.is_some()
    }
}

/// "If the respondent picks option `option_index`, question `target` becomes relevant."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalBranch {
    pub option_index: usize,
    pub target: QuestionRef,
}

impl ConditionalBranch {
    pub fn new(option_index: usize, target: impl Into<QuestionRef>) -> Self {
        Self {
            option_index,
            target: target.into(),
        }
    }
}

/// Back-reference from a revealed question to the question and option revealing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentLink {
    pub parent: QuestionRef,
    pub option_index: usize,
}

impl ParentLink {
    pub fn new(parent: impl Into<QuestionRef>, option_index: usize) -> Self {
        Self {
            parent: parent.into(),
            option_index,
        }
    }
}

/// The kind of question, determining input type and options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum QuestionKind {
    /// Single-line free text.
    #[default]
    ShortAnswer,

    /// Multi-line free text.
    Paragraph,

    /// A number with optional bounds.
    Number(NumberQuestion),

    /// A calendar date.
    Date,

    /// A pair of numbers (from, to) with optional bounds.
    NumberRange(NumberQuestion),

    /// A pair of dates (from, to).
    DateRange,

    /// Pick exactly one option.
    SingleChoice(ChoiceQuestion),

    /// Pick any number of options.
    MultipleChoice(ChoiceQuestion),
}

impl QuestionKind {
    /// Create a single-choice kind with the given option labels, indexed from 0.
    pub fn single_choice<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        Self::SingleChoice(ChoiceQuestion::from_labels(labels))
    }

    /// Create a multiple-choice kind with the given option labels, indexed from 0.
    pub fn multiple_choice<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        Self::MultipleChoice(ChoiceQuestion::from_labels(labels))
    }

    /// Check if this kind presents discrete options (and may carry branches).
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::SingleChoice(_) | Self::MultipleChoice(_))
    }

    pub fn choice(&self) -> Option<&ChoiceQuestion> {
        match self {
            Self::SingleChoice(choice) | Self::MultipleChoice(choice) => Some(choice),
            _ => None,
        }
    }

    pub fn choice_mut(&mut self) -> Option<&mut ChoiceQuestion> {
        match self {
            Self::SingleChoice(choice) | Self::MultipleChoice(choice) => Some(choice),
            _ => None,
        }
    }

    /// Get the options (empty for non-choice kinds).
    pub fn options(&self) -> &[QuestionOption] {
        self.choice().map(ChoiceQuestion::options).unwrap_or(&[])
    }

    /// Get the kind name for messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShortAnswer => "ShortAnswer",
            Self::Paragraph => "Paragraph",
            Self::Number(_) => "Number",
            Self::Date => "Date",
            Self::NumberRange(_) => "NumberRange",
            Self::DateRange => "DateRange",
            Self::SingleChoice(_) => "SingleChoice",
            Self::MultipleChoice(_) => "MultipleChoice",
        }
    }
}

/// Configuration for a choice question.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    pub options: Vec<QuestionOption>,
}

impl ChoiceQuestion {
    pub fn new(options: Vec<QuestionOption>) -> Self {
        Self { options }
    }

    /// Create options from labels, indexed from 0 in order.
    pub fn from_labels<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        let options = labels
            .into_iter()
            .enumerate()
            .map(|(index, label)| QuestionOption::new(index, label))
            .collect();
        Self { options }
    }

    pub fn options(&self) -> &[QuestionOption] {
        &self.options
    }

    pub fn option(&self, index: usize) -> Option<&QuestionOption> {
        self.options.iter().find(|option| option.index == index)
    }

    pub fn has_option(&self, index: usize) -> bool {
        self.option(index).is_some()
    }

    /// Mark the option with the given index as correct.
    pub fn mark_correct(mut self, index: usize) -> Self {
        if let Some(option) = self.options.iter_mut().find(|option| option.index == index) {
            option.is_correct = true;
        }
        self
    }

    /// Indices of options marked correct, in option order.
    pub fn correct_indices(&self) -> Vec<usize> {
        self.options
            .iter()
            .filter(|option| option.is_correct)
            .map(|option| option.index)
            .collect()
    }

    /// Remove the option with the given index. Returns whether it existed.
    pub fn remove_option(&mut self, index: usize) -> bool {
        let before = self.options.len();
        self.options.retain(|option| option.index != index);
        self.options.len() != before
    }
}

/// One selectable option of a choice question.
///
/// The `index` is a stable key: it is not renumbered when other options are
/// removed, so branches keyed by it stay valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub index: usize,
    pub label: String,
    #[serde(default)]
    pub is_correct: bool,
}

impl QuestionOption {
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
            is_correct: false,
        }
    }

    pub fn correct(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
            is_correct: true,
        }
    }
}

/// Bounds for a number or number-range question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl NumberQuestion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bounds(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Check if a value lies within the bounds.
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}
