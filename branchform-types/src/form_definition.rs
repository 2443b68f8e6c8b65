use serde::{Deserialize, Serialize};

use crate::Question;

/// One page of a form: an ordered, page-scoped question list.
///
/// Positions and positional references are local to the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormPage {
    pub questions: Vec<Question>,
}

impl FormPage {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

/// The top-level structure containing all pages and metadata for a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    /// Optional title shown above the form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Optional description shown below the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Pages in display order.
    #[serde(default)]
    pub pages: Vec<FormPage>,
}

impl FormDefinition {
    /// Create a single-page form with the given questions.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            title: None,
            description: None,
            pages: vec![FormPage::new(questions)],
        }
    }

    /// Create an empty form definition.
    pub fn empty() -> Self {
        Self {
            title: None,
            description: None,
            pages: Vec::new(),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a page.
    pub fn with_page(mut self, questions: Vec<Question>) -> Self {
        self.pages.push(FormPage::new(questions));
        self
    }

    pub fn pages(&self) -> &[FormPage] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&FormPage> {
        self.pages.get(index)
    }

    /// Check if the form has any questions.
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(|page| page.questions.is_empty())
    }

    /// Get the total number of questions across pages.
    pub fn len(&self) -> usize {
        self.pages.iter().map(|page| page.questions.len()).sum()
    }
}

impl Default for FormDefinition {
    fn default() -> Self {
        Self::empty()
    }
}
