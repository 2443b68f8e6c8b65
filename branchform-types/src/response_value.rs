use serde::{Deserialize, Serialize};

/// A single answer collected from a respondent.
///
/// This is the value stored in `Responses` for each answered question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum ResponseValue {
    /// Free text (from ShortAnswer or Paragraph questions).
    Text(String),

    /// A number (from Number questions).
    Number(f64),

    /// An ISO-8601 date (from Date questions).
    Date(String),

    /// A pair of numbers (from NumberRange questions).
    NumberRange(f64, f64),

    /// A pair of ISO-8601 dates (from DateRange questions).
    DateRange(String, String),

    /// The index of the chosen option (from SingleChoice questions).
    ChosenOption(usize),

    /// The indices of the chosen options (from MultipleChoice questions).
    ChosenOptions(Vec<usize>),
}

impl ResponseValue {
    /// Try to get this value as a string reference.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get this value as a chosen option index.
    pub fn as_chosen_option(&self) -> Option<usize> {
        match self {
            Self::ChosenOption(idx) => Some(*idx),
            _ => None,
        }
    }

    /// Try to get this value as chosen option indices.
    pub fn as_chosen_options(&self) -> Option<&[usize]> {
        match self {
            Self::ChosenOptions(indices) => Some(indices),
            _ => None,
        }
    }

    /// Check whether the given option is among the selected ones.
    ///
    /// Non-choice values never select anything.
    pub fn selects(&self, option_index: usize) -> bool {
        match self {
            Self::ChosenOption(idx) => *idx == option_index,
            Self::ChosenOptions(indices) => indices.contains(&option_index),
            _ => false,
        }
    }

    /// Check if the answer carries no content (blank text or no selection).
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) | Self::Date(s) => s.trim().is_empty(),
            Self::ChosenOptions(indices) => indices.is_empty(),
            _ => false,
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "Text",
            Self::Number(_) => "Number",
            Self::Date(_) => "Date",
            Self::NumberRange(..) => "NumberRange",
            Self::DateRange(..) => "DateRange",
            Self::ChosenOption(_) => "ChosenOption",
            Self::ChosenOptions(_) => "ChosenOptions",
        }
    }
}

impl From<String> for ResponseValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for ResponseValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for ResponseValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for ResponseValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<Vec<usize>> for ResponseValue {
    fn from(indices: Vec<usize>) -> Self {
        Self::ChosenOptions(indices)
    }
}
