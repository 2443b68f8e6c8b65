//! The boundary to external storage.
//!
//! Payloads never carry derived display labels, and positions are always
//! re-derived from list order on the way in.

use serde_json::Value;
use tracing::{debug, instrument};

use crate::mutation::reindex;
use crate::numbering::strip_labels;
use crate::{FormDefinition, Question};

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Failed to encode payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode payload: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Serialize a question list for storage, without display labels.
#[instrument(level = "debug", skip_all, fields(questions = questions.len()))]
pub fn to_payload(questions: &[Question]) -> Result<Value, PersistError> {
    serde_json::to_value(strip_labels(questions)).map_err(PersistError::Encode)
}

/// Read a stored question list.
///
/// Any labels present in the payload are dropped and positions are set from
/// list order.
pub fn from_payload(payload: Value) -> Result<Vec<Question>, PersistError> {
    let questions: Vec<Question> = serde_json::from_value(payload).map_err(PersistError::Decode)?;
    let mut questions = strip_labels(&questions);
    reindex(&mut questions);
    debug!(questions = questions.len(), "loaded question list");
    Ok(questions)
}

/// Serialize a whole form for storage, without display labels.
pub fn form_to_payload(form: &FormDefinition) -> Result<Value, PersistError> {
    let mut stripped = form.clone();
    for page in &mut stripped.pages {
        page.questions = strip_labels(&page.questions);
    }
    serde_json::to_value(stripped).map_err(PersistError::Encode)
}

/// Read a stored form. Each page is cleaned as in [`from_payload`].
pub fn form_from_payload(payload: Value) -> Result<FormDefinition, PersistError> {
    let mut form: FormDefinition = serde_json::from_value(payload).map_err(PersistError::Decode)?;
    for page in &mut form.pages {
        page.questions = strip_labels(&page.questions);
        reindex(&mut page.questions);
    }
    Ok(form)
}
