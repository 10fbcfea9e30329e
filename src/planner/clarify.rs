//! Clarification policy

use tracing::debug;

use crate::domain::TripParameters;

/// One fixed question per missing required field, in a fixed order
///
/// Daily distance and accommodation have defaults and never generate a
/// question. A non-empty result halts the turn before any tool provider is
/// invoked.
pub fn missing_questions(params: &TripParameters) -> Vec<String> {
    let mut questions = Vec::new();
    if params.origin.is_none() {
        questions.push("Where are you starting?".to_string());
    }
    if params.destination.is_none() {
        questions.push("Where do you want to finish?".to_string());
    }
    if params.month.is_none() {
        questions.push("Which month are you traveling?".to_string());
    }
    debug!(question_count = questions.len(), "missing_questions: evaluated");
    questions
}
