//! Seat suggestions from an LLM, given a student profile.
//!
//! DESIGN
//! ======
//! One prompt-template call, no tools, no retries. The model gets the
//! student's subject interest and learning style plus a comma-separated list
//! of available seat labels, and answers with `{"suggestedSeats": "..."}`.
//! The answer is split on commas, trimmed, and empty entries dropped.
//!
//! ERROR HANDLING
//! ==============
//! Every failure (no LLM configured, transport, unparseable answer) collapses
//! into `SuggestionOutcome { success: false }` with one generic message. The
//! detailed error goes to the log only.

#[cfg(test)]
#[path = "suggestion_test.rs"]
mod tests;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::llm::LlmChat;
use crate::llm::types::{LlmError, Message};
use crate::state::AppState;
use crate::store::StoreError;

pub const FAILURE_MESSAGE: &str = "Failed to get suggestions.";

const SYSTEM_PROMPT: &str = "\
You are a helpful AI assistant for a library seat booking system. Your task is to suggest the best \
available seats to a student based on their preferences.

Analyze the user's subject interest and learning style to recommend up to 5 suitable seats from the \
list of available seats.

- Learning Style Guide:
  - 'Quiet & Focused': Prefer seats away from high-traffic areas like entrances or group tables. \
Individual desks are ideal.
  - 'Collaborative & Group Work': Suggest seats at group tables or in designated group study areas.
  - 'Visual & Near Windows': Prioritize seats labeled with 'W' or near window areas if discernible \
from seat labels.
  - 'Casual & Near Exits': Suggest seats near the entrance/exit if possible.

- Subject Interest Guide:
  - 'Science & Engineering', 'Computer Science', 'Medicine': These students often need quiet, focused areas.
  - 'Law', 'Literature', 'Arts & Humanities': These students might appreciate quiet areas but could also \
benefit from being near relevant book sections (if the layout implies this).

- Available Seats: The seats are provided as a comma-separated string.

Only suggest labels that appear in the available seats list. Reply with a single JSON object and nothing \
else: {\"suggestedSeats\": \"<comma-separated seat labels>\"}";

// =============================================================================
// TYPES
// =============================================================================

/// The student's side of a suggestion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub subject_interest: String,
    pub learning_style: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub subject_interest: String,
    pub learning_style: String,
    /// Comma-separated seat labels.
    pub available_seats: String,
}

impl SuggestionRequest {
    #[must_use]
    pub fn new(profile: StudentProfile, available: &[String]) -> Self {
        Self {
            subject_interest: profile.subject_interest,
            learning_style: profile.learning_style,
            available_seats: available.join(", "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResponse {
    /// Comma-separated seat labels.
    pub suggested_seats: String,
}

/// What callers see: a success flag with either seats or a generic error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SuggestionOutcome {
    #[must_use]
    pub fn ok(seats: Vec<String>) -> Self {
        Self { success: true, seats: Some(seats), error: None }
    }

    #[must_use]
    pub fn failed() -> Self {
        Self { success: false, seats: None, error: Some(FAILURE_MESSAGE.to_owned()) }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SuggestionError {
    #[error("LLM not configured")]
    LlmNotConfigured,
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("model returned no text")]
    EmptyResponse,
}

// =============================================================================
// PROMPT + PARSING
// =============================================================================

#[must_use]
pub fn build_user_prompt(request: &SuggestionRequest) -> String {
    format!(
        "User Profile:\n- Subject Interest: {}\n- Learning Style: {}\n\nAvailable Seats:\n{}\n\n\
         Your Suggested Seats (comma-separated):",
        request.subject_interest, request.learning_style, request.available_seats
    )
}

/// Split a comma-separated label list, trimming and dropping empty entries.
#[must_use]
pub fn parse_suggested_seats(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Pull the `suggestedSeats` string out of the model's answer.
///
/// Accepts a bare JSON object, one wrapped in a code fence or prose, or, if no
/// object parses, the whole text as the list itself.
#[must_use]
pub fn extract_suggested_seats(text: &str) -> String {
    let trimmed = text.trim();
    if let Ok(parsed) = serde_json::from_str::<SuggestionResponse>(trimmed) {
        return parsed.suggested_seats;
    }
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Ok(parsed) = serde_json::from_str::<SuggestionResponse>(&trimmed[start..=end]) {
                return parsed.suggested_seats;
            }
        }
    }
    trimmed.trim_matches('`').trim().to_owned()
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Ask the model for seats.
///
/// # Errors
///
/// Returns [`SuggestionError::Llm`] on provider failure and
/// [`SuggestionError::EmptyResponse`] if the model produced no text.
pub async fn suggest_seats(
    llm: &dyn LlmChat,
    request: &SuggestionRequest,
    max_tokens: u32,
) -> Result<Vec<String>, SuggestionError> {
    let messages = [Message::user(build_user_prompt(request))];
    let response = llm.chat(max_tokens, SYSTEM_PROMPT, &messages).await?;
    info!(
        model = %response.model,
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "suggestion: LLM response"
    );

    if response.text.trim().is_empty() {
        return Err(SuggestionError::EmptyResponse);
    }
    Ok(parse_suggested_seats(&extract_suggested_seats(&response.text)))
}

/// [`suggest_seats`] with every failure folded into the generic outcome.
pub async fn get_seat_suggestions(
    llm: Option<&Arc<dyn LlmChat>>,
    request: &SuggestionRequest,
    max_tokens: u32,
) -> SuggestionOutcome {
    let result = match llm {
        Some(llm) => suggest_seats(llm.as_ref(), request, max_tokens).await,
        None => Err(SuggestionError::LlmNotConfigured),
    };
    match result {
        Ok(seats) => SuggestionOutcome::ok(seats),
        Err(e) => {
            error!(error = %e, "AI suggestion failed");
            SuggestionOutcome::failed()
        }
    }
}

/// Suggest seats from a library's currently available seats.
///
/// The repository lock is released before the LLM call.
///
/// # Errors
///
/// Returns [`StoreError::LibraryNotFound`]. LLM failures are not errors here.
pub async fn suggest_for_library(
    state: &AppState,
    library_id: &str,
    profile: StudentProfile,
) -> Result<SuggestionOutcome, StoreError> {
    let available = {
        let repo = state.repo.read().await;
        if repo.find_library(library_id).is_none() {
            return Err(StoreError::LibraryNotFound(library_id.to_owned()));
        }
        repo.available_seat_labels(library_id)
    };

    let request = SuggestionRequest::new(profile, &available);
    info!(%library_id, available = available.len(), "suggestion: requesting");
    Ok(get_seat_suggestions(state.llm.as_ref(), &request, state.suggestion_max_tokens).await)
}
