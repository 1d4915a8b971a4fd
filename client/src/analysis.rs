//! AI insights for match summaries.
//!
//! After a screenshot report arrives, the match summary can be sent to
//! `POST /analyze`. The backend either returns insight strings, says the
//! feature is switched off (`503` with `available: false`), or fails.
//! None of these outcomes is an error for the session: the primary report
//! stays on screen.

use serde_json::{json, Value};

/// Shown when the backend has no AI credential configured.
pub const UNAVAILABLE_MESSAGE: &str =
    "AI analysis is not available. Configure the AI API key on the backend to enable insights.";

/// Shown for any other analysis failure.
pub const FAILED_MESSAGE: &str =
    "Could not generate AI insights right now. Your match stats are still shown above.";

/// Result of an analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// Insight strings, in backend order.
    Ready(Vec<String>),
    /// The backend has the feature disabled.
    Unavailable(String),
    /// The call failed for any other reason.
    Failed(String),
}

impl AnalysisOutcome {
    /// Message to show in place of insights, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            AnalysisOutcome::Ready(_) => None,
            AnalysisOutcome::Unavailable(msg) | AnalysisOutcome::Failed(msg) => Some(msg),
        }
    }

    /// The insights, if the call succeeded.
    pub fn insights(&self) -> &[String] {
        match self {
            AnalysisOutcome::Ready(items) => items,
            _ => &[],
        }
    }
}

/// Request body for `POST /analyze`.
pub fn analysis_request(match_data: &Value) -> Value {
    json!({ "match_data": match_data })
}

/// Classify an `/analyze` response.
pub fn classify_analysis_response(status: u16, body: &str) -> AnalysisOutcome {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    if status == 503 {
        let disabled = parsed
            .as_ref()
            .and_then(|v| v.get("available"))
            .and_then(Value::as_bool)
            == Some(false);
        if disabled {
            return AnalysisOutcome::Unavailable(UNAVAILABLE_MESSAGE.to_string());
        }
    }

    if !(200..300).contains(&status) {
        log::warn!("Analysis request failed with status {}", status);
        return AnalysisOutcome::Failed(FAILED_MESSAGE.to_string());
    }

    match parsed.as_ref().and_then(|v| v.get("analysis")).and_then(Value::as_array) {
        Some(items) => AnalysisOutcome::Ready(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        ),
        None => {
            log::warn!("Analysis response has no 'analysis' array");
            AnalysisOutcome::Failed(FAILED_MESSAGE.to_string())
        }
    }
}

/// Outcome for a request that never got a response.
pub fn transport_failure(reason: &str) -> AnalysisOutcome {
    log::warn!("Analysis request failed: {}", reason);
    AnalysisOutcome::Failed(FAILED_MESSAGE.to_string())
}
