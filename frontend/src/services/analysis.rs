//! AI insights request.

use fraglens::analysis::transport_failure;
use fraglens::{classify_analysis_response, AnalysisOutcome, ClientConfig};
use gloo_net::http::Request;
use serde_json::Value;

/// POST the match summary to `/analyze` and classify the answer.
///
/// Never fails: every problem becomes [`AnalysisOutcome::Failed`] or
/// [`AnalysisOutcome::Unavailable`].
pub async fn request_insights(body: &Value, config: &ClientConfig) -> AnalysisOutcome {
    let url = config.analyze_url();
    log::info!("🤖 POST {}", url);

    let request = match Request::post(&url).json(body) {
        Ok(request) => request,
        Err(e) => return transport_failure(&format!("Failed to build request: {}", e)),
    };
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => return transport_failure(&format!("HTTP request failed: {}", e)),
    };

    let status = response.status();
    match response.text().await {
        Ok(text) => classify_analysis_response(status, &text),
        Err(e) => transport_failure(&format!("Failed to read response: {}", e)),
    }
}
