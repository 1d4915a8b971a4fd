//! Backend reports.
//!
//! The backend decides the report shape and it has changed more than
//! once, so a [`Report`] keeps the raw JSON object and every accessor
//! tolerates missing or mistyped fields.
//!
//! # Shapes
//!
//! - **Aim** - flat counters from a gameplay video:
//!   `total_shots`, `total_hits`, `accuracy`, `video_duration`, ...
//! - **Match summary** - a nested `match_summary` object with
//!   `combat_stats`, `support_stats`, `resource_stats`, `movement_stats`,
//!   and/or a free-form `match_stats` mapping.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ClientError, ClientResult};

/// Nested stat groups of a match summary, in display order.
pub const MATCH_STAT_GROUPS: [&str; 4] = [
    "combat_stats",
    "support_stats",
    "resource_stats",
    "movement_stats",
];

const AIM_KEYS: [&str; 4] = ["total_shots", "total_hits", "accuracy", "video_duration"];

/// Which report shape the backend sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Aim and reaction counters from a video.
    Aim,
    /// Match summary from a screenshot.
    MatchSummary,
    /// A JSON object with none of the known fields.
    Unknown,
}

/// A report returned by `POST /upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report(Map<String, Value>);

impl Report {
    /// Wrap a JSON value. Only objects are reports.
    pub fn from_value(value: Value) -> ClientResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ClientError::InvalidResponse(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Parse a report from a JSON string.
    pub fn from_json(raw: &str) -> ClientResult<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| ClientError::InvalidResponse(format!("malformed JSON: {}", e)))?;
        Self::from_value(value)
    }

    /// Classify the report shape.
    pub fn kind(&self) -> ReportKind {
        if self.match_summary().is_some() || self.match_stats().is_some() {
            ReportKind::MatchSummary
        } else if AIM_KEYS.iter().any(|key| self.0.contains_key(*key)) {
            ReportKind::Aim
        } else {
            ReportKind::Unknown
        }
    }

    /// Top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The nested `match_summary` object, if any.
    pub fn match_summary(&self) -> Option<&Value> {
        self.0.get("match_summary").filter(|v| v.is_object())
    }

    /// The free-form `match_stats` mapping, at the top level or inside
    /// the match summary.
    pub fn match_stats(&self) -> Option<&Map<String, Value>> {
        self.0
            .get("match_stats")
            .and_then(Value::as_object)
            .or_else(|| {
                self.match_summary()?
                    .get("match_stats")
                    .and_then(Value::as_object)
            })
    }

    /// A string `error` field in an otherwise unrecognised body.
    ///
    /// Some backend versions report failures with a success status.
    pub fn embedded_error(&self) -> Option<&str> {
        if self.kind() != ReportKind::Unknown {
            return None;
        }
        self.0.get("error").and_then(Value::as_str)
    }

    /// Raw JSON fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Turn an `/upload` response into a report or an error.
///
/// - non-2xx: [`ClientError::Server`] with the body's `error` string, if any
/// - 2xx with a non-object body: [`ClientError::InvalidResponse`]
/// - 2xx with only an `error` field: [`ClientError::Server`]
pub fn parse_upload_response(status: u16, body: &str) -> ClientResult<Report> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("error")?.as_str().map(str::to_string));
        return Err(ClientError::Server { status, message });
    }

    let report = Report::from_json(body)?;
    if let Some(error) = report.embedded_error() {
        return Err(ClientError::Server {
            status,
            message: Some(error.to_string()),
        });
    }
    Ok(report)
}

// =============================================================================
// Defensive formatting
// =============================================================================

/// Number with a fixed number of decimals, or zero in that format.
///
/// `fixed(Some(&json!(55.0)), 2)` gives `"55.00"`; a missing or
/// non-numeric value gives `"0.00"`.
pub fn fixed(value: Option<&Value>, decimals: usize) -> String {
    let n = value.and_then(Value::as_f64).unwrap_or(0.0);
    format!("{:.*}", decimals, n)
}

/// Seconds with two decimals, or `N/A` when missing, zero or non-numeric.
pub fn seconds_or_na(value: Option<&Value>) -> String {
    match value.and_then(Value::as_f64) {
        Some(n) if n != 0.0 => format!("{:.2}s", n),
        _ => "N/A".to_string(),
    }
}

/// A counter as an integer, or `N/A`.
pub fn count(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) => format_number(n),
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        _ => "N/A".to_string(),
    }
}

/// Render a JSON number: integers as-is, floats with at most two
/// decimals and no trailing zeros.
pub fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    let f = n.as_f64().unwrap_or(0.0);
    let s = format!("{:.2}", f);
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
