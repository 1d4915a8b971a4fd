//! Report presentation.
//!
//! [`ReportView`] flattens any [`Report`] into titled sections of
//! label/value stat boxes. Both the terminal and the browser render from
//! the same view, so the defensive formatting rules live in one place.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::report::{count, fixed, format_number, seconds_or_na, Report, ReportKind, MATCH_STAT_GROUPS};

/// A single labelled value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatBox {
    pub label: String,
    pub value: String,
}

impl StatBox {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A titled group of stat boxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatSection {
    pub title: String,
    pub stats: Vec<StatBox>,
}

/// Display-ready form of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub title: String,
    #[serde(skip)]
    pub kind: ReportKind,
    pub sections: Vec<StatSection>,
}

impl ReportView {
    /// Build the view for a report of any shape.
    pub fn from_report(report: &Report) -> Self {
        match report.kind() {
            ReportKind::Aim => aim_view(report),
            ReportKind::MatchSummary => match_view(report),
            ReportKind::Unknown => generic_view(report),
        }
    }

    /// First stat box with the given label, in any section.
    pub fn find(&self, label: &str) -> Option<&StatBox> {
        self.sections
            .iter()
            .flat_map(|s| s.stats.iter())
            .find(|b| b.label == label)
    }

    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.stats.is_empty())
    }
}

fn aim_view(report: &Report) -> ReportView {
    let frames = format!(
        "{} / {}",
        count(report.get("processed_frames")),
        count(report.get("total_frames"))
    );

    let mut sections = vec![StatSection {
        title: "Aim & Reaction".to_string(),
        stats: vec![
            StatBox::new("Total Shots", count(report.get("total_shots"))),
            StatBox::new("Total Hits", count(report.get("total_hits"))),
            StatBox::new("Accuracy", format!("{}%", fixed(report.get("accuracy"), 2))),
            StatBox::new(
                "Avg Reaction Time",
                seconds_or_na(report.get("average_reaction_time")),
            ),
            StatBox::new(
                "Video Duration",
                format!("{}s", fixed(report.get("video_duration"), 2)),
            ),
            StatBox::new("Frames Processed", frames),
        ],
    }];

    let breakdown: Vec<StatBox> = [
        ("shield_hits", "Shield Hits"),
        ("health_hits", "Health Hits"),
        ("shield_break_hits", "Shield Break Hits"),
    ]
    .iter()
    .filter_map(|(key, label)| {
        report
            .get(key)
            .map(|value| StatBox::new(*label, count(Some(value))))
    })
    .collect();

    if !breakdown.is_empty() {
        sections.push(StatSection {
            title: "Hit Breakdown".to_string(),
            stats: breakdown,
        });
    }

    ReportView {
        title: "Analysis Report".to_string(),
        kind: ReportKind::Aim,
        sections,
    }
}

fn match_view(report: &Report) -> ReportView {
    let mut sections = Vec::new();
    let summary = report.match_summary().and_then(Value::as_object);

    if let Some(summary) = summary {
        let overview = scalar_boxes(summary);
        if !overview.is_empty() {
            sections.push(StatSection {
                title: "Overview".to_string(),
                stats: overview,
            });
        }

        for group in MATCH_STAT_GROUPS {
            if let Some(stats) = summary.get(group).and_then(Value::as_object) {
                sections.push(object_section(group, stats));
            }
        }

        // Groups this client does not know about yet.
        for (key, value) in summary {
            if MATCH_STAT_GROUPS.contains(&key.as_str()) || key == "match_stats" {
                continue;
            }
            if let Some(stats) = value.as_object() {
                sections.push(object_section(key, stats));
            }
        }
    }

    if let Some(stats) = report.match_stats() {
        sections.push(object_section("match_stats", stats));
    }

    ReportView {
        title: "Match Summary".to_string(),
        kind: ReportKind::MatchSummary,
        sections,
    }
}

fn generic_view(report: &Report) -> ReportView {
    ReportView {
        title: "Report".to_string(),
        kind: ReportKind::Unknown,
        sections: vec![StatSection {
            title: "Details".to_string(),
            stats: scalar_boxes(report.fields()),
        }],
    }
}

fn object_section(key: &str, stats: &Map<String, Value>) -> StatSection {
    StatSection {
        title: humanize(key),
        stats: stats
            .iter()
            .filter(|(_, v)| !v.is_object())
            .map(|(k, v)| StatBox::new(humanize(k), stat_value(k, v)))
            .collect(),
    }
}

fn scalar_boxes(fields: &Map<String, Value>) -> Vec<StatBox> {
    fields
        .iter()
        .filter(|(_, v)| !v.is_object() && !v.is_array())
        .map(|(k, v)| StatBox::new(humanize(k), stat_value(k, v)))
        .collect()
}

/// Render one match stat value.
///
/// Numbers are trimmed (`33`, `12.5`) and get a `%` suffix when the key
/// names a percentage; strings pass through; anything unusable is `N/A`.
pub fn stat_value(key: &str, value: &Value) -> String {
    match value {
        Value::Number(n) => {
            let mut s = format_number(n);
            if is_percentage_key(key) {
                s.push('%');
            }
            s
        }
        Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter(|v| !v.is_object() && !v.is_array() && !v.is_null())
                .map(|v| stat_value(key, v))
                .collect();
            if parts.is_empty() {
                "N/A".to_string()
            } else {
                parts.join(", ")
            }
        }
        _ => "N/A".to_string(),
    }
}

fn is_percentage_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key.contains("accuracy") || key.contains("percent") || key.ends_with("_pct")
}

/// `combat_stats` -> `Combat Stats`, `damageDealt` -> `Damage Dealt`.
pub fn humanize(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in key.chars() {
        if c == '_' || c == '-' || c == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// Terminal rendering
// =============================================================================

/// Plain-text rendering of a report view.
pub fn render_text(view: &ReportView) -> String {
    let mut out = format!("📊 {}\n", view.title);

    if view.is_empty() {
        out.push_str("   (no stats in this report)\n");
        return out;
    }

    let width = view
        .sections
        .iter()
        .flat_map(|s| s.stats.iter())
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(0);

    for section in view.sections.iter().filter(|s| !s.stats.is_empty()) {
        out.push_str(&format!("\n   {}\n", section.title));
        for stat in &section.stats {
            out.push_str(&format!(
                "     {:<width$}  {}\n",
                stat.label,
                stat.value,
                width = width
            ));
        }
    }
    out
}

/// Text progress bar: `[#####-----]  50%`.
pub fn render_progress_bar(percent: u8, width: usize) -> String {
    let percent = percent.min(100) as usize;
    let filled = percent * width / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        percent
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn view(value: Value) -> ReportView {
        ReportView::from_report(&Report::from_value(value).unwrap())
    }

    #[test]
    fn test_aim_view_formats_numbers() {
        let v = view(json!({
            "total_shots": 40,
            "total_hits": 22,
            "accuracy": 55.0,
            "video_duration": 61.2,
            "processed_frames": 1830,
            "total_frames": 1830
        }));
        assert_eq!(v.kind, ReportKind::Aim);
        assert_eq!(v.find("Accuracy").unwrap().value, "55.00%");
        assert_eq!(v.find("Video Duration").unwrap().value, "61.20s");
        assert_eq!(v.find("Frames Processed").unwrap().value, "1830 / 1830");
        assert_eq!(v.find("Avg Reaction Time").unwrap().value, "N/A");
        assert!(v.find("Shield Hits").is_none());
    }

    #[test]
    fn test_aim_view_tolerates_garbage() {
        let v = view(json!({
            "total_shots": 3,
            "accuracy": "lots",
            "video_duration": null
        }));
        assert_eq!(v.find("Accuracy").unwrap().value, "0.00%");
        assert_eq!(v.find("Video Duration").unwrap().value, "0.00s");
        assert_eq!(v.find("Total Hits").unwrap().value, "N/A");
        assert_eq!(v.find("Frames Processed").unwrap().value, "N/A / N/A");
    }

    #[test]
    fn test_hit_breakdown_section() {
        let v = view(json!({
            "total_hits": 5,
            "shield_hits": 2,
            "health_hits": 3,
            "shield_break_hits": 0
        }));
        assert_eq!(v.sections.len(), 2);
        assert_eq!(v.sections[1].title, "Hit Breakdown");
        assert_eq!(v.find("Shield Break Hits").unwrap().value, "0");
    }

    #[test]
    fn test_match_view_sections() {
        let v = view(json!({
            "match_summary": {
                "placement": 4,
                "combat_stats": {"accuracy": 33, "eliminations": 7},
                "movement_stats": {"distance_traveled": 1543.75},
                "building_stats": {"structures_built": 210},
                "match_stats": {"Mode": "Zero Build"}
            }
        }));
        assert_eq!(v.kind, ReportKind::MatchSummary);
        let titles: Vec<&str> = v.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Overview", "Combat Stats", "Movement Stats", "Building Stats", "Match Stats"]
        );
        assert_eq!(v.find("Accuracy").unwrap().value, "33%");
        assert_eq!(v.find("Distance Traveled").unwrap().value, "1543.75");
        assert_eq!(v.find("Placement").unwrap().value, "4");
        assert_eq!(v.find("Mode").unwrap().value, "Zero Build");
    }

    #[test]
    fn test_stat_value_fallbacks() {
        assert_eq!(stat_value("hit_percent", &json!(12.5)), "12.5%");
        assert_eq!(stat_value("revives", &Value::Null), "N/A");
        assert_eq!(stat_value("revives", &json!("  ")), "N/A");
        assert_eq!(stat_value("victory", &json!(true)), "Yes");
        assert_eq!(stat_value("weapons", &json!(["AR", "SMG", null])), "AR, SMG");
        assert_eq!(stat_value("weapons", &json!([])), "N/A");
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("combat_stats"), "Combat Stats");
        assert_eq!(humanize("damageDealt"), "Damage Dealt");
        assert_eq!(humanize("Eliminations"), "Eliminations");
        assert_eq!(humanize("kd-ratio"), "Kd Ratio");
    }

    #[test]
    fn test_generic_view_lists_scalars() {
        let v = view(json!({"status": "complete", "progress": 100, "nested": {"a": 1}}));
        assert_eq!(v.kind, ReportKind::Unknown);
        assert_eq!(v.find("Status").unwrap().value, "complete");
        assert_eq!(v.find("Progress").unwrap().value, "100");
        assert!(v.find("A").is_none());
    }

    #[test]
    fn test_render_text_contains_values() {
        let v = view(json!({"total_shots": 40, "accuracy": 55.0}));
        let text = render_text(&v);
        assert!(text.starts_with("📊 Analysis Report"));
        assert!(text.contains("Aim & Reaction"));
        assert!(text.contains("55.00%"));
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(render_progress_bar(50, 10), "[#####-----]  50%");
        assert_eq!(render_progress_bar(100, 4), "[####] 100%");
        assert_eq!(render_progress_bar(250, 4), "[####] 100%");
    }
}
