//! Report panel: the stat boxes of the current report.

use fraglens::{FileHandle, Report, ReportView, StatSection, UploadSession};
use leptos::*;

use crate::Session;

#[component]
pub fn ReportPanel(session: ReadSignal<Session>) -> impl IntoView {
    let report = report_memo(session);

    view! {
        <div class="report-panel">
            {move || report.with(|r| r.as_ref().map(ReportView::from_report)).map(|report| {
                let empty = report.is_empty();
                view! {
                    <h2 class="report-title">"📊 " {report.title}</h2>
                    <Show when=move || empty fallback=|| view! { }>
                        <p class="report-empty">"The backend returned no stats for this file."</p>
                    </Show>
                    {report
                        .sections
                        .into_iter()
                        .map(|section| view! { <StatSectionCard section=section/> })
                        .collect_view()}
                }
            })}
        </div>
    }
}

/// The session's report, notifying only when the report itself changes.
///
/// Progress and insights updates leave the stat grid alone.
pub fn report_memo<F>(session: ReadSignal<UploadSession<F>>) -> Memo<Option<Report>>
where
    F: FileHandle + 'static,
{
    create_memo(move |_| session.with(|s| s.report().cloned()))
}

#[component]
fn StatSectionCard(section: StatSection) -> impl IntoView {
    view! {
        <section class="stat-section">
            <h3>{section.title}</h3>
            <div class="stat-grid">
                {section
                    .stats
                    .into_iter()
                    .map(|stat| {
                        let class = stat_box_class(&stat.value);
                        view! {
                            <div class=class>
                                <div class="stat-value">{stat.value}</div>
                                <div class="stat-label">{stat.label}</div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

/// Dim boxes whose value could not be read.
pub fn stat_box_class(value: &str) -> &'static str {
    if value == "N/A" {
        "stat-box missing"
    } else {
        "stat-box"
    }
}
