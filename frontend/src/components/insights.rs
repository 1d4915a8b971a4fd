//! AI insights for match screenshots.

use fraglens::InsightsState;
use leptos::*;

use crate::Session;

#[component]
pub fn InsightsPanel(session: ReadSignal<Session>) -> impl IntoView {
    view! {
        <div class="insights-panel">
            <h2>"🤖 AI Insights"</h2>
            {move || match session.with(|s| s.insights().clone()) {
                InsightsState::NotRequested => ().into_view(),
                InsightsState::Analyzing => {
                    view! { <p class="insights-loading">"⏳ Analyzing match..."</p> }.into_view()
                }
                InsightsState::Ready(items) if items.is_empty() => {
                    view! { <p class="insights-empty">"No insights for this match."</p> }.into_view()
                }
                InsightsState::Ready(items) => items
                    .into_iter()
                    .enumerate()
                    .map(|(i, text)| view! {
                        <div class="insight-card">
                            <span class="insight-index">{i + 1}</span>
                            <p>{text}</p>
                        </div>
                    })
                    .collect_view(),
                // Disabled service: informational, not an error.
                InsightsState::Unavailable(message) => {
                    view! { <div class="insights-notice info">"ℹ️ " {message}</div> }.into_view()
                }
                InsightsState::Failed(message) => {
                    view! { <div class="insights-notice warning">"⚠️ " {message}</div> }.into_view()
                }
            }}
        </div>
    }
}

/// The panel appears once a request was made for the current report.
pub fn shows_insights(session: &Session) -> bool {
    session.mode().supports_analysis() && *session.insights() != InsightsState::NotRequested
}
