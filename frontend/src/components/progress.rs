use fraglens::ProgressStage;
use leptos::*;

use crate::Session;

#[component]
pub fn ProgressSection(session: ReadSignal<Session>) -> impl IntoView {
    let stage = move || session.with(|s| s.progress().stage);

    view! {
        <Show
            when=move || is_visible(stage())
            fallback=|| view! { }
        >
            <div class="progress-section show" id="progressSection">
                <div class="progress-bar">
                    <div
                        class=move || fill_class(stage())
                        id="progressFill"
                        style=move || format!("width: {}%;", session.with(|s| s.progress().percent))
                    ></div>
                </div>
                <div class="progress-status">
                    {move || session.with(|s| s.progress().status.clone())}
                </div>
            </div>
        </Show>
    }
}

/// Failures are shown by the error message instead of the bar.
pub fn is_visible(stage: ProgressStage) -> bool {
    matches!(
        stage,
        ProgressStage::Uploading | ProgressStage::Processing | ProgressStage::Complete
    )
}

pub fn fill_class(stage: ProgressStage) -> &'static str {
    match stage {
        ProgressStage::Processing => "progress-fill processing",
        ProgressStage::Complete => "progress-fill complete",
        _ => "progress-fill",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_hidden_when_idle_or_failed() {
        assert!(!is_visible(ProgressStage::Idle));
        assert!(!is_visible(ProgressStage::Failed));
        assert!(is_visible(ProgressStage::Uploading));
        assert!(is_visible(ProgressStage::Processing));
    }

    #[test]
    fn test_processing_stage_is_animated() {
        assert_eq!(fill_class(ProgressStage::Processing), "progress-fill processing");
        assert_eq!(fill_class(ProgressStage::Uploading), "progress-fill");
    }
}
