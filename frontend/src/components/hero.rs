//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Fraglens"</h1>
            <p class="subtitle">
                "Upload a gameplay clip for an aim and reaction report, "
                "or a post-match screenshot for a match summary with AI insights."
            </p>
        </div>
    }
}
