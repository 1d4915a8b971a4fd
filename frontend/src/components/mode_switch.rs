//! Video / image mode toggle.

use fraglens::MediaKind;
use leptos::*;

use crate::Session;

#[component]
pub fn ModeSwitch(
    session: ReadSignal<Session>,
    set_session: WriteSignal<Session>,
) -> impl IntoView {
    let mode_button = move |kind: MediaKind| {
        view! {
            <button
                class=move || {
                    if session.with(|s| s.mode()) == kind {
                        "mode-button active"
                    } else {
                        "mode-button"
                    }
                }
                disabled=move || session.with(|s| s.is_loading())
                on:click=move |_| {
                    log::info!("🔀 Mode: {}", kind);
                    set_session.update(|s| s.set_mode(kind));
                }
            >
                {mode_label(kind)}
            </button>
        }
    };

    view! {
        <div class="mode-switch">
            {mode_button(MediaKind::Video)}
            {mode_button(MediaKind::Image)}
        </div>
    }
}

pub fn mode_label(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Video => "🎬 Gameplay clip",
        MediaKind::Image => "🖼️ Match screenshot",
    }
}
