//! File picker and upload trigger.
//!
//! Handles file selection, the upload request and, for screenshots, the
//! follow-up insights request. All state lives in the session signal.

use fraglens::{FileHandle, MediaKind};
use leptos::*;
use web_sys::{Event, HtmlInputElement};

use crate::services::{request_insights, upload_file};
use crate::{client_config, BrowserFile, ProgressSection, Session};

#[component]
pub fn UploadSection(
    session: ReadSignal<Session>,
    set_session: WriteSignal<Session>,
) -> impl IntoView {
    let config = store_value(client_config());
    let is_loading = move || session.with(|s| s.is_loading());

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        // Cancelling the dialog empties the input, so the selection goes too.
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            set_session.update(|s| s.clear_selection());
            return;
        };

        let file = BrowserFile::new(file);
        set_session.update(|s| {
            if let Err(e) = s.select_file(file) {
                log::warn!("⚠️ {}", e);
            }
        });
    };

    let on_submit = move |_| {
        let mut started = None;
        set_session.update(|s| match s.begin_upload() {
            Ok(ticket) => started = s.file().cloned().map(|file| (ticket, file, s.mode())),
            Err(e) => log::warn!("⚠️ {}", e),
        });
        let Some((ticket, file, mode)) = started else {
            return;
        };
        let config = config.get_value();

        spawn_local(async move {
            let result = upload_file(&file, mode, &config, move |sent, total| {
                set_session.update(|s| s.on_upload_progress(ticket, sent, total));
            })
            .await;

            let mut analysis = None;
            set_session.update(|s| {
                if s.complete_upload(ticket, result) {
                    analysis = s.begin_analysis();
                }
            });

            if let Some((analysis_ticket, body)) = analysis {
                let outcome = request_insights(&body, &config).await;
                set_session.update(|s| {
                    s.complete_analysis(analysis_ticket, outcome);
                });
            }
        });
    };

    view! {
        <div class="upload-section" id="uploadZone">
            <div class="upload-icon">
                {move || match session.with(|s| s.mode()) {
                    MediaKind::Video => "🎬",
                    MediaKind::Image => "🖼️",
                }}
            </div>
            <div class="upload-text">
                {move || session.with(|s| match s.file() {
                    Some(file) => describe_file(file.name(), file.size()),
                    None => format!("Choose a {} to analyze", s.mode().noun()),
                })}
            </div>

            <input
                type="file"
                id="fileInput"
                accept=move || session.with(|s| s.mode().accept())
                disabled=is_loading
                on:change=on_file_change
            />

            <button class="upload-button" disabled=is_loading on:click=on_submit>
                {move || if is_loading() { "⏳ Uploading and processing..." } else { "Upload & Analyze" }}
            </button>

            <Show
                when=move || session.with(|s| s.error().is_some())
                fallback=|| view! { }
            >
                <div class="error-message">
                    {move || session.with(|s| s.error().unwrap_or_default().to_string())}
                </div>
            </Show>

            <ProgressSection session=session/>
        </div>
    }
}

/// "📄 clip.mp4 (1.2 MB)"
pub fn describe_file(name: &str, size: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let size = size as f64;
    let human = if size >= MB {
        format!("{:.1} MB", size / MB)
    } else if size >= KB {
        format!("{:.1} KB", size / KB)
    } else {
        format!("{} B", size)
    };
    format!("📄 {} ({})", name, human)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_file() {
        assert_eq!(describe_file("shot.png", 512), "📄 shot.png (512 B)");
        assert_eq!(describe_file("shot.png", 2048), "📄 shot.png (2.0 KB)");
        assert_eq!(describe_file("clip.mp4", 5 * 1024 * 1024), "📄 clip.mp4 (5.0 MB)");
    }
}
