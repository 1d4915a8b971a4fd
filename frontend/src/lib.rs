//! Fraglens - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for uploading gameplay clips and match
//! screenshots and reading the reports the analysis backend returns.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent (one UploadSession signal)                      │
//! │  ├── Hero (title, description)                              │
//! │  ├── ModeSwitch (video / image)                             │
//! │  ├── UploadSection (file picker, submit, progress)          │
//! │  ├── ReportPanel (when a report is loaded)                  │
//! │  └── InsightsPanel (image mode)                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Browser file handle and JS error mapping
//! - [`components`] - UI components
//! - [`services`] - Backend communication (upload, insights)

use fraglens::{MediaKind, UploadSession};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::*;
pub use types::BrowserFile;
pub use components::*;
pub use services::*;

/// Session state shared by every component on the page.
pub type Session = UploadSession<BrowserFile>;

// =============================================================================
// Application Entry Point
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let (session, set_session) = create_signal(Session::new(MediaKind::Video));

    view! {
        <div class="container">
            <Hero/>
            <ModeSwitch session=session set_session=set_session/>
            <UploadSection session=session set_session=set_session/>

            <Show
                when=move || session.with(|s| s.report().is_some())
                fallback=|| view! { }
            >
                <ReportPanel session=session/>
            </Show>

            <Show
                when=move || session.with(shows_insights)
                fallback=|| view! { }
            >
                <InsightsPanel session=session/>
            </Show>
        </div>

        <Footer/>
    }
}
