//! # Fraglens - upload client for gameplay analysis reports
//!
//! Fraglens sends a gameplay clip or a post-match screenshot to the
//! analysis backend and turns the JSON it returns into readable stats.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Selected   │────▶│  Uploading  │────▶│   Report    │────▶│ AI insights │
//! │ file (MIME) │     │ (progress)  │     │ (any shape) │     │ (image only)│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! The library is I/O-free except for the `native` feature, which adds
//! the `reqwest` transport and [`LocalFile`]. The browser frontend uses
//! the same session and rendering code with its own transport.
//!
//! ## Modules
//!
//! - [`config`] - Endpoints and [`ClientConfig`]
//! - [`error`] - [`ClientError`] and user-facing messages
//! - [`media`] - [`MediaKind`] and the [`FileHandle`] trait
//! - [`report`] - Defensive access to backend reports
//! - [`render`] - Stat-box view of a report
//! - [`analysis`] - AI insights outcomes
//! - [`session`] - The upload state machine
//! - `http` - `reqwest` transport (feature `native`)

pub mod config;
pub mod error;
pub mod media;

pub mod report;
pub mod render;

pub mod analysis;
pub mod session;

#[cfg(feature = "native")]
pub mod http;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ClientConfig, DEFAULT_BACKEND_URL, UPLOAD_PROGRESS_CEILING};
pub use error::{ClientError, ClientResult};
pub use media::{mime_from_extension, FileHandle, MediaKind};
pub use report::{parse_upload_response, Report, ReportKind};
pub use render::{render_progress_bar, render_text, ReportView, StatBox, StatSection};
pub use analysis::{analysis_request, classify_analysis_response, AnalysisOutcome};
pub use session::{InsightsState, Phase, Progress, ProgressStage, Ticket, UploadSession};

#[cfg(feature = "native")]
pub use media::LocalFile;

#[cfg(feature = "native")]
pub use http::UploadClient;
