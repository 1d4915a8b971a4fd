//! Upload session state machine.
//!
//! One [`UploadSession`] covers one file-selection cycle:
//!
//! ```text
//! Idle ──select──▶ Selected ──begin_upload──▶ Uploading ──▶ Succeeded | Failed
//!                                                              │
//!                                      (image mode) begin_analysis
//!                                                              ▼
//!                                   Analyzing ──▶ Ready | Unavailable | Failed
//! ```
//!
//! Any new selection (or mode switch) resets to `Idle` first. The session
//! never performs I/O: transports call [`UploadSession::begin_upload`],
//! feed progress and results back in, and the UI renders from the
//! accessors. Every transition into a request hands out a [`Ticket`];
//! results that come back with an outdated ticket are dropped, so a
//! request that outlives its selection cannot overwrite the new one.

use serde_json::Value;

use crate::analysis::{analysis_request, AnalysisOutcome};
use crate::config::UPLOAD_PROGRESS_CEILING;
use crate::error::{ClientError, ClientResult};
use crate::media::{FileHandle, MediaKind};
use crate::report::Report;

/// Primary upload phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Selected,
    Uploading,
    Succeeded,
    Failed,
}

/// State of the optional AI insights call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightsState {
    NotRequested,
    Analyzing,
    Ready(Vec<String>),
    Unavailable(String),
    Failed(String),
}

impl From<AnalysisOutcome> for InsightsState {
    fn from(outcome: AnalysisOutcome) -> Self {
        match outcome {
            AnalysisOutcome::Ready(items) => InsightsState::Ready(items),
            AnalysisOutcome::Unavailable(msg) => InsightsState::Unavailable(msg),
            AnalysisOutcome::Failed(msg) => InsightsState::Failed(msg),
        }
    }
}

/// What the progress bar represents right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStage {
    Idle,
    /// Body bytes are being sent.
    Uploading,
    /// All bytes sent, waiting for the backend. No percentage is known.
    Processing,
    Complete,
    Failed,
}

/// Upload progress as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// 0-100, bar width.
    pub percent: u8,
    /// Human-readable status line.
    pub status: String,
    pub stage: ProgressStage,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            percent: 0,
            status: String::new(),
            stage: ProgressStage::Idle,
        }
    }
}

/// Identifies one request issued by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Client-side state for one upload-and-report cycle.
#[derive(Debug, Clone)]
pub struct UploadSession<F> {
    mode: MediaKind,
    phase: Phase,
    file: Option<F>,
    progress: Progress,
    report: Option<Report>,
    error: Option<String>,
    insights: InsightsState,
    generation: u64,
    uploading: Option<Ticket>,
}

impl<F: FileHandle> UploadSession<F> {
    /// A fresh session collecting `mode` files.
    pub fn new(mode: MediaKind) -> Self {
        Self {
            mode,
            phase: Phase::Idle,
            file: None,
            progress: Progress::default(),
            report: None,
            error: None,
            insights: InsightsState::NotRequested,
            generation: 0,
            uploading: None,
        }
    }

    pub fn mode(&self) -> MediaKind {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn file(&self) -> Option<&F> {
        self.file.as_ref()
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// Blocking error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn insights(&self) -> &InsightsState {
        &self.insights
    }

    /// The primary upload is in flight.
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Uploading
    }

    /// The insights call is in flight. Independent of [`Self::is_loading`].
    pub fn is_analyzing(&self) -> bool {
        self.insights == InsightsState::Analyzing
    }

    /// Switch between video and image collection.
    ///
    /// The current selection may no longer match, so the session resets.
    pub fn set_mode(&mut self, mode: MediaKind) {
        if mode != self.mode {
            self.mode = mode;
            self.reset();
        }
    }

    /// Select a file for upload.
    ///
    /// The session resets first. A file outside the active media class is
    /// not stored; the error is recorded and returned.
    pub fn select_file(&mut self, file: F) -> ClientResult<()> {
        self.reset();

        if !self.mode.accepts(file.mime()) {
            let err = ClientError::InvalidFileType {
                expected: self.mode,
                actual: if file.mime().is_empty() {
                    "unknown type".to_string()
                } else {
                    file.mime().to_string()
                },
            };
            log::warn!("Rejected {}: {}", file.name(), err);
            self.error = Some(err.user_message(self.mode));
            return Err(err);
        }

        log::info!("Selected {} ({}, {} bytes)", file.name(), file.mime(), file.size());
        self.file = Some(file);
        self.phase = Phase::Selected;
        Ok(())
    }

    /// Drop the current selection, as when the file dialog is cancelled.
    ///
    /// Any running request becomes stale.
    pub fn clear_selection(&mut self) {
        log::debug!("Selection cleared");
        self.reset();
    }

    /// Start the upload of the selected file.
    ///
    /// Fails without side effects other than the error message when no
    /// file is selected, and without any side effect while an upload is
    /// already running.
    pub fn begin_upload(&mut self) -> ClientResult<Ticket> {
        if self.uploading.is_some() {
            return Err(ClientError::UploadInProgress);
        }
        if self.file.is_none() {
            let err = ClientError::NoFileSelected;
            self.error = Some(err.user_message(self.mode));
            return Err(err);
        }

        self.generation += 1;
        let ticket = Ticket(self.generation);
        self.uploading = Some(ticket);
        self.phase = Phase::Uploading;
        self.error = None;
        self.report = None;
        self.insights = InsightsState::NotRequested;
        self.progress = Progress {
            percent: 0,
            status: format!("Uploading {}...", self.mode.noun()),
            stage: ProgressStage::Uploading,
        };
        Ok(ticket)
    }

    /// Record that `sent` of `total` body bytes have left the client.
    ///
    /// Bytes map onto `0..=UPLOAD_PROGRESS_CEILING`; the bar never moves
    /// backwards. Once everything is sent the stage turns to
    /// [`ProgressStage::Processing`].
    pub fn on_upload_progress(&mut self, ticket: Ticket, sent: u64, total: u64) {
        if self.uploading != Some(ticket) {
            return;
        }

        let ceiling = u64::from(UPLOAD_PROGRESS_CEILING);
        let done = total == 0 || sent >= total;
        let (scaled, upload_pct) = if done {
            (ceiling, 100)
        } else {
            (sent * ceiling / total, sent * 100 / total)
        };
        let percent = self.progress.percent.max(scaled as u8);

        self.progress = if done {
            Progress {
                percent,
                status: "Processing on server...".to_string(),
                stage: ProgressStage::Processing,
            }
        } else {
            Progress {
                percent,
                status: format!("Uploading {}... {}%", self.mode.noun(), upload_pct),
                stage: ProgressStage::Uploading,
            }
        };
    }

    /// Apply the outcome of the upload request.
    ///
    /// Returns `false` when the ticket is stale and nothing changed.
    pub fn complete_upload(&mut self, ticket: Ticket, result: ClientResult<Report>) -> bool {
        if self.uploading != Some(ticket) {
            log::debug!("Dropping stale upload result");
            return false;
        }
        self.uploading = None;

        match result {
            Ok(report) => {
                log::info!("Report received ({:?})", report.kind());
                self.error = None;
                self.report = Some(report);
                self.phase = Phase::Succeeded;
                self.progress = Progress {
                    percent: 100,
                    status: "Processing complete!".to_string(),
                    stage: ProgressStage::Complete,
                };
            }
            Err(err) => {
                let message = err.user_message(self.mode);
                log::error!("Upload failed: {}", err);
                self.report = None;
                self.phase = Phase::Failed;
                self.progress = Progress {
                    percent: 0,
                    status: message.clone(),
                    stage: ProgressStage::Failed,
                };
                self.error = Some(message);
            }
        }
        true
    }

    /// Start the AI insights call for the current report.
    ///
    /// Returns the ticket and the `/analyze` request body, or `None` when
    /// insights do not apply: video mode, no successful report, no match
    /// summary, or a call already running.
    pub fn begin_analysis(&mut self) -> Option<(Ticket, Value)> {
        if !self.mode.supports_analysis() || self.phase != Phase::Succeeded || self.is_analyzing() {
            return None;
        }
        let body = analysis_request(self.report.as_ref()?.match_summary()?);
        self.insights = InsightsState::Analyzing;
        Some((Ticket(self.generation), body))
    }

    /// Apply the outcome of the insights call.
    ///
    /// Never touches the report or the blocking error. Returns `false`
    /// when the ticket is stale.
    pub fn complete_analysis(&mut self, ticket: Ticket, outcome: AnalysisOutcome) -> bool {
        if ticket != Ticket(self.generation) || !self.is_analyzing() {
            log::debug!("Dropping stale analysis result");
            return false;
        }
        self.insights = outcome.into();
        true
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.uploading = None;
        self.phase = Phase::Idle;
        self.file = None;
        self.progress = Progress::default();
        self.report = None;
        self.error = None;
        self.insights = InsightsState::NotRequested;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{FAILED_MESSAGE, UNAVAILABLE_MESSAGE};
    use serde_json::json;

    #[derive(Debug, Clone)]
    struct FakeFile {
        name: &'static str,
        mime: &'static str,
    }

    impl FileHandle for FakeFile {
        fn name(&self) -> &str {
            self.name
        }
        fn mime(&self) -> &str {
            self.mime
        }
        fn size(&self) -> u64 {
            1024
        }
    }

    fn clip() -> FakeFile {
        FakeFile { name: "clip.mp4", mime: "video/mp4" }
    }

    fn screenshot() -> FakeFile {
        FakeFile { name: "screenshot.png", mime: "image/png" }
    }

    fn summary_report() -> Report {
        Report::from_value(json!({
            "match_summary": {"combat_stats": {"accuracy": 33}}
        }))
        .unwrap()
    }

    #[test]
    fn test_wrong_type_never_stored() {
        let mut session = UploadSession::new(MediaKind::Image);
        let err = session.select_file(clip()).unwrap_err();
        assert!(matches!(err, ClientError::InvalidFileType { .. }));
        assert!(session.file().is_none());
        assert!(session.error().is_some());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_rejected_selection_drops_previous_file() {
        let mut session = UploadSession::new(MediaKind::Image);
        session.select_file(screenshot()).unwrap();
        assert!(session.select_file(clip()).is_err());
        assert!(session.file().is_none());
    }

    #[test]
    fn test_cleared_selection_cannot_be_submitted() {
        let mut session = UploadSession::new(MediaKind::Video);
        session.select_file(clip()).unwrap();
        let ticket = session.begin_upload().unwrap();

        session.clear_selection();
        assert!(session.file().is_none());
        assert_eq!(session.phase(), Phase::Idle);
        assert!(!session.complete_upload(ticket, Ok(summary_report())));
        assert!(session.report().is_none());

        let err = session.begin_upload().unwrap_err();
        assert!(matches!(err, ClientError::NoFileSelected));
    }

    #[test]
    fn test_submit_without_file() {
        let mut session: UploadSession<FakeFile> = UploadSession::new(MediaKind::Video);
        let err = session.begin_upload().unwrap_err();
        assert!(matches!(err, ClientError::NoFileSelected));
        assert_eq!(session.error(), Some("Please select a file!"));
        assert_eq!(session.phase(), Phase::Idle);
        assert!(!session.is_loading());
    }

    #[test]
    fn test_new_selection_clears_previous_outcome() {
        let mut session = UploadSession::new(MediaKind::Video);
        session.select_file(clip()).unwrap();
        let ticket = session.begin_upload().unwrap();
        session.complete_upload(ticket, Err(ClientError::Transport("Network Error".into())));
        assert_eq!(session.error(), Some("Network Error"));

        session.select_file(clip()).unwrap();
        assert_eq!(session.phase(), Phase::Selected);
        assert!(session.error().is_none());
        assert!(session.report().is_none());
        assert_eq!(session.progress(), &Progress::default());
    }

    #[test]
    fn test_upload_success_replaces_error_and_report() {
        let mut session = UploadSession::new(MediaKind::Video);
        session.select_file(clip()).unwrap();

        let first = session.begin_upload().unwrap();
        session.complete_upload(first, Ok(Report::from_value(json!({"total_shots": 1})).unwrap()));

        let second = session.begin_upload().unwrap();
        assert!(session.report().is_none());
        assert!(session.error().is_none());
        assert!(session.is_loading());

        let report = Report::from_value(json!({"total_shots": 40})).unwrap();
        assert!(session.complete_upload(second, Ok(report.clone())));
        assert_eq!(session.report(), Some(&report));
        assert_eq!(session.phase(), Phase::Succeeded);
        assert_eq!(session.progress().percent, 100);
        assert_eq!(session.progress().stage, ProgressStage::Complete);
    }

    #[test]
    fn test_upload_failure_resets_progress() {
        let mut session = UploadSession::new(MediaKind::Video);
        session.select_file(clip()).unwrap();
        let ticket = session.begin_upload().unwrap();
        session.on_upload_progress(ticket, 50, 100);
        assert_eq!(session.progress().percent, 45);

        session.complete_upload(
            ticket,
            Err(ClientError::Server {
                status: 400,
                message: Some("Video must be 2 minutes or shorter".into()),
            }),
        );
        assert_eq!(session.phase(), Phase::Failed);
        assert_eq!(session.progress().percent, 0);
        assert_eq!(session.error(), Some("Video must be 2 minutes or shorter"));
    }

    #[test]
    fn test_progress_is_scaled_and_monotonic() {
        let mut session = UploadSession::new(MediaKind::Video);
        session.select_file(clip()).unwrap();
        let ticket = session.begin_upload().unwrap();

        session.on_upload_progress(ticket, 30, 100);
        assert_eq!(session.progress().percent, 27);
        assert_eq!(session.progress().status, "Uploading video... 30%");

        session.on_upload_progress(ticket, 10, 100);
        assert_eq!(session.progress().percent, 27);

        session.on_upload_progress(ticket, 100, 100);
        assert_eq!(session.progress().percent, UPLOAD_PROGRESS_CEILING);
        assert_eq!(session.progress().stage, ProgressStage::Processing);
    }

    #[test]
    fn test_second_submit_while_uploading_is_rejected() {
        let mut session = UploadSession::new(MediaKind::Video);
        session.select_file(clip()).unwrap();
        session.begin_upload().unwrap();
        assert!(matches!(session.begin_upload(), Err(ClientError::UploadInProgress)));
        assert!(session.is_loading());
    }

    #[test]
    fn test_stale_upload_result_is_ignored() {
        let mut session = UploadSession::new(MediaKind::Video);
        session.select_file(clip()).unwrap();
        let old = session.begin_upload().unwrap();

        session.select_file(clip()).unwrap();
        session.on_upload_progress(old, 100, 100);
        assert!(!session.complete_upload(old, Ok(Report::from_value(json!({})).unwrap())));
        assert_eq!(session.phase(), Phase::Selected);
        assert_eq!(session.progress().percent, 0);
        assert!(session.report().is_none());
    }

    #[test]
    fn test_analysis_only_in_image_mode() {
        let mut session = UploadSession::new(MediaKind::Video);
        session.select_file(clip()).unwrap();
        let ticket = session.begin_upload().unwrap();
        session.complete_upload(ticket, Ok(summary_report()));
        assert!(session.begin_analysis().is_none());
    }

    #[test]
    fn test_analysis_requires_match_summary() {
        let mut session = UploadSession::new(MediaKind::Image);
        session.select_file(screenshot()).unwrap();
        let ticket = session.begin_upload().unwrap();
        session.complete_upload(ticket, Ok(Report::from_value(json!({"total_shots": 1})).unwrap()));
        assert!(session.begin_analysis().is_none());
        assert_eq!(session.insights(), &InsightsState::NotRequested);
    }

    #[test]
    fn test_analysis_outcomes_keep_report() {
        for (outcome, expected) in [
            (
                AnalysisOutcome::Ready(vec!["Improve crosshair placement.".into()]),
                InsightsState::Ready(vec!["Improve crosshair placement.".into()]),
            ),
            (
                AnalysisOutcome::Unavailable(UNAVAILABLE_MESSAGE.into()),
                InsightsState::Unavailable(UNAVAILABLE_MESSAGE.into()),
            ),
            (
                AnalysisOutcome::Failed(FAILED_MESSAGE.into()),
                InsightsState::Failed(FAILED_MESSAGE.into()),
            ),
        ] {
            let mut session = UploadSession::new(MediaKind::Image);
            session.select_file(screenshot()).unwrap();
            let ticket = session.begin_upload().unwrap();
            session.complete_upload(ticket, Ok(summary_report()));

            let (analysis, body) = session.begin_analysis().unwrap();
            assert_eq!(body["match_data"]["combat_stats"]["accuracy"], 33);
            assert!(session.is_analyzing());
            assert!(!session.is_loading());
            assert!(session.begin_analysis().is_none());

            assert!(session.complete_analysis(analysis, outcome));
            assert_eq!(session.insights(), &expected);
            assert_eq!(session.report(), Some(&summary_report()));
            assert!(session.error().is_none());
            assert_eq!(session.phase(), Phase::Succeeded);
        }
    }

    #[test]
    fn test_stale_analysis_is_ignored() {
        let mut session = UploadSession::new(MediaKind::Image);
        session.select_file(screenshot()).unwrap();
        let ticket = session.begin_upload().unwrap();
        session.complete_upload(ticket, Ok(summary_report()));
        let (analysis, _) = session.begin_analysis().unwrap();

        session.select_file(screenshot()).unwrap();
        assert!(!session.complete_analysis(analysis, AnalysisOutcome::Ready(vec!["late".into()])));
        assert_eq!(session.insights(), &InsightsState::NotRequested);
    }

    #[test]
    fn test_mode_switch_resets() {
        let mut session = UploadSession::new(MediaKind::Video);
        session.select_file(clip()).unwrap();
        session.set_mode(MediaKind::Image);
        assert_eq!(session.mode(), MediaKind::Image);
        assert!(session.file().is_none());
        assert_eq!(session.phase(), Phase::Idle);
    }
}
