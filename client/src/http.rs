//! Native HTTP transport.
//!
//! [`UploadClient`] talks to the analysis backend with `reqwest`. The
//! upload body is streamed in [`UPLOAD_CHUNK_SIZE`] chunks so progress can
//! be reported as bytes are handed to the connection.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fraglens::{ClientConfig, LocalFile, MediaKind, UploadClient, UploadSession};
//!
//! let client = UploadClient::new(ClientConfig::from_env());
//! let mut session = UploadSession::new(MediaKind::Video);
//! session.select_file(LocalFile::open("clip.mp4").await?)?;
//! client.submit(&mut session, |p| println!("{}", p.status)).await?;
//! ```

use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use bytes::Bytes;
use reqwest::Body;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::analysis::{classify_analysis_response, transport_failure, AnalysisOutcome};
use crate::config::{ClientConfig, UPLOAD_CHUNK_SIZE};
use crate::error::{ClientError, ClientResult};
use crate::media::{FileHandle, LocalFile, MediaKind};
use crate::report::{parse_upload_response, Report};
use crate::session::{Progress, UploadSession};

/// HTTP client for the `/upload` and `/analyze` endpoints.
#[derive(Clone)]
pub struct UploadClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl UploadClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Upload a file and parse the report.
    ///
    /// `on_progress(sent, total)` is called after each body chunk is
    /// handed over. One request, no retry.
    pub async fn upload<P>(&self, file: &LocalFile, kind: MediaKind, on_progress: P) -> ClientResult<Report>
    where
        P: Fn(u64, u64) + Send + Sync + 'static,
    {
        let total = file.size();
        let mut sent = 0u64;
        let body = futures::stream::iter(body_chunks(file.bytes())).map(move |chunk| {
            sent += chunk.len() as u64;
            on_progress(sent, total);
            Ok::<_, std::io::Error>(chunk)
        });

        let part = Part::stream_with_length(Body::wrap_stream(body), total)
            .file_name(file.name().to_string())
            .mime_str(file.mime())?;

        let mut form = Form::new().part("file", part);
        if kind.sends_debug_flag() && self.config.debug {
            form = form.text("debug", "true");
        }

        let url = self.config.upload_url();
        log::info!("POST {} ({}, {} bytes)", url, file.name(), total);

        let response = self.http.post(&url).multipart(form).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        log::debug!("Upload answered {} ({} bytes)", status, text.len());

        parse_upload_response(status, &text)
    }

    /// Ask the backend for AI insights on a match summary.
    ///
    /// `body` is the `/analyze` request body. Transport errors become
    /// [`AnalysisOutcome::Failed`].
    pub async fn analyze(&self, body: &Value) -> AnalysisOutcome {
        let url = self.config.analyze_url();
        log::info!("POST {}", url);

        let response = match self.http.post(&url).json(body).send().await {
            Ok(response) => response,
            Err(e) => return transport_failure(&e.to_string()),
        };
        let status = response.status().as_u16();
        match response.text().await {
            Ok(text) => classify_analysis_response(status, &text),
            Err(e) => transport_failure(&e.to_string()),
        }
    }

    /// Run the session's upload: validate, send, feed progress and the
    /// outcome back into the session.
    ///
    /// Returns an error only for input validation (nothing was sent). A
    /// failed upload is recorded in the session like a successful one.
    pub async fn submit<U>(&self, session: &mut UploadSession<LocalFile>, mut on_update: U) -> ClientResult<()>
    where
        U: FnMut(&Progress),
    {
        let ticket = session.begin_upload()?;
        let file = session.file().cloned().ok_or(ClientError::NoFileSelected)?;
        on_update(session.progress());

        let (tx, mut rx) = mpsc::unbounded_channel();
        let upload = self.upload(&file, session.mode(), move |sent, total| {
            let _ = tx.send((sent, total));
        });
        tokio::pin!(upload);

        let result = loop {
            tokio::select! {
                result = &mut upload => break result,
                Some((sent, total)) = rx.recv() => {
                    session.on_upload_progress(ticket, sent, total);
                    on_update(session.progress());
                }
            }
        };
        while let Ok((sent, total)) = rx.try_recv() {
            session.on_upload_progress(ticket, sent, total);
        }

        session.complete_upload(ticket, result);
        on_update(session.progress());
        Ok(())
    }

    /// Run the insights call for the session's report, if it applies.
    ///
    /// Returns whether a request was sent.
    pub async fn request_analysis(&self, session: &mut UploadSession<LocalFile>) -> bool {
        let Some((ticket, body)) = session.begin_analysis() else {
            return false;
        };
        let outcome = self.analyze(&body).await;
        session.complete_analysis(ticket, outcome);
        true
    }
}

/// Split the content into upload chunks without copying it.
fn body_chunks(content: &Bytes) -> impl Iterator<Item = Bytes> {
    let content = content.clone();
    (0..content.len())
        .step_by(UPLOAD_CHUNK_SIZE)
        .map(move |start| content.slice(start..(start + UPLOAD_CHUNK_SIZE).min(content.len())))
}
