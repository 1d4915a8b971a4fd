//! Multipart upload to the analysis backend.
//!
//! `fetch` exposes no upload progress, so the request goes through
//! `XMLHttpRequest` and its `upload.onprogress` events. Completion is
//! bridged into a future with a oneshot channel.

use std::cell::RefCell;
use std::rc::Rc;

use fraglens::{parse_upload_response, ClientConfig, ClientError, ClientResult, FileHandle, MediaKind, Report};
use futures::channel::oneshot;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{FormData, ProgressEvent, XmlHttpRequest};

use crate::types::{js_error, BrowserFile};

/// Upload a file and parse the report.
///
/// `on_progress(sent, total)` fires for every progress event with a known
/// length. One request, no retry.
pub async fn upload_file<P>(
    file: &BrowserFile,
    kind: MediaKind,
    config: &ClientConfig,
    on_progress: P,
) -> ClientResult<Report>
where
    P: Fn(u64, u64) + 'static,
{
    let form = FormData::new().map_err(js_error("Failed to create FormData"))?;
    form.append_with_blob_and_filename("file", file.file(), file.name())
        .map_err(js_error("Failed to append file"))?;
    if kind.sends_debug_flag() && config.debug {
        form.append_with_str("debug", "true")
            .map_err(js_error("Failed to append debug flag"))?;
    }

    let url = config.upload_url();
    let xhr = XmlHttpRequest::new().map_err(js_error("Failed to create request"))?;
    xhr.open("POST", &url).map_err(js_error("Failed to open request"))?;

    let on_upload_progress = Closure::<dyn FnMut(ProgressEvent)>::new(move |ev: ProgressEvent| {
        if ev.length_computable() {
            on_progress(ev.loaded() as u64, ev.total() as u64);
        }
    });
    xhr.upload()
        .map_err(js_error("Upload events unavailable"))?
        .set_onprogress(Some(on_upload_progress.as_ref().unchecked_ref()));

    let (tx, rx) = oneshot::channel::<()>();
    let tx = Rc::new(RefCell::new(Some(tx)));
    let on_load_end = Closure::<dyn FnMut()>::new(move || {
        if let Some(tx) = tx.borrow_mut().take() {
            let _ = tx.send(());
        }
    });
    xhr.set_onloadend(Some(on_load_end.as_ref().unchecked_ref()));

    log::info!("📤 POST {} ({}, {} bytes)", url, file.name(), file.size());
    xhr.send_with_opt_form_data(Some(&form))
        .map_err(js_error("HTTP request failed"))?;

    // Closures must outlive the request.
    let _ = rx.await;
    drop(on_upload_progress);
    drop(on_load_end);

    let status = xhr.status().map_err(js_error("Failed to read status"))?;
    if status == 0 {
        return Err(ClientError::Transport("Network Error".to_string()));
    }
    let text = xhr
        .response_text()
        .map_err(js_error("Failed to read response"))?
        .unwrap_or_default();
    log::debug!("Upload answered {} ({} bytes)", status, text.len());

    parse_upload_response(status, &text)
}
