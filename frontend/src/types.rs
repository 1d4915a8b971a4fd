//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **File Types** - [`BrowserFile`], the browser side of [`FileHandle`]
//! - **Error Types** - mapping JavaScript exceptions into [`ClientError`]

use fraglens::{ClientError, FileHandle};
use wasm_bindgen::JsValue;
use web_sys::File;

// =============================================================================
// File Types
// =============================================================================

/// A file picked through an `<input type="file">`.
///
/// Name, type and size are read once at selection; the MIME type is the
/// one the browser reports, which may be empty for unknown extensions.
#[derive(Clone, Debug)]
pub struct BrowserFile {
    file: File,
    name: String,
    mime: String,
    size: u64,
}

impl BrowserFile {
    pub fn new(file: File) -> Self {
        Self {
            name: file.name(),
            mime: file.type_(),
            size: file.size() as u64,
            file,
        }
    }

    /// The underlying DOM file, appended to the upload form.
    pub fn file(&self) -> &File {
        &self.file
    }
}

impl FileHandle for BrowserFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime(&self) -> &str {
        &self.mime
    }

    fn size(&self) -> u64 {
        self.size
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Wrap a JavaScript exception as a transport error with some context.
///
/// Exceptions are usually `Error` objects, so their `message` is read
/// first; thrown strings are used as-is.
pub fn js_error(context: &'static str) -> impl Fn(JsValue) -> ClientError {
    move |err| {
        let detail = js_sys::Reflect::get(&err, &"message".into())
            .ok()
            .and_then(|v| v.as_string())
            .or_else(|| err.as_string());
        transport_error(context, detail)
    }
}

fn transport_error(context: &str, detail: Option<String>) -> ClientError {
    let detail = detail
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| "Unknown JS error".to_string());
    ClientError::Transport(format!("{}: {}", context, detail))
}
