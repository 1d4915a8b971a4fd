//! Media kinds and selected-file handles.
//!
//! The active [`MediaKind`] decides which MIME class a selection must
//! belong to and how the upload is shaped. A selection is anything that
//! implements [`FileHandle`]: a [`LocalFile`] read from disk natively, or
//! a browser `File` wrapper in the frontend.

use std::fmt;

/// MIME type used when nothing better can be determined.
pub const UNKNOWN_MIME: &str = "application/octet-stream";

/// The kind of media the client is currently collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaKind {
    /// Gameplay recording, analysed for aim and reaction stats.
    #[default]
    Video,
    /// Post-match screenshot, analysed into a match summary.
    Image,
}

impl MediaKind {
    /// MIME class prefix, e.g. `video/`.
    pub fn mime_prefix(&self) -> &'static str {
        match self {
            MediaKind::Video => "video/",
            MediaKind::Image => "image/",
        }
    }

    /// Value for an `<input accept=...>` attribute.
    pub fn accept(&self) -> &'static str {
        match self {
            MediaKind::Video => "video/*",
            MediaKind::Image => "image/*",
        }
    }

    /// Whether `mime` belongs to this kind's class.
    ///
    /// Comparison ignores case and MIME parameters.
    pub fn accepts(&self, mime: &str) -> bool {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        essence.starts_with(self.mime_prefix()) && essence.len() > self.mime_prefix().len()
    }

    /// Video uploads ask the backend for its debug output.
    pub fn sends_debug_flag(&self) -> bool {
        matches!(self, MediaKind::Video)
    }

    /// Only match summaries extracted from screenshots can be sent on
    /// for AI insights.
    pub fn supports_analysis(&self) -> bool {
        matches!(self, MediaKind::Image)
    }

    /// Message shown when a failed upload carries no better explanation.
    pub fn fallback_error(&self) -> &'static str {
        match self {
            MediaKind::Video => "Error processing video",
            MediaKind::Image => "Error processing image",
        }
    }

    /// Noun used in status lines.
    pub fn noun(&self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Image => "image",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "video" => Ok(MediaKind::Video),
            "image" => Ok(MediaKind::Image),
            other => Err(format!("unknown media kind '{}' (expected video or image)", other)),
        }
    }
}

/// A user-selected file, as far as the upload client cares.
pub trait FileHandle {
    /// File name sent with the multipart part.
    fn name(&self) -> &str;
    /// Declared or detected MIME type.
    fn mime(&self) -> &str;
    /// Size in bytes.
    fn size(&self) -> u64;
}

/// Guess a MIME type from a file name's extension.
pub fn mime_from_extension(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    let mime = match ext.to_ascii_lowercase().as_str() {
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => return None,
    };
    Some(mime)
}

/// A file read from the local filesystem.
///
/// Content is held in a shared [`Bytes`](bytes::Bytes) buffer, so clones
/// and upload chunks are views into the same allocation.
#[cfg(feature = "native")]
#[derive(Debug, Clone)]
pub struct LocalFile {
    name: String,
    mime: String,
    bytes: bytes::Bytes,
}

#[cfg(feature = "native")]
impl LocalFile {
    /// Read a file and detect its MIME type.
    ///
    /// Content sniffing wins over the extension; files that match neither
    /// are reported as `application/octet-stream`.
    pub async fn open(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        let mime = detect_mime(&name, &bytes);

        log::debug!("Opened {} ({} bytes, {})", path.display(), bytes.len(), mime);

        Ok(Self {
            name,
            mime,
            bytes: bytes.into(),
        })
    }

    /// Build a file from in-memory content.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = detect_mime(&name, &bytes);
        Self {
            name,
            mime,
            bytes: bytes.into(),
        }
    }

    /// Raw content.
    pub fn bytes(&self) -> &bytes::Bytes {
        &self.bytes
    }
}

#[cfg(feature = "native")]
impl FileHandle for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime(&self) -> &str {
        &self.mime
    }

    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[cfg(feature = "native")]
fn detect_mime(name: &str, bytes: &[u8]) -> String {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type().to_string();
    }
    mime_from_extension(name).unwrap_or(UNKNOWN_MIME).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_matching_class_only() {
        assert!(MediaKind::Video.accepts("video/mp4"));
        assert!(MediaKind::Video.accepts("Video/WebM; codecs=vp9"));
        assert!(!MediaKind::Video.accepts("image/png"));
        assert!(MediaKind::Image.accepts("image/png"));
        assert!(!MediaKind::Image.accepts("application/octet-stream"));
        assert!(!MediaKind::Image.accepts("image/"));
        assert!(!MediaKind::Image.accepts(""));
    }

    #[test]
    fn test_variant_flags() {
        assert!(MediaKind::Video.sends_debug_flag());
        assert!(!MediaKind::Image.sends_debug_flag());
        assert!(MediaKind::Image.supports_analysis());
        assert!(!MediaKind::Video.supports_analysis());
        assert_eq!(MediaKind::Image.accept(), "image/*");
    }

    #[test]
    fn test_parse_media_kind() {
        assert_eq!("IMAGE".parse::<MediaKind>(), Ok(MediaKind::Image));
        assert_eq!("video".parse::<MediaKind>(), Ok(MediaKind::Video));
        assert!("audio".parse::<MediaKind>().is_err());
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_from_extension("clip.MP4"), Some("video/mp4"));
        assert_eq!(mime_from_extension("shot.jpeg"), Some("image/jpeg"));
        assert_eq!(mime_from_extension("notes.txt"), None);
        assert_eq!(mime_from_extension("no_extension"), None);
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_local_file_sniffs_content_before_extension() {
        let png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR".to_vec();
        let file = LocalFile::from_bytes("misnamed.mp4", png);
        assert_eq!(file.mime(), "image/png");
        assert_eq!(file.size(), 16);
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_local_file_falls_back_to_extension() {
        let file = LocalFile::from_bytes("clip.mp4", b"not really a video".to_vec());
        assert_eq!(file.mime(), "video/mp4");

        let unknown = LocalFile::from_bytes("notes", b"plain words".to_vec());
        assert_eq!(unknown.mime(), UNKNOWN_MIME);
    }
}
