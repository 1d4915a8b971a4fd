//! Client configuration.
//!
//! The analysis backend is a local development service, so the endpoint
//! defaults are hardcoded. The native client can override the base URL
//! through the environment (or a `.env` file) and the command line.

/// Default backend base URL.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Environment variable overriding [`DEFAULT_BACKEND_URL`].
pub const BACKEND_URL_ENV: &str = "FRAGLENS_BACKEND_URL";

/// Multipart upload endpoint path.
pub const UPLOAD_PATH: &str = "/upload";

/// AI insights endpoint path.
pub const ANALYZE_PATH: &str = "/analyze";

/// Share of the progress bar covered by the upload itself.
///
/// The backend never reports its own progress; the remainder is only
/// filled once the report arrives.
pub const UPLOAD_PROGRESS_CEILING: u8 = 90;

/// Size of the body chunks streamed by the native client (64 KiB).
pub const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash.
    pub backend_url: String,
    /// Send `debug=true` with video uploads.
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            debug: true,
        }
    }
}

impl ClientConfig {
    /// Build a configuration for an explicit backend URL.
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: normalize_base_url(&backend_url.into()),
            ..Self::default()
        }
    }

    /// Load the configuration from the environment.
    ///
    /// Reads `.env` first if present, then `FRAGLENS_BACKEND_URL`.
    #[cfg(feature = "native")]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        match std::env::var(BACKEND_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    /// Set whether video uploads carry the `debug` form field.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Full URL of the upload endpoint.
    pub fn upload_url(&self) -> String {
        format!("{}{}", self.backend_url, UPLOAD_PATH)
    }

    /// Full URL of the analysis endpoint.
    pub fn analyze_url(&self) -> String {
        format!("{}{}", self.backend_url, ANALYZE_PATH)
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let config = ClientConfig::default();
        assert_eq!(config.upload_url(), "http://127.0.0.1:5000/upload");
        assert_eq!(config.analyze_url(), "http://127.0.0.1:5000/analyze");
        assert!(config.debug);
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let config = ClientConfig::new("http://localhost:8080/ ");
        assert_eq!(config.upload_url(), "http://localhost:8080/upload");
    }
}
