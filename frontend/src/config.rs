//! Application configuration.
//!
//! The browser build has no environment or persisted settings, so the
//! backend location is fixed at compile time.

use fraglens::{ClientConfig, DEFAULT_BACKEND_URL};

/// Backend API base URL.
pub const BACKEND_URL: &str = DEFAULT_BACKEND_URL;

/// Application name, shown in the page title.
pub const APP_NAME: &str = "Fraglens";

/// Client configuration used by every request from the page.
pub fn client_config() -> ClientConfig {
    ClientConfig::new(BACKEND_URL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_targets_local_backend() {
        let config = client_config();
        assert_eq!(config.upload_url(), "http://127.0.0.1:5000/upload");
        assert_eq!(config.analyze_url(), "http://127.0.0.1:5000/analyze");
        assert!(config.debug);
    }
}
