//! Backend services.
//!
//! # Services
//!
//! - [`upload`] - multipart upload with progress (`XMLHttpRequest`)
//! - [`analysis`] - AI insights for a match summary (`gloo-net`)

pub mod upload;
pub mod analysis;

pub use upload::*;
pub use analysis::*;
