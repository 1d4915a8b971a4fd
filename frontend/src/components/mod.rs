//! UI Components for the Fraglens application.
//!
//! # Layout Components
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`ModeSwitch`] - Gameplay clip / match screenshot toggle
//! - [`UploadSection`] - File picker, submit button and errors
//! - [`ProgressSection`] - Upload and processing progress bar
//! - [`ReportPanel`] - Stat boxes of the current report
//! - [`InsightsPanel`] - AI insight cards (screenshots only)

mod hero;
mod mode_switch;
mod upload;
mod progress;
mod report;
mod insights;
mod footer;

pub use hero::*;
pub use mode_switch::*;
pub use upload::*;
pub use progress::*;
pub use report::*;
pub use insights::*;
pub use footer::*;
