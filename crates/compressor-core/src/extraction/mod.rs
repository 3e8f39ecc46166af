//! Archive extraction module.

pub mod common;
pub mod zip;

pub use zip::extract_zip;
pub use zip::extract_zip_with_progress;
