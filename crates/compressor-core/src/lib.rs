//! ZIP archive creation and extraction.
//!
//! `compressor-core` packs a file or directory tree into a standard ZIP
//! archive and unpacks one back onto disk. Directory sources keep their own
//! name as the root of every entry; extraction validates each entry name so
//! nothing is written outside the target directory.
//!
//! # Examples
//!
//! ```no_run
//! use compressor_core::archive;
//! use compressor_core::extract;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let created = archive("project", "project.zip")?;
//! println!("Archived {} files", created.files_added);
//!
//! let extracted = extract("project.zip", "restored")?;
//! println!("Extracted {} files", extracted.files_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod creation;
pub mod error;
pub mod extraction;
pub mod report;
pub mod types;

// Re-export main API types
pub use api::archive;
pub use api::create_archive;
pub use api::create_archive_with_progress;
pub use api::extract;
pub use api::extract_archive;
pub use api::extract_archive_with_progress;
pub use config::ExtractionConfig;
pub use creation::CreationConfig;
pub use creation::CreationReport;
pub use error::ArchiveError;
pub use error::Result;
pub use report::ExtractionReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;

// Re-export types module for easier access
pub use types::DestDir;
pub use types::SafePath;
