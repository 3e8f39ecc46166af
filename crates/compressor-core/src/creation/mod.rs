//! Archive creation module.
//!
//! Walks a file or directory and writes it into a ZIP archive whose entry
//! names mirror the source's relative structure.

pub mod config;
pub mod report;
pub mod walker;
pub mod zip;

// Re-exports for public API
pub use config::CreationConfig;
pub use report::CreationReport;
pub use walker::EntryType;
pub use walker::SourceEntry;
pub use walker::collect_entries;
