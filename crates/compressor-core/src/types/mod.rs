//! Validated path types for archive extraction.
//!
//! Both types are only constructed through validation, so a function that
//! takes a `SafePath` and a `DestDir` cannot write outside the destination.

pub mod dest_dir;
pub mod safe_path;

pub use dest_dir::DestDir;
pub use safe_path::SafePath;
