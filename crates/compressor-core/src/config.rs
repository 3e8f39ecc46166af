//! Configuration for archive extraction.

/// Extraction settings.
///
/// # Examples
///
/// ```
/// use compressor_core::ExtractionConfig;
///
/// // Restore the modes recorded in the archive
/// let config = ExtractionConfig::default();
/// assert!(config.preserve_permissions);
///
/// // Leave file modes to the process umask
/// let plain = ExtractionConfig::default().with_preserve_permissions(false);
/// ```
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Apply the unix mode stored with each entry to the extracted file or
    /// directory.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,

    /// Maximum number of components in an entry name.
    ///
    /// Default: `256`.
    pub max_path_depth: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            preserve_permissions: true,
            max_path_depth: 256,
        }
    }
}

impl ExtractionConfig {
    /// Creates a new `ExtractionConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether entry modes are applied.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Sets the maximum entry name depth.
    #[must_use]
    pub fn with_max_path_depth(mut self, depth: usize) -> Self {
        self.max_path_depth = depth;
        self
    }
}
