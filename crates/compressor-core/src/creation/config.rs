//! Configuration for archive creation operations.

/// Configuration for archive creation operations.
///
/// # Examples
///
/// ```
/// use compressor_core::creation::CreationConfig;
///
/// let config = CreationConfig::default();
/// assert!(!config.follow_symlinks);
///
/// let custom = CreationConfig::default()
///     .with_follow_symlinks(true)
///     .with_preserve_permissions(false);
/// ```
#[derive(Debug, Clone)]
pub struct CreationConfig {
    /// Follow symlinks when adding files to the archive.
    ///
    /// Default: `false` (symlinks are skipped with a warning, since ZIP has
    /// no portable symlink entry).
    ///
    /// Following symlinks may pull in files from outside the source tree.
    pub follow_symlinks: bool,

    /// Record unix permission bits with each entry.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,
}

impl Default for CreationConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            preserve_permissions: true,
        }
    }
}

impl CreationConfig {
    /// Creates a new `CreationConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to follow symlinks.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Sets whether to record permissions.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CreationConfig::default();
        assert!(!config.follow_symlinks);
        assert!(config.preserve_permissions);
    }

    #[test]
    fn test_builder_pattern() {
        let config = CreationConfig::new()
            .with_follow_symlinks(true)
            .with_preserve_permissions(false);

        assert!(config.follow_symlinks);
        assert!(!config.preserve_permissions);
    }
}
