/// Settings for a single resolution run.
///
/// Created once per top-level call and shared unchanged by every branch of
/// the traversal. The default is the full-detail run with absolute paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalConfig {
    /// Emit paths relative to the working directory instead of absolute.
    pub relative: bool,
    pub exclude_tree: bool,
    pub exclude_files: bool,
    pub exclude_urls: bool,
}

impl TraversalConfig {
    /// Only the flat list of visited stylesheet paths.
    pub fn files_only(relative: bool) -> Self {
        Self { relative, exclude_tree: true, exclude_files: false, exclude_urls: true }
    }

    /// Only the flat list of remote URLs.
    pub fn urls_only(relative: bool) -> Self {
        Self { relative, exclude_tree: true, exclude_files: true, exclude_urls: false }
    }

    pub fn builds_tree(&self) -> bool {
        !self.exclude_tree
    }

    pub fn collects_files(&self) -> bool {
        !self.exclude_files
    }

    pub fn collects_urls(&self) -> bool {
        !self.exclude_urls
    }
}
